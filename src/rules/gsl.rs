//! Girard-Seligman-Liu threshold rules.
//!
//! Colors are read as opinions on a proposition: green is for it, red is
//! against it and yellow is undecided. Strong influence pulls a vertex to a
//! color held by more than a fraction `T` of its neighbors. Weak influence
//! (three-color rule only) makes a decided vertex undecided when its own
//! side is thin and the opposing side is present.

use std::fmt;

use crate::coloring::{Color, Coloring};
use crate::error::{Error, Result};
use crate::graph::Graph;

use super::tally::Tally;
use super::update_vertices;

/// Parameters of the two-color rule. `palette` is `[green, yellow]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Gsl2Params<C> {
    pub palette: Vec<C>,
    /// T: fraction of green neighbors that must be exceeded to turn green
    pub threshold: f64,
}

/// Parameters of the three-color rule. `palette` is `[green, red, yellow]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Gsl3Params<C> {
    pub palette: Vec<C>,
    /// T: strong influence threshold
    pub threshold: f64,
    /// t: a decided vertex with fewer than this fraction of like-minded neighbors is exposed
    pub weak_threshold: f64,
    /// s: fraction of opposing neighbors that makes an exposed vertex undecided
    pub opposition: f64,
}

impl Default for Gsl2Params<String> {
    fn default() -> Self {
        Gsl2Params {
            palette: vec!["green".to_string(), "yellow".to_string()],
            threshold: 0.5,
        }
    }
}

impl Default for Gsl3Params<String> {
    fn default() -> Self {
        Gsl3Params {
            palette: vec!["green".to_string(), "red".to_string(), "yellow".to_string()],
            threshold: 0.5,
            weak_threshold: 0.25,
            opposition: 0.25,
        }
    }
}

fn check_palette<C: Color>(rule: &str, palette: &[C], size: usize) -> Result<()> {
    let distinct = palette
        .iter()
        .enumerate()
        .all(|(i, c)| !palette[..i].contains(c));
    if palette.len() != size || !distinct {
        return Err(Error::InvalidParameter(format!(
            "{} needs exactly {} distinct colors, got {:?}",
            rule, size, palette
        )));
    }
    Ok(())
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidParameter(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

impl<C: Color> Gsl2Params<C> {
    pub fn validate(&self) -> Result<()> {
        check_palette("gsl2", &self.palette, 2)?;
        check_fraction("T", self.threshold)
    }
}

impl<C: Color> Gsl3Params<C> {
    pub fn validate(&self) -> Result<()> {
        check_palette("gsl3", &self.palette, 3)?;
        check_fraction("T", self.threshold)?;
        check_fraction("t", self.weak_threshold)?;
        check_fraction("s", self.opposition)?;
        if self.opposition + self.weak_threshold > self.threshold + f64::EPSILON {
            return Err(Error::InvalidParameter(format!(
                "s + t must not exceed T, got s={} t={} T={}",
                self.opposition, self.weak_threshold, self.threshold
            )));
        }
        Ok(())
    }
}

impl<C> fmt::Display for Gsl2Params<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T={}", self.threshold)
    }
}

impl<C> fmt::Display for Gsl3Params<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T={}, t={}, s={}",
            self.threshold, self.weak_threshold, self.opposition
        )
    }
}

/// Two-color rule: a vertex turns green when more than a fraction `T` of
/// its green-or-yellow neighbors are green, and keeps its color otherwise.
/// Yellow is never adopted.
pub fn gsl2<C: Color>(
    graph: &dyn Graph,
    coloring: &Coloring<C>,
    params: &Gsl2Params<C>,
) -> Result<Coloring<C>> {
    params.validate()?;
    let green = &params.palette[0];

    Ok(update_vertices(graph, coloring, |x, old| {
        let tally = Tally::within(graph, coloring, x, &params.palette);
        if tally.exceeds(green, params.threshold) {
            green.clone()
        } else {
            old.clone()
        }
    }))
}

/// Three-color rule. Only neighbors colored green, red or yellow are
/// counted. The first matching case decides:
///
/// 1. more than `T` green neighbors: green
/// 2. more than `T` red neighbors: red
/// 3. green vertex, fewer than `t` green and at least `s` red neighbors: yellow
/// 4. red vertex, fewer than `t` red and at least `s` green neighbors: yellow
/// 5. otherwise the color is kept
pub fn gsl3<C: Color>(
    graph: &dyn Graph,
    coloring: &Coloring<C>,
    params: &Gsl3Params<C>,
) -> Result<Coloring<C>> {
    params.validate()?;
    let (green, red, yellow) = (&params.palette[0], &params.palette[1], &params.palette[2]);

    Ok(update_vertices(graph, coloring, |x, old| {
        let tally = Tally::within(graph, coloring, x, &params.palette);
        let total = tally.total() as f64;
        let greens = tally.count(green) as f64;
        let reds = tally.count(red) as f64;

        if tally.exceeds(green, params.threshold) {
            green.clone()
        } else if tally.exceeds(red, params.threshold) {
            red.clone()
        } else if old == green
            && greens < params.weak_threshold * total
            && reds >= params.opposition * total
        {
            yellow.clone()
        } else if old == red
            && reds < params.weak_threshold * total
            && greens >= params.opposition * total
        {
            yellow.clone()
        } else {
            old.clone()
        }
    }))
}
