//! Color update rules.
//!
//! Every rule maps a graph and a coloring to a new coloring, computed for all
//! vertices from the old coloring only. The input coloring is never modified.

mod gsl;
mod majority;
mod tally;

#[cfg(test)]
mod tests;

use std::fmt;

use tracing::warn;

use crate::coloring::{Color, Coloring};
use crate::error::{Error, Result};
use crate::graph::{Graph, IndexT};

pub use gsl::{gsl2, gsl3, Gsl2Params, Gsl3Params};
pub use majority::{majority, plurality};

/// The closed set of update rules, each carrying its own parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule<C> {
    Majority,
    Plurality,
    Gsl2(Gsl2Params<C>),
    Gsl3(Gsl3Params<C>),
}

impl<C: Color> Rule<C> {
    /// two-color GSL rule over `[green, yellow]`
    pub fn gsl2(palette: Vec<C>, threshold: f64) -> Result<Rule<C>> {
        let params = Gsl2Params { palette, threshold };
        params.validate()?;
        Ok(Rule::Gsl2(params))
    }

    /// three-color GSL rule over `[green, red, yellow]` with thresholds `T`, `t`, `s`
    pub fn gsl3(
        palette: Vec<C>,
        threshold: f64,
        weak_threshold: f64,
        opposition: f64,
    ) -> Result<Rule<C>> {
        let params = Gsl3Params {
            palette,
            threshold,
            weak_threshold,
            opposition,
        };
        params.validate()?;
        if threshold < 0.5 {
            warn!(
                "gsl3 threshold T={} is below 0.5, so green and red can both exert strong influence",
                threshold
            );
        }
        Ok(Rule::Gsl3(params))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Majority => "majority",
            Rule::Plurality => "plurality",
            Rule::Gsl2(_) => "gsl2",
            Rule::Gsl3(_) => "gsl3",
        }
    }

    /// the fixed palette of the GSL rules; majority and plurality work with any colors
    pub fn palette(&self) -> Option<&[C]> {
        match self {
            Rule::Majority | Rule::Plurality => None,
            Rule::Gsl2(params) => Some(&params.palette),
            Rule::Gsl3(params) => Some(&params.palette),
        }
    }

    /// computes the next coloring.
    ///
    /// parameters and the coloring's domain are checked before any vertex is updated
    pub fn apply(&self, graph: &dyn Graph, coloring: &Coloring<C>) -> Result<Coloring<C>> {
        if !coloring.covers(graph) {
            return Err(Error::InvalidColoring(format!(
                "coloring has {} entries but the graph has {} vertices",
                coloring.n(),
                graph.n()
            )));
        }

        match self {
            Rule::Majority => Ok(majority(graph, coloring)),
            Rule::Plurality => Ok(plurality(graph, coloring)),
            Rule::Gsl2(params) => gsl2(graph, coloring, params),
            Rule::Gsl3(params) => gsl3(graph, coloring, params),
        }
    }
}

impl<C: Color> fmt::Display for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Majority | Rule::Plurality => write!(f, "{}", self.name()),
            Rule::Gsl2(params) => write!(f, "gsl2 {:?} ({})", params.palette, params),
            Rule::Gsl3(params) => write!(f, "gsl3 {:?} ({})", params.palette, params),
        }
    }
}

/// builds a coloring by asking `f` for the new color of each vertex given its old one
fn update_vertices<C, F>(graph: &dyn Graph, coloring: &Coloring<C>, f: F) -> Coloring<C>
where
    C: Color,
    F: Fn(IndexT, &C) -> C,
{
    let colors = (0..graph.n() as IndexT)
        .map(|x| f(x, coloring.get(x)))
        .collect();
    Coloring::from_vec(colors)
}
