//! Repeated rule application until a fixed point or a step cap.

use tracing::debug;

use crate::coloring::{Color, Coloring};
use crate::error::Result;
use crate::graph::Graph;
use crate::rules::Rule;

/// The colorings `[c_0, c_1, ..., c_n]` visited from an initial coloring,
/// with `c_{i+1} = rule(c_i)`. Never empty, and no two consecutive colorings
/// are equal.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<C> {
    colorings: Vec<Coloring<C>>,
    stabilized: bool,
}

impl<C: Color> Trajectory<C> {
    pub fn colorings(&self) -> &[Coloring<C>] {
        &self.colorings
    }

    pub fn into_colorings(self) -> Vec<Coloring<C>> {
        self.colorings
    }

    /// true if applying the rule to the last coloring gave it back unchanged
    pub fn stabilized(&self) -> bool {
        self.stabilized
    }

    /// number of colorings in the trajectory, the initial one included
    pub fn len(&self) -> usize {
        self.colorings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colorings.is_empty()
    }

    pub fn initial(&self) -> &Coloring<C> {
        &self.colorings[0]
    }

    pub fn last(&self) -> &Coloring<C> {
        &self.colorings[self.colorings.len() - 1]
    }
}

/// Applies `rule` to `coloring` at most `max_steps` times.
///
/// Stops early, without appending the repeated coloring, as soon as a step
/// returns the coloring it was given. Convergence is not guaranteed: some
/// rule and graph combinations cycle forever, in which case the trajectory
/// has `max_steps + 1` colorings and is not stabilized.
pub fn iterate<C: Color>(
    graph: &dyn Graph,
    coloring: &Coloring<C>,
    rule: &Rule<C>,
    max_steps: usize,
) -> Result<Trajectory<C>> {
    let mut colorings = vec![coloring.clone()];
    let mut stabilized = false;

    for step in 0..max_steps {
        let current = &colorings[colorings.len() - 1];
        let next = rule.apply(graph, current)?;
        if &next == current {
            debug!("{} stabilized after {} steps", rule.name(), step);
            stabilized = true;
            break;
        }
        let changed = current.differences(&next)?;
        debug!(
            "{} step {}: {} vertices changed color",
            rule.name(),
            step + 1,
            changed
        );
        colorings.push(next);
    }

    Ok(Trajectory {
        colorings,
        stabilized,
    })
}
