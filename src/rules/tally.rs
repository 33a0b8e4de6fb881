//! neighbor color tallies shared by the update rules

use std::collections::BTreeMap;

use crate::coloring::{Color, Coloring};
use crate::graph::{Graph, IndexT};

/// counts of each color among the neighbors of one vertex
pub(crate) struct Tally<'a, C> {
    counts: BTreeMap<&'a C, usize>,
    total: usize,
}

impl<'a, C: Color> Tally<'a, C> {
    /// tallies every neighbor of `x`
    pub(crate) fn of(graph: &dyn Graph, coloring: &'a Coloring<C>, x: IndexT) -> Tally<'a, C> {
        let mut counts = BTreeMap::new();
        let neighbors = graph.neighbors(x);
        for &y in neighbors {
            *counts.entry(coloring.get(y)).or_insert(0) += 1;
        }
        Tally {
            counts,
            total: neighbors.len(),
        }
    }

    /// tallies only the neighbors of `x` whose color is in `palette`; the rest
    /// do not count towards `total` either
    pub(crate) fn within(
        graph: &dyn Graph,
        coloring: &'a Coloring<C>,
        x: IndexT,
        palette: &[C],
    ) -> Tally<'a, C> {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for &y in graph.neighbors(x) {
            let color = coloring.get(y);
            if palette.contains(color) {
                *counts.entry(color).or_insert(0) += 1;
                total += 1;
            }
        }
        Tally { counts, total }
    }

    pub(crate) fn count(&self, color: &C) -> usize {
        self.counts.get(color).copied().unwrap_or(0)
    }

    /// number of tallied neighbors
    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// the most frequent color and its count.
    ///
    /// ties go to the smallest color, so the result does not depend on the
    /// order in which neighbors are stored
    pub(crate) fn most_common(&self) -> Option<(&'a C, usize)> {
        self.counts
            .iter()
            .fold(None, |best, (&color, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((color, count)),
            })
    }

    /// true when `count > fraction * total`
    pub(crate) fn exceeds(&self, color: &C, fraction: f64) -> bool {
        self.count(color) as f64 > fraction * self.total as f64
    }
}
