//! Majority and plurality rules

use crate::coloring::{Color, Coloring};
use crate::graph::Graph;

use super::tally::Tally;
use super::update_vertices;

/// A vertex takes the color held by more than half of its neighbors; if no
/// such color exists it keeps its own. Vertices without neighbors never change.
pub fn majority<C: Color>(graph: &dyn Graph, coloring: &Coloring<C>) -> Coloring<C> {
    update_vertices(graph, coloring, |x, old| {
        let tally = Tally::of(graph, coloring, x);
        match tally.most_common() {
            Some((color, count)) if count as f64 > 0.5 * tally.total() as f64 => color.clone(),
            _ => old.clone(),
        }
    })
}

/// A vertex takes its neighbors' most frequent color, provided that color
/// occurs more than once; otherwise it keeps its own.
pub fn plurality<C: Color>(graph: &dyn Graph, coloring: &Coloring<C>) -> Coloring<C> {
    update_vertices(graph, coloring, |x, old| {
        match Tally::of(graph, coloring, x).most_common() {
            Some((color, count)) if count > 1 => color.clone(),
            _ => old.clone(),
        }
    })
}
