//! Vertex colorings and color tallies.
//!
//! A coloring here is any assignment of colors to vertices; adjacent vertices
//! may share a color.

pub mod generators;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Index;

use crate::error::{Error, Result};
use crate::graph::{Graph, IndexT};

/// Anything usable as a vertex color. Only equality and ordering are ever
/// looked at; the ordering fixes tie-breaks and report order.
pub trait Color: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> Color for T {}

/// A total assignment of colors to the vertices `0..n` of a graph.
///
/// Colorings are never updated in place; a rule step produces a new one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coloring<C> {
    colors: Vec<C>,
}

impl<C: Color> Coloring<C> {
    /// wraps `colors`, where `colors[i]` is the color of vertex `i`
    pub fn new(graph: &dyn Graph, colors: Vec<C>) -> Result<Coloring<C>> {
        if colors.len() != graph.n() {
            return Err(Error::InvalidColoring(format!(
                "coloring has {} entries but the graph has {} vertices",
                colors.len(),
                graph.n()
            )));
        }
        Ok(Coloring { colors })
    }

    /// callers must guarantee one color per vertex
    pub(crate) fn from_vec(colors: Vec<C>) -> Coloring<C> {
        Coloring { colors }
    }

    /// number of colored vertices
    pub fn n(&self) -> usize {
        self.colors.len()
    }

    pub fn get(&self, i: IndexT) -> &C {
        &self.colors[i as usize]
    }

    pub fn as_slice(&self) -> &[C] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.colors.iter()
    }

    /// true when the coloring's domain is exactly the graph's vertex set
    pub fn covers(&self, graph: &dyn Graph) -> bool {
        self.colors.len() == graph.n()
    }

    pub fn color_count(&self) -> ColorCount<C> {
        let mut counts = BTreeMap::new();
        for color in &self.colors {
            *counts.entry(color.clone()).or_insert(0) += 1;
        }
        ColorCount(counts)
    }

    /// the inverse mapping: each color to the sorted list of vertices carrying it
    pub fn classes(&self) -> BTreeMap<C, Vec<IndexT>> {
        let mut classes: BTreeMap<C, Vec<IndexT>> = BTreeMap::new();
        for (i, color) in self.colors.iter().enumerate() {
            classes.entry(color.clone()).or_default().push(i as IndexT);
        }
        classes
    }

    /// number of vertices colored differently in `other`; both colorings
    /// must cover the same vertices
    pub fn differences(&self, other: &Coloring<C>) -> Result<usize> {
        if self.n() != other.n() {
            return Err(Error::InvalidColoring(format!(
                "cannot compare colorings of {} and {} vertices",
                self.n(),
                other.n()
            )));
        }
        Ok(self
            .colors
            .iter()
            .zip(other.colors.iter())
            .filter(|(a, b)| a != b)
            .count())
    }
}

impl<C> Index<IndexT> for Coloring<C> {
    type Output = C;

    fn index(&self, i: IndexT) -> &C {
        &self.colors[i as usize]
    }
}

/// Number of vertices per color. The counts sum to the vertex count of the
/// coloring they were taken from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorCount<C: Ord>(BTreeMap<C, usize>);

impl<C: Color> ColorCount<C> {
    /// count for `color`, zero if it never occurs
    pub fn get(&self, color: &C) -> usize {
        self.0.get(color).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// adds an explicit zero entry for every palette color that does not occur
    pub fn with_palette(mut self, palette: &[C]) -> ColorCount<C> {
        for color in palette {
            self.0.entry(color.clone()).or_insert(0);
        }
        self
    }

    /// entries in ascending color order
    pub fn iter(&self) -> impl Iterator<Item = (&C, usize)> {
        self.0.iter().map(|(color, &count)| (color, count))
    }
}
