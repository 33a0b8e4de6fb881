//! a graph implementation using a vector of vectors

use crate::graph::IndexT;

use super::{Graph, MutableGraph};

/// Adjacency-list graph.
///
/// For directed graphs each list holds the in-neighbors of a vertex, since
/// those are the vertices whose colors a rule reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorGraph {
    neighborhoods: Vec<Vec<IndexT>>,
    directed: bool,
}

impl VectorGraph {
    /// constructs a new graph with `n` vertices and no edges
    pub fn empty(n: usize, directed: bool) -> VectorGraph {
        VectorGraph {
            neighborhoods: vec![Vec::new(); n],
            directed,
        }
    }

    /// builds an undirected graph from an edge list, skipping self-loops and repeated edges
    pub fn undirected_from_edges(n: usize, edges: &[(IndexT, IndexT)]) -> VectorGraph {
        let mut graph = VectorGraph::empty(n, false);
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// builds a directed graph from an edge list, skipping self-loops and repeated edges
    pub fn directed_from_edges(n: usize, edges: &[(IndexT, IndexT)]) -> VectorGraph {
        let mut graph = VectorGraph::empty(n, true);
        for &(from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// returns the neighborhood of a node
    pub fn get_neighborhood(&self, i: IndexT) -> &[IndexT] {
        assert!(i < self.n() as IndexT);
        &self.neighborhoods[i as usize]
    }

    pub fn degree(&self, i: IndexT) -> usize {
        self.get_neighborhood(i).len()
    }

    pub fn has_edge(&self, from: IndexT, to: IndexT) -> bool {
        assert!(from < self.n() as IndexT && to < self.n() as IndexT);
        if self.directed {
            self.neighborhoods[to as usize].contains(&from)
        } else {
            self.neighborhoods[from as usize].contains(&to)
        }
    }

    /// every edge exactly once; undirected edges are reported as `(a, b)` with `a < b`
    pub fn edges(&self) -> Vec<(IndexT, IndexT)> {
        let mut edges = Vec::with_capacity(self.total_edges());
        for (i, neighborhood) in self.neighborhoods.iter().enumerate() {
            let i = i as IndexT;
            for &j in neighborhood {
                if self.directed {
                    edges.push((j, i));
                } else if i < j {
                    edges.push((i, j));
                }
            }
        }
        edges.sort_unstable();
        edges
    }

    /// number of edges (undirected edges count once)
    pub fn total_edges(&self) -> usize {
        let endpoints: usize = self.neighborhoods.iter().map(|n| n.len()).sum();
        if self.directed {
            endpoints
        } else {
            endpoints / 2
        }
    }

    /// maximum degree of the graph
    pub fn max_degree(&self) -> usize {
        self.neighborhoods
            .iter()
            .map(|n| n.len())
            .max()
            .unwrap_or(0)
    }
}

impl Graph for VectorGraph {
    fn n(&self) -> usize {
        self.neighborhoods.len()
    }

    fn neighbors(&self, i: IndexT) -> &[IndexT] {
        self.get_neighborhood(i)
    }

    fn is_directed(&self) -> bool {
        self.directed
    }
}

impl MutableGraph for VectorGraph {
    fn add_edge(&mut self, from: IndexT, to: IndexT) -> bool {
        if from == to || self.has_edge(from, to) {
            return false;
        }
        self.neighborhoods[to as usize].push(from);
        if !self.directed {
            self.neighborhoods[from as usize].push(to);
        }
        true
    }

    fn remove_edge(&mut self, from: IndexT, to: IndexT) -> bool {
        if !self.has_edge(from, to) {
            return false;
        }
        self.neighborhoods[to as usize].retain(|&v| v != from);
        if !self.directed {
            self.neighborhoods[from as usize].retain(|&v| v != to);
        }
        true
    }
}
