//! Graph generators consumed by the batch runner.
//!
//! Every generator draws its randomness from the caller's rng handle, so a
//! seeded rng reproduces the same sequence of graphs.

use rand::{Rng, RngCore};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, IndexT, MutableGraph, VectorGraph};

/// upper bound on rewiring attempts per requested swap
const MAX_ATTEMPTS_PER_SWAP: usize = 10;

/// A factory producing a fresh graph per call.
pub trait GraphGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<VectorGraph>;

    /// short human-readable description, used in reports
    fn name(&self) -> String;
}

impl<G: GraphGenerator + ?Sized> GraphGenerator for Box<G> {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<VectorGraph> {
        (**self).generate(rng)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Hands out a copy of the same graph on every call.
pub struct FixedGraph(pub VectorGraph);

impl GraphGenerator for FixedGraph {
    fn generate(&self, _rng: &mut dyn RngCore) -> Result<VectorGraph> {
        Ok(self.0.clone())
    }

    fn name(&self) -> String {
        format!(
            "fixed graph ({} vertices, {} edges)",
            self.0.n(),
            self.0.total_edges()
        )
    }
}

/// G(n, p): every pair of distinct vertices is joined independently with probability `p`.
///
/// On directed graphs the two orientations of a pair are drawn independently.
pub struct ErdosRenyi {
    pub n: usize,
    pub p: f64,
    pub directed: bool,
}

impl GraphGenerator for ErdosRenyi {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<VectorGraph> {
        if !(0.0..=1.0).contains(&self.p) {
            return Err(Error::InvalidParameter(format!(
                "edge probability must lie in [0, 1], got {}",
                self.p
            )));
        }

        let n = self.n as IndexT;
        let mut graph = VectorGraph::empty(self.n, self.directed);
        for i in 0..n {
            let targets = if self.directed { 0..n } else { (i + 1)..n };
            for j in targets {
                if i != j && rng.random_bool(self.p) {
                    graph.add_edge(i, j);
                }
            }
        }
        Ok(graph)
    }

    fn name(&self) -> String {
        let kind = if self.directed { "directed" } else { "undirected" };
        format!("{} erdos-renyi G({}, {})", kind, self.n, self.p)
    }
}

/// Rectangular grid with von Neumann (4) or Moore (8) neighborhoods.
pub struct SquareLattice {
    pub rows: usize,
    pub cols: usize,
    pub moore: bool,
    pub torus: bool,
}

impl GraphGenerator for SquareLattice {
    fn generate(&self, _rng: &mut dyn RngCore) -> Result<VectorGraph> {
        let offsets: &[(isize, isize)] = if self.moore {
            &[(0, 1), (1, 0), (1, 1), (1, -1)]
        } else {
            &[(0, 1), (1, 0)]
        };
        lattice(self.rows, self.cols, offsets, self.torus)
    }

    fn name(&self) -> String {
        let kind = if self.moore { "moore" } else { "square" };
        format!(
            "{} lattice {}x{}{}",
            kind,
            self.rows,
            self.cols,
            if self.torus { " (torus)" } else { "" }
        )
    }
}

/// Grid where every cell is also joined to its lower-right diagonal, giving
/// each interior vertex six neighbors.
pub struct TriangularLattice {
    pub rows: usize,
    pub cols: usize,
    pub torus: bool,
}

impl GraphGenerator for TriangularLattice {
    fn generate(&self, _rng: &mut dyn RngCore) -> Result<VectorGraph> {
        lattice(self.rows, self.cols, &[(0, 1), (1, 0), (1, 1)], self.torus)
    }

    fn name(&self) -> String {
        format!(
            "triangular lattice {}x{}{}",
            self.rows,
            self.cols,
            if self.torus { " (torus)" } else { "" }
        )
    }
}

/// vertex `(r, c)` gets index `r * cols + c`; each offset is one undirected edge direction
fn lattice(
    rows: usize,
    cols: usize,
    offsets: &[(isize, isize)],
    torus: bool,
) -> Result<VectorGraph> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidParameter(format!(
            "lattice dimensions must be positive, got {}x{}",
            rows, cols
        )));
    }

    let mut graph = VectorGraph::empty(rows * cols, false);
    let (rows_i, cols_i) = (rows as isize, cols as isize);
    for r in 0..rows_i {
        for c in 0..cols_i {
            for &(dr, dc) in offsets {
                let (mut nr, mut nc) = (r + dr, c + dc);
                if torus {
                    nr = nr.rem_euclid(rows_i);
                    nc = nc.rem_euclid(cols_i);
                } else if nr < 0 || nr >= rows_i || nc < 0 || nc >= cols_i {
                    continue;
                }
                // small tori can wrap onto the same vertex or repeat an edge; add_edge skips both
                graph.add_edge((r * cols_i + c) as IndexT, (nr * cols_i + nc) as IndexT);
            }
        }
    }
    Ok(graph)
}

/// Maslov-Sneppen rewiring applied to every graph produced by `base`.
pub struct Rewired<G> {
    pub base: G,
    pub swaps: usize,
}

impl<G: GraphGenerator> GraphGenerator for Rewired<G> {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<VectorGraph> {
        let mut graph = self.base.generate(rng)?;
        rewire(&mut graph, self.swaps, rng);
        Ok(graph)
    }

    fn name(&self) -> String {
        format!("{} rewired with {} swaps", self.base.name(), self.swaps)
    }
}

/// Degree-preserving rewiring.
///
/// Repeatedly picks two edges `(a, b)` and `(c, d)` and replaces them with
/// `(a, d)` and `(c, b)`, rejecting swaps that would create a self-loop or a
/// duplicate edge. Undirected edges are picked with a random orientation.
/// Directed graphs keep every in- and out-degree.
///
/// Gives up after `10 * swaps` attempts; returns the number of swaps performed.
pub fn rewire(graph: &mut VectorGraph, swaps: usize, rng: &mut dyn RngCore) -> usize {
    let mut edges = graph.edges();
    if edges.len() < 2 {
        return 0;
    }

    let max_attempts = swaps.saturating_mul(MAX_ATTEMPTS_PER_SWAP);
    let mut done = 0;
    let mut attempts = 0;
    while done < swaps && attempts < max_attempts {
        attempts += 1;
        let i = rng.random_range(0..edges.len());
        let j = rng.random_range(0..edges.len());
        if i == j {
            continue;
        }

        let (a, b) = edges[i];
        let (mut c, mut d) = edges[j];
        if !graph.is_directed() && rng.random_bool(0.5) {
            std::mem::swap(&mut c, &mut d);
        }
        if a == d || c == b || graph.has_edge(a, d) || graph.has_edge(c, b) {
            continue;
        }

        graph.remove_edge(a, b);
        graph.remove_edge(c, d);
        graph.add_edge(a, d);
        graph.add_edge(c, b);
        edges[i] = (a, d);
        edges[j] = (c, b);
        done += 1;
    }

    if done < swaps {
        debug!(
            "rewiring stopped after {} attempts with {}/{} swaps",
            attempts, done, swaps
        );
    }
    done
}
