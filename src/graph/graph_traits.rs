//! Traits for graph interfaces

pub type IndexT = u32;

pub trait Graph {
    /// number of vertices
    fn n(&self) -> usize;

    /// the vertices whose colors influence `i`: in-neighbors on a directed
    /// graph, plain neighbors otherwise
    fn neighbors(&self, i: IndexT) -> &[IndexT];

    fn is_directed(&self) -> bool;
}

pub trait MutableGraph {
    /// adds the edge `from -> to` (or `from -- to` when undirected).
    ///
    /// returns false without changing anything for self-loops and edges that already exist
    fn add_edge(&mut self, from: IndexT, to: IndexT) -> bool;

    /// returns false if the edge was not present
    fn remove_edge(&mut self, from: IndexT, to: IndexT) -> bool;
}
