//! Graph implementation and graph generators

pub mod generators;


mod graph_traits;
mod vector_graph;

pub use graph_traits::*;
pub use vector_graph::*;
