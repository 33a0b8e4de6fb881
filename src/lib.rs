pub mod batch;
pub mod coloring;
pub mod error;
pub mod graph;
pub mod iterate;
pub mod rules;
pub mod util;

pub use error::{Error, Result};
