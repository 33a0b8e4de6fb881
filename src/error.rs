//! Error types for graph dynamics simulations.

use thiserror::Error;

/// Result type for graph dynamics operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a rule, generator, or coloring violates its contract.
///
/// Both kinds are detected before any vertex is processed, so a failed call
/// never leaves partial output behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A palette has the wrong size or a threshold/probability is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A coloring does not cover exactly the vertices of its graph, or a
    /// coloring generator was given inconsistent input.
    #[error("invalid coloring: {0}")]
    InvalidColoring(String),
}
