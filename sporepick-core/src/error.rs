//! Error types for sporepick

use thiserror::Error;

/// Main error type for sporepick operations
#[derive(Error, Debug)]
pub enum Error {
    /// A least-squares system fell short of the rank its formulation requires
    #[error("degenerate fit: {0}")]
    DegenerateFit(String),

    /// The corner-placement linear program has no feasible solution
    #[error("infeasible projection: {0}")]
    InfeasibleProjection(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for sporepick operations
pub type Result<T> = std::result::Result<T, Error>;
