//! Error types for the sag-tension solver.

use ohl_core::OhlError;
use thiserror::Error;

/// Result type for sag-tension operations.
pub type TensionResult<T> = Result<T, TensionError>;

/// Errors raised by the sag-tension solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensionError {
    /// Conductor rejected at construction.
    #[error("Invalid conductor: {what}")]
    InvalidConductor { what: &'static str },

    /// Argument or configuration value outside its documented domain.
    #[error(transparent)]
    Domain(#[from] OhlError),

    /// The tension bisection exceeded the shared iteration cap.
    #[error("Convergence failed in {op} after {limit} iterations")]
    Convergence { op: &'static str, limit: usize },
}
