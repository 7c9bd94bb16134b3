//! Error types for the steady-state solver.

use ohl_core::OhlError;
use thiserror::Error;

/// Result type for ampacity operations.
pub type AmpacityResult<T> = Result<T, AmpacityError>;

/// Errors raised by the steady-state solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmpacityError {
    /// Conductor rejected at construction.
    #[error("Invalid conductor: {what}")]
    InvalidConductor { what: &'static str },

    /// Argument or configuration value outside its documented domain.
    #[error(transparent)]
    Domain(#[from] OhlError),

    /// A bisection exceeded the shared iteration cap.
    #[error("Convergence failed in {op} after {limit} iterations")]
    Convergence { op: &'static str, limit: usize },
}
