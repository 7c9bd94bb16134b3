//! Error types for the transient solver.

use ohl_ampacity::AmpacityError;
use ohl_core::OhlError;
use thiserror::Error;

/// Result type for transient operations.
pub type TransientResult<T> = Result<T, TransientError>;

/// Errors raised by the transient solver and its profiles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransientError {
    /// Conductor rejected at construction.
    #[error("Invalid conductor: {what}")]
    InvalidConductor { what: &'static str },

    /// Argument or configuration value outside its documented domain.
    #[error(transparent)]
    Domain(#[from] OhlError),

    /// The underlying steady-state solver rejected a query.
    #[error("Steady-state error: {0}")]
    Steady(#[from] AmpacityError),

    /// A bisection exceeded the shared iteration cap.
    #[error("Convergence failed in {op} after {limit} iterations")]
    Convergence { op: &'static str, limit: usize },
}
