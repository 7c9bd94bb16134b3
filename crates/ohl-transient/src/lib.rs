//! ohl-transient: conductor temperature response to current steps.
//!
//! [`Transient`] integrates the steady-state heat balance through explicit
//! time steps to produce a [`TempProfile`], and wraps that simulation in
//! bracketed bisections to answer the two inverse questions: which initial
//! current, or which final current, explains a temperature reached after a
//! given lapse.

pub mod error;
pub mod profile;
pub mod transient;

pub use error::{TransientError, TransientResult};
pub use profile::{Sample, TempProfile};
pub use transient::Transient;
