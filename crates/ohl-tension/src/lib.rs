//! ohl-tension: sag-tension equation of state for bare conductors.
//!
//! [`SagTension`] anchors a conductor at a reference point (tension,
//! temperature, creep, ice, wind) and solves the equation of state for
//! the tension at any other temperature and loading, plus the closed-form
//! helpers that follow from it: catenary sag, oscillation period and the
//! per-unit-length ice/wind/transverse loads.

pub mod error;
pub mod tension;

pub use error::{TensionError, TensionResult};
pub use tension::SagTension;
