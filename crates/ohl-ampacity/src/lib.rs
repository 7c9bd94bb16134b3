//! ohl-ampacity: steady-state heat balance between a conductor and its
//! environment.
//!
//! [`HeatBalance`] answers the three steady-state questions: the current
//! that holds a conductor at a given temperature, the temperature reached
//! under a given current, and the ambient temperature consistent with a
//! given operating point. The inverse directions are bracketed bisections
//! over the forward heat balance.

pub mod error;
pub mod steady;

pub use error::{AmpacityError, AmpacityResult};
pub use steady::{ConvectionModel, HeatBalance};
