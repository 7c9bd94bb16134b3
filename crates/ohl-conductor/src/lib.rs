//! ohl-conductor: value records describing bare overhead conductors.
//!
//! `Category` groups the material constants shared by a conductor family;
//! `Conductor` carries the per-cable geometry and ratings. Both are plain
//! immutable data: the solver crates validate the fields they need at
//! construction time.

pub mod category;
pub mod conductor;

pub use category::Category;
pub use conductor::{Conductor, ConductorBuilder};
