//! Core data models for the rotation engine.

mod draft;
mod ids;
mod policy;
mod report;
mod stats;
mod week;

pub use draft::*;
pub use ids::*;
pub use policy::*;
pub use report::*;
pub use stats::*;
pub use week::*;
