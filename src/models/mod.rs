//! Core data models for the analytics engine.

pub mod coerce;

mod ids;
mod record;
mod session;
mod stats;

pub use ids::*;
pub use record::*;
pub use session::*;
pub use stats::*;
