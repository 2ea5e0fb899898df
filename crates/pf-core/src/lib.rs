//! pf-core: stable foundation for plantflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for plant/model objects)
//! - timestep (system timestep + rate-to-energy integration)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timestep;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use timestep::TimeStep;
pub use units::*;
