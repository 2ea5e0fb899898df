//! pf-curves: performance-curve evaluation for plant equipment.
//!
//! Equipment capacity and input-ratio corrections are expressed as
//! polynomial curves of one or two independent variables. Curves carry
//! authored bounds on their inputs — evaluation clamps into that domain
//! rather than extrapolating — and optionally on their output.
//!
//! Curves live in a [`CurveBank`]; handles are [`CurveId`]s minted by
//! the bank, so a handle that reaches an evaluation site is always
//! valid and evaluation is infallible.

pub mod bank;
pub mod curve;
pub mod error;

pub use bank::CurveBank;
pub use curve::{Curve, CurveForm};
pub use error::{CurveError, CurveResult};
pub use pf_core::CurveId;
