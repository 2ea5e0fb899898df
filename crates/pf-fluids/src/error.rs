use thiserror::Error;

pub type FluidResult<T> = Result<T, FluidError>;

/// Errors raised while *constructing* fluid property data.
///
/// Evaluation itself is infallible: out-of-range temperatures clamp to
/// the table ends instead of extrapolating or failing.
#[derive(Error, Debug, Clone)]
pub enum FluidError {
    #[error("Non-physical property data: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid property table: {what}")]
    InvalidTable { what: &'static str },
}
