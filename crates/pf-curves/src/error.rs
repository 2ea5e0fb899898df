use thiserror::Error;

pub type CurveResult<T> = Result<T, CurveError>;

/// Errors raised while authoring curves.
///
/// Evaluation never fails: inputs clamp to the authored domain.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    #[error("Invalid curve definition: {what}")]
    InvalidDefinition { what: &'static str },
}
