use thiserror::Error;

pub type PlantResult<T> = Result<T, PlantError>;

#[derive(Error, Debug, Clone)]
pub enum PlantError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
