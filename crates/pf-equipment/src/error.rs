//! Error types for equipment calculations.

use pf_core::CoreError;
use pf_plant::PlantError;
use thiserror::Error;

/// Errors that can occur while configuring or simulating equipment.
///
/// The fatal classes (`MissingTopology`, `CondenserFlowZero`,
/// `InvalidControlStrategy`) terminate the run: continuing would
/// produce physically meaningless results. Everything degradable is
/// corrected in place by the solvers and logged at reduced frequency
/// instead of surfacing here.
#[derive(Error, Debug, Clone)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Node connections are not consistent with component topology: {what}")]
    MissingTopology { what: &'static str },

    #[error("Condenser flow is zero while \"{unit}\" must reject heat")]
    CondenserFlowZero { unit: String },

    #[error("Invalid control strategy configuration for \"{unit}\": {what}")]
    InvalidControlStrategy { unit: String, what: &'static str },

    #[error(transparent)]
    Plant(#[from] PlantError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::CondenserFlowZero {
            unit: "Big Chiller 1".into(),
        };
        assert!(err.to_string().contains("Big Chiller 1"));
    }

    #[test]
    fn plant_errors_convert() {
        let plant_err = PlantError::Invariant { what: "test" };
        let err: ComponentError = plant_err.into();
        assert!(matches!(err, ComponentError::Plant(_)));
    }
}
