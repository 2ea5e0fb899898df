//! System timestep and rate-to-energy integration.

use crate::error::{CoreError, CoreResult};
use crate::units::Time;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Duration of one system timestep.
///
/// Validated positive and finite at construction; the report passes use
/// it to convert instantaneous rates into accumulated energies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeStep {
    seconds: f64,
}

impl TimeStep {
    pub fn from_seconds(seconds: f64) -> CoreResult<Self> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "timestep must be positive and finite",
            });
        }
        Ok(Self { seconds })
    }

    pub fn from_hours(hours: f64) -> CoreResult<Self> {
        Self::from_seconds(hours * SECONDS_PER_HOUR)
    }

    pub fn from_time(t: Time) -> CoreResult<Self> {
        Self::from_seconds(t.value)
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn hours(&self) -> f64 {
        self.seconds / SECONDS_PER_HOUR
    }

    /// Convert an instantaneous rate (W) into energy over this step (J).
    pub fn integrate(&self, rate_w: f64) -> f64 {
        rate_w * self.seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_non_positive() {
        assert!(TimeStep::from_seconds(0.0).is_err());
        assert!(TimeStep::from_seconds(-60.0).is_err());
        assert!(TimeStep::from_seconds(f64::NAN).is_err());
    }

    #[test]
    fn hours_round_trip() {
        let dt = TimeStep::from_hours(0.25).unwrap();
        assert_eq!(dt.seconds(), 900.0);
        assert_eq!(dt.hours(), 0.25);
    }

    proptest! {
        // Integrating a rate then dividing by the same duration must
        // recover the rate.
        #[test]
        fn integrate_round_trip(rate in -1e7_f64..1e7, secs in 1.0_f64..7200.0) {
            let dt = TimeStep::from_seconds(secs).unwrap();
            let energy = dt.integrate(rate);
            prop_assert!((energy / dt.seconds() - rate).abs() <= 1e-6 * rate.abs().max(1.0));
        }
    }
}
