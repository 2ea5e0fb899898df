//! Common utilities for equipment calculations.

use crate::error::{ComponentError, ComponentResult};
use pf_core::ensure_finite;

/// Mass flow below this is treated as no flow (kg/s).
pub const MASS_FLOW_TOLERANCE: f64 = 1e-9;

/// Temperature differences below this are treated as zero (°C).
pub const DELTA_TEMP_TOLERANCE: f64 = 0.01;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Count-gated warning for conditions that recur every timestep.
///
/// A season of simulation revisits the same degraded branch thousands
/// of times; the first occurrence is logged, then every hundredth, and
/// the total count stays available for end-of-run summaries.
#[derive(Clone, Debug, Default)]
pub struct RecurringWarning {
    occurrences: u64,
}

impl RecurringWarning {
    const REPEAT_EVERY: u64 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence, emitting a `tracing` warning when due.
    pub fn emit(&mut self, unit: &str, message: &str) {
        self.occurrences += 1;
        if self.occurrences == 1 || self.occurrences % Self::REPEAT_EVERY == 0 {
            tracing::warn!(unit, occurrences = self.occurrences, "{message}");
        }
    }

    pub fn occurrences(&self) -> u64 {
        self.occurrences
    }
}
