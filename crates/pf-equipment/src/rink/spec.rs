//! Immutable configuration of one indoor ice-rink radiant floor.

use crate::error::{ComponentError, ComponentResult};
use pf_core::{Length, ScheduleId};

/// How the refrigeration loop is controlled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlStrategy {
    /// Drive the ice surface toward a scheduled setpoint.
    SurfaceTemp,
    /// Drive the brine outlet toward a scheduled setpoint.
    BrineOutletTemp,
}

/// Configuration read once at input time; read-only afterwards.
#[derive(Clone, Debug)]
pub struct RinkSpec {
    pub name: String,
    pub tube_diameter: Length,
    pub tube_length: Length,
    pub control: ControlStrategy,
    /// Design freeze-down duration for the flood water (h).
    pub hours_to_freeze: f64,
    /// Design refrigerant temperature rise backing the maximum-flow
    /// limit (°C).
    pub design_delta_temp_c: f64,
    pub rink_length: Length,
    pub rink_width: Length,
    pub ice_thickness: Length,
    /// Fallback ice setpoint when no schedule value is available (°C).
    pub ice_setpoint_temp_c: f64,
    /// Flood water temperature for the freezing-capacity design load (°C).
    pub flood_water_temp_c: f64,
    /// Number of steps the freeze-down is spread over.
    pub freeze_increments: f64,
    /// Refrigeration plant COP for electric reporting.
    pub cop: f64,
    pub operation_schedule: ScheduleId,
    /// Required under `SurfaceTemp` control.
    pub ice_setpoint_schedule: Option<ScheduleId>,
    /// Required under `BrineOutletTemp` control.
    pub brine_setpoint_schedule: Option<ScheduleId>,

    // occupant gains
    pub people_schedule: Option<ScheduleId>,
    pub people_heat_gain_schedule: Option<ScheduleId>,
    pub max_people: f64,

    // resurfacing
    pub resurfacing_tank_capacity_l: f64,
    pub resurfacing_water_temp_c: f64,
    pub initial_water_temp_c: f64,
    pub resurfacing_events_per_day: f64,
}

impl RinkSpec {
    /// Validate geometry and apply the input coercions a configuration
    /// front end would.
    pub fn validated(mut self) -> ComponentResult<Self> {
        if self.tube_diameter.value <= 0.0 || self.tube_length.value <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "tube geometry must be positive",
            });
        }
        if self.rink_length.value <= 0.0 || self.rink_width.value <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "rink dimensions must be positive",
            });
        }
        if self.hours_to_freeze <= 0.0 || self.freeze_increments <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "freeze-down durations must be positive",
            });
        }
        if self.design_delta_temp_c <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "design delta-T must be positive",
            });
        }
        if self.cop <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "refrigeration COP must be positive",
            });
        }
        if self.ice_thickness.value <= 0.0 {
            tracing::warn!(
                unit = %self.name,
                "ice thickness must be positive; resetting to 0.0254 m, \
                 simulation continues"
            );
            self.ice_thickness = pf_core::m(0.0254);
        }
        if self.ice_setpoint_temp_c >= 0.0 {
            tracing::warn!(
                unit = %self.name,
                "ice setpoint must be below freezing; resetting to -3 C, \
                 simulation continues"
            );
            self.ice_setpoint_temp_c = -3.0;
        }
        Ok(self)
    }

    /// Ice sheet volume (m³).
    pub fn ice_volume_m3(&self) -> f64 {
        self.rink_length.value * self.rink_width.value * self.ice_thickness.value
    }

    /// Sheet area (m²).
    pub fn surface_area_m2(&self) -> f64 {
        self.rink_length.value * self.rink_width.value
    }
}

/// Baseline spec for unit tests across the rink modules.
#[cfg(test)]
pub(crate) fn test_spec() -> RinkSpec {
    use pf_core::{Id, m};
    RinkSpec {
        name: "rink-1".into(),
        tube_diameter: m(0.025),
        tube_length: m(100.0),
        control: ControlStrategy::SurfaceTemp,
        hours_to_freeze: 24.0,
        design_delta_temp_c: 5.0,
        rink_length: m(60.0),
        rink_width: m(26.0),
        ice_thickness: m(0.0254),
        ice_setpoint_temp_c: -3.0,
        flood_water_temp_c: 15.0,
        freeze_increments: 6.0,
        cop: 2.5,
        operation_schedule: Id::from_index(0),
        ice_setpoint_schedule: Some(Id::from_index(1)),
        brine_setpoint_schedule: None,
        people_schedule: None,
        people_heat_gain_schedule: None,
        max_people: 100.0,
        resurfacing_tank_capacity_l: 3000.0,
        resurfacing_water_temp_c: 60.0,
        initial_water_temp_c: 12.0,
        resurfacing_events_per_day: 1.0,
    }
}
