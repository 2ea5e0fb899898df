//! Mutable per-unit operating state.

use crate::common::RecurringWarning;

/// State that persists across timesteps for one chiller-heater.
///
/// Replaces the module-level statics of array-indexed equipment models:
/// constructed once per unit, owned by the component, cleared only by
/// dropping the component between runs.
#[derive(Clone, Debug, Default)]
pub struct OperatingState {
    pub in_cooling_mode: bool,
    pub in_heating_mode: bool,
    /// Set when the unlocked-flow pass wanted more chilled-water flow
    /// than the design maximum; the locked pass then derives delta-T
    /// from load/flow instead of from the setpoint.
    pub possible_subcooling: bool,
    /// Previous call's condenser supply temperature estimate. Only
    /// consulted under the leaving-condenser convention, where it seeds
    /// the performance-curve lookups as an explicit one-step lag
    /// (a deliberate alternative to an inner iteration). `None` until
    /// first seeded as condenser return + 8 °C.
    pub last_cond_supply_temp_c: Option<f64>,
    pub sized: bool,
    pub env_initialized: bool,
    pub des_evap_mass_flow_kg_s: f64,
    pub des_cond_mass_flow_kg_s: f64,
    pub des_heat_mass_flow_kg_s: f64,
    /// Warn-once latches for supply setpoints filled from the loop.
    pub chill_setpoint_from_loop_warned: bool,
    pub heat_setpoint_from_loop_warned: bool,
    pub delta_temp_cool_warnings: RecurringWarning,
    pub delta_temp_heat_warnings: RecurringWarning,
    pub cond_estimate_warnings: RecurringWarning,
}

impl OperatingState {
    pub fn new() -> Self {
        Self::default()
    }
}
