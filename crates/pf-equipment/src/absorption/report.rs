//! Per-timestep report snapshot and the rate-to-energy pass.

use pf_core::TimeStep;
use serde::{Deserialize, Serialize};

/// Output snapshot for one chiller-heater, overwritten every timestep.
///
/// The calc passes write the rates, temperatures, flows and ratios; the
/// report pass integrates rates into energies and derives the fuel COP.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AbsorberReport {
    // cooling side
    pub cooling_load_w: f64,
    pub tower_load_w: f64,
    pub cool_fuel_rate_w: f64,
    pub cool_electric_w: f64,
    pub chill_return_temp_c: f64,
    pub chill_supply_temp_c: f64,
    pub chill_water_flow_kg_s: f64,
    pub cond_return_temp_c: f64,
    pub cond_supply_temp_c: f64,
    pub cond_water_flow_kg_s: f64,
    pub cool_part_load_ratio: f64,
    pub cooling_capacity_w: f64,

    // heating side
    pub heating_load_w: f64,
    pub heat_fuel_rate_w: f64,
    pub heat_electric_w: f64,
    pub hot_return_temp_c: f64,
    pub hot_supply_temp_c: f64,
    pub hot_water_flow_kg_s: f64,
    pub heat_part_load_ratio: f64,
    pub heating_capacity_w: f64,

    // combined
    pub fuel_rate_w: f64,
    pub electric_w: f64,
    pub fraction_of_period_running: f64,

    // integrated by the report pass
    pub cooling_energy_j: f64,
    pub heating_energy_j: f64,
    pub tower_energy_j: f64,
    pub fuel_energy_j: f64,
    pub cool_fuel_energy_j: f64,
    pub heat_fuel_energy_j: f64,
    pub electric_energy_j: f64,
    pub cool_electric_energy_j: f64,
    pub heat_electric_energy_j: f64,
    /// Cooling delivered per unit fuel input, zero-guarded.
    pub fuel_cop: f64,
}

impl AbsorberReport {
    /// Convert rates to energy over the timestep; cooling-side records.
    pub fn integrate_cooling(&mut self, dt: TimeStep) {
        self.cooling_energy_j = dt.integrate(self.cooling_load_w);
        self.tower_energy_j = dt.integrate(self.tower_load_w);
        self.fuel_energy_j = dt.integrate(self.fuel_rate_w);
        self.cool_fuel_energy_j = dt.integrate(self.cool_fuel_rate_w);
        self.electric_energy_j = dt.integrate(self.electric_w);
        self.cool_electric_energy_j = dt.integrate(self.cool_electric_w);
        self.fuel_cop = if self.cool_fuel_rate_w != 0.0 {
            self.cooling_load_w / self.cool_fuel_rate_w
        } else {
            0.0
        };
    }

    /// Convert rates to energy over the timestep; heating-side records.
    pub fn integrate_heating(&mut self, dt: TimeStep) {
        self.heating_energy_j = dt.integrate(self.heating_load_w);
        self.fuel_energy_j = dt.integrate(self.fuel_rate_w);
        self.heat_fuel_energy_j = dt.integrate(self.heat_fuel_rate_w);
        self.electric_energy_j = dt.integrate(self.electric_w);
        self.heat_electric_energy_j = dt.integrate(self.heat_electric_w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_round_trips_to_rate() {
        let mut report = AbsorberReport {
            cooling_load_w: 75_000.0,
            cool_fuel_rate_w: 80_000.0,
            ..AbsorberReport::default()
        };
        let dt = TimeStep::from_hours(0.25).unwrap();
        report.integrate_cooling(dt);
        assert_eq!(report.cooling_energy_j / dt.seconds(), 75_000.0);
    }

    #[test]
    fn fuel_cop_zero_guarded() {
        let mut report = AbsorberReport {
            cooling_load_w: 75_000.0,
            cool_fuel_rate_w: 0.0,
            ..AbsorberReport::default()
        };
        report.integrate_cooling(TimeStep::from_hours(1.0).unwrap());
        assert_eq!(report.fuel_cop, 0.0);
    }
}
