//! Rink service calculations: freezing-capacity design load, occupant
//! heat gain, and resurfacing loads.

use super::IceRinkFloor;
use pf_core::timestep::SECONDS_PER_HOUR;
use pf_fluids::{Fluid, FluidProperties, ice};
use pf_plant::PlantModel;

/// Litres per cubic metre.
const L_TO_M3: f64 = 0.001;

impl IceRinkFloor {
    /// Design freezing load: bring the flood water mass down through
    /// sensible, latent and ice sub-cooling to the ice setpoint over
    /// the configured freeze-down duration (W, positive).
    pub fn freezing_load_w(&self) -> f64 {
        let t_water = self.spec.flood_water_temp_c;
        let rho_water = Fluid::Water.density(t_water);
        let cp_water = Fluid::Water.specific_heat(t_water);
        let volume = self.spec.ice_volume_m3();

        rho_water
            * volume
            * (cp_water * t_water + ice::HEAT_OF_FUSION
                - ice::CP_FREEZING * self.spec.ice_setpoint_temp_c)
            / (self.spec.hours_to_freeze * SECONDS_PER_HOUR)
    }

    /// Schedule-driven occupant heat gain (W). Negative schedule values
    /// are input mistakes and are coerced with a warning.
    pub fn people_heat_gain_w(&mut self, plant: &PlantModel) -> f64 {
        let (Some(gain_sched), Some(people_sched)) = (
            self.spec.people_heat_gain_schedule,
            self.spec.people_schedule,
        ) else {
            self.report.people_heat_gain_w = 0.0;
            return 0.0;
        };

        let mut gain_per_person = plant
            .schedules
            .current_value(gain_sched, plant.hour_of_year);
        if gain_per_person < 0.0 {
            tracing::warn!(
                unit = %self.spec.name,
                "people heat gain schedule has a negative value; reset to zero"
            );
            gain_per_person = 0.0;
        }

        let mut people = plant
            .schedules
            .current_value(people_sched, plant.hour_of_year);
        if people < 0.0 {
            tracing::warn!(
                unit = %self.spec.name,
                "people schedule has a negative value; reset to maximum capacity"
            );
            people = self.spec.max_people;
        }

        let total = gain_per_person * people;
        self.report.people_heat_gain_w = total;
        total
    }

    /// Resurfacing loads for the configured daily events: the flood
    /// load the sheet must re-absorb and the tank reheat energy, both
    /// in joules.
    pub fn resurfacing_loads_j(&self, surface_temp_c: f64) -> (f64, f64) {
        let t_resurf = self.spec.resurfacing_water_temp_c;
        let rho_water = Fluid::Water.density(t_resurf);
        let cp_water = Fluid::Water.specific_heat(t_resurf);
        let tank_m3 = self.spec.resurfacing_tank_capacity_l * L_TO_M3;
        let events = self.spec.resurfacing_events_per_day;

        let flood_load = events
            * rho_water
            * tank_m3
            * (cp_water * t_resurf + ice::HEAT_OF_FUSION - ice::CP_FREEZING * surface_temp_c);
        let water_heating = events
            * tank_m3
            * rho_water
            * cp_water
            * (t_resurf - self.spec.initial_water_temp_c);
        (flood_load, water_heating)
    }
}
