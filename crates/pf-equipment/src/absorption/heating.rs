//! Heating Solver: hot-water side operating-point resolution.
//!
//! Mirrors the cooling state machine, keyed off the hot-water loop's
//! setpoint convention, with one extra degenerate state: under
//! `FlowLock::Overloaded` the network has throttled flow to a trickle
//! and delta-T is forced to zero below the mass-flow tolerance rather
//! than dividing by a near-zero flow.
//!
//! Available heating capacity cross-couples to the cooling side: the
//! heating capacity curve takes the current cooling load fraction,
//! reflecting the shared fuel train.

use super::AbsorptionChillerHeater;
use crate::common::MASS_FLOW_TOLERANCE;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::SimOutcome;
use pf_core::copy_sign;
use pf_fluids::FluidProperties;
use pf_plant::{FlowLock, PlantModel, set_component_flow_rate};

impl AbsorptionChillerHeater {
    /// Supply setpoint under the loop's demand scheme, falling back to
    /// the loop-wide setpoint node.
    fn heat_supply_setpoint(&self, plant: &PlantModel) -> ComponentResult<f64> {
        plant
            .heating_setpoint(self.topo.hw_loop, self.topo.heat_supply)
            .or_else(|| {
                let loop_node = plant.loops.get(self.topo.hw_loop).setpoint_node;
                plant.heating_setpoint(self.topo.hw_loop, loop_node)
            })
            .ok_or(ComponentError::MissingTopology {
                what: "no hot-water supply setpoint available",
            })
    }

    pub(super) fn calc_heating(
        &mut self,
        requested_load_w: f64,
        run_flag: bool,
        plant: &mut PlantModel,
    ) -> ComponentResult<SimOutcome> {
        // local copies of the configuration values this resolution reads
        let l_nom_cooling_cap = self.spec.nominal_cooling_capacity.value;
        let l_heat_cool_ratio = self.spec.heat_cool_ratio;
        let l_fuel_heat_ratio = self.spec.fuel_heat_ratio;
        let l_elec_heat_ratio = self.spec.elec_heat_ratio;
        let l_min_plr = self.spec.min_part_load_ratio;
        let l_max_plr = self.spec.max_part_load_ratio;

        // cooling-side results already reported this step
        let l_cool_fuel_rate = self.report.cool_fuel_rate_w;
        let l_cool_electric = self.report.cool_electric_w;
        let l_cool_plr = self.report.cool_part_load_ratio;
        let l_cooling_load = self.report.cooling_load_w;

        // entering conditions
        let l_hot_water_return_temp = plant.nodes.get(self.topo.heat_return).temp_c;
        let mut l_hot_water_mass_flow = plant.nodes.get(self.topo.heat_return).mass_flow_kg_s;

        let setpoint_c = self.heat_supply_setpoint(plant)?;
        let mut heat_delta_temp = (l_hot_water_return_temp - setpoint_c).abs();

        let hw_fluid = plant.loops.get(self.topo.hw_loop).fluid;
        let cp_hw = hw_fluid.specific_heat(l_hot_water_return_temp);

        let mut l_heating_load = 0.0;
        let mut l_heat_fuel_rate = 0.0;
        let mut l_heat_electric = 0.0;
        let mut l_hot_water_supply_temp = l_hot_water_return_temp;
        let mut l_heat_plr: f64 = 0.0;
        let mut l_available_heating_capacity = 0.0;
        let l_fraction_running;

        if requested_load_w <= 0.0 || !run_flag {
            // no loop demand or unit off
            heat_delta_temp = 0.0;
            l_fraction_running = (l_heat_plr.max(l_cool_plr) / l_min_plr).min(1.0);
        } else {
            // available heating capacity follows the current cooling
            // load fraction on the shared fuel train
            l_available_heating_capacity = l_heat_cool_ratio
                * l_nom_cooling_cap
                * plant.curves.value(
                    self.spec.heat_cap_fcool,
                    l_cooling_load / l_nom_cooling_cap,
                );

            let mut my_load = copy_sign(
                requested_load_w
                    .abs()
                    .max(l_available_heating_capacity * l_min_plr),
                requested_load_w,
            );
            my_load = copy_sign(
                my_load.abs().min(l_available_heating_capacity * l_max_plr),
                my_load,
            );

            let flow_lock = plant.loops.get(self.topo.hw_loop).flow_lock;

            match flow_lock {
                FlowLock::Unlocked => {
                    l_heating_load = my_load.abs();
                    if heat_delta_temp != 0.0 {
                        l_hot_water_mass_flow =
                            (l_heating_load / (cp_hw * heat_delta_temp)).abs();
                        l_hot_water_mass_flow = set_component_flow_rate(
                            &mut plant.nodes,
                            l_hot_water_mass_flow,
                            self.topo.heat_return,
                            self.topo.heat_supply,
                            flow_lock,
                        );
                    } else {
                        // loop already at the setpoint: nothing to move
                        l_hot_water_mass_flow = 0.0;
                        l_heating_load = 0.0;
                        self.state.delta_temp_heat_warnings.emit(
                            &self.spec.name,
                            "heating: delta-T = 0 in mass flow calculation",
                        );
                    }
                    l_hot_water_supply_temp = setpoint_c;
                }
                FlowLock::Locked => {
                    l_hot_water_supply_temp = setpoint_c;
                    l_heating_load =
                        (l_hot_water_mass_flow * cp_hw * heat_delta_temp).abs();
                }
                FlowLock::Overloaded => {
                    // the network throttled flow and the outlet drifts
                    // past the setpoint; avoid dividing by a trickle
                    if l_hot_water_mass_flow < MASS_FLOW_TOLERANCE {
                        heat_delta_temp = 0.0;
                    } else {
                        heat_delta_temp = my_load.abs() / (cp_hw * l_hot_water_mass_flow);
                    }
                    l_hot_water_supply_temp = l_hot_water_return_temp + heat_delta_temp;
                    l_heating_load =
                        (l_hot_water_mass_flow * cp_hw * heat_delta_temp).abs();
                }
            }

            l_heat_plr = if l_available_heating_capacity > 0.0 {
                l_heating_load / l_available_heating_capacity
            } else {
                0.0
            };

            // fuel for heating: availCap * HIR * HIR-FHPLR
            l_heat_fuel_rate = l_available_heating_capacity
                * l_fuel_heat_ratio
                * plant.curves.value(self.spec.fuel_heat_fhplr, l_heat_plr);

            l_fraction_running = (l_heat_plr.max(l_cool_plr) / l_min_plr).min(1.0);

            // heating parasitics scale off nominal heating capacity;
            // shared auxiliaries must not be double-counted against the
            // cooling side, so report the net only
            l_heat_electric =
                l_nom_cooling_cap * l_heat_cool_ratio * l_elec_heat_ratio * l_fraction_running;
            if l_heat_electric <= l_cool_electric {
                l_heat_electric = 0.0;
            } else {
                l_heat_electric -= l_cool_electric;
            }
        }

        // report snapshot; node commits wait for the update pass
        let r = &mut self.report;
        r.heating_load_w = l_heating_load;
        r.heat_fuel_rate_w = l_heat_fuel_rate;
        r.heat_electric_w = l_heat_electric;
        r.hot_return_temp_c = l_hot_water_return_temp;
        r.hot_supply_temp_c = l_hot_water_supply_temp;
        r.hot_water_flow_kg_s = l_hot_water_mass_flow;
        r.heat_part_load_ratio = l_heat_plr;
        r.heating_capacity_w = l_available_heating_capacity;
        r.fraction_of_period_running = l_fraction_running;
        r.fuel_rate_w = l_cool_fuel_rate + l_heat_fuel_rate;
        r.electric_w = l_cool_electric + l_heat_electric;

        Ok(SimOutcome {
            load_w: l_heating_load,
            mass_flow_kg_s: l_hot_water_mass_flow,
            outlet_temp_c: l_hot_water_supply_temp,
        })
    }
}
