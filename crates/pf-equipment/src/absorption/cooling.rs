//! Cooling Solver: chilled-water side operating-point resolution.
//!
//! One resolution per call, as a state machine over the chilled-water
//! loop's flow lock:
//!
//! - idle: no demand (or unit off), outlet follows inlet, condenser
//!   flow released;
//! - unlocked: the solver derives its own flow from the setpoint
//!   delta-T;
//! - locked/overloaded: the network owns the flow and the solver
//!   re-derives delta-T and load, clamping the outlet against the
//!   chiller low limit and the node minimum, then the load against the
//!   request — re-deriving dependents after every clamp so
//!   load = flow·Cp·ΔT closes exactly.

use super::{AbsorptionChillerHeater, condenser};
use crate::common::{DELTA_TEMP_TOLERANCE, MASS_FLOW_TOLERANCE};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::SimOutcome;
use pf_core::{clamp, copy_sign};
use pf_fluids::FluidProperties;
use pf_plant::{FlowLock, PlantModel, set_component_flow_rate};

impl AbsorptionChillerHeater {
    /// Supply setpoint under the loop's demand scheme, falling back to
    /// the loop-wide setpoint node.
    fn chill_supply_setpoint(&self, plant: &PlantModel) -> ComponentResult<f64> {
        plant
            .cooling_setpoint(self.topo.chw_loop, self.topo.chill_supply)
            .or_else(|| {
                let loop_node = plant.loops.get(self.topo.chw_loop).setpoint_node;
                plant.cooling_setpoint(self.topo.chw_loop, loop_node)
            })
            .ok_or(ComponentError::MissingTopology {
                what: "no chilled-water supply setpoint available",
            })
    }

    pub(super) fn calc_cooling(
        &mut self,
        requested_load_w: f64,
        plant: &mut PlantModel,
    ) -> ComponentResult<SimOutcome> {
        // local copies of the configuration values this resolution reads
        let l_nom_cooling_cap = self.spec.nominal_cooling_capacity.value;
        let l_fuel_cool_ratio = self.spec.fuel_cool_ratio;
        let l_fuel_heat_ratio = self.spec.fuel_heat_ratio;
        let l_elec_cool_ratio = self.spec.elec_cool_ratio;
        let l_min_plr = self.spec.min_part_load_ratio;
        let l_max_plr = self.spec.max_part_load_ratio;
        let l_chw_low_limit = self.spec.chw_low_limit_temp_c;

        // heating-side results already reported this step; the shared
        // fuel train combines at the end
        let l_heat_fuel_rate = self.report.heat_fuel_rate_w;
        let l_heat_electric = self.report.heat_electric_w;
        let l_heat_plr = self.report.heat_part_load_ratio;

        // entering conditions
        let l_chill_return_temp = plant.nodes.get(self.topo.chill_return).temp_c;
        let mut l_chill_water_mass_flow =
            plant.nodes.get(self.topo.chill_return).mass_flow_kg_s;
        let mut l_cond_return_temp = plant.nodes.get(self.topo.cond_return).temp_c;
        let mut l_cond_water_mass_flow;

        let setpoint_c = self.chill_supply_setpoint(plant)?;
        let mut chill_delta_temp = (l_chill_return_temp - setpoint_c).abs();

        let chw_fluid = plant.loops.get(self.topo.chw_loop).fluid;
        let cp_cw = chw_fluid.specific_heat(l_chill_return_temp);
        let cp_cd = self
            .topo
            .cond_loop
            .map(|id| plant.loops.get(id).fluid.specific_heat(l_cond_return_temp))
            .unwrap_or(0.0);

        let mut l_cooling_load = 0.0;
        let mut l_tower_load = 0.0;
        let mut l_cool_fuel_rate = 0.0;
        let mut l_cool_electric = 0.0;
        let mut l_chill_supply_temp = l_chill_return_temp;
        let mut l_cond_supply_temp = l_cond_return_temp;
        let mut l_cool_plr = 0.0;
        let mut l_available_cooling_capacity = 0.0;
        let l_fraction_running;

        let idle =
            requested_load_w >= 0.0 || !(self.state.in_heating_mode || self.state.in_cooling_mode);
        if idle {
            // no loop demand or unit off: pass chilled water through and
            // release the condenser
            let cond_lock = self
                .topo
                .cond_loop
                .map(|id| plant.loops.get(id).flow_lock)
                .unwrap_or_default();
            l_cond_water_mass_flow = 0.0;
            if self.spec.condenser == super::CondenserKind::WaterCooled {
                l_cond_water_mass_flow = set_component_flow_rate(
                    &mut plant.nodes,
                    0.0,
                    self.topo.cond_return,
                    self.topo.cond_supply,
                    cond_lock,
                );
            }
            chill_delta_temp = 0.0;
            l_fraction_running = (l_heat_plr.max(l_cool_plr) / l_min_plr).min(1.0);
        } else {
            let cond = condenser::prepare(&self.spec, &mut self.state, &self.topo, plant);
            l_cond_return_temp = cond.return_temp_c;
            l_cond_water_mass_flow = cond.mass_flow_kg_s;

            // available capacity at the setpoint and the condenser
            // temperature the curves are authored against
            l_available_cooling_capacity = l_nom_cooling_cap
                * plant
                    .curves
                    .value2(self.spec.cool_cap_ft, setpoint_c, cond.calc_temp_c);

            let requested_magnitude = requested_load_w.abs();
            let mut my_load = copy_sign(
                requested_magnitude.max(l_available_cooling_capacity * l_min_plr),
                requested_load_w,
            );
            my_load = copy_sign(
                my_load.abs().min(l_available_cooling_capacity * l_max_plr),
                my_load,
            );

            let flow_lock = plant.loops.get(self.topo.chw_loop).flow_lock;
            let l_max_evap_flow = self.state.des_evap_mass_flow_kg_s;

            match flow_lock {
                FlowLock::Unlocked => {
                    self.state.possible_subcooling = false;
                    l_cooling_load = my_load.abs();
                    if chill_delta_temp != 0.0 {
                        l_chill_water_mass_flow =
                            (l_cooling_load / (cp_cw * chill_delta_temp)).abs();
                        if l_chill_water_mass_flow - l_max_evap_flow > MASS_FLOW_TOLERANCE {
                            self.state.possible_subcooling = true;
                        }
                        l_chill_water_mass_flow = set_component_flow_rate(
                            &mut plant.nodes,
                            l_chill_water_mass_flow,
                            self.topo.chill_return,
                            self.topo.chill_supply,
                            flow_lock,
                        );
                    } else {
                        // loop already at the setpoint: nothing to move
                        l_chill_water_mass_flow = 0.0;
                        l_cooling_load = 0.0;
                        self.state.delta_temp_cool_warnings.emit(
                            &self.spec.name,
                            "cooling: delta-T = 0 in mass flow calculation",
                        );
                    }
                    l_chill_supply_temp = setpoint_c;
                }
                FlowLock::Locked | FlowLock::Overloaded => {
                    l_chill_water_mass_flow =
                        plant.nodes.get(self.topo.chill_return).mass_flow_kg_s;
                    if self.state.possible_subcooling {
                        // the unlocked pass wanted more than design flow:
                        // hold the load and let the outlet drift
                        l_cooling_load = my_load.abs();
                        if l_chill_water_mass_flow > MASS_FLOW_TOLERANCE {
                            chill_delta_temp =
                                l_cooling_load / (l_chill_water_mass_flow * cp_cw);
                        } else {
                            chill_delta_temp = 0.0;
                            l_cooling_load = 0.0;
                        }
                        l_chill_supply_temp = l_chill_return_temp - chill_delta_temp;
                    } else {
                        chill_delta_temp = l_chill_return_temp - setpoint_c;
                        l_cooling_load =
                            (l_chill_water_mass_flow * cp_cw * chill_delta_temp).abs();
                        l_chill_supply_temp = setpoint_c;
                    }

                    // outlet must honor both the chiller low limit and
                    // the node minimum; each clamp re-derives the load
                    let node_temp_min = plant.nodes.get(self.topo.chill_supply).temp_min_c;
                    for floor_c in [l_chw_low_limit, node_temp_min] {
                        if l_chill_supply_temp < floor_c {
                            if (l_chill_return_temp - floor_c) > DELTA_TEMP_TOLERANCE {
                                l_chill_supply_temp = floor_c;
                            } else {
                                l_chill_supply_temp = l_chill_return_temp;
                            }
                            chill_delta_temp = l_chill_return_temp - l_chill_supply_temp;
                            l_cooling_load = l_chill_water_mass_flow * cp_cw * chill_delta_temp;
                        }
                    }

                    // never deliver more than the machine was asked for
                    if l_cooling_load > my_load.abs() {
                        if l_chill_water_mass_flow > MASS_FLOW_TOLERANCE {
                            l_cooling_load = my_load.abs();
                            chill_delta_temp =
                                l_cooling_load / (l_chill_water_mass_flow * cp_cw);
                            l_chill_supply_temp = l_chill_return_temp - chill_delta_temp;
                        } else {
                            l_chill_supply_temp = l_chill_return_temp;
                            chill_delta_temp = 0.0;
                            l_cooling_load = 0.0;
                        }
                    }
                }
            }

            // part-load ratio: clamped into the operating band, except
            // below the cycling floor the true ratio is reported
            if l_available_cooling_capacity > 0.0 {
                let true_ratio = requested_magnitude / l_available_cooling_capacity;
                l_cool_plr = if true_ratio < l_min_plr {
                    true_ratio
                } else {
                    clamp(
                        my_load.abs() / l_available_cooling_capacity,
                        l_min_plr,
                        l_max_plr,
                    )
                };
            }

            // fraction of the period running: maximum over both services
            l_fraction_running = if l_cool_plr < l_min_plr || l_heat_plr < l_min_plr {
                (l_heat_plr.max(l_cool_plr) / l_min_plr).min(1.0)
            } else {
                1.0
            };

            // fuel for cooling: availCap * HIR * HIR-FT * HIR-FPLR
            l_cool_fuel_rate = l_available_cooling_capacity
                * l_fuel_cool_ratio
                * plant
                    .curves
                    .value2(self.spec.fuel_cool_ft, l_chill_supply_temp, cond.calc_temp_c)
                * plant.curves.value(self.spec.fuel_cool_fplr, l_cool_plr)
                * l_fraction_running;

            // electric parasitics scale off nominal, not available, capacity
            l_cool_electric = l_nom_cooling_cap
                * l_elec_cool_ratio
                * l_fraction_running
                * plant
                    .curves
                    .value2(self.spec.elec_cool_ft, l_chill_supply_temp, cond.calc_temp_c)
                * plant.curves.value(self.spec.elec_cool_fplr, l_cool_plr);

            // condenser load: cooling load + burner heat input + parasitics
            l_tower_load =
                l_cooling_load + l_cool_fuel_rate / l_fuel_heat_ratio + l_cool_electric;

            l_cond_supply_temp =
                condenser::reject(&self.spec.name, &self.spec, &cond, l_tower_load, cp_cd)?;

            // remember the supply estimate for the next call, then grade
            // it against the capacity actually used upstream
            self.state.last_cond_supply_temp_c = Some(l_cond_supply_temp);
            condenser::check_capacity_estimate(
                &self.spec.name,
                &self.spec,
                &plant.curves,
                setpoint_c,
                l_cond_supply_temp,
                l_available_cooling_capacity,
                &mut self.state.cond_estimate_warnings,
            );
        }

        // report snapshot; node commits wait for the update pass
        let r = &mut self.report;
        r.cooling_load_w = l_cooling_load;
        r.tower_load_w = l_tower_load;
        r.cool_fuel_rate_w = l_cool_fuel_rate;
        r.cool_electric_w = l_cool_electric;
        r.chill_return_temp_c = l_chill_return_temp;
        r.chill_supply_temp_c = l_chill_supply_temp;
        r.chill_water_flow_kg_s = l_chill_water_mass_flow;
        r.cond_return_temp_c = l_cond_return_temp;
        r.cond_supply_temp_c = l_cond_supply_temp;
        r.cond_water_flow_kg_s = l_cond_water_mass_flow;
        r.cool_part_load_ratio = l_cool_plr;
        r.cooling_capacity_w = l_available_cooling_capacity;
        r.fraction_of_period_running = l_fraction_running;
        r.fuel_rate_w = l_cool_fuel_rate + l_heat_fuel_rate;
        r.electric_w = l_cool_electric + l_heat_electric;

        Ok(SimOutcome {
            load_w: -l_cooling_load,
            mass_flow_kg_s: l_chill_water_mass_flow,
            outlet_temp_c: l_chill_supply_temp,
        })
    }
}
