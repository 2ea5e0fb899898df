//! Load Solver: per-timestep rink resolution.
//!
//! Branches on where the slab surface sits relative to the scheduled
//! ice setpoint:
//!
//! - at/below setpoint: nothing to extract, zero source, zero flow;
//! - above 0 °C: the sheet is still liquid, the target rate comes from
//!   the latent-plus-sensible balance over the rink water mass, spread
//!   over the configured freeze-down increments;
//! - between 0 °C and the setpoint: ice-phase sensible-only balance.
//!
//! The required refrigerant flow follows from the target rate and the
//! surface-to-inlet temperature difference, capped by the
//! freezing-capacity maximum; the delivered source is the target scaled
//! by the exchanger effectiveness and floored at the physical
//! extraction ceiling. The source feeds the shared heat-balance array
//! and both surface passes re-run synchronously so the slab temperature
//! this call reports is consistent with the source it wrote.

use super::{IceRinkFloor, coupling::RawCoefficients, effectiveness::calc_effectiveness};
use crate::common::MASS_FLOW_TOLERANCE;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::SimOutcome;
use pf_core::timestep::SECONDS_PER_HOUR;
use pf_fluids::{Fluid, FluidProperties, ice};
use pf_plant::{PlantModel, set_component_flow_rate};
use super::spec::ControlStrategy;

impl IceRinkFloor {
    /// Resolve the scheduled setpoint the active control strategy
    /// works against; a missing schedule is a configuration failure.
    fn resolve_setpoints(&mut self, plant: &PlantModel) -> ComponentResult<()> {
        match self.spec.control {
            ControlStrategy::SurfaceTemp => {
                let sched = self.spec.ice_setpoint_schedule.ok_or_else(|| {
                    ComponentError::InvalidControlStrategy {
                        unit: self.spec.name.clone(),
                        what: "surface temperature control requires an ice setpoint schedule",
                    }
                })?;
                self.state.ice_setpoint_c =
                    plant.schedules.current_value(sched, plant.hour_of_year);
            }
            ControlStrategy::BrineOutletTemp => {
                let sched = self.spec.brine_setpoint_schedule.ok_or_else(|| {
                    ComponentError::InvalidControlStrategy {
                        unit: self.spec.name.clone(),
                        what: "brine outlet control requires a brine setpoint schedule",
                    }
                })?;
                self.state.brine_setpoint_c =
                    plant.schedules.current_value(sched, plant.hour_of_year);
                // the load solve itself is surface-driven either way
                self.state.ice_setpoint_c = self.spec.ice_setpoint_temp_c;
            }
        }
        Ok(())
    }

    pub(super) fn calc_rink(
        &mut self,
        run_flag: bool,
        plant: &mut PlantModel,
    ) -> ComponentResult<SimOutcome> {
        let operation = plant
            .schedules
            .current_value(self.spec.operation_schedule, plant.hour_of_year);
        self.resolve_setpoints(plant)?;

        let surface = self.topo.surface;
        let t_surface = plant.heat_balance.surface(surface).inside_temp_c;
        let t_in = plant.nodes.get(self.topo.inlet).temp_c;
        self.state.refrig_temp_in_c = t_in;

        // raw coefficients hold for the timestep; the composite pair is
        // re-derived every call
        self.coeffs = RawCoefficients::fetch(&plant.heat_balance, surface);
        let (ck, cl) = self.coeffs.composites()?;

        let fluid = plant.loops.get(self.topo.loop_id).fluid;
        let cp_refrig = fluid.specific_heat(t_in);
        self.state.cp_refrig_j_per_kg_k = cp_refrig;

        let tube_d = self.spec.tube_diameter.value;
        let tube_l = self.spec.tube_length.value;
        let volume = self.spec.ice_volume_m3();
        let ice_setpoint = self.state.ice_setpoint_c;

        let mut q_source_w = 0.0;
        let mut q_setpoint_w = 0.0;
        let mut req_mass_flow = 0.0;
        let mass_flow;
        let mut eff = 0.0;

        if operation > 0.0 && run_flag && t_surface > ice_setpoint {
            // target extraction rate from the phase-appropriate balance
            q_setpoint_w = if t_surface >= 0.0 {
                let rho_water = Fluid::Water.density(t_surface);
                let cp_water = Fluid::Water.specific_heat(t_surface);
                rho_water
                    * volume
                    * (cp_water * t_surface + ice::HEAT_OF_FUSION - ice::CP * ice_setpoint)
                    / (self.spec.freeze_increments * SECONDS_PER_HOUR)
            } else {
                ice::DENSITY * volume * ice::CP * (t_surface - ice_setpoint)
                    / (self.spec.freeze_increments * SECONDS_PER_HOUR)
            };

            // required flow; the surface-to-inlet singularity saturates
            // at the freezing-capacity maximum
            req_mass_flow = (q_setpoint_w / (cp_refrig * (t_surface - t_in))).abs();
            if !req_mass_flow.is_finite() || req_mass_flow > self.state.max_mass_flow_kg_s {
                req_mass_flow = self.state.max_mass_flow_kg_s;
            }

            let lock = plant.loops.get(self.topo.loop_id).flow_lock;
            mass_flow = set_component_flow_rate(
                &mut plant.nodes,
                req_mass_flow,
                self.topo.inlet,
                self.topo.outlet,
                lock,
            );
            self.state.past_refrig_mass_flow_kg_s = mass_flow;

            eff = calc_effectiveness(&fluid, t_in, mass_flow, tube_d, tube_l);

            // delivered source, floored at the physical extraction
            // ceiling (q_src_max is negative)
            q_source_w = -(eff * q_setpoint_w);
            let floor = eff * self.state.q_src_max_w;
            if q_source_w < floor {
                q_source_w = floor;
            }
        } else {
            // schedule off, unit off, or sheet already at setpoint
            let lock = plant.loops.get(self.topo.loop_id).flow_lock;
            mass_flow = set_component_flow_rate(
                &mut plant.nodes,
                0.0,
                self.topo.inlet,
                self.topo.outlet,
                lock,
            );
            self.state.past_refrig_mass_flow_kg_s = mass_flow;
        }

        // write the shared source term, then re-run both surface passes
        // so the slab temperature is consistent within this call
        plant.heat_balance.set_source(surface, q_source_w);
        plant.heat_balance.recompute_outside_surface(surface)?;
        plant.heat_balance.recompute_inside_surface(surface)?;

        if mass_flow > MASS_FLOW_TOLERANCE {
            self.state.refrig_out_check_c =
                t_in - q_source_w / (mass_flow * cp_refrig);
        } else {
            self.state.refrig_out_check_c = t_in;
        }

        let load_met_w = plant.heat_balance.source(surface);

        // occupant gain and resurfacing ride along for reporting
        self.people_heat_gain_w(plant);
        if self.spec.resurfacing_events_per_day > 0.0 {
            let t_sheet = plant.heat_balance.surface(surface).inside_temp_c;
            let (flood_j, water_j) = self.resurfacing_loads_j(t_sheet);
            self.report.resurfacing_load_j = flood_j;
            self.report.resurfacing_water_energy_j = water_j;
        }

        let r = &mut self.report;
        r.refrig_inlet_temp_c = t_in;
        r.refrig_outlet_temp_c = self.state.refrig_out_check_c;
        r.refrig_mass_flow_kg_s = mass_flow;
        r.req_mass_flow_kg_s = req_mass_flow;
        r.ice_temperature_c = plant.heat_balance.surface(surface).inside_temp_c;
        r.source_temp_c = plant.heat_balance.surface(surface).source_temp_c;
        r.effectiveness = eff;
        r.q_setpoint_w = q_setpoint_w;
        r.q_source_w = q_source_w;
        r.q_src_max_w = self.state.q_src_max_w;
        r.ck = ck;
        r.cl = cl;
        r.load_met_w = load_met_w;

        Ok(SimOutcome {
            load_w: load_met_w,
            mass_flow_kg_s: mass_flow,
            outlet_temp_c: self.state.refrig_out_check_c,
        })
    }
}
