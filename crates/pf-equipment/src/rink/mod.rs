//! Indoor ice-rink radiant floor.
//!
//! A refrigeration loop circulates brine through tubes embedded in the
//! rink slab; the slab couples to the building heat balance through
//! CTF-derived coefficients. Each timestep the load solver derives the
//! refrigerant flow needed to pull the sheet toward its setpoint,
//! bounded by the freezing-capacity limit, and writes the delivered
//! extraction into the shared heat-source array.

pub mod coupling;
pub mod effectiveness;
mod load;
mod service;
pub mod spec;

pub use coupling::RawCoefficients;
pub use effectiveness::calc_effectiveness;
pub use spec::{ControlStrategy, RinkSpec};

use crate::common::MASS_FLOW_TOLERANCE;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{PlantComponent, SimOutcome, SimRequest};
use pf_core::{LoopId, NodeId, SurfaceId, TimeStep};
use pf_fluids::FluidProperties;
use serde::{Deserialize, Serialize};
use pf_plant::PlantModel;
use std::f64::consts::PI;

/// Brine temperature assumed before the loop has produced one (°C).
const INITIAL_BRINE_TEMP_C: f64 = -10.0;
/// Tube design velocity backing the registered design flow (m/s).
const DESIGN_TUBE_VELOCITY_M_S: f64 = 2.0;
/// Circulating flow assumed before the first resolution (kg/s).
const SEED_MASS_FLOW_KG_S: f64 = 0.01;

/// Node/loop/surface wiring resolved by the plant topology scan.
#[derive(Clone, Copy, Debug)]
pub struct RinkTopology {
    pub inlet: NodeId,
    pub outlet: NodeId,
    pub loop_id: LoopId,
    pub surface: SurfaceId,
}

/// State that persists across timesteps for one rink.
#[derive(Clone, Debug, Default)]
pub struct RinkState {
    pub past_refrig_mass_flow_kg_s: f64,
    pub refrig_temp_in_c: f64,
    pub cp_refrig_j_per_kg_k: f64,
    /// Maximum extraction rate (negative) from the freezing-capacity
    /// design load.
    pub q_src_max_w: f64,
    pub max_mass_flow_kg_s: f64,
    pub design_mass_flow_kg_s: f64,
    /// Scheduled setpoints resolved each call.
    pub ice_setpoint_c: f64,
    pub brine_setpoint_c: f64,
    /// Brine outlet consistent with the delivered source.
    pub refrig_out_check_c: f64,
    pub sized: bool,
    pub env_initialized: bool,
}

/// Output snapshot, overwritten every timestep.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RinkReport {
    pub refrig_inlet_temp_c: f64,
    pub refrig_outlet_temp_c: f64,
    pub refrig_mass_flow_kg_s: f64,
    pub req_mass_flow_kg_s: f64,
    pub ice_temperature_c: f64,
    pub source_temp_c: f64,
    pub effectiveness: f64,
    pub q_setpoint_w: f64,
    pub q_source_w: f64,
    pub q_src_max_w: f64,
    pub ck: f64,
    pub cl: f64,
    pub load_met_w: f64,
    pub cool_power_w: f64,
    pub cool_energy_j: f64,
    pub people_heat_gain_w: f64,
    pub resurfacing_load_j: f64,
    pub resurfacing_water_energy_j: f64,
}

pub struct IceRinkFloor {
    pub(crate) spec: RinkSpec,
    topo: RinkTopology,
    pub(crate) state: RinkState,
    /// Raw coefficient snapshot for the current timestep.
    coeffs: RawCoefficients,
    pub(crate) report: RinkReport,
}

impl IceRinkFloor {
    pub fn new(spec: RinkSpec, topo: RinkTopology) -> ComponentResult<Self> {
        let spec = spec.validated()?;
        Ok(Self {
            spec,
            topo,
            state: RinkState::default(),
            coeffs: RawCoefficients::default(),
            report: RinkReport::default(),
        })
    }

    pub fn spec(&self) -> &RinkSpec {
        &self.spec
    }

    pub fn state(&self) -> &RinkState {
        &self.state
    }

    pub fn last_report(&self) -> &RinkReport {
        &self.report
    }

    pub fn coefficients(&self) -> &RawCoefficients {
        &self.coeffs
    }

    /// Re-arm per-environment initialization.
    pub fn reset_environment(&mut self) {
        self.state.env_initialized = false;
    }
}

impl PlantComponent for IceRinkFloor {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn size(&mut self, plant: &PlantModel) -> ComponentResult<()> {
        use uom::si::length::meter;

        let fluid = plant.loops.get(self.topo.loop_id).fluid;
        let rho = fluid.density(INITIAL_BRINE_TEMP_C);
        let cp = fluid.specific_heat(INITIAL_BRINE_TEMP_C);
        let d = self.spec.tube_diameter.get::<meter>();

        self.state.design_mass_flow_kg_s =
            PI / 4.0 * d * d * DESIGN_TUBE_VELOCITY_M_S * rho;
        self.state.q_src_max_w = -self.freezing_load_w();
        self.state.cp_refrig_j_per_kg_k = cp;
        self.state.max_mass_flow_kg_s =
            self.state.q_src_max_w.abs() / (cp * self.spec.design_delta_temp_c);
        self.state.sized = true;
        Ok(())
    }

    fn initialize(&mut self, plant: &mut PlantModel) -> ComponentResult<()> {
        if !self.state.sized {
            self.size(plant)?;
        }
        if !self.state.env_initialized {
            for node in [self.topo.inlet, self.topo.outlet] {
                plant.nodes.get_mut(node).mass_flow_max_kg_s = self.state.max_mass_flow_kg_s;
            }
            self.state.past_refrig_mass_flow_kg_s = SEED_MASS_FLOW_KG_S;
            self.state.refrig_temp_in_c = INITIAL_BRINE_TEMP_C;
            self.state.env_initialized = true;
        }
        Ok(())
    }

    fn simulate(
        &mut self,
        request: &SimRequest,
        plant: &mut PlantModel,
    ) -> ComponentResult<SimOutcome> {
        if request.inlet_node != self.topo.inlet {
            return Err(ComponentError::MissingTopology {
                what: "illegal inlet node for the rink refrigerant loop",
            });
        }
        self.initialize(plant)?;
        self.calc_rink(request.run_flag, plant)
    }

    fn update(&mut self, plant: &mut PlantModel) -> ComponentResult<()> {
        let outlet_temp = if self.report.refrig_mass_flow_kg_s > MASS_FLOW_TOLERANCE {
            self.state.refrig_out_check_c
        } else {
            plant.nodes.get(self.topo.inlet).temp_c
        };
        plant.nodes.get_mut(self.topo.outlet).temp_c = outlet_temp;
        Ok(())
    }

    fn report(&mut self, dt: TimeStep, plant: &PlantModel) -> ComponentResult<()> {
        self.report.refrig_inlet_temp_c = plant.nodes.get(self.topo.inlet).temp_c;
        self.report.refrig_outlet_temp_c = plant.nodes.get(self.topo.outlet).temp_c;
        self.report.cool_power_w = self.report.load_met_w.abs() / self.spec.cop;
        self.report.cool_energy_j = dt.integrate(self.report.cool_power_w);
        Ok(())
    }
}
