//! The component seam the outer loop driver calls through.

use crate::error::ComponentResult;
use pf_core::{NodeId, TimeStep};
use pf_plant::PlantModel;

/// One simulate call from the loop driver.
#[derive(Clone, Copy, Debug)]
pub struct SimRequest {
    /// Inlet node of the calling branch; dual-service components
    /// dispatch on it (chilled-water return vs hot-water return vs
    /// condenser return).
    pub inlet_node: NodeId,
    /// Signed load the loop wants met: negative for cooling demand,
    /// positive for heating demand (W).
    pub requested_load_w: f64,
    /// False when the loop has scheduled the component off.
    pub run_flag: bool,
    /// True on the first iteration of the loop convergence pass.
    pub first_iteration: bool,
}

/// The resolved operating point returned to the loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimOutcome {
    /// Signed load actually met (W); sign convention as the request.
    pub load_w: f64,
    pub mass_flow_kg_s: f64,
    pub outlet_temp_c: f64,
}

/// Per-timestep lifecycle of a plant component.
///
/// Callers guarantee strict ordering per call: `initialize` →
/// `simulate` → `update` → `report`, with `size` having run before the
/// first `simulate` of the run. `update` commits node temperatures the
/// loop reads next iteration; `report` converts rates into accumulated
/// energies.
pub trait PlantComponent {
    fn name(&self) -> &str;

    /// Per-environment initialization: design-flow node limits,
    /// setpoint fallbacks, standby flow requests.
    fn initialize(&mut self, plant: &mut PlantModel) -> ComponentResult<()>;

    /// Resolve design flow rates. Out-of-scope sizing heuristics reduce
    /// to design-point algebra here, but the call must precede the
    /// first `simulate`.
    fn size(&mut self, plant: &PlantModel) -> ComponentResult<()>;

    /// Resolve the operating point for this call.
    fn simulate(
        &mut self,
        request: &SimRequest,
        plant: &mut PlantModel,
    ) -> ComponentResult<SimOutcome>;

    /// Commit node state for the operating point just resolved.
    fn update(&mut self, plant: &mut PlantModel) -> ComponentResult<()>;

    /// Integrate rates into energies over the system timestep.
    fn report(&mut self, dt: TimeStep, plant: &PlantModel) -> ComponentResult<()>;
}
