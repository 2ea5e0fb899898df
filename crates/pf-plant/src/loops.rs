//! Plant loops, demand schemes and the flow-lock state.

use pf_core::{LoopId, NodeId};
use pf_fluids::Fluid;

/// Hydraulic-network state for one loop side: whether components may
/// still influence their own flow this iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlowLock {
    /// Mass flow rates may be changed by loop components.
    #[default]
    Unlocked,
    /// Mass flow rates are fixed by the upstream network.
    Locked,
    /// Degenerate locked state: the network has throttled flow to a
    /// small value and outlet temperatures drift past their setpoint.
    Overloaded,
}

impl FlowLock {
    /// True when the network owns the flow rate.
    pub fn is_locked(&self) -> bool {
        !matches!(self, FlowLock::Unlocked)
    }
}

/// How the loop expresses its demand setpoint on supply nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemandScheme {
    SingleSetpoint,
    DualSetpointDeadBand,
}

#[derive(Clone, Debug)]
pub struct PlantLoop {
    pub name: String,
    pub fluid: Fluid,
    /// Node carrying the loop-wide setpoint (fallback when a supply
    /// node has none of its own).
    pub setpoint_node: NodeId,
    pub demand_scheme: DemandScheme,
    pub flow_lock: FlowLock,
}

#[derive(Clone, Debug, Default)]
pub struct LoopBank {
    loops: Vec<PlantLoop>,
}

impl LoopBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, plant_loop: PlantLoop) -> LoopId {
        let id = LoopId::from_index(self.loops.len() as u32);
        self.loops.push(plant_loop);
        id
    }

    pub fn get(&self, id: LoopId) -> &PlantLoop {
        &self.loops[id.index() as usize]
    }

    pub fn get_mut(&mut self, id: LoopId) -> &mut PlantLoop {
        &mut self.loops[id.index() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_lock_classification() {
        assert!(!FlowLock::Unlocked.is_locked());
        assert!(FlowLock::Locked.is_locked());
        assert!(FlowLock::Overloaded.is_locked());
    }
}
