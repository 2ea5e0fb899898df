//! The aggregate plant/building model handed to equipment each call.

use crate::heat_balance::HeatBalance;
use crate::loops::{DemandScheme, LoopBank};
use crate::node::NodeBank;
use crate::schedule::ScheduleBank;
use pf_core::{LoopId, NodeId};
use pf_curves::CurveBank;

/// Everything a component reaches during one simulate call. Replaces
/// module-level global state: one instance per simulation, owned by the
/// outer driver.
#[derive(Clone, Debug, Default)]
pub struct PlantModel {
    pub nodes: NodeBank,
    pub loops: LoopBank,
    pub curves: CurveBank,
    pub schedules: ScheduleBank,
    pub heat_balance: HeatBalance,
    /// Time index for schedule lookups.
    pub hour_of_year: usize,
}

impl PlantModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cooling-side supply setpoint at a node under the loop's demand
    /// scheme (single setpoint, or the high setpoint of a dead band).
    pub fn cooling_setpoint(&self, loop_id: LoopId, node: NodeId) -> Option<f64> {
        let n = self.nodes.get(node);
        match self.loops.get(loop_id).demand_scheme {
            DemandScheme::SingleSetpoint => n.temp_setpoint_c,
            DemandScheme::DualSetpointDeadBand => n.temp_setpoint_hi_c,
        }
    }

    /// Heating-side supply setpoint at a node under the loop's demand
    /// scheme (single setpoint, or the low setpoint of a dead band).
    pub fn heating_setpoint(&self, loop_id: LoopId, node: NodeId) -> Option<f64> {
        let n = self.nodes.get(node);
        match self.loops.get(loop_id).demand_scheme {
            DemandScheme::SingleSetpoint => n.temp_setpoint_c,
            DemandScheme::DualSetpointDeadBand => n.temp_setpoint_lo_c,
        }
    }
}
