//! The component flow-rate setter.

use crate::loops::FlowLock;
use crate::node::NodeBank;
use pf_core::{NodeId, clamp};

/// Request a component mass flow rate from the network.
///
/// Under a locked flow state the network-imposed inlet flow wins and
/// the request is ignored. Otherwise the request is clamped into the
/// inlet node's flow band and committed to both nodes. Returns the
/// actual flow the component must operate at.
pub fn set_component_flow_rate(
    nodes: &mut NodeBank,
    requested_kg_s: f64,
    inlet: NodeId,
    outlet: NodeId,
    lock: FlowLock,
) -> f64 {
    if lock.is_locked() {
        return nodes.get(inlet).mass_flow_kg_s;
    }

    let (min, max) = {
        let n = nodes.get(inlet);
        (n.mass_flow_min_kg_s, n.mass_flow_max_kg_s)
    };
    let actual = clamp(requested_kg_s.max(0.0), min, max);
    if actual != requested_kg_s {
        tracing::debug!(
            requested = requested_kg_s,
            actual,
            "component flow request clamped to node limits"
        );
    }
    nodes.get_mut(inlet).mass_flow_kg_s = actual;
    nodes.get_mut(outlet).mass_flow_kg_s = actual;
    actual
}
