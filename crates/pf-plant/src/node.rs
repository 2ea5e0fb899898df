//! Loop node state.

use pf_core::NodeId;

/// One hydraulic node: the temperature/flow interface between a
/// component and the loop it sits on.
#[derive(Clone, Debug)]
pub struct Node {
    pub temp_c: f64,
    pub mass_flow_kg_s: f64,
    /// Flow band imposed by the network; the flow setter clamps into it.
    pub mass_flow_min_kg_s: f64,
    pub mass_flow_max_kg_s: f64,
    /// Lowest temperature the loop tolerates at this node.
    pub temp_min_c: f64,
    pub temp_setpoint_c: Option<f64>,
    pub temp_setpoint_hi_c: Option<f64>,
    pub temp_setpoint_lo_c: Option<f64>,
    /// Present only on outdoor-air reference nodes (air-cooled
    /// condensers read their entering temperature from it).
    pub outdoor_dry_bulb_c: Option<f64>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            temp_c: 20.0,
            mass_flow_kg_s: 0.0,
            mass_flow_min_kg_s: 0.0,
            mass_flow_max_kg_s: f64::INFINITY,
            temp_min_c: f64::NEG_INFINITY,
            temp_setpoint_c: None,
            temp_setpoint_hi_c: None,
            temp_setpoint_lo_c: None,
            outdoor_dry_bulb_c: None,
        }
    }
}

impl Node {
    pub fn at_temp(temp_c: f64) -> Self {
        Self {
            temp_c,
            ..Self::default()
        }
    }

    pub fn outdoor_air(dry_bulb_c: f64) -> Self {
        Self {
            temp_c: dry_bulb_c,
            outdoor_dry_bulb_c: Some(dry_bulb_c),
            ..Self::default()
        }
    }
}

/// Owns all nodes of a model; handles are minted by `add`.
#[derive(Clone, Debug, Default)]
pub struct NodeBank {
    nodes: Vec<Node>,
}

impl NodeBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index() as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index() as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
