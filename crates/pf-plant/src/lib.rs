//! pf-plant: the plant-side collaborator surface consumed by equipment
//! models.
//!
//! Equipment components do not own loop topology; each call they are
//! handed `&mut PlantModel` and reach every collaborator service
//! through it:
//!
//! - node state (temperatures, mass flows, setpoints, limits)
//! - plant loops with their demand-calculation scheme and flow-lock
//!   state
//! - the component flow-rate setter (honors the flow lock, clamps to
//!   node limits)
//! - schedule lookups
//! - building heat-balance services for radiant components: CTF
//!   coefficient access, the shared per-surface heat-source array, and
//!   synchronous surface heat-balance recompute

pub mod error;
pub mod flow;
pub mod heat_balance;
pub mod loops;
pub mod model;
pub mod node;
pub mod schedule;

pub use error::{PlantError, PlantResult};
pub use flow::set_component_flow_rate;
pub use heat_balance::{HeatBalance, Surface, SurfaceCtf};
pub use loops::{DemandScheme, FlowLock, LoopBank, PlantLoop};
pub use model::PlantModel;
pub use node::{Node, NodeBank};
pub use schedule::{Schedule, ScheduleBank};
