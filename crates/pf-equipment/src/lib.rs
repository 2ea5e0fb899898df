//! pf-equipment: transient plant-equipment models.
//!
//! Two components, each resolving a self-consistent operating point
//! (mass flow, temperature difference, load, fuel and electric rates)
//! per system timestep:
//!
//! - [`absorption::AbsorptionChillerHeater`] — a direct-fired
//!   absorption chiller-heater with water- or air-cooled condenser,
//!   dual cooling/heating operation off a shared fuel train, and
//!   performance-curve based capacity and input-ratio corrections.
//! - [`rink::IceRinkFloor`] — an indoor ice-rink radiant floor on a
//!   brine refrigeration loop, coupled to the building heat balance
//!   through CTF-derived coefficients.
//!
//! Components implement [`PlantComponent`] and are driven by the outer
//! simulation loop in strict Init → Calc → Update → Report order each
//! system timestep. Requested loads are signed: negative for cooling
//! demand, positive for heating demand.

pub mod absorption;
pub mod common;
pub mod error;
pub mod rink;
pub mod traits;

pub use absorption::AbsorptionChillerHeater;
pub use error::{ComponentError, ComponentResult};
pub use rink::IceRinkFloor;
pub use traits::{PlantComponent, SimOutcome, SimRequest};
