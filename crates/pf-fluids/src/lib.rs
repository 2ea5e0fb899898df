//! pf-fluids: working-fluid property evaluation for plant loops.
//!
//! Provides density, specific heat, thermal conductivity and dynamic
//! viscosity as pure functions of temperature for the loop fluids the
//! equipment models care about: water and the secondary-coolant brines
//! used on refrigeration loops.
//!
//! Evaluation clamps to the authored temperature range of each property
//! table and never fails at runtime; selecting a fluid is a
//! configuration-time decision (`Fluid` is an enum, so an unknown fluid
//! cannot reach an evaluation site).

pub mod error;
pub mod ice;
pub mod model;
pub mod table;

pub use error::{FluidError, FluidResult};
pub use model::{Fluid, FluidProperties};
pub use table::PropertyTable;
