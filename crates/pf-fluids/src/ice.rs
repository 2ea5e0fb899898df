//! Ice-phase constants for rink energy balances.
//!
//! Two specific-heat values are deliberate: the freeze-down design
//! calculation and the per-timestep sensible balance were calibrated
//! with different data sets, and normalizing one to the other changes
//! the sized freezing capacity.

/// Latent heat of fusion of water [J/kg].
pub const HEAT_OF_FUSION: f64 = 333_550.0;

/// Ice specific heat used by the freezing-capacity design load [J/(kg·K)].
pub const CP_FREEZING: f64 = 2_108.0;

/// Ice specific heat used by the per-timestep sensible balance [J/(kg·K)].
pub const CP: f64 = 2_040.0;

/// Ice density [kg/m³].
pub const DENSITY: f64 = 917.0;
