//! Heat-exchanger effectiveness of the embedded tube circuit.
//!
//! Pure function of the refrigerant entering temperature and mass flow
//! rate. Classic NTU closed form for a constant-wall-temperature
//! exchanger: Dittus-Boelter in the turbulent regime, the constant
//! laminar Nusselt number below it.

use crate::common::MASS_FLOW_TOLERANCE;
use pf_fluids::FluidProperties;
use std::f64::consts::PI;

/// Reynolds number above which the flow is treated as turbulent.
const MAX_LAMINAR_RE: f64 = 2300.0;
/// Constant-surface-temperature laminar Nusselt number.
const LAMINAR_NU: f64 = 3.66;
/// NTU beyond which `1 - exp(-NTU)` is 1.0 to working precision.
const MAX_EXP_POWER: f64 = 50.0;

/// Effectiveness of the tube circuit at the given entering conditions.
///
/// Returns a value in `(0, 1]`; vanishing flow is the NTU → ∞ limit
/// and saturates at 1.0.
pub fn calc_effectiveness(
    fluid: &impl FluidProperties,
    temp_c: f64,
    mass_flow_kg_s: f64,
    tube_diameter_m: f64,
    tube_length_m: f64,
) -> f64 {
    if mass_flow_kg_s < MASS_FLOW_TOLERANCE {
        return 1.0;
    }

    let specific_heat = fluid.specific_heat(temp_c);
    let conductivity = fluid.conductivity(temp_c);
    let viscosity = fluid.viscosity(temp_c);

    // Re = 4*mdot / (pi * mu * D)
    let reynolds = 4.0 * mass_flow_kg_s / (PI * viscosity * tube_diameter_m);
    let prandtl = viscosity * specific_heat / conductivity;

    let nusselt = if reynolds >= MAX_LAMINAR_RE {
        0.023 * reynolds.powf(0.8) * prandtl.powf(0.3)
    } else {
        LAMINAR_NU
    };

    let ntu = PI * conductivity * nusselt * tube_length_m / (mass_flow_kg_s * specific_heat);

    if ntu > MAX_EXP_POWER {
        1.0
    } else {
        1.0 - (-ntu).exp()
    }
}
