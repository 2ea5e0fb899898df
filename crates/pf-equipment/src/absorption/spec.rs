//! Immutable configuration of one absorption chiller-heater.

use crate::error::{ComponentError, ComponentResult};
use pf_core::{CurveId, Power, VolumeRate};

/// Condenser heat-rejection path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CondenserKind {
    WaterCooled,
    AirCooled,
}

/// Which condenser temperature the performance curves are authored
/// against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CondensingTempConvention {
    /// Curves take the condenser inlet (return) temperature.
    Entering,
    /// Curves take the condenser outlet (supply) temperature; the
    /// solver feeds them the previous call's estimate.
    Leaving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FuelKind {
    NaturalGas,
    Diesel,
    Gasoline,
    FuelOilNo1,
    FuelOilNo2,
    Propane,
    OtherFuel1,
    OtherFuel2,
}

/// Configuration read once at input time; read-only afterwards.
///
/// The seven curve handles follow the DOE-2 style input-ratio model:
/// capacity and fuel/electric input ratios corrected by temperature
/// (FT, two independent variables) and by part-load ratio (FPLR), plus
/// the heating-capacity-from-cooling-load cross coupling of the shared
/// fuel train.
#[derive(Clone, Debug)]
pub struct AbsorberSpec {
    pub name: String,
    pub nominal_cooling_capacity: Power,
    /// Heating nominal capacity as a fraction of the cooling capacity.
    pub heat_cool_ratio: f64,
    pub fuel_cool_ratio: f64,
    pub fuel_heat_ratio: f64,
    pub elec_cool_ratio: f64,
    pub elec_heat_ratio: f64,
    pub min_part_load_ratio: f64,
    pub max_part_load_ratio: f64,
    pub opt_part_load_ratio: f64,
    pub design_cond_return_temp_c: f64,
    pub design_chw_supply_temp_c: f64,
    pub evap_vol_flow: VolumeRate,
    /// `None` requests autosizing from the nominal capacity.
    pub cond_vol_flow: Option<VolumeRate>,
    pub heat_vol_flow: VolumeRate,
    pub cool_cap_ft: CurveId,
    pub fuel_cool_ft: CurveId,
    pub fuel_cool_fplr: CurveId,
    pub elec_cool_ft: CurveId,
    pub elec_cool_fplr: CurveId,
    pub heat_cap_fcool: CurveId,
    pub fuel_heat_fhplr: CurveId,
    pub temp_convention: CondensingTempConvention,
    pub condenser: CondenserKind,
    pub chw_low_limit_temp_c: f64,
    /// Higher heating value of the fuel [J/kg]; reporting only.
    pub fuel_heating_value_j_per_kg: f64,
    pub sizing_factor: f64,
    pub fuel: FuelKind,
}

impl AbsorberSpec {
    /// Validate ratio ordering and positivity, then apply the input
    /// coercions a configuration front end would: a leaving-condenser
    /// convention is meaningless on an air-cooled condenser and falls
    /// back to entering.
    pub fn validated(mut self) -> ComponentResult<Self> {
        if self.nominal_cooling_capacity.value <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "nominal cooling capacity must be positive",
            });
        }
        if self.heat_cool_ratio < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "heat/cool capacity ratio cannot be negative",
            });
        }
        if self.fuel_cool_ratio <= 0.0 || self.fuel_heat_ratio <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "fuel input ratios must be positive",
            });
        }
        if self.elec_cool_ratio < 0.0 || self.elec_heat_ratio < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "electric input ratios cannot be negative",
            });
        }
        if !(self.min_part_load_ratio > 0.0
            && self.min_part_load_ratio <= self.max_part_load_ratio)
        {
            return Err(ComponentError::InvalidArg {
                what: "part-load ratios must satisfy 0 < min <= max",
            });
        }
        if self.evap_vol_flow.value <= 0.0 || self.heat_vol_flow.value <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "design volumetric flow rates must be positive",
            });
        }
        if let Some(cond_flow) = self.cond_vol_flow {
            if cond_flow.value <= 0.0 {
                return Err(ComponentError::InvalidArg {
                    what: "design condenser flow rate must be positive",
                });
            }
        }
        if self.condenser == CondenserKind::AirCooled
            && self.temp_convention == CondensingTempConvention::Leaving
        {
            tracing::warn!(
                unit = %self.name,
                "invalid to combine LeavingCondenser with AirCooled; \
                 resetting to EnteringCondenser, simulation continues"
            );
            self.temp_convention = CondensingTempConvention::Entering;
        }
        Ok(self)
    }
}

/// Baseline spec for unit tests across the absorption modules.
#[cfg(test)]
pub(crate) fn test_spec() -> AbsorberSpec {
    use pf_core::{Id, m3ps, w};
    let curve = Id::from_index(0);
    AbsorberSpec {
        name: "abs-1".into(),
        nominal_cooling_capacity: w(100_000.0),
        heat_cool_ratio: 0.8,
        fuel_cool_ratio: 0.97,
        fuel_heat_ratio: 1.25,
        elec_cool_ratio: 0.01,
        elec_heat_ratio: 0.005,
        min_part_load_ratio: 0.1,
        max_part_load_ratio: 1.0,
        opt_part_load_ratio: 0.7,
        design_cond_return_temp_c: 29.4,
        design_chw_supply_temp_c: 6.7,
        evap_vol_flow: m3ps(0.004),
        cond_vol_flow: Some(m3ps(0.006)),
        heat_vol_flow: m3ps(0.002),
        cool_cap_ft: curve,
        fuel_cool_ft: curve,
        fuel_cool_fplr: curve,
        elec_cool_ft: curve,
        elec_cool_fplr: curve,
        heat_cap_fcool: curve,
        fuel_heat_fhplr: curve,
        temp_convention: CondensingTempConvention::Entering,
        condenser: CondenserKind::WaterCooled,
        chw_low_limit_temp_c: 2.0,
        fuel_heating_value_j_per_kg: 50.0e6,
        sizing_factor: 1.0,
        fuel: FuelKind::NaturalGas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_spec() -> AbsorberSpec {
        super::test_spec()
    }

    #[test]
    fn accepts_sane_spec() {
        assert!(basic_spec().validated().is_ok());
    }

    #[test]
    fn rejects_inverted_plr_band() {
        let mut spec = basic_spec();
        spec.min_part_load_ratio = 1.2;
        spec.max_part_load_ratio = 1.0;
        assert!(spec.validated().is_err());
    }

    #[test]
    fn leaving_convention_coerced_on_air_cooled() {
        let mut spec = basic_spec();
        spec.condenser = CondenserKind::AirCooled;
        spec.temp_convention = CondensingTempConvention::Leaving;
        let spec = spec.validated().unwrap();
        assert_eq!(spec.temp_convention, CondensingTempConvention::Entering);
    }
}
