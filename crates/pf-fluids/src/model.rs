//! Fluid selection and the property-evaluation trait.

use crate::table::PropertyTable;

/// Loop working fluids known to the plant model.
///
/// Chilled/hot/condenser water loops run plain water; refrigeration
/// loops run a secondary-coolant brine. Selecting a fluid happens at
/// configuration time, so evaluation sites never see an unknown fluid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fluid {
    Water,
    EthyleneGlycol30,
    CalciumChloride25,
}

/// Pure property lookups as functions of temperature (°C).
///
/// Implementations must be side-effect free; out-of-range temperatures
/// clamp to the authored table range instead of extrapolating.
pub trait FluidProperties {
    /// Density [kg/m³].
    fn density(&self, t_c: f64) -> f64;
    /// Specific heat capacity at constant pressure [J/(kg·K)].
    fn specific_heat(&self, t_c: f64) -> f64;
    /// Thermal conductivity [W/(m·K)].
    fn conductivity(&self, t_c: f64) -> f64;
    /// Dynamic viscosity [Pa·s].
    fn viscosity(&self, t_c: f64) -> f64;
}

struct FluidTables {
    density: PropertyTable,
    specific_heat: PropertyTable,
    conductivity: PropertyTable,
    viscosity: PropertyTable,
}

const WATER_GRID: &[f64] = &[0.0, 20.0, 40.0, 60.0, 80.0];
static WATER: FluidTables = FluidTables {
    density: PropertyTable::from_static(WATER_GRID, &[999.8, 998.2, 992.2, 983.2, 971.8]),
    specific_heat: PropertyTable::from_static(WATER_GRID, &[4217.0, 4182.0, 4179.0, 4185.0, 4197.0]),
    conductivity: PropertyTable::from_static(WATER_GRID, &[0.561, 0.598, 0.631, 0.654, 0.670]),
    viscosity: PropertyTable::from_static(WATER_GRID, &[1.787e-3, 1.002e-3, 0.653e-3, 0.467e-3, 0.355e-3]),
};

const EG30_GRID: &[f64] = &[-10.0, 0.0, 20.0, 40.0, 60.0];
static ETHYLENE_GLYCOL_30: FluidTables = FluidTables {
    density: PropertyTable::from_static(EG30_GRID, &[1053.0, 1051.0, 1044.0, 1035.0, 1025.0]),
    specific_heat: PropertyTable::from_static(EG30_GRID, &[3680.0, 3700.0, 3740.0, 3780.0, 3820.0]),
    conductivity: PropertyTable::from_static(EG30_GRID, &[0.435, 0.445, 0.468, 0.488, 0.505]),
    viscosity: PropertyTable::from_static(EG30_GRID, &[6.2e-3, 4.4e-3, 2.4e-3, 1.5e-3, 1.0e-3]),
};

const CACL2_GRID: &[f64] = &[-20.0, -10.0, 0.0, 10.0, 20.0];
static CALCIUM_CHLORIDE_25: FluidTables = FluidTables {
    density: PropertyTable::from_static(CACL2_GRID, &[1248.0, 1244.0, 1240.0, 1235.0, 1230.0]),
    specific_heat: PropertyTable::from_static(CACL2_GRID, &[2866.0, 2886.0, 2907.0, 2930.0, 2954.0]),
    conductivity: PropertyTable::from_static(CACL2_GRID, &[0.528, 0.540, 0.552, 0.564, 0.576]),
    viscosity: PropertyTable::from_static(CACL2_GRID, &[9.0e-3, 6.0e-3, 4.3e-3, 3.3e-3, 2.6e-3]),
};

impl Fluid {
    fn tables(&self) -> &'static FluidTables {
        match self {
            Fluid::Water => &WATER,
            Fluid::EthyleneGlycol30 => &ETHYLENE_GLYCOL_30,
            Fluid::CalciumChloride25 => &CALCIUM_CHLORIDE_25,
        }
    }
}

impl FluidProperties for Fluid {
    fn density(&self, t_c: f64) -> f64 {
        self.tables().density.at(t_c)
    }

    fn specific_heat(&self, t_c: f64) -> f64 {
        self.tables().specific_heat.at(t_c)
    }

    fn conductivity(&self, t_c: f64) -> f64 {
        self.tables().conductivity.at(t_c)
    }

    fn viscosity(&self, t_c: f64) -> f64 {
        self.tables().viscosity.at(t_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PropertyTable;

    #[test]
    fn builtin_tables_are_valid() {
        // The static tables bypass the validating constructor; rebuild
        // each one through it here so bad data cannot ship silently.
        for fluid in [Fluid::Water, Fluid::EthyleneGlycol30, Fluid::CalciumChloride25] {
            let t = fluid.tables();
            for table in [&t.density, &t.specific_heat, &t.conductivity, &t.viscosity] {
                let rebuilt = PropertyTable::new(
                    // Safety of unwrap: same data the statics carry.
                    table_grid(table),
                    table_values(table),
                );
                assert!(rebuilt.is_ok(), "invalid builtin table for {fluid:?}");
            }
        }
    }

    fn table_grid(t: &PropertyTable) -> &'static [f64] {
        // Test-only accessor via Debug clone; tables are Copy-less so
        // reach the fields through a helper on the module.
        t.grid_for_tests()
    }

    fn table_values(t: &PropertyTable) -> &'static [f64] {
        t.values_for_tests()
    }

    #[test]
    fn water_near_room_temperature() {
        let rho = Fluid::Water.density(20.0);
        let cp = Fluid::Water.specific_heat(20.0);
        assert!((rho - 998.2).abs() < 0.5);
        assert!((cp - 4182.0).abs() < 5.0);
    }

    #[test]
    fn brine_is_denser_and_more_viscous_than_water() {
        let t = -5.0;
        let brine = Fluid::CalciumChloride25;
        assert!(brine.density(t) > Fluid::Water.density(t));
        assert!(brine.viscosity(t) > Fluid::Water.viscosity(t));
    }

    #[test]
    fn evaluation_clamps_not_extrapolates() {
        // Far below the grid the value must equal the first grid value.
        assert_eq!(
            Fluid::Water.density(-100.0),
            Fluid::Water.density(0.0)
        );
        assert_eq!(Fluid::Water.density(500.0), Fluid::Water.density(80.0));
    }
}
