//! Direct-fired absorption chiller-heater.
//!
//! Dual-service equipment: the same unit serves a chilled-water loop
//! and a hot-water loop off a shared fuel train, with a water- or
//! air-cooled condenser. Performance follows the DOE-2 input-ratio
//! approach: capacity and fuel/electric input ratios corrected by
//! curves of temperature and part-load ratio.
//!
//! The loop driver calls [`AbsorptionChillerHeater::simulate`] once per
//! branch visit; the arriving inlet node decides whether the call is a
//! cooling resolution, a heating resolution, or a passive
//! condenser-side visit.

mod condenser;
mod cooling;
mod heating;
pub mod report;
pub mod spec;
pub mod state;

pub use report::AbsorberReport;
pub use spec::{AbsorberSpec, CondenserKind, CondensingTempConvention, FuelKind};
pub use state::OperatingState;

use crate::error::{ComponentError, ComponentResult};
use crate::traits::{PlantComponent, SimOutcome, SimRequest};
use pf_core::{LoopId, NodeId, TimeStep};
use pf_fluids::FluidProperties;
use pf_plant::{PlantModel, set_component_flow_rate};

/// Property-evaluation temperature for chilled/condenser water design
/// flow conversion.
const CHW_INIT_TEMP_C: f64 = 5.05;
/// Property-evaluation temperature for hot water design flow
/// conversion.
const HW_INIT_TEMP_C: f64 = 60.0;
/// Condenser loop design temperature rise used when the condenser flow
/// is autosized.
const COND_DESIGN_DELTA_T_C: f64 = 5.6;

/// Node/loop wiring resolved by the plant topology scan.
#[derive(Clone, Copy, Debug)]
pub struct AbsorberTopology {
    pub chill_return: NodeId,
    pub chill_supply: NodeId,
    pub cond_return: NodeId,
    pub cond_supply: NodeId,
    pub heat_return: NodeId,
    pub heat_supply: NodeId,
    pub chw_loop: LoopId,
    pub hw_loop: LoopId,
    /// Absent for air-cooled condensers.
    pub cond_loop: Option<LoopId>,
}

pub struct AbsorptionChillerHeater {
    spec: AbsorberSpec,
    topo: AbsorberTopology,
    state: OperatingState,
    report: AbsorberReport,
}

impl AbsorptionChillerHeater {
    pub fn new(spec: AbsorberSpec, topo: AbsorberTopology) -> ComponentResult<Self> {
        let spec = spec.validated()?;
        if spec.condenser == CondenserKind::WaterCooled && topo.cond_loop.is_none() {
            return Err(ComponentError::MissingTopology {
                what: "water-cooled condenser requires a condenser loop",
            });
        }
        Ok(Self {
            spec,
            topo,
            state: OperatingState::new(),
            report: AbsorberReport::default(),
        })
    }

    pub fn spec(&self) -> &AbsorberSpec {
        &self.spec
    }

    pub fn state(&self) -> &OperatingState {
        &self.state
    }

    pub fn last_report(&self) -> &AbsorberReport {
        &self.report
    }

    /// Cooling capacity band (min, max, optimal) the loop dispatcher
    /// distributes against.
    pub fn cooling_capacity_band_w(&self) -> (f64, f64, f64) {
        let nominal = self.spec.nominal_cooling_capacity.value;
        (
            nominal * self.spec.min_part_load_ratio,
            nominal * self.spec.max_part_load_ratio,
            nominal * self.spec.opt_part_load_ratio,
        )
    }

    /// Heating capacity band (min, max, optimal).
    pub fn heating_capacity_band_w(&self) -> (f64, f64, f64) {
        let nominal = self.spec.nominal_cooling_capacity.value * self.spec.heat_cool_ratio;
        (
            nominal * self.spec.min_part_load_ratio,
            nominal * self.spec.max_part_load_ratio,
            nominal * self.spec.opt_part_load_ratio,
        )
    }

    /// Pin the condenser-supply lag estimate (test hook for the
    /// deliberately stateful leaving-temperature estimator).
    pub fn pin_cond_supply_estimate(&mut self, temp_c: Option<f64>) {
        self.state.last_cond_supply_temp_c = temp_c;
    }

    /// Re-arm per-environment initialization (new environment or a
    /// simulation restart).
    pub fn reset_environment(&mut self) {
        self.state.env_initialized = false;
        self.state.last_cond_supply_temp_c = None;
    }

    /// Supply nodes work off setpoints; fill them from the loop-wide
    /// setpoint node when missing, warning once per side.
    fn fill_setpoints_from_loop(&mut self, plant: &mut PlantModel) {
        let loop_sp_node = plant.loops.get(self.topo.chw_loop).setpoint_node;
        if plant
            .cooling_setpoint(self.topo.chw_loop, self.topo.chill_supply)
            .is_none()
        {
            if !self.state.chill_setpoint_from_loop_warned {
                tracing::warn!(
                    unit = %self.spec.name,
                    "missing temperature setpoint on cool side; \
                     assuming the loop setpoint, simulation continues"
                );
                self.state.chill_setpoint_from_loop_warned = true;
            }
            let (sp, sp_hi) = {
                let n = plant.nodes.get(loop_sp_node);
                (n.temp_setpoint_c, n.temp_setpoint_hi_c)
            };
            let supply = plant.nodes.get_mut(self.topo.chill_supply);
            supply.temp_setpoint_c = sp;
            supply.temp_setpoint_hi_c = sp_hi;
        }

        let loop_sp_node = plant.loops.get(self.topo.hw_loop).setpoint_node;
        if plant
            .heating_setpoint(self.topo.hw_loop, self.topo.heat_supply)
            .is_none()
        {
            if !self.state.heat_setpoint_from_loop_warned {
                tracing::warn!(
                    unit = %self.spec.name,
                    "missing temperature setpoint on heat side; \
                     assuming the loop setpoint, simulation continues"
                );
                self.state.heat_setpoint_from_loop_warned = true;
            }
            let (sp, sp_lo) = {
                let n = plant.nodes.get(loop_sp_node);
                (n.temp_setpoint_c, n.temp_setpoint_lo_c)
            };
            let supply = plant.nodes.get_mut(self.topo.heat_supply);
            supply.temp_setpoint_c = sp;
            supply.temp_setpoint_lo_c = sp_lo;
        }
    }

    /// Keep the condenser loop primed while either service is active,
    /// released otherwise.
    fn standby_condenser_flow(&mut self, plant: &mut PlantModel) {
        let Some(cond_loop) = self.topo.cond_loop else {
            return;
        };
        if self.spec.condenser != CondenserKind::WaterCooled {
            return;
        }
        let request = if self.state.in_cooling_mode || self.state.in_heating_mode {
            self.state.des_cond_mass_flow_kg_s
        } else {
            0.0
        };
        let lock = plant.loops.get(cond_loop).flow_lock;
        set_component_flow_rate(
            &mut plant.nodes,
            request,
            self.topo.cond_return,
            self.topo.cond_supply,
            lock,
        );
    }
}

impl PlantComponent for AbsorptionChillerHeater {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn size(&mut self, plant: &PlantModel) -> ComponentResult<()> {
        let chw_fluid = plant.loops.get(self.topo.chw_loop).fluid;
        let hw_fluid = plant.loops.get(self.topo.hw_loop).fluid;

        use uom::si::volume_rate::cubic_meter_per_second;

        self.state.des_evap_mass_flow_kg_s = chw_fluid.density(CHW_INIT_TEMP_C)
            * self.spec.evap_vol_flow.get::<cubic_meter_per_second>();
        self.state.des_heat_mass_flow_kg_s = hw_fluid.density(HW_INIT_TEMP_C)
            * self.spec.heat_vol_flow.get::<cubic_meter_per_second>();

        if let Some(cond_loop) = self.topo.cond_loop {
            let cond_fluid = plant.loops.get(cond_loop).fluid;
            let t_design = self.spec.design_cond_return_temp_c;
            let rho = cond_fluid.density(t_design);
            let cond_vol_flow = match self.spec.cond_vol_flow {
                Some(v) => v.get::<cubic_meter_per_second>(),
                // autosize: condenser carries the cooling load plus the
                // full fuel input
                None => {
                    let cp = cond_fluid.specific_heat(t_design);
                    self.spec.nominal_cooling_capacity.value * (1.0 + self.spec.fuel_cool_ratio)
                        / (COND_DESIGN_DELTA_T_C * cp * rho)
                }
            };
            self.state.des_cond_mass_flow_kg_s = rho * cond_vol_flow;
        }

        self.state.sized = true;
        Ok(())
    }

    fn initialize(&mut self, plant: &mut PlantModel) -> ComponentResult<()> {
        if !self.state.sized {
            self.size(plant)?;
        }

        if !self.state.env_initialized {
            // flow windows on component nodes follow the design flows
            for (inlet, outlet, des_flow) in [
                (
                    self.topo.chill_return,
                    self.topo.chill_supply,
                    self.state.des_evap_mass_flow_kg_s,
                ),
                (
                    self.topo.heat_return,
                    self.topo.heat_supply,
                    self.state.des_heat_mass_flow_kg_s,
                ),
                (
                    self.topo.cond_return,
                    self.topo.cond_supply,
                    self.state.des_cond_mass_flow_kg_s,
                ),
            ] {
                plant.nodes.get_mut(inlet).mass_flow_max_kg_s = des_flow;
                plant.nodes.get_mut(outlet).mass_flow_max_kg_s = des_flow;
            }
            self.state.env_initialized = true;
        }

        self.fill_setpoints_from_loop(plant);
        self.standby_condenser_flow(plant);
        Ok(())
    }

    fn simulate(
        &mut self,
        request: &SimRequest,
        plant: &mut PlantModel,
    ) -> ComponentResult<SimOutcome> {
        if request.inlet_node == self.topo.chill_return {
            self.state.in_cooling_mode = request.run_flag;
            self.initialize(plant)?;
            self.calc_cooling(request.requested_load_w, plant)
        } else if request.inlet_node == self.topo.heat_return {
            self.state.in_heating_mode = request.run_flag;
            self.initialize(plant)?;
            self.calc_heating(request.requested_load_w, request.run_flag, plant)
        } else if request.inlet_node == self.topo.cond_return {
            // passive visit from the condenser loop: expose the state
            // the last chiller resolution produced
            Ok(SimOutcome {
                load_w: self.report.tower_load_w,
                mass_flow_kg_s: self.report.cond_water_flow_kg_s,
                outlet_temp_c: self.report.cond_supply_temp_c,
            })
        } else {
            Err(ComponentError::MissingTopology {
                what: "inlet node matches no service of this chiller-heater",
            })
        }
    }

    fn update(&mut self, plant: &mut PlantModel) -> ComponentResult<()> {
        // cooling-side nodes
        if self.report.cooling_load_w == 0.0 {
            let t = plant.nodes.get(self.topo.chill_return).temp_c;
            plant.nodes.get_mut(self.topo.chill_supply).temp_c = t;
            if self.spec.condenser == CondenserKind::WaterCooled {
                let t = plant.nodes.get(self.topo.cond_return).temp_c;
                plant.nodes.get_mut(self.topo.cond_supply).temp_c = t;
            }
        } else {
            plant.nodes.get_mut(self.topo.chill_supply).temp_c =
                self.report.chill_supply_temp_c;
            if self.spec.condenser == CondenserKind::WaterCooled {
                plant.nodes.get_mut(self.topo.cond_supply).temp_c =
                    self.report.cond_supply_temp_c;
            }
        }

        // heating-side nodes
        if self.report.heating_load_w == 0.0 {
            let t = plant.nodes.get(self.topo.heat_return).temp_c;
            plant.nodes.get_mut(self.topo.heat_supply).temp_c = t;
        } else {
            plant.nodes.get_mut(self.topo.heat_supply).temp_c = self.report.hot_supply_temp_c;
        }
        Ok(())
    }

    fn report(&mut self, dt: TimeStep, _plant: &PlantModel) -> ComponentResult<()> {
        self.report.integrate_cooling(dt);
        self.report.integrate_heating(dt);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::common::MASS_FLOW_TOLERANCE;
    use approx::assert_relative_eq;
    use pf_curves::{Curve, CurveForm};
    use pf_fluids::{Fluid, FluidProperties};
    use pf_plant::{DemandScheme, FlowLock, Node, PlantLoop};

    /// A chiller-heater wired to a three-loop plant with unity-gain
    /// temperature curves and pass-through part-load curves, so
    /// expected values stay hand-computable.
    pub(crate) fn chiller_fixture() -> (AbsorptionChillerHeater, PlantModel, AbsorberTopology) {
        let mut plant = PlantModel::new();

        let unity_ft = |name: &str| {
            Curve::new_two_variable(
                name,
                CurveForm::Biquadratic {
                    c: [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                },
                -10.0,
                70.0,
                -10.0,
                70.0,
            )
            .unwrap()
        };
        let cool_cap_ft = plant.curves.add(unity_ft("cool-cap-ft"));
        let fuel_cool_ft = plant.curves.add(unity_ft("fuel-cool-ft"));
        let fuel_cool_fplr = plant.curves.add(
            Curve::new("fuel-cool-fplr", CurveForm::Linear { c: [0.0, 1.0] }, 0.0, 1.1).unwrap(),
        );
        let elec_cool_ft = plant.curves.add(unity_ft("elec-cool-ft"));
        let elec_cool_fplr = plant.curves.add(
            Curve::new("elec-cool-fplr", CurveForm::Linear { c: [1.0, 0.0] }, 0.0, 1.1).unwrap(),
        );
        let heat_cap_fcool = plant.curves.add(
            Curve::new("heat-cap-fcool", CurveForm::Linear { c: [1.0, -0.5] }, 0.0, 1.0).unwrap(),
        );
        let fuel_heat_fhplr = plant.curves.add(
            Curve::new("fuel-heat-fhplr", CurveForm::Linear { c: [0.0, 1.0] }, 0.0, 1.1).unwrap(),
        );

        let chill_return = plant.nodes.add(Node::at_temp(12.0));
        let chill_supply = plant.nodes.add(Node {
            temp_setpoint_c: Some(6.7),
            ..Node::at_temp(6.7)
        });
        let cond_return = plant.nodes.add(Node::at_temp(29.4));
        let cond_supply = plant.nodes.add(Node::at_temp(29.4));
        let heat_return = plant.nodes.add(Node::at_temp(45.0));
        let heat_supply = plant.nodes.add(Node {
            temp_setpoint_c: Some(55.0),
            ..Node::at_temp(55.0)
        });

        let chw_loop = plant.loops.add(PlantLoop {
            name: "chw".into(),
            fluid: Fluid::Water,
            setpoint_node: chill_supply,
            demand_scheme: DemandScheme::SingleSetpoint,
            flow_lock: FlowLock::Unlocked,
        });
        let hw_loop = plant.loops.add(PlantLoop {
            name: "hw".into(),
            fluid: Fluid::Water,
            setpoint_node: heat_supply,
            demand_scheme: DemandScheme::SingleSetpoint,
            flow_lock: FlowLock::Unlocked,
        });
        let cond_loop = plant.loops.add(PlantLoop {
            name: "cond".into(),
            fluid: Fluid::Water,
            setpoint_node: cond_supply,
            demand_scheme: DemandScheme::SingleSetpoint,
            flow_lock: FlowLock::Unlocked,
        });

        let mut spec = spec::test_spec();
        spec.cool_cap_ft = cool_cap_ft;
        spec.fuel_cool_ft = fuel_cool_ft;
        spec.fuel_cool_fplr = fuel_cool_fplr;
        spec.elec_cool_ft = elec_cool_ft;
        spec.elec_cool_fplr = elec_cool_fplr;
        spec.heat_cap_fcool = heat_cap_fcool;
        spec.fuel_heat_fhplr = fuel_heat_fhplr;

        let topo = AbsorberTopology {
            chill_return,
            chill_supply,
            cond_return,
            cond_supply,
            heat_return,
            heat_supply,
            chw_loop,
            hw_loop,
            cond_loop: Some(cond_loop),
        };
        let chiller = AbsorptionChillerHeater::new(spec, topo).unwrap();
        (chiller, plant, topo)
    }

    fn cooling_request(topo: &AbsorberTopology, load_w: f64) -> SimRequest {
        SimRequest {
            inlet_node: topo.chill_return,
            requested_load_w: load_w,
            run_flag: true,
            first_iteration: true,
        }
    }

    fn heating_request(topo: &AbsorberTopology, load_w: f64) -> SimRequest {
        SimRequest {
            inlet_node: topo.heat_return,
            requested_load_w: load_w,
            run_flag: true,
            first_iteration: true,
        }
    }

    fn assert_energy_balance(load_w: f64, flow_kg_s: f64, cp: f64, delta_t_c: f64) {
        let residual = load_w.abs() - flow_kg_s * cp * delta_t_c.abs();
        assert!(
            residual.abs() <= 1e-6 * load_w.abs().max(1.0),
            "load = flow*cp*dT violated: residual {residual}"
        );
    }

    #[test]
    fn no_demand_passes_water_through() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        let out = chiller
            .simulate(&cooling_request(&topo, 0.0), &mut plant)
            .unwrap();

        assert_eq!(out.load_w, 0.0);
        assert_eq!(out.outlet_temp_c, 12.0);
        let r = chiller.last_report();
        assert_eq!(r.cond_water_flow_kg_s, 0.0);
        assert_eq!(r.cool_fuel_rate_w, 0.0);
        assert_eq!(r.cool_electric_w, 0.0);
        assert!((0.0..=1.0).contains(&r.fraction_of_period_running));
    }

    #[test]
    fn unlocked_cooling_closes_energy_balance() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        let out = chiller
            .simulate(&cooling_request(&topo, -50_000.0), &mut plant)
            .unwrap();

        let cp = Fluid::Water.specific_heat(12.0);
        assert_eq!(out.outlet_temp_c, 6.7);
        assert!(out.load_w < 0.0);
        assert_energy_balance(out.load_w, out.mass_flow_kg_s, cp, 12.0 - 6.7);

        let r = chiller.last_report();
        assert_eq!(r.cooling_capacity_w, 100_000.0);
        assert_relative_eq!(r.cool_part_load_ratio, 0.5, max_relative = 1e-12);
        assert_eq!(r.fraction_of_period_running, 1.0);
        // fuel: avail * fuelCoolRatio * FT(=1) * FPLR(=plr) * frac
        assert_relative_eq!(r.cool_fuel_rate_w, 100_000.0 * 0.97 * 0.5, max_relative = 1e-9);
        // electric scales off nominal capacity
        assert_relative_eq!(r.cool_electric_w, 100_000.0 * 0.01, max_relative = 1e-9);
        // tower rejects load + burner input + parasitics
        let expected_tower =
            r.cooling_load_w + r.cool_fuel_rate_w / 1.25 + r.cool_electric_w;
        assert!((r.tower_load_w - expected_tower).abs() < 1e-6);
        assert!(r.cond_supply_temp_c > r.cond_return_temp_c);
    }

    #[test]
    fn small_request_reports_true_cycling_ratio() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        chiller
            .simulate(&cooling_request(&topo, -5_000.0), &mut plant)
            .unwrap();

        let r = chiller.last_report();
        // request is 5% of capacity, below the 10% cycling floor: the
        // true ratio is reported while the load is forced to minimum
        assert_relative_eq!(r.cool_part_load_ratio, 0.05, max_relative = 1e-12);
        assert_relative_eq!(r.cooling_load_w, 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(r.fraction_of_period_running, 0.5, max_relative = 1e-12);
    }

    #[test]
    fn oversized_request_flags_possible_subcooling() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        chiller
            .simulate(&cooling_request(&topo, -90_000.0), &mut plant)
            .unwrap();

        assert!(chiller.state().possible_subcooling);
        // the network clamps the request to the design maximum
        let r = chiller.last_report();
        assert!(
            (r.chill_water_flow_kg_s - chiller.state().des_evap_mass_flow_kg_s).abs()
                < 1e-12
        );
    }

    #[test]
    fn locked_flow_low_limit_clamp_rederives_load() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        // setpoint below the 2 C chiller low limit
        plant.nodes.get_mut(topo.chill_supply).temp_setpoint_c = Some(1.0);
        plant.loops.get_mut(topo.chw_loop).flow_lock = FlowLock::Locked;
        plant.nodes.get_mut(topo.chill_return).mass_flow_kg_s = 2.0;

        let out = chiller
            .simulate(&cooling_request(&topo, -100_000.0), &mut plant)
            .unwrap();

        assert_eq!(out.outlet_temp_c, 2.0);
        let cp = Fluid::Water.specific_heat(12.0);
        assert_energy_balance(out.load_w, 2.0, cp, 12.0 - 2.0);
    }

    #[test]
    fn locked_flow_never_exceeds_requested_load() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        plant.loops.get_mut(topo.chw_loop).flow_lock = FlowLock::Locked;
        plant.nodes.get_mut(topo.chill_return).mass_flow_kg_s = 2.0;

        let out = chiller
            .simulate(&cooling_request(&topo, -30_000.0), &mut plant)
            .unwrap();

        let cp = Fluid::Water.specific_heat(12.0);
        assert!((out.load_w.abs() - 30_000.0).abs() < 1e-9);
        assert_energy_balance(out.load_w, 2.0, cp, 12.0 - out.outlet_temp_c);
        // outlet drifts above the setpoint rather than over-delivering
        assert!(out.outlet_temp_c > 6.7);
    }

    #[test]
    fn dry_condenser_under_load_is_fatal() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        // condenser loop locked at zero flow while cooling must reject
        plant.loops.get_mut(topo.cond_loop.unwrap()).flow_lock = FlowLock::Locked;
        plant.nodes.get_mut(topo.cond_return).mass_flow_kg_s = 0.0;

        let err = chiller
            .simulate(&cooling_request(&topo, -50_000.0), &mut plant)
            .unwrap_err();
        assert!(matches!(err, ComponentError::CondenserFlowZero { .. }));
    }

    #[test]
    fn leaving_convention_seeds_and_updates_lag() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        chiller.spec.temp_convention = CondensingTempConvention::Leaving;

        assert_eq!(chiller.state().last_cond_supply_temp_c, None);
        chiller
            .simulate(&cooling_request(&topo, -50_000.0), &mut plant)
            .unwrap();

        // first use seeds return + 8 C, then stores the computed supply
        let stored = chiller.state().last_cond_supply_temp_c.unwrap();
        assert!((stored - chiller.last_report().cond_supply_temp_c).abs() < 1e-12);
        assert!(stored > 29.4);
    }

    #[test]
    fn cooling_resolution_is_idempotent() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        let req = cooling_request(&topo, -50_000.0);
        let first = chiller.simulate(&req, &mut plant).unwrap();
        let second = chiller.simulate(&req, &mut plant).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_delta_t_degenerates_to_zero_flow_with_warning() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        // return already at the setpoint
        plant.nodes.get_mut(topo.chill_return).temp_c = 6.7;

        let out = chiller
            .simulate(&cooling_request(&topo, -50_000.0), &mut plant)
            .unwrap();
        assert_eq!(out.mass_flow_kg_s, 0.0);
        assert_eq!(out.load_w, 0.0);
        assert_eq!(chiller.state().delta_temp_cool_warnings.occurrences(), 1);
    }

    #[test]
    fn unlocked_heating_closes_energy_balance() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        let out = chiller
            .simulate(&heating_request(&topo, 40_000.0), &mut plant)
            .unwrap();

        let cp = Fluid::Water.specific_heat(45.0);
        assert_eq!(out.outlet_temp_c, 55.0);
        assert!(out.load_w > 0.0);
        assert_energy_balance(out.load_w, out.mass_flow_kg_s, cp, 55.0 - 45.0);

        let r = chiller.last_report();
        // no cooling load: heatCapFCool(0) = 1, so 0.8 * nominal
        assert!((r.heating_capacity_w - 80_000.0).abs() < 1e-9);
        assert!((r.heat_part_load_ratio - 0.5).abs() < 1e-12);
        assert!((r.heat_fuel_rate_w - 80_000.0 * 1.25 * 0.5).abs() < 1e-6);
        // parasitic: nominal heating capacity * elecHeatRatio
        assert!((r.heat_electric_w - 100_000.0 * 0.8 * 0.005).abs() < 1e-9);
    }

    #[test]
    fn heating_capacity_cross_couples_to_cooling_load() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        chiller
            .simulate(&cooling_request(&topo, -50_000.0), &mut plant)
            .unwrap();
        chiller
            .simulate(&heating_request(&topo, 40_000.0), &mut plant)
            .unwrap();

        // heatCapFCool(0.5) = 1 - 0.25: the fuel train is half-busy
        let r = chiller.last_report();
        assert!((r.heating_capacity_w - 0.8 * 100_000.0 * 0.75).abs() < 1e-6);
    }

    #[test]
    fn heating_parasitic_nets_out_cooling_share() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        chiller
            .simulate(&cooling_request(&topo, -50_000.0), &mut plant)
            .unwrap();
        let cool_electric = chiller.last_report().cool_electric_w;
        assert!(cool_electric > 0.0);

        chiller
            .simulate(&heating_request(&topo, 40_000.0), &mut plant)
            .unwrap();
        // heating's own estimate (400 W) is below the cooling share, so
        // the shared auxiliaries are already counted
        let r = chiller.last_report();
        assert_eq!(r.heat_electric_w, 0.0);
        assert_eq!(r.electric_w, cool_electric);
    }

    #[test]
    fn overloaded_heating_guards_trickle_flow() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        plant.loops.get_mut(topo.hw_loop).flow_lock = FlowLock::Overloaded;
        plant.nodes.get_mut(topo.heat_return).mass_flow_kg_s = MASS_FLOW_TOLERANCE / 10.0;

        let out = chiller
            .simulate(&heating_request(&topo, 40_000.0), &mut plant)
            .unwrap();
        // delta-T forced to zero instead of dividing by the trickle
        assert_eq!(out.outlet_temp_c, 45.0);
        assert_eq!(out.load_w, 0.0);
    }

    #[test]
    fn overloaded_heating_rederives_from_network_flow() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        plant.loops.get_mut(topo.hw_loop).flow_lock = FlowLock::Overloaded;
        plant.nodes.get_mut(topo.heat_return).mass_flow_kg_s = 0.5;

        let out = chiller
            .simulate(&heating_request(&topo, 40_000.0), &mut plant)
            .unwrap();
        let cp = Fluid::Water.specific_heat(45.0);
        assert!(out.outlet_temp_c > 45.0);
        assert_energy_balance(out.load_w, 0.5, cp, out.outlet_temp_c - 45.0);
    }

    #[test]
    fn update_commits_supply_node_temperatures() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        chiller
            .simulate(&cooling_request(&topo, -50_000.0), &mut plant)
            .unwrap();
        chiller.update(&mut plant).unwrap();

        assert_eq!(plant.nodes.get(topo.chill_supply).temp_c, 6.7);
        assert_eq!(
            plant.nodes.get(topo.cond_supply).temp_c,
            chiller.last_report().cond_supply_temp_c
        );
    }

    #[test]
    fn report_pass_round_trips_rates_and_energies() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        chiller
            .simulate(&cooling_request(&topo, -50_000.0), &mut plant)
            .unwrap();
        chiller.update(&mut plant).unwrap();
        let dt = TimeStep::from_hours(0.25).unwrap();
        PlantComponent::report(&mut chiller, dt, &plant).unwrap();

        let r = chiller.last_report();
        assert!((r.cooling_energy_j / dt.seconds() - r.cooling_load_w).abs() < 1e-9);
        assert!((r.fuel_energy_j / dt.seconds() - r.fuel_rate_w).abs() < 1e-9);
        assert!((r.fuel_cop - r.cooling_load_w / r.cool_fuel_rate_w).abs() < 1e-12);
    }

    #[test]
    fn capacity_bands_follow_part_load_limits() {
        let (chiller, _plant, _topo) = chiller_fixture();
        let (min, max, opt) = chiller.cooling_capacity_band_w();
        assert_relative_eq!(min, 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(max, 100_000.0, max_relative = 1e-12);
        assert_relative_eq!(opt, 70_000.0, max_relative = 1e-12);
        let (min, max, opt) = chiller.heating_capacity_band_w();
        assert_relative_eq!(min, 8_000.0, max_relative = 1e-12);
        assert_relative_eq!(max, 80_000.0, max_relative = 1e-12);
        assert_relative_eq!(opt, 56_000.0, max_relative = 1e-12);
    }

    #[test]
    fn wrong_inlet_node_is_fatal() {
        let (mut chiller, mut plant, topo) = chiller_fixture();
        let stray = plant.nodes.add(Node::default());
        let req = SimRequest {
            inlet_node: stray,
            requested_load_w: -1_000.0,
            run_flag: true,
            first_iteration: true,
        };
        assert!(matches!(
            chiller.simulate(&req, &mut plant),
            Err(ComponentError::MissingTopology { .. })
        ));
        let _ = topo;
    }
}
