//! The cycle evaluator.
//!
//! [`WhrsEvaluator::evaluate`] validates an operating point, runs the stages
//! in order and keeps the report of the last successful evaluation.

use crate::advisory::Advisory;
use crate::constants::PlantConstants;
use crate::desalination::{DesalinationState, desalination};
use crate::error::{CycleError, CycleResult};
use crate::operating::{OperatingPoint, ParamRanges};
use crate::orc::{OrcState, orc};
use crate::params::ParamVector;
use crate::performance::{
    Emissions, FuelSavings, Performance, aggregate, co2_reduction, epc, fuel_savings,
};
use crate::rankine::{RankineState, rankine};
use crate::seawater::{SeawaterState, route};
use crate::source::{HeatSources, characterize};
use crate::tables::EngineTables;
use crate::teg::{self, TegState};
use serde::Serialize;
use tracing::{debug, info};
use whrs_fluids::{CachePolicy, FluidRegistry, FluidSpec, PropertyCache, PropertyEngine};

/// The three outputs a search ranks operating points by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Headline {
    /// Net WHRS output [kW]
    pub whrs_cycle_output: f64,
    /// CO2 reduction [%]
    pub co2_red: f64,
    pub epc: f64,
}

impl Headline {
    pub fn as_array(&self) -> [f64; 3] {
        [self.whrs_cycle_output, self.co2_red, self.epc]
    }

    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}

/// Everything computed by one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub point: OperatingPoint,
    pub headline: Headline,
    pub params: ParamVector,
    pub fluid: FluidSpec,
    pub sources: HeatSources,
    pub desalination: DesalinationState,
    pub rankine: RankineState,
    pub orc: OrcState,
    pub teg: TegState,
    pub seawater: SeawaterState,
    pub performance: Performance,
    pub fuel: FuelSavings,
    pub emissions: Emissions,
    pub advisories: Vec<Advisory>,
}

/// Evaluates operating points of the waste heat recovery plant.
///
/// One instance is not shared between threads; `evaluate` takes `&mut self`
/// because the property cache grows with every call.
pub struct WhrsEvaluator<E> {
    constants: PlantConstants,
    tables: EngineTables,
    ranges: ParamRanges,
    fluids: FluidRegistry,
    cache: PropertyCache<E>,
    last: Option<CycleReport>,
}

impl<E: PropertyEngine> WhrsEvaluator<E> {
    /// Evaluator with the reference plant, default ranges and fluid registry.
    ///
    /// Under [`CachePolicy::File`] persisted property values are loaded here.
    pub fn new(engine: E, policy: CachePolicy) -> CycleResult<Self> {
        let cache = PropertyCache::new(engine, policy)?;
        Ok(Self {
            constants: PlantConstants::default(),
            tables: EngineTables::reference()?,
            ranges: ParamRanges::default(),
            fluids: FluidRegistry::default(),
            cache,
            last: None,
        })
    }

    pub fn with_constants(mut self, constants: PlantConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_tables(mut self, tables: EngineTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_ranges(mut self, ranges: ParamRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// Evaluate `point` and return its headline outputs.
    ///
    /// Every variable and the fluid index are validated before any property
    /// lookup. On success the report replaces the previous one and the
    /// property cache is saved under the file policy; on failure the
    /// previous report is discarded.
    ///
    /// # Errors
    /// - `RangeViolation` for a variable or fluid index outside its interval
    /// - `PhysicalInconsistency` for the pinch and seawater outlet checks
    /// - `Property` when the property engine fails
    pub fn evaluate(&mut self, point: &OperatingPoint) -> CycleResult<Headline> {
        self.last = None;
        self.ranges.validate(point)?;
        let fluid = self.resolve_fluid(point)?;

        let report = self.run(point, fluid)?;
        let headline = report.headline;
        info!(
            load = point.load,
            fluid = fluid.display_name,
            output = headline.whrs_cycle_output,
            co2_red = headline.co2_red,
            epc = headline.epc,
            advisories = report.advisories.len(),
            "evaluated"
        );

        self.last = Some(report);
        self.cache.save()?;
        Ok(headline)
    }

    fn resolve_fluid(&self, point: &OperatingPoint) -> CycleResult<FluidSpec> {
        let Some(index) = point.fluid else {
            return Ok(*self.fluids.default_spec());
        };
        self.fluids
            .get(index)
            .copied()
            .map_err(|_| CycleError::RangeViolation {
                field: "Fluid",
                value: index as f64,
                min: 0.0,
                max: (self.fluids.len() - 1) as f64,
            })
    }

    fn run(&mut self, point: &OperatingPoint, fluid: FluidSpec) -> CycleResult<CycleReport> {
        let c = &self.constants;
        let props = &mut self.cache;
        let mut advisories = Vec::new();

        let (sources, adv) = characterize(c, &self.tables, point, props)?;
        advisories.extend(adv);
        debug!(q_exh = sources.q_exh, heat_block = sources.heat_block, "heat sources");

        let (des, adv) = desalination(c, &sources, point.p_chamber_pa(), props)?;
        advisories.extend(adv);

        let (rc, adv) = rankine(c, &sources, &des, point.rc_superheat, point.rc_subcool, props)?;
        advisories.extend(adv);
        debug!(m_jw_rc = rc.m_jw_rc, gen = rc.gen_power, "rankine cycle");

        let (orc, adv) = orc(
            c,
            &rc,
            fluid.code,
            point.orc_superheat,
            point.orc_subcool,
            point.orc_pump_pa(),
            props,
        )?;
        advisories.extend(adv);
        debug!(m_orc = orc.m_orc, gen = orc.gen_power, "organic rankine cycle");

        let (layout, adv) = teg::layout(c, &sources);
        advisories.extend(adv);

        let seawater = route(c, &sources, &des, &rc, &orc, layout.q_teg, props)?;
        let (teg, adv) = teg::generate(c, layout, seawater.teg_cold());
        advisories.extend(adv);

        let performance = aggregate(c, &sources, &des, &rc, &orc, &teg, &seawater);
        let fuel = fuel_savings(&sources, &performance);
        let emissions = co2_reduction(c, &sources, fuel.new_fo);
        let headline = Headline {
            whrs_cycle_output: performance.whrs.output,
            co2_red: emissions.reduction,
            epc: epc(c, performance.whrs.output),
        };

        let params = ParamVector::new([
            point.load,
            sources.fo_consumption,
            sources.exh_in,
            sources.m_exh,
            c.t_d2,
            point.jw_pump,
            c.jw_pump_eff,
            sources.heat_block,
            c.t_sw_in,
            c.p_sw_in,
            sources.power,
            point.rc_superheat,
            point.rc_subcool,
            point.orc_superheat,
            point.orc_subcool,
            point.orc_pump,
            c.orc_pump_eff,
            point.p_chamber,
            c.pinch_des,
            c.t_des_surface,
            c.n_teg,
            c.teg_hot,
            teg.cold,
            headline.whrs_cycle_output,
            headline.co2_red,
            headline.epc,
        ]);

        Ok(CycleReport {
            point: *point,
            headline,
            params,
            fluid,
            sources,
            desalination: des,
            rankine: rc,
            orc,
            teg,
            seawater,
            performance,
            fuel,
            emissions,
            advisories,
        })
    }

    /// Report of the last successful evaluation.
    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last.as_ref()
    }

    /// Parameter vector of the last successful evaluation.
    pub fn params(&self) -> Option<&ParamVector> {
        self.last.as_ref().map(|r| &r.params)
    }

    pub fn constants(&self) -> &PlantConstants {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut PlantConstants {
        &mut self.constants
    }

    pub fn tables(&self) -> &EngineTables {
        &self.tables
    }

    pub fn ranges(&self) -> &ParamRanges {
        &self.ranges
    }

    pub fn ranges_mut(&mut self) -> &mut ParamRanges {
        &mut self.ranges
    }

    pub fn fluids(&self) -> &FluidRegistry {
        &self.fluids
    }

    pub fn fluids_mut(&mut self) -> &mut FluidRegistry {
        &mut self.fluids
    }

    pub fn cache(&self) -> &PropertyCache<E> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operating::OperatingVariable;
    use crate::props::stub::StubEngine;
    use std::fs;
    use whrs_fluids::CountingEngine;

    fn evaluator() -> WhrsEvaluator<CountingEngine<StubEngine>> {
        WhrsEvaluator::new(CountingEngine::new(StubEngine), CachePolicy::Memory).unwrap()
    }

    fn point() -> OperatingPoint {
        OperatingPoint {
            load: 60.0,
            jw_pump: 3.15,
            rc_superheat: 8.0222,
            rc_subcool: 1e-4,
            orc_superheat: 1e-3,
            orc_subcool: 1e-3,
            orc_pump: 6.6,
            p_chamber: 0.2,
            fluid: None,
        }
    }

    #[test]
    fn headline_matches_report() {
        let mut ev = evaluator();
        let h = ev.evaluate(&point()).unwrap();
        assert!(h.is_finite());
        assert!(h.whrs_cycle_output > 0.0);

        let report = ev.last_report().unwrap();
        assert_eq!(report.headline, h);
        assert_eq!(report.fluid.code, "Cyclohexane");
        let params = ev.params().unwrap();
        assert_eq!(params.get("WHRS_cycle_output"), Some(h.whrs_cycle_output));
        assert_eq!(params.get("CO2_red"), Some(h.co2_red));
        assert_eq!(params.get("EPC"), Some(h.epc));
        assert_eq!(params.get("JW_pump"), Some(3.15));
        let p_sw_in = params.get("P_sw_in").unwrap();
        assert!((p_sw_in - 240_000.0).abs() < 1e-6);
        assert_eq!(params.get("TEG_cold"), Some(report.teg.cold));
    }

    #[test]
    fn output_is_the_sum_of_subsystems() {
        let mut ev = evaluator();
        ev.evaluate(&point()).unwrap();
        let p = &ev.last_report().unwrap().performance;
        let sum = p.rc.output + p.orc.output + p.teg.output + p.desalination.output;
        assert!((p.whrs.output - sum).abs() < 1e-9);
    }

    #[test]
    fn repeated_evaluation_is_served_from_cache() {
        let mut ev = evaluator();
        let first = ev.evaluate(&point()).unwrap();
        let calls = ev.cache().engine().calls();
        assert!(calls > 0);

        let second = ev.evaluate(&point()).unwrap();
        assert_eq!(first, second);
        assert_eq!(ev.cache().engine().calls(), calls);
    }

    #[test]
    fn range_violation_before_any_lookup() {
        let mut ev = evaluator();
        let bad = OperatingPoint {
            load: 49.999,
            ..point()
        };
        let err = ev.evaluate(&bad).unwrap_err();
        assert!(matches!(err, CycleError::RangeViolation { field: "Load", .. }));
        assert_eq!(ev.cache().engine().calls(), 0);
        assert!(ev.last_report().is_none());
    }

    #[test]
    fn nan_is_a_range_violation() {
        let mut ev = evaluator();
        let bad = OperatingPoint {
            orc_pump: f64::NAN,
            ..point()
        };
        assert!(matches!(
            ev.evaluate(&bad),
            Err(CycleError::RangeViolation { field: "ORC_Pump", .. })
        ));
    }

    #[test]
    fn fluid_index_is_validated() {
        let mut ev = evaluator();
        let err = ev.evaluate(&point().with_fluid(16)).unwrap_err();
        assert_eq!(
            err,
            CycleError::RangeViolation {
                field: "Fluid",
                value: 16.0,
                min: 0.0,
                max: 15.0,
            }
        );
        assert_eq!(ev.cache().engine().calls(), 0);

        ev.evaluate(&point().with_fluid(3)).unwrap();
        assert_eq!(ev.last_report().unwrap().orc.fluid, "Propane");
    }

    #[test]
    fn failure_clears_last_report() {
        let mut ev = evaluator();
        ev.evaluate(&point()).unwrap();
        assert!(ev.last_report().is_some());

        ev.ranges_mut().set(OperatingVariable::PChamber, 0.09, 8.0).unwrap();
        let bad = OperatingPoint {
            p_chamber: 4.0,
            ..point()
        };
        let err = ev.evaluate(&bad).unwrap_err();
        assert!(matches!(err, CycleError::PhysicalInconsistency { .. }));
        assert!(ev.last_report().is_none());
    }

    fn file_evaluator(path: &std::path::Path) -> WhrsEvaluator<CountingEngine<StubEngine>> {
        WhrsEvaluator::new(
            CountingEngine::new(StubEngine),
            CachePolicy::File(path.to_path_buf()),
        )
        .unwrap()
    }

    #[test]
    fn persisted_cache_serves_a_fresh_evaluator() {
        let path = std::env::temp_dir().join("whrs_cycle_evaluator_file_cache.json");
        let _ = fs::remove_file(&path);

        let mut first = file_evaluator(&path);
        let expected = first.evaluate(&point()).unwrap();
        assert!(first.cache().engine().calls() > 0);
        assert!(path.exists());

        let mut second = file_evaluator(&path);
        assert_eq!(second.cache().len(), first.cache().len());
        let reloaded = second.evaluate(&point()).unwrap();
        assert_eq!(second.cache().engine().calls(), 0);
        assert_eq!(expected, reloaded);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn failed_evaluation_leaves_no_cache_file() {
        let path = std::env::temp_dir().join("whrs_cycle_evaluator_failed_save.json");
        let _ = fs::remove_file(&path);

        let mut ev = file_evaluator(&path);
        ev.ranges_mut().set(OperatingVariable::PChamber, 0.09, 8.0).unwrap();
        let bad = OperatingPoint {
            p_chamber: 4.0,
            ..point()
        };
        assert!(ev.evaluate(&bad).is_err());
        assert!(ev.cache().engine().calls() > 0);
        assert!(!path.exists());
    }

    #[test]
    fn legacy_orc_outlet_changes_the_seawater_chain() {
        let mut ev = evaluator();
        ev.evaluate(&point()).unwrap();
        let efficiency = ev.last_report().unwrap().clone();

        ev.constants_mut().orc_turbine_outlet = crate::constants::OrcTurbineOutlet::Legacy;
        ev.evaluate(&point()).unwrap();
        let legacy = ev.last_report().unwrap();

        let orc = &legacy.orc;
        assert!((orc.h_4 - (orc.h_3 + 0.8 * (orc.h_4s - orc.h_3) / 1000.0)).abs() < 1e-9);
        assert!(legacy.orc.q_cond > efficiency.orc.q_cond);
        assert!(legacy.teg.cold > efficiency.teg.cold);
        assert_eq!(legacy.orc.gen_power, efficiency.orc.gen_power);
    }
}
