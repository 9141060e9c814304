//! Vacuum desalination driven by jacket water.
//!
//! A fixed jacket water flow, sized from the fresh water generator capacity,
//! is cooled from `t_d2` to `t_jw_return` in a one-phase evaporator. The
//! remaining jacket water goes to the two Rankine cycles.

use crate::advisory::{Advisory, check};
use crate::constants::{PlantConstants, STEFAN_BOLTZMANN};
use crate::error::{CycleError, CycleResult};
use crate::props::{Fluid, PropertySource};
use crate::source::HeatSources;
use serde::Serialize;
use whrs_fluids::WATER;

#[derive(Debug, Clone, Serialize)]
pub struct DesalinationState {
    /// Chamber pressure [Pa]
    pub p_chamber: f64,
    /// Seawater vaporization temperature in the chamber
    pub t_des: f64,
    /// Pinch-limited distillate outlet temperature
    pub t_distillate: f64,
    pub m_jw_des: f64,
    /// Jacket water left for RC and ORC [kg/s]
    pub m_jw_cycles: f64,
    pub q_jw_des: f64,
    pub q_radiation: f64,
    /// Heat available for fresh water generation [kW]
    pub q_sw_des: f64,
    /// Work-equivalent of `q_sw_des` [kW]
    pub q_sw_des_equivalent: f64,
    pub pd2: f64,
    pub pd3: f64,
    pub h_d2: f64,
    pub s_d2: f64,
    pub h_d3: f64,
    pub s_d3: f64,
}

/// Jacket water flow through the evaporator [kg/s].
pub fn evaporator_flow(c: &PlantConstants) -> f64 {
    ((c.kjw * c.daily_cap / (c.t_d2 - c.t_jw_return)) * 1.025) / 3.6
}

/// Heat radiated by the desalinator shell [kW].
pub fn radiation_loss(c: &PlantConstants) -> f64 {
    c.des_emissivity * STEFAN_BOLTZMANN * c.t_des_surface.powi(4) * c.des_area / 1000.0
}

/// Evaluate the desalination stage.
///
/// # Errors
/// `PhysicalInconsistency` if the chamber saturation temperature is not below
/// the pinch-limited outlet temperature.
pub fn desalination<P: PropertySource + ?Sized>(
    c: &PlantConstants,
    src: &HeatSources,
    p_chamber: f64,
    props: &mut P,
) -> CycleResult<(DesalinationState, Vec<Advisory>)> {
    let mut adv = Vec::new();
    let pd2 = src.hp_pump;
    let pd3 = pd2 - c.exchanger_dp;

    check(&mut adv, pd2 >= 500_000.0, Advisory::JacketWaterPressureHigh { value: pd2 });
    check(&mut adv, p_chamber < 9_000.0, Advisory::ChamberPressureLow { value: p_chamber });
    check(&mut adv, p_chamber > 20_000.0, Advisory::ChamberPressureHigh { value: p_chamber });
    check(&mut adv, c.pinch_des < 0.0, Advisory::PinchPointLow { value: c.pinch_des });
    check(&mut adv, c.pinch_des > 30.0, Advisory::PinchPointHigh { value: c.pinch_des });

    let mut water = Fluid::new(props, WATER);
    let t_des = water.t_sat_qp(1.0, p_chamber)?;
    let t_distillate = c.t_d2 - c.pinch_des;
    if t_des >= t_distillate {
        return Err(CycleError::PhysicalInconsistency {
            what: "desalination vaporization temperature reaches the pinch-limited outlet",
            value: t_des,
            limit: t_distillate,
        });
    }

    let m_jw_des = evaporator_flow(c);
    let q_jw_des = m_jw_des * c.cp_jw * (c.t_d2 - c.t_jw_return);
    let q_radiation = radiation_loss(c);
    let q_sw_des = q_jw_des - q_radiation;

    let state = DesalinationState {
        p_chamber,
        t_des,
        t_distillate,
        m_jw_des,
        m_jw_cycles: c.m_jw - m_jw_des,
        q_jw_des,
        q_radiation,
        q_sw_des,
        q_sw_des_equivalent: q_sw_des * (1.0 - c.t_env / t_des),
        pd2,
        pd3,
        h_d2: water.h_tp(c.t_d2, pd2)?,
        s_d2: water.s_tp(c.t_d2, pd2)?,
        h_d3: water.h_tp(c.t_jw_return, pd3)?,
        s_d3: water.s_tp(c.t_jw_return, pd3)?,
    };
    Ok((state, adv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operating::OperatingPoint;
    use crate::props::stub::stub_cache;
    use crate::source::characterize;
    use crate::tables::EngineTables;

    fn sources(c: &PlantConstants) -> HeatSources {
        let point = OperatingPoint {
            load: 60.0,
            jw_pump: 3.15,
            rc_superheat: 8.0222,
            rc_subcool: 1e-4,
            orc_superheat: 1e-3,
            orc_subcool: 1e-3,
            orc_pump: 6.6,
            p_chamber: 0.2,
            fluid: None,
        };
        let tables = EngineTables::reference().unwrap();
        characterize(c, &tables, &point, &mut stub_cache()).unwrap().0
    }

    #[test]
    fn evaporator_sizing() {
        let c = PlantConstants::default();
        let m = evaporator_flow(&c);
        assert!((m - (25.6 * 22.0 / 41.0) * 1.025 / 3.6).abs() < 1e-9);
        let q = radiation_loss(&c);
        assert!(q > 2.8 && q < 2.83, "q = {q}");
    }

    #[test]
    fn jacket_water_split() {
        let c = PlantConstants::default();
        let (state, adv) = desalination(&c, &sources(&c), 20_000.0, &mut stub_cache()).unwrap();
        assert!(adv.is_empty());
        assert!((state.m_jw_des + state.m_jw_cycles - c.m_jw).abs() < 1e-12);
        assert!((state.q_sw_des - (state.q_jw_des - state.q_radiation)).abs() < 1e-12);
        // stub saturation line: 270 K + P / 4000
        assert!((state.t_des - 275.0).abs() < 1e-9);
        assert!((state.pd3 - 305_000.0).abs() < 1e-6);
    }

    #[test]
    fn chamber_limits_are_advisories() {
        let c = PlantConstants::default();
        let (_, adv) = desalination(&c, &sources(&c), 25_000.0, &mut stub_cache()).unwrap();
        assert_eq!(adv, vec![Advisory::ChamberPressureHigh { value: 25_000.0 }]);
    }

    #[test]
    fn pinch_violation_is_fatal() {
        let c = PlantConstants::default();
        // stub saturation at 400 kPa is 370 K, above 369.15 - 10
        let err = desalination(&c, &sources(&c), 400_000.0, &mut stub_cache()).unwrap_err();
        match err {
            CycleError::PhysicalInconsistency { value, limit, .. } => {
                assert!((value - 370.0).abs() < 1e-9);
                assert!((limit - 359.15).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
