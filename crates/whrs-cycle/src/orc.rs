//! Organic Rankine cycle heated by the remaining jacket water.
//!
//! State points `ORC1` (condenser outlet) through `ORC4` (turbine outlet)
//! mirror the steam cycle. The condensation temperature sits a fixed
//! approach above the seawater inlet.

use crate::advisory::{Advisory, SUPERHEAT_BAND, check};
use crate::constants::PlantConstants;
use crate::error::CycleResult;
use crate::props::{Fluid, PropertySource};
use crate::rankine::RankineState;
use serde::Serialize;
use whrs_core::log_mean;
use whrs_fluids::PropKey;

#[derive(Debug, Clone, Serialize)]
pub struct OrcState {
    /// Property-engine code of the working fluid
    pub fluid: String,
    pub t_cond: f64,
    pub p_cond: f64,
    /// Saturated liquid heat capacity at `t_cond` [kJ/(kg·K)]
    pub cp: f64,
    /// Heat taken from the jacket water [kW]
    pub q_evap: f64,

    pub t_1: f64,
    pub p_1: f64,
    pub h_1: f64,
    pub s_1: f64,
    pub v_1: f64,

    pub p_2: f64,
    pub h_2s: f64,
    pub h_2: f64,
    pub t_2: f64,
    pub s_2: f64,

    pub t_evap: f64,
    pub t_3: f64,
    pub t_crit: f64,
    pub p_3: f64,
    pub h_3: f64,
    pub s_3: f64,
    pub m_orc: f64,

    pub w_pump_ideal: f64,
    pub w_pump_real: f64,
    pub i_pump: f64,
    pub i_evap_jw: f64,
    pub i_evap_orc: f64,
    pub i_evap: f64,

    pub p_4: f64,
    pub x_4s: f64,
    pub h_4s: f64,
    pub h_4: f64,
    pub t_4: f64,
    pub s_4: f64,
    pub x_4: f64,
    pub w_turbine_ideal: f64,
    pub w_turbine_real: f64,
    pub gen_power: f64,
    pub i_turbine: f64,

    /// Heat the seawater takes from the ORC condenser [kW]
    pub q_cond: f64,
    /// Working fluid side condenser irreversibility
    pub i_cond_orc: f64,
}

pub fn orc<P: PropertySource + ?Sized>(
    c: &PlantConstants,
    rc: &RankineState,
    fluid: &str,
    superheat: f64,
    subcool: f64,
    pump_rise: f64,
    props: &mut P,
) -> CycleResult<(OrcState, Vec<Advisory>)> {
    let mut adv = Vec::new();
    let (lo, hi) = SUPERHEAT_BAND;
    check(&mut adv, superheat < lo, Advisory::OrcSuperheatLow { value: superheat });
    check(&mut adv, superheat > hi, Advisory::OrcSuperheatHigh { value: superheat });
    check(&mut adv, subcool < lo, Advisory::OrcSubcoolLow { value: subcool });
    check(&mut adv, subcool > hi, Advisory::OrcSubcoolHigh { value: subcool });

    let mut wf = Fluid::new(props, fluid);
    let t_env = c.t_env;

    let t_jw_in = c.t_d2;
    let t_jw_out = c.t_jw_return;
    let t_cond = c.t_sw_in + c.orc_condenser_approach;
    let p_cond = wf.sat_t(PropKey::P, t_cond, 1.0)?;
    let cp = wf.sat_t(PropKey::Cpmass, t_cond, 0.0)?;
    let q_evap = rc.m_jw_orc * c.cp_jw * (t_jw_in - t_jw_out);

    // Condenser outlet
    let t_1 = t_cond - subcool;
    let p_1 = p_cond;
    let h_1 = wf.h_tp(t_1, p_1)?;
    let s_1 = wf.s_tp(t_1, p_1)?;
    let v_1 = 1.0 / wf.at_tp(PropKey::D, t_1, p_1)?;

    // Pump
    let p_2 = p_1 + pump_rise;
    let w_spec_ideal = v_1 * (p_2 - p_1) / 1000.0;
    let h_2s = h_1 + w_spec_ideal;
    let h_2 = (h_2s - h_1) / c.orc_pump_eff + h_1;
    let t_2 = wf.t_ph(p_2, h_2)?;
    let s_2 = wf.s_ph(p_2, h_2)?;

    // Evaporator
    let t_evap = wf.sat_p(PropKey::T, p_2, 0.0)?;
    let t_3 = t_evap + superheat;
    let t_crit = wf.t_crit()?;
    check(
        &mut adv,
        t_crit < t_3,
        Advisory::Supercritical {
            t_crit,
            t_evaporator_out: t_3,
        },
    );
    let p_3 = p_2 - c.exchanger_dp;
    let h_3 = wf.h_tp(t_3, p_3)?;
    let m_orc = q_evap / (cp * (t_evap - t_2) + (h_3 - h_2) + cp * superheat);

    let w_pump_ideal = m_orc * w_spec_ideal;
    let w_pump_real = w_pump_ideal / c.orc_pump_eff;
    let i_pump = m_orc * t_env * (s_2 - s_1);

    let s_3 = wf.s_tp(t_3, p_3)?;
    let i_evap_jw = q_evap * (1.0 - t_env / log_mean(t_jw_in, t_jw_out));
    let i_evap_orc = m_orc * (h_3 - h_2 - t_env * (s_3 - s_2));

    // Turbine
    let p_4 = p_1 + c.exchanger_dp;
    let s_f4 = wf.sat_p(PropKey::S, p_4, 0.0)?;
    let s_g4 = wf.sat_p(PropKey::S, p_4, 1.0)?;
    let h_f4 = wf.sat_p(PropKey::H, p_4, 0.0)?;
    let h_g4 = wf.sat_p(PropKey::H, p_4, 1.0)?;
    let x_4s = (s_3 - s_f4) / (s_g4 - s_f4);
    let h_4s = h_f4 + x_4s * (h_g4 - h_f4);
    let w_turbine_ideal = m_orc * (h_3 - h_4s);
    let h_4 = c.orc_turbine_outlet.outlet_enthalpy(h_3, h_4s, c.turbine_eff);
    let t_4 = wf.t_ph(p_4, h_4)?;
    let s_4 = wf.s_ph(p_4, h_4)?;
    let x_4 = (s_4 - s_f4) / (s_g4 - s_f4);
    let w_turbine_real = w_turbine_ideal * c.turbine_eff;
    let gen_power = w_turbine_real * c.generator_eff;
    let i_turbine = m_orc * t_env * (s_4 - s_3);

    // Condenser: desuperheat, condense, subcool
    let q_cond = m_orc * (cp * (t_4 - t_cond) + (h_g4 - h_f4) + cp * subcool);
    let i_cond_orc = m_orc * (h_1 - h_4 - t_env * (s_1 - s_4));

    let state = OrcState {
        fluid: fluid.to_string(),
        t_cond,
        p_cond,
        cp,
        q_evap,
        t_1,
        p_1,
        h_1,
        s_1,
        v_1,
        p_2,
        h_2s,
        h_2,
        t_2,
        s_2,
        t_evap,
        t_3,
        t_crit,
        p_3,
        h_3,
        s_3,
        m_orc,
        w_pump_ideal,
        w_pump_real,
        i_pump,
        i_evap_jw,
        i_evap_orc,
        i_evap: i_evap_jw + i_evap_orc,
        p_4,
        x_4s,
        h_4s,
        h_4,
        t_4,
        s_4,
        x_4,
        w_turbine_ideal,
        w_turbine_real,
        gen_power,
        i_turbine,
        q_cond,
        i_cond_orc,
    };
    Ok((state, adv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::OrcTurbineOutlet;
    use crate::desalination::desalination;
    use crate::operating::OperatingPoint;
    use crate::props::stub::stub_cache;
    use crate::rankine::rankine;
    use crate::source::characterize;
    use crate::tables::EngineTables;

    fn run(superheat: f64, pump_rise: f64) -> (OrcState, RankineState, Vec<Advisory>) {
        run_with(PlantConstants::default(), superheat, pump_rise)
    }

    fn run_with(
        c: PlantConstants,
        superheat: f64,
        pump_rise: f64,
    ) -> (OrcState, RankineState, Vec<Advisory>) {
        let point = OperatingPoint {
            load: 60.0,
            jw_pump: 3.15,
            rc_superheat: 8.0222,
            rc_subcool: 1e-4,
            orc_superheat: superheat,
            orc_subcool: 1e-3,
            orc_pump: 6.6,
            p_chamber: 0.2,
            fluid: None,
        };
        let mut props = stub_cache();
        let tables = EngineTables::reference().unwrap();
        let (src, _) = characterize(&c, &tables, &point, &mut props).unwrap();
        let (des, _) = desalination(&c, &src, point.p_chamber_pa(), &mut props).unwrap();
        let (rc, _) = rankine(&c, &src, &des, 8.0222, 1e-4, &mut props).unwrap();
        let (orc, adv) = orc(&c, &rc, "Cyclohexane", superheat, 1e-3, pump_rise, &mut props).unwrap();
        (orc, rc, adv)
    }

    #[test]
    fn driven_by_remaining_jacket_water() {
        let (orc, rc, adv) = run(1e-3, 660_000.0);
        assert!(adv.is_empty());
        assert_eq!(orc.fluid, "Cyclohexane");
        assert!((orc.q_evap - rc.m_jw_orc * 4.05 * 41.0).abs() < 1e-9);
        assert!((orc.t_cond - 293.28).abs() < 1e-9);
        assert!((orc.p_2 - orc.p_1 - 660_000.0).abs() < 1e-6);
        assert!(orc.m_orc > 0.0);
    }

    #[test]
    fn turbine_outlet_between_isentropic_and_inlet() {
        let (orc, _, _) = run(1e-3, 660_000.0);
        assert!((orc.h_4 - (orc.h_3 + 0.8 * (orc.h_4s - orc.h_3))).abs() < 1e-9);
        assert!(orc.h_4 < orc.h_3);
        assert!(orc.q_cond > 0.0);
    }

    #[test]
    fn legacy_outlet_stays_near_inlet_enthalpy() {
        let c = PlantConstants {
            orc_turbine_outlet: OrcTurbineOutlet::Legacy,
            ..PlantConstants::default()
        };
        let (legacy, _, _) = run_with(c, 1e-3, 660_000.0);
        let (eff, _, _) = run(1e-3, 660_000.0);

        assert!((legacy.h_4 - (legacy.h_3 + 0.8 * (legacy.h_4s - legacy.h_3) / 1000.0)).abs() < 1e-9);
        assert!(legacy.h_4 > eff.h_4);
        assert!(legacy.t_4 > eff.t_4);
        assert!(legacy.q_cond > eff.q_cond);
        // ideal and shaft work do not depend on the outlet state
        assert_eq!(legacy.w_turbine_real, eff.w_turbine_real);
    }

    #[test]
    fn supercritical_advisory() {
        // stub critical temperature is 500 K
        let (orc, _, adv) = run(1e-3, 660_000.0);
        assert!(orc.t_3 < 500.0);
        assert!(adv.is_empty());

        let (orc, _, adv) = run(1e-3, 1_000_000.0);
        assert!(orc.t_3 > 500.0);
        assert_eq!(
            adv,
            vec![Advisory::Supercritical {
                t_crit: 500.0,
                t_evaporator_out: orc.t_3,
            }]
        );
    }

    #[test]
    fn superheat_band_advisory() {
        let (_, _, adv) = run(-1.0, 660_000.0);
        assert_eq!(adv, vec![Advisory::OrcSuperheatLow { value: -1.0 }]);
    }
}
