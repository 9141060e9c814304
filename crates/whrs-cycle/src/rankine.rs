//! Steam Rankine cycle on jacket water.
//!
//! State points:
//! - `RC1`: saturated liquid in the condenser, `rc_subcool` above the engine
//!   return temperature
//! - `1`: engine return (subcooled liquid at condenser pressure)
//! - `2`: jacket water pump outlet
//! - `2c` / `RC2`: engine outlet, after the engine pressure loss
//! - `RC3`: superheated vapor leaving the exhaust gas evaporator
//! - `RC4`: turbine outlet

use crate::advisory::{Advisory, SUPERHEAT_BAND, check};
use crate::constants::PlantConstants;
use crate::desalination::DesalinationState;
use crate::error::CycleResult;
use crate::props::{Fluid, PropertySource};
use crate::source::HeatSources;
use serde::Serialize;
use whrs_fluids::{PropKey, WATER};

#[derive(Debug, Clone, Serialize)]
pub struct RankineState {
    pub t_rc1: f64,
    pub p_rc1: f64,
    pub s_rc1: f64,

    pub t_1: f64,
    pub p_1: f64,
    pub h_1: f64,
    pub s_1: f64,
    /// Specific volume at the pump inlet [m³/kg]
    pub v_1: f64,

    pub p_2: f64,
    pub h_2s: f64,
    pub h_2: f64,
    pub t_2: f64,
    pub s_2: f64,
    pub w_pump_ideal: f64,
    pub w_pump_real: f64,
    pub i_pump: f64,

    pub t_2c: f64,
    pub p_2c: f64,
    pub h_2c: f64,
    pub s_2c: f64,
    /// Heat picked up by the whole jacket water flow in the engine [kW]
    pub q_engine: f64,
    pub i_engine: f64,
    /// Engine irreversibility charged to the RC share of jacket water
    pub i_engine_rc: f64,

    pub t_evap: f64,
    pub m_jw_rc: f64,
    /// Jacket water left for the ORC [kg/s]
    pub m_jw_orc: f64,

    pub t_rc3: f64,
    pub p_rc3: f64,
    pub h_rc3: f64,
    pub s_rc3: f64,
    pub i_evap_exh: f64,
    pub i_evap_jw: f64,
    pub i_evap: f64,

    pub p_rc4: f64,
    pub x_4s: f64,
    pub h_4s: f64,
    pub h_rc4: f64,
    pub t_rc4: f64,
    pub s_rc4: f64,
    pub x_4: f64,
    pub w_turbine_ideal: f64,
    pub w_turbine_real: f64,
    pub gen_power: f64,
    pub i_turbine: f64,

    pub t_cond: f64,
    /// Heat the seawater takes from the RC condenser [kW]
    pub q_cond_jw: f64,
    pub q_cond: f64,
    /// Jacket water side condenser irreversibility
    pub i_cond_jw: f64,
}

pub fn rankine<P: PropertySource + ?Sized>(
    c: &PlantConstants,
    src: &HeatSources,
    des: &DesalinationState,
    superheat: f64,
    subcool: f64,
    props: &mut P,
) -> CycleResult<(RankineState, Vec<Advisory>)> {
    let mut adv = Vec::new();
    let (lo, hi) = SUPERHEAT_BAND;
    check(&mut adv, superheat < lo, Advisory::RcSuperheatLow { value: superheat });
    check(&mut adv, superheat > hi, Advisory::RcSuperheatHigh { value: superheat });
    check(&mut adv, subcool < lo, Advisory::RcSubcoolLow { value: subcool });
    check(&mut adv, subcool > hi, Advisory::RcSubcoolHigh { value: subcool });
    check(&mut adv, c.jw_pump_eff <= 0.0, Advisory::PumpEfficiencyLow { value: c.jw_pump_eff });
    check(&mut adv, c.jw_pump_eff > 1.0, Advisory::PumpEfficiencyHigh { value: c.jw_pump_eff });

    let mut water = Fluid::new(props, WATER);
    let t_env = c.t_env;

    // Condenser
    let t_rc1 = c.t_jw_return + subcool;
    let p_rc1 = water.sat_t(PropKey::P, t_rc1, 0.0)?;
    let s_rc1 = water.sat_t(PropKey::S, t_rc1, 0.0)?;

    let t_1 = c.t_jw_return;
    let p_1 = p_rc1;
    let h_1 = water.h_tp(t_1, p_1)?;
    let s_1 = water.s_tp(t_1, p_1)?;
    let v_1 = 1.0 / water.at_tp(PropKey::D, t_1, p_1)?;

    // Pump
    let p_2 = p_1 + src.hp_pump;
    let w_spec_ideal = v_1 * (p_2 - p_1) / 1000.0;
    let h_2s = h_1 + w_spec_ideal;
    let w_pump_ideal = c.m_jw * w_spec_ideal;
    let w_pump_real = w_pump_ideal / c.jw_pump_eff;
    let h_2 = (h_2s - h_1) / c.jw_pump_eff + h_1;
    let t_2 = water.t_ph(p_2, h_2)?;
    let s_2 = water.s_ph(p_2, h_2)?;
    let i_pump = c.m_jw * t_env * (s_2 - s_1);

    // Engine
    let t_2c = c.t_d2;
    let p_2c = p_2 - c.engine_dp;
    let h_2c = water.h_tp(t_2c, p_2c)?;
    let s_2c = water.s_tp(t_2c, p_2c)?;
    let q_engine = c.m_jw * c.cp_jw * (t_2c - t_2);
    let i_engine = c.m_jw * t_env * (s_2c - s_2);

    // Jacket water drawn into the RC by the exhaust evaporator duty
    let t_evap = water.sat_p(PropKey::T, p_2c, 0.0)?;
    let h_g = water.sat_p(PropKey::H, p_2c, 1.0)?;
    let h_f = water.sat_p(PropKey::H, p_2c, 0.0)?;
    let m_jw_rc =
        src.q_exh / (c.cp_jw * (t_evap - c.t_d2) + (h_g - h_f) + c.cp_jw * superheat);
    let m_jw_orc = des.m_jw_cycles - m_jw_rc;
    let i_engine_rc = m_jw_rc * t_env * (s_2c - s_2);

    // Evaporator
    let (h_rc2, s_rc2) = (h_2c, s_2c);
    let t_rc3 = t_evap + superheat;
    let p_rc3 = p_2c - c.exchanger_dp;
    let h_rc3 = water.h_tp(t_rc3, p_rc3)?;
    let s_rc3 = water.s_tp(t_rc3, p_rc3)?;
    let i_evap_exh = src.q_exh * (1.0 - t_env / src.t_avg_exh);
    let i_evap_jw = m_jw_rc * (h_rc3 - h_rc2 - t_env * (s_rc3 - s_rc2));

    // Turbine
    let p_rc4 = p_rc1 + c.exchanger_dp;
    let s_f4 = water.sat_p(PropKey::S, p_rc4, 0.0)?;
    let s_g4 = water.sat_p(PropKey::S, p_rc4, 1.0)?;
    let h_f4 = water.sat_p(PropKey::H, p_rc4, 0.0)?;
    let h_g4 = water.sat_p(PropKey::H, p_rc4, 1.0)?;
    let x_4s = (s_rc3 - s_f4) / (s_g4 - s_f4);
    let h_4s = h_f4 + x_4s * (h_g4 - h_f4);
    let w_turbine_ideal = m_jw_rc * (h_rc3 - h_4s);
    let h_rc4 = h_rc3 + c.turbine_eff * (h_4s - h_rc3);
    let t_rc4 = water.t_ph(p_rc4, h_rc4)?;
    let s_rc4 = water.s_ph(p_rc4, h_rc4)?;
    let x_4 = (s_rc4 - s_f4) / (s_g4 - s_f4);
    let w_turbine_real = w_turbine_ideal * c.turbine_eff;
    let gen_power = w_turbine_real * c.generator_eff;
    let i_turbine = m_jw_rc * t_env * (s_rc4 - s_rc3);

    // Condenser
    let t_cond = water.sat_p(PropKey::T, p_rc4, 1.0)?;
    let q_cond_jw = m_jw_rc * c.cp_jw * (t_rc4 - t_1);
    let q_cond = m_jw_rc * (h_rc4 - h_1);
    let i_cond_jw = m_jw_rc * (h_rc4 - h_1 - t_env * (s_rc4 - s_1));

    let state = RankineState {
        t_rc1,
        p_rc1,
        s_rc1,
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
        w_pump_ideal,
        w_pump_real,
        i_pump,
        t_2c,
        p_2c,
        h_2c,
        s_2c,
        q_engine,
        i_engine,
        i_engine_rc,
        t_evap,
        m_jw_rc,
        m_jw_orc,
        t_rc3,
        p_rc3,
        h_rc3,
        s_rc3,
        i_evap_exh,
        i_evap_jw,
        i_evap: i_evap_exh + i_evap_jw,
        p_rc4,
        x_4s,
        h_4s,
        h_rc4,
        t_rc4,
        s_rc4,
        x_4,
        w_turbine_ideal,
        w_turbine_real,
        gen_power,
        i_turbine,
        t_cond,
        q_cond_jw,
        q_cond,
        i_cond_jw,
    };
    Ok((state, adv))
}
