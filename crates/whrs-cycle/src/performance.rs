//! Energy and exergy accounting, fuel savings, CO2 reduction and EPC.
//!
//! Efficiencies are percentages and are not clamped: implausible operating
//! points may give negative values or values above 100.

use crate::constants::PlantConstants;
use crate::desalination::DesalinationState;
use crate::orc::OrcState;
use crate::rankine::RankineState;
use crate::seawater::SeawaterState;
use crate::source::HeatSources;
use crate::teg::TegState;
use serde::Serialize;
use whrs_core::log_mean;

/// Energy and exergy balance of one subsystem.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubsystemPerformance {
    /// Heat supplied [kW]
    pub heat_input: f64,
    /// Net useful output [kW]
    pub output: f64,
    pub thermal_eff: f64,
    /// Total exergy destruction [kW]
    pub irreversibility: f64,
    pub exergy_eff: f64,
}

impl SubsystemPerformance {
    fn new(heat_input: f64, output: f64, irreversibility: f64) -> Self {
        Self {
            heat_input,
            output,
            thermal_eff: output / heat_input * 100.0,
            irreversibility,
            exergy_eff: output / (output + irreversibility) * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Performance {
    pub rc: SubsystemPerformance,
    /// RC turbine work minus pump work, before the generator [kW]
    pub rc_shaft_output: f64,
    pub orc: SubsystemPerformance,
    pub orc_shaft_output: f64,
    pub teg: SubsystemPerformance,
    pub desalination: SubsystemPerformance,
    pub whrs: SubsystemPerformance,
}

/// Aggregate the subsystem balances.
pub fn aggregate(
    c: &PlantConstants,
    src: &HeatSources,
    des: &DesalinationState,
    rc: &RankineState,
    orc: &OrcState,
    teg: &TegState,
    sw: &SeawaterState,
) -> Performance {
    let t_env = c.t_env;

    let rc_heat = rc.q_engine * (rc.m_jw_rc / c.m_jw) + src.q_exh;
    let rc_output = rc.gen_power - rc.w_pump_real;
    let rc_irr = rc.i_pump
        + rc.i_engine_rc
        + rc.i_evap
        + rc.i_turbine
        + (rc.i_cond_jw + sw.i_cond_sw_rc);

    let orc_output = orc.gen_power - orc.w_pump_real;
    let orc_irr =
        orc.i_pump + orc.i_evap + orc.i_turbine + (orc.i_cond_orc + sw.i_cond_sw_orc);

    let i_teg = teg.q_teg * (1.0 - t_env / log_mean(teg.hot, teg.cold));
    let teg_perf = SubsystemPerformance::new(teg.q_teg, teg.output_kw, i_teg);

    let i_des_jw = des.q_jw_des * (1.0 - t_env / log_mean(c.t_d2, c.t_jw_return));
    let i_des = i_des_jw + sw.i_des_sw;
    // Desalination efficiencies also charge the pump and ejector work.
    let des_perf = SubsystemPerformance {
        heat_input: des.q_jw_des,
        output: des.q_sw_des_equivalent,
        thermal_eff: des.q_sw_des_equivalent / (des.q_jw_des + c.w_des_pump) * 100.0,
        irreversibility: i_des,
        exergy_eff: des.q_sw_des_equivalent / (des.q_jw_des + i_des) * 100.0,
    };

    let rc_perf = SubsystemPerformance::new(rc_heat, rc_output, rc_irr);
    let orc_perf = SubsystemPerformance::new(orc.q_evap, orc_output, orc_irr);
    let whrs = SubsystemPerformance::new(
        rc_perf.heat_input + orc_perf.heat_input + teg_perf.heat_input + des_perf.heat_input,
        rc_perf.output + orc_perf.output + teg_perf.output + des_perf.output,
        rc_perf.irreversibility
            + orc_perf.irreversibility
            + teg_perf.irreversibility
            + des_perf.irreversibility,
    );

    Performance {
        rc: rc_perf,
        rc_shaft_output: rc.w_turbine_real - rc.w_pump_real,
        orc: orc_perf,
        orc_shaft_output: orc.w_turbine_real - orc.w_pump_real,
        teg: teg_perf,
        desalination: des_perf,
        whrs,
    }
}

/// Fuel saved by each subsystem at the current specific consumption [g/h].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FuelSavings {
    pub rc: f64,
    pub orc: f64,
    pub teg: f64,
    pub desalination: f64,
    pub whrs: f64,
    /// Engine plus WHRS output [kW]
    pub total_output: f64,
    /// Specific fuel consumption referred to `total_output` [g/kWh]
    pub new_fo: f64,
    pub percent: f64,
}

pub fn fuel_savings(src: &HeatSources, perf: &Performance) -> FuelSavings {
    let fo = src.fo_consumption;
    let rc = fo * perf.rc.output;
    let orc = fo * perf.orc.output;
    let teg = fo * perf.teg.output;
    let desalination = fo * perf.desalination.output;
    let total_output = src.power + perf.whrs.output;
    let new_fo = src.power * fo / total_output;

    FuelSavings {
        rc,
        orc,
        teg,
        desalination,
        whrs: rc + orc + teg + desalination,
        total_output,
        new_fo,
        percent: 100.0 - new_fo / fo * 100.0,
    }
}

/// Daily CO2 emission with and without the WHRS.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Emissions {
    /// kg CO2 per day with the WHRS
    pub with_whrs: f64,
    /// kg CO2 per day without the WHRS
    pub without_whrs: f64,
    /// Reduction [%]
    pub reduction: f64,
}

pub fn co2_reduction(c: &PlantConstants, src: &HeatSources, new_fo: f64) -> Emissions {
    let daily_kg = |sfoc: f64| sfoc * src.power * 24.0 / 1000.0;
    let with_whrs = daily_kg(new_fo) * c.co2_factor;
    let without_whrs = daily_kg(src.fo_baseline) * c.co2_factor;

    Emissions {
        with_whrs,
        without_whrs,
        reduction: (1.0 - with_whrs / without_whrs) * 100.0,
    }
}

/// Economic payback metric for a WHRS output [kW]. Lower is better.
pub fn epc(c: &PlantConstants, whrs_output: f64) -> f64 {
    c.ctot * (c.crf + c.fk) / (whrs_output * c.hours)
}
