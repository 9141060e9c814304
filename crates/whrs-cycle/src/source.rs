//! Heat source characterization.

use crate::advisory::{Advisory, check};
use crate::constants::PlantConstants;
use crate::error::CycleResult;
use crate::operating::OperatingPoint;
use crate::props::{Fluid, PropertySource};
use crate::tables::EngineTables;
use serde::Serialize;
use whrs_core::log_mean;
use whrs_fluids::{PropKey, WATER};

/// Engine operating data and the heat sources and sink at one load.
#[derive(Debug, Clone, Serialize)]
pub struct HeatSources {
    pub load: f64,
    /// Engine shaft power [kW]
    pub power: f64,
    pub fo_consumption: f64,
    pub fo_baseline: f64,
    pub exh_in: f64,
    pub m_exh: f64,
    pub heat_block: f64,
    /// Heat recoverable from the exhaust down to `exh_out` [kW]
    pub q_exh: f64,
    /// Log-mean exhaust temperature in the RC evaporator
    pub t_avg_exh: f64,
    /// Jacket water pump pressure rise [Pa]
    pub hp_pump: f64,
    /// Seawater heat capacity at inlet temperature [kJ/(kg·K)]
    pub cp_sw: f64,
}

pub fn characterize<P: PropertySource + ?Sized>(
    c: &PlantConstants,
    tables: &EngineTables,
    point: &OperatingPoint,
    props: &mut P,
) -> CycleResult<(HeatSources, Vec<Advisory>)> {
    let engine = tables.at(point.load)?;
    let mut adv = Vec::new();

    check(&mut adv, engine.exh_in <= 595.0, Advisory::ExhaustTemperatureLow { value: engine.exh_in });
    check(&mut adv, engine.exh_in >= 750.0, Advisory::ExhaustTemperatureHigh { value: engine.exh_in });
    check(&mut adv, engine.m_exh <= 2.0, Advisory::ExhaustFlowLow { value: engine.m_exh });
    check(&mut adv, engine.m_exh >= 7.5, Advisory::ExhaustFlowHigh { value: engine.m_exh });
    check(&mut adv, c.t_d2 <= 323.15, Advisory::JacketWaterTemperatureLow { value: c.t_d2 });
    check(&mut adv, c.t_d2 >= 388.15, Advisory::JacketWaterTemperatureHigh { value: c.t_d2 });
    check(&mut adv, c.t_sw_in <= 273.15, Advisory::SeawaterTemperatureLow { value: c.t_sw_in });
    check(&mut adv, c.t_sw_in >= 323.15, Advisory::SeawaterTemperatureHigh { value: c.t_sw_in });
    check(&mut adv, c.p_sw_in <= 50_000.0, Advisory::SeawaterPressureLow { value: c.p_sw_in });
    check(&mut adv, c.p_sw_in >= 500_000.0, Advisory::SeawaterPressureHigh { value: c.p_sw_in });
    check(&mut adv, c.teg_hot >= 473.0, Advisory::TegHotSideTooHot { value: c.teg_hot });

    let cp_sw = Fluid::new(props, WATER).sat_t(PropKey::Cpmass, c.t_sw_in, 0.0)?;
    let q_exh = engine.m_exh * c.cp_exh * (engine.exh_in - c.exh_out);

    let sources = HeatSources {
        load: point.load,
        power: c.power(point.load),
        fo_consumption: engine.fo_consumption,
        fo_baseline: engine.fo_baseline,
        exh_in: engine.exh_in,
        m_exh: engine.m_exh,
        heat_block: engine.heat_block,
        q_exh,
        t_avg_exh: log_mean(engine.exh_in, c.exh_out),
        hp_pump: point.jw_pump_pa(),
        cp_sw,
    };
    Ok((sources, adv))
}
