//! Fixed plant data.
//!
//! Temperatures in K, pressures in Pa, heat capacities in kJ/(kg·K), mass
//! flows in kg/s and powers in kW unless stated otherwise.

use serde::Serialize;
use whrs_core::{bar, celsius, to_k, to_pa};

/// Stefan-Boltzmann constant [W/(m²·K⁴)]
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// How the ORC turbine outlet enthalpy follows from the isentropic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrcTurbineOutlet {
    /// `h4 = h3 + eff * (h4s - h3)`
    #[default]
    Efficiency,
    /// `h4 = h3 + eff * (h4s - h3) / 1000`, as written into historical case
    /// files. Leaves the outlet almost at the inlet enthalpy.
    Legacy,
}

impl OrcTurbineOutlet {
    /// Outlet enthalpy [kJ/kg] from inlet and isentropic outlet enthalpies.
    pub fn outlet_enthalpy(self, h_in: f64, h_out_s: f64, eff: f64) -> f64 {
        match self {
            Self::Efficiency => h_in + eff * (h_out_s - h_in),
            Self::Legacy => h_in + eff * (h_out_s - h_in) / 1000.0,
        }
    }
}

/// Constants of the engine, the heat sinks and the four recovery subsystems.
#[derive(Debug, Clone, Serialize)]
pub struct PlantConstants {
    // Engine and jacket water
    /// Jacket water temperature at the engine outlet
    pub t_d2: f64,
    pub jw_pump_eff: f64,
    /// Jacket water temperature at the engine inlet and desalination outlet
    pub t_jw_return: f64,
    pub m_jw: f64,
    pub cp_jw: f64,
    /// Engine rated power [kW]
    pub rated_power: f64,
    /// Jacket water pressure loss through the engine
    pub engine_dp: f64,
    /// Pressure loss of every heat exchanger pass
    pub exchanger_dp: f64,

    // Exhaust gas
    /// Exhaust temperature at the RC evaporator outlet
    pub exh_out: f64,
    /// Acid dew point
    pub exh_min: f64,
    pub cp_exh: f64,

    // Seawater
    pub t_sw_in: f64,
    pub p_sw_in: f64,
    pub m_sw: f64,
    pub sw_density: f64,
    pub sw_pump_eff: f64,

    // Ambient
    pub t_env: f64,
    pub p_env: f64,

    // Rankine cycles
    pub orc_pump_eff: f64,
    pub turbine_eff: f64,
    pub generator_eff: f64,
    /// ORC condensation approach above the seawater inlet
    pub orc_condenser_approach: f64,
    pub orc_turbine_outlet: OrcTurbineOutlet,

    // Desalination
    pub pinch_des: f64,
    pub t_des_surface: f64,
    pub des_emissivity: f64,
    /// One-phase evaporator constant
    pub kjw: f64,
    pub des_area: f64,
    /// Fresh water generator capacity [m³/day]
    pub daily_cap: f64,
    pub w_des_pump: f64,

    // Thermoelectric generators
    pub n_teg: f64,
    pub teg_hot: f64,
    /// Area of one 40x40 mm module [m²]
    pub a_teg: f64,
    /// Area of engine block, CAC and LOC [m²]
    pub a_engine: f64,

    // Emissions and economics
    /// kg CO2 per kg fuel
    pub co2_factor: f64,
    pub ctot: f64,
    pub crf: f64,
    pub fk: f64,
    /// Operating hours per year
    pub hours: f64,

    // Limits of the seawater leaving the plant
    pub t_sw_out_max: f64,
    pub p_sw_out_min: f64,
}

impl Default for PlantConstants {
    fn default() -> Self {
        Self {
            t_d2: 369.15,
            jw_pump_eff: 0.75,
            t_jw_return: to_k(celsius(55.0)),
            m_jw: 16.685,
            cp_jw: 4.05,
            rated_power: 3000.0,
            engine_dp: 55_000.0,
            exchanger_dp: 10_000.0,

            exh_out: 413.0,
            exh_min: 403.15,
            cp_exh: 1.185,

            t_sw_in: to_k(celsius(15.13)),
            p_sw_in: to_pa(bar(2.4)),
            m_sw: 11.62,
            sw_density: 1025.0,
            sw_pump_eff: 0.8,

            t_env: 298.15,
            p_env: 100_000.0,

            orc_pump_eff: 0.75,
            turbine_eff: 0.8,
            generator_eff: 0.96,
            orc_condenser_approach: 5.0,
            orc_turbine_outlet: OrcTurbineOutlet::Efficiency,

            pinch_des: 10.0,
            t_des_surface: to_k(celsius(60.0)),
            des_emissivity: 0.84,
            kjw: 25.6,
            des_area: 4.8,
            daily_cap: 22.0,
            w_des_pump: 10.4,

            n_teg: 100.0,
            teg_hot: to_k(celsius(61.965)),
            a_teg: 0.0016,
            a_engine: 35.81,

            co2_factor: 3.206,
            ctot: 76_580.6116,
            crf: 0.133_878_78,
            fk: 8.0,
            hours: 5000.0,

            t_sw_out_max: 333.15,
            p_sw_out_min: 100_000.0,
        }
    }
}

impl PlantConstants {
    /// Engine shaft power at `load` %MCR [kW].
    pub fn power(&self, load: f64) -> f64 {
        self.rated_power * (load / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_in_kelvin_and_pascal() {
        let c = PlantConstants::default();
        assert!((c.t_sw_in - 288.28).abs() < 1e-9);
        assert!((c.teg_hot - 335.115).abs() < 1e-9);
        assert!((c.t_jw_return - 328.15).abs() < 1e-9);
        assert!((c.p_sw_in - 240_000.0).abs() < 1e-6);
    }

    #[test]
    fn orc_outlet_modes() {
        let eff = OrcTurbineOutlet::Efficiency.outlet_enthalpy(400.0, 300.0, 0.8);
        let legacy = OrcTurbineOutlet::Legacy.outlet_enthalpy(400.0, 300.0, 0.8);
        assert!((eff - 320.0).abs() < 1e-12);
        assert!((legacy - 399.92).abs() < 1e-12);
        assert_eq!(PlantConstants::default().orc_turbine_outlet, OrcTurbineOutlet::Efficiency);
    }

    #[test]
    fn power_scales_with_load() {
        let c = PlantConstants::default();
        assert!((c.power(60.0) - 1800.0).abs() < 1e-9);
        assert!((c.power(100.0) - 3000.0).abs() < 1e-9);
    }
}
