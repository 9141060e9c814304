//! Engine performance tables.
//!
//! Tabulated engine data indexed by load (%MCR), evaluated with a
//! clamp-and-linear policy: at or below the first breakpoint the first value
//! is returned, at or above the last breakpoint the last value, otherwise the
//! value is interpolated inside the bracketing interval `[x_i, x_{i+1})`.

use tracing::debug;
use whrs_core::{WhError, WhResult, ensure_finite};

const ENGINE_LOAD: [f64; 16] = [
    30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0, 80.0, 85.0, 90.0, 95.0, 100.0,
    110.0,
];

const FO_CONSUMPTION: [f64; 16] = [
    175.10, 179.04, 182.98, 186.92, 185.79, 194.80, 198.74, 202.68, 206.62, 210.56, 214.80,
    215.87, 210.27, 208.15, 206.04, 201.81,
];

const EXHAUST_TEMPERATURE: [f64; 16] = [
    600.15, 605.15, 611.15, 616.15, 622.15, 630.15, 639.15, 648.15, 657.15, 666.15, 689.15,
    672.15, 695.15, 678.15, 682.15, 699.15,
];

const EXHAUST_FLOW: [f64; 16] = [
    2.18, 2.47, 2.76, 3.05, 3.29, 3.63, 3.92, 4.21, 4.50, 4.79, 5.08, 5.45, 6.66, 5.95, 6.24, 6.82,
];

const FO_CONSUMPTION_BASELINE: [f64; 16] = [
    175.1, 179.04, 182.98, 186.92, 185.79, 194.8, 198.74, 202.68, 206.62, 210.56, 215.5, 215.87,
    210.27, 208.15, 206.04, 201.81,
];

const BLOCK_HEAT_LOAD: [f64; 4] = [0.0, 75.0, 80.0, 100.0];
const BLOCK_HEAT: [f64; 4] = [0.0, 295.93, 366.80, 369.06];

/// One tracked quantity as a function of engine load.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceTable {
    name: &'static str,
    loads: Vec<f64>,
    values: Vec<f64>,
}

impl PerformanceTable {
    /// Build a table from matching load and value columns.
    ///
    /// # Errors
    /// Fails if the columns are empty, differ in length, contain non-finite
    /// values, or the loads are not strictly increasing.
    pub fn new(name: &'static str, loads: Vec<f64>, values: Vec<f64>) -> WhResult<Self> {
        if loads.is_empty() {
            return Err(WhError::InvalidArg {
                what: "performance table needs at least one breakpoint",
            });
        }
        if loads.len() != values.len() {
            return Err(WhError::InvalidArg {
                what: "performance table columns differ in length",
            });
        }
        if loads.iter().chain(&values).any(|v| !v.is_finite()) {
            return Err(WhError::InvalidArg {
                what: "performance table contains non-finite values",
            });
        }
        if loads.windows(2).any(|w| w[0] >= w[1]) {
            return Err(WhError::Invariant {
                what: "performance table loads must be strictly increasing",
            });
        }

        Ok(Self {
            name,
            loads,
            values,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn loads(&self) -> &[f64] {
        &self.loads
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `load`, clamped to the end values outside the table.
    ///
    /// # Errors
    /// `NonFinite` for a NaN or infinite load.
    pub fn interpolate(&self, load: f64) -> WhResult<f64> {
        let load = ensure_finite(load, "engine load")?;
        let n = self.loads.len();
        if load <= self.loads[0] {
            return Ok(self.values[0]);
        }
        if load >= self.loads[n - 1] {
            return Ok(self.values[n - 1]);
        }

        // First breakpoint strictly above `load`; the clamps above keep it in 1..n.
        let i = self.loads.partition_point(|&x| x <= load);
        let (x0, x1) = (self.loads[i - 1], self.loads[i]);
        let (y0, y1) = (self.values[i - 1], self.values[i]);
        let value = y0 + (y1 - y0) * (load - x0) / (x1 - x0);

        debug!(table = self.name, load, x0, x1, value, "interpolated");
        Ok(value)
    }
}

/// Engine data at one load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConditions {
    /// Specific fuel consumption with the WHRS [g/kWh]
    pub fo_consumption: f64,
    /// Exhaust temperature at the turbocharger outlet [K]
    pub exh_in: f64,
    /// Exhaust mass flow [kg/s]
    pub m_exh: f64,
    /// Heat rejected by engine block, CAC and LOC [kW]
    pub heat_block: f64,
    /// Specific fuel consumption without the WHRS [g/kWh]
    pub fo_baseline: f64,
}

/// The five engine tables.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTables {
    pub fuel_consumption: PerformanceTable,
    pub exhaust_temperature: PerformanceTable,
    pub exhaust_flow: PerformanceTable,
    pub block_heat: PerformanceTable,
    pub fuel_consumption_baseline: PerformanceTable,
}

impl EngineTables {
    /// Tables of the reference 6-cylinder medium speed engine.
    pub fn reference() -> WhResult<Self> {
        let loads = ENGINE_LOAD.to_vec();
        Ok(Self {
            fuel_consumption: PerformanceTable::new(
                "FO_Consumption",
                loads.clone(),
                FO_CONSUMPTION.to_vec(),
            )?,
            exhaust_temperature: PerformanceTable::new(
                "TempEG",
                loads.clone(),
                EXHAUST_TEMPERATURE.to_vec(),
            )?,
            exhaust_flow: PerformanceTable::new("MaxFlowRate", loads.clone(), EXHAUST_FLOW.to_vec())?,
            block_heat: PerformanceTable::new(
                "Engine_block",
                BLOCK_HEAT_LOAD.to_vec(),
                BLOCK_HEAT.to_vec(),
            )?,
            fuel_consumption_baseline: PerformanceTable::new(
                "FO_consumption_WO",
                loads,
                FO_CONSUMPTION_BASELINE.to_vec(),
            )?,
        })
    }

    pub fn at(&self, load: f64) -> WhResult<EngineConditions> {
        Ok(EngineConditions {
            fo_consumption: self.fuel_consumption.interpolate(load)?,
            exh_in: self.exhaust_temperature.interpolate(load)?,
            m_exh: self.exhaust_flow.interpolate(load)?,
            heat_block: self.block_heat.interpolate(load)?,
            fo_baseline: self.fuel_consumption_baseline.interpolate(load)?,
        })
    }
}
