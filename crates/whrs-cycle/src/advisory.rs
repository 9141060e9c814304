//! Plausibility advisories.
//!
//! Advisories flag values outside their documented operating bands. They never
//! stop an evaluation: each one is logged through `tracing` when raised and
//! collected in the [`CycleReport`](crate::CycleReport).

use serde::Serialize;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    ExhaustTemperatureLow { value: f64 },
    ExhaustTemperatureHigh { value: f64 },
    ExhaustFlowLow { value: f64 },
    ExhaustFlowHigh { value: f64 },
    JacketWaterTemperatureLow { value: f64 },
    JacketWaterTemperatureHigh { value: f64 },
    SeawaterTemperatureLow { value: f64 },
    SeawaterTemperatureHigh { value: f64 },
    SeawaterPressureLow { value: f64 },
    SeawaterPressureHigh { value: f64 },
    TegHotSideTooHot { value: f64 },
    JacketWaterPressureHigh { value: f64 },
    ChamberPressureLow { value: f64 },
    ChamberPressureHigh { value: f64 },
    PinchPointLow { value: f64 },
    PinchPointHigh { value: f64 },
    RcSuperheatLow { value: f64 },
    RcSuperheatHigh { value: f64 },
    RcSubcoolLow { value: f64 },
    RcSubcoolHigh { value: f64 },
    PumpEfficiencyLow { value: f64 },
    PumpEfficiencyHigh { value: f64 },
    OrcSuperheatLow { value: f64 },
    OrcSuperheatHigh { value: f64 },
    OrcSubcoolLow { value: f64 },
    OrcSubcoolHigh { value: f64 },
    Supercritical { t_crit: f64, t_evaporator_out: f64 },
    TegOccupancy { percent: f64 },
    TegTemperaturesInconsistent { hot: f64, cold: f64 },
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ExhaustTemperatureLow { .. } => "exhaust gas temperature is too low",
            Self::ExhaustTemperatureHigh { .. } => "exhaust gas temperature is too high",
            Self::ExhaustFlowLow { .. } => "exhaust gas mass flow is too low",
            Self::ExhaustFlowHigh { .. } => "exhaust gas mass flow is too high",
            Self::JacketWaterTemperatureLow { .. } => "jacket water temperature is too low",
            Self::JacketWaterTemperatureHigh { .. } => "jacket water temperature is too high",
            Self::SeawaterTemperatureLow { .. } => "seawater temperature is too low",
            Self::SeawaterTemperatureHigh { .. } => "seawater temperature is too high",
            Self::SeawaterPressureLow { .. } => "seawater pressure is too low",
            Self::SeawaterPressureHigh { .. } => "seawater pressure is too high",
            Self::TegHotSideTooHot { .. } => "thermoelectric modules cannot withstand over 200 °C",
            Self::JacketWaterPressureHigh { .. } => {
                "jacket water pressure is too high for the desalination equipment"
            }
            Self::ChamberPressureLow { .. } => "chamber vacuum is beyond the device limit",
            Self::ChamberPressureHigh { .. } => "chamber pressure is too high for desalination",
            Self::PinchPointLow { .. } => "desalination pinch point is too low",
            Self::PinchPointHigh { .. } => "desalination pinch point is too high",
            Self::RcSuperheatLow { .. } => "Rankine superheating is too low",
            Self::RcSuperheatHigh { .. } => "Rankine superheating is too high",
            Self::RcSubcoolLow { .. } => "Rankine subcooling is too low",
            Self::RcSubcoolHigh { .. } => "Rankine subcooling is too high",
            Self::PumpEfficiencyLow { .. } => "pump efficiency is too low",
            Self::PumpEfficiencyHigh { .. } => "pump efficiency is too high",
            Self::OrcSuperheatLow { .. } => "organic Rankine superheating is too low",
            Self::OrcSuperheatHigh { .. } => "organic Rankine superheating is too high",
            Self::OrcSubcoolLow { .. } => "organic Rankine subcooling is too low",
            Self::OrcSubcoolHigh { .. } => "organic Rankine subcooling is too high",
            Self::Supercritical { .. } => "organic Rankine cycle is supercritical",
            Self::TegOccupancy { .. } => "installed TEGs exceed the engine area",
            Self::TegTemperaturesInconsistent { .. } => {
                "TEG cold side is not colder than the hot side"
            }
        }
    }

    /// Log the advisory and add it to `sink`.
    pub(crate) fn raise(self, sink: &mut Vec<Advisory>) {
        warn!(advisory = %self, "plausibility advisory");
        sink.push(self);
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Supercritical {
                t_crit,
                t_evaporator_out,
            } => write!(
                f,
                "{} (Tcrit={t_crit} K < T_ORC3={t_evaporator_out} K)",
                self.message()
            ),
            Self::TegTemperaturesInconsistent { hot, cold } => {
                write!(f, "{} (hot={hot} K, cold={cold} K)", self.message())
            }
            Self::TegOccupancy { percent } => write!(f, "{} ({percent} %)", self.message()),
            Self::ExhaustTemperatureLow { value }
            | Self::ExhaustTemperatureHigh { value }
            | Self::ExhaustFlowLow { value }
            | Self::ExhaustFlowHigh { value }
            | Self::JacketWaterTemperatureLow { value }
            | Self::JacketWaterTemperatureHigh { value }
            | Self::SeawaterTemperatureLow { value }
            | Self::SeawaterTemperatureHigh { value }
            | Self::SeawaterPressureLow { value }
            | Self::SeawaterPressureHigh { value }
            | Self::TegHotSideTooHot { value }
            | Self::JacketWaterPressureHigh { value }
            | Self::ChamberPressureLow { value }
            | Self::ChamberPressureHigh { value }
            | Self::PinchPointLow { value }
            | Self::PinchPointHigh { value }
            | Self::RcSuperheatLow { value }
            | Self::RcSuperheatHigh { value }
            | Self::RcSubcoolLow { value }
            | Self::RcSubcoolHigh { value }
            | Self::PumpEfficiencyLow { value }
            | Self::PumpEfficiencyHigh { value }
            | Self::OrcSuperheatLow { value }
            | Self::OrcSuperheatHigh { value }
            | Self::OrcSubcoolLow { value }
            | Self::OrcSubcoolHigh { value } => write!(f, "{} ({value})", self.message()),
        }
    }
}

/// Raise `advisory` when `condition` holds.
pub(crate) fn check(sink: &mut Vec<Advisory>, condition: bool, advisory: Advisory) {
    if condition {
        advisory.raise(sink);
    }
}

/// Superheat and subcooling band shared by both Rankine cycles.
pub(crate) const SUPERHEAT_BAND: (f64, f64) = (0.0, 25.0);
