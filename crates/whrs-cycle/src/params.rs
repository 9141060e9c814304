//! Named parameter vector of one evaluation.

use serde::Serialize;
use std::fmt;

/// Role of a parameter, written as a suffix in the CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamKind {
    Input,
    Calculated,
    Fixed,
    Output,
}

impl ParamKind {
    pub fn suffix(self) -> &'static str {
        match self {
            ParamKind::Input => "i",
            ParamKind::Calculated => "c",
            ParamKind::Fixed => "f",
            ParamKind::Output => "o",
        }
    }
}

/// Parameter names and kinds, in vector order.
pub const PARAMS: [(&str, ParamKind); 26] = [
    ("Load", ParamKind::Input),
    ("FO_Consumption", ParamKind::Calculated),
    ("Exh_in", ParamKind::Calculated),
    ("m_exh", ParamKind::Calculated),
    ("T_D2", ParamKind::Fixed),
    ("JW_pump", ParamKind::Input),
    ("Pump_eff", ParamKind::Fixed),
    ("Heat_block", ParamKind::Calculated),
    ("T_sw_in", ParamKind::Fixed),
    ("P_sw_in", ParamKind::Fixed),
    ("Power", ParamKind::Calculated),
    ("RC_Superheat", ParamKind::Input),
    ("RC_Subcool", ParamKind::Input),
    ("ORC_Superheat", ParamKind::Input),
    ("ORC_Subcool", ParamKind::Input),
    ("ORC_Pump", ParamKind::Input),
    ("ORC_Pump_eff", ParamKind::Fixed),
    ("P_chamber", ParamKind::Input),
    ("Pinch_point_des", ParamKind::Fixed),
    ("T_des_surface", ParamKind::Fixed),
    ("N_TEG", ParamKind::Fixed),
    ("TEG_hot", ParamKind::Fixed),
    ("TEG_cold", ParamKind::Calculated),
    ("WHRS_cycle_output", ParamKind::Output),
    ("CO2_red", ParamKind::Output),
    ("EPC", ParamKind::Output),
];

/// The 26 parameters of the last evaluation, in [`PARAMS`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamVector {
    values: [f64; 26],
}

impl ParamVector {
    pub fn new(values: [f64; 26]) -> Self {
        Self { values }
    }

    /// Comma separated `Name_kind` header.
    pub fn header() -> String {
        PARAMS
            .iter()
            .map(|(name, kind)| format!("{name}_{}", kind.suffix()))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn values(&self) -> &[f64; 26] {
        &self.values
    }

    pub fn to_csv_row(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Value by bare name (`"TEG_cold"`) or header name (`"TEG_cold_c"`).
    pub fn get(&self, name: &str) -> Option<f64> {
        PARAMS
            .iter()
            .position(|(n, kind)| {
                *n == name
                    || name
                        .strip_suffix(kind.suffix())
                        .and_then(|s| s.strip_suffix('_'))
                        == Some(*n)
            })
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ParamKind, f64)> + '_ {
        PARAMS
            .iter()
            .zip(self.values.iter())
            .map(|(&(name, kind), &v)| (name, kind, v))
    }
}

impl fmt::Display for ParamVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, _, v) in self.iter() {
            writeln!(f, "{name:<20} {v}")?;
        }
        Ok(())
    }
}
