//! Operating point and validity ranges.

use crate::error::{CycleError, CycleResult};
use serde::Serialize;
use std::fmt;
use whrs_core::{WhError, bar, to_pa};

/// Control variables of one evaluation.
///
/// `jw_pump`, `orc_pump` and `p_chamber` are bar-equivalent values; the
/// evaluator converts them to Pa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingPoint {
    /// Engine load [%MCR]
    pub load: f64,
    /// Jacket water pump pressure rise [bar]
    pub jw_pump: f64,
    pub rc_superheat: f64,
    pub rc_subcool: f64,
    pub orc_superheat: f64,
    pub orc_subcool: f64,
    /// ORC pump pressure rise [bar]
    pub orc_pump: f64,
    /// Desalination chamber pressure [bar]
    pub p_chamber: f64,
    /// ORC working fluid; the registry default when `None`.
    pub fluid: Option<i64>,
}

impl OperatingPoint {
    pub fn with_fluid(mut self, fluid: i64) -> Self {
        self.fluid = Some(fluid);
        self
    }

    pub fn jw_pump_pa(&self) -> f64 {
        to_pa(bar(self.jw_pump))
    }

    pub fn orc_pump_pa(&self) -> f64 {
        to_pa(bar(self.orc_pump))
    }

    pub fn p_chamber_pa(&self) -> f64 {
        to_pa(bar(self.p_chamber))
    }

    pub fn get(&self, var: OperatingVariable) -> f64 {
        match var {
            OperatingVariable::Load => self.load,
            OperatingVariable::JwPump => self.jw_pump,
            OperatingVariable::RcSuperheat => self.rc_superheat,
            OperatingVariable::RcSubcool => self.rc_subcool,
            OperatingVariable::OrcSuperheat => self.orc_superheat,
            OperatingVariable::OrcSubcool => self.orc_subcool,
            OperatingVariable::OrcPump => self.orc_pump,
            OperatingVariable::PChamber => self.p_chamber,
        }
    }

    pub fn set(&mut self, var: OperatingVariable, value: f64) {
        let slot = match var {
            OperatingVariable::Load => &mut self.load,
            OperatingVariable::JwPump => &mut self.jw_pump,
            OperatingVariable::RcSuperheat => &mut self.rc_superheat,
            OperatingVariable::RcSubcool => &mut self.rc_subcool,
            OperatingVariable::OrcSuperheat => &mut self.orc_superheat,
            OperatingVariable::OrcSubcool => &mut self.orc_subcool,
            OperatingVariable::OrcPump => &mut self.orc_pump,
            OperatingVariable::PChamber => &mut self.p_chamber,
        };
        *slot = value;
    }
}

/// The eight continuous control variables, in evaluation argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingVariable {
    Load,
    JwPump,
    RcSuperheat,
    RcSubcool,
    OrcSuperheat,
    OrcSubcool,
    OrcPump,
    PChamber,
}

impl OperatingVariable {
    pub const ALL: [OperatingVariable; 8] = [
        Self::Load,
        Self::JwPump,
        Self::RcSuperheat,
        Self::RcSubcool,
        Self::OrcSuperheat,
        Self::OrcSubcool,
        Self::OrcPump,
        Self::PChamber,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Load => "Load",
            Self::JwPump => "JW_pump",
            Self::RcSuperheat => "RC_Superheat",
            Self::RcSubcool => "RC_Subcool",
            Self::OrcSuperheat => "ORC_Superheat",
            Self::OrcSubcool => "ORC_Subcool",
            Self::OrcPump => "ORC_Pump",
            Self::PChamber => "P_chamber",
        }
    }

    /// Parse a variable name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name.trim()))
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OperatingVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed validity interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// True when the interval is a single value.
    pub fn is_pinned(&self) -> bool {
        self.min == self.max
    }
}

/// Validity intervals of the eight control variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamRanges {
    ranges: [Range; 8],
}

impl Default for ParamRanges {
    fn default() -> Self {
        Self {
            ranges: [
                Range::new(50.0, 100.0),
                Range::new(3.15, 4.15),
                Range::new(1e-4, 25.0),
                Range::new(1e-4, 10.0),
                Range::new(1e-4, 25.0),
                Range::new(1e-4, 10.0),
                Range::new(5.59, 6.6),
                Range::new(0.09, 0.2),
            ],
        }
    }
}

impl ParamRanges {
    pub fn get(&self, var: OperatingVariable) -> Range {
        self.ranges[var.index()]
    }

    /// Replace the interval of `var`. `min == max` pins the variable.
    pub fn set(&mut self, var: OperatingVariable, min: f64, max: f64) -> CycleResult<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(WhError::InvalidArg {
                what: "range bounds must be finite",
            }
            .into());
        }
        if min > max {
            return Err(WhError::InvalidArg {
                what: "range minimum exceeds maximum",
            }
            .into());
        }
        self.ranges[var.index()] = Range::new(min, max);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (OperatingVariable, Range)> + '_ {
        OperatingVariable::ALL.into_iter().map(|v| (v, self.get(v)))
    }

    pub fn check(&self, var: OperatingVariable, value: f64) -> CycleResult<()> {
        let range = self.get(var);
        if range.contains(value) {
            Ok(())
        } else {
            Err(CycleError::RangeViolation {
                field: var.name(),
                value,
                min: range.min,
                max: range.max,
            })
        }
    }

    /// Check every continuous variable, in argument order.
    pub fn validate(&self, point: &OperatingPoint) -> CycleResult<()> {
        for var in OperatingVariable::ALL {
            self.check(var, point.get(var))?;
        }
        Ok(())
    }
}
