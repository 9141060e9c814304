//! Property query keys.
//!
//! A [`PropertyQuery`] is the exact argument tuple of a property call. It is
//! hashable and compares numeric state values by bit pattern, so it can key
//! the memo in [`PropertyCache`](crate::PropertyCache) and be persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Property names understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropKey {
    /// Temperature [K]
    T,
    /// Pressure [Pa]
    P,
    /// Vapor quality [-]
    Q,
    /// Mass specific enthalpy [J/kg]
    H,
    /// Mass specific entropy [J/(kg·K)]
    S,
    /// Mass density [kg/m³]
    D,
    /// Mass specific isobaric heat capacity [J/(kg·K)]
    Cpmass,
    /// Critical temperature [K]
    Tcrit,
}

impl PropKey {
    /// The CoolProp parameter string.
    pub fn code(self) -> &'static str {
        match self {
            Self::T => "T",
            Self::P => "P",
            Self::Q => "Q",
            Self::H => "H",
            Self::S => "S",
            Self::D => "D",
            Self::Cpmass => "Cpmass",
            Self::Tcrit => "Tcrit",
        }
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A state variable value with bitwise equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateValue(f64);

impl StateValue {
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for StateValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for StateValue {}

impl Hash for StateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Exact argument tuple of a property call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyQuery {
    /// Fluid constant, e.g. the critical temperature.
    Trivial { output: PropKey, fluid: String },

    /// Property at the state fixed by two state variables.
    State {
        output: PropKey,
        input1: PropKey,
        value1: StateValue,
        input2: PropKey,
        value2: StateValue,
        fluid: String,
    },
}

impl PropertyQuery {
    pub fn trivial(output: PropKey, fluid: impl Into<String>) -> Self {
        Self::Trivial {
            output,
            fluid: fluid.into(),
        }
    }

    pub fn state(
        output: PropKey,
        input1: PropKey,
        value1: f64,
        input2: PropKey,
        value2: f64,
        fluid: impl Into<String>,
    ) -> Self {
        Self::State {
            output,
            input1,
            value1: StateValue::new(value1),
            input2,
            value2: StateValue::new(value2),
            fluid: fluid.into(),
        }
    }

    pub fn output(&self) -> PropKey {
        match self {
            Self::Trivial { output, .. } | Self::State { output, .. } => *output,
        }
    }

    pub fn fluid(&self) -> &str {
        match self {
            Self::Trivial { fluid, .. } | Self::State { fluid, .. } => fluid,
        }
    }
}

impl fmt::Display for PropertyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trivial { output, fluid } => write!(f, "PropsSI({output}, {fluid})"),
            Self::State {
                output,
                input1,
                value1,
                input2,
                value2,
                fluid,
            } => write!(
                f,
                "PropsSI({output}, {input1}={}, {input2}={}, {fluid})",
                value1.get(),
                value2.get()
            ),
        }
    }
}
