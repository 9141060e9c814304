//! CoolProp-based property engine.

use crate::engine::PropertyEngine;
use crate::error::{FluidError, FluidResult};
use crate::query::PropertyQuery;
use rfluids::native::CoolProp;
use whrs_core::ensure_finite;

/// CoolProp backend via the `rfluids` high-level `PropsSI` API.
///
/// Thread-safe: rfluids serializes all CoolProp FFI calls internally.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoolPropEngine;

impl CoolPropEngine {
    /// Create a new CoolProp engine.
    pub fn new() -> Self {
        Self
    }
}

impl PropertyEngine for CoolPropEngine {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn compute(&self, query: &PropertyQuery) -> FluidResult<f64> {
        let result = match query {
            PropertyQuery::Trivial { output, fluid } => CoolProp::props1_si(output.code(), fluid),
            PropertyQuery::State {
                output,
                input1,
                value1,
                input2,
                value2,
                fluid,
            } => CoolProp::props_si(
                output.code(),
                input1.code(),
                value1.get(),
                input2.code(),
                value2.get(),
                fluid,
            ),
        };

        let value = result.map_err(|e| FluidError::Backend {
            query: query.to_string(),
            message: e.to_string(),
        })?;

        ensure_finite(value, "property value").map_err(|e| FluidError::Backend {
            query: query.to_string(),
            message: e.to_string(),
        })
    }
}
