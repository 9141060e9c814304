//! Working fluid registry for the organic Rankine cycle.

use crate::error::{FluidError, FluidResult};
use serde::Serialize;
use tracing::debug;

/// Property-engine code of the steam cycle, jacket water and seawater.
pub const WATER: &str = "Water";

/// Index of Cyclohexane, the default ORC working fluid.
pub const DEFAULT_FLUID_INDEX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FluidSpec {
    pub display_name: &'static str,
    /// Identifier passed to the property engine.
    pub code: &'static str,
}

impl FluidSpec {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        self.display_name.eq_ignore_ascii_case(query) || self.code.eq_ignore_ascii_case(query)
    }
}

const ORC_FLUIDS: [FluidSpec; 16] = [
    FluidSpec {
        display_name: "Ammonia",
        code: "ammonia",
    },
    FluidSpec {
        display_name: "Cyclohexane",
        code: "Cyclohexane",
    },
    FluidSpec {
        display_name: "Hexane",
        code: "Hexane",
    },
    FluidSpec {
        display_name: "Propane",
        code: "Propane",
    },
    FluidSpec {
        display_name: "Propylene",
        code: "propylene",
    },
    FluidSpec {
        display_name: "Toluene",
        code: "toluene",
    },
    FluidSpec {
        display_name: "R1233zd(E)",
        code: "R1233zdE",
    },
    FluidSpec {
        display_name: "R1234ZE(Z)",
        code: "R1234ZE(Z)",
    },
    FluidSpec {
        display_name: "R1234Yf",
        code: "R1234YF",
    },
    FluidSpec {
        display_name: "R161",
        code: "Fluoroethane",
    },
    FluidSpec {
        display_name: "IsoButane",
        code: "isobutane",
    },
    FluidSpec {
        display_name: "Dimethyl Ether",
        code: "DIMETHYLETHER",
    },
    FluidSpec {
        display_name: "n-Pentane",
        code: "nPentane",
    },
    FluidSpec {
        display_name: "1,2-Dichloroethane",
        code: "1,2-dichloroethane",
    },
    FluidSpec {
        display_name: "Novec 649",
        code: "NOVEC649",
    },
    FluidSpec {
        display_name: "SES36",
        code: "SES36",
    },
];

/// Fixed catalogue of ORC working fluids with a selectable default.
#[derive(Debug, Clone)]
pub struct FluidRegistry {
    fluids: &'static [FluidSpec],
    default: usize,
}

impl Default for FluidRegistry {
    fn default() -> Self {
        Self {
            fluids: &ORC_FLUIDS,
            default: DEFAULT_FLUID_INDEX,
        }
    }
}

impl FluidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fluids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fluids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FluidSpec> {
        self.fluids.iter()
    }

    /// Fluid at `index`, or an out-of-range error.
    pub fn get(&self, index: i64) -> FluidResult<&FluidSpec> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.fluids.get(i))
            .ok_or(FluidError::UnknownFluid {
                index,
                max: self.fluids.len() - 1,
            })
    }

    /// Index of the fluid whose display name or code matches `name`.
    pub fn find(&self, name: &str) -> FluidResult<usize> {
        self.fluids
            .iter()
            .position(|f| f.matches_query(name))
            .ok_or_else(|| FluidError::UnknownFluidName {
                name: name.to_string(),
            })
    }

    /// Select the default fluid. Fails unless `index` is in `[0, len - 1]`.
    pub fn set_default(&mut self, index: i64) -> FluidResult<()> {
        let spec = *self.get(index)?;
        self.default = index as usize;
        debug!(fluid = spec.display_name, code = spec.code, "default fluid selected");
        Ok(())
    }

    pub fn default_index(&self) -> usize {
        self.default
    }

    pub fn default_spec(&self) -> &FluidSpec {
        &self.fluids[self.default]
    }

    pub fn default_code(&self) -> &'static str {
        self.default_spec().code
    }

    pub fn default_name(&self) -> &'static str {
        self.default_spec().display_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_fluids_with_cyclohexane_default() {
        let registry = FluidRegistry::new();
        assert_eq!(registry.len(), 16);
        assert_eq!(registry.default_name(), "Cyclohexane");
        assert_eq!(registry.default_code(), "Cyclohexane");
    }

    #[test]
    fn set_default_rejects_out_of_range() {
        let mut registry = FluidRegistry::new();
        let n = registry.len() as i64;
        assert!(matches!(
            registry.set_default(-1),
            Err(FluidError::UnknownFluid { index: -1, max: 15 })
        ));
        assert!(registry.set_default(n).is_err());
        assert_eq!(registry.default_index(), DEFAULT_FLUID_INDEX);
    }

    #[test]
    fn every_valid_index_is_selectable() {
        let mut registry = FluidRegistry::new();
        for i in 0..registry.len() {
            registry.set_default(i as i64).unwrap();
            assert_eq!(registry.default_code(), registry.get(i as i64).unwrap().code);
        }
        registry.set_default(9).unwrap();
        assert_eq!(registry.default_code(), "Fluoroethane");
        assert_eq!(registry.default_name(), "R161");
    }

    #[test]
    fn find_by_name_or_code() {
        let registry = FluidRegistry::new();
        assert_eq!(registry.find("toluene").unwrap(), 5);
        assert_eq!(registry.find("Novec 649").unwrap(), 14);
        assert_eq!(registry.find("r1233zde").unwrap(), 6);
        assert!(registry.find("R134a").is_err());
    }
}
