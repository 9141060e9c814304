//! whrs-fluids: fluid property lookups for the waste heat recovery model.
//!
//! Provides:
//! - A tagged, hashable property query ([`PropertyQuery`]) mirroring the
//!   one- and five-argument forms of CoolProp's `PropsSI`
//! - The [`PropertyEngine`] trait isolating the rest of the workspace from
//!   the property backend
//! - A CoolProp backend via `rfluids`
//! - A memoizing [`PropertyCache`] with none / memory / file policies
//! - The working fluid registry used by the organic Rankine cycle
//!
//! # Example
//!
//! ```no_run
//! use whrs_fluids::{CachePolicy, CoolPropEngine, PropKey, PropertyCache, PropertyQuery};
//!
//! let mut cache = PropertyCache::new(CoolPropEngine::new(), CachePolicy::Memory).unwrap();
//! let q = PropertyQuery::state(PropKey::T, PropKey::Q, 1.0, PropKey::P, 20_000.0, "Water");
//! let t_sat = cache.lookup(&q).unwrap();
//! println!("Saturation temperature: {t_sat} K");
//! ```

pub mod cache;
pub mod catalog;
pub mod coolprop;
pub mod engine;
pub mod error;
pub mod query;

// Re-exports for ergonomics
pub use cache::{CachePolicy, PropertyCache};
pub use catalog::{FluidRegistry, FluidSpec, DEFAULT_FLUID_INDEX, WATER};
pub use coolprop::CoolPropEngine;
pub use engine::{CountingEngine, PropertyEngine};
pub use error::{FluidError, FluidResult};
pub use query::{PropKey, PropertyQuery, StateValue};
