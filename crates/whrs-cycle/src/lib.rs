//! whrs-cycle: thermodynamic model of the marine engine waste heat recovery
//! plant.
//!
//! The plant recovers jacket water and exhaust heat through:
//! - a vacuum desalination unit
//! - a steam Rankine cycle (RC)
//! - an organic Rankine cycle (ORC) on a selectable working fluid
//! - thermoelectric generators (TEG) on the engine block
//!
//! Each subsystem is a stage function over explicit state structs returning
//! its state and the advisories it raised. [`WhrsEvaluator`] chains the
//! stages and keeps the last [`CycleReport`].
//!
//! # Example
//!
//! ```no_run
//! use whrs_cycle::{OperatingPoint, WhrsEvaluator};
//! use whrs_fluids::{CachePolicy, CoolPropEngine};
//!
//! let mut ev = WhrsEvaluator::new(CoolPropEngine::new(), CachePolicy::Memory).unwrap();
//! let point = OperatingPoint {
//!     load: 60.0,
//!     jw_pump: 3.15,
//!     rc_superheat: 8.0222,
//!     rc_subcool: 1e-4,
//!     orc_superheat: 1e-3,
//!     orc_subcool: 1e-3,
//!     orc_pump: 6.6,
//!     p_chamber: 0.2,
//!     fluid: None,
//! };
//! let h = ev.evaluate(&point).unwrap();
//! println!("{} kW, {} % CO2, EPC {}", h.whrs_cycle_output, h.co2_red, h.epc);
//! ```

pub mod advisory;
pub mod constants;
pub mod desalination;
pub mod error;
pub mod evaluator;
pub mod operating;
pub mod orc;
pub mod params;
pub mod performance;
pub mod props;
pub mod rankine;
pub mod seawater;
pub mod source;
pub mod tables;
pub mod teg;

pub use advisory::Advisory;
pub use constants::{OrcTurbineOutlet, PlantConstants};
pub use error::{CycleError, CycleResult};
pub use evaluator::{CycleReport, Headline, WhrsEvaluator};
pub use operating::{OperatingPoint, OperatingVariable, ParamRanges, Range};
pub use params::{PARAMS, ParamKind, ParamVector};
pub use performance::{Emissions, FuelSavings, Performance, SubsystemPerformance};
pub use props::PropertySource;
pub use tables::{EngineConditions, EngineTables, PerformanceTable};
