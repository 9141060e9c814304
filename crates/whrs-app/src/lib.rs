//! Collaborator layer over the WHRS cycle evaluator.
//!
//! Search, sweep and verification code uses the evaluator as an opaque,
//! possibly failing function. This crate provides:
//! - a weighted rank objective with an optional pinned load
//! - Pareto dominance of headline outputs
//! - single-variable sweeps
//! - the CSV cross-check of stored cases
//! - CSV / JSON report rows for the CLI

pub mod crosscheck;
pub mod error;
pub mod objective;
pub mod pareto;
pub mod report;
pub mod sweep;

pub use crosscheck::{CrossCheck, CsvTable, Mismatch, RowCheck, parse_csv};
pub use error::{AppError, AppResult};
pub use objective::RankObjective;
pub use pareto::{Dominance, decided_pairs, dominance};
pub use report::{ReportRow, write_csv, write_json};
pub use sweep::{SweepDefinition, SweepOutcome, SweepPoint, SweepType, run_sweep};
