//! Error types for cycle evaluation.

use thiserror::Error;
use whrs_core::WhError;
use whrs_fluids::FluidError;

/// Errors that abort a cycle evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    /// Operating variable or fluid index outside its validity interval.
    #[error("{field}={value} out of range [{min}, {max}]")]
    RangeViolation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The operating point leads to a physically inconsistent plant state.
    #[error("Physical inconsistency: {what} ({value} vs limit {limit})")]
    PhysicalInconsistency {
        what: &'static str,
        value: f64,
        limit: f64,
    },

    /// The property engine could not resolve a requested state.
    #[error("Property engine failure: {0}")]
    Property(#[from] FluidError),

    #[error(transparent)]
    Core(#[from] WhError),
}

pub type CycleResult<T> = Result<T, CycleError>;

impl CycleError {
    /// True for errors that mark an operating point infeasible rather than
    /// a misconfigured evaluator.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::RangeViolation { .. } | Self::PhysicalInconsistency { .. } | Self::Property(_)
        )
    }
}
