//! Fluid property errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// The property backend could not resolve the requested state.
    #[error("Backend error for {query}: {message}")]
    Backend { query: String, message: String },

    /// Fluid index outside the registry.
    #[error("Fluid index {index} out of range [0, {max}]")]
    UnknownFluid { index: i64, max: usize },

    /// Fluid display name or code not in the registry.
    #[error("Unknown fluid: {name}")]
    UnknownFluidName { name: String },

    /// Reading or writing the persisted property cache failed.
    #[error("Property cache persistence failed for {path}: {message}")]
    Persistence { path: PathBuf, message: String },
}
