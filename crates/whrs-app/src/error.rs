//! Error types for the whrs-app service layer.

use std::path::PathBuf;
use whrs_cycle::CycleError;
use whrs_fluids::FluidError;

/// Application error wrapping the backend crates for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Evaluation failed: {0}")]
    Cycle(#[from] CycleError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for whrs-app operations.
pub type AppResult<T> = Result<T, AppError>;
