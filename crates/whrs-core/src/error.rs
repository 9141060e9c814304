use thiserror::Error;

pub type WhResult<T> = Result<T, WhError>;

/// Failures of the shared numeric helpers and of table or range setup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WhError {
    #[error("{what} is not a finite number: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("table invariant broken: {what}")]
    Invariant { what: &'static str },
}
