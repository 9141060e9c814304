//! whrs-core: shared foundation for the waste heat recovery workspace.
//!
//! - units: bar and Celsius inputs converted through `uom`
//! - numeric: finiteness check and the logarithmic mean temperature
//! - error: shared error type

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{WhError, WhResult};
pub use numeric::*;
pub use units::*;
