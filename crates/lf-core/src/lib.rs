//! lf-core: stable foundation for linerflow.
//!
//! Contains:
//! - numeric (Real + lenient decimal parsing)
//! - units (pressure conversion for the two display unit systems)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
