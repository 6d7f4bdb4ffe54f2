//! xf-core: shared foundation for xylemflow.
//!
//! Contains:
//! - error (shared error type)
//! - numeric (Real + float helpers + grid points)
//! - units (uom SI pressure + MPa constructors)
//! - stats (bounded-series statistics)
//! - curve (sorted (x, y) curve helpers)
//! - timing (opt-in wall clock timers)

pub mod curve;
pub mod error;
pub mod numeric;
pub mod stats;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use curve::CurvePoint;
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
