//! Forward curves: pillar data, log-linear discounting, and grouped
//! curve sets keyed by index name.

mod curve;
mod curve_set;
mod error;

pub use curve::{CurvePoint, ForwardCurve};
pub use curve_set::ForwardCurveSet;
pub use error::CurveError;
