//! Aggregation errors.

use alm_core::CurveError;
use thiserror::Error;

/// Errors raised computing EVE, NII, or calibrated margins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// A required curve lookup failed while discounting a cashflow.
    #[error("discounting contract {contract_id:?}: {source}")]
    Curve {
        /// The cashflow's owning contract id.
        contract_id: String,
        /// Underlying curve error.
        #[source]
        source: CurveError,
    },

    /// A bucket's `end_years` did not exceed its `start_years`.
    #[error("invalid bucket {name:?}: end_years ({end_years}) must exceed start_years ({start_years})")]
    InvalidBucket {
        /// The offending bucket's name.
        name: String,
        /// The bucket's start, in years.
        start_years: f64,
        /// The bucket's end, in years.
        end_years: f64,
    },

    /// A fixed-rate position in the margin calibration lookback had no
    /// `fixed_rate` to derive a margin from.
    #[error("contract {contract_id}: fixed-rate position has no fixed_rate; cannot calibrate margin")]
    MissingFixedRate {
        /// The offending contract.
        contract_id: String,
    },

    /// A floating-rate position in the margin calibration lookback had no
    /// `spread` to use as its margin.
    #[error("contract {contract_id}: floating-rate position has no spread; cannot calibrate margin")]
    MissingSpread {
        /// The offending contract.
        contract_id: String,
    },

    /// Resolving the risk-free curve's 1-year rate for margin calibration failed.
    #[error("resolving risk-free 1y rate for margin calibration: {source}")]
    RiskFreeLookup {
        /// Underlying curve error.
        #[source]
        source: CurveError,
    },
}
