//! Curve construction and lookup errors.

use thiserror::Error;

/// Errors raised building or querying a [`super::curve::ForwardCurve`] or
/// [`super::curve_set::ForwardCurveSet`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A curve was built with zero pillar points.
    #[error("curve {index_name:?} has no pillar points")]
    EmptyCurve {
        /// The curve's index name.
        index_name: String,
    },

    /// Two pillars shared the same year fraction.
    #[error("curve {index_name:?} has duplicate pillar at t={t}")]
    DuplicatePillar {
        /// The curve's index name.
        index_name: String,
        /// The duplicated year fraction.
        t: f64,
    },

    /// Pillars were not supplied in strictly increasing year-fraction order.
    #[error("curve {index_name:?} pillars are not strictly increasing in year fraction (t={t} did not exceed the previous pillar)")]
    NonIncreasingPillars {
        /// The curve's index name.
        index_name: String,
        /// The offending year fraction.
        t: f64,
    },

    /// A pillar's year fraction was not strictly positive.
    #[error("curve {index_name:?} has non-positive year fraction {t}")]
    NonPositiveYearFraction {
        /// The curve's index name.
        index_name: String,
        /// The offending year fraction.
        t: f64,
    },

    /// A query used a negative time.
    #[error("queried curve {index_name:?} at negative time t={t}")]
    NegativeTime {
        /// The curve's index name.
        index_name: String,
        /// The offending query time.
        t: f64,
    },

    /// The requested index name is absent from the curve set.
    #[error("curve set has no index named {index_name:?}; available: {available:?}")]
    UnknownIndex {
        /// The requested index name.
        index_name: String,
        /// Index names actually present.
        available: Vec<String>,
    },

    /// No discount curve has been designated for the set.
    #[error("curve set has no discount curve designated and no curve named \"Discount\" is present")]
    NoDiscountCurve,

    /// The uploaded curve-points table was missing required columns.
    #[error("curve table is missing required columns: {missing:?}")]
    MissingColumns {
        /// Names of the missing columns.
        missing: Vec<String>,
    },

    /// A discount factor computation produced a non-finite result — an
    /// extremely long horizon combined with a steep tail slope pushed
    /// `exp(ln_df)` past the range `f64` can represent.
    #[error("curve {index_name:?} produced a non-finite discount factor at t={t}")]
    NumericOverflow {
        /// The curve's index name.
        index_name: String,
        /// The offending query time.
        t: f64,
    },

    /// A floating-rate position has no `index_name`, or names an index
    /// absent from the curve set.
    #[error("position {contract_id:?} is floating-rate but its index {index_name:?} is missing or not present in the curve set")]
    MissingFloatIndex {
        /// The offending position's contract id.
        contract_id: String,
        /// The index name the position named, if any.
        index_name: Option<String>,
    },
}
