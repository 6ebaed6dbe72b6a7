//! Economic Value of Equity and Net Interest Income aggregation, and the
//! margin calibration that feeds NII's balance-constant rollover.
//!
//! This crate turns the cashflows `alm_contracts` generates (contractual or
//! behaviourally expanded) into the two regulatory IRRBB metrics: EVE
//! (present value sensitivity) and NII-12M (near-term earnings
//! sensitivity), each computed once per curve set and compared against a
//! base to produce a `ΔMetric` per scenario.

#![warn(missing_docs)]

mod error;
mod eve;
mod margin;
mod nii;

pub use error::AggregationError;
pub use eve::{eve_bucketed, eve_exact, summarise_eve, BucketRow, EveResult};
pub use margin::{calibrate_margin_set, CalibratedMarginSet};
pub use nii::{nii_12m, nii_monthly_profile, summarise_nii, MonthlyRow, NiiResult};
