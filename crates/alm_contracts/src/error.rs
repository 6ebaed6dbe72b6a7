//! Cashflow generation errors.

use alm_core::CurveError;
use alm_core::{Date, SourceContractType};
use thiserror::Error;

/// Errors raised while turning a position into a sequence of cashflows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CashflowError {
    /// The position names a product type the generator does not route
    /// (including the two non-maturity types, which must go through the
    /// behavioural expander instead).
    #[error("contract {contract_id}: unsupported source contract type {source_contract_type}")]
    UnsupportedContractType {
        /// The offending contract.
        contract_id: String,
        /// The contract's declared type.
        source_contract_type: SourceContractType,
    },

    /// A `*_scheduled` position had no matching externally supplied
    /// principal amortisation schedule.
    #[error("contract {contract_id}: no principal schedule was supplied")]
    MissingPrincipalSchedule {
        /// The offending contract.
        contract_id: String,
    },

    /// A maturing/bullet/annuity/linear position was missing its maturity date.
    #[error("contract {contract_id}: maturity date is required for {source_contract_type}")]
    MissingMaturityDate {
        /// The offending contract.
        contract_id: String,
        /// The contract's declared type.
        source_contract_type: SourceContractType,
    },

    /// A floating-rate position was missing its index name.
    #[error("contract {contract_id}: floating-rate position has no index_name")]
    MissingIndexName {
        /// The offending contract.
        contract_id: String,
    },

    /// A fixed-rate position was missing its fixed rate.
    #[error("contract {contract_id}: fixed-rate position has no fixed_rate")]
    MissingFixedRate {
        /// The offending contract.
        contract_id: String,
    },

    /// The position's payment frequency was zero or otherwise invalid.
    #[error("contract {contract_id}: invalid payment frequency {months} months")]
    InvalidPaymentFrequency {
        /// The offending contract.
        contract_id: String,
        /// The invalid frequency, in months.
        months: u32,
    },

    /// `start_date` was not strictly before `maturity_date`.
    #[error("contract {contract_id}: start date {start} is not before maturity date {maturity}")]
    InvalidDateRange {
        /// The offending contract.
        contract_id: String,
        /// Start date.
        start: Date,
        /// Maturity date.
        maturity: Date,
    },

    /// Resolving the floating coupon required a curve lookup that failed.
    #[error("contract {contract_id}: curve error resolving floating rate: {source}")]
    Curve {
        /// The offending contract.
        contract_id: String,
        /// Underlying curve error.
        #[source]
        source: CurveError,
    },
}
