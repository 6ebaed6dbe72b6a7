//! Shock-engine errors.

use alm_core::CurveError;
use thiserror::Error;

/// Errors raised building or applying a regulatory shock.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShockError {
    /// The scenario identifier did not match any recognised template,
    /// after case-insensitive normalisation.
    #[error("unrecognised regulatory scenario identifier: {scenario_id:?}")]
    UnknownScenario {
        /// The offending identifier, as supplied.
        scenario_id: String,
    },

    /// A required curve lookup failed while stressing the points table.
    #[error("applying shock {scenario_id:?}: {source}")]
    Curve {
        /// The scenario being applied.
        scenario_id: String,
        /// Underlying curve error.
        #[source]
        source: CurveError,
    },
}

/// Errors raised by the scenario orchestrator, which wraps the shock
/// engine together with cashflow generation and EVE/NII aggregation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// A requested scenario name did not match any recognised template,
    /// after case-insensitive normalisation.
    #[error("unrecognised regulatory scenario identifier: {scenario_id:?}")]
    UnknownScenario {
        /// The offending identifier, as supplied.
        scenario_id: String,
    },

    /// The same scenario (after normalisation) was requested more than once.
    #[error("duplicate scenario requested: {name:?}")]
    DuplicateScenario {
        /// The normalised scenario identifier.
        name: String,
    },

    /// The book contains `fixed_non_maturity` positions but no
    /// [`alm_core::NmdBehaviouralParams`] were supplied to expand them.
    #[error("book contains fixed_non_maturity positions but no NmdBehaviouralParams were supplied")]
    MissingNmdParams,

    /// Stressing the base curve set for a scenario failed.
    #[error("stressing curves for scenario {scenario_id:?}: {source}")]
    Shock {
        /// The scenario being applied.
        scenario_id: String,
        /// Underlying shock error.
        #[source]
        source: ShockError,
    },

    /// Generating a position's cashflows failed while evaluating a scenario.
    #[error("generating cashflows for scenario {scenario_id:?}: {source}")]
    Cashflow {
        /// The scenario being evaluated.
        scenario_id: String,
        /// Underlying cashflow error.
        #[source]
        source: alm_contracts::CashflowError,
    },

    /// Aggregating EVE or NII failed while evaluating a scenario.
    #[error("aggregating scenario {scenario_id:?}: {source}")]
    Aggregation {
        /// The scenario being evaluated.
        scenario_id: String,
        /// Underlying aggregation error.
        #[source]
        source: alm_aggregate::AggregationError,
    },
}
