//! Behavioural parameters driving the non-maturity-deposit expansion: the
//! core/non-core split and the distribution of the core balance across the
//! EBA buckets. The expansion algorithm itself lives in `alm_contracts`;
//! this is shared value-type data, read by both the expander and reporting.

use std::collections::BTreeMap;

/// Core/non-core split and core-bucket distribution for one NMD cohort
/// (typically one per currency/product grouping upstream of this core).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NmdBehaviouralParams {
    /// Share of the balance treated as "core" (stable), in percent (0-100).
    pub core_proportion_pct: f64,
    /// Distribution of the core share across EBA bucket ids, in percent.
    /// Values need not sum to `core_proportion_pct`; the expander uses them
    /// as supplied (see DESIGN.md for the accepted Open Question).
    pub distribution_pct: BTreeMap<String, f64>,
    /// Pass-through rate applied to the non-core overnight slice when a
    /// caller wants a beta-adjusted client rate instead of a pure index
    /// pass-through; percent (0-100). Carried as data for the caller's
    /// own rate assumptions — the core expander does not apply it itself
    /// since the non-core flow carries no interest by construction (it
    /// reprices the next day).
    pub pass_through_rate_pct: f64,
}

impl NmdBehaviouralParams {
    /// Fraction (0.0-1.0) of the balance treated as core.
    pub fn core_fraction(&self) -> f64 {
        self.core_proportion_pct / 100.0
    }

    /// Fraction (0.0-1.0) of the balance treated as non-core (overnight).
    pub fn non_core_fraction(&self) -> f64 {
        1.0 - self.core_fraction()
    }
}
