//! The six regulatory scenario templates and their `Δ(t)` shock functions.

use std::fmt;
use std::str::FromStr;

use alm_core::ShockParameters;

use crate::error::ShockError;

/// Decay constant for the short-end shaping function `s(t)`, in years.
const TAU_SHORT: f64 = 4.0;
/// Decay constant for the long-end shaping function `l(t)`, in years.
const TAU_LONG: f64 = 4.0;

/// One of the closed set of BCBS-368 / EBA-GL-2022/14 regulatory scenarios,
/// plus the unshocked `Base` case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RegulatoryScenario {
    /// The unshocked base curve set.
    Base,
    /// Parallel shift up by the currency's `parallel` shock size.
    ParallelUp,
    /// Parallel shift down by the currency's `parallel` shock size.
    ParallelDown,
    /// Short-end shift up, decaying toward zero at long maturities.
    ShortUp,
    /// Short-end shift down, decaying toward zero at long maturities.
    ShortDown,
    /// Short rates down, long rates up (curve steepens).
    Steepener,
    /// Short rates up, long rates down (curve flattens).
    Flattener,
}

/// All six regulatory scenarios, excluding `Base`.
pub const REGULATORY_SCENARIOS: &[RegulatoryScenario] = &[
    RegulatoryScenario::ParallelUp,
    RegulatoryScenario::ParallelDown,
    RegulatoryScenario::ShortUp,
    RegulatoryScenario::ShortDown,
    RegulatoryScenario::Steepener,
    RegulatoryScenario::Flattener,
];

impl RegulatoryScenario {
    /// Canonical scenario identifier, case-insensitively normalised.
    pub fn id(&self) -> &'static str {
        match self {
            RegulatoryScenario::Base => "base",
            RegulatoryScenario::ParallelUp => "parallel-up",
            RegulatoryScenario::ParallelDown => "parallel-down",
            RegulatoryScenario::ShortUp => "short-up",
            RegulatoryScenario::ShortDown => "short-down",
            RegulatoryScenario::Steepener => "steepener",
            RegulatoryScenario::Flattener => "flattener",
        }
    }

    /// The rate shock `Δ(t)` this scenario applies to a base rate `r(t)`,
    /// in absolute rate units, before flooring.
    pub fn delta(&self, t_years: f64, params: &ShockParameters) -> f64 {
        let s = short_shape(t_years);
        let l = long_shape(t_years);
        match self {
            RegulatoryScenario::Base => 0.0,
            RegulatoryScenario::ParallelUp => params.parallel,
            RegulatoryScenario::ParallelDown => -params.parallel,
            RegulatoryScenario::ShortUp => params.short * s,
            RegulatoryScenario::ShortDown => -params.short * s,
            RegulatoryScenario::Steepener => -0.65 * params.short * s + 0.9 * params.long * l,
            RegulatoryScenario::Flattener => 0.8 * params.short * s - 0.6 * params.long * l,
        }
    }
}

fn short_shape(t_years: f64) -> f64 {
    (-t_years / TAU_SHORT).exp()
}

fn long_shape(t_years: f64) -> f64 {
    1.0 - (-t_years / TAU_LONG).exp()
}

impl fmt::Display for RegulatoryScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for RegulatoryScenario {
    type Err = ShockError;

    /// Parses a scenario identifier, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" => Ok(RegulatoryScenario::Base),
            "parallel-up" | "parallel_up" => Ok(RegulatoryScenario::ParallelUp),
            "parallel-down" | "parallel_down" => Ok(RegulatoryScenario::ParallelDown),
            "short-up" | "short_up" => Ok(RegulatoryScenario::ShortUp),
            "short-down" | "short_down" => Ok(RegulatoryScenario::ShortDown),
            "steepener" => Ok(RegulatoryScenario::Steepener),
            "flattener" => Ok(RegulatoryScenario::Flattener),
            other => Err(ShockError::UnknownScenario {
                scenario_id: other.to_string(),
            }),
        }
    }
}
