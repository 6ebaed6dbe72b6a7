//! Margin calibration: infers a notional-weighted funding/lending margin
//! per `(rate_type, source_contract_type, side, repricing_freq_months,
//! index_name)` cohort from a recent book, for use as the reinvestment
//! spread in the NII aggregator's balance-constant rollover.

use std::collections::HashMap;

use alm_core::{Date, ForwardCurveSet, Position, RateType, SourceContractType, Side};

use crate::error::AggregationError;

const RISK_FREE_TENOR_YEARS: f64 = 1.0;

/// The cohort a position's margin is calibrated and looked up against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MarginKey {
    rate_type: RateType,
    source_contract_type: SourceContractType,
    side: Side,
    repricing_freq_months: Option<u32>,
    index_name: Option<String>,
}

/// A notional-weighted average margin per cohort, calibrated from a recent
/// book. Cohorts absent from the calibration set fall back to a
/// caller-supplied default on lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibratedMarginSet {
    margins: HashMap<MarginKey, f64>,
}

impl CalibratedMarginSet {
    /// Looks up the calibrated margin for a cohort, or `default` if none was
    /// observed during calibration.
    pub fn lookup_margin(
        &self,
        rate_type: RateType,
        source_contract_type: SourceContractType,
        side: Side,
        repricing_freq_months: Option<u32>,
        index_name: Option<&str>,
        default: f64,
    ) -> f64 {
        let key = MarginKey {
            rate_type,
            source_contract_type,
            side,
            repricing_freq_months,
            index_name: index_name.map(str::to_string),
        };
        self.margins.get(&key).copied().unwrap_or(default)
    }

    /// Number of calibrated cohorts.
    pub fn len(&self) -> usize {
        self.margins.len()
    }

    /// Whether no cohort was calibrated.
    pub fn is_empty(&self) -> bool {
        self.margins.is_empty()
    }
}

struct CohortAccumulator {
    weighted_margin: f64,
    total_weight: f64,
}

/// Calibrates a [`CalibratedMarginSet`] from `recent_positions`.
///
/// For each fixed-rate position the margin is `fixed_rate - rf_rate(1Y)`;
/// for floating-rate positions it is the contract's own `spread`. Margins
/// are aggregated by notional-weighted mean (`weight = |notional|`) within
/// each `(rate_type, source_contract_type, side, repricing_freq_months,
/// index_name)` cohort.
///
/// When `lookback_months` is `Some`, positions whose `start_date` precedes
/// `as_of` minus that many months are excluded from calibration; `None`
/// uses the entire book.
pub fn calibrate_margin_set(
    recent_positions: &[Position],
    curves: &ForwardCurveSet,
    risk_free_index: &str,
    as_of: Date,
    lookback_months: Option<u32>,
) -> Result<CalibratedMarginSet, AggregationError> {
    let rf_1y = curves
        .get_or_err(risk_free_index)
        .and_then(|curve| curve.zero_rate(RISK_FREE_TENOR_YEARS))
        .map_err(|source| AggregationError::RiskFreeLookup { source })?;

    let cutoff = lookback_months.map(|months| as_of.add_months(-(months as i32)));

    let mut cohorts: HashMap<MarginKey, CohortAccumulator> = HashMap::new();
    for position in recent_positions {
        if let Some(cutoff) = cutoff {
            if position.start_date < cutoff {
                continue;
            }
        }

        let weight = position.notional.abs();
        if weight < 1e-10 {
            continue;
        }

        let margin = match position.rate_type {
            RateType::Fixed => {
                let fixed_rate = position.fixed_rate.ok_or_else(|| AggregationError::MissingFixedRate {
                    contract_id: position.contract_id.clone(),
                })?;
                fixed_rate - rf_1y
            }
            RateType::Float => position.spread.ok_or_else(|| AggregationError::MissingSpread {
                contract_id: position.contract_id.clone(),
            })?,
        };

        let key = MarginKey {
            rate_type: position.rate_type,
            source_contract_type: position.source_contract_type,
            side: position.side,
            repricing_freq_months: position.repricing_freq_months,
            index_name: position.index_name.clone(),
        };
        let entry = cohorts.entry(key).or_insert(CohortAccumulator {
            weighted_margin: 0.0,
            total_weight: 0.0,
        });
        entry.weighted_margin += margin * weight;
        entry.total_weight += weight;
    }

    let margins = cohorts
        .into_iter()
        .map(|(key, accumulator)| (key, accumulator.weighted_margin / accumulator.total_weight))
        .collect();

    Ok(CalibratedMarginSet { margins })
}
