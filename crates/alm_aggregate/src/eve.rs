//! Economic Value of Equity: exact per-flow discounting, and a coarser
//! bucketed-aggregate mode used for reporting breakdowns.

use std::collections::HashMap;

use alm_core::{Cashflow, Date, EveBucket, ForwardCurveSet, Side};

use crate::error::AggregationError;

fn to_curve_error(contract_id: &str, source: alm_core::CurveError) -> AggregationError {
    AggregationError::Curve {
        contract_id: contract_id.to_string(),
        source,
    }
}

/// One row of a per-scenario, per-bucket EVE breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketRow {
    /// Scenario identifier this row belongs to (`"base"` or a scenario id).
    pub scenario: String,
    /// Bucket label.
    pub bucket_name: String,
    /// Bucket lower bound, in years.
    pub start_years: f64,
    /// Bucket upper bound, in years; `None` for the open-ended tail.
    pub end_years: Option<f64>,
    /// Present value of asset-side flows in the bucket.
    pub asset_pv: f64,
    /// Present value of liability-side flows in the bucket (signed negative).
    pub liability_pv: f64,
    /// `asset_pv + liability_pv`.
    pub net_pv: f64,
}

/// Exact-mode EVE: discounts every cashflow individually at its own
/// year-fraction and sums, ordered by `(contract_id, flow_date)` for
/// deterministic summation.
pub fn eve_exact(
    cashflows: &[Cashflow],
    curves: &ForwardCurveSet,
    analysis_date: Date,
    discount_index: &str,
) -> Result<f64, AggregationError> {
    let mut ordered: Vec<&Cashflow> = cashflows.iter().collect();
    ordered.sort_by(|a, b| (&a.contract_id, a.flow_date).cmp(&(&b.contract_id, b.flow_date)));

    let discount_curve = curves
        .get_or_err(discount_index)
        .map_err(|source| to_curve_error(discount_index, source))?;

    let mut total = 0.0;
    for flow in ordered {
        let t = curves.daycount_base().year_fraction(analysis_date, flow.flow_date).max(0.0);
        let df = discount_curve
            .discount_factor(t)
            .map_err(|source| to_curve_error(&flow.contract_id, source))?;
        total += flow.side.sign() * (flow.interest_amount + flow.principal_amount) * df;
    }
    Ok(total)
}

fn validate_bucket(bucket: &EveBucket) -> Result<(), AggregationError> {
    if let Some(end) = bucket.end_years {
        if end <= bucket.start_years {
            return Err(AggregationError::InvalidBucket {
                name: bucket.name.to_string(),
                start_years: bucket.start_years,
                end_years: end,
            });
        }
    }
    Ok(())
}

/// Bucketed-mode EVE: groups cashflows into `buckets` by their own
/// year-fraction, then discounts each bucket's aggregate unsigned total at
/// the bucket's representative year-fraction. Coarser than [`eve_exact`];
/// intended for reporting breakdowns, not regulatory EVE itself.
pub fn eve_bucketed(
    cashflows: &[Cashflow],
    curves: &ForwardCurveSet,
    analysis_date: Date,
    discount_index: &str,
    buckets: &[EveBucket],
    open_ended_years: f64,
    scenario_name: &str,
) -> Result<Vec<BucketRow>, AggregationError> {
    let discount_curve = curves
        .get_or_err(discount_index)
        .map_err(|source| to_curve_error(discount_index, source))?;

    let mut rows = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        validate_bucket(bucket)?;

        let mut asset_total = 0.0;
        let mut liability_total = 0.0;
        for flow in cashflows {
            let t = curves.daycount_base().year_fraction(analysis_date, flow.flow_date).max(0.0);
            if !bucket.contains(t) {
                continue;
            }
            let magnitude = flow.interest_amount + flow.principal_amount;
            match flow.side {
                Side::Asset => asset_total += magnitude,
                Side::Liability => liability_total += magnitude,
            }
        }

        let representative_t = bucket.representative_t(open_ended_years);
        let df = discount_curve
            .discount_factor(representative_t)
            .map_err(|source| to_curve_error(bucket.name, source))?;

        let asset_pv = asset_total * df;
        let liability_pv = -liability_total * df;
        rows.push(BucketRow {
            scenario: scenario_name.to_string(),
            bucket_name: bucket.name.to_string(),
            start_years: bucket.start_years,
            end_years: bucket.end_years,
            asset_pv,
            liability_pv,
            net_pv: asset_pv + liability_pv,
        });
    }
    Ok(rows)
}

/// `base_eve` plus one EVE per stressed scenario, with the delta and the
/// worst (most negative `ΔEVE`) scenario identified.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EveResult {
    /// EVE under the base (unshocked) curve set.
    pub base_eve: f64,
    /// EVE under each scenario, keyed by scenario id.
    pub scenario_eve: HashMap<String, f64>,
    /// `scenario_eve[name] - base_eve`, keyed by scenario id.
    pub delta_eve: HashMap<String, f64>,
    /// The scenario id with the most negative `delta_eve`, if any scenario
    /// was supplied.
    pub worst_scenario: Option<String>,
}

/// Assembles an [`EveResult`] from a base EVE and a map of per-scenario EVEs.
pub fn summarise_eve(base_eve: f64, scenario_eve: HashMap<String, f64>) -> EveResult {
    let delta_eve: HashMap<String, f64> =
        scenario_eve.iter().map(|(name, value)| (name.clone(), value - base_eve)).collect();

    let worst_scenario = delta_eve
        .iter()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(name, _)| name.clone());

    EveResult {
        base_eve,
        scenario_eve,
        delta_eve,
        worst_scenario,
    }
}
