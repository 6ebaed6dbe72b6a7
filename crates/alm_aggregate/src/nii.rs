//! Net Interest Income over a 12-month horizon: sums contractual interest
//! falling inside the window, rolls maturing/repricing principal over at
//! the risk-free rate plus a calibrated margin when balances are held
//! constant, and buckets the result into a monthly profile.

use std::collections::HashMap;

use alm_core::{Cashflow, Date, ForwardCurveSet, Position};

use crate::error::AggregationError;
use crate::margin::CalibratedMarginSet;

fn to_curve_error(contract_id: &str, source: alm_core::CurveError) -> AggregationError {
    AggregationError::Curve {
        contract_id: contract_id.to_string(),
        source,
    }
}

/// One month of a 12-month NII profile for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    /// Scenario identifier this row belongs to (`"base"` or a scenario id).
    pub scenario: String,
    /// Zero-based month offset from the analysis date.
    pub month_index: u32,
    /// `YYYY-MM` label of the month's end date.
    pub month_label: String,
    /// Sum of positive (asset-side) interest flows landing in the month.
    pub interest_income: f64,
    /// Sum of negative (liability-side) interest flows landing in the month.
    pub interest_expense: f64,
    /// `interest_income + interest_expense`.
    pub net_nii: f64,
}

/// `base_nii_12m` plus one NII per stressed scenario, with the delta and
/// the worst (most negative `ΔNII`) scenario identified.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NiiResult {
    /// NII-12M under the base (unshocked) curve set.
    pub base_nii_12m: f64,
    /// NII-12M under each scenario, keyed by scenario id.
    pub scenario_nii_12m: HashMap<String, f64>,
    /// `scenario_nii_12m[name] - base_nii_12m`, keyed by scenario id.
    pub delta_nii: HashMap<String, f64>,
    /// The scenario id with the most negative `delta_nii`, if any scenario
    /// was supplied.
    pub worst_scenario: Option<String>,
}

/// One signed interest event landing inside the horizon: a contractual
/// coupon, or a reinvestment/refinancing coupon from a balance-constant
/// rollover.
struct InterestEvent {
    date: Date,
    signed_amount: f64,
}

fn rollover_event(
    flow: &Cashflow,
    position: &Position,
    curves: &ForwardCurveSet,
    horizon_end: Date,
    risk_free_index: &str,
    margin_set: &CalibratedMarginSet,
) -> Result<Option<InterestEvent>, AggregationError> {
    if flow.principal_amount.abs() < 1e-10 {
        return Ok(None);
    }
    let remaining_yf = curves.daycount_base().year_fraction(flow.flow_date, horizon_end);
    if remaining_yf <= 0.0 {
        return Ok(None);
    }

    let rf_rate = curves
        .get_or_err(risk_free_index)
        .and_then(|curve| curve.zero_rate(remaining_yf))
        .map_err(|source| to_curve_error(&flow.contract_id, source))?;
    let margin = margin_set.lookup_margin(
        position.rate_type,
        position.source_contract_type,
        position.side,
        position.repricing_freq_months,
        position.index_name.as_deref(),
        0.0,
    );
    let reinvest_rate = rf_rate + margin;
    let reinvest_interest = flow.principal_amount * reinvest_rate * remaining_yf;

    Ok(Some(InterestEvent {
        date: horizon_end,
        signed_amount: flow.side.sign() * reinvest_interest,
    }))
}

/// Collects every signed interest event inside `(analysis_date, horizon_end]`:
/// one per contractual cashflow's own interest, plus (when
/// `balance_constant`) one reinvestment/refinancing event per maturing or
/// amortising principal flow, landing at `horizon_end`.
///
/// Synthetic non-maturity-deposit flows (`contract_id` not found in
/// `positions`) never roll over: their balance is already a standing
/// behavioural assumption, not a maturity event to reinvest.
fn collect_interest_events(
    positions: &[Position],
    cashflows: &[Cashflow],
    curves: &ForwardCurveSet,
    analysis_date: Date,
    horizon_end: Date,
    risk_free_index: &str,
    margin_set: &CalibratedMarginSet,
    balance_constant: bool,
) -> Result<Vec<InterestEvent>, AggregationError> {
    let by_contract: HashMap<&str, &Position> =
        positions.iter().map(|p| (p.contract_id.as_str(), p)).collect();

    let mut events = Vec::new();
    for flow in cashflows {
        if flow.flow_date <= analysis_date || flow.flow_date > horizon_end {
            continue;
        }
        events.push(InterestEvent {
            date: flow.flow_date,
            signed_amount: flow.side.sign() * flow.interest_amount,
        });

        if balance_constant {
            if let Some(position) = by_contract.get(flow.contract_id.as_str()) {
                if let Some(event) =
                    rollover_event(flow, position, curves, horizon_end, risk_free_index, margin_set)?
                {
                    events.push(event);
                }
            }
        }
    }

    events.sort_by_key(|e| e.date);
    Ok(events)
}

/// Buckets `(analysis_date, analysis_date + months]` into `months` calendar
/// buckets and sums `events` into each, splitting positive (income) and
/// negative (expense) contributions. Returns `scenario`-labeled rows for
/// `month_index` 0..months.
fn bucket_into_months(
    events: &[InterestEvent],
    analysis_date: Date,
    months: u32,
    scenario: &str,
) -> Vec<MonthlyRow> {
    let mut rows = Vec::with_capacity(months as usize);
    for month_index in 0..months {
        let bucket_start = analysis_date.add_months(month_index as i32);
        let bucket_end = analysis_date.add_months(month_index as i32 + 1);

        let mut interest_income = 0.0;
        let mut interest_expense = 0.0;
        for event in events {
            if event.date > bucket_start && event.date <= bucket_end {
                if event.signed_amount >= 0.0 {
                    interest_income += event.signed_amount;
                } else {
                    interest_expense += event.signed_amount;
                }
            }
        }

        rows.push(MonthlyRow {
            scenario: scenario.to_string(),
            month_index,
            month_label: format!("{:04}-{:02}", bucket_end.year(), bucket_end.month()),
            interest_income,
            interest_expense,
            net_nii: interest_income + interest_expense,
        });
    }
    rows
}

/// Builds the `months`-bucket NII profile for one curve set / scenario.
///
/// `positions` supplies the rollover metadata (`rate_type`,
/// `source_contract_type`, `side`, `repricing_freq_months`, `index_name`)
/// for the position each cashflow in `cashflows` was generated from;
/// `cashflows` is the already-generated set (contractual plus, for
/// non-maturity balances, behaviourally expanded). Non-maturity synthetic
/// flows that carry no matching `Position` are summed for interest but
/// never rolled over.
#[allow(clippy::too_many_arguments)]
pub fn nii_monthly_profile(
    positions: &[Position],
    cashflows: &[Cashflow],
    curves: &ForwardCurveSet,
    analysis_date: Date,
    horizon_months: u32,
    risk_free_index: &str,
    margin_set: &CalibratedMarginSet,
    balance_constant: bool,
    scenario: &str,
) -> Result<Vec<MonthlyRow>, AggregationError> {
    let horizon_end = analysis_date.add_months(horizon_months as i32);
    let events = collect_interest_events(
        positions,
        cashflows,
        curves,
        analysis_date,
        horizon_end,
        risk_free_index,
        margin_set,
        balance_constant,
    )?;
    Ok(bucket_into_months(&events, analysis_date, horizon_months, scenario))
}

/// Scalar NII-12M for one curve set / scenario: the sum of its monthly
/// profile's `net_nii`, by construction equal to the sum of every interest
/// event inside the horizon (testable property: monthly sum equals scalar).
#[allow(clippy::too_many_arguments)]
pub fn nii_12m(
    positions: &[Position],
    cashflows: &[Cashflow],
    curves: &ForwardCurveSet,
    analysis_date: Date,
    horizon_months: u32,
    risk_free_index: &str,
    margin_set: &CalibratedMarginSet,
    balance_constant: bool,
) -> Result<f64, AggregationError> {
    let rows = nii_monthly_profile(
        positions,
        cashflows,
        curves,
        analysis_date,
        horizon_months,
        risk_free_index,
        margin_set,
        balance_constant,
        "scalar",
    )?;
    Ok(rows.iter().map(|r| r.net_nii).sum())
}

/// Assembles an [`NiiResult`] from a base NII-12M and a map of per-scenario
/// NII-12M values.
pub fn summarise_nii(base_nii_12m: f64, scenario_nii_12m: HashMap<String, f64>) -> NiiResult {
    let delta_nii: HashMap<String, f64> = scenario_nii_12m
        .iter()
        .map(|(name, value)| (name.clone(), value - base_nii_12m))
        .collect();

    let worst_scenario = delta_nii
        .iter()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(name, _)| name.clone());

    NiiResult {
        base_nii_12m,
        scenario_nii_12m,
        delta_nii,
        worst_scenario,
    }
}
