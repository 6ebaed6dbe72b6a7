//! `fixed_annuity` / `variable_annuity`: level instalments solved over the
//! remaining period schedule from the current outstanding balance.
//!
//! `position.notional` is the balance as of the analysis date, not the
//! original principal, so the level payment is always solved fresh over
//! only the periods still outstanding. For a fixed-rate annuity (or a
//! variable one held in [`AnnuityPaymentMode::FixedPayment`]) this is a
//! single solve over the whole remaining schedule. A variable annuity in
//! the default `RepriceOnReset` mode instead solves separately on each
//! segment between resets, against the balance outstanding at the start
//! of that segment.

use alm_core::{AnnuityPaymentMode, Cashflow, Date, ForwardCurveSet, Position, RateType};

use crate::error::CashflowError;
use crate::rate::period_rate_times_yf;
use crate::schedule::{build_periods, future_periods, Period};

fn reset_dates(position: &Position, maturity: Date) -> Vec<Date> {
    match (position.next_reprice_date, position.repricing_freq_months) {
        (Some(first), Some(freq)) if freq > 0 => {
            let mut dates = Vec::new();
            let mut cursor = first;
            while cursor < maturity {
                dates.push(cursor);
                cursor = cursor.add_months(freq as i32);
            }
            dates
        }
        _ => Vec::new(),
    }
}

fn build_segments(periods: &[Period], resets: &[Date]) -> Vec<Vec<Period>> {
    if resets.is_empty() {
        return vec![periods.to_vec()];
    }
    let mut segments: Vec<Vec<Period>> = Vec::new();
    let mut current: Vec<Period> = Vec::new();
    let mut current_count = 0usize;
    for period in periods {
        let count = resets.iter().filter(|&&r| r <= period.start).count();
        if !current.is_empty() && count != current_count {
            segments.push(std::mem::take(&mut current));
        }
        current_count = count;
        current.push(*period);
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// `P = N0 / sum_i(1 / prod_{j<=i}(1+f_j))`, the level payment that fully
/// amortises `balance` over periods whose per-period rate*yearfraction
/// factors are `factors`.
fn compute_level_payment(balance: f64, factors: &[f64]) -> f64 {
    let mut cumulative_growth = 1.0;
    let mut denominator = 0.0;
    for &f in factors {
        cumulative_growth *= 1.0 + f;
        denominator += 1.0 / cumulative_growth;
    }
    if denominator == 0.0 {
        balance
    } else {
        balance / denominator
    }
}

/// Generates the remaining cashflows for a level-instalment annuity position.
pub fn generate(
    position: &Position,
    curves: &ForwardCurveSet,
    analysis_date: Date,
) -> Result<Vec<Cashflow>, CashflowError> {
    let maturity = position
        .maturity_date
        .ok_or_else(|| CashflowError::MissingMaturityDate {
            contract_id: position.contract_id.clone(),
            source_contract_type: position.source_contract_type,
        })?;
    let freq = position
        .payment_freq_months
        .ok_or(CashflowError::InvalidPaymentFrequency {
            contract_id: position.contract_id.clone(),
            months: 0,
        })?;

    let all_periods = build_periods(position.start_date, maturity, freq);
    let remaining = future_periods(&all_periods, analysis_date);

    let use_fixed_payment = match position.rate_type {
        RateType::Fixed => true,
        RateType::Float => matches!(
            position.annuity_payment_mode.unwrap_or_default(),
            AnnuityPaymentMode::FixedPayment
        ),
    };

    let segments: Vec<Vec<Period>> = if use_fixed_payment {
        vec![remaining.clone()]
    } else {
        build_segments(&remaining, &reset_dates(position, maturity))
    };

    let total_periods = remaining.len();
    let mut flows = Vec::with_capacity(total_periods);
    let mut outstanding = position.notional;
    let mut flows_emitted = 0usize;

    for segment in &segments {
        if segment.is_empty() {
            continue;
        }
        let factors: Vec<f64> = segment
            .iter()
            .map(|p| period_rate_times_yf(position, curves, p, position.daycount_base, analysis_date))
            .collect::<Result<_, _>>()?;
        let payment = compute_level_payment(outstanding, &factors);

        for (i, period) in segment.iter().enumerate() {
            let interest = outstanding * factors[i];
            flows_emitted += 1;
            let is_last_overall = flows_emitted == total_periods;
            let principal = if is_last_overall {
                outstanding
            } else {
                payment - interest
            };
            outstanding -= principal;
            flows.push(Cashflow {
                contract_id: position.contract_id.clone(),
                source_contract_type: position.source_contract_type,
                rate_type: position.rate_type,
                side: position.side,
                flow_date: period.end,
                interest_amount: interest,
                principal_amount: principal,
                index_name: position.index_name.clone(),
            });
        }
    }
    Ok(flows)
}
