//! Floating-coupon rate resolution and stub handling.
//!
//! A floating position carries a frozen `fixed_rate` stub: the rate
//! observed at the last reset, which remains in force until
//! `next_reprice_date`. Once the analysis window passes that date, the
//! coupon is re-projected from the curve as `index_rate(t_mid) + spread`,
//! clipped to `[floor_rate, cap_rate]` where present. A period that
//! straddles `next_reprice_date` is split: the stub rate applies up to the
//! reset, the projected rate applies after it.

use alm_core::{DayCountConvention, ForwardCurveSet, Position, RateType};

use crate::error::CashflowError;
use crate::schedule::Period;

fn midpoint(p: &Period) -> alm_core::Date {
    let half_days = (p.end - p.start) / 2;
    p.start.add_days(half_days)
}

fn clip(rate: f64, position: &Position) -> f64 {
    let mut r = rate;
    if let Some(floor) = position.floor_rate {
        r = r.max(floor);
    }
    if let Some(cap) = position.cap_rate {
        r = r.min(cap);
    }
    r
}

fn projected_index_rate(
    position: &Position,
    curves: &ForwardCurveSet,
    at: alm_core::Date,
    analysis_date: alm_core::Date,
) -> Result<f64, CashflowError> {
    let index_name = position
        .index_name
        .as_deref()
        .ok_or_else(|| CashflowError::MissingIndexName {
            contract_id: position.contract_id.clone(),
        })?;
    let index_rate = curves
        .rate_on_date(index_name, at.max(analysis_date.add_days(1)))
        .map_err(|source| CashflowError::Curve {
            contract_id: position.contract_id.clone(),
            source,
        })?;
    let spread = position.spread.unwrap_or(0.0);
    Ok(clip(index_rate + spread, position))
}

/// Interest accrued on `notional` over `period`, resolving fixed vs.
/// floating (with stub handling) per the position's configuration.
pub fn period_interest(
    position: &Position,
    curves: &ForwardCurveSet,
    notional: f64,
    period: &Period,
    daycount: DayCountConvention,
    analysis_date: alm_core::Date,
) -> Result<f64, CashflowError> {
    match position.rate_type {
        RateType::Fixed => {
            let rate = position
                .fixed_rate
                .ok_or_else(|| CashflowError::MissingFixedRate {
                    contract_id: position.contract_id.clone(),
                })?;
            let yf = daycount.year_fraction(period.start, period.end);
            Ok(notional * rate * yf)
        }
        RateType::Float => {
            let stub_rate = position
                .fixed_rate
                .ok_or_else(|| CashflowError::MissingFixedRate {
                    contract_id: position.contract_id.clone(),
                })?;

            match position.next_reprice_date {
                None => {
                    let rate = projected_index_rate(position, curves, midpoint(period), analysis_date)?;
                    let yf = daycount.year_fraction(period.start, period.end);
                    Ok(notional * rate * yf)
                }
                Some(reset) if reset <= period.start => {
                    let rate = projected_index_rate(position, curves, midpoint(period), analysis_date)?;
                    let yf = daycount.year_fraction(period.start, period.end);
                    Ok(notional * rate * yf)
                }
                Some(reset) if reset >= period.end => {
                    let yf = daycount.year_fraction(period.start, period.end);
                    Ok(notional * stub_rate * yf)
                }
                Some(reset) => {
                    let yf_stub = daycount.year_fraction(period.start, reset);
                    let remainder = Period { start: reset, end: period.end };
                    let rate_remainder =
                        projected_index_rate(position, curves, midpoint(&remainder), analysis_date)?;
                    let yf_remainder = daycount.year_fraction(reset, period.end);
                    Ok(notional * stub_rate * yf_stub + notional * rate_remainder * yf_remainder)
                }
            }
        }
    }
}

/// `period_interest` evaluated for a single unit of notional: the
/// effective `rate * year_fraction` product for `period`, blended across
/// any stub split. Linear in notional, so this is exactly the per-period
/// multiplicative factor the annuity amortisation formula needs.
pub fn period_rate_times_yf(
    position: &Position,
    curves: &ForwardCurveSet,
    period: &Period,
    daycount: DayCountConvention,
    analysis_date: alm_core::Date,
) -> Result<f64, CashflowError> {
    period_interest(position, curves, 1.0, period, daycount, analysis_date)
}
