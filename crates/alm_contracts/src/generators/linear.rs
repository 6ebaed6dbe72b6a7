//! `fixed_linear` / `variable_linear`: equal principal instalments each
//! period, interest on the declining outstanding balance.

use alm_core::{Cashflow, Date, ForwardCurveSet, Position};

use crate::error::CashflowError;
use crate::rate::period_interest;
use crate::schedule::{build_periods, future_periods};

/// Generates the remaining cashflows for a linear-amortisation position.
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
    let n = remaining.len();

    let mut flows = Vec::with_capacity(n);
    let mut outstanding = position.notional;
    let slice = if n > 0 { position.notional / n as f64 } else { 0.0 };

    for (i, period) in remaining.iter().enumerate() {
        let interest = period_interest(
            position,
            curves,
            outstanding,
            period,
            position.daycount_base,
            analysis_date,
        )?;
        // The final instalment repays whatever remains outstanding, absorbing
        // any floating-point residue from repeated division.
        let principal = if i == n - 1 { outstanding } else { slice };
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
    Ok(flows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alm_core::{CurvePoint, DayCountConvention, RateType, Side, SourceContractType};
    use approx::assert_relative_eq;

    fn position() -> Position {
        Position {
            contract_id: "L1".into(),
            currency: "EUR".into(),
            start_date: Date::from_ymd(2026, 1, 1).unwrap(),
            maturity_date: Some(Date::from_ymd(2028, 1, 1).unwrap()),
            notional: 100.0,
            side: Side::Asset,
            rate_type: RateType::Fixed,
            daycount_base: DayCountConvention::Actual360,
            source_contract_type: SourceContractType::FixedLinear,
            fixed_rate: Some(0.05),
            index_name: None,
            spread: None,
            repricing_freq_months: None,
            payment_freq_months: Some(12),
            next_reprice_date: None,
            floor_rate: None,
            cap_rate: None,
            annuity_payment_mode: None,
        }
    }

    fn curves(analysis_date: Date) -> ForwardCurveSet {
        ForwardCurveSet::from_points(
            analysis_date,
            DayCountConvention::Actual360,
            vec![(
                "Discount".to_string(),
                CurvePoint {
                    year_frac: 1.0,
                    zero_rate: 0.02,
                    tenor_label: "1Y".into(),
                    tenor_date: analysis_date.add_days(365),
                },
            )],
        )
        .unwrap()
    }

    #[test]
    fn principal_instalments_are_equal_and_sum_to_notional() {
        let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
        let flows = generate(&position(), &curves(analysis_date), analysis_date).unwrap();
        assert_eq!(flows.len(), 2);
        assert_relative_eq!(flows[0].principal_amount, 50.0, epsilon = 1e-9);
        assert_relative_eq!(flows[1].principal_amount, 50.0, epsilon = 1e-9);
        let total: f64 = flows.iter().map(|f| f.principal_amount).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn interest_declines_as_balance_amortises() {
        let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
        let flows = generate(&position(), &curves(analysis_date), analysis_date).unwrap();
        assert!(flows[1].interest_amount < flows[0].interest_amount);
    }
}
