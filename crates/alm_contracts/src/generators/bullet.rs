//! `fixed_bullet` / `variable_bullet`: interest on the full outstanding
//! balance each period, single principal repayment at maturity.

use alm_core::{Cashflow, Date, ForwardCurveSet, Position};

use crate::error::CashflowError;
use crate::rate::period_interest;
use crate::schedule::{build_periods, future_periods};

/// Generates the remaining cashflows for a bullet-repayment position.
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

    let mut flows = Vec::with_capacity(remaining.len());
    for (i, period) in remaining.iter().enumerate() {
        let interest = period_interest(
            position,
            curves,
            position.notional,
            period,
            position.daycount_base,
            analysis_date,
        )?;
        let principal = if i == remaining.len() - 1 { position.notional } else { 0.0 };
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
    use alm_core::{DayCountConvention, RateType, Side, SourceContractType};
    use approx::assert_relative_eq;

    fn fixed_bullet(notional: f64, rate: f64) -> Position {
        Position {
            contract_id: "B1".into(),
            currency: "EUR".into(),
            start_date: Date::from_ymd(2026, 1, 1).unwrap(),
            maturity_date: Some(Date::from_ymd(2027, 1, 1).unwrap()),
            notional,
            side: Side::Asset,
            rate_type: RateType::Fixed,
            daycount_base: DayCountConvention::Actual360,
            source_contract_type: SourceContractType::FixedBullet,
            fixed_rate: Some(rate),
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

    fn empty_curves(analysis_date: Date) -> ForwardCurveSet {
        // Fixed-rate positions never touch the curve set, but the generator
        // signature always takes one.
        ForwardCurveSet::from_points(
            analysis_date,
            DayCountConvention::Actual360,
            vec![(
                "Discount".to_string(),
                alm_core::CurvePoint {
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
    fn s1_fixed_bullet_matches_literal_scenario() {
        // S1: 1y, 5%, notional=100, ACT/360 -> NII-12M = 100*0.05*(365/360)
        let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
        let position = fixed_bullet(100.0, 0.05);
        let curves = empty_curves(analysis_date);
        let flows = generate(&position, &curves, analysis_date).unwrap();
        assert_eq!(flows.len(), 1);
        let expected_interest = 100.0 * 0.05 * (365.0 / 360.0);
        assert_relative_eq!(flows[0].interest_amount, expected_interest, epsilon = 1e-9);
        assert_relative_eq!(flows[0].principal_amount, 100.0, epsilon = 1e-12);
        assert_eq!(flows[0].flow_date, Date::from_ymd(2027, 1, 1).unwrap());
    }

    #[test]
    fn quarterly_bullet_has_four_interest_only_periods_and_one_final_principal() {
        let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
        let mut position = fixed_bullet(100.0, 0.04);
        position.payment_freq_months = Some(3);
        let curves = empty_curves(analysis_date);
        let flows = generate(&position, &curves, analysis_date).unwrap();
        assert_eq!(flows.len(), 4);
        for f in &flows[..3] {
            assert_relative_eq!(f.principal_amount, 0.0, epsilon = 1e-12);
        }
        assert_relative_eq!(flows[3].principal_amount, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_maturity_date_errors() {
        let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
        let mut position = fixed_bullet(100.0, 0.04);
        position.maturity_date = None;
        let curves = empty_curves(analysis_date);
        let err = generate(&position, &curves, analysis_date).unwrap_err();
        assert!(matches!(err, CashflowError::MissingMaturityDate { .. }));
    }
}
