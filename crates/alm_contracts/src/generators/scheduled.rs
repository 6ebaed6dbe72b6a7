//! `fixed_scheduled` / `variable_scheduled`: principal amortises against an
//! externally supplied schedule of repayment amounts rather than a formula.

use alm_core::{Cashflow, Date, ForwardCurveSet, Position, ScheduledPrincipalFlow};

use crate::error::CashflowError;
use crate::rate::period_interest;
use crate::schedule::Period;

/// Generates the remaining cashflows for a position whose principal
/// amortisation is driven by an externally supplied schedule.
///
/// `scheduled_flows` may contain flows for many contracts; only those
/// matching `position.contract_id` with a `flow_date` strictly after
/// `analysis_date` are used — flows on or before the analysis date are
/// assumed already reflected in `position.notional`.
pub fn generate(
    position: &Position,
    curves: &ForwardCurveSet,
    analysis_date: Date,
    scheduled_flows: &[ScheduledPrincipalFlow],
) -> Result<Vec<Cashflow>, CashflowError> {
    let mut future_flows: Vec<&ScheduledPrincipalFlow> = scheduled_flows
        .iter()
        .filter(|f| f.contract_id == position.contract_id && f.flow_date > analysis_date)
        .collect();
    if future_flows.is_empty() {
        return Err(CashflowError::MissingPrincipalSchedule {
            contract_id: position.contract_id.clone(),
        });
    }
    future_flows.sort_by_key(|f| f.flow_date);

    let mut flows = Vec::with_capacity(future_flows.len());
    let mut outstanding = position.notional;
    let mut period_start = position.start_date.max(analysis_date);

    for flow in future_flows {
        let period = Period { start: period_start, end: flow.flow_date };
        let interest = period_interest(
            position,
            curves,
            outstanding,
            &period,
            position.daycount_base,
            analysis_date,
        )?;
        let principal = flow.principal_amount.min(outstanding);
        outstanding -= principal;
        flows.push(Cashflow {
            contract_id: position.contract_id.clone(),
            source_contract_type: position.source_contract_type,
            rate_type: position.rate_type,
            side: position.side,
            flow_date: flow.flow_date,
            interest_amount: interest,
            principal_amount: principal,
            index_name: position.index_name.clone(),
        });
        period_start = flow.flow_date;
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
            contract_id: "S1".into(),
            currency: "EUR".into(),
            start_date: Date::from_ymd(2026, 1, 1).unwrap(),
            maturity_date: Some(Date::from_ymd(2028, 1, 1).unwrap()),
            notional: 100.0,
            side: Side::Asset,
            rate_type: RateType::Fixed,
            daycount_base: DayCountConvention::Actual360,
            source_contract_type: SourceContractType::FixedScheduled,
            fixed_rate: Some(0.06),
            index_name: None,
            spread: None,
            repricing_freq_months: None,
            payment_freq_months: None,
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
    fn s4_fixed_scheduled_matches_literal_scenario() {
        // S4: 2y contract, notional=100, 6% ACT/360, flows {2026-07-01: 40,
        // 2027-01-01: 60}, analysis_date=2026-01-01.
        let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
        let position = position();
        let schedule = vec![
            ScheduledPrincipalFlow {
                contract_id: "S1".into(),
                flow_date: Date::from_ymd(2026, 7, 1).unwrap(),
                principal_amount: 40.0,
            },
            ScheduledPrincipalFlow {
                contract_id: "S1".into(),
                flow_date: Date::from_ymd(2027, 1, 1).unwrap(),
                principal_amount: 60.0,
            },
        ];
        let flows = generate(&position, &curves(analysis_date), analysis_date, &schedule).unwrap();
        assert_eq!(flows.len(), 2);

        let yf1 = DayCountConvention::Actual360
            .year_fraction(Date::from_ymd(2026, 1, 1).unwrap(), Date::from_ymd(2026, 7, 1).unwrap());
        let expected_interest_1 = 100.0 * 0.06 * yf1;
        assert_relative_eq!(flows[0].interest_amount, expected_interest_1, epsilon = 1e-9);
        assert_relative_eq!(flows[0].principal_amount, 40.0, epsilon = 1e-12);

        let yf2 = DayCountConvention::Actual360
            .year_fraction(Date::from_ymd(2026, 7, 1).unwrap(), Date::from_ymd(2027, 1, 1).unwrap());
        let expected_interest_2 = 60.0 * 0.06 * yf2;
        assert_relative_eq!(flows[1].interest_amount, expected_interest_2, epsilon = 1e-9);
        assert_relative_eq!(flows[1].principal_amount, 60.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_schedule_errors() {
        let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
        let position = position();
        let err = generate(&position, &curves(analysis_date), analysis_date, &[]).unwrap_err();
        assert!(matches!(err, CashflowError::MissingPrincipalSchedule { .. }));
    }

    #[test]
    fn past_flows_are_ignored() {
        let analysis_date = Date::from_ymd(2026, 7, 2).unwrap();
        let position = position();
        let schedule = vec![
            ScheduledPrincipalFlow {
                contract_id: "S1".into(),
                flow_date: Date::from_ymd(2026, 7, 1).unwrap(),
                principal_amount: 40.0,
            },
            ScheduledPrincipalFlow {
                contract_id: "S1".into(),
                flow_date: Date::from_ymd(2027, 1, 1).unwrap(),
                principal_amount: 60.0,
            },
        ];
        let flows = generate(&position, &curves(analysis_date), analysis_date, &schedule).unwrap();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].flow_date, Date::from_ymd(2027, 1, 1).unwrap());
    }
}
