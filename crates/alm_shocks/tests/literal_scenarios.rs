//! End-to-end reproductions of the engine's literal numeric scenarios,
//! wiring cashflow generation, the shock engine and EVE/NII aggregation
//! together the way a caller actually would.

use alm_aggregate::eve_exact;
use alm_contracts::generate_cashflows;
use alm_core::{CurvePoint, Date, DayCountConvention, ForwardCurveSet, Position, RateType, Side, SourceContractType};
use alm_shocks::{build_regulatory_curve_set, RegulatoryScenario};
use approx::assert_relative_eq;

fn flat_two_curve_set(analysis_date: Date) -> ForwardCurveSet {
    let points = vec![
        (
            "RF".to_string(),
            CurvePoint {
                year_frac: 1.0,
                zero_rate: 0.02,
                tenor_label: "1Y".into(),
                tenor_date: analysis_date.add_days(365),
            },
        ),
        (
            "EURIBOR_3M".to_string(),
            CurvePoint {
                year_frac: 1.0,
                zero_rate: 0.02,
                tenor_label: "1Y".into(),
                tenor_date: analysis_date.add_days(365),
            },
        ),
    ];
    ForwardCurveSet::from_points(analysis_date, DayCountConvention::Actual365, points).unwrap()
}

fn variable_bullet_repriced_at_analysis(notional: f64) -> Position {
    Position {
        contract_id: "V1".into(),
        currency: "EUR".into(),
        start_date: Date::from_ymd(2026, 1, 1).unwrap(),
        maturity_date: Some(Date::from_ymd(2027, 1, 1).unwrap()),
        notional,
        side: Side::Asset,
        rate_type: RateType::Float,
        daycount_base: DayCountConvention::Actual365,
        source_contract_type: SourceContractType::VariableBullet,
        fixed_rate: None,
        index_name: Some("EURIBOR_3M".into()),
        spread: Some(0.01),
        repricing_freq_months: Some(12),
        payment_freq_months: Some(12),
        next_reprice_date: None,
        floor_rate: None,
        cap_rate: None,
        annuity_payment_mode: None,
    }
}

#[test]
fn s2_variable_bullet_base_eve_matches_literal_value() {
    let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
    let curves = flat_two_curve_set(analysis_date);
    let position = variable_bullet_repriced_at_analysis(100.0);

    let flows = generate_cashflows(&position, &curves, analysis_date, &[]).unwrap();
    let eve = eve_exact(&flows, &curves, analysis_date, "RF").unwrap();

    let expected = 103.0 * (-0.02_f64).exp();
    assert_relative_eq!(eve, expected, epsilon = 1e-6);
}

#[test]
fn s2_variable_bullet_parallel_up_eve_matches_literal_value() {
    let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
    let curves = flat_two_curve_set(analysis_date);
    let position = variable_bullet_repriced_at_analysis(100.0);

    let stressed = build_regulatory_curve_set(
        &curves,
        RegulatoryScenario::ParallelUp,
        "RF",
        "EUR",
        None,
        &Default::default(),
        true,
        true,
    )
    .unwrap();

    let flows = generate_cashflows(&position, &stressed, analysis_date, &[]).unwrap();
    let eve = eve_exact(&flows, &stressed, analysis_date, "RF").unwrap();

    let expected = 105.0 * (-0.04_f64).exp();
    assert_relative_eq!(eve, expected, epsilon = 1e-6);
}
