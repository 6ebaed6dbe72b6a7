//! The scenario orchestrator (§4.8): runs the base curve set plus a
//! caller-chosen subset of the six regulatory scenarios, computing EVE and
//! NII-12M for each, and collects the results into a deterministic map
//! keyed by scenario id.
//!
//! Stressed curve sets are built lazily, at most once per requested
//! scenario. Scenario evaluation is independent per scenario (§5: "no
//! ordering requirement between their completion") so it is dispatched
//! across a `rayon` thread pool; the margin set used for NII's
//! balance-constant rollover is calibrated once against the base curve set
//! and reused unchanged across scenarios, since it represents a client
//! margin assumption, not a curve-dependent quantity.
//!
//! This is the one place in the computational core that emits `tracing`
//! events: a summary on entry and on completion, and a debug line per
//! stressed curve set built.

use std::collections::{HashMap, HashSet};

use alm_aggregate::{
    calibrate_margin_set, eve_bucketed, eve_exact, nii_12m, nii_monthly_profile, summarise_eve,
    summarise_nii, BucketRow, CalibratedMarginSet, EveResult, MonthlyRow, NiiResult,
};
use alm_contracts::{expand_nmd_positions, generate_cashflows, CashflowError};
use alm_core::{
    Cashflow, Date, ForwardCurveSet, NmdBehaviouralParams, PostShockFloor, Position,
    ScheduledPrincipalFlow, SourceContractType, DEFAULT_EVE_BUCKETS, DEFAULT_OPEN_ENDED_YEARS,
};
use rayon::prelude::*;

use crate::engine::build_regulatory_curve_set;
use crate::error::ScenarioError;
use crate::scenario::RegulatoryScenario;

/// Tunable knobs for one orchestrator run that are not positions, curves,
/// or the scenario list itself.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// The currency's risk-free index name, used for basis preservation and
    /// as the reinvestment rate in NII's balance-constant rollover.
    pub risk_free_index: String,
    /// The index discounted against for EVE.
    pub discount_index: String,
    /// Currency code, selecting the default per-currency shock parameters.
    pub currency: String,
    /// NII horizon, in months (spec default: 12).
    pub nii_horizon_months: u32,
    /// Whether maturing/amortising principal reinvests at the risk-free
    /// rate plus calibrated margin for the remaining horizon.
    pub balance_constant_rollover: bool,
    /// Lookback window for margin calibration; `None` uses the whole book.
    pub margin_lookback_months: Option<u32>,
    /// Post-shock floor envelope.
    pub post_shock_floor: PostShockFloor,
    /// Whether the post-shock floor is applied at all.
    pub apply_post_shock_floor: bool,
    /// Whether non-risk-free index curves preserve their basis spread to
    /// the risk-free curve under stress.
    pub preserve_basis_for_non_risk_free: bool,
    /// Whether to emit the per-bucket EVE breakdown for every scenario run.
    pub include_bucket_breakdown: bool,
    /// Whether to emit the 12-month NII profile for every scenario run.
    pub include_monthly_profile: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            risk_free_index: "RF".to_string(),
            discount_index: "RF".to_string(),
            currency: "EUR".to_string(),
            nii_horizon_months: 12,
            balance_constant_rollover: true,
            margin_lookback_months: None,
            post_shock_floor: PostShockFloor::default(),
            apply_post_shock_floor: true,
            preserve_basis_for_non_risk_free: true,
            include_bucket_breakdown: true,
            include_monthly_profile: true,
        }
    }
}

/// The full output of one orchestrator run: base + per-scenario EVE and
/// NII, plus the (scenario-labelled) bucket and monthly breakdown rows
/// across every scenario that was computed, including base.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrchestratorResult {
    /// EVE summary across base and every requested scenario.
    pub eve: EveResult,
    /// NII-12M summary across base and every requested scenario.
    pub nii: NiiResult,
    /// Per-scenario, per-bucket EVE rows (empty unless
    /// `include_bucket_breakdown` was set).
    pub eve_buckets: Vec<BucketRow>,
    /// Per-scenario, per-month NII rows (empty unless
    /// `include_monthly_profile` was set).
    pub nii_months: Vec<MonthlyRow>,
}

struct ScenarioOutcome {
    scenario_id: String,
    eve: f64,
    nii: f64,
    buckets: Vec<BucketRow>,
    months: Vec<MonthlyRow>,
}

/// Parses and deduplicates the requested scenario identifiers, dropping an
/// explicit `"base"` (it is always computed separately) and rejecting a
/// scenario repeated after case-insensitive normalisation.
fn normalise_requested_scenarios(ids: &[&str]) -> Result<Vec<RegulatoryScenario>, ScenarioError> {
    let mut seen = HashSet::new();
    let mut scenarios = Vec::new();
    for &raw in ids {
        let scenario: RegulatoryScenario = raw.parse().map_err(|_| ScenarioError::UnknownScenario {
            scenario_id: raw.to_string(),
        })?;
        if scenario == RegulatoryScenario::Base {
            continue;
        }
        if !seen.insert(scenario) {
            return Err(ScenarioError::DuplicateScenario {
                name: scenario.id().to_string(),
            });
        }
        scenarios.push(scenario);
    }
    Ok(scenarios)
}

/// Generates the full cashflow set for `positions` against `curves`:
/// every contractual position through its product-type generator, plus one
/// behavioural expansion pass for any `fixed_non_maturity` balances.
///
/// Fails with [`ScenarioError::MissingNmdParams`] if the book contains
/// `fixed_non_maturity` positions but `nmd_params` is `None`.
fn generate_all_cashflows(
    positions: &[Position],
    curves: &ForwardCurveSet,
    analysis_date: Date,
    scheduled_flows: &[ScheduledPrincipalFlow],
    nmd_params: Option<&NmdBehaviouralParams>,
) -> Result<Vec<Cashflow>, CashflowError> {
    let mut flows = Vec::new();
    let mut has_nmd = false;

    for position in positions {
        if position.source_contract_type == SourceContractType::FixedNonMaturity {
            has_nmd = true;
            continue;
        }
        flows.extend(generate_cashflows(position, curves, analysis_date, scheduled_flows)?);
    }

    if has_nmd {
        if let Some(params) = nmd_params {
            flows.extend(expand_nmd_positions(positions, params, analysis_date));
        }
    }

    flows.sort_by(|a, b| (&a.contract_id, a.flow_date).cmp(&(&b.contract_id, b.flow_date)));
    Ok(flows)
}

#[allow(clippy::too_many_arguments)]
fn compute_metrics(
    scenario_id: &str,
    positions: &[Position],
    curves: &ForwardCurveSet,
    analysis_date: Date,
    scheduled_flows: &[ScheduledPrincipalFlow],
    nmd_params: Option<&NmdBehaviouralParams>,
    margin_set: &CalibratedMarginSet,
    config: &OrchestratorConfig,
) -> Result<(f64, f64, Vec<BucketRow>, Vec<MonthlyRow>), ScenarioError> {
    let has_nmd = positions.iter().any(|p| p.source_contract_type == SourceContractType::FixedNonMaturity);
    if has_nmd && nmd_params.is_none() {
        return Err(ScenarioError::MissingNmdParams);
    }

    let flows = generate_all_cashflows(positions, curves, analysis_date, scheduled_flows, nmd_params)
        .map_err(|source| ScenarioError::Cashflow { scenario_id: scenario_id.to_string(), source })?;

    let eve = eve_exact(&flows, curves, analysis_date, &config.discount_index)
        .map_err(|source| ScenarioError::Aggregation { scenario_id: scenario_id.to_string(), source })?;
    let nii = nii_12m(
        positions,
        &flows,
        curves,
        analysis_date,
        config.nii_horizon_months,
        &config.risk_free_index,
        margin_set,
        config.balance_constant_rollover,
    )
    .map_err(|source| ScenarioError::Aggregation { scenario_id: scenario_id.to_string(), source })?;

    let buckets = if config.include_bucket_breakdown {
        eve_bucketed(
            &flows,
            curves,
            analysis_date,
            &config.discount_index,
            DEFAULT_EVE_BUCKETS,
            DEFAULT_OPEN_ENDED_YEARS,
            scenario_id,
        )
        .map_err(|source| ScenarioError::Aggregation { scenario_id: scenario_id.to_string(), source })?
    } else {
        Vec::new()
    };

    let months = if config.include_monthly_profile {
        nii_monthly_profile(
            positions,
            &flows,
            curves,
            analysis_date,
            config.nii_horizon_months,
            &config.risk_free_index,
            margin_set,
            config.balance_constant_rollover,
            scenario_id,
        )
        .map_err(|source| ScenarioError::Aggregation { scenario_id: scenario_id.to_string(), source })?
    } else {
        Vec::new()
    };

    Ok((eve, nii, buckets, months))
}

/// Runs the base curve set plus every scenario in `requested_scenario_ids`
/// (case-insensitively normalised, an explicit `"base"` tolerated as a
/// no-op, duplicates rejected), returning base + per-scenario EVE and NII
/// with deltas and the worst scenario identified for each metric.
pub fn run_scenarios(
    positions: &[Position],
    base_curve_set: &ForwardCurveSet,
    scheduled_flows: &[ScheduledPrincipalFlow],
    nmd_params: Option<&NmdBehaviouralParams>,
    requested_scenario_ids: &[&str],
    config: &OrchestratorConfig,
) -> Result<OrchestratorResult, ScenarioError> {
    let scenarios = normalise_requested_scenarios(requested_scenario_ids)?;
    let analysis_date = base_curve_set.analysis_date();

    tracing::info!(
        positions = positions.len(),
        scenarios = scenarios.len(),
        analysis_date = %analysis_date,
        "running ALM scenario set"
    );

    let margin_set = calibrate_margin_set(
        positions,
        base_curve_set,
        &config.risk_free_index,
        analysis_date,
        config.margin_lookback_months,
    )
    .map_err(|source| ScenarioError::Aggregation { scenario_id: "base".to_string(), source })?;

    let (base_eve, base_nii, mut eve_buckets, mut nii_months) = compute_metrics(
        "base",
        positions,
        base_curve_set,
        analysis_date,
        scheduled_flows,
        nmd_params,
        &margin_set,
        config,
    )?;

    let outcomes: Vec<Result<ScenarioOutcome, ScenarioError>> = scenarios
        .par_iter()
        .map(|&scenario| {
            let scenario_id = scenario.id();
            let stressed = build_regulatory_curve_set(
                base_curve_set,
                scenario,
                &config.risk_free_index,
                &config.currency,
                None,
                &config.post_shock_floor,
                config.apply_post_shock_floor,
                config.preserve_basis_for_non_risk_free,
            )
            .map_err(|source| ScenarioError::Shock { scenario_id: scenario_id.to_string(), source })?;

            tracing::debug!(scenario = scenario_id, "stressed curve set built");

            let (eve, nii, buckets, months) = compute_metrics(
                scenario_id,
                positions,
                &stressed,
                analysis_date,
                scheduled_flows,
                nmd_params,
                &margin_set,
                config,
            )?;

            Ok(ScenarioOutcome { scenario_id: scenario_id.to_string(), eve, nii, buckets, months })
        })
        .collect();

    let mut scenario_eve = HashMap::with_capacity(scenarios.len());
    let mut scenario_nii = HashMap::with_capacity(scenarios.len());
    for outcome in outcomes {
        let outcome = outcome?;
        scenario_eve.insert(outcome.scenario_id.clone(), outcome.eve);
        scenario_nii.insert(outcome.scenario_id.clone(), outcome.nii);
        eve_buckets.extend(outcome.buckets);
        nii_months.extend(outcome.months);
    }

    let eve = summarise_eve(base_eve, scenario_eve);
    let nii = summarise_nii(base_nii, scenario_nii);
    tracing::info!(
        worst_eve_scenario = eve.worst_scenario.as_deref().unwrap_or("none"),
        delta_eve = eve.delta_eve,
        worst_nii_scenario = nii.worst_scenario.as_deref().unwrap_or("none"),
        delta_nii = nii.delta_nii,
        "scenario set complete"
    );

    Ok(OrchestratorResult { eve, nii, eve_buckets, nii_months })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alm_core::{CurvePoint, DayCountConvention, RateType, Side};
    use approx::assert_relative_eq;

    fn base_curve_set() -> ForwardCurveSet {
        let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
        let points = vec![(
            "RF".to_string(),
            CurvePoint {
                year_frac: 1.0,
                zero_rate: 0.02,
                tenor_label: "1Y".into(),
                tenor_date: Date::from_ymd(2027, 1, 1).unwrap(),
            },
        )];
        ForwardCurveSet::from_points(analysis_date, DayCountConvention::Actual365, points).unwrap()
    }

    fn fixed_bullet_maturing(contract_id: &str, side: Side, notional: f64, rate: f64, maturity: Date) -> Position {
        Position {
            contract_id: contract_id.into(),
            currency: "EUR".into(),
            start_date: Date::from_ymd(2026, 1, 1).unwrap(),
            maturity_date: Some(maturity),
            notional,
            side,
            rate_type: RateType::Fixed,
            daycount_base: DayCountConvention::Actual365,
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

    fn fixed_bullet(contract_id: &str, side: Side, notional: f64, rate: f64) -> Position {
        fixed_bullet_maturing(contract_id, side, notional, rate, Date::from_ymd(2027, 1, 1).unwrap())
    }

    #[test]
    fn parallel_up_lowers_eve_for_a_fixed_asset_book() {
        let curves = base_curve_set();
        let positions = vec![fixed_bullet("A1", Side::Asset, 1_000.0, 0.05)];
        let config = OrchestratorConfig {
            risk_free_index: "RF".to_string(),
            discount_index: "RF".to_string(),
            ..OrchestratorConfig::default()
        };

        let result = run_scenarios(&positions, &curves, &[], None, &["parallel-up", "parallel-down"], &config).unwrap();

        // Invariant 5: higher rates everywhere discount a fixed-rate asset's
        // cashflows harder, so EVE(parallel-up) <= EVE(parallel-down).
        assert!(result.eve.scenario_eve["parallel-up"] < result.eve.base_eve);
        assert!(result.eve.scenario_eve["parallel-down"] > result.eve.base_eve);
        assert_eq!(result.eve.worst_scenario, Some("parallel-up".to_string()));
    }

    #[test]
    fn parallel_up_raises_nii_when_a_fixed_asset_rolls_over_within_the_horizon() {
        let curves = base_curve_set();
        // Matures 6 months in, inside the 12-month horizon, so the
        // remaining 6 months reinvest at the stressed risk-free rate plus
        // the margin calibrated off the base book.
        let positions = vec![fixed_bullet_maturing(
            "A1",
            Side::Asset,
            1_000.0,
            0.05,
            Date::from_ymd(2026, 7, 1).unwrap(),
        )];
        let config = OrchestratorConfig {
            risk_free_index: "RF".to_string(),
            discount_index: "RF".to_string(),
            ..OrchestratorConfig::default()
        };

        let result = run_scenarios(&positions, &curves, &[], None, &["parallel-up"], &config).unwrap();

        // The reinvestment leg is priced off the (higher, under
        // parallel-up) risk-free rate plus a margin fixed at calibration
        // time, so a rolled-over asset earns more, not less, under a
        // parallel-up shock.
        assert!(result.nii.scenario_nii_12m["parallel-up"] > result.nii.base_nii_12m);
    }

    #[test]
    fn fixed_linear_nii_is_scenario_invariant_with_no_rollover_inside_the_horizon() {
        // Invariant 10: a fixed-rate contract with no floating coupons and
        // no maturity/amortisation event inside the 12-month horizon has a
        // NII-12M that does not depend on the curve scenario at all.
        let curves = base_curve_set();
        let position = Position {
            contract_id: "FL1".into(),
            currency: "EUR".into(),
            start_date: Date::from_ymd(2026, 1, 1).unwrap(),
            maturity_date: Some(Date::from_ymd(2031, 1, 1).unwrap()),
            notional: 1_000.0,
            side: Side::Asset,
            rate_type: RateType::Fixed,
            daycount_base: DayCountConvention::Actual365,
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
        };
        let config = OrchestratorConfig {
            risk_free_index: "RF".to_string(),
            discount_index: "RF".to_string(),
            ..OrchestratorConfig::default()
        };

        let result = run_scenarios(
            &[position],
            &curves,
            &[],
            None,
            &["parallel-up", "parallel-down", "short-up", "steepener"],
            &config,
        )
        .unwrap();

        for scenario in ["parallel-up", "parallel-down", "short-up", "steepener"] {
            assert_relative_eq!(
                result.nii.scenario_nii_12m[scenario],
                result.nii.base_nii_12m,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn duplicate_scenario_requests_are_rejected() {
        let curves = base_curve_set();
        let positions = vec![fixed_bullet("A1", Side::Asset, 1_000.0, 0.05)];
        let config = OrchestratorConfig::default();
        let err = run_scenarios(&positions, &curves, &[], None, &["parallel-up", "PARALLEL-UP"], &config).unwrap_err();
        assert!(matches!(err, ScenarioError::DuplicateScenario { .. }));
    }

    #[test]
    fn unknown_scenario_identifier_is_rejected() {
        let curves = base_curve_set();
        let positions = vec![fixed_bullet("A1", Side::Asset, 1_000.0, 0.05)];
        let config = OrchestratorConfig::default();
        let err = run_scenarios(&positions, &curves, &[], None, &["not-a-scenario"], &config).unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownScenario { .. }));
    }

    #[test]
    fn explicit_base_request_is_a_tolerated_no_op() {
        let curves = base_curve_set();
        let positions = vec![fixed_bullet("A1", Side::Asset, 1_000.0, 0.05)];
        let config = OrchestratorConfig::default();
        let result = run_scenarios(&positions, &curves, &[], None, &["base", "parallel-up"], &config).unwrap();
        assert_eq!(result.eve.scenario_eve.len(), 1);
        assert!(result.eve.scenario_eve.contains_key("parallel-up"));
    }

    #[test]
    fn nmd_book_without_params_fails_with_missing_nmd_params() {
        let curves = base_curve_set();
        let mut position = fixed_bullet("NMD1", Side::Liability, 1_000.0, 0.01);
        position.source_contract_type = SourceContractType::FixedNonMaturity;
        let config = OrchestratorConfig::default();
        let err = run_scenarios(&[position], &curves, &[], None, &[], &config).unwrap_err();
        assert!(matches!(err, ScenarioError::MissingNmdParams));
    }

    #[test]
    fn bucket_and_month_rows_are_labelled_per_scenario_and_include_base() {
        let curves = base_curve_set();
        let positions = vec![fixed_bullet("A1", Side::Asset, 1_000.0, 0.05)];
        let config = OrchestratorConfig::default();
        let result = run_scenarios(&positions, &curves, &[], None, &["parallel-up"], &config).unwrap();

        let scenario_labels: HashSet<&str> = result.eve_buckets.iter().map(|r| r.scenario.as_str()).collect();
        assert!(scenario_labels.contains("base"));
        assert!(scenario_labels.contains("parallel-up"));

        let month_labels: HashSet<&str> = result.nii_months.iter().map(|r| r.scenario.as_str()).collect();
        assert!(month_labels.contains("base"));
        assert!(month_labels.contains("parallel-up"));

        // monthly sum equals scalar for both base and the stressed scenario
        let base_month_sum: f64 = result.nii_months.iter().filter(|r| r.scenario == "base").map(|r| r.net_nii).sum();
        assert_relative_eq!(base_month_sum, result.nii.base_nii_12m, epsilon = 1e-9);
    }
}
