//! Applies a regulatory scenario to a [`ForwardCurveSet`], rebuilding a
//! stressed set from the flat points table.

use std::collections::HashMap;

use alm_core::{default_shock_parameters, CurveError, ForwardCurveSet, PostShockFloor, ShockParameters};

use crate::error::ShockError;
use crate::scenario::RegulatoryScenario;

fn apply_shock(
    base_rate: f64,
    t_years: f64,
    scenario: RegulatoryScenario,
    params: &ShockParameters,
    floor: &PostShockFloor,
    apply_post_shock_floor: bool,
) -> f64 {
    let raw = base_rate + scenario.delta(t_years, params);
    if !apply_post_shock_floor {
        return raw;
    }
    let floor_t = floor.floor_at(t_years);
    // Observed-lower rule: a base rate already below the floor is
    // preserved rather than lifted back up to it.
    let effective_floor = if base_rate < floor_t { base_rate } else { floor_t };
    raw.max(effective_floor)
}

fn stressed_rate(
    base_set: &ForwardCurveSet,
    index_name: &str,
    t_years: f64,
    risk_free_index: &str,
    scenario: RegulatoryScenario,
    params: &ShockParameters,
    floor: &PostShockFloor,
    apply_post_shock_floor: bool,
    preserve_basis_for_non_risk_free: bool,
) -> Result<f64, CurveError> {
    if preserve_basis_for_non_risk_free && index_name != risk_free_index {
        let rf_base = base_set.get_or_err(risk_free_index)?.zero_rate(t_years)?;
        let rf_stressed = apply_shock(rf_base, t_years, scenario, params, floor, apply_post_shock_floor);
        let idx_base = base_set.get_or_err(index_name)?.zero_rate(t_years)?;
        let basis = idx_base - rf_base;
        Ok(rf_stressed + basis)
    } else {
        let base_rate = base_set.get_or_err(index_name)?.zero_rate(t_years)?;
        Ok(apply_shock(base_rate, t_years, scenario, params, floor, apply_post_shock_floor))
    }
}

/// Builds a stressed curve set for one regulatory scenario.
///
/// `shock_parameters` defaults to [`default_shock_parameters`] for
/// `currency` when `None`. `floor` is applied per the "observed lower" rule
/// unless `apply_post_shock_floor` is `false`. Basis spreads between
/// non-risk-free indices and `risk_free_index` are preserved unless
/// `preserve_basis_for_non_risk_free` is `false`, in which case every index
/// is shocked from its own base rate instead of the risk-free curve's.
#[allow(clippy::too_many_arguments)]
pub fn build_regulatory_curve_set(
    base_set: &ForwardCurveSet,
    scenario: RegulatoryScenario,
    risk_free_index: &str,
    currency: &str,
    shock_parameters: Option<ShockParameters>,
    floor: &PostShockFloor,
    apply_post_shock_floor: bool,
    preserve_basis_for_non_risk_free: bool,
) -> Result<ForwardCurveSet, ShockError> {
    let scenario_id = scenario.id().to_string();
    base_set
        .require_indices(&[risk_free_index])
        .map_err(|source| ShockError::Curve { scenario_id: scenario_id.clone(), source })?;

    let params = shock_parameters.unwrap_or_else(|| default_shock_parameters(currency));

    let mut new_points = Vec::with_capacity(base_set.points_table().len());
    for (index_name, point) in base_set.points_table() {
        let rate = stressed_rate(
            base_set,
            index_name,
            point.year_frac,
            risk_free_index,
            scenario,
            &params,
            floor,
            apply_post_shock_floor,
            preserve_basis_for_non_risk_free,
        )
        .map_err(|source| ShockError::Curve { scenario_id: scenario_id.clone(), source })?;
        let mut stressed_point = point.clone();
        stressed_point.zero_rate = rate;
        new_points.push((index_name.clone(), stressed_point));
    }

    ForwardCurveSet::from_points(base_set.analysis_date(), base_set.daycount_base(), new_points)
        .map_err(|source| ShockError::Curve { scenario_id, source })
}

/// Builds stressed curve sets for several scenarios, each at most once.
#[allow(clippy::too_many_arguments)]
pub fn build_regulatory_curve_sets(
    base_set: &ForwardCurveSet,
    scenarios: &[RegulatoryScenario],
    risk_free_index: &str,
    currency: &str,
    shock_parameters: Option<ShockParameters>,
    floor: &PostShockFloor,
    apply_post_shock_floor: bool,
    preserve_basis_for_non_risk_free: bool,
) -> Result<HashMap<RegulatoryScenario, ForwardCurveSet>, ShockError> {
    let mut out = HashMap::with_capacity(scenarios.len());
    for &scenario in scenarios {
        if out.contains_key(&scenario) {
            continue;
        }
        let set = build_regulatory_curve_set(
            base_set,
            scenario,
            risk_free_index,
            currency,
            shock_parameters,
            floor,
            apply_post_shock_floor,
            preserve_basis_for_non_risk_free,
        )?;
        out.insert(scenario, set);
    }
    Ok(out)
}
