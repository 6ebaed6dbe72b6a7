//! Solves for the single value of a prototype position's notional, rate,
//! maturity, or spread that makes an EVE/NII metric hit a target limit.
//!
//! Notional is linear in the metric, so one evaluation plus a division
//! suffices. The other three variables require bisection over the metric's
//! own (non-linear, but assumed monotonic) response.

use crate::error::SolverError;

/// Which single variable of a prototype position the solver is allowed to
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveFor {
    /// Outstanding notional/balance.
    Notional,
    /// Fixed coupon rate.
    Rate,
    /// Term to maturity, in years.
    Maturity,
    /// Floating-rate spread, in basis points.
    Spread,
}

/// Default search bounds for bisection, matching the original pipeline's
/// constants verbatim. `Notional` has no fixed bounds — it is solved
/// linearly from a single reference evaluation instead.
pub fn default_bounds(solve_for: SolveFor) -> Option<(f64, f64)> {
    match solve_for {
        SolveFor::Notional => None,
        SolveFor::Rate => Some((0.0, 0.20)),
        SolveFor::Maturity => Some((0.25, 50.0)),
        SolveFor::Spread => Some((0.0, 1000.0)),
    }
}

/// Iteration budget and convergence tolerance for [`solve_binary_search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of bisection iterations.
    pub max_iterations: u32,
    /// Convergence tolerance, in the metric's own units.
    pub abs_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: 30,
            abs_tolerance: 1_000.0,
        }
    }
}

/// Outcome of a find-limit search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FindLimitResult {
    /// The value of the solve-for variable found.
    pub found_value: f64,
    /// The metric value actually achieved at `found_value`.
    pub achieved_metric: f64,
    /// Whether the search converged within tolerance (or exactly, for the
    /// linear notional case).
    pub converged: bool,
    /// Number of metric evaluations performed.
    pub iterations: u32,
    /// `|achieved_metric - limit_value|`.
    pub tolerance: f64,
}

/// Solves for notional by linear proportionality: the metric's
/// contribution from one reference-sized instrument scales linearly with
/// its notional, so `metric(N) = (N / ref_notional) * ref_contribution`.
///
/// `ref_contribution` is the metric's value when evaluated for a prototype
/// sized at `reference_notional` alone (i.e. the caller's `compute_metric`
/// applied to just that one instrument's cashflows, not the whole book).
pub fn solve_notional_linear(
    reference_notional: f64,
    ref_contribution: f64,
    limit_value: f64,
    base_metric_value: f64,
) -> FindLimitResult {
    if ref_contribution.abs() < 1e-12 {
        return FindLimitResult {
            found_value: 0.0,
            achieved_metric: base_metric_value,
            converged: false,
            iterations: 1,
            tolerance: f64::INFINITY,
        };
    }

    let needed_delta = limit_value - base_metric_value;
    let found_notional = reference_notional * (needed_delta / ref_contribution);
    let achieved = base_metric_value + ref_contribution * (found_notional / reference_notional);

    FindLimitResult {
        found_value: found_notional.max(0.0),
        achieved_metric: achieved,
        converged: true,
        iterations: 1,
        tolerance: (achieved - limit_value).abs(),
    }
}

/// Bisects `evaluate` (a closure returning the metric's contribution for a
/// candidate value of the solve-for variable) over `[lower, upper]`,
/// targeting `limit_value` against `base_metric_value + evaluate(x)`.
///
/// If both endpoints land on the same side of `limit_value`, returns the
/// closer endpoint with `converged = false` rather than erroring — the
/// target is simply unreachable within the supplied bounds. Likewise, if
/// the iteration budget is exhausted before the tolerance is met, returns
/// the midpoint of the final bracket with `converged = false`.
pub fn solve_binary_search<F>(
    mut evaluate: F,
    limit_value: f64,
    base_metric_value: f64,
    lower: f64,
    upper: f64,
    config: &SolverConfig,
) -> Result<FindLimitResult, SolverError>
where
    F: FnMut(f64) -> Result<f64, SolverError>,
{
    if lower >= upper {
        return Err(SolverError::InvalidBounds { lower, upper });
    }

    let mut metric_lo = base_metric_value + evaluate(lower)?;
    let mut metric_hi = base_metric_value + evaluate(upper)?;
    let mut iterations = 2;

    if (metric_lo - limit_value) * (metric_hi - limit_value) > 0.0 {
        return Ok(if (metric_lo - limit_value).abs() < (metric_hi - limit_value).abs() {
            FindLimitResult {
                found_value: lower,
                achieved_metric: metric_lo,
                converged: false,
                iterations,
                tolerance: (metric_lo - limit_value).abs(),
            }
        } else {
            FindLimitResult {
                found_value: upper,
                achieved_metric: metric_hi,
                converged: false,
                iterations,
                tolerance: (metric_hi - limit_value).abs(),
            }
        });
    }

    let mut lower = lower;
    let mut upper = upper;
    for _ in 0..config.max_iterations {
        let mid = (lower + upper) / 2.0;
        let metric_mid = base_metric_value + evaluate(mid)?;
        iterations += 1;

        if (metric_mid - limit_value).abs() < config.abs_tolerance {
            return Ok(FindLimitResult {
                found_value: mid,
                achieved_metric: metric_mid,
                converged: true,
                iterations,
                tolerance: (metric_mid - limit_value).abs(),
            });
        }

        if (metric_lo - limit_value) * (metric_mid - limit_value) < 0.0 {
            upper = mid;
            metric_hi = metric_mid;
        } else {
            lower = mid;
            metric_lo = metric_mid;
        }
    }

    let mid = (lower + upper) / 2.0;
    Ok(FindLimitResult {
        found_value: mid,
        achieved_metric: (metric_lo + metric_hi) / 2.0,
        converged: false,
        iterations,
        tolerance: (upper - lower).abs(),
    })
}

/// Dispatches to [`solve_notional_linear`] for `SolveFor::Notional`
/// (`reference_value` is the reference notional) or [`solve_binary_search`]
/// otherwise (`reference_value` is unused; `bounds` defaults to
/// [`default_bounds`]).
pub fn find_limit<F>(
    solve_for: SolveFor,
    mut evaluate: F,
    limit_value: f64,
    base_metric_value: f64,
    reference_value: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> Result<FindLimitResult, SolverError>
where
    F: FnMut(f64) -> Result<f64, SolverError>,
{
    match solve_for {
        SolveFor::Notional => {
            let ref_contribution = evaluate(reference_value)?;
            Ok(solve_notional_linear(reference_value, ref_contribution, limit_value, base_metric_value))
        }
        _ => {
            let (lower, upper) = bounds
                .or_else(|| default_bounds(solve_for))
                .expect("non-notional SolveFor always has default bounds");
            solve_binary_search(&mut evaluate, limit_value, base_metric_value, lower, upper, config)
        }
    }
}
