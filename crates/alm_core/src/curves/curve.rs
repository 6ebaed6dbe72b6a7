//! A single named forward curve: a sorted set of zero-rate pillars,
//! interpolated log-linearly in discount-factor space, with a
//! constant-instantaneous-forward tail beyond the last pillar.

use crate::types::Date;

use super::error::CurveError;

/// One pillar on a [`ForwardCurve`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Year fraction from the curve's analysis date. Strictly positive.
    pub year_frac: f64,
    /// Continuously-compounded zero rate, decimal (e.g. 0.035 for 3.5%).
    pub zero_rate: f64,
    /// Human-readable tenor label (e.g. `"3M"`, `"5Y"`), carried for reporting.
    pub tenor_label: String,
    /// The pillar's calendar date.
    pub tenor_date: Date,
}

/// A single named yield curve, immutable once built.
///
/// Discount factors are interpolated log-linearly between pillars
/// (piecewise-linear in `ln(DF)`): this is equivalent to assuming a
/// piecewise-constant instantaneous forward rate between pillars, which is
/// the convention the engine's projection and discounting both rely on.
/// Beyond the last pillar, the same instantaneous forward observed on the
/// final segment is held flat (tail extrapolation via the last segment's
/// slope, not a flat zero rate).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForwardCurve {
    index_name: String,
    points: Vec<CurvePoint>,
}

impl ForwardCurve {
    /// Builds a curve from pillar points, sorted by the caller.
    ///
    /// Pillars must be strictly increasing in `year_frac` and every
    /// `year_frac` must be strictly positive; t=0 (today) is implicit and
    /// always anchors `ln(DF) = 0`.
    pub fn new(index_name: impl Into<String>, points: Vec<CurvePoint>) -> Result<Self, CurveError> {
        let index_name = index_name.into();
        if points.is_empty() {
            return Err(CurveError::EmptyCurve { index_name });
        }
        let mut previous: Option<f64> = None;
        for p in &points {
            if p.year_frac <= 0.0 {
                return Err(CurveError::NonPositiveYearFraction {
                    index_name,
                    t: p.year_frac,
                });
            }
            if let Some(prev) = previous {
                if p.year_frac == prev {
                    return Err(CurveError::DuplicatePillar {
                        index_name,
                        t: p.year_frac,
                    });
                }
                if p.year_frac < prev {
                    return Err(CurveError::NonIncreasingPillars {
                        index_name,
                        t: p.year_frac,
                    });
                }
            }
            previous = Some(p.year_frac);
        }
        Ok(Self { index_name, points })
    }

    /// The curve's index name.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// The curve's pillar points, in increasing year-fraction order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    fn ln_df_at_pillar(p: &CurvePoint) -> f64 {
        -p.zero_rate * p.year_frac
    }

    /// Discount factor at year fraction `t` (`t=0` always returns `1.0`).
    pub fn discount_factor(&self, t: f64) -> Result<f64, CurveError> {
        if t == 0.0 {
            return Ok(1.0);
        }
        if t < 0.0 {
            return Err(CurveError::NegativeTime {
                index_name: self.index_name.clone(),
                t,
            });
        }

        let first = &self.points[0];
        if t <= first.year_frac {
            let ln_df = interpolate_segment(0.0, 0.0, first.year_frac, Self::ln_df_at_pillar(first), t);
            return self.finite_df(ln_df.exp(), t);
        }

        let last = &self.points[self.points.len() - 1];
        if t >= last.year_frac {
            let ln_df = if self.points.len() == 1 {
                // single-pillar curve: hold the pillar's own zero rate flat.
                -last.zero_rate * t
            } else {
                let prev = &self.points[self.points.len() - 2];
                let slope = (Self::ln_df_at_pillar(last) - Self::ln_df_at_pillar(prev))
                    / (last.year_frac - prev.year_frac);
                Self::ln_df_at_pillar(last) + slope * (t - last.year_frac)
            };
            return self.finite_df(ln_df.exp(), t);
        }

        for window in self.points.windows(2) {
            let (lo, hi) = (&window[0], &window[1]);
            if t >= lo.year_frac && t <= hi.year_frac {
                let ln_df = interpolate_segment(
                    lo.year_frac,
                    Self::ln_df_at_pillar(lo),
                    hi.year_frac,
                    Self::ln_df_at_pillar(hi),
                    t,
                );
                return self.finite_df(ln_df.exp(), t);
            }
        }
        unreachable!("t is bracketed by construction once the boundary cases above are handled")
    }

    fn finite_df(&self, df: f64, t: f64) -> Result<f64, CurveError> {
        if df.is_finite() && df > 0.0 {
            Ok(df)
        } else {
            Err(CurveError::NumericOverflow {
                index_name: self.index_name.clone(),
                t,
            })
        }
    }

    /// Continuously-compounded zero rate at year fraction `t`, derived from
    /// `discount_factor`. By convention, `zero_rate(0)` returns the first
    /// pillar's rate rather than dividing by zero.
    pub fn zero_rate(&self, t: f64) -> Result<f64, CurveError> {
        if t == 0.0 {
            return Ok(self.points[0].zero_rate);
        }
        if t < 0.0 {
            return Err(CurveError::NegativeTime {
                index_name: self.index_name.clone(),
                t,
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Simple forward rate between `t1` and `t2` (`t1 < t2`), implied by
    /// the ratio of discount factors.
    pub fn forward_rate(&self, t1: f64, t2: f64) -> Result<f64, CurveError> {
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok((df1 / df2 - 1.0) / (t2 - t1))
    }
}

fn interpolate_segment(t0: f64, y0: f64, t1: f64, y1: f64, t: f64) -> f64 {
    let weight = (t - t0) / (t1 - t0);
    y0 + weight * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(t: f64, rate: f64) -> CurvePoint {
        CurvePoint {
            year_frac: t,
            zero_rate: rate,
            tenor_label: format!("{t}Y"),
            tenor_date: Date::from_ymd(2024, 1, 1).unwrap().add_days((t * 365.0) as i64),
        }
    }

    #[test]
    fn discount_factor_at_zero_is_one() {
        let curve = ForwardCurve::new("OIS", vec![point(1.0, 0.03), point(5.0, 0.035)]).unwrap();
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn discount_factor_matches_flat_zero_rate_at_pillar() {
        let curve = ForwardCurve::new("OIS", vec![point(1.0, 0.03), point(5.0, 0.035)]).unwrap();
        let df = curve.discount_factor(1.0).unwrap();
        assert_relative_eq!(df, (-0.03f64 * 1.0).exp(), epsilon = 1e-12);
    }

    #[test]
    fn rejects_empty_curve() {
        let err = ForwardCurve::new("OIS", vec![]).unwrap_err();
        assert!(matches!(err, CurveError::EmptyCurve { .. }));
    }

    #[test]
    fn rejects_non_increasing_pillars() {
        let err = ForwardCurve::new("OIS", vec![point(5.0, 0.03), point(1.0, 0.02)]).unwrap_err();
        assert!(matches!(err, CurveError::NonIncreasingPillars { .. }));
    }

    #[test]
    fn rejects_duplicate_pillar() {
        let err = ForwardCurve::new("OIS", vec![point(1.0, 0.03), point(1.0, 0.04)]).unwrap_err();
        assert!(matches!(err, CurveError::DuplicatePillar { .. }));
    }

    #[test]
    fn rejects_non_positive_year_fraction() {
        let err = ForwardCurve::new("OIS", vec![point(0.0, 0.03)]).unwrap_err();
        assert!(matches!(err, CurveError::NonPositiveYearFraction { .. }));
    }

    #[test]
    fn tail_extrapolation_continues_last_segment_slope() {
        let curve = ForwardCurve::new("OIS", vec![point(1.0, 0.03), point(2.0, 0.032)]).unwrap();
        let ln_df_1 = -0.03_f64;
        let ln_df_2 = -0.032_f64 * 2.0;
        let slope = ln_df_2 - ln_df_1;
        let expected_ln_df_3 = ln_df_2 + slope;
        let df3 = curve.discount_factor(3.0).unwrap();
        assert_relative_eq!(df3.ln(), expected_ln_df_3, epsilon = 1e-9);
    }

    #[test]
    fn zero_rate_recovers_flat_input_rate_at_pillar() {
        let curve = ForwardCurve::new("OIS", vec![point(1.0, 0.03), point(5.0, 0.03)]).unwrap();
        let zr = curve.zero_rate(5.0).unwrap();
        assert_relative_eq!(zr, 0.03, epsilon = 1e-9);
    }

    #[test]
    fn zero_rate_at_origin_returns_first_pillar_rate() {
        let curve = ForwardCurve::new("OIS", vec![point(1.0, 0.03), point(5.0, 0.04)]).unwrap();
        assert_relative_eq!(curve.zero_rate(0.0).unwrap(), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn negative_time_is_rejected() {
        let curve = ForwardCurve::new("OIS", vec![point(1.0, 0.03)]).unwrap();
        assert!(matches!(
            curve.discount_factor(-1.0).unwrap_err(),
            CurveError::NegativeTime { .. }
        ));
    }

    #[test]
    fn discount_factor_is_monotonically_decreasing_for_positive_rates() {
        let curve = ForwardCurve::new(
            "OIS",
            vec![point(0.25, 0.02), point(1.0, 0.025), point(5.0, 0.03), point(10.0, 0.035)],
        )
        .unwrap();
        let mut prev = 1.0;
        for t in [0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 7.0, 10.0, 15.0] {
            let df = curve.discount_factor(t).unwrap();
            assert!(df <= prev, "discount factor should decrease with t (t={t})");
            prev = df;
        }
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn curve_strategy() -> impl Strategy<Value = ForwardCurve> {
            proptest::collection::vec((0.1f64..30.0, -0.02f64..0.08), 2..8).prop_map(|mut raw| {
                raw.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
                raw.dedup_by(|a, b| a.0 == b.0);
                if raw.len() < 2 {
                    let (t, r) = raw[0];
                    raw.push((t + 1.0, r));
                }
                let points: Vec<CurvePoint> = raw.into_iter().map(|(t, r)| point(t, r)).collect();
                ForwardCurve::new("TEST", points).unwrap()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn discount_factor_at_zero_is_always_one(curve in curve_strategy()) {
                prop_assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
            }

            #[test]
            fn discount_factor_is_always_positive_and_finite(curve in curve_strategy(), t in 0.0f64..50.0) {
                let df = curve.discount_factor(t).unwrap();
                prop_assert!(df.is_finite());
                prop_assert!(df > 0.0);
            }
        }
    }
}
