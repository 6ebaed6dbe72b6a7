//! A set of named curves sharing one analysis date and day-count base,
//! with an explicit or inferred discount curve.

use std::collections::HashMap;

use crate::types::{DayCountConvention, Date, Position, RateType};

use super::curve::{CurvePoint, ForwardCurve};
use super::error::CurveError;

/// The name the set falls back to for the discount curve when none has
/// been explicitly designated.
const DEFAULT_DISCOUNT_CURVE_NAME: &str = "Discount";

/// A grouped set of curves as of one analysis date.
///
/// Retains the flat pillar-points table it was built from so regulatory
/// shocks (`alm_shocks`) can perturb it row-wise and rebuild a stressed
/// set without needing to re-derive curve structure from scratch.
#[derive(Debug, Clone)]
pub struct ForwardCurveSet {
    analysis_date: Date,
    daycount_base: DayCountConvention,
    curves: HashMap<String, ForwardCurve>,
    points_table: Vec<(String, CurvePoint)>,
    discount_curve_name: Option<String>,
}

impl ForwardCurveSet {
    /// Builds a curve set from a flat `(index_name, point)` table, grouping
    /// points by index and constructing one [`ForwardCurve`] per index.
    pub fn from_points(
        analysis_date: Date,
        daycount_base: DayCountConvention,
        points_table: Vec<(String, CurvePoint)>,
    ) -> Result<Self, CurveError> {
        let mut grouped: HashMap<String, Vec<CurvePoint>> = HashMap::new();
        for (index_name, point) in &points_table {
            grouped
                .entry(index_name.clone())
                .or_default()
                .push(point.clone());
        }

        let mut curves = HashMap::new();
        for (index_name, mut points) in grouped {
            points.sort_by(|a, b| a.year_frac.partial_cmp(&b.year_frac).unwrap());
            let curve = ForwardCurve::new(index_name.clone(), points)?;
            curves.insert(index_name, curve);
        }

        Ok(Self {
            analysis_date,
            daycount_base,
            curves,
            points_table,
            discount_curve_name: None,
        })
    }

    /// The set's analysis (as-of) date.
    pub fn analysis_date(&self) -> Date {
        self.analysis_date
    }

    /// The set's shared day-count base.
    pub fn daycount_base(&self) -> DayCountConvention {
        self.daycount_base
    }

    /// The flat pillar-points table this set was built from.
    pub fn points_table(&self) -> &[(String, CurvePoint)] {
        &self.points_table
    }

    /// Designates which curve acts as the discount curve.
    pub fn set_discount_curve(&mut self, index_name: impl Into<String>) {
        self.discount_curve_name = Some(index_name.into());
    }

    /// Returns a curve by index name.
    pub fn get(&self, index_name: &str) -> Option<&ForwardCurve> {
        self.curves.get(index_name)
    }

    /// Returns a curve by index name, or an error listing what is present.
    pub fn get_or_err(&self, index_name: &str) -> Result<&ForwardCurve, CurveError> {
        self.get(index_name).ok_or_else(|| CurveError::UnknownIndex {
            index_name: index_name.to_string(),
            available: self.curve_names(),
        })
    }

    /// Returns the designated discount curve, falling back to a curve
    /// literally named `"Discount"` when none was explicitly set.
    pub fn discount_curve(&self) -> Option<&ForwardCurve> {
        if let Some(name) = &self.discount_curve_name {
            return self.curves.get(name);
        }
        self.curves.get(DEFAULT_DISCOUNT_CURVE_NAME)
    }

    /// Same as [`Self::discount_curve`] but returns a structured error.
    pub fn discount_curve_or_err(&self) -> Result<&ForwardCurve, CurveError> {
        self.discount_curve().ok_or(CurveError::NoDiscountCurve)
    }

    /// Validates that every name in `required` is present in the set.
    pub fn require_indices(&self, required: &[&str]) -> Result<(), CurveError> {
        for name in required {
            if !self.curves.contains_key(*name) {
                return Err(CurveError::UnknownIndex {
                    index_name: name.to_string(),
                    available: self.curve_names(),
                });
            }
        }
        Ok(())
    }

    /// Validates that every floating-rate position in `positions` names an
    /// `index_name` that is present in this set. Fixed-rate and non-maturity
    /// positions are not checked.
    pub fn require_float_index_coverage(&self, positions: &[Position]) -> Result<(), CurveError> {
        for position in positions {
            if position.rate_type != RateType::Float {
                continue;
            }
            match &position.index_name {
                Some(index_name) if self.curves.contains_key(index_name) => {}
                other => {
                    return Err(CurveError::MissingFloatIndex {
                        contract_id: position.contract_id.clone(),
                        index_name: other.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The discount factor from `index_name` at calendar date `d`, resolved
    /// against the set's analysis date and day-count base.
    pub fn df_on_date(&self, index_name: &str, d: Date) -> Result<f64, CurveError> {
        let curve = self.get_or_err(index_name)?;
        let t = self.daycount_base.year_fraction(self.analysis_date, d);
        curve.discount_factor(t.max(0.0))
    }

    /// The zero rate from `index_name` at calendar date `d`.
    pub fn rate_on_date(&self, index_name: &str, d: Date) -> Result<f64, CurveError> {
        let curve = self.get_or_err(index_name)?;
        let t = self.daycount_base.year_fraction(self.analysis_date, d);
        curve.zero_rate(t.max(0.0))
    }

    /// Number of curves in the set.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the set has no curves.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// All index names present, order unspecified.
    pub fn curve_names(&self) -> Vec<String> {
        self.curves.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(t: f64, rate: f64) -> CurvePoint {
        CurvePoint {
            year_frac: t,
            zero_rate: rate,
            tenor_label: format!("{t}Y"),
            tenor_date: Date::from_ymd(2024, 1, 1).unwrap().add_days((t * 365.0) as i64),
        }
    }

    fn sample_set() -> ForwardCurveSet {
        let analysis_date = Date::from_ymd(2024, 1, 1).unwrap();
        let points = vec![
            ("OIS".to_string(), point(1.0, 0.03)),
            ("OIS".to_string(), point(5.0, 0.035)),
            ("EURIBOR_3M".to_string(), point(0.25, 0.031)),
            ("EURIBOR_3M".to_string(), point(5.0, 0.037)),
        ];
        ForwardCurveSet::from_points(analysis_date, DayCountConvention::Actual365, points).unwrap()
    }

    #[test]
    fn groups_points_by_index_name() {
        let set = sample_set();
        assert_eq!(set.len(), 2);
        assert!(set.get("OIS").is_some());
        assert!(set.get("EURIBOR_3M").is_some());
    }

    #[test]
    fn unknown_index_lookup_errors_with_available_list() {
        let set = sample_set();
        let err = set.get_or_err("SOFR").unwrap_err();
        match err {
            CurveError::UnknownIndex { index_name, available } => {
                assert_eq!(index_name, "SOFR");
                assert_eq!(available.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn discount_curve_falls_back_to_name_discount() {
        let analysis_date = Date::from_ymd(2024, 1, 1).unwrap();
        let points = vec![("Discount".to_string(), point(1.0, 0.03))];
        let set =
            ForwardCurveSet::from_points(analysis_date, DayCountConvention::Actual365, points)
                .unwrap();
        assert!(set.discount_curve().is_some());
    }

    #[test]
    fn discount_curve_uses_explicit_designation_over_fallback_name() {
        let analysis_date = Date::from_ymd(2024, 1, 1).unwrap();
        let points = vec![
            ("Discount".to_string(), point(1.0, 0.03)),
            ("OIS".to_string(), point(1.0, 0.02)),
        ];
        let mut set =
            ForwardCurveSet::from_points(analysis_date, DayCountConvention::Actual365, points)
                .unwrap();
        set.set_discount_curve("OIS");
        let curve = set.discount_curve().unwrap();
        assert_eq!(curve.index_name(), "OIS");
    }

    #[test]
    fn no_discount_curve_errors_when_none_designated_or_named_discount() {
        let analysis_date = Date::from_ymd(2024, 1, 1).unwrap();
        let points = vec![("OIS".to_string(), point(1.0, 0.03))];
        let set =
            ForwardCurveSet::from_points(analysis_date, DayCountConvention::Actual365, points)
                .unwrap();
        assert!(matches!(
            set.discount_curve_or_err().unwrap_err(),
            CurveError::NoDiscountCurve
        ));
    }

    #[test]
    fn df_on_date_resolves_year_fraction_from_analysis_date() {
        let set = sample_set();
        let d = Date::from_ymd(2025, 1, 1).unwrap();
        let df = set.df_on_date("OIS", d).unwrap();
        assert!(df < 1.0 && df > 0.0);
    }

    #[test]
    fn require_indices_reports_first_missing() {
        let set = sample_set();
        assert!(set.require_indices(&["OIS", "EURIBOR_3M"]).is_ok());
        assert!(set.require_indices(&["OIS", "SOFR"]).is_err());
    }

    fn float_position(contract_id: &str, index_name: Option<&str>) -> Position {
        use crate::types::{DayCountConvention, SourceContractType};
        Position {
            contract_id: contract_id.to_string(),
            currency: "EUR".to_string(),
            start_date: Date::from_ymd(2024, 1, 1).unwrap(),
            maturity_date: Some(Date::from_ymd(2025, 1, 1).unwrap()),
            notional: 100.0,
            side: crate::types::Side::Asset,
            rate_type: RateType::Float,
            daycount_base: DayCountConvention::Actual360,
            source_contract_type: SourceContractType::VariableBullet,
            fixed_rate: None,
            index_name: index_name.map(str::to_string),
            spread: Some(0.01),
            repricing_freq_months: Some(3),
            payment_freq_months: Some(3),
            next_reprice_date: None,
            floor_rate: None,
            cap_rate: None,
            annuity_payment_mode: None,
        }
    }

    #[test]
    fn require_float_index_coverage_passes_when_index_present() {
        let set = sample_set();
        let positions = vec![float_position("P1", Some("OIS"))];
        assert!(set.require_float_index_coverage(&positions).is_ok());
    }

    #[test]
    fn require_float_index_coverage_fails_when_index_missing_from_set() {
        let set = sample_set();
        let positions = vec![float_position("P1", Some("SOFR"))];
        let err = set.require_float_index_coverage(&positions).unwrap_err();
        assert!(matches!(err, CurveError::MissingFloatIndex { contract_id, .. } if contract_id == "P1"));
    }

    #[test]
    fn require_float_index_coverage_fails_when_index_name_absent() {
        let set = sample_set();
        let positions = vec![float_position("P1", None)];
        let err = set.require_float_index_coverage(&positions).unwrap_err();
        assert!(matches!(err, CurveError::MissingFloatIndex { index_name: None, .. }));
    }

    #[test]
    fn require_float_index_coverage_ignores_fixed_rate_positions() {
        let set = sample_set();
        let mut position = float_position("P1", None);
        position.rate_type = RateType::Fixed;
        position.fixed_rate = Some(0.05);
        assert!(set.require_float_index_coverage(&[position]).is_ok());
    }
}
