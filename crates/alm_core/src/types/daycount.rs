//! Day-count conventions and year-fraction arithmetic.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::date::Date;

/// A year-fraction convention.
///
/// Every convention satisfies, for any dates `d1 <= d2 <= d3`:
/// - `yf(d, d) == 0`
/// - `yf(d1, d2) == -yf(d2, d1)`
/// - `yf(d1, d3) == yf(d1, d2) + yf(d2, d3)` (exactly for Actual/360,
///   Actual/365 and 30/360; to within a day's rounding for Actual/Actual
///   when the split crosses a calendar year boundary).
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/360: actual calendar days divided by 360.
    Actual360,
    /// Actual/365 (Fixed): actual calendar days divided by 365.
    Actual365,
    /// Actual/Actual (ISDA): days apportioned across the calendar years
    /// they fall in, each divided by that year's actual length (365 or 366).
    ActualActual,
    /// 30/360 (US Bond Basis / Bond Basis).
    Thirty360,
}

impl DayCountConvention {
    /// Returns the canonical short name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual360 => "ACT/360",
            DayCountConvention::Actual365 => "ACT/365",
            DayCountConvention::ActualActual => "ACT/ACT",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Year fraction between two `Date`s. Negative when `start > end`;
    /// never panics, so callers can use the sign to mean "before"/"after".
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start == end {
            return 0.0;
        }
        match self {
            DayCountConvention::Actual360 => (end - start) as f64 / 360.0,
            DayCountConvention::Actual365 => (end - start) as f64 / 365.0,
            DayCountConvention::ActualActual => year_fraction_actual_actual(start, end),
            DayCountConvention::Thirty360 => year_fraction_thirty_360(start, end),
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn year_fraction_actual_actual(start: Date, end: Date) -> f64 {
    let (lo, hi, sign) = if start <= end {
        (start.into_inner(), end.into_inner(), 1.0)
    } else {
        (end.into_inner(), start.into_inner(), -1.0)
    };

    let mut total = 0.0_f64;
    let mut cursor = lo;
    while cursor < hi {
        let year = cursor.year();
        let next_year_start = NaiveDate::from_ymd_opt(year + 1, 1, 1)
            .expect("year + 1 is always a representable calendar year");
        let segment_end = hi.min(next_year_start);
        let days_in_segment = (segment_end - cursor).num_days() as f64;
        let days_in_year = if is_leap_year(year) { 366.0 } else { 365.0 };
        total += days_in_segment / days_in_year;
        cursor = segment_end;
    }
    sign * total
}

fn year_fraction_thirty_360(start: Date, end: Date) -> f64 {
    let (lo, hi, sign) = if start <= end {
        (start, end, 1.0)
    } else {
        (end, start, -1.0)
    };

    let y1 = lo.year();
    let m1 = lo.month();
    let d1 = lo.day();
    let y2 = hi.year();
    let m2 = hi.month();
    let d2 = hi.day();

    let d1_adj = if d1 == 31 { 30 } else { d1 };
    let d2_adj = if d2 == 31 && d1_adj == 30 { 30 } else { d2 };

    let days = 360 * (y2 - y1) + 30 * (m2 as i32 - m1 as i32) + (d2_adj as i32 - d1_adj as i32);
    sign * days as f64 / 360.0
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses the wide family of free-text daycount aliases seen in
    /// uploaded position tables: separators (`/`, ` `, `-`), the word
    /// "ACTUAL" in place of "ACT", parenthesised basis qualifiers like
    /// `(US)`/`(NASD)`/`(EUROPEAN)`, and the `30E/360` European variant
    /// (treated as the same Bond Basis convention this engine supports).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut normalised = s.to_uppercase();
        for paren in ["(US)", "(NASD)", "(EUROPEAN)", "(EUR)", "(ISDA)"] {
            normalised = normalised.replace(paren, "");
        }
        let normalised = normalised
            .replace([' ', '-', '_'], "")
            .replace("ACTUAL", "ACT")
            .replace("FIXED", "");

        match normalised.as_str() {
            "ACT/360" | "ACT360" | "A/360" | "A360" => Ok(DayCountConvention::Actual360),
            "ACT/365" | "ACT365" | "A/365" | "A365" | "ACT/365F" | "ACT365F" => {
                Ok(DayCountConvention::Actual365)
            }
            "ACT/ACT" | "ACTACT" | "A/A" | "ACT/ACTISDA" | "ACTACTISDA" => {
                Ok(DayCountConvention::ActualActual)
            }
            "30/360" | "30360" | "30E/360" | "30E360" | "THIRTY360" => {
                Ok(DayCountConvention::Thirty360)
            }
            other => Err(format!("unknown day-count convention: {other}")),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}
