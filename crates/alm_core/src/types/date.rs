//! Calendar date type used throughout the engine.
//!
//! Dates carry day precision only; time-of-day and time zone never enter
//! the computation. `Date` wraps `chrono::NaiveDate` so every value type
//! built on top of it gets cheap `Copy`, `Ord` and `Hash` for free.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::error::DateError;

/// A calendar date with day precision.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Builds a date from year/month/day components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Wraps an existing `chrono::NaiveDate`.
    pub fn from_naive(date: NaiveDate) -> Self {
        Date(date)
    }

    /// Parses an ISO-8601 (`YYYY-MM-DD`) date string.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying `chrono::NaiveDate`.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a whole number of calendar days.
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a whole number of calendar months, clamping the day to the
    /// shorter destination month where necessary (matches the original
    /// tenor arithmetic's use of `relativedelta`).
    pub fn add_months(&self, months: i32) -> Self {
        let total = self.0.year() * 12 + self.0.month() as i32 - 1 + months;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u32;
        let day = self.0.day();
        let clamped = (1..=day.min(31))
            .rev()
            .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
            .expect("month always has at least one valid day");
        Date(clamped)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Number of days between two dates; positive if `self` is later.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl Add<i64> for Date {
    type Output = Date;

    fn add(self, days: i64) -> Date {
        self.add_days(days)
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ymd_rejects_invalid_dates() {
        assert!(Date::from_ymd(2024, 2, 30).is_err());
        assert!(Date::from_ymd(2023, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
    }

    #[test]
    fn subtraction_is_signed() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2024, 1, 11).unwrap();
        assert_eq!(end - start, 10);
        assert_eq!(start - end, -10);
    }

    #[test]
    fn display_is_iso8601() {
        let date = Date::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(format!("{date}"), "2024-06-15");
    }

    #[test]
    fn add_months_clamps_to_shorter_month() {
        let date = Date::from_ymd(2024, 1, 31).unwrap();
        let bumped = date.add_months(1);
        assert_eq!(bumped, Date::from_ymd(2024, 2, 29).unwrap());
    }

    #[test]
    fn add_months_handles_year_rollover() {
        let date = Date::from_ymd(2024, 11, 15).unwrap();
        assert_eq!(date.add_months(3), Date::from_ymd(2025, 2, 15).unwrap());
    }

    #[test]
    fn parse_round_trips_display() {
        let date: Date = "2025-03-01".parse().unwrap();
        assert_eq!(format!("{date}"), "2025-03-01");
    }
}
