//! Symbolic tenor arithmetic (`ON`, `1W`, `3M`, `5Y`, …) resolved against a
//! base date. No business-day adjustment is applied — callers that need
//! one apply it on top of the resolved calendar date.

use std::fmt;
use std::str::FromStr;

use super::date::Date;
use super::error::TenorError;

/// A symbolic tenor: an overnight marker or a whole number of weeks,
/// months or years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tenor {
    /// Overnight (next calendar day).
    Overnight,
    /// A whole number of weeks.
    Weeks(u32),
    /// A whole number of months.
    Months(u32),
    /// A whole number of years.
    Years(u32),
}

impl Tenor {
    /// Resolves this tenor against `base`, producing the offset date.
    pub fn add_to(&self, base: Date) -> Date {
        match self {
            Tenor::Overnight => base.add_days(1),
            Tenor::Weeks(n) => base.add_days(7 * i64::from(*n)),
            Tenor::Months(n) => base.add_months(*n as i32),
            Tenor::Years(n) => base.add_months(12 * *n as i32),
        }
    }
}

impl FromStr for Tenor {
    type Err = TenorError;

    /// Parses the tenor grammar used by the original system: `ON`, `O/N`,
    /// `1D` all mean overnight; otherwise a leading integer followed by
    /// `W`/`M`/`Y` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, TenorError> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "ON" | "O/N" | "1D" => return Ok(Tenor::Overnight),
            _ => {}
        }

        if upper.len() < 2 {
            return Err(TenorError::Unsupported(s.to_string()));
        }
        let (digits, unit) = upper.split_at(upper.len() - 1);
        let n: u32 = digits
            .parse()
            .map_err(|_| TenorError::Unsupported(s.to_string()))?;

        match unit {
            "W" => Ok(Tenor::Weeks(n)),
            "M" => Ok(Tenor::Months(n)),
            "Y" => Ok(Tenor::Years(n)),
            _ => Err(TenorError::Unsupported(s.to_string())),
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tenor::Overnight => write!(f, "ON"),
            Tenor::Weeks(n) => write!(f, "{n}W"),
            Tenor::Months(n) => write!(f, "{n}M"),
            Tenor::Years(n) => write!(f, "{n}Y"),
        }
    }
}
