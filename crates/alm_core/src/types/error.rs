//! Error types shared by the date/tenor value layer.

use thiserror::Error;

/// Errors raised constructing or parsing a [`super::date::Date`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The year/month/day combination does not name a real calendar date.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component as supplied.
        year: i32,
        /// Month component as supplied.
        month: u32,
        /// Day component as supplied.
        day: u32,
    },

    /// The input string could not be parsed as an ISO-8601 date.
    #[error("could not parse date: {0}")]
    ParseError(String),
}

/// Errors raised resolving a [`super::tenor::Tenor`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenorError {
    /// The tenor string does not match any supported grammar.
    #[error("unsupported tenor: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_error_messages_are_informative() {
        let err = DateError::InvalidDate {
            year: 2024,
            month: 2,
            day: 30,
        };
        assert!(err.to_string().contains("2024-02-30"));
    }

    #[test]
    fn tenor_error_message_contains_input() {
        let err = TenorError::Unsupported("5X".to_string());
        assert!(err.to_string().contains("5X"));
    }
}
