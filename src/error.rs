//! Error types.

use crate::khmer::KhmerDate;

/// Error type for all fallible operations in this crate.
///
/// Input is validated eagerly at the public entry points, so the first two
/// variants are the ones callers should expect. `ComputationInvariant`
/// signals a defect in the calendar constants or logic, never bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when a Gregorian date or time field is out of range.
    #[error(
        "invalid date: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} ({reason})"
    )]
    InvalidDate {
        year: i32,
        month: i32,
        day: i32,
        hour: u32,
        minute: u32,
        second: u32,
        /// Which field was rejected and why.
        reason: String,
    },

    /// Returned when a Khmer lunar date is malformed or out of the supported
    /// range.
    #[error("invalid Khmer date: {reason}")]
    InvalidKhmerDate { reason: String },

    /// Returned when the reverse search window holds no Gregorian date for
    /// the given Khmer date.
    #[error("no Gregorian date found for Khmer date {date}")]
    NotFound { date: KhmerDate },

    /// Returned when an internal search that must succeed did not.
    #[error("calendar computation failed: {reason}")]
    ComputationInvariant { reason: String },

    /// Returned when a [`Config`](crate::Config) is rejected.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::khmer::{Month, MoonPhase};

    #[test]
    fn error_invalid_date() {
        let err = Error::InvalidDate {
            year: 2023,
            month: 2,
            day: 29,
            hour: 0,
            minute: 0,
            second: 0,
            reason: "February 2023 has 28 days".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date: 2023-02-29 00:00:00 (February 2023 has 28 days)"
        );
    }

    #[test]
    fn error_not_found() {
        let date = KhmerDate::new(1, MoonPhase::Waning, Month::Pisakh, 2568).unwrap();
        let err = Error::NotFound { date };
        assert_eq!(
            err.to_string(),
            "no Gregorian date found for Khmer date 1 waning Pisakh BE 2568"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<Error>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Error>();
    }
}
