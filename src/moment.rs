//! Local wall-clock time points.
//!
//! Khmer reckoning only ever compares instants on the same local clock (the
//! New Year moment, midnight of Lerng Sak, midnight of Pisakha Bochea), so a
//! time point here is simply a [`Date`] plus the second of that day. No
//! timezone or leap-second handling is involved.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::date::{self, Date};

const SECONDS_PER_DAY: u32 = 86400;

/// A local wall-clock instant with one-second resolution.
///
/// Ordering is chronological.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Moment {
    date: Date,
    second_of_day: u32,
}

impl Moment {
    /// Creates a moment on `date` at `hour:minute:second`.
    ///
    /// Returns `None` if any time field is outside its natural range.
    pub fn new(date: Date, hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            date,
            second_of_day: hour * 3600 + minute * 60 + second,
        })
    }
    /// Midnight at the start of `date`.
    pub fn midnight(date: Date) -> Self {
        Self {
            date,
            second_of_day: 0,
        }
    }
    pub fn noon(date: Date) -> Self {
        Self {
            date,
            second_of_day: 12 * 3600,
        }
    }
    /// Creates a moment from Gregorian calendar fields, validating every one
    /// of them.
    ///
    /// # Example
    ///
    /// ```
    /// use chhankitek::Moment;
    ///
    /// let m = Moment::from_gregorian(2024, 4, 13, 22, 17, 0).unwrap();
    /// assert_eq!((2024, 4, 13), m.date().gregorian());
    /// assert_eq!((22, 17, 0), m.time());
    /// assert!(Moment::from_gregorian(2023, 2, 29, 0, 0, 0).is_none());
    /// ```
    pub fn from_gregorian(
        year: i32,
        month: i32,
        day: i32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        let max_day = date::days_in_month(year, month)?;
        if !(1..=max_day).contains(&day) {
            return None;
        }
        Self::new(Date::from_gregorian(year, month, day)?, hour, minute, second)
    }

    pub fn date(&self) -> Date {
        self.date
    }
    /// Returns `(hour, minute, second)`.
    pub fn time(&self) -> (u32, u32, u32) {
        let s = self.second_of_day;
        (s / 3600, s / 60 % 60, s % 60)
    }
    pub fn hour(&self) -> u32 {
        self.time().0
    }
    pub fn minute(&self) -> u32 {
        self.time().1
    }
    pub fn second(&self) -> u32 {
        self.time().2
    }

    /// Seconds elapsed since midnight at the start of JDN 0.
    pub fn timestamp(&self) -> u64 {
        u64::from(self.date.jdn()) * u64::from(SECONDS_PER_DAY) + u64::from(self.second_of_day)
    }
}

impl fmt::Display for Moment {
    /// ISO 8601 without offset, e.g. `2024-04-13T22:17:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.time();
        write!(f, "{}T{:02}:{:02}:{:02}", self.date.iso_gregorian(), h, m, s)
    }
}
