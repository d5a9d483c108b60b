//! Configuration of a [`Calendar`](crate::Calendar).

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Supported input ranges and the reverse-search window.
///
/// # Example
///
/// ```
/// use chhankitek::{Calendar, Config};
///
/// let config = Config::default().with_be_years(2400..=2700).with_search_radius(3);
/// let calendar = Calendar::with_config(config).unwrap();
/// assert_eq!(&(2400..=2700), calendar.config().be_years());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Gregorian years accepted when converting to Khmer.
    gregorian_years: RangeInclusive<i32>,
    /// Buddhist Era years accepted when converting from Khmer.
    be_years: RangeInclusive<i32>,
    /// Years scanned on each side of the estimated Gregorian year.
    search_radius: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gregorian_years: 1..=9999,
            be_years: 2000..=3000,
            search_radius: 2,
        }
    }
}

impl Config {
    pub fn with_gregorian_years(mut self, years: RangeInclusive<i32>) -> Self {
        self.gregorian_years = years;
        self
    }
    pub fn with_be_years(mut self, years: RangeInclusive<i32>) -> Self {
        self.be_years = years;
        self
    }
    pub fn with_search_radius(mut self, radius: i32) -> Self {
        self.search_radius = radius;
        self
    }

    pub fn gregorian_years(&self) -> &RangeInclusive<i32> {
        &self.gregorian_years
    }
    pub fn be_years(&self) -> &RangeInclusive<i32> {
        &self.be_years
    }
    pub fn search_radius(&self) -> i32 {
        self.search_radius
    }

    /// Validates the configuration.
    ///
    /// Gregorian years must lie within `1..=9999`, the span of the walker's
    /// year table. The BE range must map back into the Gregorian range.
    pub fn validate(&self) -> Result<()> {
        let (g_lo, g_hi) = (*self.gregorian_years.start(), *self.gregorian_years.end());
        if g_lo > g_hi || g_lo < 1 || g_hi > 9999 {
            return Err(Error::InvalidConfig {
                reason: format!("gregorian years {g_lo}..={g_hi} not within 1..=9999"),
            });
        }
        let (b_lo, b_hi) = (*self.be_years.start(), *self.be_years.end());
        if b_lo > b_hi {
            return Err(Error::InvalidConfig {
                reason: format!("BE years {b_lo}..={b_hi} is empty"),
            });
        }
        if !(0..=10).contains(&self.search_radius) {
            return Err(Error::InvalidConfig {
                reason: format!("search radius {} not within 0..=10", self.search_radius),
            });
        }
        let reach_lo = b_lo - 544 - self.search_radius;
        let reach_hi = b_hi - 544 + self.search_radius;
        if reach_lo < g_lo || reach_hi > g_hi {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "BE years {b_lo}..={b_hi} search Gregorian years {reach_lo}..={reach_hi}, \
                     outside {g_lo}..={g_hi}"
                ),
            });
        }
        Ok(())
    }
}
