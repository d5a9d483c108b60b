//! Conversion between Gregorian moments and the Khmer calendar.

use std::collections::HashMap;

use parking_lot::Mutex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::new_year::{self, NewYear};
use super::{AnimalYear, KhmerDate, Month, MoonPhase, Sak, Weekday, walker};
use crate::config::Config;
use crate::date::{self, Date};
use crate::error::{Error, Result};
use crate::moment::Moment;

/// How the BE year of a lunar date is settled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Mode {
    /// From the Gregorian month alone. Used while locating Visakha Bochea
    /// itself.
    Searching,
    /// Against the exact Visakha Bochea moment of the year.
    Exact,
}

/// Hours checked on the two days around Visakha Bochea, where the BE year
/// may differ within the day.
const BOUNDARY_HOURS: [u32; 5] = [0, 6, 12, 18, 23];

/// The Khmer reading of a Gregorian moment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conversion {
    /// The converted moment.
    pub moment: Moment,
    pub lunar: KhmerDate,
    /// Jolak Sakaraj year, turning at Lerng Sak.
    pub js_year: i32,
    /// Turning at the New Year moment.
    pub animal_year: AnimalYear,
    pub sak: Sak,
}

impl Conversion {
    pub fn weekday(&self) -> Weekday {
        Weekday::of(self.moment.date())
    }
    /// Formats with a pattern, see [`fmt::format`](super::fmt::format).
    pub fn format(&self, pattern: &str) -> String {
        super::fmt::format(self, Some(pattern))
    }
}

impl std::fmt::Display for Conversion {
    /// The default Khmer sentence, e.g.
    /// `ថ្ងៃចន្ទ ១កើត ខែបុស្ស ឆ្នាំកុរ ឯកស័ក ពុទ្ធសករាជ ២៤៤៣`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&super::fmt::format(self, None))
    }
}

/// Khmer calendar converter.
///
/// Holds the configuration and memoizes the New Year and Visakha Bochea
/// moment of each Gregorian year. The caches never expire; a `Calendar` is
/// `Send + Sync` and can be shared.
///
/// # Example
///
/// ```
/// use chhankitek::Calendar;
/// use chhankitek::khmer::{AnimalYear, Month, MoonPhase};
///
/// let calendar = Calendar::new();
/// let kh = calendar.from_gregorian(2024, 4, 14, 0, 0, 0).unwrap();
/// assert_eq!((6, MoonPhase::Waxing, Month::Chetr, 2567), kh.lunar.parts());
/// assert_eq!(AnimalYear::Dragon, kh.animal_year);
///
/// let date = calendar.from_khmer(6, 0, 4, 2567).unwrap();
/// assert_eq!((2024, 4, 14), date.gregorian());
/// ```
#[derive(Debug, Default)]
pub struct Calendar {
    config: Config,
    new_years: Mutex<HashMap<i32, NewYear>>,
    pisakha_bochea: Mutex<HashMap<i32, Moment>>,
}

impl Calendar {
    /// Creates a calendar with the default [`Config`].
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates a calendar, validating `config`.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn year_out_of_range(&self, year: i32) -> Option<String> {
        let years = self.config.gregorian_years();
        (!years.contains(&year))
            .then(|| format!("year {year} not within {}..={}", years.start(), years.end()))
    }

    fn check_year(&self, year: i32) -> Result<()> {
        match self.year_out_of_range(year) {
            None => Ok(()),
            Some(reason) => Err(Error::InvalidDate {
                year,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
                reason,
            }),
        }
    }

    /// Converts a Gregorian date and time.
    ///
    /// Fails with [`Error::InvalidDate`] if any field is out of range, or the
    /// year is outside the configured range.
    pub fn from_gregorian(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Conversion> {
        let invalid = |reason: String| Error::InvalidDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
            reason,
        };
        if let Some(reason) = self.year_out_of_range(year) {
            return Err(invalid(reason));
        }
        let max_day = date::days_in_month(year, month)
            .ok_or_else(|| invalid(format!("month {month} not within 1..=12")))?;
        if !(1..=max_day).contains(&day) {
            return Err(invalid(format!("month {month} of {year} has {max_day} days")));
        }
        let moment = Moment::from_gregorian(year, month, day, hour, minute, second)
            .ok_or_else(|| invalid("time of day out of range".into()))?;
        self.convert(moment)
    }

    /// Converts a moment.
    pub fn from_moment(&self, moment: Moment) -> Result<Conversion> {
        self.check_year(moment.date().gregorian().0)?;
        self.convert(moment)
    }

    /// Finds the Gregorian date of a Khmer date given by indices, as
    /// [`to_gregorian`](Self::to_gregorian) does.
    ///
    /// `phase` is 0 for waxing and 1 for waning; `month` is `0..=13` from
    /// Mikasar. Fails with [`Error::InvalidKhmerDate`] for indices out of
    /// range.
    pub fn from_khmer(&self, day: u32, phase: u32, month: u32, be_year: i32) -> Result<Date> {
        let phase = MoonPhase::try_from(phase)?;
        let month = Month::try_from(month)?;
        let date = KhmerDate::new(day, phase, month, be_year).ok_or_else(|| {
            Error::InvalidKhmerDate {
                reason: format!("day {day} not within 1..=15"),
            }
        })?;
        self.to_gregorian(date)
    }

    /// Finds the Gregorian date of a Khmer date.
    ///
    /// Scans the configured number of years around `be_year - 544` for days
    /// converting to `date`. Several matches are resolved in favour of the
    /// year closest to that estimate, then of a match that holds at noon.
    ///
    /// Fails with [`Error::InvalidKhmerDate`] if the BE year is outside the
    /// configured range, and with [`Error::NotFound`] if no day matches, as
    /// for a 30th day in a 29-day month.
    #[tracing::instrument(skip(self))]
    pub fn to_gregorian(&self, date: KhmerDate) -> Result<Date> {
        let be_years = self.config.be_years();
        if !be_years.contains(&date.be_year()) {
            return Err(Error::InvalidKhmerDate {
                reason: format!(
                    "BE year {} not within {}..={}",
                    date.be_year(),
                    be_years.start(),
                    be_years.end()
                ),
            });
        }

        let approx = super::be_to_ad(date.be_year());
        let radius = self.config.search_radius();
        let around_visakha_bochea = date.month() == Month::Pisakh
            && matches!(
                (date.day(), date.phase()),
                (15, MoonPhase::Waxing) | (1, MoonPhase::Waning)
            );
        let hours: &[u32] = if around_visakha_bochea {
            &BOUNDARY_HOURS
        } else {
            &[0]
        };
        let target = (date.month(), date.day_number());

        let mut candidates = Vec::new();
        for year in approx - radius..=approx + radius {
            for month in 1..=12 {
                let days = date::days_in_month(year, month).unwrap_or(0);
                for day in 1..=days {
                    let Some(g) = Date::from_gregorian(year, month, day) else {
                        continue;
                    };
                    // Month and day do not depend on the time of day.
                    if walker::walk(g) != target {
                        continue;
                    }
                    for &hour in hours {
                        let Some(at) = Moment::new(g, hour, 0, 0) else {
                            continue;
                        };
                        if self.lunar_date(at, Mode::Exact)? == date {
                            candidates.push(g);
                            break;
                        }
                    }
                }
            }
        }
        debug!(candidates = candidates.len(), "reverse search done");

        let distance = |d: &Date| (d.gregorian().0 - approx).abs();
        let closest = candidates
            .iter()
            .map(distance)
            .min()
            .ok_or(Error::NotFound { date })?;
        let closest: Vec<Date> = candidates
            .into_iter()
            .filter(|d| distance(d) == closest)
            .collect();
        if let [only] = closest.as_slice() {
            return Ok(*only);
        }
        for &c in &closest {
            if self.lunar_date(Moment::noon(c), Mode::Exact)? == date {
                return Ok(c);
            }
        }
        Ok(closest[0])
    }

    /// Returns the New Year moment (Moha Songkran) of a Gregorian year.
    ///
    /// # Example
    ///
    /// ```
    /// use chhankitek::Calendar;
    ///
    /// let calendar = Calendar::new();
    /// assert_eq!("2011-04-14T13:12:00", calendar.new_year(2011).unwrap().to_string());
    /// ```
    pub fn new_year(&self, year: i32) -> Result<Moment> {
        Ok(self.new_year_info(year)?.moment)
    }

    /// Returns the full New Year record of a Gregorian year.
    pub fn new_year_info(&self, year: i32) -> Result<NewYear> {
        self.check_year(year)?;
        self.cached_new_year(year)
    }

    /// Returns midnight of Visakha Bochea (the 1st waning day of Pisakh) in
    /// a Gregorian year, when the BE year turns.
    ///
    /// # Example
    ///
    /// ```
    /// use chhankitek::Calendar;
    ///
    /// let calendar = Calendar::new();
    /// assert_eq!("2024-05-23T00:00:00", calendar.pisakha_bochea(2024).unwrap().to_string());
    /// ```
    pub fn pisakha_bochea(&self, year: i32) -> Result<Moment> {
        self.check_year(year)?;
        self.cached_pisakha_bochea(year)
    }

    fn cached_new_year(&self, year: i32) -> Result<NewYear> {
        let cached = self.new_years.lock().get(&year).copied();
        if let Some(ny) = cached {
            return Ok(ny);
        }
        let ny = new_year::compute(year)?;
        debug!(year, moment = %ny.moment, lerng_sak = %ny.lerng_sak, "computed New Year");
        self.new_years.lock().insert(year, ny);
        Ok(ny)
    }

    fn cached_pisakha_bochea(&self, year: i32) -> Result<Moment> {
        let cached = self.pisakha_bochea.lock().get(&year).copied();
        if let Some(m) = cached {
            return Ok(m);
        }
        let m = self.find_pisakha_bochea(year)?;
        debug!(year, jdn = m.date().jdn(), "found Visakha Bochea");
        self.pisakha_bochea.lock().insert(year, m);
        Ok(m)
    }

    /// Scans April to June for the 1st waning day of Pisakh.
    fn find_pisakha_bochea(&self, year: i32) -> Result<Moment> {
        for month in 4..=6 {
            let days = date::days_in_month(year, month).unwrap_or(0);
            for day in 1..=days {
                let Some(date) = Date::from_gregorian(year, month, day) else {
                    continue;
                };
                let lunar = self.lunar_date(Moment::noon(date), Mode::Searching)?;
                if lunar.month() == Month::Pisakh && lunar.day_number() == 15 {
                    return Ok(Moment::midnight(date));
                }
            }
        }
        Err(Error::ComputationInvariant {
            reason: format!("no 1st waning day of Pisakh between April and June {year}"),
        })
    }

    fn lunar_date(&self, moment: Moment, mode: Mode) -> Result<KhmerDate> {
        let (month, day_number) = walker::walk(moment.date());
        let (y, m, _) = moment.date().gregorian();
        let be_year = match mode {
            Mode::Searching => walker::maybe_be_year(y, m),
            Mode::Exact => {
                if moment >= self.cached_pisakha_bochea(y)? {
                    super::ad_to_be(y)
                } else {
                    super::ad_to_be(y) - 1
                }
            }
        };
        Ok(KhmerDate::from_day_number(day_number, month, be_year))
    }

    fn convert(&self, moment: Moment) -> Result<Conversion> {
        let lunar = self.lunar_date(moment, Mode::Exact)?;
        let year = moment.date().gregorian().0;
        let pisakha_bochea = self.cached_pisakha_bochea(year)?;
        let new_year = self.cached_new_year(year)?;

        // Between the New Year and Visakha Bochea the BE year still lags.
        let mut animal_year = AnimalYear::of_be_year(lunar.be_year());
        if (new_year.moment..pisakha_bochea).contains(&moment) {
            animal_year = animal_year.succ();
        }
        let mut js_year = super::be_to_js(lunar.be_year());
        if (new_year.lerng_sak..pisakha_bochea).contains(&moment) {
            js_year += 1;
        }
        Ok(Conversion {
            moment,
            lunar,
            js_year,
            animal_year,
            sak: Sak::of_js_year(js_year),
        })
    }
}
