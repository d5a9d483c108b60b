//! Conversion between Gregorian dates and the Khmer lunisolar calendar
//! (ចន្ទគតិ).
//!
//! Given a Gregorian date and time, this crate computes the Khmer lunar day,
//! moon phase and month, the Buddhist Era year, the animal year and the sak
//! of the Jolak Sakaraj era, following the traditional reckoning as printed in
//! Cambodian almanacs. It also finds the exact moment of Khmer New Year from
//! the traditional solar ephemeris, and goes back from a Khmer date to its
//! Gregorian date.
//!
//! All arithmetic is done on Julian day numbers ([`Date`]) and local
//! wall-clock moments ([`Moment`]); no timezone is involved.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use chhankitek::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Khmer calendar:
//!
//! ```
//! use chhankitek::khmer::{AnimalYear, Month, MoonPhase, Sak};
//!
//! let kh = chhankitek::from_gregorian(2024, 4, 14, 0, 0, 0).unwrap();
//!
//! assert_eq!((6, MoonPhase::Waxing, Month::Chetr, 2567), kh.lunar.parts());
//! assert_eq!(AnimalYear::Dragon, kh.animal_year);
//! assert_eq!(Sak::Panchasak, kh.sak);
//! assert_eq!(
//!     "ថ្ងៃអាទិត្យ ៦កើត ខែចេត្រ ឆ្នាំរោង បញ្ចស័ក ពុទ្ធសករាជ ២៥៦៧",
//!     kh.to_string()
//! );
//!
//! let date = chhankitek::from_khmer(6, 0, 4, 2567).unwrap();
//! assert_eq!((2024, 4, 14), date.gregorian());
//! ```
//!
//! Khmer New Year:
//!
//! ```
//! let moment = chhankitek::new_year(2025).unwrap();
//!
//! assert_eq!("2025-04-14T04:48:00", moment.to_string());
//! ```
//!
//! The free functions share one process-wide [`Calendar`]. Create a
//! `Calendar` directly for another [`Config`] or separate caches.

use std::sync::LazyLock;

pub mod config;
pub mod date;
pub mod error;
pub mod khmer;
pub mod moment;

pub use config::Config;
pub use date::{Date, YearType};
pub use error::{Error, Result};
pub use khmer::{Calendar, Conversion, KhmerDate};
pub use moment::Moment;

static CALENDAR: LazyLock<Calendar> = LazyLock::new(Calendar::new);

/// Converts a Gregorian date and time with the shared [`Calendar`].
///
/// See [`Calendar::from_gregorian`].
pub fn from_gregorian(
    year: i32,
    month: i32,
    day: i32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<Conversion> {
    CALENDAR.from_gregorian(year, month, day, hour, minute, second)
}

/// Finds the Gregorian date of a Khmer date with the shared [`Calendar`].
///
/// See [`Calendar::from_khmer`].
pub fn from_khmer(day: u32, phase: u32, month: u32, be_year: i32) -> Result<Date> {
    CALENDAR.from_khmer(day, phase, month, be_year)
}

/// Returns the Khmer New Year moment of a Gregorian year with the shared
/// [`Calendar`].
pub fn new_year(year: i32) -> Result<Moment> {
    CALENDAR.new_year(year)
}
