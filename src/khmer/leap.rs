//! Leap classification of Buddhist Era years, and the month table built on
//! it.
//!
//! Every quantity here is derived from the ratio 292207/800 days per solar
//! year. The counters are pure functions of the BE year and cheap enough to
//! recompute on every call.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Month;

/// Kind of a Khmer lunar year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LeapType {
    /// 354 days.
    Regular,
    /// 384 days, with the extra months First and Second Asadh (អធិកមាស).
    LeapMonth,
    /// 355 days, with a 30th day in Jesth (ចន្ទ្រាធិមាស).
    LeapDay,
}

impl LeapType {
    /// Classifies `be_year`. See [`leap_type`].
    pub fn of(be_year: i32) -> Self {
        leap_type(be_year)
    }
    /// Number of days in a year of this kind.
    pub fn days(&self) -> u32 {
        match self {
            LeapType::Regular => 354,
            LeapType::LeapMonth => 384,
            LeapType::LeapDay => 355,
        }
    }
}

fn aharkun_raw(be_year: i32) -> i64 {
    i64::from(be_year) * 292207 + 499
}

/// Aharkun (អាហារគុណ), the accumulated day count of the year.
pub fn aharkun(be_year: i32) -> i64 {
    aharkun_raw(be_year).div_euclid(800) + 4
}

/// Kromthupul (ក្រមធុពល), the remainder of the aharkun division subtracted
/// from 800.
pub fn kromthupul(be_year: i32) -> i64 {
    800 - aharkun_raw(be_year).rem_euclid(800)
}

/// Avoman (អវមាន), the fractional lunar-day residue, `0..692`.
pub fn avoman(be_year: i32) -> i64 {
    (aharkun(be_year) * 11 + 25).rem_euclid(692)
}

/// Bodithey (បូតិថី), the lunar day at the start of the solar year, `0..30`.
pub fn bodithey(be_year: i32) -> i64 {
    let aharkun = aharkun(be_year);
    ((aharkun * 11 + 25).div_euclid(692) + aharkun + 29).rem_euclid(30)
}

/// Whether the solar year is 366 days long.
pub fn is_solar_leap(be_year: i32) -> bool {
    kromthupul(be_year) <= 207
}

/// Whether `be_year` gets the two extra Asadh months.
///
/// Ties at the edges of the bodithey window are broken by the following
/// year: 25 followed by 5 is not a leap-month year, 24 followed by 6 is.
pub fn is_leap_month(be_year: i32) -> bool {
    let bodithey = bodithey(be_year);
    let next = self::bodithey(be_year + 1);

    if bodithey == 25 && next == 5 {
        return false;
    }
    (bodithey == 24 && next == 6) || bodithey >= 25 || bodithey < 6
}

/// Whether the avoman of `be_year` calls for a leap day, before any
/// interaction with leap months is considered.
pub fn is_leap_day_by_calculation(be_year: i32) -> bool {
    let avoman = avoman(be_year);

    if avoman == 0 && self::avoman(be_year - 1) == 137 {
        true
    } else if is_solar_leap(be_year) {
        avoman < 127
    } else if avoman == 137 && self::avoman(be_year + 1) == 0 {
        false
    } else {
        avoman < 138
    }
}

/// Classifies `be_year`.
///
/// A year may qualify for both a leap month and a leap day; the leap month
/// wins and the leap day is deferred to the first following year that has no
/// leap month. Hence a year that is not a leap-day year by its own avoman may
/// still be one because of a run of leap-month years before it.
///
/// # Example
///
/// ```
/// use chhankitek::khmer::{LeapType, leap::leap_type};
///
/// assert_eq!(LeapType::LeapMonth, leap_type(2567));
/// assert_eq!(LeapType::Regular, leap_type(2568));
/// assert_eq!(LeapType::LeapDay, leap_type(2569));
/// ```
pub fn leap_type(be_year: i32) -> LeapType {
    if is_leap_month(be_year) {
        return LeapType::LeapMonth;
    }
    if is_leap_day_by_calculation(be_year) {
        return LeapType::LeapDay;
    }
    let mut previous = be_year - 1;
    while is_leap_month(previous) {
        if is_leap_day_by_calculation(previous) {
            return LeapType::LeapDay;
        }
        previous -= 1;
    }
    LeapType::Regular
}

/// Number of days in the lunar year `be_year`: 354, 355 or 384.
pub fn days_in_year(be_year: i32) -> u32 {
    leap_type(be_year).days()
}

/// Number of days in `month` of `be_year`.
///
/// Months alternate 29 and 30 days starting with Mikasar at 29. Jesth gains
/// a day in leap-day years. First and Second Asadh have 30 days in leap-month
/// years and do not exist (0 days) otherwise.
pub fn days_in_month(month: Month, be_year: i32) -> u32 {
    use Month::*;
    match month {
        FirstAsadh | SecondAsadh => match leap_type(be_year) {
            LeapType::LeapMonth => 30,
            _ => 0,
        },
        Jesth if leap_type(be_year) == LeapType::LeapDay => 30,
        m if m.index() % 2 == 0 => 29,
        _ => 30,
    }
}

/// The month after `month` in `be_year`.
///
/// Leap-month years run Jesth, First Asadh, Second Asadh, Srap, skipping
/// the ordinary Asadh.
pub fn next_month(month: Month, be_year: i32) -> Month {
    use Month::*;
    match month {
        Jesth if leap_type(be_year) == LeapType::LeapMonth => FirstAsadh,
        Kadeuk => Mikasar,
        FirstAsadh => SecondAsadh,
        SecondAsadh => Srap,
        m => Month::ALL[m.index() as usize + 1],
    }
}

/// The month before `month` in `be_year`; inverse of [`next_month`].
pub fn previous_month(month: Month, be_year: i32) -> Month {
    use Month::*;
    match month {
        Mikasar => Kadeuk,
        Srap if leap_type(be_year) == LeapType::LeapMonth => SecondAsadh,
        SecondAsadh => FirstAsadh,
        FirstAsadh => Jesth,
        m => Month::ALL[m.index() as usize - 1],
    }
}
