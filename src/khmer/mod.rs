//! Khmer lunisolar calendar (ចន្ទគតិ).
//!
//! A Khmer lunar date is a day `1..=15` of the waxing (កើត) or waning (រោច)
//! half of one of fourteen months, in a Buddhist Era year. Twelve of the
//! months occur every year; First and Second Asadh replace Asadh in leap-month
//! years. The year is classified by [`leap`]; the sun's position used for the
//! New Year comes from [`ephemeris`].
//!
//! Three year counts meet here:
//!
//! - Buddhist Era (ពុទ្ធសករាជ, BE), incrementing on the 1st waning day of Pisakh;
//! - the animal year (ឆ្នាំ), a twelve-year cycle that turns at the New Year
//!   moment;
//! - Jolak Sakaraj (ចុល្លសករាជ, JS) and its ten-year sak cycle, turning at
//!   midnight of Lerng Sak.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub mod convert;
pub mod ephemeris;
pub mod fmt;
pub mod leap;
pub mod new_year;
pub mod walker;

pub use convert::{Calendar, Conversion};
pub use ephemeris::SunPosition;
pub use leap::LeapType;
pub use new_year::NewYear;

/// Half of the lunar month.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoonPhase {
    /// កើត
    Waxing,
    /// រោច
    Waning,
}

impl MoonPhase {
    /// `0` is waxing and `1` waning.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(MoonPhase::Waxing),
            1 => Some(MoonPhase::Waning),
            _ => None,
        }
    }
    pub fn index(&self) -> u32 {
        *self as u32
    }
    /// Khmer name, e.g. "កើត".
    pub fn name(&self) -> &'static str {
        fmt::MOON_PHASE_NAMES[self.index() as usize]
    }
}

impl TryFrom<u32> for MoonPhase {
    type Error = Error;
    fn try_from(index: u32) -> Result<Self, Self::Error> {
        MoonPhase::from_index(index).ok_or_else(|| Error::InvalidKhmerDate {
            reason: format!("moon phase {index} must be 0 (waxing) or 1 (waning)"),
        })
    }
}

impl std::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MoonPhase::Waxing => "waxing",
            MoonPhase::Waning => "waning",
        })
    }
}

/// Lunar month, numbered `0..=13` from Mikasar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Month {
    /// មិគសិរ
    Mikasar,
    /// បុស្ស
    Boss,
    /// មាឃ
    Meak,
    /// ផល្គុន
    Phalgun,
    /// ចេត្រ
    Chetr,
    /// ពិសាខ
    Pisakh,
    /// ជេស្ឋ
    Jesth,
    /// អាសាឍ
    Asadh,
    /// ស្រាពណ៍
    Srap,
    /// ភទ្របទ
    Phatrabot,
    /// អស្សុជ
    Assoch,
    /// កត្ដិក
    Kadeuk,
    /// បឋមាសាឍ, leap-month years only.
    FirstAsadh,
    /// ទុតិយាសាឍ, leap-month years only.
    SecondAsadh,
}

impl Month {
    /// All months in index order.
    pub const ALL: [Month; 14] = {
        use Month::*;
        [
            Mikasar,
            Boss,
            Meak,
            Phalgun,
            Chetr,
            Pisakh,
            Jesth,
            Asadh,
            Srap,
            Phatrabot,
            Assoch,
            Kadeuk,
            FirstAsadh,
            SecondAsadh,
        ]
    };

    /// Month by its index in [`ALL`](Self::ALL).
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
    pub fn index(&self) -> u32 {
        *self as u32
    }
    /// Khmer name, e.g. "ពិសាខ".
    pub fn name(&self) -> &'static str {
        fmt::LUNAR_MONTH_NAMES[self.index() as usize]
    }
    /// Khmer abbreviation, e.g. "ពិ".
    pub fn abbreviation(&self) -> &'static str {
        fmt::LUNAR_MONTH_ABBREVIATIONS[self.index() as usize]
    }
    /// Whether the month only exists in leap-month years.
    pub fn is_leap(&self) -> bool {
        matches!(self, Month::FirstAsadh | Month::SecondAsadh)
    }

    /// Number of days in this month of `be_year`, `0` if the month does not
    /// occur that year.
    pub fn days_in(&self, be_year: i32) -> u32 {
        leap::days_in_month(*self, be_year)
    }
    /// The following month in `be_year`.
    pub fn next(&self, be_year: i32) -> Month {
        leap::next_month(*self, be_year)
    }
    /// The preceding month in `be_year`.
    pub fn previous(&self, be_year: i32) -> Month {
        leap::previous_month(*self, be_year)
    }
}

impl TryFrom<u32> for Month {
    type Error = Error;
    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Month::from_index(index).ok_or_else(|| Error::InvalidKhmerDate {
            reason: format!("month index {index} not in 0..=13"),
        })
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A date in the Khmer lunar calendar.
///
/// # Example
///
/// ```
/// use chhankitek::khmer::{KhmerDate, Month, MoonPhase};
///
/// let date = KhmerDate::new(15, MoonPhase::Waxing, Month::Pisakh, 2567).unwrap();
/// let next = date.add_days(1);
///
/// // Visakha Bochea: the Buddhist Era turns on the 1st waning day of Pisakh.
/// assert_eq!((1, MoonPhase::Waning, Month::Pisakh, 2568), next.parts());
/// assert_eq!(date, next.subtract_days(1));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KhmerDate {
    day: u32,
    phase: MoonPhase,
    month: Month,
    be_year: i32,
}

impl KhmerDate {
    /// Creates a lunar date. Returns `None` unless `day` is in `1..=15`.
    ///
    /// Whether the month actually has that day in `be_year` is not checked.
    pub fn new(day: u32, phase: MoonPhase, month: Month, be_year: i32) -> Option<Self> {
        if !(1..=15).contains(&day) {
            return None;
        }
        Some(Self {
            day,
            phase,
            month,
            be_year,
        })
    }
    /// Creates a lunar date from a day number `0..=29` (see
    /// [`day_number`](Self::day_number)).
    ///
    /// # Panics
    ///
    /// Panics if `day_number` is not in `0..=29`.
    pub fn from_day_number(day_number: u32, month: Month, be_year: i32) -> Self {
        assert!(day_number < 30, "day number {day_number} not in 0..=29");
        let (day, phase) = split_day_number(day_number);
        Self {
            day,
            phase,
            month,
            be_year,
        }
    }

    /// Day of the moon phase, `1..=15`.
    pub fn day(&self) -> u32 {
        self.day
    }
    pub fn phase(&self) -> MoonPhase {
        self.phase
    }
    pub fn month(&self) -> Month {
        self.month
    }
    pub fn be_year(&self) -> i32 {
        self.be_year
    }
    /// Returns `(day, phase, month, be_year)`.
    pub fn parts(&self) -> (u32, MoonPhase, Month, i32) {
        (self.day, self.phase, self.month, self.be_year)
    }

    /// Zero-based day of the month: `0..=14` for waxing days, `15..=29` for
    /// waning days.
    pub fn day_number(&self) -> u32 {
        match self.phase {
            MoonPhase::Waxing => self.day - 1,
            MoonPhase::Waning => self.day + 14,
        }
    }

    /// Returns the date `count` days later. A negative `count` moves back.
    ///
    /// The BE year turns between the 15th waxing and the 1st waning day of
    /// Pisakh. A date whose day does not exist in its month (see
    /// [`new`](Self::new)) is first carried into the following month, so
    /// `add_days(0)` is the identity only on dates that exist.
    pub fn add_days(&self, count: i32) -> Self {
        if count < 0 {
            self.backward(count.unsigned_abs())
        } else {
            self.forward(count.unsigned_abs())
        }
    }

    /// Returns the date `count` days earlier. A negative `count` moves
    /// forward.
    pub fn subtract_days(&self, count: i32) -> Self {
        if count < 0 {
            self.forward(count.unsigned_abs())
        } else {
            self.backward(count.unsigned_abs())
        }
    }

    fn forward(&self, count: u32) -> Self {
        let mut month = self.month;
        let mut be_year = self.be_year;
        let mut day_number = i64::from(self.day_number());
        let mut remaining = i64::from(count);

        loop {
            // From the 1st of Mikasar to the next one the BE year turns once
            // and every month after Pisakh follows the new year.
            if month == Month::Mikasar && day_number == 0 {
                let len = i64::from(leap::days_in_year(be_year + 1));
                if remaining >= len {
                    remaining -= len;
                    be_year += 1;
                    continue;
                }
            }
            let len = i64::from(month.days_in(be_year));
            let left = len - 1 - day_number;
            if remaining <= left {
                let target = day_number + remaining;
                if month == Month::Pisakh && day_number < 15 && target >= 15 {
                    be_year += 1;
                }
                day_number = target;
                break;
            }
            if month == Month::Pisakh && day_number < 15 {
                be_year += 1;
            }
            remaining -= left + 1;
            month = month.next(be_year);
            day_number = 0;
        }
        Self::from_day_number(day_number as u32, month, be_year)
    }

    fn backward(&self, count: u32) -> Self {
        let mut month = self.month;
        let mut be_year = self.be_year;
        let mut day_number = i64::from(self.day_number());
        let mut remaining = i64::from(count);

        loop {
            if month == Month::Mikasar && day_number == 0 {
                let len = i64::from(leap::days_in_year(be_year));
                if remaining >= len {
                    remaining -= len;
                    be_year -= 1;
                    continue;
                }
            }
            if remaining <= day_number {
                let target = day_number - remaining;
                if month == Month::Pisakh && day_number >= 15 && target < 15 {
                    be_year -= 1;
                }
                day_number = target;
                break;
            }
            if month == Month::Pisakh && day_number >= 15 {
                be_year -= 1;
            }
            remaining -= day_number + 1;
            month = month.previous(be_year);
            day_number = i64::from(month.days_in(be_year)) - 1;
        }
        Self::from_day_number(day_number.max(0) as u32, month, be_year)
    }
}

impl std::fmt::Display for KhmerDate {
    /// E.g. `1 waning Pisakh BE 2568`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} BE {}",
            self.day, self.phase, self.month, self.be_year
        )
    }
}

pub(crate) fn split_day_number(day_number: u32) -> (u32, MoonPhase) {
    if day_number < 15 {
        (day_number + 1, MoonPhase::Waxing)
    } else {
        (day_number - 14, MoonPhase::Waning)
    }
}

/// Animal of the twelve-year cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnimalYear {
    /// ជូត
    Rat,
    /// ឆ្លូវ
    Ox,
    /// ខាល
    Tiger,
    /// ថោះ
    Rabbit,
    /// រោង
    Dragon,
    /// ម្សាញ់
    Snake,
    /// មមី
    Horse,
    /// មមែ
    Goat,
    /// វក
    Monkey,
    /// រកា
    Rooster,
    /// ច
    Dog,
    /// កុរ
    Pig,
}

impl AnimalYear {
    pub const ALL: [AnimalYear; 12] = {
        use AnimalYear::*;
        [
            Rat, Ox, Tiger, Rabbit, Dragon, Snake, Horse, Goat, Monkey, Rooster, Dog, Pig,
        ]
    };

    /// Animal for an index, reduced modulo 12.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }
    /// Animal of the cycle as it stands before the New Year of the
    /// Gregorian year `be_year - 543`.
    pub fn of_be_year(be_year: i32) -> Self {
        Self::from_index(be_year + 4)
    }
    pub fn index(&self) -> u32 {
        *self as u32
    }
    /// Khmer name, e.g. "រោង".
    pub fn name(&self) -> &'static str {
        fmt::ANIMAL_YEAR_NAMES[self.index() as usize]
    }
    pub fn emoji(&self) -> &'static str {
        fmt::ANIMAL_YEAR_EMOJIS[self.index() as usize]
    }
    /// The following animal.
    pub fn succ(&self) -> Self {
        Self::from_index(self.index() as i32 + 1)
    }
}

/// Year of the ten-year sak cycle, given by the last digit of the JS year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sak {
    /// សំរឹទ្ធិស័ក
    Samridhisak,
    /// ឯកស័ក
    Ekasak,
    /// ទោស័ក
    Tosak,
    /// ត្រីស័ក
    Treisak,
    /// ចត្វាស័ក
    Chatvasak,
    /// បញ្ចស័ក
    Panchasak,
    /// ឆស័ក
    Chhasak,
    /// សប្តស័ក
    Saptasak,
    /// អដ្ឋស័ក
    Atthasak,
    /// នព្វស័ក
    Novvasak,
}

impl Sak {
    pub const ALL: [Sak; 10] = {
        use Sak::*;
        [
            Samridhisak,
            Ekasak,
            Tosak,
            Treisak,
            Chatvasak,
            Panchasak,
            Chhasak,
            Saptasak,
            Atthasak,
            Novvasak,
        ]
    };

    /// Sak for an index, reduced modulo 10.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }
    pub fn of_js_year(js_year: i32) -> Self {
        Self::from_index(js_year)
    }
    pub fn index(&self) -> u32 {
        *self as u32
    }
    /// Khmer name, e.g. "ឆស័ក".
    pub fn name(&self) -> &'static str {
        fmt::SAK_NAMES[self.index() as usize]
    }
}

/// Day of week, numbered `0..=6` from Sunday.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = {
        use Weekday::*;
        [Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday]
    };

    /// Weekday for an index, reduced modulo 7.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(7) as usize]
    }
    pub fn of(date: crate::Date) -> Self {
        Self::from_index(date.day_of_week() as i32)
    }
    pub fn index(&self) -> u32 {
        *self as u32
    }
    /// Khmer name, e.g. "អាទិត្យ".
    pub fn name(&self) -> &'static str {
        fmt::WEEKDAY_NAMES[self.index() as usize]
    }
    /// Short Khmer name, e.g. "អា".
    pub fn short_name(&self) -> &'static str {
        fmt::WEEKDAY_SHORT_NAMES[self.index() as usize]
    }
}

/// Buddhist Era year of the Gregorian year `ad_year`, after Visakha Bochea.
pub fn ad_to_be(ad_year: i32) -> i32 {
    ad_year + 544
}
pub fn be_to_ad(be_year: i32) -> i32 {
    be_year - 544
}
/// Jolak Sakaraj year of the Gregorian year `ad_year`, after Lerng Sak.
pub fn ad_to_js(ad_year: i32) -> i32 {
    ad_year - 638
}
pub fn js_to_ad(js_year: i32) -> i32 {
    js_year + 638
}
pub fn be_to_js(be_year: i32) -> i32 {
    be_year - 1182
}
pub fn js_to_be(js_year: i32) -> i32 {
    js_year + 1182
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;
    use MoonPhase::*;

    fn kd(day: u32, phase: MoonPhase, month: Month, be_year: i32) -> KhmerDate {
        KhmerDate::new(day, phase, month, be_year).unwrap()
    }

    #[test]
    fn day_numbers() {
        for (day_number, (day, phase)) in [
            (0, (1, Waxing)),
            (14, (15, Waxing)),
            (15, (1, Waning)),
            (29, (15, Waning)),
        ] {
            let date = KhmerDate::from_day_number(day_number, Pisakh, 2568);
            assert_eq!((day, phase), (date.day(), date.phase()), "{day_number}");
            assert_eq!(day_number, date.day_number());
        }
        assert_eq!(None, KhmerDate::new(0, Waxing, Pisakh, 2568));
        assert_eq!(None, KhmerDate::new(16, Waning, Pisakh, 2568));
    }

    #[test]
    fn indices() {
        assert_eq!(Ok(Pisakh), Month::try_from(5));
        assert_eq!(Ok(SecondAsadh), Month::try_from(13));
        assert!(Month::try_from(14).is_err());
        assert_eq!(Ok(Waning), MoonPhase::try_from(1));
        assert!(MoonPhase::try_from(2).is_err());
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(i as u32, month.index());
            assert_eq!(Some(*month), Month::from_index(i as u32));
        }
        assert_eq!(None, Month::from_index(14));
        assert_eq!(Some(Waxing), MoonPhase::from_index(0));
        assert_eq!(None, MoonPhase::from_index(2));
        assert_eq!(Sak::Novvasak, Sak::from_index(9));
        assert_eq!(Sak::Samridhisak, Sak::from_index(10));
        assert_eq!(Weekday::Saturday, Weekday::from_index(-1));
        assert_eq!(3, Weekday::from_index(3).index());
        assert_eq!(AnimalYear::Pig, AnimalYear::from_index(-1));
    }

    #[test]
    fn add_within_month() {
        assert_eq!(kd(5, Waning, Boss, 2568), kd(1, Waxing, Boss, 2568).add_days(19));
        assert_eq!(kd(15, Waxing, Boss, 2568), kd(1, Waxing, Boss, 2568).add_days(14));
    }

    #[test]
    fn add_across_months() {
        // Boss has 30 days, Meak 29.
        assert_eq!(kd(1, Waxing, Meak, 2568), kd(15, Waning, Boss, 2568).add_days(1));
        assert_eq!(kd(1, Waxing, Phalgun, 2568), kd(1, Waxing, Boss, 2568).add_days(59));
        assert_eq!(kd(1, Waxing, Mikasar, 2568), kd(15, Waning, Kadeuk, 2568).add_days(1));
    }

    #[test]
    fn be_year_turns_at_visakha_bochea() {
        let chetr = kd(1, Waxing, Chetr, 2567);
        assert_eq!(kd(1, Waxing, Pisakh, 2567), chetr.add_days(29));
        assert_eq!(kd(15, Waxing, Pisakh, 2567), chetr.add_days(43));
        assert_eq!(kd(1, Waning, Pisakh, 2568), chetr.add_days(44));
        assert_eq!(kd(1, Waxing, Jesth, 2568), chetr.add_days(59));
        assert_eq!(chetr, kd(1, Waxing, Jesth, 2568).subtract_days(59));
        assert_eq!(kd(15, Waxing, Pisakh, 2567), kd(1, Waning, Pisakh, 2568).subtract_days(1));
    }

    #[test]
    fn leap_months_in_sequence() {
        // 2567 is a leap-month year: Jesth is followed by the two extra
        // Asadh months.
        let jesth = kd(14, Waning, Jesth, 2567);
        assert_eq!(kd(13, Waning, Jesth, 2567).add_days(1), jesth);
        assert_eq!(kd(1, Waxing, FirstAsadh, 2567), jesth.add_days(1));
        assert_eq!(kd(1, Waxing, SecondAsadh, 2567), jesth.add_days(31));
        assert_eq!(kd(1, Waxing, Srap, 2567), jesth.add_days(61));
        assert_eq!(jesth, kd(1, Waxing, Srap, 2567).subtract_days(61));
        // 2569 is a leap-day year: Jesth has 30 days.
        assert_eq!(kd(15, Waning, Jesth, 2569), kd(1, Waxing, Jesth, 2569).add_days(29));
        assert_eq!(kd(1, Waxing, Asadh, 2569), kd(1, Waxing, Jesth, 2569).add_days(30));
    }

    #[test]
    fn add_subtract_symmetry() {
        let mut date = kd(1, Waxing, Mikasar, 2500);
        for n in (0..1000).step_by(7) {
            assert_eq!(date, date.add_days(n).subtract_days(n), "{date} + {n}");
            assert_eq!(date, date.subtract_days(n).add_days(n), "{date} - {n}");
            assert_eq!(date.add_days(-n), date.subtract_days(n), "{date} - {n}");
            date = date.add_days(113);
        }
    }

    #[test]
    fn year_jumps_agree_with_month_steps() {
        // Steps of 300 days never span a whole lunar year.
        for start in [
            kd(1, Waxing, Mikasar, 2500),
            kd(7, Waning, Pisakh, 2567),
            kd(15, Waxing, Pisakh, 2566),
            kd(3, Waxing, FirstAsadh, 2567),
            kd(12, Waning, Kadeuk, 2700),
        ] {
            let mut forward = start;
            let mut backward = start;
            for k in 1..=40 {
                forward = forward.add_days(300);
                backward = backward.subtract_days(300);
                assert_eq!(forward, start.add_days(300 * k), "{start} + 300 * {k}");
                assert_eq!(backward, start.subtract_days(300 * k), "{start} - 300 * {k}");
            }
        }
    }

    #[test]
    fn extreme_counts() {
        let date = kd(1, Waxing, Boss, 2568);
        for n in [i32::MIN, i32::MAX] {
            assert_eq!(date, date.add_days(n).subtract_days(n), "{n}");
            assert_eq!(date, date.subtract_days(n).add_days(n), "{n}");
        }
        assert!(date.add_days(i32::MIN).be_year() < -5_000_000);
        assert!(date.subtract_days(i32::MIN).be_year() > 5_000_000);
    }

    #[test]
    fn missing_day_carries_into_next_month() {
        // 2568 is a regular year: Jesth has 29 days and First Asadh none.
        assert_eq!(kd(1, Waxing, Asadh, 2568), kd(15, Waning, Jesth, 2568).add_days(0));
        assert_eq!(kd(2, Waxing, Asadh, 2568), kd(15, Waning, Jesth, 2568).add_days(1));
    }

    #[test]
    fn cycles() {
        assert_eq!(AnimalYear::Dragon, AnimalYear::of_be_year(2568));
        assert_eq!(AnimalYear::Rat, AnimalYear::Pig.succ());
        assert_eq!(Sak::Chhasak, Sak::of_js_year(1386));
        assert_eq!(Sak::Novvasak, Sak::of_js_year(-1));
        assert_eq!(2568, ad_to_be(2024));
        assert_eq!(1386, ad_to_js(2024));
        assert_eq!(1386, be_to_js(2568));
        assert_eq!(2024, js_to_ad(be_to_js(ad_to_be(2024))));
        assert_eq!(2568, js_to_be(1386));
        assert_eq!(2024, be_to_ad(2568));
    }

    #[test]
    fn display() {
        assert_eq!("1 waning Pisakh BE 2568", kd(1, Waning, Pisakh, 2568).to_string());
        assert_eq!("FirstAsadh", FirstAsadh.to_string());
    }
}
