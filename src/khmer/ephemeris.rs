//! Sun position by the Khmer solar reckoning (សុរិយាត្រ).
//!
//! Positions are expressed in zodiac units: 12 reasey (រាសី) of 30 angsar
//! (អង្សា) of 60 libda (លិប្ដា). The year counters here are indexed by
//! Jolak Sakaraj (JS) year and use different epochs from the Buddhist Era
//! counters in [`leap`](super::leap).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const LIBDA_PER_ANGSAR: i64 = 60;
const LIBDA_PER_REASEY: i64 = 30 * LIBDA_PER_ANGSAR;

/// Sun position, in reasey, angsar and libda.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SunPosition {
    pub reasey: i64,
    pub angsar: i64,
    pub libda: i64,
}

impl SunPosition {
    /// Splits a position given in libda.
    pub fn from_libda(libda: i64) -> Self {
        Self {
            reasey: libda / LIBDA_PER_REASEY,
            angsar: libda % LIBDA_PER_REASEY / LIBDA_PER_ANGSAR,
            libda: libda % LIBDA_PER_ANGSAR,
        }
    }
    /// The position in libda.
    pub fn as_libda(&self) -> i64 {
        self.reasey * LIBDA_PER_REASEY + self.angsar * LIBDA_PER_ANGSAR + self.libda
    }
}

fn aharkun_raw(js_year: i32) -> i64 {
    i64::from(js_year) * 292207 + 373
}

pub fn aharkun(js_year: i32) -> i64 {
    aharkun_raw(js_year).div_euclid(800) + 1
}

pub fn avoman(js_year: i32) -> i64 {
    (aharkun(js_year) * 11 + 650).rem_euclid(692)
}

pub fn kromthupul(js_year: i32) -> i64 {
    800 - aharkun_raw(js_year).rem_euclid(800)
}

pub fn bodithey(js_year: i32) -> i64 {
    let aharkun = aharkun(js_year);
    (aharkun + (11 * aharkun + 650).div_euclid(692)).rem_euclid(30)
}

/// Whether the solar year `js_year` has 366 days.
pub fn has_366_days(js_year: i32) -> bool {
    kromthupul(js_year) <= 207
}

/// Whether `js_year` is an adhikameas (leap-month) year.
pub fn is_adhikameas(js_year: i32) -> bool {
    let bodithey = bodithey(js_year);
    let next = self::bodithey(js_year + 1);

    match (bodithey, next) {
        (24, 6) => true,
        (25, 5) => false,
        _ => bodithey > 24 || bodithey < 6,
    }
}

/// Whether `js_year` is a chantrathimeas (leap-day) year.
pub fn is_chantrathimeas(js_year: i32) -> bool {
    let avoman = avoman(js_year);

    if avoman == 0 && self::avoman(js_year - 1) == 137 {
        true
    } else if has_366_days(js_year) {
        avoman < 127
    } else if avoman == 137 && self::avoman(js_year + 1) == 0 {
        false
    } else {
        avoman < 138
    }
}

/// Sun position after `sotin` days of the solar year `js_year`.
///
/// The mean position is corrected by the equation of centre (phol), looked
/// up in the chhaya table by the sun's distance from its apogee.
pub fn sun_position(js_year: i32, sotin: u32) -> SunPosition {
    // Mean sun.
    let r2 = 800 * i64::from(sotin) + kromthupul(js_year - 1);
    let reasey = r2 / 24350;
    let r3 = r2 % 24350;
    let angsar = r3 / 811;
    let libda = r3 % 811 / 14 - 3;
    let average = reasey * LIBDA_PER_REASEY + angsar * LIBDA_PER_ANGSAR + libda;

    // Distance from the apogee at 2 reasey 20 angsar.
    let apogee = 2 * LIBDA_PER_REASEY + 20 * LIBDA_PER_ANGSAR;
    let mut left_over = average - apogee;
    if average < apogee {
        left_over += 12 * LIBDA_PER_REASEY;
    }
    let kaen = left_over / LIBDA_PER_REASEY;

    let rs = match kaen {
        // The first quadrant takes kaen itself rather than the left-over.
        0..=2 => kaen,
        3..=5 => 6 * LIBDA_PER_REASEY - left_over,
        6..=8 => left_over - 6 * LIBDA_PER_REASEY,
        _ => 11 * LIBDA_PER_REASEY + 29 * LIBDA_PER_ANGSAR + 60 - left_over,
    };
    let last = SunPosition::from_libda(rs);

    let (khan, pouichalip) = if last.angsar >= 15 {
        (2 * last.reasey + 1, 60 * (last.angsar - 15) + last.libda)
    } else {
        (2 * last.reasey, 60 * last.angsar + last.libda)
    };
    let (multiplicity, chhaya) = match khan {
        0 => (35, 0),
        1 => (32, 35),
        2 => (27, 67),
        3 => (22, 94),
        4 => (13, 116),
        5 => (5, 129),
        _ => (0, 134),
    };
    let phol = pouichalip * multiplicity / 900 + chhaya;

    let inauguration = if kaen <= 5 {
        average - phol
    } else {
        average + phol
    };
    SunPosition::from_libda(inauguration)
}

/// The four sotins examined around the New Year of `js_year`.
///
/// The window shifts by one day when the previous solar year had 366 days.
pub fn new_year_sotins(js_year: i32) -> [u32; 4] {
    if has_366_days(js_year - 1) {
        [363, 364, 365, 366]
    } else {
        [362, 363, 364, 365]
    }
}
