//! Khmer New Year (មហាសង្ក្រាន្ត) and Lerng Sak (ឡើងស័ក).
//!
//! The New Year moment is when the sun enters Mesha (0 angsar of the 12th
//! reasey) among the sotins examined by
//! [`new_year_sotins`](super::ephemeris::new_year_sotins). The celebration
//! lasts three or four days: Moha Songkran, one or two Vanabat days, then
//! Lerng Sak, at whose midnight the JS year and sak turn.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ephemeris::{self, SunPosition};
use super::{Month, walker};
use crate::date::Date;
use crate::error::{Error, Result};
use crate::moment::Moment;

/// Published New Year moments `(year, month, day, hour, minute)` that take
/// precedence over the computed ones.
pub const OVERRIDES: [(i32, i32, i32, u32, u32); 8] = [
    (1879, 4, 12, 11, 36),
    (1897, 4, 13, 2, 0),
    (2011, 4, 14, 13, 12),
    (2012, 4, 14, 19, 11),
    (2013, 4, 14, 2, 12),
    (2014, 4, 14, 8, 7),
    (2015, 4, 14, 14, 2),
    (2024, 4, 13, 22, 17),
];

/// The Khmer New Year falling in a Gregorian year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewYear {
    /// Moha Songkran, when the animal year turns.
    pub moment: Moment,
    /// Midnight at the start of Lerng Sak, when the JS year and sak turn.
    pub lerng_sak: Moment,
    /// Number of Vanabat (វារៈវ័នបត) days, 1 or 2.
    pub vanabat_days: u32,
    /// Number of New Year days including Lerng Sak, 3 or 4.
    pub new_year_days: u32,
    /// Sun positions on the four examined sotins.
    pub sotins: [SunPosition; 4],
    /// Whether `moment` was taken from [`OVERRIDES`].
    pub overridden: bool,
}

/// Time of day `(hour, minute)` the sun enters Mesha, from the first sotin
/// at 0 angsar.
fn entry_time(sotins: &[SunPosition; 4]) -> Option<(u32, u32)> {
    let sotin = sotins.iter().find(|s| s.angsar == 0)?;
    let minutes = 24 * 60 - sotin.libda * 24;
    Some((
        (minutes / 60).rem_euclid(24) as u32,
        minutes.rem_euclid(60) as u32,
    ))
}

/// Lunar date `(month, day)` of Lerng Sak in the JS year `js_year`, as
/// counted for the Chetr/Pisakh offset below.
fn lerng_sak_lunar(js_year: i32) -> (i64, i64) {
    let mut bodithey = ephemeris::bodithey(js_year);
    if ephemeris::is_adhikameas(js_year - 1) && ephemeris::is_chantrathimeas(js_year - 1) {
        bodithey = (bodithey + 1) % 30;
    }
    if bodithey >= 6 {
        (i64::from(Month::Chetr.index()), bodithey - 1)
    } else {
        (i64::from(Month::Pisakh.index()), bodithey)
    }
}

/// Computes the New Year of the Gregorian `year`, applying [`OVERRIDES`].
///
/// # Example
///
/// ```
/// use chhankitek::khmer::new_year::compute;
///
/// let ny = compute(2025).unwrap();
/// assert_eq!("2025-04-14T04:48:00", ny.moment.to_string());
/// assert_eq!("2025-04-16T00:00:00", ny.lerng_sak.to_string());
/// ```
pub fn compute(year: i32) -> Result<NewYear> {
    let invariant = |reason: String| Error::ComputationInvariant { reason };
    let js_year = super::ad_to_js(year);

    let days = ephemeris::new_year_sotins(js_year);
    let sotins = days.map(|sotin| ephemeris::sun_position(js_year, sotin));
    let (mut hour, mut minute) = entry_time(&sotins)
        .ok_or_else(|| invariant(format!("no sotin of JS {js_year} at 0 angsar among {days:?}")))?;
    let (vanabat_days, new_year_days) = if sotins[0].angsar == 0 {
        (2, 4)
    } else {
        (1, 3)
    };

    // Count back from 17 April to Lerng Sak by lunar days, months taken as
    // 29 days.
    let april_17 = Date::from_gregorian(year, 4, 17)
        .ok_or_else(|| invariant(format!("17 April {year} out of range")))?;
    let (month, day_number) = walker::walk(april_17);
    let (ls_month, ls_day) = lerng_sak_lunar(js_year);
    let diff = (i64::from(month.index()) - 4) * 29 + i64::from(day_number)
        - ((ls_month - 4) * 29 + ls_day);
    let back = diff + i64::from(new_year_days) - 1;
    let mut date = Date::from_jdn((i64::from(april_17.jdn()) - back) as u32);

    let overridden = match OVERRIDES.iter().find(|o| o.0 == year) {
        Some(&(y, m, d, h, mi)) => {
            let computed = date;
            date = Date::from_gregorian(y, m, d)
                .ok_or_else(|| invariant(format!("override {y}-{m}-{d} out of range")))?;
            warn!(
                year,
                computed = %computed.iso_gregorian(),
                computed_time = %format!("{hour:02}:{minute:02}"),
                published = %date.iso_gregorian(),
                published_time = %format!("{h:02}:{mi:02}"),
                "using published New Year moment"
            );
            (hour, minute) = (h, mi);
            true
        }
        None => false,
    };

    let moment = Moment::new(date, hour, minute, 0)
        .ok_or_else(|| invariant(format!("New Year time {hour}:{minute} out of range")))?;
    let lerng_sak = Moment::midnight(date + (new_year_days as i32 - 1));
    Ok(NewYear {
        moment,
        lerng_sak,
        vanabat_days,
        new_year_days,
        sotins,
        overridden,
    })
}
