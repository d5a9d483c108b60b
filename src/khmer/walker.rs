//! Lunar month and day of a Gregorian date, found by walking from a fixed
//! epoch.
//!
//! The epoch is 1 January 1900, the 1st waxing day of Boss. The walk first
//! jumps whole lunar years, then whole lunar months, and the remainder is the
//! day number within the month. Year and month lengths are looked up by the
//! approximate BE year of the epoch's current Gregorian date (see
//! [`maybe_be_year`]), which is what makes the walk agree with published
//! almanacs.
//!
//! The year jumps do not depend on the target, so the JDNs they pass through
//! are computed once for Gregorian years 1 to 9999 and searched.

use std::sync::LazyLock;

use tracing::{debug, trace};

use super::{Month, leap};
use crate::date::Date;

/// JDN of 1 January 1900.
pub const EPOCH_JDN: u32 = 2415021;
/// Lunar month at the epoch.
pub const EPOCH_MONTH: Month = Month::Boss;

/// JDN of 1 January 1.
const FIRST_JDN: i64 = 1721426;
/// JDN of 31 December 9999.
const LAST_JDN: i64 = 5373484;

/// The BE year in force for a Gregorian month, ignoring the exact Visakha
/// Bochea day: `year + 543` up to April, `year + 544` from May.
pub fn maybe_be_year(year: i32, month: i32) -> i32 {
    if month <= 4 { year + 543 } else { year + 544 }
}

fn maybe_be_year_of(jdn: i64) -> i32 {
    let (y, m, _) = Date::from_jdn(jdn as u32).gregorian();
    maybe_be_year(y, m)
}

/// Length of the lunar year stepped over going forward from `epoch`.
fn forward_len(epoch: i64) -> i64 {
    let (y, m, _) = Date::from_jdn(epoch as u32).gregorian();
    i64::from(leap::days_in_year(maybe_be_year(y + 1, m)))
}

/// Length of the lunar year stepped over going back from `epoch`.
fn backward_len(epoch: i64) -> i64 {
    i64::from(leap::days_in_year(maybe_be_year_of(epoch)))
}

/// Epochs reached by whole-year jumps: ascending from the epoch in
/// `forward`, descending in `backward`. Both start with [`EPOCH_JDN`].
struct YearStarts {
    forward: Vec<i64>,
    backward: Vec<i64>,
}

impl YearStarts {
    fn build() -> Self {
        let mut forward = vec![i64::from(EPOCH_JDN)];
        let mut epoch = i64::from(EPOCH_JDN);
        while epoch <= LAST_JDN {
            epoch += forward_len(epoch);
            forward.push(epoch);
        }
        let mut backward = vec![i64::from(EPOCH_JDN)];
        let mut epoch = i64::from(EPOCH_JDN);
        while epoch >= FIRST_JDN {
            epoch -= backward_len(epoch);
            backward.push(epoch);
        }
        debug!(
            forward = forward.len(),
            backward = backward.len(),
            "built lunar year table"
        );
        Self { forward, backward }
    }

    /// The epoch from which `target` is reached without another whole-year
    /// jump, or the table end closest to it.
    fn start_for(&self, target: i64) -> i64 {
        if target > i64::from(EPOCH_JDN) {
            // The last epoch strictly before target.
            let i = self.forward.partition_point(|&e| e < target);
            self.forward[i - 1]
        } else {
            // The first epoch at or before target.
            let i = self.backward.partition_point(|&e| e > target);
            self.backward[i.min(self.backward.len() - 1)]
        }
    }
}

static YEAR_STARTS: LazyLock<YearStarts> = LazyLock::new(YearStarts::build);

/// Returns the lunar month of `date` and the day number `0..=29` within it.
///
/// # Example
///
/// ```
/// use chhankitek::Date;
/// use chhankitek::khmer::{Month, walker::walk};
///
/// assert_eq!((Month::Boss, 0), walk(Date::from_gregorian(1900, 1, 1).unwrap()));
/// assert_eq!((Month::Pisakh, 15), walk(Date::from_gregorian(2024, 5, 23).unwrap()));
/// ```
pub fn walk(date: Date) -> (Month, u32) {
    let target = i64::from(date.jdn());
    let mut epoch = YEAR_STARTS.start_for(target);
    let mut month = EPOCH_MONTH;
    let mut diff = target - epoch;

    // Only runs past the ends of the table.
    if diff > 0 {
        loop {
            let len = forward_len(epoch);
            if diff <= len {
                break;
            }
            diff -= len;
            epoch += len;
        }
    } else {
        while diff < 0 {
            let len = backward_len(epoch);
            diff += len;
            epoch -= len;
        }
    }
    trace!(epoch, diff, "walked whole years");

    while diff > 0 {
        let be_year = maybe_be_year_of(epoch);
        let len = i64::from(leap::days_in_month(month, be_year));
        if diff <= len {
            break;
        }
        diff -= len;
        epoch += len;
        month = leap::next_month(month, be_year);
    }
    trace!(epoch, diff, %month, "walked whole months");

    // The month lengths above were taken at the epoch's BE year; re-check
    // against the target's own.
    let (y, m, _) = date.gregorian();
    let final_be_year = maybe_be_year(y, m);
    let mut day_number = diff as u32;
    let mut len = leap::days_in_month(month, final_be_year);
    while len == 0 {
        month = leap::next_month(month, final_be_year);
        len = leap::days_in_month(month, final_be_year);
    }
    if day_number >= len {
        day_number %= len;
        month = leap::next_month(month, final_be_year);
    }
    (month, day_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;

    #[test]
    fn maybe_be() {
        assert_eq!(2567, maybe_be_year(2024, 4));
        assert_eq!(2568, maybe_be_year(2024, 5));
        assert_eq!(2568, maybe_be_year(2024, 12));
    }

    #[test]
    fn walks() {
        for ((y, m, d), std) in [
            ((1900, 1, 1), (Boss, 0)),
            ((2000, 1, 1), (Mikasar, 24)),
            ((1800, 6, 15), (Jesth, 22)),
            ((2023, 4, 14), (Chetr, 23)),
            ((2024, 4, 13), (Chetr, 4)),
            ((2024, 4, 16), (Chetr, 7)),
            ((2024, 5, 22), (Pisakh, 14)),
            ((2024, 5, 23), (Pisakh, 15)),
            ((2024, 8, 15), (Srap, 10)),
            ((2025, 1, 1), (Boss, 2)),
            ((2300, 12, 31), (Mikasar, 18)),
        ] {
            let date = Date::from_gregorian(y, m, d).unwrap();
            assert_eq!(std, walk(date), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn consecutive_days() {
        // Every day advances the day number by one, or starts a new month.
        let start = Date::from_gregorian(1890, 1, 1).unwrap();
        let mut prev = walk(start);
        for offset in 1..365 * 30 {
            let date = start + offset;
            let cur = walk(date);
            if cur.0 == prev.0 {
                assert_eq!(prev.1 + 1, cur.1, "{}", date.iso_gregorian());
            } else {
                assert_eq!(0, cur.1, "{}", date.iso_gregorian());
            }
            prev = cur;
        }
    }

    /// Year jumps taken one at a time from the epoch.
    fn plain_year_start(target: i64) -> i64 {
        let mut epoch = i64::from(EPOCH_JDN);
        let mut diff = target - epoch;
        if diff > 0 {
            while diff > forward_len(epoch) {
                let len = forward_len(epoch);
                diff -= len;
                epoch += len;
            }
        } else {
            while diff < 0 {
                let len = backward_len(epoch);
                diff += len;
                epoch -= len;
            }
        }
        epoch
    }

    #[test]
    fn year_table() {
        for (y, m, d) in [
            (1, 1, 1),
            (1000, 6, 30),
            (1899, 12, 31),
            (1900, 1, 1),
            (1900, 1, 2),
            (1900, 12, 20),
            (2024, 4, 13),
            (2999, 1, 1),
            (9999, 12, 31),
        ] {
            let target = i64::from(Date::from_gregorian(y, m, d).unwrap().jdn());
            assert_eq!(
                plain_year_start(target),
                YEAR_STARTS.start_for(target),
                "{y:04}-{m:02}-{d:02}"
            );
        }
        let start = i64::from(Date::from_gregorian(1850, 1, 1).unwrap().jdn());
        for target in (start..start + 365 * 100).step_by(3) {
            assert_eq!(plain_year_start(target), YEAR_STARTS.start_for(target), "{target}");
        }
    }
}
