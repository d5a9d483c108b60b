use chhankitek::khmer::{AnimalYear, KhmerDate, LeapType, Month, MoonPhase, Sak, leap};
use chhankitek::{Calendar, Config, Date, Error, Moment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn second_before(m: Moment) -> Moment {
    let (h, mi, s) = m.time();
    match h * 3600 + mi * 60 + s {
        0 => Moment::new(m.date() - 1, 23, 59, 59),
        t => Moment::new(m.date(), (t - 1) / 3600, (t - 1) / 60 % 60, (t - 1) % 60),
    }
    .unwrap()
}

#[test]
fn epoch() {
    let kh = chhankitek::from_gregorian(1900, 1, 1, 0, 0, 0).unwrap();
    assert_eq!((1, MoonPhase::Waxing, Month::Boss, 2443), kh.lunar.parts());
    assert_eq!(1, kh.weekday().index());
}

#[test]
fn published_new_years() {
    for (year, std) in [
        (1879, "1879-04-12T11:36:00"),
        (1897, "1897-04-13T02:00:00"),
        (2011, "2011-04-14T13:12:00"),
        (2012, "2012-04-14T19:11:00"),
        (2013, "2013-04-14T02:12:00"),
        (2014, "2014-04-14T08:07:00"),
        (2015, "2015-04-14T14:02:00"),
        (2016, "2016-04-13T20:00:00"),
        (2020, "2020-04-13T20:48:00"),
        (2024, "2024-04-13T22:17:00"),
    ] {
        assert_eq!(std, chhankitek::new_year(year).unwrap().to_string(), "{year}");
    }
}

#[test]
fn animal_year_and_sak_boundaries() {
    let calendar = Calendar::new();
    for year in [1950, 2016, 2023, 2024, 2025, 2100] {
        let ny = calendar.new_year_info(year).unwrap();
        let pisakha_bochea = calendar.pisakha_bochea(year).unwrap();
        assert!(ny.lerng_sak < pisakha_bochea, "{year}");

        let before = calendar.from_moment(second_before(ny.moment)).unwrap();
        let after = calendar.from_moment(ny.moment).unwrap();
        assert_eq!(before.animal_year.succ(), after.animal_year, "{year}");
        assert_eq!(before.lunar.be_year(), after.lunar.be_year(), "{year}");
        assert_eq!(before.sak, after.sak, "{year}");

        let eve = calendar.from_moment(second_before(ny.lerng_sak)).unwrap();
        let lerng_sak = calendar.from_moment(ny.lerng_sak).unwrap();
        assert_eq!(eve.js_year + 1, lerng_sak.js_year, "{year}");
        assert_eq!(eve.animal_year, lerng_sak.animal_year, "{year}");
        assert_eq!(Sak::of_js_year(eve.js_year + 1), lerng_sak.sak, "{year}");
    }
}

#[test]
fn visakha_bochea() {
    let calendar = Calendar::new();
    let before = calendar.from_gregorian(2024, 5, 22, 23, 59, 59).unwrap();
    let after = calendar.from_gregorian(2024, 5, 23, 0, 0, 0).unwrap();
    assert_eq!((15, MoonPhase::Waxing, Month::Pisakh, 2567), before.lunar.parts());
    assert_eq!((1, MoonPhase::Waning, Month::Pisakh, 2568), after.lunar.parts());
    // The animal year and JS year already turned at the New Year and
    // Lerng Sak; Visakha Bochea only catches the BE year up.
    assert_eq!(AnimalYear::Dragon, before.animal_year);
    assert_eq!(AnimalYear::Dragon, after.animal_year);
    assert_eq!(before.js_year, after.js_year);
    assert_eq!(before.sak, after.sak);
}

#[test]
fn round_trip() {
    let calendar = Calendar::new();
    let first = Date::from_gregorian(1700, 1, 1).unwrap();
    let last = Date::from_gregorian(2400, 12, 31).unwrap();
    let mut date = first;
    while date <= last {
        let (y, m, d) = date.gregorian();
        let kh = calendar.from_gregorian(y, m, d, 0, 0, 0).unwrap();
        assert_eq!(
            Ok(date),
            calendar.to_gregorian(kh.lunar),
            "{} {}",
            date.iso_gregorian(),
            kh.lunar
        );
        date = date + 97;
    }
}

#[test]
fn round_trip_every_day() {
    let calendar = Calendar::new();
    let first = Date::from_gregorian(2024, 1, 1).unwrap();
    for offset in 0..366 {
        let date = first + offset;
        let kh = calendar.from_moment(Moment::midnight(date)).unwrap();
        assert_eq!(
            Ok(date),
            calendar.to_gregorian(kh.lunar),
            "{} {}",
            date.iso_gregorian(),
            kh.lunar
        );
    }
}

#[test]
fn lunar_dates_follow_add_days() {
    // Converting consecutive days agrees with lunar date arithmetic.
    let calendar = Calendar::new();
    let first = Date::from_gregorian(2020, 1, 1).unwrap();
    let start = calendar.from_moment(Moment::noon(first)).unwrap().lunar;
    for offset in (0..365 * 8).step_by(5) {
        let kh = calendar.from_moment(Moment::noon(first + offset)).unwrap();
        assert_eq!(start.add_days(offset), kh.lunar, "{}", (first + offset).iso_gregorian());
    }
}

#[test]
fn add_subtract_symmetry() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2000 {
        let be_year = rng.random_range(2000..=3000);
        let month = Month::ALL[rng.random_range(0..14)];
        let len = month.days_in(be_year);
        // Asadh is replaced by First and Second Asadh in leap-month years.
        let leap_month = leap::leap_type(be_year) == LeapType::LeapMonth;
        if len == 0 || (month == Month::Asadh && leap_month) {
            continue;
        }
        let date = KhmerDate::from_day_number(rng.random_range(0..len), month, be_year);
        let n = rng.random_range(0..=1000);
        assert_eq!(date, date.add_days(n).subtract_days(n), "{date} + {n}");
        assert_eq!(date, date.subtract_days(n).add_days(n), "{date} - {n}");
    }
}

#[test]
fn month_lengths() {
    for be_year in 2000..=3000 {
        let leap_month = leap::leap_type(be_year) == LeapType::LeapMonth;
        for month in Month::ALL {
            let len = month.days_in(be_year);
            assert!([0, 29, 30].contains(&len), "{month} {be_year}");
            assert_eq!(len == 0, month.is_leap() && !leap_month, "{month} {be_year}");
        }
    }
}

#[test]
fn narrow_config() {
    let config = Config::default()
        .with_gregorian_years(1900..=2100)
        .with_be_years(2450..=2640)
        .with_search_radius(1);
    let calendar = Calendar::with_config(config).unwrap();
    assert!(matches!(
        calendar.from_gregorian(2101, 1, 1, 0, 0, 0),
        Err(Error::InvalidDate { .. })
    ));
    assert!(matches!(
        calendar.from_khmer(1, 0, 5, 2449),
        Err(Error::InvalidKhmerDate { .. })
    ));
    assert_eq!(
        (2024, 5, 23),
        calendar.from_khmer(1, 1, 5, 2568).unwrap().gregorian()
    );
    assert!(matches!(
        Calendar::with_config(Config::default().with_search_radius(20)),
        Err(Error::InvalidConfig { .. })
    ));
}

#[test]
fn shared_between_threads() {
    let calendar = Calendar::new();
    std::thread::scope(|s| {
        for year in 2020..2028 {
            let calendar = &calendar;
            s.spawn(move || {
                let ny = calendar.new_year(year).unwrap();
                assert_eq!(year, ny.date().gregorian().0);
            });
        }
    });
}

#[cfg(feature = "serde")]
#[test]
fn serde() {
    let kh = chhankitek::from_gregorian(2024, 5, 23, 8, 0, 0).unwrap();
    let json = serde_json::to_string(&kh).unwrap();
    let back: chhankitek::Conversion = serde_json::from_str(&json).unwrap();
    assert_eq!(kh, back);

    let ny = Calendar::new().new_year_info(2024).unwrap();
    let json = serde_json::to_string(&ny).unwrap();
    assert_eq!(ny, serde_json::from_str(&json).unwrap());
}
