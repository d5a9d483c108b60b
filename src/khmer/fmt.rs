//! Khmer names and date formatting.
//!
//! A pattern is copied to the output with tokens replaced by fields of a
//! [`Conversion`]. Tokens, longest first:
//!
//! | Token | Value | Example |
//! |-------|-------|---------|
//! | `W` | weekday | អាទិត្យ |
//! | `w` | short weekday | អា |
//! | `d` | lunar day `1..=15` | ៦ |
//! | `D` | lunar day, two digits | ០៦ |
//! | `n` | short moon phase | ក |
//! | `N` | moon phase | កើត |
//! | `o` | moon-day symbol | ᧦ |
//! | `m` | lunar month | ចេត្រ |
//! | `ms` | lunar month abbreviation | ចេ |
//! | `M` | Gregorian month | មេសា |
//! | `Ms` | Gregorian month abbreviation | មស |
//! | `a` | animal year | រោង |
//! | `e` | sak | បញ្ចស័ក |
//! | `b` | BE year | ២៥៦៧ |
//! | `c` | Gregorian year | ២០២៤ |
//! | `j` | JS year | ១៣៨៥ |
//!
//! Digits in substituted values are written in Khmer numerals. The raw
//! tokens `dr`, `Dr`, `br`, `cr` and `jr` keep Latin digits. Text in square
//! brackets is copied without the brackets; everything else is copied as
//! written.

use super::convert::Conversion;

/// Lunar month names, indexed by [`Month::index`](super::Month::index).
pub const LUNAR_MONTH_NAMES: [&str; 14] = [
    "មិគសិរ", "បុស្ស", "មាឃ", "ផល្គុន", "ចេត្រ", "ពិសាខ",
    "ជេស្ឋ", "អាសាឍ", "ស្រាពណ៍", "ភទ្របទ", "អស្សុជ", "កត្ដិក",
    "បឋមាសាឍ", "ទុតិយាសាឍ",
];

pub const LUNAR_MONTH_ABBREVIATIONS: [&str; 14] = [
    "មិ", "បុ", "មា", "ផល", "ចេ", "ពិ", "ជេ",
    "អា", "ស្រ", "ភ", "អ", "ក", "បឋ", "ទុតិ",
];

/// Gregorian month names, January first.
pub const SOLAR_MONTH_NAMES: [&str; 12] = [
    "មករា", "កុម្ភៈ", "មីនា", "មេសា", "ឧសភា", "មិថុនា",
    "កក្កដា", "សីហា", "កញ្ញា", "តុលា", "វិច្ឆិកា", "ធ្នូ",
];

pub const SOLAR_MONTH_ABBREVIATIONS: [&str; 12] = [
    "មក", "កម", "មន", "មស", "ឧស", "មថ", "កដ", "សហ", "កញ", "តល", "វក", "ធន",
];

/// Animal year names, Rat first.
pub const ANIMAL_YEAR_NAMES: [&str; 12] = [
    "ជូត", "ឆ្លូវ", "ខាល", "ថោះ", "រោង", "ម្សាញ់",
    "មមី", "មមែ", "វក", "រកា", "ច", "កុរ",
];

pub const ANIMAL_YEAR_EMOJIS: [&str; 12] = [
    "🐀", "🐂", "🐅", "🐇", "🐉", "🐍", "🐎", "🐐", "🐒", "🐓", "🐕", "🐖",
];

pub const SAK_NAMES: [&str; 10] = [
    "សំរឹទ្ធិស័ក", "ឯកស័ក", "ទោស័ក", "ត្រីស័ក", "ចត្វាស័ក",
    "បញ្ចស័ក", "ឆស័ក", "សប្តស័ក", "អដ្ឋស័ក", "នព្វស័ក",
];

/// Weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "អាទិត្យ", "ចន្ទ", "អង្គារ", "ពុធ", "ព្រហស្បតិ៍", "សុក្រ", "សៅរ៍",
];

pub const WEEKDAY_SHORT_NAMES: [&str; 7] = [
    "អា", "ច", "អ", "ព", "ព្រ", "សុ", "ស",
];

/// Waxing, waning.
pub const MOON_PHASE_NAMES: [&str; 2] = [
    "កើត", "រោច",
];

pub const MOON_PHASE_SHORT_NAMES: [&str; 2] = [
    "ក", "រ",
];

/// Symbols for day numbers `0..=29`, as printed in almanacs.
pub const MOON_DAY_SYMBOLS: [&str; 30] = [
    "᧡", "᧢", "᧣", "᧤", "᧥", "᧦", "᧧", "᧨", "᧩", "᧪",
    "᧫", "᧬", "᧭", "᧮", "᧯", "᧱", "᧲", "᧳", "᧴", "᧵",
    "᧶", "᧷", "᧸", "᧹", "᧺", "᧻", "᧼", "᧽", "᧾", "᧿",
];

const KHMER_DIGITS: [char; 10] = ['០', '១', '២', '៣', '៤', '៥', '៦', '៧', '៨', '៩'];

/// Replaces ASCII digits with Khmer numerals.
///
/// # Example
///
/// ```
/// use chhankitek::khmer::fmt::khmer_numerals;
///
/// assert_eq!("ព.ស. ២៥៦៨", khmer_numerals("ព.ស. 2568"));
/// ```
pub fn khmer_numerals(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => KHMER_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

const TOKENS: [&str; 21] = [
    "Ms", "ms", "Dr", "dr", "br", "cr", "jr", "W", "w", "d", "D", "n", "N", "o", "m", "M", "a",
    "e", "b", "c", "j",
];

/// Value of `token`, with Latin digits, and whether its digits are to be
/// localised.
fn substitute(conv: &Conversion, token: &str) -> (String, bool) {
    let lunar = &conv.lunar;
    let solar_month = (conv.moment.date().gregorian().1 - 1) as usize;
    let raw = token.len() == 2 && token.ends_with('r');
    let value = match token.trim_end_matches('r') {
        "W" => conv.weekday().name().to_owned(),
        "w" => conv.weekday().short_name().to_owned(),
        "d" => lunar.day().to_string(),
        "D" => format!("{:02}", lunar.day()),
        "n" => MOON_PHASE_SHORT_NAMES[lunar.phase().index() as usize].to_owned(),
        "N" => lunar.phase().name().to_owned(),
        "o" => MOON_DAY_SYMBOLS[lunar.day_number() as usize].to_owned(),
        "m" => lunar.month().name().to_owned(),
        "ms" => lunar.month().abbreviation().to_owned(),
        "M" => SOLAR_MONTH_NAMES[solar_month].to_owned(),
        "Ms" => SOLAR_MONTH_ABBREVIATIONS[solar_month].to_owned(),
        "a" => conv.animal_year.name().to_owned(),
        "e" => conv.sak.name().to_owned(),
        "b" => lunar.be_year().to_string(),
        "c" => conv.moment.date().gregorian().0.to_string(),
        "j" => conv.js_year.to_string(),
        _ => token.to_owned(),
    };
    (value, !raw)
}

/// Formats a conversion with `pattern`, or as the default sentence
/// `ថ្ងៃW dN ខែm ឆ្នាំa e ពុទ្ធសករាជ b` when `pattern` is `None`.
///
/// # Example
///
/// ```
/// use chhankitek::Calendar;
/// use chhankitek::khmer::fmt::format;
///
/// let kh = Calendar::new().from_gregorian(2024, 5, 23, 8, 0, 0).unwrap();
/// assert_eq!(
///     "ថ្ងៃព្រហស្បតិ៍ ១រោច ខែពិសាខ ឆ្នាំរោង ឆស័ក ពុទ្ធសករាជ ២៥៦៨",
///     format(&kh, None)
/// );
/// assert_eq!("១រោច ខែពិសាខ ព.ស. ២៥៦៨", format(&kh, Some("dN ខែm [ព.ស.] b")));
/// assert_eq!("BE 2568", format(&kh, Some("[BE] br")));
/// ```
pub fn format(conv: &Conversion, pattern: Option<&str>) -> String {
    let Some(pattern) = pattern else {
        return default_sentence(conv);
    };
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        if c == '[' {
            // At least one character up to the first closing bracket.
            if let Some(end) = rest[1..].find(']').filter(|&end| end > 0) {
                out += &rest[1..1 + end];
                rest = &rest[end + 2..];
                continue;
            }
        }
        if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) {
            let (value, localise) = substitute(conv, token);
            if localise {
                out += &khmer_numerals(&value);
            } else {
                out += &value;
            }
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn default_sentence(conv: &Conversion) -> String {
    let lunar = &conv.lunar;
    khmer_numerals(&format!(
        "ថ្ងៃ{} {}{} ខែ{} ឆ្នាំ{} {} ពុទ្ធសករាជ {}",
        conv.weekday().name(),
        lunar.day(),
        lunar.phase().name(),
        lunar.month().name(),
        conv.animal_year.name(),
        conv.sak.name(),
        lunar.be_year()
    ))
}
