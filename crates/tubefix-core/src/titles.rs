//! Title generation for raw uploads
//!
//! A raw upload title such as `VID_20230714_roadtrip.mp4` is turned into
//! one of a fixed set of road-trip titles carrying the recording date. The
//! date comes from the first `YYYYMMDD` run in the name; when there is none,
//! or it is not a real calendar date, today's date is used instead.

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use time::{Date, Month, OffsetDateTime};

/// Title prefixes; every generated title is `"<prefix> - <date>"`.
pub const TITLE_PREFIXES: [&str; 10] = [
    "Highway Chronicles",
    "Open Road Adventure",
    "Scenic Route Highlights",
    "The Ultimate Drive",
    "Miles & Memories",
    "Asphalt Adventures",
    "رحلة طريق ملحمية",
    "أجواء قيادة مثالية",
    "سحر الطريق السريع",
    "مغامرة الأسفلت",
];

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"([0-9]{4})([0-9]{2})([0-9]{2})").unwrap();
}

/// Generate a new title for `filename` using the current date and the
/// thread-local RNG.
pub fn generate_title(filename: &str) -> String {
    title_for(filename, today(), &mut rand::thread_rng())
}

/// Generate a new title for `filename`, falling back to `today` when the
/// name carries no usable date.
pub fn title_for<R: Rng + ?Sized>(filename: &str, today: Date, rng: &mut R) -> String {
    let date = format_date(resolve_date(filename, today));
    let prefix = TITLE_PREFIXES[rng.gen_range(0..TITLE_PREFIXES.len())];
    format!("{prefix} - {date}")
}

/// The date embedded in `filename`, or `today`.
pub fn resolve_date(filename: &str, today: Date) -> Date {
    let name = strip_extension(filename);
    DATE_RE
        .captures(name)
        .and_then(|caps| {
            let year: i32 = caps[1].parse().ok()?;
            let month: u8 = caps[2].parse().ok()?;
            let day: u8 = caps[3].parse().ok()?;
            if year < 1 {
                return None;
            }
            let month = Month::try_from(month).ok()?;
            Date::from_calendar_date(year, month, day).ok()
        })
        .unwrap_or(today)
}

/// `Month DD, YYYY` with English month names, e.g. `July 04, 2023`.
pub fn format_date(date: Date) -> String {
    format!("{} {:02}, {:04}", date.month(), date.day(), date.year())
}

/// Today's date in the local timezone, or UTC when the offset is unknown.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Drop the last `.suffix` of the final path component. Leading dots of the
/// component do not start an extension.
fn strip_extension(filename: &str) -> &str {
    let base_start = filename.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let base = &filename[base_start..];
    match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => &filename[..base_start + dot],
        _ => filename,
    }
}
