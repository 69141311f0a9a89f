//! Best-effort date inference from Spanish folder names.
//!
//! Real trees mix pure month names (`DICIEMBRE`), number-prefixed names
//! (`12-DICIEMBRE`) and free-text day folders (`23 DE DICIEMBRE`). Every
//! function here is total: failure is `None`, never a panic, so one
//! malformed folder cannot abort a scan.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

/// Spanish month names in calendar order.
const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

lazy_static! {
    /// Leading run of digits: `"23 DE DICIEMBRE"` -> `23`.
    static ref LEADING_DIGITS: Regex = Regex::new(r"^(\d+)").unwrap();

    /// Anything that is not a digit.
    static ref NON_DIGITS: Regex = Regex::new(r"\D").unwrap();
}

/// Strip every non-digit character.
fn strip_to_digits(text: &str) -> String {
    NON_DIGITS.replace_all(text, "").into_owned()
}

/// Resolve a Spanish month name or numeric token to a month number 1-12.
///
/// Tries, in order: exact name match on the lowercased trimmed input, the
/// stripped digits when they land in 1-12, then a substring search for
/// each month name (first match in calendar order wins).
pub fn resolve_month(text: &str) -> Option<u32> {
    let normalized = text.trim().to_lowercase();

    if let Some(pos) = SPANISH_MONTHS.iter().position(|m| *m == normalized) {
        return Some(pos as u32 + 1);
    }

    if let Ok(n) = strip_to_digits(&normalized).parse::<u32>() {
        if (1..=12).contains(&n) {
            return Some(n);
        }
    }

    SPANISH_MONTHS
        .iter()
        .position(|m| normalized.contains(m))
        .map(|pos| pos as u32 + 1)
}

/// Infer a calendar date from raw (day, month, year) folder names.
///
/// `("23 DE DICIEMBRE", "12-DICIEMBRE", "2025")` resolves to 2025-12-23.
/// Returns `None` for anything it cannot make sense of: an empty input,
/// a year or day without digits, an unrecognized month, or an impossible
/// combination such as 31 February.
pub fn parse_folder_date(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    if day.is_empty() || month.is_empty() || year.is_empty() {
        return None;
    }

    let year: i32 = strip_to_digits(year).parse().ok()?;
    let month = resolve_month(month)?;
    let day = parse_day(day)?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Day number from a day folder name: a leading digit run, falling back
/// to whatever digits appear anywhere in the name.
fn parse_day(text: &str) -> Option<u32> {
    if let Some(caps) = LEADING_DIGITS.captures(text) {
        return caps[1].parse().ok();
    }
    strip_to_digits(text).parse().ok()
}

/// Validate a user-supplied `DD/MM/YYYY` date (report range bounds).
pub fn parse_report_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
}
