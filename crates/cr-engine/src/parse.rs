//! Shared text-parsing helpers for the scorers: experience-range
//! extraction and duration-to-months resolution. Resume text is noisy, so
//! every helper degrades to a documented fallback instead of erroring.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:-|–|to)\s*(\d+)").unwrap());
static SINGLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*\+?").unwrap());
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

/// Band applied when a requirement names a single figure ("5+ years").
const SINGLE_VALUE_BAND_YEARS: f64 = 3.0;

/// Fallback tenure for duration strings with no usable year tokens.
const FALLBACK_TENURE_MONTHS: u32 = 12;

/// Parse a free-text experience requirement into `(min, max)` years.
///
/// - "3-5 years" / "3 to 5 years" → `(3.0, 5.0)`
/// - "5+ years" / "5 years" → `(5.0, 8.0)` (fixed 3-year band)
/// - no digits at all → `None`
pub fn parse_experience_range(text: &str) -> Option<(f64, f64)> {
    if let Some(caps) = RANGE_RE.captures(text) {
        let min: f64 = caps.get(1)?.as_str().parse().ok()?;
        let max: f64 = caps.get(2)?.as_str().parse().ok()?;
        return Some((min, max));
    }

    if let Some(caps) = SINGLE_RE.captures(text) {
        let min: f64 = caps.get(1)?.as_str().parse().ok()?;
        return Some((min, min + SINGLE_VALUE_BAND_YEARS));
    }

    None
}

/// All 4-digit year tokens (1900–2099) found in the text, in order.
pub fn extract_years(text: &str) -> Vec<i32> {
    YEAR_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// First 4-digit year in a duration string, used as the entry's start
/// year when ordering work history defensively.
pub fn start_year(text: &str) -> Option<i32> {
    extract_years(text).into_iter().next()
}

fn contains_present_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("present") || lower.contains("current")
}

/// Resolve a free-text duration into months against a reference year.
///
/// Two years → span between them; one year plus a "present"/"current"
/// marker → span up to the reference year; anything else → a silent
/// 1-year fallback, because unparseable tenures must not fail scoring.
pub fn duration_months_at(text: &str, reference_year: i32) -> u32 {
    let years = extract_years(text);

    match years.len() {
        0 => FALLBACK_TENURE_MONTHS,
        1 if contains_present_marker(text) => {
            let span = reference_year.saturating_sub(years[0]).max(0);
            (span as u32) * 12
        }
        1 => FALLBACK_TENURE_MONTHS,
        _ => {
            let earliest = *years.iter().min().unwrap_or(&reference_year);
            let latest = *years.iter().max().unwrap_or(&reference_year);
            ((latest - earliest).max(0) as u32) * 12
        }
    }
}

/// `duration_months_at` anchored to the current UTC year.
pub fn duration_months(text: &str) -> u32 {
    duration_months_at(text, Utc::now().year())
}
