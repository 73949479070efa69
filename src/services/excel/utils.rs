use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::Period;

static UNNAMED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^unnamed([:_\s].*)?$").unwrap());

/// Month abbreviation followed by a 2- or 4-digit year, e.g. "Jan-25",
/// "March 2025", "jul/25".
static MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([a-z]{3,9})\.?[\s\-/]+(\d{2,4})$").unwrap());

const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

pub fn is_unnamed_header(label: &str) -> bool {
    UNNAMED_RE.is_match(label.trim())
}

/// Parses a period header into a calendar date. Full dates are tried first,
/// then month-abbreviation + year forms, which resolve to the first of the
/// month. Returns None for anything unrecognizable.
pub fn parse_period_label(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y", "%d-%b-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(label, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(label, format) {
            return Some(dt.date());
        }
    }

    let caps = MONTH_YEAR_RE.captures(label)?;
    let month = month_from_name(&caps[1])?;
    let year: i32 = caps[2].parse().ok()?;
    let year = if year < 100 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_ABBREVS
        .iter()
        .position(|abbr| lower.starts_with(abbr))
        .map(|idx| idx as u32 + 1)
}

/// Excel serial day numbers count from 1899-12-30.
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial as i64))
}

/// Turns a header cell into a period, or None when the header is an unnamed
/// placeholder or does not look like a date.
pub fn header_to_period(cell: &Data) -> Option<Period> {
    match cell {
        Data::DateTime(dt) => {
            let date = excel_serial_to_date(dt.as_f64())?;
            Some(Period {
                label: date.format("%Y-%m-%d").to_string(),
                date,
            })
        }
        Data::DateTimeIso(s) | Data::String(s) => {
            let label = s.trim();
            if label.is_empty() || is_unnamed_header(label) {
                return None;
            }
            parse_period_label(label).map(|date| Period {
                label: label.to_string(),
                date,
            })
        }
        _ => None,
    }
}

/// Coerces a cell to a number; anything non-numeric counts as missing.
pub fn cell_to_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().replace(['$', ','], "").parse().ok(),
        _ => None,
    }
}

pub fn cell_to_label(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
