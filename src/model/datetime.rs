// File: src/model/datetime.rs
//! Flexible date/time literal parsing and the fixed display format.
//!
//! User input accepts a handful of numeric date layouts plus an optional
//! compact 24h time (`900`, `1437`). Everything is rendered back through a
//! single display format, which is also what the storage file contains.
use crate::error::DateFormatError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

/// chrono spelling of `MMM dd yyyy HH:mm`.
pub const DISPLAY_FORMAT: &str = "%b %d %Y %H:%M";

/// First accepted input layout with a compact time.
const INPUT_FORMAT: &str = "%Y-%m-%d %H%M";

#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    YearMonthDay,
    DayMonthYear,
    MonthDayYear,
}

struct DatePattern {
    regex: Regex,
    order: FieldOrder,
}

// Order matters: ambiguous literals like 12/12/2012 go to the first match.
const DATE_LAYOUTS: [(&str, FieldOrder); 6] = [
    (r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$", FieldOrder::YearMonthDay),
    (r"^([0-9]{4})/([0-9]{2})/([0-9]{2})$", FieldOrder::YearMonthDay),
    (r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$", FieldOrder::DayMonthYear),
    (r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$", FieldOrder::DayMonthYear),
    (r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$", FieldOrder::MonthDayYear),
    (r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$", FieldOrder::MonthDayYear),
];

fn date_patterns() -> &'static [DatePattern] {
    static PATTERNS: OnceLock<Vec<DatePattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        DATE_LAYOUTS
            .iter()
            .filter_map(|(src, order)| {
                Regex::new(src).ok().map(|regex| DatePattern {
                    regex,
                    order: *order,
                })
            })
            .collect()
    })
}

fn time_pattern() -> Option<&'static Regex> {
    static TIME: OnceLock<Option<Regex>> = OnceLock::new();
    TIME.get_or_init(|| Regex::new(r"^[0-9]{3,4}$").ok()).as_ref()
}

/// Parses a user supplied `<date> [time]` literal.
///
/// Without a time token the result is midnight.
pub fn parse(raw: &str) -> Result<NaiveDateTime, DateFormatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DateFormatError("Empty date string".to_string()));
    }

    let (date_part, time_part) = split_date_and_time(trimmed);
    let time = match time_part {
        Some(t) => parse_time(&t)?,
        None => NaiveTime::default(),
    };
    let date = parse_date(&date_part)?;
    Ok(date.and_time(time))
}

/// Renders a timestamp in the display format, e.g. `Dec 25 2023 14:00`.
pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Renders a timestamp in a layout [`parse`] accepts, e.g. `2023-12-25 1400`.
/// Used to prefill edit lines.
pub fn format_input(ts: &NaiveDateTime) -> String {
    ts.format(INPUT_FORMAT).to_string()
}

/// Reads back a timestamp produced by [`format`]. Only that exact layout is
/// accepted.
pub fn parse_display(s: &str) -> Result<NaiveDateTime, DateFormatError> {
    NaiveDateTime::parse_from_str(s.trim(), DISPLAY_FORMAT)
        .map_err(|e| DateFormatError(format!("Invalid stored date '{}': {}", s, e)))
}

fn split_date_and_time(input: &str) -> (String, Option<String>) {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        [date] => (date.to_string(), None),
        [date, time] => (date.to_string(), Some(time.to_string())),
        [rest @ .., time] => (rest.join(" "), Some(time.to_string())),
        [] => (String::new(), None),
    }
}

fn invalid_time(token: &str) -> DateFormatError {
    DateFormatError(format!(
        "Invalid time format: {}. Use 24hr format like 1437 for 14:37",
        token
    ))
}

fn parse_time(token: &str) -> Result<NaiveTime, DateFormatError> {
    let is_compact = time_pattern().is_some_and(|re| re.is_match(token));
    if !is_compact {
        return Err(invalid_time(token));
    }

    // "900" -> 9:00, "1437" -> 14:37
    let split = token.len() - 2;
    let hour: u32 = token[..split].parse().map_err(|_| invalid_time(token))?;
    let minute: u32 = token[split..].parse().map_err(|_| invalid_time(token))?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| invalid_time(token))
}

fn parse_date(token: &str) -> Result<NaiveDate, DateFormatError> {
    for pattern in date_patterns() {
        let Some(caps) = pattern.regex.captures(token) else {
            continue;
        };
        let fields: Vec<u32> = (1..=3)
            .filter_map(|i| caps.get(i).and_then(|m| m.as_str().parse().ok()))
            .collect();
        let &[a, b, c] = fields.as_slice() else {
            continue;
        };
        let (year, month, day) = match pattern.order {
            FieldOrder::YearMonthDay => (a, b, c),
            FieldOrder::DayMonthYear => (c, b, a),
            FieldOrder::MonthDayYear => (c, a, b),
        };
        if let Some(date) = resolve_date(year as i32, month, day) {
            return Ok(date);
        }
    }

    Err(DateFormatError(format!(
        "Invalid date format: {}. Please use formats like yyyy-mm-dd or dd/mm/yyyy",
        token
    )))
}

/// Builds a date, clamping a day past the end of the month onto the last day.
fn resolve_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if year < 1 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = last_day_of_month(first);
    NaiveDate::from_ymd_opt(year, month, day.min(last_day))
}

fn last_day_of_month(first: NaiveDate) -> u32 {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_month
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}
