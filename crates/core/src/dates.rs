//! Date-expression resolution.
//!
//! Clients speak in tokens like "today", "Wednesday", or "next week Monday";
//! this module turns them into canonical `YYYY-MM-DD` strings relative to an
//! explicit reference day. Anything unrecognized is passed through unchanged —
//! a best-effort value, not a guarantee of calendar validity.

use chrono::{Datelike, Days, NaiveDate};

/// Weekday names indexed Sunday=0 .. Saturday=6.
const WEEKDAYS: [&str; 7] =
    ["sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday"];

/// Resolves a free-form date expression against a reference day.
///
/// Recognized forms, in priority order: `today`; `tomorrow`; `next week` plus
/// an optional weekday name; `in two weeks` / `in 2 weeks`; a bare weekday
/// name (always the next future occurrence, never the reference day itself).
/// Everything else is returned unchanged and assumed already canonical.
pub fn resolve(expression: &str, reference: NaiveDate) -> String {
    let normalized = expression.trim().to_ascii_lowercase();

    match normalized.as_str() {
        "today" => return iso(reference),
        "tomorrow" => return iso(plus_days(reference, 1)),
        _ => {}
    }

    if normalized.contains("next week") {
        if let Some(target) = contained_weekday(&normalized) {
            let mut offset = 7 + target as i64 - weekday_index(reference) as i64;
            // "next week Monday" said on a Monday means the Monday after next.
            if offset == 7 {
                offset = 14;
            }
            return iso(plus_days(reference, offset));
        }
        return iso(plus_days(reference, 7));
    }

    if normalized.contains("in two weeks") || normalized.contains("in 2 weeks") {
        return iso(plus_days(reference, 14));
    }

    if let Some(target) = weekday_position(&normalized) {
        let mut offset = target as i64 - weekday_index(reference) as i64;
        if offset <= 0 {
            offset += 7;
        }
        return iso(plus_days(reference, offset));
    }

    expression.trim().to_string()
}

/// True for multi-week expressions with no weekday name ("next week",
/// "in two weeks"); the availability policy answers those with a
/// week-aggregated view instead of a single day.
pub fn week_expression(expression: &str) -> bool {
    let normalized = expression.trim().to_ascii_lowercase();
    let multi_week = normalized.contains("next week")
        || normalized.contains("in two weeks")
        || normalized.contains("in 2 weeks");
    multi_week && contained_weekday(&normalized).is_none()
}

/// Monday of the week containing `date`: Sunday rolls back 6 days, Monday 0.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    let back = (weekday_index(date) + 6) % 7;
    date.checked_sub_days(Days::new(back as u64)).unwrap_or(date)
}

/// Display formatting, e.g. "Friday, May 10". Empty input reads as
/// "Unknown date"; anything unparseable degrades to the raw string.
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return "Unknown date".to_string();
    }
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%A, %B %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn plus_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64)).unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs())).unwrap_or(date)
    }
}

fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Index of a bare weekday-name expression, or None.
fn weekday_position(normalized: &str) -> Option<usize> {
    WEEKDAYS.iter().position(|day| *day == normalized)
}

/// First weekday name appearing anywhere in the expression.
fn contained_weekday(normalized: &str) -> Option<usize> {
    normalized
        .split(|c: char| !c.is_ascii_alphabetic())
        .find_map(|token| WEEKDAYS.iter().position(|day| *day == token))
}
