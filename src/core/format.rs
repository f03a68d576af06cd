//! Display formatting shared by the handlers
//!
//! Timestamps are stored and compared as naive UTC values (the MySQL session
//! runs with `time_zone = '+00:00'`).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const THIRTY_DAYS: i64 = 30 * DAY;

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// `2025-01-31 14:05:00`
pub fn sql_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `Jan 5, 2025 2:05 PM`
pub fn long_datetime(dt: NaiveDateTime) -> String {
    dt.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// `Jan 05, 2025 2:05 PM`
pub fn padded_datetime(dt: NaiveDateTime) -> String {
    dt.format("%b %d, %Y %-I:%M %p").to_string()
}

/// `Jan 5, 2025`
pub fn short_date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// `Jan 05, 2025`
pub fn padded_date(d: NaiveDate) -> String {
    d.format("%b %d, %Y").to_string()
}

/// `January 5, 2025`
pub fn full_date(d: NaiveDate) -> String {
    d.format("%B %-d, %Y").to_string()
}

/// `Jan 5`
pub fn month_day(d: NaiveDate) -> String {
    d.format("%b %-d").to_string()
}

/// `2:05 PM`
pub fn clock_time(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Relative age of `then`; timestamps in the future read as "just now".
pub fn time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let secs = (now - then).num_seconds();
    if secs < MINUTE {
        "just now".to_string()
    } else if secs < HOUR {
        format!("{} minutes ago", secs / MINUTE)
    } else if secs < DAY {
        format!("{} hours ago", secs / HOUR)
    } else {
        format!("{} days ago", secs / DAY)
    }
}

/// Like [`time_ago`], but anything older than thirty days shows its date instead.
pub fn time_ago_or_date(then: NaiveDateTime, now: NaiveDateTime) -> String {
    if (now - then).num_seconds() >= THIRTY_DAYS {
        padded_date(then.date())
    } else {
        time_ago(then, now)
    }
}

/// Rounds half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `jane@example.com` -> `jan***@example.com`
pub fn mask_email(email: &str) -> String {
    let prefix: String = email.chars().take(3).collect();
    let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or("");
    format!("{prefix}***@{domain}")
}

/// `1234567890` -> `123***890`
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let head: String = chars.iter().take(3).collect();
    let tail: String = chars[chars.len().saturating_sub(3)..].iter().collect();
    format!("{head}***{tail}")
}
