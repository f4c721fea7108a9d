//! Date/time display helpers.
//!
//! The app stores human-readable labels, not structured times: schedule
//! entries carry free text like `"2:00 PM"` and photo/message records carry
//! locale-style stamps like `"10/24/2024, 6:30:00 PM"`.  These helpers are
//! the single place those formats are produced and (best-effort) parsed.

use chrono::{DateTime, NaiveTime, Timelike, Utc};

/// Long-form date, e.g. `"October 24, 2024"`.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// 12-hour clock label, e.g. `"2:00 PM"`.
pub fn format_time(dt: &DateTime<Utc>) -> String {
    dt.format("%-I:%M %p").to_string()
}

/// Full display stamp, e.g. `"10/24/2024, 6:30:00 PM"`.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Parse a free-text schedule label such as `"2:00 PM"`.
///
/// Returns `None` for anything that does not look like a 12-hour clock
/// label; schedule times are organiser-entered free text and were never
/// validated at entry.
pub fn parse_time_label(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), "%I:%M %p").ok()
}

/// Whether a schedule label falls within 30 minutes of `now`.
///
/// The distance wraps at midnight, so `"12:10 AM"` is near at 11:50 PM.
/// Unparsable labels are never "near".
pub fn is_near(label: &str, now: NaiveTime) -> bool {
    let Some(event) = parse_time_label(label) else {
        return false;
    };
    let event_minutes = (event.hour() * 60 + event.minute()) as i64;
    let now_minutes = (now.hour() * 60 + now.minute()) as i64;
    let apart = (event_minutes - now_minutes).abs();
    apart.min(24 * 60 - apart) <= 30
}
