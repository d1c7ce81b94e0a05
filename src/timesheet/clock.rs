//! `HH:MM` clock values used by time entries and scheduling fields

use chrono::{NaiveTime, Timelike};

/// Granularity of the clock options offered for time selection
pub const SLOT_STEP_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse a 24-hour `HH:MM` string into minutes since midnight.
///
/// Returns `None` for missing, blank or malformed input (no `:` separator,
/// non-numeric parts, hour > 23, minute > 59).
pub fn parse_minutes(value: Option<&str>) -> Option<u32> {
    let value = value?.trim();
    if !value.contains(':') {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .ok()
        .map(|t| t.hour() * 60 + t.minute())
}

/// Whether `value` is a well-formed `HH:MM` clock value
pub fn is_valid_clock(value: &str) -> bool {
    parse_minutes(Some(value)).is_some()
}

/// All clock values of a day at half-hour granularity: `00:00`, `00:30`, ... `23:30`.
pub fn half_hour_slots() -> Vec<String> {
    (0..MINUTES_PER_DAY)
        .step_by(SLOT_STEP_MINUTES as usize)
        .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
        .collect()
}
