//! Labor-hour accounting for time entries.
//!
//! A time entry carries up to two slots (start/end pairs in `HH:MM`). Each
//! slot counts only when both ends parse and the end is strictly after the
//! start; anything else contributes zero. Nothing here fails: incomplete
//! entries stay usable while they are being filled in.

pub mod clock;

pub use clock::{half_hour_slots, is_valid_clock, parse_minutes};

/// Worked minutes for one slot, zero when the slot is incomplete, malformed,
/// zero-length or reversed.
pub fn slot_minutes(start: Option<&str>, end: Option<&str>) -> u32 {
    match (parse_minutes(start), parse_minutes(end)) {
        (Some(start), Some(end)) if end > start => end - start,
        _ => 0,
    }
}

/// Total hours worked over the first and (optional) second slot.
pub fn compute_total_hours(
    start1: Option<&str>,
    end1: Option<&str>,
    start2: Option<&str>,
    end2: Option<&str>,
) -> f64 {
    let minutes = slot_minutes(start1, end1) + slot_minutes(start2, end2);
    f64::from(minutes) / 60.0
}
