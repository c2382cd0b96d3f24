//! Night window classification.
//!
//! Night work is any minute whose local time of day falls in
//! `[22:00, 24:00) ∪ [00:00, 06:00)`. The window crosses midnight, so a shift
//! is intersected with one `[22:00, 06:00)` window per evening it touches,
//! starting with the evening before the shift's first day.

use chrono::{Duration, NaiveDateTime};

/// Hour of day at which the night window opens (inclusive).
pub const NIGHT_START_HOUR: u32 = 22;

/// Hour of day at which the night window closes (exclusive).
pub const NIGHT_END_HOUR: u32 = 6;

/// Counts the minutes of `[start, end)` that fall inside the night window.
///
/// Both bounds are expected at minute precision. An empty or inverted
/// interval has no night minutes.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::night_minutes;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2025-01-01 21:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2025-01-02 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // 120 minutes before midnight, 360 after
/// assert_eq!(night_minutes(start, end), 480);
/// ```
pub fn night_minutes(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    if end <= start {
        return 0;
    }

    let window_length = Duration::hours(i64::from(24 - NIGHT_START_HOUR + NIGHT_END_HOUR));
    let first_evening = start.date().pred_opt().unwrap_or(start.date());
    let last_evening = end.date();

    first_evening
        .iter_days()
        .take_while(|day| *day <= last_evening)
        .filter_map(|day| day.and_hms_opt(NIGHT_START_HOUR, 0, 0))
        .map(|window_start| {
            let window_end = window_start + window_length;
            let overlap_start = start.max(window_start);
            let overlap_end = end.min(window_end);
            if overlap_end > overlap_start {
                (overlap_end - overlap_start).num_minutes()
            } else {
                0
            }
        })
        .sum()
}
