//! Lecture date/time formats and the due-soon window.

use crate::error::AppError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Storage format for `lecture_date`.
pub const DATE_FMT: &str = "%Y-%m-%d";
/// Storage format for `lecture_time`. Zero-padded so string comparison
/// matches chronological order.
pub const TIME_FMT: &str = "%H:%M:%S";

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, DATE_FMT)
        .map_err(|_| AppError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", s)))
}

/// Parse a `HH:MM:SS` string.
pub fn parse_time(s: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(s, TIME_FMT)
        .map_err(|_| AppError::Validation(format!("invalid time '{}', expected HH:MM:SS", s)))
}

/// The [start, end] slice of today scanned for unsent reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Window of `window_minutes` starting at `now`.
///
/// The window never crosses midnight: an end past 23:59:59 clamps to
/// 23:59:59, so a lecture shortly after midnight is picked up by a tick on
/// its own date.
pub fn due_window(now: NaiveDateTime, window_minutes: i64) -> DueWindow {
    let start = now.time();
    let (end, wrapped) = start.overflowing_add_signed(Duration::minutes(window_minutes));
    let end = if wrapped > 0 {
        NaiveTime::from_hms_opt(23, 59, 59).expect("valid clamp time")
    } else {
        end
    };
    DueWindow {
        date: now.date(),
        start,
        end,
    }
}
