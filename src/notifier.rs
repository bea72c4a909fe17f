//! Background reminder poller.
//!
//! One detached thread scans for due lectures once per minute and hands each
//! hit to the UI thread through a window event. A lecture is marked notified
//! right after delivery is attempted, so every reminder fires at most once.

use crate::app::{lecture_due_soon, lecture_mark_notified, LectureDto};
use crate::error::AppError;
use crate::infra::DbPool;
use chrono::{Local, NaiveDateTime};
use std::thread;
use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager};

/// Event the frontend listens on for reminder dialogs.
pub const DUE_EVENT: &str = "lecture-due";

/// Seconds between scans.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// How far ahead of a lecture's start the reminder fires.
pub const LOOKAHEAD_MINUTES: i64 = 15;

/// One poller iteration: query due lectures as of `now`, deliver each, then
/// consume it. The flag is set even when `deliver` could not reach the UI.
pub fn run_tick(
    pool: &DbPool,
    now: NaiveDateTime,
    window_minutes: i64,
    deliver: &mut dyn FnMut(&LectureDto),
) -> Result<usize, AppError> {
    let due = lecture_due_soon(pool, now, window_minutes)?;
    for lecture in &due {
        deliver(lecture);
        match lecture_mark_notified(pool, &lecture.id) {
            Ok(true) => {}
            Ok(false) => log::warn!("lecture {} was already marked notified", lecture.id),
            Err(e) => log::error!("failed to mark lecture {} notified: {}", lecture.id, e),
        }
    }
    Ok(due.len())
}

/// Spawn the poller thread. Runs until process exit; the pool must already be
/// managed on `app`.
pub fn spawn(app: AppHandle) {
    thread::spawn(move || {
        log::info!(
            "notification poller started: every {}s, {}min lookahead",
            POLL_INTERVAL.as_secs(),
            LOOKAHEAD_MINUTES
        );
        loop {
            let now = Local::now().naive_local();
            {
                let pool = app.state::<DbPool>();
                let mut deliver = |lecture: &LectureDto| {
                    if let Err(e) = app.emit(DUE_EVENT, lecture) {
                        log::error!("failed to deliver reminder for lecture {}: {}", lecture.id, e);
                    }
                };
                match run_tick(&pool, now, LOOKAHEAD_MINUTES, &mut deliver) {
                    Ok(0) => {}
                    Ok(n) => log::info!("delivered {} lecture reminder(s)", n),
                    Err(e) => log::error!("notification tick failed: {}", e),
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    });
}
