//! Due-soon scan and poller tick integration tests

use app_lib::app::{lecture_create, lecture_due_soon, lecture_list, LectureCreateReq, LectureDto};
use app_lib::infra::db::init_test_db;
use app_lib::infra::DbPool;
use app_lib::notifier::run_tick;
use chrono::{NaiveDate, NaiveDateTime};

// ──────────────────────── Helpers ────────────────────────

fn seed(pool: &DbPool, course: &str, date: &str, time: &str) -> LectureDto {
    lecture_create(
        pool,
        LectureCreateReq {
            course_name: course.to_string(),
            topic: None,
            lecture_date: date.to_string(),
            lecture_time: time.to_string(),
        },
    )
    .unwrap()
}

fn at(date: (i32, u32, u32), time: (u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(time.0, time.1, time.2)
        .unwrap()
}

// ══════════════════════════════════════════════════════════
//  lecture_due_soon
// ══════════════════════════════════════════════════════════

#[test]
fn due_soon_returns_lecture_inside_window() {
    let pool = init_test_db();
    let lec = seed(&pool, "Physics I", "2025-07-26", "09:10:00");
    let due = lecture_due_soon(&pool, at((2025, 7, 26), (9, 0, 0)), 15).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, lec.id);
}

#[test]
fn due_soon_window_bounds_are_inclusive() {
    let pool = init_test_db();
    seed(&pool, "At now", "2025-07-26", "09:00:00");
    seed(&pool, "At edge", "2025-07-26", "09:15:00");
    let due = lecture_due_soon(&pool, at((2025, 7, 26), (9, 0, 0)), 15).unwrap();
    assert_eq!(due.len(), 2);
}

#[test]
fn due_soon_excludes_lectures_outside_window() {
    let pool = init_test_db();
    seed(&pool, "Already started", "2025-07-26", "08:59:59");
    seed(&pool, "Too far out", "2025-07-26", "09:15:01");
    let due = lecture_due_soon(&pool, at((2025, 7, 26), (9, 0, 0)), 15).unwrap();
    assert!(due.is_empty());
}

#[test]
fn due_soon_excludes_other_dates() {
    let pool = init_test_db();
    seed(&pool, "Yesterday", "2025-07-25", "09:10:00");
    seed(&pool, "Tomorrow", "2025-07-27", "09:10:00");
    let due = lecture_due_soon(&pool, at((2025, 7, 26), (9, 0, 0)), 15).unwrap();
    assert!(due.is_empty());
}

#[test]
fn due_soon_never_returns_notified_lecture() {
    let pool = init_test_db();
    let lec = seed(&pool, "Physics I", "2025-07-26", "09:10:00");
    app_lib::app::lecture_mark_notified(&pool, &lec.id).unwrap();
    let due = lecture_due_soon(&pool, at((2025, 7, 26), (9, 0, 0)), 15).unwrap();
    assert!(due.is_empty());
}

#[test]
fn due_soon_orders_by_time_ascending() {
    let pool = init_test_db();
    seed(&pool, "Later", "2025-07-26", "09:12:00");
    seed(&pool, "Sooner", "2025-07-26", "09:03:00");
    let due = lecture_due_soon(&pool, at((2025, 7, 26), (9, 0, 0)), 15).unwrap();
    let names: Vec<&str> = due.iter().map(|l| l.course_name.as_str()).collect();
    assert_eq!(names, vec!["Sooner", "Later"]);
}

#[test]
fn due_soon_clamps_window_at_midnight() {
    let pool = init_test_db();
    seed(&pool, "Late show", "2025-07-26", "23:55:00");
    seed(&pool, "After midnight", "2025-07-27", "00:05:00");
    let due = lecture_due_soon(&pool, at((2025, 7, 26), (23, 50, 0)), 15).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].course_name, "Late show");
}

// ══════════════════════════════════════════════════════════
//  run_tick
// ══════════════════════════════════════════════════════════

#[test]
fn tick_delivers_due_lectures_and_consumes_them() {
    let pool = init_test_db();
    let due_a = seed(&pool, "Physics I", "2025-07-26", "09:05:00");
    let due_b = seed(&pool, "Calculus II", "2025-07-26", "09:10:00");
    seed(&pool, "Not yet", "2025-07-26", "11:00:00");

    let now = at((2025, 7, 26), (9, 0, 0));
    let mut delivered = Vec::new();
    let n = run_tick(&pool, now, 15, &mut |lec| delivered.push(lec.id.clone())).unwrap();

    assert_eq!(n, 2);
    assert_eq!(delivered, vec![due_a.id.clone(), due_b.id.clone()]);

    let flags: Vec<(String, bool)> = lecture_list(&pool)
        .unwrap()
        .into_iter()
        .map(|l| (l.id, l.notification_sent))
        .collect();
    for (id, sent) in flags {
        assert_eq!(sent, id == due_a.id || id == due_b.id);
    }
}

#[test]
fn second_tick_delivers_nothing() {
    let pool = init_test_db();
    seed(&pool, "Physics I", "2025-07-26", "09:05:00");

    let now = at((2025, 7, 26), (9, 0, 0));
    let mut count = 0;
    run_tick(&pool, now, 15, &mut |_| count += 1).unwrap();
    assert_eq!(count, 1);

    // Same clock again: the reminder was consumed by the first tick.
    let n = run_tick(&pool, now, 15, &mut |_| count += 1).unwrap();
    assert_eq!(n, 0);
    assert_eq!(count, 1);
}

#[test]
fn tick_on_empty_table_is_quiet() {
    let pool = init_test_db();
    let n = run_tick(&pool, at((2025, 7, 26), (9, 0, 0)), 15, &mut |_| {
        panic!("nothing to deliver")
    })
    .unwrap();
    assert_eq!(n, 0);
}
