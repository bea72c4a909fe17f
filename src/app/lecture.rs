//! Lecture use cases.

use crate::domain::{due_window, parse_date, parse_time, DATE_FMT, TIME_FMT};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;
use chrono::{NaiveDateTime, Utc};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureCreateReq {
    pub course_name: String,
    pub topic: Option<String>,
    pub lecture_date: String,
    pub lecture_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LectureDto {
    pub id: String,
    pub course_name: String,
    pub topic: String,
    pub lecture_date: String,
    pub lecture_time: String,
    pub notification_sent: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureUpdateReq {
    pub id: String,
    pub course_name: String,
    pub topic: Option<String>,
    pub lecture_date: String,
    pub lecture_time: String,
}

/// Validate and normalize the form fields shared by create and update.
fn checked_fields(
    course_name: &str,
    lecture_date: &str,
    lecture_time: &str,
) -> Result<(String, String, String), AppError> {
    let course_name = course_name.trim();
    if course_name.is_empty() {
        return Err(AppError::Validation("course_name is required".into()));
    }
    let date = parse_date(lecture_date.trim())?;
    let time = parse_time(lecture_time.trim())?;
    Ok((
        course_name.to_string(),
        date.format(DATE_FMT).to_string(),
        time.format(TIME_FMT).to_string(),
    ))
}

pub fn lecture_create(pool: &DbPool, req: LectureCreateReq) -> Result<LectureDto, AppError> {
    let (course_name, lecture_date, lecture_time) =
        checked_fields(&req.course_name, &req.lecture_date, &req.lecture_time)?;
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    let topic = req.topic.unwrap_or_default();

    let conn = get_connection(pool);
    conn.execute(
        "INSERT INTO lectures (id, course_name, topic, lecture_date, lecture_time, notification_sent, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)",
        params![id, course_name, topic, lecture_date, lecture_time, &now],
    )
    .map_err(|e| AppError::Db(e.to_string()))?;

    log::info!("lecture {} added: {} on {} at {}", id, course_name, lecture_date, lecture_time);

    Ok(LectureDto {
        id,
        course_name,
        topic,
        lecture_date,
        lecture_time,
        notification_sent: false,
        created_at: now.clone(),
        updated_at: now,
    })
}

fn row_to_dto(row: &rusqlite::Row<'_>) -> rusqlite::Result<LectureDto> {
    Ok(LectureDto {
        id: row.get(0)?,
        course_name: row.get(1)?,
        topic: row.get(2)?,
        lecture_date: row.get(3)?,
        lecture_time: row.get(4)?,
        notification_sent: row.get::<_, i32>(5)? != 0,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

pub fn lecture_list(pool: &DbPool) -> Result<Vec<LectureDto>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn
        .prepare(
            "SELECT id, course_name, topic, lecture_date, lecture_time, notification_sent, created_at, updated_at
             FROM lectures ORDER BY lecture_date, lecture_time",
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
    let rows = stmt.query_map([], |row| row_to_dto(row))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| AppError::Db(e.to_string()))?);
    }
    Ok(out)
}

/// Replace all form fields of a lecture. `Ok(false)` when the id matches no
/// row; the table is left unchanged in that case.
pub fn lecture_update(pool: &DbPool, req: LectureUpdateReq) -> Result<bool, AppError> {
    let (course_name, lecture_date, lecture_time) =
        checked_fields(&req.course_name, &req.lecture_date, &req.lecture_time)?;
    let topic = req.topic.unwrap_or_default();
    let now = Utc::now().to_rfc3339();

    let conn = get_connection(pool);
    let n = conn
        .execute(
            "UPDATE lectures SET course_name = ?1, topic = ?2, lecture_date = ?3, lecture_time = ?4, updated_at = ?5 WHERE id = ?6",
            params![course_name, topic, lecture_date, lecture_time, &now, &req.id],
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
    if n == 0 {
        log::warn!("no lecture {} to update", req.id);
    }
    Ok(n > 0)
}

/// `Ok(false)` when the id matches no row.
pub fn lecture_delete(pool: &DbPool, id: &str) -> Result<bool, AppError> {
    let conn = get_connection(pool);
    let n = conn
        .execute("DELETE FROM lectures WHERE id = ?1", [id])
        .map_err(|e| AppError::Db(e.to_string()))?;
    if n == 0 {
        log::warn!("no lecture {} to delete", id);
    }
    Ok(n > 0)
}

/// Flip `notification_sent` where it is still unset. `Ok(false)` when the row
/// is absent or already notified, so a second call is a no-op.
pub fn lecture_mark_notified(pool: &DbPool, id: &str) -> Result<bool, AppError> {
    let now = Utc::now().to_rfc3339();
    let conn = get_connection(pool);
    let n = conn
        .execute(
            "UPDATE lectures SET notification_sent = 1, updated_at = ?1 WHERE id = ?2 AND notification_sent = 0",
            params![&now, id],
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
    Ok(n > 0)
}

/// Lectures on `now`'s date starting within the next `window_minutes`, not
/// yet notified, ordered by start time.
pub fn lecture_due_soon(
    pool: &DbPool,
    now: NaiveDateTime,
    window_minutes: i64,
) -> Result<Vec<LectureDto>, AppError> {
    let w = due_window(now, window_minutes);
    let conn = get_connection(pool);
    let mut stmt = conn
        .prepare(
            "SELECT id, course_name, topic, lecture_date, lecture_time, notification_sent, created_at, updated_at
             FROM lectures
             WHERE lecture_date = ?1
               AND lecture_time BETWEEN ?2 AND ?3
               AND notification_sent = 0
             ORDER BY lecture_time ASC",
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
    let rows = stmt.query_map(
        params![
            w.date.format(DATE_FMT).to_string(),
            w.start.format(TIME_FMT).to_string(),
            w.end.format(TIME_FMT).to_string(),
        ],
        |row| row_to_dto(row),
    )?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| AppError::Db(e.to_string()))?);
    }
    Ok(out)
}
