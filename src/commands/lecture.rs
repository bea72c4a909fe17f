use crate::app::{
    lecture_create, lecture_delete, lecture_list, lecture_update, LectureCreateReq, LectureDto,
    LectureUpdateReq,
};
use crate::error::AppError;
use crate::infra::DbPool;
use serde::Deserialize;
use tauri::State;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureDeleteReq {
    pub id: String,
}

#[tauri::command]
pub fn cmd_lecture_create(
    pool: State<DbPool>,
    req: LectureCreateReq,
) -> Result<LectureDto, AppError> {
    lecture_create(&pool, req)
}

#[tauri::command]
pub fn cmd_lecture_list(pool: State<DbPool>) -> Result<Vec<LectureDto>, AppError> {
    lecture_list(&pool)
}

#[tauri::command]
pub fn cmd_lecture_update(pool: State<DbPool>, req: LectureUpdateReq) -> Result<bool, AppError> {
    lecture_update(&pool, req)
}

#[tauri::command]
pub fn cmd_lecture_delete(pool: State<DbPool>, req: LectureDeleteReq) -> Result<bool, AppError> {
    lecture_delete(&pool, &req.id)
}
