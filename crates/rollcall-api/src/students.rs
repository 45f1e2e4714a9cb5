//! Handlers for `/students` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/students/{id}` | 404 if not found |
//! | `PUT`  | `/students/{id}` | Body: a student; its `studentId` must match the path |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use rollcall_core::{store::AttendanceStore, student::Student};

use crate::error::ApiError;

/// `GET /students/{id}`
pub async fn get_one<S: AttendanceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
  let student = store
    .get_student(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(student))
}

/// `PUT /students/{id}`
pub async fn put_one<S: AttendanceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(student): Json<Student>,
) -> Result<Json<Student>, ApiError> {
  if student.student_id != id {
    return Err(ApiError::BadRequest(format!(
      "body studentId {:?} does not match path {id:?}",
      student.student_id
    )));
  }
  store.put_student(student.clone()).await.map_err(ApiError::store)?;
  Ok(Json(student))
}
