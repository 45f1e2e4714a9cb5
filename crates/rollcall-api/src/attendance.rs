//! Handlers for `/attendance` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/attendance` | Map of record id → entry |
//! | `POST`   | `/attendance` | Body: an entry; answers `201 {"id": …}` |
//! | `DELETE` | `/attendance/delete/{section}` | Answers `{"deleted": n}` |

use std::{collections::BTreeMap, sync::Arc};

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rollcall_core::{entry::AttendanceEntry, store::AttendanceStore};
use serde_json::json;
use tracing::info;

use crate::error::ApiError;

/// `GET /attendance`
pub async fn list<S: AttendanceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<BTreeMap<String, AttendanceEntry>>, ApiError> {
  let all = store.list_attendance().await.map_err(ApiError::store)?;
  Ok(Json(all))
}

/// `POST /attendance`
pub async fn append<S: AttendanceStore>(
  State(store): State<Arc<S>>,
  Json(entry): Json<AttendanceEntry>,
) -> Result<impl IntoResponse, ApiError> {
  if entry.student_id.trim().is_empty() || entry.section.trim().is_empty() {
    return Err(ApiError::BadRequest("studentId and section are required".into()));
  }
  let id = store.append_attendance(entry).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `DELETE /attendance/delete/{section}`
pub async fn delete_section<S: AttendanceStore>(
  State(store): State<Arc<S>>,
  Path(section): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  let deleted = store
    .delete_section_attendance(&section)
    .await
    .map_err(ApiError::store)?;
  info!(%section, deleted, "purged section attendance");
  Ok(Json(json!({ "deleted": deleted })))
}
