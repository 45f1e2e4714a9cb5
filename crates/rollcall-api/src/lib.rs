//! JSON REST API for the rollcall roster service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rollcall_core::store::AttendanceStore`]. Transport concerns are the
//! caller's responsibility.

pub mod attendance;
pub mod error;
pub mod students;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use rollcall_core::store::AttendanceStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: AttendanceStore + 'static,
{
  Router::new()
    // Roster
    .route("/students/{id}", get(students::get_one::<S>).put(students::put_one::<S>))
    // Attendance
    .route("/attendance", get(attendance::list::<S>).post(attendance::append::<S>))
    .route("/attendance/delete/{section}", delete(attendance::delete_section::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
  };
  use chrono::{TimeZone, Utc};
  use rollcall_core::{entry::AttendanceEntry, student::Student};
  use rollcall_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  async fn app() -> (Arc<SqliteStore>, Router) {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    (Arc::clone(&store), api_router(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        req = req.header("content-type", "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    app.clone().oneshot(req.body(body).unwrap()).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn entry_json(id: &str, section: &str) -> Value {
    let entry = AttendanceEntry {
      student_id: id.into(),
      name:       format!("Student {id}"),
      course:     "BSIT".into(),
      section:    section.into(),
      time_in:    Utc.with_ymd_and_hms(2024, 9, 2, 8, 5, 9).unwrap(),
      subject:    "IPT 101".into(),
    };
    serde_json::to_value(entry).unwrap()
  }

  // ── Students ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_then_get_student() {
    let (_, app) = app().await;
    let body = json!({
      "studentId": "2021-0001", "name": "Ana Cruz", "course": "BSIT", "section": ["A", "B"]
    });

    let resp = send(&app, "PUT", "/students/2021-0001", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", "/students/2021-0001", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let student: Student = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(student.section, "A,B");
  }

  #[tokio::test]
  async fn missing_student_is_404_with_json_error() {
    let (_, app) = app().await;
    let resp = send(&app, "GET", "/students/nobody", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(json_body(resp).await["error"].as_str().unwrap().contains("nobody"));
  }

  #[tokio::test]
  async fn put_with_mismatched_id_is_rejected() {
    let (store, app) = app().await;
    let body = json!({ "studentId": "2", "name": "N", "course": "C", "section": "A" });

    let resp = send(&app, "PUT", "/students/1", Some(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.get_student("2").await.unwrap().is_none());
  }

  // ── Attendance ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn append_then_list_by_record_id() {
    let (_, app) = app().await;

    let resp = send(&app, "POST", "/attendance", Some(entry_json("1", "A"))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = json_body(resp).await["id"].as_str().unwrap().to_owned();

    let resp = send(&app, "GET", "/attendance", None).await;
    let all: BTreeMap<String, AttendanceEntry> =
      serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[&id].student_id, "1");
  }

  #[tokio::test]
  async fn append_without_section_is_rejected() {
    let (store, app) = app().await;
    let resp = send(&app, "POST", "/attendance", Some(entry_json("1", " "))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.list_attendance().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn delete_purges_one_encoded_section() {
    let (store, app) = app().await;
    send(&app, "POST", "/attendance", Some(entry_json("1", "3-A/B"))).await;
    send(&app, "POST", "/attendance", Some(entry_json("2", "C"))).await;

    let resp = send(&app, "DELETE", "/attendance/delete/3-A%2FB", None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["deleted"], 1);
    let left: Vec<_> = store.list_attendance().await.unwrap().into_values().collect();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].section, "C");
  }
}
