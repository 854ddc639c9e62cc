//! JSON REST server for the BandTrack roster and material ledger.
//!
//! Exposes an axum [`Router`] over the in-memory [`Roster`] and [`Ledger`].
//! Requests authenticate with HTTP Basic against the configured users; each
//! mutating endpoint is gated on the permission the account resolves to.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod seed;

pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, put},
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use bandtrack_core::{ledger::Ledger, roster::Roster};

use auth::{AuthConfig, UserEntry};
use handlers::{dashboard, dispatch, personnel, profile, returns};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:  String,
  pub port:  u16,
  /// Load the historical sample data set on startup.
  #[serde(default)]
  pub seed:  bool,
  pub users: Vec<UserEntry>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers. The core store is
/// synchronous; handlers hold the lock for the single call only.
#[derive(Clone)]
pub struct AppState {
  pub roster: Arc<RwLock<Roster>>,
  pub ledger: Arc<RwLock<Ledger>>,
  pub auth:   Arc<AuthConfig>,
}

impl AppState {
  pub fn new(roster: Roster, ledger: Ledger, auth: AuthConfig) -> Self {
    Self {
      roster: Arc::new(RwLock::new(roster)),
      ledger: Arc::new(RwLock::new(ledger)),
      auth:   Arc::new(auth),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route(
      "/api/roster/employees",
      get(personnel::list_employees).post(personnel::create_employee),
    )
    .route("/api/roster/employees/{id}", put(personnel::update_employee))
    .route(
      "/api/roster/subcontractors",
      get(personnel::list_subcontractors).post(personnel::create_subcontractor),
    )
    .route(
      "/api/roster/subcontractors/{id}",
      put(personnel::update_subcontractor),
    )
    .route("/api/roster/personnel/{id}", delete(personnel::delete_person))
    .route("/api/dispatches", get(dispatch::list).post(dispatch::create))
    .route("/api/returns", get(returns::list).post(returns::create))
    .route("/api/metrics", get(dashboard::metrics))
    .route("/api/profile", get(profile::profile))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use bandtrack_core::access::Permission;

  const PASSWORD: &str = "secret";

  fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  fn make_state(roster: Roster, ledger: Ledger) -> AppState {
    let hashed = hash(PASSWORD);
    let auth = AuthConfig {
      users: vec![
        UserEntry {
          username:      "admin".to_string(),
          password_hash: hashed.clone(),
          permissions:   vec![Permission::FullAccess],
        },
        UserEntry {
          username:      "clerk".to_string(),
          password_hash: hashed,
          permissions:   vec![Permission::ManageDispatch],
        },
      ],
    };
    AppState::new(roster, ledger, auth)
  }

  fn empty_state() -> AppState {
    make_state(Roster::new(), Ledger::new())
  }

  fn auth_header(user: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{PASSWORD}")))
  }

  async fn send(
    state: AppState,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
      builder = builder.header(header::AUTHORIZATION, auth_header(user));
    }
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes =
      axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn grace() -> Value {
    json!({ "name": "Grace Hopper", "workType": "QA", "contact": "555-9999" })
  }

  // ── Auth ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_request_returns_401() {
    let resp =
      send(empty_state(), "GET", "/api/roster/employees", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn wrong_password_returns_401() {
    let state = empty_state();
    let req = Request::builder()
      .method("GET")
      .uri("/api/roster/employees")
      .header(
        header::AUTHORIZATION,
        format!("Basic {}", B64.encode("admin:wrong")),
      )
      .body(Body::empty())
      .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn missing_permission_returns_403() {
    let resp = send(
      empty_state(),
      "POST",
      "/api/roster/employees",
      Some("clerk"),
      Some(grace()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("managePersonnel"));
  }

  // ── Employees ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_employee_and_list() {
    let state = empty_state();

    let resp = send(
      state.clone(),
      "POST",
      "/api/roster/employees",
      Some("admin"),
      Some(grace()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["id"], "emp101");

    let resp =
      send(state, "GET", "/api/roster/employees", Some("admin"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Grace Hopper");
  }

  #[tokio::test]
  async fn update_missing_employee_returns_404() {
    let resp = send(
      empty_state(),
      "PUT",
      "/api/roster/employees/emp999",
      Some("admin"),
      Some(grace()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Subcontractors ──────────────────────────────────────────────────────────

  fn sub_body(capacity: &str) -> Value {
    let mut v = grace();
    v["dnrCapacity"] = json!(capacity);
    v
  }

  #[tokio::test]
  async fn both_selection_creates_two_records() {
    let state = empty_state();
    let resp = send(
      state.clone(),
      "POST",
      "/api/roster/subcontractors",
      Some("admin"),
      Some(sub_body("both")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let created = created.as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["id"], "301");
    assert_eq!(created[0]["dnrCapacity"], "300dnr");
    assert_eq!(created[1]["id"], "601");
    assert_eq!(created[1]["dnrCapacity"], "600dnr");
  }

  #[tokio::test]
  async fn capacity_change_rekeys_over_http() {
    let state = empty_state();
    send(
      state.clone(),
      "POST",
      "/api/roster/subcontractors",
      Some("admin"),
      Some(sub_body("300dnr")),
    )
    .await;

    let resp = send(
      state.clone(),
      "PUT",
      "/api/roster/subcontractors/301",
      Some("admin"),
      Some(sub_body("600dnr")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let finals = body_json(resp).await;
    assert_eq!(finals[0]["id"], "601");

    let resp = send(
      state,
      "GET",
      "/api/roster/subcontractors",
      Some("admin"),
      None,
    )
    .await;
    let list = body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], "601");
  }

  #[tokio::test]
  async fn delete_person_then_vanishes() {
    let state = empty_state();
    send(
      state.clone(),
      "POST",
      "/api/roster/subcontractors",
      Some("admin"),
      Some(sub_body("300dnr")),
    )
    .await;

    let resp = send(
      state.clone(),
      "DELETE",
      "/api/roster/personnel/301",
      Some("admin"),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(
      state,
      "DELETE",
      "/api/roster/personnel/301",
      Some("admin"),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn exhausted_band_returns_409_and_creates_nothing() {
    use bandtrack_core::{
      capacity::DnrCapacity, id::SubcontractorId, person::Subcontractor,
    };

    let last = Subcontractor {
      id:           SubcontractorId::parse("399").unwrap(),
      name:         "Last Slot".to_string(),
      work_type:    "Sewing".to_string(),
      contact:      "555-0000".to_string(),
      dnr_capacity: DnrCapacity::Dnr300,
    };
    let roster = Roster::from_records(vec![], vec![last]).unwrap();
    let state = make_state(roster, Ledger::new());

    let resp = send(
      state.clone(),
      "POST",
      "/api/roster/subcontractors",
      Some("admin"),
      Some(sub_body("300dnr")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = send(
      state,
      "GET",
      "/api/roster/subcontractors",
      Some("admin"),
      None,
    )
    .await;
    let list = body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], "399");
  }

  #[tokio::test]
  async fn capacity_filter_on_seeded_roster() {
    let roster = seed::sample_roster().unwrap();
    let ledger = seed::sample_ledger(&roster).unwrap();
    let state = make_state(roster, ledger);

    let resp = send(
      state.clone(),
      "GET",
      "/api/roster/subcontractors?capacity=600dnr",
      Some("admin"),
      None,
    )
    .await;
    let list = body_json(resp).await;
    let ids: Vec<&str> = list
      .as_array()
      .unwrap()
      .iter()
      .map(|s| s["id"].as_str().unwrap())
      .collect();
    assert_eq!(ids, ["6-1", "6-4"]);
  }

  // ── Ledger ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn dispatch_to_unknown_subcontractor_returns_404() {
    let resp = send(
      empty_state(),
      "POST",
      "/api/dispatches",
      Some("clerk"),
      Some(json!({
        "subcontractorId": "301",
        "materialType": "Fabric A",
        "quantity": 100
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn dispatch_resolves_name_and_feeds_metrics() {
    let state = empty_state();
    send(
      state.clone(),
      "POST",
      "/api/roster/subcontractors",
      Some("admin"),
      Some(sub_body("300dnr")),
    )
    .await;

    let resp = send(
      state.clone(),
      "POST",
      "/api/dispatches",
      Some("clerk"),
      Some(json!({
        "subcontractorId": "301",
        "materialType": "Fabric A",
        "quantity": 100
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let dispatch = body_json(resp).await;
    assert_eq!(dispatch["subcontractorName"], "Grace Hopper");

    let resp = send(state, "GET", "/api/metrics", Some("admin"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let metrics = body_json(resp).await;
    assert_eq!(metrics["subcontractors"], 1);
    assert_eq!(metrics["dispatchedUnits"], 100);
    assert_eq!(metrics["returnedUnits"], 0);
  }

  #[tokio::test]
  async fn return_with_rework_status_logs() {
    let state = empty_state();
    send(
      state.clone(),
      "POST",
      "/api/roster/subcontractors",
      Some("admin"),
      Some(sub_body("600dnr")),
    )
    .await;

    let resp = send(
      state,
      "POST",
      "/api/returns",
      Some("admin"),
      Some(json!({
        "subcontractorId": "601",
        "quantity": 5,
        "qualityStatus": "Needs Rework"
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let ret = body_json(resp).await;
    assert_eq!(ret["qualityStatus"], "Needs Rework");
  }

  // ── Profile ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn profile_requires_view_profile() {
    let resp =
      send(empty_state(), "GET", "/api/profile", Some("clerk"), None).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp =
      send(empty_state(), "GET", "/api/profile", Some("admin"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["username"], "admin");
  }
}
