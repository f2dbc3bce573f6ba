//! End-to-end handler tests over mock providers.
//!
//! The full router runs against the in-memory mocks from `maitred-core`,
//! so every assertion exercises extraction, validation, the engine, and
//! the error mapping exactly as production traffic would.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::http::HeaderValue;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum_test::TestServer;
use chrono::NaiveDate;
use maitred_core::mocks::{MockIdentityProvider, MockSink, MockStore, SinkEvent};
use maitred_core::{LifecycleEvent, Reservation, ReservationEngine, Status};
use maitred_web::{AppState, router};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use uuid::Uuid;

const RECV_BUDGET: Duration = Duration::from_secs(1);
const SILENCE_BUDGET: Duration = Duration::from_millis(100);

fn server_over(store: MockStore, sink: MockSink) -> TestServer {
    let identity = MockIdentityProvider::default();
    let engine = ReservationEngine::new(store, sink);
    let state = AppState::new(engine, identity);
    TestServer::new(router(state, &[])).unwrap()
}

fn server() -> (TestServer, MockStore, UnboundedReceiver<SinkEvent>) {
    let store = MockStore::new();
    let (sink, rx) = MockSink::channel();
    (server_over(store.clone(), sink), store, rx)
}

fn stored(status: Status, date: &str, time: &str) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "0851234567".to_string(),
        guests: "4".to_string(),
        date: date.parse::<NaiveDate>().unwrap(),
        time: time.to_string(),
        occasion: None,
        special_requests: None,
        status,
    }
}

fn submission() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "0851234567",
        "guests": "4",
        "date": "2024-06-01",
        "time": "19:30"
    })
}

#[tokio::test]
async fn create_stores_pending_even_when_client_claims_confirmed() {
    let (server, _store, mut rx) = server();

    let mut body = submission();
    body["status"] = json!("confirmed");
    let response = server.post("/reservations").json(&body).await;

    assert_eq!(response.status_code(), 201);
    let created: Value = response.json();
    assert_eq!(created["status"], "pending");
    assert!(created["id"].as_str().is_some());

    let dispatched = timeout(RECV_BUDGET, rx.recv()).await.unwrap().unwrap();
    assert_eq!(dispatched.event, LifecycleEvent::Received);
}

#[tokio::test]
async fn create_rejects_invalid_guests_without_touching_the_store() {
    let store = MockStore::new();
    let (sink, _rx) = MockSink::channel();
    let server = server_over(store.clone(), sink);

    let mut body = submission();
    body["guests"] = json!("50");
    let response = server.post("/reservations").json(&body).await;

    assert_eq!(response.status_code(), 400);
    let error: Value = response.json();
    assert_eq!(error["message"], "Guests must be between 1 and 20");
    assert_eq!(store.create_calls(), 0);
}

#[tokio::test]
async fn create_quota_is_five_per_minute() {
    let (server, _store, _rx) = server();

    for _ in 0..5 {
        let response = server.post("/reservations").json(&submission()).await;
        assert_eq!(response.status_code(), 201);
    }
    let response = server.post("/reservations").json(&submission()).await;
    assert_eq!(response.status_code(), 429);
}

#[tokio::test]
async fn guest_list_is_public_and_ordered() {
    let store = MockStore::new().with_reservations(vec![
        stored(Status::Pending, "2024-06-02", "09:00"),
        stored(Status::Pending, "2024-06-01", "19:30"),
        stored(Status::Pending, "2024-06-01", "12:00"),
    ]);
    let (sink, _rx) = MockSink::channel();
    let server = server_over(store, sink);

    let response = server.get("/reservations/ada@example.com").await;
    assert_eq!(response.status_code(), 200);
    let listed: Vec<Value> = response.json();
    assert_eq!(listed.len(), 3);
    let times: Vec<&str> = listed.iter().map(|r| r["time"].as_str().unwrap()).collect();
    assert_eq!(times, vec!["12:00", "19:30", "09:00"]);
}

#[tokio::test]
async fn missing_and_invalid_credentials_are_indistinguishable() {
    let (server, _store, _rx) = server();

    let without = server.get("/reservations/status/pending").await;
    let with_bad = server
        .get("/reservations/status/pending")
        .authorization_bearer("forged-token")
        .await;

    assert_eq!(without.status_code(), 401);
    assert_eq!(with_bad.status_code(), 401);
    let a: Value = without.json();
    let b: Value = with_bad.json();
    assert_eq!(a, b);
}

#[tokio::test]
async fn staff_list_by_status_accepts_a_bearer_token() {
    let store = MockStore::new().with_reservations(vec![
        stored(Status::Confirmed, "2024-06-01", "19:30"),
        stored(Status::Pending, "2024-06-01", "12:00"),
    ]);
    let (sink, _rx) = MockSink::channel();
    let server = server_over(store, sink);

    let response = server
        .get("/reservations/status/confirmed")
        .authorization_bearer("test-token")
        .await;
    assert_eq!(response.status_code(), 200);
    let listed: Vec<Value> = response.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["status"], "confirmed");
}

#[tokio::test]
async fn unknown_status_segment_is_a_validation_error() {
    let (server, _store, _rx) = server();
    let response = server
        .get("/reservations/status/archived")
        .authorization_bearer("test-token")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn admin_list_optionally_filters_by_status() {
    let store = MockStore::new().with_reservations(vec![
        stored(Status::Confirmed, "2024-06-01", "19:30"),
        stored(Status::Cancelled, "2024-06-02", "12:00"),
    ]);
    let (sink, _rx) = MockSink::channel();
    let server = server_over(store, sink);

    let all = server
        .get("/admin/reservations")
        .authorization_bearer("test-token")
        .await;
    assert_eq!(all.status_code(), 200);
    assert_eq!(all.json::<Vec<Value>>().len(), 2);

    let cancelled = server
        .get("/admin/reservations")
        .add_query_param("status", "cancelled")
        .authorization_bearer("test-token")
        .await;
    assert_eq!(cancelled.status_code(), 200);
    let listed = cancelled.json::<Vec<Value>>();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["status"], "cancelled");
}

#[tokio::test]
async fn status_update_confirms_and_notifies() {
    let existing = stored(Status::Pending, "2024-06-01", "19:30");
    let store = MockStore::new().with_reservations(vec![existing.clone()]);
    let (sink, mut rx) = MockSink::channel();
    let server = server_over(store, sink);

    let response = server
        .patch(&format!("/reservations/{}/status", existing.id))
        .authorization_bearer("test-token")
        .json(&json!({ "status": "confirmed" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["status"], "confirmed");

    let dispatched = timeout(RECV_BUDGET, rx.recv()).await.unwrap().unwrap();
    assert_eq!(dispatched.event, LifecycleEvent::StatusChanged);
    assert_eq!(dispatched.reservation.id, existing.id);
}

#[tokio::test]
async fn status_update_requires_authentication() {
    let existing = stored(Status::Pending, "2024-06-01", "19:30");
    let store = MockStore::new().with_reservations(vec![existing.clone()]);
    let (sink, mut rx) = MockSink::channel();
    let server = server_over(store, sink);

    let response = server
        .patch(&format!("/reservations/{}/status", existing.id))
        .json(&json!({ "status": "confirmed" }))
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(timeout(SILENCE_BUDGET, rx.recv()).await.is_err());
}

#[tokio::test]
async fn status_update_of_missing_reservation_is_404_and_silent() {
    let (server, _store, mut rx) = server();

    let response = server
        .patch(&format!("/reservations/{}/status", Uuid::new_v4()))
        .authorization_bearer("test-token")
        .json(&json!({ "status": "cancelled" }))
        .await;

    assert_eq!(response.status_code(), 404);
    assert!(timeout(SILENCE_BUDGET, rx.recv()).await.is_err());
}

#[tokio::test]
async fn malformed_reservation_id_is_rejected() {
    let (server, _store, _rx) = server();

    let response = server
        .patch("/reservations/not-a-uuid/status")
        .authorization_bearer("test-token")
        .json(&json!({ "status": "confirmed" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let error: Value = response.json();
    assert_eq!(error["message"], "Invalid reservation id");
}

#[tokio::test]
async fn duplicate_subscription_is_a_conflict() {
    let (server, _store, _rx) = server();

    let first = server
        .post("/subscribe")
        .json(&json!({ "email": "guest@example.com" }))
        .await;
    assert_eq!(first.status_code(), 201);
    let body: Value = first.json();
    assert_eq!(body["subscriber"]["email"], "guest@example.com");

    let second = server
        .post("/subscribe")
        .json(&json!({ "email": "guest@example.com" }))
        .await;
    assert_eq!(second.status_code(), 409);
    let error: Value = second.json();
    assert_eq!(error["message"], "Already subscribed");
}

#[tokio::test]
async fn login_sets_an_http_only_session_cookie() {
    let (server, _store, _rx) = server();

    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": "staff@example.com",
            "password": "correct horse battery staple"
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["access_token"], "test-token");
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"]["email"], "staff@example.com");

    let cookie = response
        .maybe_header(SET_COOKIE)
        .expect("login must set the session cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.contains("auth_token=test-token"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn failed_login_is_uniform_regardless_of_cause() {
    let (server, _store, _rx) = server();

    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": "staff@example.com",
            "password": "wrong"
        }))
        .await;

    assert_eq!(response.status_code(), 401);
    let error: Value = response.json();
    assert_eq!(error["message"], "Invalid email or password");
}

#[tokio::test]
async fn login_quota_is_ten_per_minute() {
    let (server, _store, _rx) = server();
    let bad = json!({ "email": "staff@example.com", "password": "wrong" });

    for _ in 0..10 {
        let response = server.post("/auth/login").json(&bad).await;
        assert_eq!(response.status_code(), 401);
    }
    let response = server.post("/auth/login").json(&bad).await;
    assert_eq!(response.status_code(), 429);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (server, _store, _rx) = server();

    let response = server.post("/auth/logout").await;
    assert_eq!(response.status_code(), 200);
    let cookie = response
        .maybe_header(SET_COOKIE)
        .expect("logout must clear the session cookie");
    assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn auth_check_reports_cookie_state() {
    let (server, _store, _rx) = server();

    let anonymous = server.get("/auth/check").await;
    assert_eq!(anonymous.status_code(), 200);
    assert_eq!(anonymous.json::<Value>()["authenticated"], false);

    let authed = server
        .get("/auth/check")
        .add_header(COOKIE, HeaderValue::from_static("auth_token=test-token"))
        .await;
    assert_eq!(authed.status_code(), 200);
    let body: Value = authed.json();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], "staff@example.com");
}
