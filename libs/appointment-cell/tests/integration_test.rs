use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::booking_routes;
use appointment_cell::handlers::BookingState;
use doctor_cell::DoctorDirectory;
use notification_cell::NotificationDispatcher;
use shared_config::AppConfig;
use shared_utils::test_utils::{MockEmailJsResponses, TestConfig, TestPatient};

fn create_test_state(config: &AppConfig) -> BookingState {
    BookingState::new(
        config,
        Arc::new(DoctorDirectory::with_default_catalog()),
        Arc::new(NotificationDispatcher::from_config(config)),
    )
}

fn create_test_app(config: &AppConfig) -> Router {
    booking_routes(create_test_state(config))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn start_session(app: &Router) -> String {
    let (status, json) = send(app, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_session_returns_initial_render() {
    let app = create_test_app(&TestConfig::unconfigured().to_app_config());

    let (status, json) = send(&app, "POST", "/sessions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["updates"][0]["type"], "render_directory");
    assert_eq!(json["snapshot"]["directory"]["doctors"].as_array().unwrap().len(), 8);
    assert_eq!(json["snapshot"]["contact_method"], "email");
}

#[tokio::test]
async fn test_min_date_is_todays_utc_date() {
    let app = create_test_app(&TestConfig::unconfigured().to_app_config());

    let (_, json) = send(&app, "POST", "/sessions", None).await;

    let min_date = json["updates"]
        .as_array()
        .unwrap()
        .iter()
        .find(|update| update["type"] == "set_min_date")
        .unwrap()["date"]
        .clone();
    assert_eq!(min_date, Utc::now().date_naive().format("%Y-%m-%d").to_string());
}

#[tokio::test]
async fn test_delete_session_releases_it() {
    let state = create_test_state(&TestConfig::unconfigured().to_app_config());
    let app = booking_routes(state.clone());

    let first = start_session(&app).await;
    let _second = start_session(&app).await;
    assert_eq!(state.sessions.len().await, 2);

    let (status, json) = send(&app, "DELETE", &format!("/sessions/{}", first), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deleted"], true);
    assert_eq!(state.sessions.len().await, 1);

    let (status, _) = send(&app, "DELETE", &format!("/sessions/{}", first), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booked_session_is_discarded() {
    let state = create_test_state(&TestConfig::unconfigured().to_app_config());
    let app = booking_routes(state.clone());
    let session_id = start_session(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/sessions/{}/submit", session_id),
        Some(TestPatient::default().form_json("email", None)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "booked");
    assert!(state.sessions.is_empty().await);

    let (status, _) = send(&app, "GET", &format!("/sessions/{}", session_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rejected_submission_keeps_session() {
    let state = create_test_state(&TestConfig::unconfigured().to_app_config());
    let app = booking_routes(state.clone());
    let session_id = start_session(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/sessions/{}/submit", session_id),
        Some(json!({ "patient_name": "Ann" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = create_test_app(&TestConfig::unconfigured().to_app_config());

    let (status, _) = send(
        &app,
        "GET",
        "/sessions/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_then_select() {
    let app = create_test_app(&TestConfig::unconfigured().to_app_config());
    let session_id = start_session(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/sessions/{}/filter", session_id),
        Some(json!({ "specialty": "Orthopedics" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["snapshot"]["directory"]["doctors"].as_array().unwrap().len(), 2);

    let (status, json) = send(
        &app,
        "POST",
        &format!("/sessions/{}/select", session_id),
        Some(json!({ "doctor_id": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["snapshot"]["directory"]["selected_doctor"]["name"], "Dr. William Lee");
    assert_eq!(json["updates"][1]["type"], "show_preview");
}

#[tokio::test]
async fn test_select_unavailable_doctor_is_rejected() {
    let app = create_test_app(&TestConfig::unconfigured().to_app_config());
    let session_id = start_session(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/sessions/{}/select", session_id),
        Some(json!({ "doctor_id": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("currently unavailable"));

    let (_, json) = send(&app, "GET", &format!("/sessions/{}", session_id), None).await;
    assert!(json["snapshot"]["directory"]["selected_doctor"].is_null());
}

#[tokio::test]
async fn test_contact_method_change() {
    let app = create_test_app(&TestConfig::unconfigured().to_app_config());
    let session_id = start_session(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/sessions/{}/contact-method", session_id),
        Some(json!({ "contact_method": "sms" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["snapshot"]["carrier_selector_visible"], true);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/sessions/{}/contact-method", session_id),
        Some(json!({ "contact_method": "carrier-pigeon" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_submission_returns_field_errors() {
    let app = create_test_app(&TestConfig::unconfigured().to_app_config());
    let session_id = start_session(&app).await;
    let mut form = TestPatient::default().form_json("email", None);
    form["patient_email"] = json!("bad-email");
    form["patient_name"] = json!("");

    let (status, json) = send(
        &app,
        "POST",
        &format!("/sessions/{}/submit", session_id),
        Some(form),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"]["errors"]["email"], "Please enter a valid email");
    assert_eq!(json["details"]["errors"]["name"], "Please enter your full name");
    assert!(json["details"]["errors"].get("phone").is_none());
    assert_eq!(json["details"]["updates"][0]["type"], "clear_field_errors");
}

#[tokio::test]
async fn test_valid_submission_sends_notifications_and_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MockEmailJsResponses::SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(MockEmailJsResponses::ok_body()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&TestConfig::with_emailjs_base_url(&mock_server.uri()).to_app_config());
    let session_id = start_session(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/sessions/{}/submit", session_id),
        Some(TestPatient::default().form_json("both", Some("sprint"))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "booked");
    assert_eq!(json["submission"]["patient_email"], "ann@example.com");
    assert_eq!(json["notifications"]["enabled"], true);
    assert_eq!(json["notifications"]["outcomes"].as_array().unwrap().len(), 2);

    let updates = json["updates"].as_array().unwrap();
    let navigate = updates.last().unwrap();
    assert_eq!(navigate["type"], "navigate");
    assert_eq!(navigate["url"], "payout.html");
    assert_eq!(navigate["delay_ms"], 1500);

    assert_eq!(json["submission"]["reason"], "Annual check-up");
}

#[tokio::test]
async fn test_submission_succeeds_when_emailjs_is_down() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MockEmailJsResponses::SEND_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(MockEmailJsResponses::error_body("down")))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&TestConfig::with_emailjs_base_url(&mock_server.uri()).to_app_config());
    let session_id = start_session(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/sessions/{}/submit", session_id),
        Some(TestPatient::default().form_json("email", None)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["notifications"]["outcomes"][0]["status"], "failed");
}
