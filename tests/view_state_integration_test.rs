//! Screen state holders wired through a full [`rollcall::Client`].

mod common;

use common::{dashboard_body, TestEnv};
use rollcall::auth::Role;
use rollcall::view_state::NOT_LOGGED_IN;
use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_dashboard_refresh_publishes_classes() {
    let env = TestEnv::logged_in(Role::Student).await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .and(header("authorization", "Bearer tok-live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dashboard_body()))
        .mount(&env.server)
        .await;

    let dashboard = env.client.dashboard_state();
    let mut rx = dashboard.classes().subscribe();
    assert!(rx.borrow().is_idle());

    let state = dashboard.refresh().await;
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.data.as_ref().map(Vec::len), Some(1));

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), state);
}

#[tokio::test]
async fn test_unauthorized_logs_out_locally() {
    let env = TestEnv::logged_in(Role::Student).await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&env.server)
        .await;

    let state = env.client.dashboard_state().refresh().await;
    assert_eq!(state.error.as_deref(), Some("Token expired"));
    assert!(state.data.is_none());
    assert!(!env.client.session().is_authenticated());
    assert!(!env.session_file().exists());
}

#[tokio::test]
async fn test_failed_login_keeps_existing_session() {
    let env = TestEnv::logged_in(Role::Teacher).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad credentials"})))
        .mount(&env.server)
        .await;

    let state = env.client.auth_state().login("Ann", "S1", "wrong").await;
    assert_eq!(state.error.as_deref(), Some("bad credentials"));
    assert_eq!(env.client.session().token(), "tok-live");
    assert!(env.session_file().exists());
}

#[tokio::test]
async fn test_teacher_flow_through_state_holders() {
    let env = TestEnv::logged_in(Role::Teacher).await;

    Mock::given(method("POST"))
        .and(path("/class/create"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"_id": "c1", "className": "Math", "section": "A", "schedule": {"days": ["Mon"]}}
        })))
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/attendance/generate-qr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "qrCode": "iVBORw0KGgo=",
            "sessionId": "a1",
            "expiresAt": "2030-01-01T00:00:00Z"
        })))
        .mount(&env.server)
        .await;

    let teacher = env.client.teacher_state();
    let class = teacher
        .create_class("Math", "A", &["Mon".to_string()])
        .await
        .data
        .unwrap();
    assert_eq!(class.id, "c1");
    assert_eq!(teacher.class().snapshot().data, Some(class.clone()));

    let qr = teacher.generate_qr(&class.id).await.data.unwrap();
    assert_eq!(qr.attendance_session_id, "a1");
    assert!(!qr.is_expired_at(chrono::Utc::now()));
}

#[tokio::test]
async fn test_scan_failure_is_published_not_raised() {
    let env = TestEnv::logged_in(Role::Student).await;

    Mock::given(method("POST"))
        .and(path("/attendance/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Already marked"
        })))
        .mount(&env.server)
        .await;

    let attendance = env.client.attendance_state();
    let state = attendance.submit_scan("qr", "c1").await;
    assert_eq!(state.error.as_deref(), Some("Already marked"));
    assert!(state.data.is_none());
    assert_eq!(attendance.scan().snapshot(), state);
    // success:false is not an auth failure
    assert!(env.client.session().is_authenticated());
}

#[tokio::test]
async fn test_logout_through_state_clears_session() {
    let env = TestEnv::logged_in(Role::Student).await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&env.server)
        .await;

    let state = env.client.auth_state().logout("Ann", "S1", "pw").await;
    assert!(state.error.is_some());
    assert!(!env.client.session().is_authenticated());
    assert!(env.reconnect().await.session().read().is_none());
}

#[tokio::test]
async fn test_logged_out_holders_send_nothing() {
    let env = TestEnv::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&env.server)
        .await;

    let dashboard = env.client.dashboard_state().refresh().await;
    assert_eq!(dashboard.error.as_deref(), Some(NOT_LOGGED_IN));

    let attendance = env.client.attendance_state();
    let history = attendance.load_class_history("c1").await;
    assert_eq!(history.error.as_deref(), Some(NOT_LOGGED_IN));
    let scan = attendance.submit_scan("qr", "c1").await;
    assert!(scan.data.is_none());

    let teacher = env.client.teacher_state();
    let qr = teacher.generate_qr("c1").await;
    assert_eq!(qr.error.as_deref(), Some(NOT_LOGGED_IN));
    assert_eq!(teacher.qr().snapshot(), qr);
}
