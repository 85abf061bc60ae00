//! Repositories over reqwest against a wiremock backend.

mod common;

use chrono::{TimeZone, Utc};
use common::{dashboard_body, TestEnv};
use rollcall::auth::Role;
use rollcall::ApiError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_sends_bearer_and_maps_classes() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .and(header("authorization", "Bearer abc"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dashboard_body()))
        .expect(1)
        .mount(&env.server)
        .await;

    let classes = env.client.dashboard().get_dashboard_classes("abc").await.unwrap();
    assert_eq!(classes.len(), 1);
    let class = &classes[0];
    assert_eq!(class.id, "1");
    assert_eq!(class.class_name, "Math");
    assert_eq!(class.section, "A");
    assert_eq!(class.schedule_days, vec!["Mon", "Wed"]);
    assert_eq!(class.student_ids, vec!["s1", "s2"]);
    assert_eq!(class.teacher_id, "t1");
}

#[tokio::test]
async fn test_dashboard_with_id_virtuals() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "_id": "1",
                "id": "1",
                "className": "Math",
                "teacher": {"_id": "t1", "id": "t1", "name": "Grace"},
                "students": ["s1"]
            }]
        })))
        .mount(&env.server)
        .await;

    let classes = env.client.dashboard().get_dashboard_classes("abc").await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].id, "1");
    assert_eq!(classes[0].teacher_id, "t1");
    assert_eq!(classes[0].student_ids, vec!["s1"]);
}

#[tokio::test]
async fn test_prefixed_token_is_not_doubled() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .expect(1)
        .mount(&env.server)
        .await;

    let classes = env
        .client
        .dashboard()
        .get_dashboard_classes("Bearer abc")
        .await
        .unwrap();
    assert!(classes.is_empty());
}

#[tokio::test]
async fn test_non_2xx_is_client_rejected() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&env.server)
        .await;

    let err = env.client.dashboard().get_dashboard_classes("abc").await.unwrap_err();
    assert_eq!(err, ApiError::client_rejected(403, "Forbidden", "forbidden"));
}

#[tokio::test]
async fn test_empty_body_is_empty_response() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&env.server)
        .await;

    let err = env.client.dashboard().get_dashboard_classes("abc").await.unwrap_err();
    assert_eq!(err, ApiError::EmptyResponse);
}

#[tokio::test]
async fn test_success_false_is_application_failure() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Account suspended"})),
        )
        .mount(&env.server)
        .await;

    let err = env.client.dashboard().get_dashboard_classes("abc").await.unwrap_err();
    assert_eq!(err, ApiError::application(Some("Account suspended")));
}

#[tokio::test]
async fn test_malformed_body_is_unknown() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/class/Dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&env.server)
        .await;

    let err = env.client.dashboard().get_dashboard_classes("abc").await.unwrap_err();
    assert!(matches!(err, ApiError::Unknown { .. }), "got {:?}", err);
}

// ============================================================================
// Attendance
// ============================================================================

#[tokio::test]
async fn test_class_history() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/attendance/history/c1"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "class": {"name": "Math", "section": "A", "totalStudents": 2},
            "overallStats": {
                "averageAttendance": 75,
                "totalClasses": 2,
                "students": [
                    {"_id": "u1", "name": "Ann", "email": "ann@x.io", "ID": "S1", "attendancePercentage": 100},
                    {"_id": "u2", "name": "Bo", "ID": "S2", "attendancePercentage": 50}
                ]
            },
            "history": [
                {"date": "2024-03-01", "presentStudents": ["u1", "u2"]},
                {"date": "2024-03-04", "presentStudents": ["u1"]}
            ]
        })))
        .mount(&env.server)
        .await;

    let history = env
        .client
        .attendance()
        .get_class_attendance_history("c1", "tok")
        .await
        .unwrap();
    assert_eq!(history.class_info.name, "Math");
    assert_eq!(history.class_info.total_students, 2);
    assert_eq!(history.overall_stats.average_attendance_percent, 75.0);
    assert_eq!(history.history_entries.len(), 2);

    let roll = history.roll_call("2024-03-04").unwrap();
    let present: Vec<_> = roll
        .iter()
        .filter(|r| r.present)
        .map(|r| r.student.name.as_str())
        .collect();
    assert_eq!(present, vec!["Ann"]);
    assert!(history.roll_call("2024-01-01").is_none());
}

#[tokio::test]
async fn test_student_history_computes_missing_totals() {
    let env = TestEnv::start().await;

    Mock::given(method("GET"))
        .and(path("/attendance/student/history/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "class": {"name": "Math", "section": "A"},
            "history": [
                {"date": "2024-03-01", "status": "Present"},
                {"date": "2024-03-04", "status": "absent"},
                {"date": "2024-03-06", "present": true},
                {"date": "2024-03-08", "present": false}
            ]
        })))
        .mount(&env.server)
        .await;

    let history = env
        .client
        .attendance()
        .get_student_attendance_history("c1", "tok")
        .await
        .unwrap();
    assert_eq!(history.total_classes, 4);
    assert_eq!(history.attended_classes, 2);
    assert_eq!(history.attendance_percentage, 50.0);
    assert_eq!(history.present_dates(), vec!["2024-03-01", "2024-03-06"]);
}

#[tokio::test]
async fn test_scan_attendance() {
    let env = TestEnv::start().await;

    Mock::given(method("POST"))
        .and(path("/attendance/scan"))
        .and(header("authorization", "Bearer tok"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"token": "qr-xyz", "classId": "c1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Attendance marked successfully",
            "attendanceId": "r9"
        })))
        .mount(&env.server)
        .await;

    let result = env
        .client
        .attendance()
        .scan_attendance("qr-xyz", "c1", "tok")
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.message, "Attendance marked successfully");
    assert_eq!(result.attendance_record_id.as_deref(), Some("r9"));
}

#[tokio::test]
async fn test_scan_with_expired_code() {
    let env = TestEnv::start().await;

    Mock::given(method("POST"))
        .and(path("/attendance/scan"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "QR code expired"})),
        )
        .mount(&env.server)
        .await;

    let err = env
        .client
        .attendance()
        .scan_attendance("old", "c1", "tok")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "QR code expired");
}

// ============================================================================
// Teacher
// ============================================================================

#[tokio::test]
async fn test_create_class() {
    let env = TestEnv::logged_in(Role::Teacher).await;

    Mock::given(method("POST"))
        .and(path("/class/create"))
        .and(header("authorization", "Bearer tok-live"))
        .and(body_json(json!({
            "className": "Physics",
            "section": "B",
            "schedule": {"days": ["Tue", "Thu"]}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Class created",
            "data": {
                "_id": "c7",
                "className": "Physics",
                "section": "B",
                "schedule": {"days": ["Tue", "Thu"]},
                "students": [],
                "teacher": {"_id": "t1", "name": "Ada"}
            }
        })))
        .mount(&env.server)
        .await;

    let days = vec![" Tue ".to_string(), "".to_string(), "Thu".to_string()];
    let class = env
        .client
        .teacher()
        .create_class("tok-live", " Physics ", "B", &days)
        .await
        .unwrap();
    assert_eq!(class.id, "c7");
    assert_eq!(class.teacher_id, "t1");
    assert_eq!(class.student_count(), 0);
}

#[tokio::test]
async fn test_add_student_encodes_class_id() {
    let env = TestEnv::start().await;

    Mock::given(method("POST"))
        .and(path("/class/a%2Fb/students"))
        .and(body_json(json!({"ID": "S3", "name": "Cy"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "student": {"id": "u3", "name": "Cy"},
                "class": {"_id": "a/b", "className": "Math", "students": ["u1", "u3", "u3"]}
            }
        })))
        .mount(&env.server)
        .await;

    let class = env
        .client
        .teacher()
        .add_student_to_class("a/b", "Cy", "S3", "tok")
        .await
        .unwrap();
    assert_eq!(class.student_ids, vec!["u1", "u3"]);
    assert!(class.has_student("u3"));
}

#[tokio::test]
async fn test_add_student_without_class_is_empty_response() {
    let env = TestEnv::start().await;

    Mock::given(method("POST"))
        .and(path("/class/c1/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&env.server)
        .await;

    let err = env
        .client
        .teacher()
        .add_student_to_class("c1", "Cy", "S3", "tok")
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::EmptyResponse);
}

#[tokio::test]
async fn test_generate_qr_code() {
    let env = TestEnv::start().await;

    Mock::given(method("POST"))
        .and(path("/attendance/generate-qr"))
        .and(body_json(json!({"classId": "c1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "qrCodeImage": "data:image/png;base64,iVBORw0KGgo=",
            "attendanceId": "a1",
            "expiresAt": "2024-03-01T10:05:00Z"
        })))
        .mount(&env.server)
        .await;

    let qr = env.client.teacher().generate_qr_code("c1", "tok").await.unwrap();
    assert_eq!(qr.qr_image_payload, "iVBORw0KGgo=");
    assert_eq!(qr.attendance_session_id, "a1");
    assert_eq!(
        qr.expires_at,
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 5, 0).unwrap()
    );
    assert!(qr.decode_image().unwrap().starts_with(&[0x89, b'P', b'N', b'G']));
}
