//! Attendance history and QR scanning.

use tracing::{debug, info};

use super::{segment, ApiClient};
use crate::error::ApiResult;
use crate::models::attendance::{
    AttendanceHistoryDto, ScanRequest, ScanResponseDto, StudentAttendanceHistoryDto,
};
use crate::models::{AttendanceHistory, ScanResult, StudentAttendanceHistory};

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    api: ApiClient,
}

impl AttendanceRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Whole-class history (teacher view).
    pub async fn get_class_attendance_history(
        &self,
        class_id: &str,
        token: &str,
    ) -> ApiResult<AttendanceHistory> {
        let path = format!("/attendance/history/{}", segment(class_id));
        let dto: AttendanceHistoryDto = self.api.get_json(&path, token).await?;
        let history = AttendanceHistory::from(dto);
        debug!(
            class_id,
            sessions = history.history_entries.len(),
            students = history.overall_stats.students.len(),
            "Loaded class history"
        );
        Ok(history)
    }

    /// The calling student's own history in one class.
    pub async fn get_student_attendance_history(
        &self,
        class_id: &str,
        token: &str,
    ) -> ApiResult<StudentAttendanceHistory> {
        let path = format!("/attendance/student/history/{}", segment(class_id));
        let dto: StudentAttendanceHistoryDto = self.api.get_json(&path, token).await?;
        Ok(StudentAttendanceHistory::from(dto))
    }

    /// Submit a token read from a teacher's QR code.
    pub async fn scan_attendance(
        &self,
        qr_token: &str,
        class_id: &str,
        token: &str,
    ) -> ApiResult<ScanResult> {
        let body = ScanRequest {
            token: qr_token.to_string(),
            class_id: class_id.to_string(),
        };
        let dto: ScanResponseDto = self
            .api
            .post_json("/attendance/scan", &body, Some(token))
            .await?;
        let result = ScanResult::from(dto);
        info!(class_id, "Attendance marked");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::ApiError;
    use serde_json::json;
    use std::sync::Arc;

    fn repo(mock: &MockHttpClient) -> AttendanceRepository {
        AttendanceRepository::new(ApiClient::new("http://api.test", Arc::new(mock.clone())))
    }

    #[tokio::test]
    async fn test_class_history() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/attendance/history/c1",
            MockResponse::json(
                200,
                json!({
                    "success": true,
                    "class": {"name": "Math", "section": "A", "totalStudents": 1},
                    "overallStats": {"averageAttendance": 50, "totalClasses": 2,
                        "students": [{"_id": "u1", "name": "Ann", "ID": "S1", "attendancePercentage": 50}]},
                    "history": [{"date": "2024-03-01", "presentStudents": ["u1"]}]
                }),
            ),
        );

        let history = repo(&mock)
            .get_class_attendance_history("c1", "tok")
            .await
            .unwrap();

        assert_eq!(history.class_info.name, "Math");
        assert_eq!(history.overall_stats.total_classes, 2);
        assert!(history.history_entries[0].is_present("u1"));
        assert_eq!(mock.last_request().unwrap().authorization(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_class_id_is_percent_encoded() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));

        repo(&mock)
            .get_class_attendance_history("a/b", "tok")
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().url,
            "http://api.test/attendance/history/a%2Fb"
        );
    }

    #[tokio::test]
    async fn test_student_history() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/attendance/student/history/c1",
            MockResponse::json(
                200,
                json!({
                    "class": {"name": "Math"},
                    "totalClasses": 2,
                    "attendedClasses": 1,
                    "history": [
                        {"date": "2024-03-01", "present": true},
                        {"date": "2024-03-04", "present": false}
                    ]
                }),
            ),
        );

        let history = repo(&mock)
            .get_student_attendance_history("c1", "tok")
            .await
            .unwrap();
        assert_eq!(history.attendance_percentage, 50.0);
        assert_eq!(history.present_dates(), vec!["2024-03-01"]);
    }

    #[tokio::test]
    async fn test_scan_posts_token_and_class() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/attendance/scan",
            MockResponse::json(
                200,
                json!({"success": true, "message": "Attendance marked", "attendanceId": "r1"}),
            ),
        );

        let result = repo(&mock).scan_attendance("qr-1", "c1", "tok").await.unwrap();
        assert!(result.success);
        assert_eq!(result.attendance_record_id.as_deref(), Some("r1"));

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.json_body(), Some(json!({"token": "qr-1", "classId": "c1"})));
        assert_eq!(request.authorization(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_scan_expired_code() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(
            200,
            json!({"success": false, "message": "QR code expired"}),
        ));

        let err = repo(&mock).scan_attendance("qr-1", "c1", "tok").await.unwrap_err();
        assert_eq!(err, ApiError::application(Some("QR code expired")));
    }

    #[tokio::test]
    async fn test_scan_empty_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::text(201, ""));

        let err = repo(&mock).scan_attendance("qr-1", "c1", "tok").await.unwrap_err();
        assert_eq!(err, ApiError::EmptyResponse);
    }
}
