//! Teacher-only operations: classes, rosters and QR codes.

use tracing::info;

use super::{segment, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::models::class::{
    AddStudentRequest, AddStudentResponseDto, ClassResponseDto, CreateClassRequest,
    ScheduleRequest,
};
use crate::models::qr::{GenerateQrRequest, QrResponseDto};
use crate::models::{ClassItem, QrIssuance};

#[derive(Debug, Clone)]
pub struct TeacherRepository {
    api: ApiClient,
}

impl TeacherRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create a class meeting on `schedule` (weekday names).
    pub async fn create_class(
        &self,
        token: &str,
        class_name: &str,
        section: &str,
        schedule: &[String],
    ) -> ApiResult<ClassItem> {
        let body = CreateClassRequest {
            class_name: class_name.trim().to_string(),
            section: section.trim().to_string(),
            schedule: ScheduleRequest {
                days: schedule
                    .iter()
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .collect(),
            },
        };
        let dto: ClassResponseDto = self
            .api
            .post_json("/class/create", &body, Some(token))
            .await?;
        let class = ClassItem::from(dto.data.ok_or(ApiError::EmptyResponse)?);
        info!(class_id = %class.id, "Class created");
        Ok(class)
    }

    /// Enroll a student; returns the class with its updated roster.
    pub async fn add_student_to_class(
        &self,
        class_id: &str,
        name: &str,
        id: &str,
        token: &str,
    ) -> ApiResult<ClassItem> {
        let path = format!("/class/{}/students", segment(class_id));
        let body = AddStudentRequest {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
        };
        let dto: AddStudentResponseDto = self.api.post_json(&path, &body, Some(token)).await?;
        let class = dto
            .data
            .and_then(|d| d.class)
            .map(ClassItem::from)
            .ok_or(ApiError::EmptyResponse)?;
        info!(class_id, roster = class.student_count(), "Student added");
        Ok(class)
    }

    pub async fn generate_qr_code(&self, class_id: &str, token: &str) -> ApiResult<QrIssuance> {
        let body = GenerateQrRequest {
            class_id: class_id.to_string(),
        };
        let dto: QrResponseDto = self
            .api
            .post_json("/attendance/generate-qr", &body, Some(token))
            .await?;
        let qr = QrIssuance::try_from(dto)?;
        info!(class_id, expires_at = %qr.expires_at, "QR code issued");
        Ok(qr)
    }
}
