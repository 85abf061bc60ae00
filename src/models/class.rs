//! Classes as listed on the dashboard and returned by teacher operations.

use serde::{Deserialize, Serialize};

use super::{dedup_preserving_order, deserialize_opt_id, or_not_available};

// ============================================================================
// Domain
// ============================================================================

/// A class (course section) with its schedule and roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassItem {
    pub id: String,
    pub class_name: String,
    pub section: String,
    /// Weekday names in server order.
    pub schedule_days: Vec<String>,
    pub teacher_id: String,
    pub created_at: String,
    /// Enrolled student ids, unique, in server order.
    pub student_ids: Vec<String>,
}

impl ClassItem {
    pub fn student_count(&self) -> usize {
        self.student_ids.len()
    }

    pub fn has_student(&self, student_id: &str) -> bool {
        self.student_ids.iter().any(|s| s == student_id)
    }

    /// "Mon, Wed" style label; empty schedules read "No schedule".
    pub fn schedule_label(&self) -> String {
        if self.schedule_days.is_empty() {
            "No schedule".to_string()
        } else {
            self.schedule_days.join(", ")
        }
    }
}

// ============================================================================
// Wire
// ============================================================================

/// Reference to another document, either a bare id or a populated object.
///
/// Populated objects may carry `_id`, the `id` virtual, or both; `_id`
/// wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefDto {
    Id(String),
    Object {
        #[serde(rename = "_id", default, deserialize_with = "deserialize_opt_id")]
        id: Option<String>,
        #[serde(rename = "id", default, deserialize_with = "deserialize_opt_id")]
        virtual_id: Option<String>,
    },
}

impl RefDto {
    /// `None` for a populated object without any id.
    pub fn into_id(self) -> Option<String> {
        match self {
            RefDto::Id(id) => Some(id),
            RefDto::Object { id, virtual_id } => id.or(virtual_id),
        }
        .filter(|id| !id.trim().is_empty())
    }
}

/// Class schedule as sent by the server.
///
/// Current servers send `{"days": [...]}`; older records hold a
/// comma-separated string or a bare list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScheduleDto {
    Days {
        #[serde(default)]
        days: Option<Vec<String>>,
    },
    List(Vec<String>),
    Text(String),
}

impl ScheduleDto {
    pub fn into_days(self) -> Vec<String> {
        let days = match self {
            ScheduleDto::Days { days } => days.unwrap_or_default(),
            ScheduleDto::List(days) => days,
            ScheduleDto::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        days.into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect()
    }
}

/// A class as it appears inside server payloads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClassItemDto {
    #[serde(rename = "_id", default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    /// Mongoose `id` virtual; only read when `_id` is absent.
    #[serde(rename = "id", default, deserialize_with = "deserialize_opt_id")]
    pub virtual_id: Option<String>,
    #[serde(rename = "className", default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub schedule: Option<ScheduleDto>,
    #[serde(default)]
    pub students: Option<Vec<RefDto>>,
    #[serde(default)]
    pub teacher: Option<RefDto>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl From<ClassItemDto> for ClassItem {
    fn from(dto: ClassItemDto) -> Self {
        let students = dto
            .students
            .unwrap_or_default()
            .into_iter()
            .filter_map(RefDto::into_id)
            .collect();

        ClassItem {
            id: or_not_available(dto.id.or(dto.virtual_id)),
            class_name: or_not_available(dto.class_name),
            section: or_not_available(dto.section),
            schedule_days: dto.schedule.map(ScheduleDto::into_days).unwrap_or_default(),
            teacher_id: or_not_available(dto.teacher.and_then(RefDto::into_id)),
            created_at: or_not_available(dto.created_at),
            student_ids: dedup_preserving_order(students),
        }
    }
}

/// `GET /class/Dashboard`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardResponseDto {
    #[serde(default)]
    pub data: Option<Vec<ClassItemDto>>,
}

/// `POST /class/create`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassResponseDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "class")]
    pub data: Option<ClassItemDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddStudentDataDto {
    #[serde(rename = "class", default)]
    pub class: Option<ClassItemDto>,
}

/// `POST /class/{classId}/students`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddStudentResponseDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<AddStudentDataDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRequest {
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateClassRequest {
    #[serde(rename = "className")]
    pub class_name: String,
    pub section: String,
    pub schedule: ScheduleRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddStudentRequest {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
}
