//! Attendance history, per-student history, and QR scan results.

use serde::{Deserialize, Serialize};

use super::{
    clamp_percent, dedup_preserving_order, deserialize_opt_id, non_negative, or_not_available,
};

// ============================================================================
// Domain
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInfo {
    pub name: String,
    pub section: String,
    pub total_students: u32,
}

/// One student's line in a class summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentStat {
    /// Database id.
    pub id: String,
    pub name: String,
    pub email: String,
    /// Student or staff number the person logs in with.
    pub student_or_staff_id: String,
    /// 0..=100
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    /// 0..=100
    pub average_attendance_percent: f64,
    pub total_classes: u32,
    pub students: Vec<StudentStat>,
}

/// A single held session and who attended it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub date: String,
    pub present_student_ids: Vec<String>,
}

impl HistoryEntry {
    pub fn is_present(&self, student_id: &str) -> bool {
        self.present_student_ids.iter().any(|id| id == student_id)
    }
}

/// A roster line for one held session.
#[derive(Debug, Clone, PartialEq)]
pub struct RollCallRow<'a> {
    pub student: &'a StudentStat,
    pub present: bool,
}

/// Attendance overview of a class, as seen by its teacher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceHistory {
    pub class_info: ClassInfo,
    pub overall_stats: OverallStats,
    pub history_entries: Vec<HistoryEntry>,
}

impl AttendanceHistory {
    pub fn student(&self, id: &str) -> Option<&StudentStat> {
        self.overall_stats.students.iter().find(|s| s.id == id)
    }

    /// The roster marked present/absent for the entry on `date`.
    ///
    /// Presence lists may carry either database ids or student numbers.
    pub fn roll_call(&self, date: &str) -> Option<Vec<RollCallRow<'_>>> {
        let entry = self.history_entries.iter().find(|e| e.date == date)?;
        Some(self.roll_call_for(entry))
    }

    /// The roster marked present/absent for one entry.
    pub fn roll_call_for(&self, entry: &HistoryEntry) -> Vec<RollCallRow<'_>> {
        self.overall_stats
            .students
            .iter()
            .map(|student| RollCallRow {
                student,
                present: entry.is_present(&student.id)
                    || entry.is_present(&student.student_or_staff_id),
            })
            .collect()
    }
}

/// One date in a student's own history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAttendanceRecord {
    pub date: String,
    pub present: bool,
}

/// Attendance of the logged-in student in one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAttendanceHistory {
    pub class_info: ClassInfo,
    pub student: Option<StudentStat>,
    pub total_classes: u32,
    pub attended_classes: u32,
    /// 0..=100
    pub attendance_percentage: f64,
    pub records: Vec<StudentAttendanceRecord>,
}

impl StudentAttendanceHistory {
    pub fn present_dates(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.present)
            .map(|r| r.date.as_str())
            .collect()
    }
}

/// Outcome of submitting a scanned QR token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub success: bool,
    pub message: String,
    pub attendance_record_id: Option<String>,
}

// ============================================================================
// Wire
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassInfoDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(rename = "totalStudents", default)]
    pub total_students: Option<i64>,
}

impl ClassInfoDto {
    /// `roster_len` stands in for a missing `totalStudents`.
    fn into_domain(self, roster_len: usize) -> ClassInfo {
        ClassInfo {
            name: or_not_available(self.name),
            section: or_not_available(self.section),
            total_students: self
                .total_students
                .map(non_negative)
                .unwrap_or_else(|| u32::try_from(roster_len).unwrap_or(u32::MAX)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentInfoDto {
    #[serde(rename = "_id", default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    /// Mongoose `id` virtual; only read when `_id` is absent.
    #[serde(rename = "id", default, deserialize_with = "deserialize_opt_id")]
    pub virtual_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "ID", default, deserialize_with = "deserialize_opt_id")]
    pub student_or_staff_id: Option<String>,
    #[serde(rename = "attendancePercentage", default)]
    pub attendance_percentage: Option<f64>,
}

impl From<StudentInfoDto> for StudentStat {
    fn from(dto: StudentInfoDto) -> Self {
        StudentStat {
            id: or_not_available(dto.id.or(dto.virtual_id)),
            name: or_not_available(dto.name),
            email: or_not_available(dto.email),
            student_or_staff_id: or_not_available(dto.student_or_staff_id),
            attendance_percentage: clamp_percent(dto.attendance_percentage.unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverallStatsDto {
    #[serde(rename = "averageAttendance", default)]
    pub average_attendance: Option<f64>,
    #[serde(rename = "totalClasses", default)]
    pub total_classes: Option<i64>,
    #[serde(default)]
    pub students: Option<Vec<StudentInfoDto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryItemDto {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "presentStudents", default)]
    pub present_students: Option<Vec<String>>,
}

impl From<HistoryItemDto> for HistoryEntry {
    fn from(dto: HistoryItemDto) -> Self {
        HistoryEntry {
            date: or_not_available(dto.date),
            present_student_ids: dedup_preserving_order(dto.present_students.unwrap_or_default()),
        }
    }
}

/// `GET /attendance/history/{classId}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceHistoryDto {
    #[serde(rename = "class", default)]
    pub class_info: Option<ClassInfoDto>,
    #[serde(rename = "overallStats", default)]
    pub overall_stats: Option<OverallStatsDto>,
    #[serde(default)]
    pub history: Option<Vec<HistoryItemDto>>,
}

impl From<AttendanceHistoryDto> for AttendanceHistory {
    fn from(dto: AttendanceHistoryDto) -> Self {
        let stats = dto.overall_stats.unwrap_or_default();
        let students: Vec<StudentStat> = stats
            .students
            .unwrap_or_default()
            .into_iter()
            .map(StudentStat::from)
            .collect();
        let history_entries: Vec<HistoryEntry> = dto
            .history
            .unwrap_or_default()
            .into_iter()
            .map(HistoryEntry::from)
            .collect();

        AttendanceHistory {
            class_info: dto.class_info.unwrap_or_default().into_domain(students.len()),
            overall_stats: OverallStats {
                average_attendance_percent: clamp_percent(stats.average_attendance.unwrap_or(0.0)),
                total_classes: stats
                    .total_classes
                    .map(non_negative)
                    .unwrap_or_else(|| u32::try_from(history_entries.len()).unwrap_or(u32::MAX)),
                students,
            },
            history_entries,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentHistoryItemDto {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub present: Option<bool>,
    /// "present" / "absent", used when `present` is missing.
    #[serde(default)]
    pub status: Option<String>,
}

impl From<StudentHistoryItemDto> for StudentAttendanceRecord {
    fn from(dto: StudentHistoryItemDto) -> Self {
        let present = dto.present.unwrap_or_else(|| {
            dto.status
                .as_deref()
                .is_some_and(|s| s.trim().eq_ignore_ascii_case("present"))
        });
        StudentAttendanceRecord {
            date: or_not_available(dto.date),
            present,
        }
    }
}

/// `GET /attendance/student/history/{classId}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentAttendanceHistoryDto {
    #[serde(rename = "class", default)]
    pub class_info: Option<ClassInfoDto>,
    #[serde(default)]
    pub student: Option<StudentInfoDto>,
    #[serde(rename = "totalClasses", default)]
    pub total_classes: Option<i64>,
    #[serde(rename = "attendedClasses", default)]
    pub attended_classes: Option<i64>,
    #[serde(rename = "attendancePercentage", default)]
    pub attendance_percentage: Option<f64>,
    #[serde(default)]
    pub history: Option<Vec<StudentHistoryItemDto>>,
}

impl From<StudentAttendanceHistoryDto> for StudentAttendanceHistory {
    fn from(dto: StudentAttendanceHistoryDto) -> Self {
        let records: Vec<StudentAttendanceRecord> = dto
            .history
            .unwrap_or_default()
            .into_iter()
            .map(StudentAttendanceRecord::from)
            .collect();

        let total_classes = dto
            .total_classes
            .map(non_negative)
            .unwrap_or_else(|| u32::try_from(records.len()).unwrap_or(u32::MAX));
        let attended_classes = dto.attended_classes.map(non_negative).unwrap_or_else(|| {
            u32::try_from(records.iter().filter(|r| r.present).count()).unwrap_or(u32::MAX)
        });
        let attendance_percentage = match dto.attendance_percentage {
            Some(pct) => clamp_percent(pct),
            None if total_classes == 0 => 0.0,
            None => clamp_percent(f64::from(attended_classes) / f64::from(total_classes) * 100.0),
        };

        StudentAttendanceHistory {
            class_info: dto.class_info.unwrap_or_default().into_domain(1),
            student: dto.student.map(StudentStat::from),
            total_classes,
            attended_classes,
            attendance_percentage,
            records,
        }
    }
}

/// Body of `POST /attendance/scan`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRequest {
    /// Token decoded from the QR image.
    pub token: String,
    #[serde(rename = "classId")]
    pub class_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanResponseDto {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(
        rename = "attendanceId",
        alias = "attendanceRecordId",
        alias = "recordId",
        default,
        deserialize_with = "deserialize_opt_id"
    )]
    pub attendance_id: Option<String>,
}

impl From<ScanResponseDto> for ScanResult {
    fn from(dto: ScanResponseDto) -> Self {
        ScanResult {
            success: dto.success.unwrap_or(true),
            message: dto
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Attendance marked".to_string()),
            attendance_record_id: dto.attendance_id,
        }
    }
}
