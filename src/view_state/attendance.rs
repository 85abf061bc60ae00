use super::{StateHolder, ViewState};
use crate::auth::SessionStore;
use crate::models::{AttendanceHistory, ScanResult, StudentAttendanceHistory};
use crate::repository::AttendanceRepository;

/// History screens and the student's scan flow.
#[derive(Debug, Clone)]
pub struct AttendanceState {
    repo: AttendanceRepository,
    class_history: StateHolder<AttendanceHistory>,
    student_history: StateHolder<StudentAttendanceHistory>,
    scan: StateHolder<ScanResult>,
}

impl AttendanceState {
    pub fn new(repo: AttendanceRepository, session: SessionStore) -> Self {
        Self {
            repo,
            class_history: StateHolder::new(session.clone()),
            student_history: StateHolder::new(session.clone()),
            scan: StateHolder::new(session),
        }
    }

    pub fn class_history(&self) -> &StateHolder<AttendanceHistory> {
        &self.class_history
    }

    pub fn student_history(&self) -> &StateHolder<StudentAttendanceHistory> {
        &self.student_history
    }

    pub fn scan(&self) -> &StateHolder<ScanResult> {
        &self.scan
    }

    pub async fn load_class_history(&self, class_id: &str) -> ViewState<AttendanceHistory> {
        let repo = &self.repo;
        self.class_history
            .run_authorized(|token| async move {
                repo.get_class_attendance_history(class_id, &token).await
            })
            .await
    }

    pub async fn load_student_history(
        &self,
        class_id: &str,
    ) -> ViewState<StudentAttendanceHistory> {
        let repo = &self.repo;
        self.student_history
            .run_authorized(|token| async move {
                repo.get_student_attendance_history(class_id, &token).await
            })
            .await
    }

    pub async fn submit_scan(&self, qr_token: &str, class_id: &str) -> ViewState<ScanResult> {
        let repo = &self.repo;
        self.scan
            .run_authorized(|token| async move {
                repo.scan_attendance(qr_token, class_id, &token).await
            })
            .await
    }
}
