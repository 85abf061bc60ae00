use super::{StateHolder, ViewState};
use crate::auth::SessionStore;
use crate::models::{ClassItem, QrIssuance};
use crate::repository::TeacherRepository;

/// Class management and QR issuance for teachers.
#[derive(Debug, Clone)]
pub struct TeacherState {
    repo: TeacherRepository,
    class: StateHolder<ClassItem>,
    qr: StateHolder<QrIssuance>,
}

impl TeacherState {
    pub fn new(repo: TeacherRepository, session: SessionStore) -> Self {
        Self {
            repo,
            class: StateHolder::new(session.clone()),
            qr: StateHolder::new(session),
        }
    }

    /// The class most recently created or edited.
    pub fn class(&self) -> &StateHolder<ClassItem> {
        &self.class
    }

    pub fn qr(&self) -> &StateHolder<QrIssuance> {
        &self.qr
    }

    pub async fn create_class(
        &self,
        class_name: &str,
        section: &str,
        schedule: &[String],
    ) -> ViewState<ClassItem> {
        let repo = &self.repo;
        self.class
            .run_authorized(|token| async move {
                repo.create_class(&token, class_name, section, schedule).await
            })
            .await
    }

    pub async fn add_student(&self, class_id: &str, name: &str, id: &str) -> ViewState<ClassItem> {
        let repo = &self.repo;
        self.class
            .run_authorized(|token| async move {
                repo.add_student_to_class(class_id, name, id, &token).await
            })
            .await
    }

    pub async fn generate_qr(&self, class_id: &str) -> ViewState<QrIssuance> {
        let repo = &self.repo;
        self.qr
            .run_authorized(|token| async move { repo.generate_qr_code(class_id, &token).await })
            .await
    }
}
