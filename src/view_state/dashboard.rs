use super::{StateHolder, ViewState};
use crate::auth::SessionStore;
use crate::models::ClassItem;
use crate::repository::DashboardRepository;

/// Class list shown after login.
#[derive(Debug, Clone)]
pub struct DashboardState {
    repo: DashboardRepository,
    classes: StateHolder<Vec<ClassItem>>,
}

impl DashboardState {
    pub fn new(repo: DashboardRepository, session: SessionStore) -> Self {
        Self {
            repo,
            classes: StateHolder::new(session),
        }
    }

    pub fn classes(&self) -> &StateHolder<Vec<ClassItem>> {
        &self.classes
    }

    /// Re-fetch the dashboard with the current session token.
    pub async fn refresh(&self) -> ViewState<Vec<ClassItem>> {
        let repo = &self.repo;
        self.classes
            .run_authorized(|token| async move { repo.get_dashboard_classes(&token).await })
            .await
    }
}
