//! Wiring: one transport, one session store, every service on top.

use std::sync::Arc;
use tracing::debug;

use crate::adapters::{FileSessionProvider, ReqwestHttpClient};
use crate::auth::{AuthService, SessionStore};
use crate::config::ClientConfig;
use crate::repository::{ApiClient, AttendanceRepository, DashboardRepository, TeacherRepository};
use crate::traits::{HttpClient, HttpError, SessionError, SessionProvider};
use crate::view_state::{AttendanceState, AuthState, DashboardState, TeacherState};

/// Failure while assembling a [`Client`].
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] HttpError),
    #[error("failed to restore session: {0}")]
    Session(#[from] SessionError),
}

/// Every service sharing one transport and one session.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    session: SessionStore,
    auth: AuthService,
    dashboard: DashboardRepository,
    attendance: AttendanceRepository,
    teacher: TeacherRepository,
}

impl Client {
    /// Production wiring: reqwest transport, file-backed session.
    pub async fn connect(config: ClientConfig) -> Result<Self, StartupError> {
        let http = ReqwestHttpClient::with_user_agent(&config.user_agent)?;
        let provider = match &config.session_path {
            Some(path) => FileSessionProvider::with_path(path.clone()),
            None => FileSessionProvider::new()?,
        };
        debug!(session_path = %provider.session_path().display(), "Using session file");
        Ok(Self::with_parts(config, Arc::new(http), Arc::new(provider)).await?)
    }

    /// Wire explicit adapters, restoring any persisted session.
    pub async fn with_parts(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        provider: Arc<dyn SessionProvider>,
    ) -> Result<Self, SessionError> {
        let session = SessionStore::load(provider).await?;
        let api = ApiClient::new(config.base_url.clone(), http);
        Ok(Self {
            auth: AuthService::new(api.clone(), session.clone()),
            dashboard: DashboardRepository::new(api.clone()),
            attendance: AttendanceRepository::new(api.clone()),
            teacher: TeacherRepository::new(api),
            session,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn dashboard(&self) -> &DashboardRepository {
        &self.dashboard
    }

    pub fn attendance(&self) -> &AttendanceRepository {
        &self.attendance
    }

    pub fn teacher(&self) -> &TeacherRepository {
        &self.teacher
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::new(self.auth.clone())
    }

    pub fn dashboard_state(&self) -> DashboardState {
        DashboardState::new(self.dashboard.clone(), self.session.clone())
    }

    pub fn attendance_state(&self) -> AttendanceState {
        AttendanceState::new(self.attendance.clone(), self.session.clone())
    }

    pub fn teacher_state(&self) -> TeacherState {
        TeacherState::new(self.teacher.clone(), self.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySession, MockHttpClient};
    use crate::auth::{Role, Session};

    #[tokio::test]
    async fn test_with_parts_restores_session() {
        let provider = InMemorySession::with_session(Session::new("tok", "Ann", "S1", Role::Student));
        let client = Client::with_parts(
            ClientConfig::default(),
            Arc::new(MockHttpClient::new()),
            Arc::new(provider),
        )
        .await
        .unwrap();

        assert!(client.session().is_authenticated());
        assert!(client.auth().session().is_authenticated());
    }

    #[tokio::test]
    async fn test_with_parts_load_failure() {
        let provider = InMemorySession::new();
        provider.set_load_should_fail(true);
        let result = Client::with_parts(
            ClientConfig::default(),
            Arc::new(MockHttpClient::new()),
            Arc::new(provider),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_uses_configured_session_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::default().with_session_path(dir.path().join("s.json"));
        let client = Client::connect(config).await.unwrap();
        assert!(!client.session().is_authenticated());
    }
}
