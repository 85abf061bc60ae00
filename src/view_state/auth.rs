use super::{StateHolder, ViewState};
use crate::auth::{AuthService, Role};
use crate::models::AuthResult;

/// Login / signup / logout screen.
#[derive(Debug, Clone)]
pub struct AuthState {
    service: AuthService,
    result: StateHolder<AuthResult>,
    logout: StateHolder<String>,
}

impl AuthState {
    pub fn new(service: AuthService) -> Self {
        let session = service.session().clone();
        Self {
            result: StateHolder::new(session.clone()).keep_session_on_unauthorized(),
            logout: StateHolder::new(session).keep_session_on_unauthorized(),
            service,
        }
    }

    pub fn result(&self) -> &StateHolder<AuthResult> {
        &self.result
    }

    pub fn logout_state(&self) -> &StateHolder<String> {
        &self.logout
    }

    pub async fn login(&self, name: &str, id: &str, password: &str) -> ViewState<AuthResult> {
        self.result
            .run(self.service.login(name, id, password))
            .await
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        id: &str,
        password: &str,
        role: Role,
    ) -> ViewState<AuthResult> {
        self.result
            .run(self.service.signup(name, email, id, password, role))
            .await
    }

    /// Logs out; the previous login result is dropped either way.
    pub async fn logout(&self, name: &str, id: &str, password: &str) -> ViewState<String> {
        let state = self
            .logout
            .run(self.service.logout(name, id, password))
            .await;
        self.result.reset();
        state
    }
}
