//! Login, signup and logout against `/auth/*`.

use tracing::{info, warn};

use super::session::{Role, Session, SessionStore};
use crate::error::{ApiError, ApiResult};
use crate::models::auth::{AuthResponseDto, CredentialsRequest, LogoutResponseDto, SignupRequest};
use crate::models::AuthResult;
use crate::repository::ApiClient;

/// Authentication operations; the only writer of the [`SessionStore`].
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    session: SessionStore,
}

impl AuthService {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Log in and make the returned token the current session.
    ///
    /// On any failure the session is left as it was.
    pub async fn login(&self, name: &str, id: &str, password: &str) -> ApiResult<AuthResult> {
        let body = CredentialsRequest { name, id, password };
        let dto: AuthResponseDto = self
            .api
            .post_json("/auth/login", &body, None)
            .await
            .inspect_err(|e| warn!(code = e.error_code(), "Login failed: {}", e))?;
        let result = dto.into_result(name, Role::Student)?;
        self.persist(&result, id).await?;
        info!(role = %result.role, "Logged in");
        Ok(result)
    }

    /// Register an account. The server logs the new user in directly.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        id: &str,
        password: &str,
        role: Role,
    ) -> ApiResult<AuthResult> {
        let body = SignupRequest {
            name,
            email,
            id,
            password,
            role,
        };
        let dto: AuthResponseDto = self
            .api
            .post_json("/auth/register", &body, None)
            .await
            .inspect_err(|e| warn!(code = e.error_code(), "Signup failed: {}", e))?;
        let result = dto.into_result(name, role)?;
        self.persist(&result, id).await?;
        info!(role = %result.role, "Signed up");
        Ok(result)
    }

    /// Log out remotely and locally.
    ///
    /// The local session is cleared on every path. The result reports the
    /// remote call; when that succeeded but the persisted slot could not
    /// be removed, the persistence failure is returned instead.
    pub async fn logout(&self, name: &str, id: &str, password: &str) -> ApiResult<String> {
        let body = CredentialsRequest { name, id, password };
        let remote: ApiResult<LogoutResponseDto> =
            self.api.post_json("/auth/logout", &body, None).await;
        let cleared = self.session.clear().await;

        match (remote, cleared) {
            (Ok(dto), Ok(())) => {
                info!("Logged out");
                Ok(dto
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Logged out".to_string()))
            }
            (Ok(_), Err(e)) => Err(ApiError::from(e)),
            (Err(e), _) => {
                warn!(code = e.error_code(), "Remote logout failed, local session cleared: {}", e);
                Err(e)
            }
        }
    }

    async fn persist(&self, result: &AuthResult, id: &str) -> ApiResult<()> {
        let session = Session::new(result.token.clone(), result.name.clone(), id, result.role);
        self.session.save(session).await.map_err(|e| {
            warn!("Could not persist session: {}", e);
            ApiError::from(e)
        })
    }
}
