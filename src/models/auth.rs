//! Credential submission payloads and the normalized auth outcome.

use serde::{Deserialize, Serialize};

use crate::auth::session::Role;
use crate::error::ApiError;

/// Body of `POST /auth/login` and `POST /auth/logout`.
///
/// No `Debug`: the password must never reach a log line.
#[derive(Clone, Serialize)]
pub struct CredentialsRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "ID")]
    pub id: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(rename = "ID")]
    pub id: &'a str,
    pub password: &'a str,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponseDto {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogoutResponseDto {
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful login or signup.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub token: String,
    pub name: String,
    pub role: Role,
    pub message: String,
}

impl std::fmt::Debug for AuthResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResult")
            .field("token", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("message", &self.message)
            .finish()
    }
}

impl AuthResponseDto {
    /// A response without a token is a failed login even on 2xx.
    /// The fallbacks stand in for a name or role the server did not echo.
    pub fn into_result(
        self,
        fallback_name: &str,
        fallback_role: Role,
    ) -> Result<AuthResult, ApiError> {
        let token = self
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::application(self.message.as_deref()))?;

        Ok(AuthResult {
            token,
            name: self
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| fallback_name.to_string()),
            role: self.role.unwrap_or(fallback_role),
            message: self.message.unwrap_or_default(),
        })
    }
}
