//! Repositories over the attendance REST backend.
//!
//! Every repository shares one [`ApiClient`], which owns the base URL and
//! the transport and turns each HTTP exchange into an [`ApiResult`]:
//!
//! | Outcome | Result |
//! |---|---|
//! | non-2xx | [`ApiError::ClientRejected`] with status, reason, raw body |
//! | 2xx, blank body or `null` | [`ApiError::EmptyResponse`] |
//! | 2xx, `"success": false` | [`ApiError::ApplicationFailure`] |
//! | 2xx, undecodable body | [`ApiError::Unknown`] |
//! | transport failure | [`ApiError::NetworkUnavailable`] or [`ApiError::Unknown`] |

pub mod attendance;
pub mod dashboard;
pub mod teacher;

pub use attendance::AttendanceRepository;
pub use dashboard::DashboardRepository;
pub use teacher::TeacherRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::traits::{Headers, HttpClient, Response};

const BEARER_PREFIX: &str = "Bearer ";

/// Shared HTTP plumbing for all repositories.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` (which starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `Authorization` header value for `token`, adding the scheme once.
    pub fn bearer(token: &str) -> String {
        let token = token.trim();
        if token.starts_with(BEARER_PREFIX) {
            token.to_string()
        } else {
            format!("{}{}", BEARER_PREFIX, token)
        }
    }

    fn headers(token: Option<&str>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        // A blank token is no credential; never send a bare "Bearer ".
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            headers.insert("Authorization".to_string(), Self::bearer(token));
        }
        headers
    }

    /// Authenticated GET, decoding the body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!(path, "GET");
        let response = self
            .http
            .get(&url, &Self::headers(Some(token)))
            .await
            .map_err(|e| {
                warn!(path, error = %e, "GET failed before a response");
                ApiError::from(e)
            })?;
        decode("GET", path, response)
    }

    /// POST a JSON body. `token` is `None` for credential submission.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let payload = serde_json::to_string(body)
            .map_err(|e| ApiError::unknown(format!("failed to encode request: {}", e)))?;

        let mut headers = Self::headers(token);
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        debug!(path, authenticated = token.is_some(), "POST");
        let response = self.http.post(&url, &payload, &headers).await.map_err(|e| {
            warn!(path, error = %e, "POST failed before a response");
            ApiError::from(e)
        })?;
        decode("POST", path, response)
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Classify a response and decode its body.
fn decode<T: DeserializeOwned>(method: &str, path: &str, response: Response) -> ApiResult<T> {
    if !response.is_success() {
        let err = ApiError::client_rejected(
            response.status,
            response.reason_phrase(),
            response.text_lossy(),
        );
        warn!(method, path, status = response.status, "Request rejected");
        return Err(err);
    }

    if response.is_blank() {
        debug!(method, path, status = response.status, "Empty body");
        return Err(ApiError::EmptyResponse);
    }

    let value: serde_json::Value = response.json()?;
    if value.is_null() {
        return Err(ApiError::EmptyResponse);
    }

    if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let message = value.get("message").and_then(serde_json::Value::as_str);
        debug!(method, path, "Server reported success=false");
        return Err(ApiError::application(message));
    }

    Ok(serde_json::from_value(value)?)
}
