//! The uniform failure type returned by every auth and repository call.

use crate::traits::{HttpError, SessionError};

use super::category::ErrorCategory;

/// Message used when a `success: false` body carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "request was not successful";

/// Failure of a backend operation.
///
/// Nothing past the repository boundary panics or returns a transport
/// error directly; everything ends up in one of these variants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server was reached and answered with a non-2xx status.
    /// `body` is kept verbatim for diagnostics.
    #[error("HTTP {status} {reason}: {body}")]
    ClientRejected {
        status: u16,
        reason: String,
        body: String,
    },

    /// Connection, timeout, or I/O failure before a status was received.
    #[error("network unavailable: {message}")]
    NetworkUnavailable { message: String },

    /// A 2xx response with no usable body.
    #[error("empty response body")]
    EmptyResponse,

    /// A 2xx response whose body says `success: false`.
    #[error("{message}")]
    ApplicationFailure { message: String },

    /// Anything else (undecodable body, local persistence failure, ...).
    #[error("unexpected error: {message}")]
    Unknown { message: String },
}

impl ApiError {
    pub fn client_rejected(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        ApiError::ClientRejected {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// `success: false` failure, falling back to the generic message when
    /// the server sent none (or only whitespace).
    pub fn application(message: Option<&str>) -> Self {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE);
        ApiError::ApplicationFailure {
            message: message.to_string(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        ApiError::Unknown {
            message: message.into(),
        }
    }

    /// HTTP status for rejected requests.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ClientRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::ClientRejected { status, .. } => match *status {
                401 | 403 => ErrorCategory::Auth,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            ApiError::NetworkUnavailable { .. } => ErrorCategory::Network,
            ApiError::EmptyResponse => ErrorCategory::Server,
            ApiError::ApplicationFailure { .. } => ErrorCategory::User,
            ApiError::Unknown { .. } => ErrorCategory::System,
        }
    }

    /// True when the session is no longer accepted and should be dropped.
    pub fn requires_reauth(&self) -> bool {
        self.status() == Some(401)
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ClientRejected { .. } => "E_API_REJECTED",
            ApiError::NetworkUnavailable { .. } => "E_API_NETWORK",
            ApiError::EmptyResponse => "E_API_EMPTY",
            ApiError::ApplicationFailure { .. } => "E_API_APP",
            ApiError::Unknown { .. } => "E_API_UNKNOWN",
        }
    }

    /// Message suitable for the error slot of a screen.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::ClientRejected { status, body, .. } => {
                // Servers usually answer {"message": "..."}; prefer that text.
                if let Some(message) = extract_message(body) {
                    return message;
                }
                match *status {
                    400 => "The request was invalid. Please try again.".to_string(),
                    401 => "Authentication required. Please log in again.".to_string(),
                    403 => "Access denied. You don't have permission for this action.".to_string(),
                    404 => "The requested resource was not found.".to_string(),
                    500..=599 => {
                        "The server is experiencing issues. Please try again later.".to_string()
                    }
                    _ => format!("The server returned an error (HTTP {}).", status),
                }
            }
            ApiError::NetworkUnavailable { .. } => {
                "Unable to reach the server. Please check your internet connection.".to_string()
            }
            ApiError::EmptyResponse => "The server returned an empty response.".to_string(),
            ApiError::ApplicationFailure { message } => message.clone(),
            ApiError::Unknown { message } => format!("Something went wrong: {}", message),
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        if e.is_connectivity() {
            ApiError::NetworkUnavailable {
                message: e.to_string(),
            }
        } else {
            ApiError::unknown(e.to_string())
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        ApiError::unknown(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::unknown(format!("invalid response: {}", e))
    }
}
