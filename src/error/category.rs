//! Error category classification.
//!
//! Categories let callers pick a message and a recovery hint without
//! matching on every error variant.

use std::fmt;

/// High-level categorization of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The server could not be reached.
    Network,

    /// The session is missing, expired or rejected.
    Auth,

    /// Backend failures (HTTP 5xx).
    Server,

    /// The server rejected the request as malformed (other 4xx), or the
    /// response could not be understood.
    Client,

    /// The server understood the request but refused it for a business
    /// reason (`success: false`).
    User,

    /// Local failures such as session persistence.
    System,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again.",
            ErrorCategory::Auth => "Please log in again.",
            ErrorCategory::Server => "The service is having trouble. Try again later.",
            ErrorCategory::Client => "Check the values you entered and try again.",
            ErrorCategory::User => "Review the message above and adjust your request.",
            ErrorCategory::System => "Check local file permissions and disk space.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
