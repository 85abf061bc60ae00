//! Client configuration.
//!
//! Defaults, then environment, then builder overrides:
//!
//! ```ignore
//! use rollcall::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .with_base_url("https://attendance.example.edu/api");
//! ```

use std::path::PathBuf;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Overrides the backend base URL.
pub const ENV_API_URL: &str = "ROLLCALL_API_URL";
/// Overrides where the session file lives.
pub const ENV_SESSION_PATH: &str = "ROLLCALL_SESSION_PATH";
/// Log filter for the command-line front end (`tracing_subscriber::EnvFilter` syntax).
pub const ENV_LOG: &str = "ROLLCALL_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Session file; `None` picks the platform data directory.
    pub session_path: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            session_path: None,
            user_agent: format!("rollcall/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Defaults overridden by `ROLLCALL_API_URL` and `ROLLCALL_SESSION_PATH`.
    /// Blank variables are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_blank_var(ENV_API_URL) {
            config = config.with_base_url(url);
        }
        if let Some(path) = non_blank_var(ENV_SESSION_PATH) {
            config = config.with_session_path(path);
        }
        config
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
