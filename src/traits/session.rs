//! Session persistence trait abstraction.
//!
//! The [`SessionProvider`] owns the durable slot a session lives in between
//! process runs. The in-process view of the session is kept by
//! [`crate::auth::SessionStore`], which delegates persistence here.

use async_trait::async_trait;

use crate::auth::Session;

/// Session persistence errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// Failed to load the persisted session
    #[error("Failed to load session: {0}")]
    LoadFailed(String),
    /// Failed to save the session
    #[error("Failed to save session: {0}")]
    SaveFailed(String),
    /// Failed to clear the persisted session
    #[error("Failed to clear session: {0}")]
    ClearFailed(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(String),
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Serialization(e.to_string())
    }
}

/// Trait for session storage and retrieval.
///
/// Implementations include the file-based provider used by the CLI and
/// the in-memory provider used in tests.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Load the persisted session.
    ///
    /// - `Ok(Some(session))` if a session with a token is stored
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Replace the persisted session.
    async fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Remove the persisted session. Succeeds when nothing was stored.
    async fn clear(&self) -> Result<(), SessionError>;
}
