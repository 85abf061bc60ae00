//! File-based session provider.
//!
//! The session is stored as pretty-printed JSON, by default in
//! `<data dir>/rollcall/session.json`. Writes go to a sibling temp file
//! that is renamed over the slot, so readers never see half a file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::auth::Session;
use crate::traits::{SessionError, SessionProvider};

/// The session directory name under the platform data dir.
const SESSION_DIR: &str = "rollcall";

/// The session file name.
const SESSION_FILE: &str = "session.json";

/// File-based session provider.
#[derive(Debug, Clone)]
pub struct FileSessionProvider {
    session_path: PathBuf,
}

impl FileSessionProvider {
    /// Provider at the default location.
    ///
    /// Returns an error if neither a data dir nor a home dir can be found.
    pub fn new() -> Result<Self, SessionError> {
        Self::default_path()
            .map(Self::with_path)
            .ok_or_else(|| SessionError::LoadFailed("Failed to determine data directory".to_string()))
    }

    /// Provider storing the session at `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            session_path: path.into(),
        }
    }

    /// Default session path for this platform.
    pub fn default_path() -> Option<PathBuf> {
        let base = dirs::data_dir().or_else(dirs::home_dir)?;
        Some(base.join(SESSION_DIR).join(SESSION_FILE))
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .session_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SESSION_FILE.into());
        name.push(".tmp");
        self.session_path.with_file_name(name)
    }
}

#[async_trait]
impl SessionProvider for FileSessionProvider {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match fs::read(&self.session_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::LoadFailed(e.to_string())),
        };

        // A corrupt slot is treated as logged out rather than a hard failure.
        match serde_json::from_slice::<Session>(&raw) {
            Ok(session) if session.is_authenticated() => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!("Ignoring unreadable session file: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionError::SaveFailed(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(session)?;
        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| SessionError::SaveFailed(e.to_string()))?;
        fs::rename(&temp, &self.session_path)
            .await
            .map_err(|e| SessionError::SaveFailed(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.session_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::ClearFailed(e.to_string())),
        }
    }
}
