//! Session state for the attendance client.
//!
//! A [`Session`] is the bearer token plus the few identity fields the
//! screens need. [`SessionStore`] is the injectable handle every component
//! shares: the auth service is its only writer, repositories and view
//! state holders read from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use crate::traits::{SessionError, SessionProvider};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

impl Role {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }

    /// Lenient parse used for server payloads: anything that is not
    /// "teacher" (any case) is a student.
    pub fn from_wire(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("teacher") {
            Role::Teacher
        } else {
            Role::Student
        }
    }

    pub fn is_teacher(&self) -> bool {
        matches!(self, Role::Teacher)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            other => Err(format!("unknown role '{}', expected student or teacher", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.as_deref().map(Role::from_wire).unwrap_or_default())
    }
}

/// The authenticated session.
///
/// An empty `token` means "logged out".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token as issued by the server (no "Bearer " scheme).
    pub token: String,
    /// Name shown in greetings.
    #[serde(default)]
    pub display_name: String,
    /// Student or staff ID used to log in.
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub role: Role,
    /// When the session was last written.
    #[serde(default)]
    pub last_updated: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session stamped with the current time.
    pub fn new(
        token: impl Into<String>,
        display_name: impl Into<String>,
        user_id: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            token: token.into(),
            display_name: display_name.into(),
            user_id: user_id.into(),
            role,
            last_updated: Utc::now(),
        }
    }

    /// A logged-out session.
    pub fn empty() -> Self {
        Self {
            last_updated: Utc::now(),
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Shared handle over the current session.
///
/// Writes persist through the provider and then swap the in-process
/// snapshot under a lock, so readers see either the old or the new
/// session as a whole.
#[derive(Clone)]
pub struct SessionStore {
    provider: Arc<dyn SessionProvider>,
    current: Arc<RwLock<Arc<Session>>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.snapshot();
        f.debug_struct("SessionStore")
            .field("authenticated", &session.is_authenticated())
            .field("display_name", &session.display_name)
            .field("role", &session.role)
            .finish()
    }
}

impl SessionStore {
    /// Create a store that starts logged out.
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self {
            provider,
            current: Arc::new(RwLock::new(Arc::new(Session::default()))),
        }
    }

    /// Create a store primed with whatever the provider has persisted.
    pub async fn load(provider: Arc<dyn SessionProvider>) -> Result<Self, SessionError> {
        let persisted = provider.load().await?;
        let store = Self::new(provider);
        if let Some(session) = persisted.filter(Session::is_authenticated) {
            debug!(role = %session.role, "Restored persisted session");
            store.replace(session);
        }
        Ok(store)
    }

    /// Persist `session` and make it the current one.
    ///
    /// On a persistence failure the current session is left untouched.
    pub async fn save(&self, session: Session) -> Result<(), SessionError> {
        self.provider.save(&session).await?;
        self.replace(session);
        Ok(())
    }

    /// The current session, or `None` when logged out.
    pub fn read(&self) -> Option<Session> {
        let snapshot = self.snapshot();
        snapshot
            .is_authenticated()
            .then(|| Session::clone(&snapshot))
    }

    /// The current session snapshot, authenticated or not.
    pub fn snapshot(&self) -> Arc<Session> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// The current token; empty when logged out.
    pub fn token(&self) -> String {
        self.snapshot().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    /// Log out locally.
    ///
    /// The in-process token is emptied even if removing the persisted
    /// slot fails; that failure is still reported.
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.replace(Session::empty());
        let result = self.provider.clear().await;
        if let Err(ref e) = result {
            warn!("Session cleared in memory but not on disk: {}", e);
        }
        result
    }

    fn replace(&self, session: Session) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(session);
    }
}
