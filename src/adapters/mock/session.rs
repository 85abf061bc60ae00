//! In-memory session provider for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::Session;
use crate::traits::{SessionError, SessionProvider};

/// In-memory session provider.
///
/// Each operation can be told to fail so tests can drive the error paths
/// of [`crate::auth::SessionStore`] and the auth service.
#[derive(Debug, Clone, Default)]
pub struct InMemorySession {
    session: Arc<Mutex<Option<Session>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with an initial persisted session.
    pub fn with_session(session: Session) -> Self {
        let provider = Self::default();
        provider.set_session(Some(session));
        provider
    }

    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Persisted session, read synchronously.
    pub fn get_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session;
    }
}

#[async_trait]
impl SessionProvider for InMemorySession {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(SessionError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(SessionError::SaveFailed("Mock save failure".to_string()));
        }
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(SessionError::ClearFailed("Mock clear failure".to_string()));
        }
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
