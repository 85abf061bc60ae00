//! Per-screen state containers.
//!
//! Each screen owns one or more [`StateHolder`]s. A holder publishes
//! immutable [`ViewState`] snapshots through a `tokio::sync::watch`
//! channel; the UI subscribes and re-renders on change.
//!
//! ```text
//!  UI action ──► holder.run(repository call)
//!                  │  loading = true, error = None
//!                  ▼
//!               repository ──► ApiResult<T>
//!                  │
//!                  ▼  loading = false, data XOR error
//!               watch::Sender ──► watch::Receiver (UI)
//! ```
//!
//! Concurrent runs on the same holder race; whichever finishes last
//! leaves its snapshot.

mod attendance;
mod auth;
mod dashboard;
mod teacher;

pub use attendance::AttendanceState;
pub use auth::AuthState;
pub use dashboard::DashboardState;
pub use teacher::TeacherState;

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::error::ApiResult;

/// Error published when a screen needs a session and there is none.
pub const NOT_LOGGED_IN: &str = "Not logged in. Please log in first.";

/// Snapshot of one screen slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_idle(&self) -> bool {
        !self.loading && self.data.is_none() && self.error.is_none()
    }
}

/// Publishes [`ViewState`] snapshots for one operation.
pub struct StateHolder<T> {
    tx: Arc<watch::Sender<ViewState<T>>>,
    session: SessionStore,
    clear_on_unauthorized: bool,
}

impl<T> Clone for StateHolder<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            session: self.session.clone(),
            clear_on_unauthorized: self.clear_on_unauthorized,
        }
    }
}

impl<T> std::fmt::Debug for StateHolder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.tx.borrow();
        f.debug_struct("StateHolder")
            .field("loading", &state.loading)
            .field("has_data", &state.data.is_some())
            .field("error", &state.error)
            .finish()
    }
}

impl<T: Clone> StateHolder<T> {
    pub fn new(session: SessionStore) -> Self {
        let (tx, _rx) = watch::channel(ViewState::default());
        Self {
            tx: Arc::new(tx),
            session,
            clear_on_unauthorized: true,
        }
    }

    /// Keep the session on a 401. Used for credential screens, where a
    /// 401 means wrong credentials rather than an expired token.
    pub fn keep_session_on_unauthorized(mut self) -> Self {
        self.clear_on_unauthorized = false;
        self
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.tx.subscribe()
    }

    /// Drive one repository call and publish its outcome.
    ///
    /// Returns the snapshot this call published. A 401 also logs the
    /// session out locally unless [`Self::keep_session_on_unauthorized`]
    /// was set.
    pub async fn run<F>(&self, operation: F) -> ViewState<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        self.tx.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let published = match operation.await {
            Ok(data) => ViewState {
                data: Some(data),
                loading: false,
                error: None,
            },
            Err(err) => {
                if err.requires_reauth() && self.clear_on_unauthorized {
                    warn!("Session rejected by server, logging out locally");
                    // clear() already logs provider failures
                    let _ = self.session.clear().await;
                }
                debug!(code = err.error_code(), "Publishing error state");
                ViewState {
                    data: None,
                    loading: false,
                    error: Some(err.user_message()),
                }
            }
        };

        self.tx.send_replace(published.clone());
        published
    }

    /// [`Self::run`] with the current session token.
    ///
    /// When logged out nothing is sent; a "not logged in" error is
    /// published instead.
    pub async fn run_authorized<F, Fut>(&self, operation: F) -> ViewState<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let token = self.session.token();
        if token.trim().is_empty() {
            debug!("No session token, request skipped");
            let published = ViewState {
                data: None,
                loading: false,
                error: Some(NOT_LOGGED_IN.to_string()),
            };
            self.tx.send_replace(published.clone());
            return published;
        }
        self.run(operation(token)).await
    }

    /// Back to the idle snapshot once the UI has consumed the result.
    pub fn reset(&self) {
        self.tx.send_replace(ViewState::default());
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &SessionStore {
        &self.session
    }
}
