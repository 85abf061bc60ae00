//! Authentication and session management.
//!
//! - [`SessionStore`]: shared handle over the current bearer token
//! - [`AuthService`]: login, signup and logout; the store's only writer

pub mod service;
pub mod session;

pub use service::AuthService;
pub use session::{Role, Session, SessionStore};
