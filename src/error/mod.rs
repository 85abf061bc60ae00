//! Error handling for the attendance client.
//!
//! - [`ApiError`]: the single failure type of every backend operation
//! - [`ErrorCategory`]: coarse classification for messages and hints
//! - [`ApiResult`]: `Result<T, ApiError>`
//!
//! Session persistence errors live in [`crate::traits::SessionError`] and
//! convert into [`ApiError::Unknown`] when they cross the auth boundary.
//!
//! # Example
//!
//! ```ignore
//! match repo.get_dashboard_classes(&token).await {
//!     Ok(classes) => render(classes),
//!     Err(err) => {
//!         eprintln!("{}", err.user_message());
//!         eprintln!("{}", err.category().recovery_hint());
//!     }
//! }
//! ```

mod api;
mod category;

pub use api::{ApiError, GENERIC_FAILURE_MESSAGE};
pub use category::ErrorCategory;

/// Type alias for Results using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
