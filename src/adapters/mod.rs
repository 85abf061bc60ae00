//! Concrete implementations of the trait abstractions in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`FileSessionProvider`] - File-based session storage
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_session;
pub mod mock;
pub mod reqwest_http;

pub use file_session::FileSessionProvider;
pub use mock::{InMemorySession, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
