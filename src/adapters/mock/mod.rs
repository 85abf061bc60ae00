//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemorySession`] - In-memory session storage

pub mod http;
pub mod session;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use session::InMemorySession;
