//! rollcall - client library and CLI for an attendance tracking service
//!
//! This library exposes modules for use in integration tests and by
//! front ends that render the published view state.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod traits;
pub mod view_state;

pub use client::{Client, StartupError};
pub use error::{ApiError, ApiResult};
