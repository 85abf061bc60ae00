//! `--version` output.

/// The current version of rollcall, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("rollcall {}", VERSION)
}
