//! Domain models and their wire representations.
//!
//! Each submodule pairs the `…Dto` types the server speaks with the
//! domain types handed to the rest of the crate. Conversion happens once,
//! at the repository boundary, and never fails on a missing optional
//! field: strings fall back to [`NOT_AVAILABLE`], lists to empty.

pub mod attendance;
pub mod auth;
pub mod class;
pub mod qr;

pub use attendance::{
    AttendanceHistory, ClassInfo, HistoryEntry, OverallStats, RollCallRow, ScanResult,
    StudentAttendanceHistory, StudentAttendanceRecord, StudentStat,
};
pub use auth::AuthResult;
pub use class::ClassItem;
pub use qr::QrIssuance;

use serde::{Deserialize, Deserializer};

/// Placeholder for string fields the server left out.
pub const NOT_AVAILABLE: &str = "N/A";

pub(crate) fn or_not_available(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Drop repeated entries, keeping the first occurrence of each.
pub(crate) fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Clamp a percentage into 0..=100, mapping NaN to 0.
pub(crate) fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Negative counts become zero.
pub(crate) fn non_negative(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Helper to deserialize an optional id given as either string or integer.
pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    }))
}
