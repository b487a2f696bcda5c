//! Utility functions and helpers.

pub mod http;

use chrono::DateTime;

/// Join a path onto the admin endpoint with exactly one `/` between them.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Render a mission timestamp (Unix seconds) for log output.
pub fn describe_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
