//! Admin API abstractions.
//!
//! Every response of the admin API is wrapped in an envelope:
//!
//! ```text
//! { "code": 200, "data": { ... } }          # success
//! { "code": 500, "message": "reason" }      # failure
//! ```
//!
//! `code == 200` is the only success discriminant. The body parsers in this
//! module are shared by every [`AdminApi`] implementation so the envelope
//! rules live in one place.

#[cfg(test)]
pub mod fake;
pub mod http;

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{KpiConfig, MissionUpload};

// Re-export for convenience
pub use http::HttpAdminClient;

/// Application-level success code.
pub const SUCCESS_CODE: i64 = 200;

pub const MISSION_LIST_PATH: &str = "mission_list";
pub const LOAD_MISSION_PATH: &str = "load_mission";
pub const KPI_PATH: &str = "kpi";

/// A cache-rebuild endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTarget {
    /// Human-readable cache name
    pub name: &'static str,

    /// Path relative to the admin endpoint
    pub path: &'static str,
}

/// Caches rebuilt after every mutating upload, in call order.
pub const REFRESH_TARGETS: [CacheTarget; 4] = [
    CacheTarget {
        name: "mission kpi",
        path: "update_mission_kpi",
    },
    CacheTarget {
        name: "essential",
        path: "update_essential",
    },
    CacheTarget {
        name: "damage",
        path: "update_damage",
    },
    CacheTarget {
        name: "general",
        path: "update_general",
    },
];

/// Result of one cache rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheRefresh {
    pub target: CacheTarget,

    /// Server-reported rebuild duration
    pub time_ms: f64,
}

/// Operations of the admin API used by the upload workflows.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Absolute URL for a path relative to the admin endpoint.
    fn endpoint(&self, path: &str) -> String;

    /// Timestamps of the missions already recorded by the server.
    async fn mission_list(&self) -> Result<HashSet<i64>>;

    /// Upload a batch of mission logs.
    async fn load_mission(&self, batch: &[MissionUpload]) -> Result<()>;

    /// Upload the KPI document.
    async fn upload_kpi(&self, kpi: &KpiConfig) -> Result<()>;

    /// Rebuild one server-side cache.
    async fn update_cache(&self, target: &CacheTarget) -> Result<CacheRefresh>;
}

/// The `{code, message, data}` response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Parse a response body.
    pub fn from_body(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| AppError::invalid_response(format!("{e}: {body}")))
    }
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        self.code == Some(SUCCESS_CODE)
    }

    /// Require `code == 200`.
    pub fn ensure_ok(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(self.into_error())
        }
    }

    /// Reject an explicit non-200 code; an absent code passes.
    pub fn reject_error(self) -> Result<Self> {
        match self.code {
            Some(code) if code != SUCCESS_CODE => Err(self.into_error()),
            _ => Ok(self),
        }
    }

    /// Take the `data` member, which must be present.
    pub fn into_data(self) -> Result<T> {
        self.data
            .ok_or_else(|| AppError::invalid_response("missing key: data"))
    }

    fn into_error(self) -> AppError {
        match (self.code, self.message) {
            (Some(code), Some(message)) => AppError::server(format!("{message} (code {code})")),
            (None, Some(message)) => AppError::server(message),
            (Some(code), None) => AppError::server(format!("code {code}")),
            (None, None) => AppError::invalid_response("missing key: code"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshData {
    time_ms: f64,
}

/// Interpret a `mission_list` response body.
pub fn parse_mission_list(body: &str) -> Result<HashSet<i64>> {
    let timestamps = Envelope::<Vec<i64>>::from_body(body)?
        .reject_error()?
        .into_data()?;
    Ok(timestamps.into_iter().collect())
}

/// Interpret the response of a mutating call.
pub fn parse_ack(body: &str) -> Result<()> {
    Envelope::<serde_json::Value>::from_body(body)?.ensure_ok()?;
    Ok(())
}

/// Interpret a cache rebuild response body.
pub fn parse_refresh(body: &str, target: &CacheTarget) -> Result<CacheRefresh> {
    let data = Envelope::<RefreshData>::from_body(body)?
        .ensure_ok()?
        .into_data()?;
    Ok(CacheRefresh {
        target: *target,
        time_ms: data.time_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_list_reads_data() {
        let set = parse_mission_list(r#"{"code":200,"data":[100,300]}"#).unwrap();
        assert_eq!(set, HashSet::from([100, 300]));
    }

    #[test]
    fn mission_list_accepts_missing_code() {
        let set = parse_mission_list(r#"{"data":[]}"#).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn mission_list_without_data_is_fatal() {
        let err = parse_mission_list(r#"{"code":500}"#).unwrap_err();
        assert!(matches!(err, AppError::Server(_)));

        let err = parse_mission_list(r#"{"message":"nope"}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidResponse(_)));
    }

    #[test]
    fn non_json_body_is_invalid_response() {
        let err = parse_mission_list("<html>502</html>").unwrap_err();
        assert!(matches!(err, AppError::InvalidResponse(_)));
        assert!(err.to_string().contains("<html>502</html>"));
    }

    #[test]
    fn ack_requires_code_200() {
        assert!(parse_ack(r#"{"code":200}"#).is_ok());

        let err = parse_ack(r#"{"code":400,"message":"bad log"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Server returned an error: bad log (code 400)"
        );
        assert!(parse_ack(r#"{}"#).is_err());
    }

    #[test]
    fn refresh_reports_duration() {
        let target = REFRESH_TARGETS[2];
        let refresh = parse_refresh(r#"{"code":200,"data":{"time_ms":42}}"#, &target).unwrap();
        assert_eq!(refresh.target, target);
        assert_eq!(refresh.time_ms, 42.0);
    }

    #[test]
    fn refresh_without_duration_is_fatal() {
        let target = REFRESH_TARGETS[0];
        assert!(parse_refresh(r#"{"code":200}"#, &target).is_err());
        assert!(parse_refresh(r#"{"code":503,"data":{"time_ms":1}}"#, &target).is_err());
    }

    #[test]
    fn refresh_targets_are_in_fixed_order() {
        let paths: Vec<_> = REFRESH_TARGETS.iter().map(|t| t.path).collect();
        assert_eq!(
            paths,
            [
                "update_mission_kpi",
                "update_essential",
                "update_damage",
                "update_general",
            ]
        );
    }
}
