//! In-memory admin API for workflow tests.
//!
//! Responses are produced as JSON bodies and run through the same parsers
//! as the HTTP client.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::api::{
    AdminApi, CacheRefresh, CacheTarget, KPI_PATH, LOAD_MISSION_PATH, MISSION_LIST_PATH, parse_ack,
    parse_mission_list, parse_refresh,
};
use crate::error::Result;
use crate::models::{KpiConfig, MissionUpload};
use crate::utils::endpoint_url;

pub const FAKE_ENDPOINT: &str = "http://h";

#[derive(Default)]
pub struct FakeAdminApi {
    uploaded: Mutex<HashSet<i64>>,
    mission_list_body: Option<String>,
    upload_body: Option<String>,
    failing_cache: Option<&'static str>,
    calls: Mutex<Vec<String>>,
    batches: Mutex<Vec<Vec<MissionUpload>>>,
    kpi_uploads: Mutex<Vec<KpiConfig>>,
}

impl FakeAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uploaded(timestamps: impl IntoIterator<Item = i64>) -> Self {
        Self {
            uploaded: Mutex::new(timestamps.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Answer `mission_list` with a fixed body.
    pub fn mission_list_body(mut self, body: &str) -> Self {
        self.mission_list_body = Some(body.to_string());
        self
    }

    /// Answer `load_mission` and `kpi` with a fixed body.
    pub fn upload_body(mut self, body: &str) -> Self {
        self.upload_body = Some(body.to_string());
        self
    }

    /// Make the cache rebuild at `path` fail.
    pub fn fail_cache(mut self, path: &'static str) -> Self {
        self.failing_cache = Some(path);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn batches(&self) -> Vec<Vec<MissionUpload>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn kpi_uploads(&self) -> Vec<KpiConfig> {
        self.kpi_uploads.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn ack_body(&self) -> String {
        self.upload_body
            .clone()
            .unwrap_or_else(|| json!({ "code": 200 }).to_string())
    }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    fn endpoint(&self, path: &str) -> String {
        endpoint_url(FAKE_ENDPOINT, path)
    }

    async fn mission_list(&self) -> Result<HashSet<i64>> {
        self.record(format!("GET {MISSION_LIST_PATH}"));
        let body = match &self.mission_list_body {
            Some(body) => body.clone(),
            None => {
                let mut data: Vec<i64> = self.uploaded.lock().unwrap().iter().copied().collect();
                data.sort_unstable();
                json!({ "code": 200, "data": data }).to_string()
            }
        };
        parse_mission_list(&body)
    }

    async fn load_mission(&self, batch: &[MissionUpload]) -> Result<()> {
        self.record(format!("POST {LOAD_MISSION_PATH}"));
        parse_ack(&self.ack_body())?;

        let mut uploaded = self.uploaded.lock().unwrap();
        uploaded.extend(batch.iter().filter_map(|m| m.label.parse::<i64>().ok()));
        self.batches.lock().unwrap().push(batch.to_vec());
        Ok(())
    }

    async fn upload_kpi(&self, kpi: &KpiConfig) -> Result<()> {
        self.record(format!("POST {KPI_PATH}"));
        parse_ack(&self.ack_body())?;
        self.kpi_uploads.lock().unwrap().push(kpi.clone());
        Ok(())
    }

    async fn update_cache(&self, target: &CacheTarget) -> Result<CacheRefresh> {
        self.record(format!("GET {}", target.path));
        let body = if self.failing_cache == Some(target.path) {
            json!({ "code": 500, "message": "cache rebuild failed" })
        } else {
            json!({ "code": 200, "data": { "time_ms": 12 } })
        };
        parse_refresh(&body.to_string(), target)
    }
}
