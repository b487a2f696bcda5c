//! Admin API over HTTP.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::api::{
    AdminApi, CacheRefresh, CacheTarget, KPI_PATH, LOAD_MISSION_PATH, MISSION_LIST_PATH, parse_ack,
    parse_mission_list, parse_refresh,
};
use crate::error::Result;
use crate::models::{Config, KpiConfig, MissionUpload};
use crate::utils::endpoint_url;
use crate::utils::http::create_client;

/// HTTP-backed admin API client.
///
/// Status codes are not inspected; the envelope `code` decides success.
#[derive(Clone)]
pub struct HttpAdminClient {
    client: Client,
    base_url: String,
}

impl HttpAdminClient {
    /// Create a client for the given admin endpoint.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Create a client from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = create_client(&config.http)?;
        Ok(Self::new(client, &config.admin_endpoint))
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.endpoint(path);
        let response = self.client.get(&url).send().await?;
        log::debug!("GET {} -> {}", url, response.status());
        Ok(response.text().await?)
    }

    async fn post_text<B>(&self, path: &str, body: &B) -> Result<String>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(path);
        let response = self.client.post(&url).json(body).send().await?;
        log::debug!("POST {} -> {}", url, response.status());
        Ok(response.text().await?)
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    async fn mission_list(&self) -> Result<HashSet<i64>> {
        let body = self.get_text(MISSION_LIST_PATH).await?;
        parse_mission_list(&body)
    }

    async fn load_mission(&self, batch: &[MissionUpload]) -> Result<()> {
        let body = self.post_text(LOAD_MISSION_PATH, batch).await?;
        parse_ack(&body)
    }

    async fn upload_kpi(&self, kpi: &KpiConfig) -> Result<()> {
        let body = self.post_text(KPI_PATH, kpi).await?;
        parse_ack(&body)
    }

    async fn update_cache(&self, target: &CacheTarget) -> Result<CacheRefresh> {
        let body = self.get_text(target.path).await?;
        parse_refresh(&body, target)
    }
}
