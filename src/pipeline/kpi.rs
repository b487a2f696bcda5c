// src/pipeline/kpi.rs

//! KPI upload pipeline.

use std::path::Path;

use crate::api::{AdminApi, CacheRefresh, KPI_PATH, REFRESH_TARGETS};
use crate::error::Result;
use crate::pipeline::refresh_all;
use crate::services::kpi::load_kpi_config;

/// Build the KPI document, upload it and refresh every cache.
pub async fn run_kpi_upload(
    api: &dyn AdminApi,
    kpi_data: &Path,
    entity_list: &Path,
) -> Result<Vec<CacheRefresh>> {
    let kpi = load_kpi_config(kpi_data, entity_list)?;

    log::info!("kpi endpoint: {}", api.endpoint(KPI_PATH));
    log::info!("Uploading kpi...");
    api.upload_kpi(&kpi).await?;
    log::info!("Success!");

    refresh_all(api, &REFRESH_TARGETS).await
}
