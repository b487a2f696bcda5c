// src/pipeline/mission.rs

//! Mission log upload pipeline.
//!
//! 1. Fetch the already-uploaded timestamps from the server
//! 2. Select the log files the server has not seen
//! 3. Decode them, ascending by timestamp
//! 4. Upload them as one batch
//! 5. Refresh every server-side cache

use std::path::Path;

use crate::api::{AdminApi, CacheRefresh, LOAD_MISSION_PATH, MISSION_LIST_PATH, REFRESH_TARGETS};
use crate::error::Result;
use crate::models::{MissionUpload, PendingMission};
use crate::pipeline::refresh_all;
use crate::services::log_reader::read_mission;
use crate::services::resolver::{MissionFileNames, scan_log_dir};

/// Outcome of a mission upload run.
#[derive(Debug)]
pub struct MissionUploadSummary {
    /// Number of missions sent to the server
    pub uploaded: usize,
    pub refreshed: Vec<CacheRefresh>,
}

/// Read pending missions in ascending timestamp order.
///
/// Any unreadable file aborts the whole batch.
pub async fn read_batch(
    mut pending: Vec<PendingMission>,
    names: &MissionFileNames,
) -> Result<Vec<MissionUpload>> {
    pending.sort_by_key(|mission| mission.timestamp);

    let mut batch = Vec::with_capacity(pending.len());
    for mission in &pending {
        batch.push(read_mission(mission, names).await?);
    }
    Ok(batch)
}

/// Run the mission upload workflow against `log_dir`.
pub async fn run_mission_upload(
    api: &dyn AdminApi,
    log_dir: &Path,
) -> Result<MissionUploadSummary> {
    let names = MissionFileNames::new()?;

    log::info!("log path: {}", log_dir.display());
    log::info!(
        "already uploaded endpoint: {}",
        api.endpoint(MISSION_LIST_PATH)
    );
    log::info!("upload endpoint: {}", api.endpoint(LOAD_MISSION_PATH));

    log::info!("Fetching already uploaded data...");
    let uploaded = api.mission_list().await?;
    log::info!("Server has {} missions", uploaded.len());

    log::info!("Reading log files...");
    let pending = scan_log_dir(log_dir, &names, &uploaded).await?;
    log::info!("To load mission count: {}", pending.len());

    let batch = read_batch(pending, &names).await?;

    // An empty batch is still posted.
    log::info!("Uploading...");
    api.load_mission(&batch).await?;
    log::info!("Success!");

    let refreshed = refresh_all(api, &REFRESH_TARGETS).await?;

    Ok(MissionUploadSummary {
        uploaded: batch.len(),
        refreshed,
    })
}
