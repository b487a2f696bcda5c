// src/services/resolver.rs

//! Ingestion set resolution.
//!
//! Finds the mission log files in the log directory whose timestamp the
//! server has not recorded yet.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::PendingMission;
use crate::utils::describe_timestamp;

/// File name rules for mission logs.
pub struct MissionFileNames {
    candidate: Regex,
    label: Regex,
}

impl MissionFileNames {
    pub fn new() -> Result<Self> {
        Ok(Self {
            candidate: Regex::new(r"^.+_([0-9]+)\.txt$")?,
            label: Regex::new(r"MissionMonitor_([0-9].*)\.txt$")?,
        })
    }

    /// Integer timestamp of a candidate log file, `None` for other files.
    pub fn timestamp(&self, file_name: &str) -> Option<i64> {
        let digits = self.candidate.captures(file_name)?.get(1)?.as_str();
        match digits.parse() {
            Ok(timestamp) => Some(timestamp),
            Err(e) => {
                log::warn!(
                    "Skipping {}: timestamp {} out of range ({})",
                    file_name,
                    digits,
                    e
                );
                None
            }
        }
    }

    /// Upload label of a log file.
    ///
    /// The label keeps everything between `MissionMonitor_` and `.txt`, so it
    /// may carry more than the bare timestamp. Files without that prefix fall
    /// back to the timestamp digits.
    pub fn label(&self, file_name: &str) -> Option<String> {
        self.label
            .captures(file_name)
            .or_else(|| self.candidate.captures(file_name))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Keep the candidate log files whose timestamp is not in `uploaded`.
///
/// Order follows `paths`.
pub fn select_pending(
    paths: impl IntoIterator<Item = PathBuf>,
    names: &MissionFileNames,
    uploaded: &HashSet<i64>,
) -> Vec<PendingMission> {
    paths
        .into_iter()
        .filter_map(|path| {
            let timestamp = names.timestamp(path.file_name()?.to_str()?)?;
            if uploaded.contains(&timestamp) {
                log::debug!("Already uploaded: {}", path.display());
                return None;
            }
            log::debug!(
                "Pending: {} ({})",
                path.display(),
                describe_timestamp(timestamp)
            );
            Some(PendingMission { timestamp, path })
        })
        .collect()
}

/// List the log directory and select the pending mission logs.
pub async fn scan_log_dir(
    log_dir: &Path,
    names: &MissionFileNames,
    uploaded: &HashSet<i64>,
) -> Result<Vec<PendingMission>> {
    let mut entries = tokio::fs::read_dir(log_dir)
        .await
        .map_err(|e| AppError::file(log_dir, e))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file(log_dir, e))?
    {
        paths.push(entry.path());
    }

    Ok(select_pending(paths, names, uploaded))
}
