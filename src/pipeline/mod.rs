//! Pipeline entry points for upload operations.
//!
//! - `run_mission_upload`: Upload new mission logs
//! - `run_kpi_upload`: Upload KPI weight tables
//! - `refresh_all`: Rebuild server-side caches after any upload

pub mod kpi;
pub mod mission;
pub mod refresh;

pub use kpi::run_kpi_upload;
pub use mission::{MissionUploadSummary, run_mission_upload};
pub use refresh::refresh_all;
