// src/models/mod.rs

//! Domain models for the uploader.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod kpi;
mod mission;

// Re-export all public types
pub use config::{Config, HttpConfig};
pub use kpi::{CharacterKpi, DEFAULT_PRIORITY_KEY, KPI_VERSION, KpiConfig, PriorityTable};
pub use mission::{MissionUpload, PendingMission};
