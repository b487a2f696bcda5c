// src/services/mod.rs

//! Business logic services.
//!
//! - `resolver`: Select mission logs the server has not recorded
//! - `log_reader`: Decode mission logs into upload entries
//! - `kpi`: Build the KPI document from local tables

pub mod kpi;
pub mod log_reader;
pub mod resolver;

pub use kpi::load_kpi_config;
pub use log_reader::{read_log, read_mission};
pub use resolver::{MissionFileNames, scan_log_dir};
