// src/lib.rs

//! Mission Monitor uploader library

pub mod api;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
