// src/error.rs

//! Unified error handling for the uploader.

use std::error::Error as _;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for uploader operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Every variant is fatal: the binary reports it and exits with status 1.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation on a known file or directory failed
    #[error("Cannot read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV reading failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Regex compilation failed
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// None of the candidate encodings could decode a log file
    #[error("Cannot decode {} using {tried}", .path.display())]
    Decode { path: PathBuf, tried: String },

    /// Malformed line or row in an input table
    #[error("Cannot parse {file} at line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// Response body was not a valid envelope
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Envelope carried a non-200 code
    #[error("Server returned an error: {0}")]
    Server(String),
}

impl AppError {
    /// Render the error followed by every underlying cause.
    ///
    /// Transport errors keep the actual reason in their `source()` chain
    /// rather than in `Display`.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            // Variants that embed their source already show it.
            if !report.ends_with(&cause_text) {
                report.push_str(": ");
                report.push_str(&cause_text);
            }
            source = cause.source();
        }
        report
    }

    /// Create an I/O error bound to a path.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an input table parse error.
    pub fn parse(file: impl Into<String>, line: usize, message: impl fmt::Display) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.to_string(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl fmt::Display) -> Self {
        Self::InvalidResponse(message.to_string())
    }

    /// Create a server error from the envelope message.
    pub fn server(message: impl fmt::Display) -> Self {
        Self::Server(message.to_string())
    }
}
