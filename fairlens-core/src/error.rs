//! Error types for the fairlens-core crate.

use thiserror::Error;

/// Top-level error type for fairness analysis operations.
///
/// Row-level problems during ingestion are not errors of this type;
/// they are collected as [`crate::data::ingest::RowError`] values in
/// the ingest report. Insufficient data for a disparity computation
/// is reported as a flag on the result, never as an `Err`.
#[derive(Debug, Error)]
pub enum FairnessError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FairnessError {
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
