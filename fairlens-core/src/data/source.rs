//! Row sources — the asynchronous boundary that supplies raw batches.
//!
//! Everything downstream of a loaded [`RawBatch`] is synchronous and
//! pure; sources are the only place I/O happens.

use crate::data::batch::{RawBatch, parse_delimited};
use crate::error::FairnessError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata about where a batch came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub source_type: String,
    pub location: String,
    pub accessed_at: chrono::DateTime<chrono::Utc>,
}

/// Trait for loading raw rows from somewhere.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Load rows, optionally limiting how many are kept.
    async fn load(&self, limit: Option<usize>) -> Result<RawBatch, FairnessError>;

    /// Metadata about this source.
    fn source_info(&self) -> SourceInfo;
}

/// Delimited text file on disk.
pub struct CsvSource {
    pub path: PathBuf,
    pub delimiter: char,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: ',',
        }
    }
}

#[async_trait]
impl RowSource for CsvSource {
    async fn load(&self, limit: Option<usize>) -> Result<RawBatch, FairnessError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut batch = parse_delimited(&content, self.delimiter);
        if batch.columns.is_empty() {
            return Err(FairnessError::dataset(format!(
                "empty CSV file: {}",
                self.path.display()
            )));
        }
        if let Some(max) = limit {
            batch.rows.truncate(max);
        }
        Ok(batch)
    }

    fn source_info(&self) -> SourceInfo {
        SourceInfo {
            source_type: "csv".to_string(),
            location: self.path.display().to_string(),
            accessed_at: chrono::Utc::now(),
        }
    }
}

/// JSON file holding an array of objects, one per row.
pub struct JsonSource {
    pub path: PathBuf,
}

#[async_trait]
impl RowSource for JsonSource {
    async fn load(&self, limit: Option<usize>) -> Result<RawBatch, FairnessError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let items = match value {
            serde_json::Value::Array(arr) => arr,
            _ => {
                return Err(FairnessError::dataset(
                    "JSON dataset must be an array of objects",
                ));
            }
        };

        let items: Vec<serde_json::Value> = match limit {
            Some(max) => items.into_iter().take(max).collect(),
            None => items,
        };

        Ok(batch_from_objects(&items))
    }

    fn source_info(&self) -> SourceInfo {
        SourceInfo {
            source_type: "json".to_string(),
            location: self.path.display().to_string(),
            accessed_at: chrono::Utc::now(),
        }
    }
}

/// Delimited text fetched over HTTP, the way the dashboard originally
/// loaded its dataset.
pub struct HttpCsvSource {
    pub url: String,
    pub delimiter: char,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            delimiter: ',',
        }
    }
}

#[async_trait]
impl RowSource for HttpCsvSource {
    async fn load(&self, limit: Option<usize>) -> Result<RawBatch, FairnessError> {
        let response = reqwest::get(&self.url).await?;
        if !response.status().is_success() {
            return Err(FairnessError::dataset(format!(
                "dataset fetch failed with status {}",
                response.status()
            )));
        }
        let content = response.text().await?;
        let mut batch = parse_delimited(&content, self.delimiter);
        if batch.columns.is_empty() {
            return Err(FairnessError::dataset(format!(
                "empty response from {}",
                self.url
            )));
        }
        if let Some(max) = limit {
            batch.rows.truncate(max);
        }
        Ok(batch)
    }

    fn source_info(&self) -> SourceInfo {
        SourceInfo {
            source_type: "http_csv".to_string(),
            location: self.url.clone(),
            accessed_at: chrono::Utc::now(),
        }
    }
}

/// Build a column-oriented batch from JSON objects. Column order
/// follows the first object; later objects fill missing keys with
/// null.
fn batch_from_objects(items: &[serde_json::Value]) -> RawBatch {
    let columns: Vec<String> = match items.first() {
        Some(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
        _ => return RawBatch::empty(),
    };

    let rows: Vec<Vec<serde_json::Value>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|col| item.get(col).cloned().unwrap_or(serde_json::Value::Null))
                .collect()
        })
        .collect();

    RawBatch { columns, rows }
}
