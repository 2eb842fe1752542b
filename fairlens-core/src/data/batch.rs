//! Untyped tabular batches — the raw input to ingestion.

use serde::{Deserialize, Serialize};

/// A batch of raw rows keyed by column position.
///
/// Cells are untyped `serde_json::Value`s; type coercion happens in
/// [`crate::data::ingest`]. Unrecognized extra columns are carried
/// along and ignored downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBatch {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl RawBatch {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of a column by header name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Parse delimited text (header line first) into a raw batch.
///
/// Cells are kept as strings; quotes and surrounding whitespace are
/// stripped. Empty lines are skipped.
pub fn parse_delimited(content: &str, delimiter: char) -> RawBatch {
    let mut lines = content.lines();

    let columns: Vec<String> = match lines.next() {
        Some(header) => header
            .split(delimiter)
            .map(|s| s.trim().trim_matches('"').to_string())
            .collect(),
        None => return RawBatch::empty(),
    };

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row: Vec<serde_json::Value> = line
            .split(delimiter)
            .map(|s| serde_json::Value::String(s.trim().trim_matches('"').to_string()))
            .collect();
        rows.push(row);
    }

    RawBatch { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_batch_empty() {
        let batch = RawBatch::empty();
        assert_eq!(batch.row_count(), 0);
        assert_eq!(batch.column_count(), 0);
        assert_eq!(batch.column_index("age"), None);
    }

    #[test]
    fn test_parse_delimited() {
        let batch = parse_delimited("age,gender\n34,male\n51,\"female\"\n", ',');
        assert_eq!(batch.columns, vec!["age", "gender"]);
        assert_eq!(batch.row_count(), 2);
        assert_eq!(batch.rows[1][1], serde_json::json!("female"));
        assert_eq!(batch.column_index("gender"), Some(1));
    }

    #[test]
    fn test_parse_delimited_skips_blank_lines() {
        let batch = parse_delimited("a,b\n1,2\n\n3,4\n", ',');
        assert_eq!(batch.row_count(), 2);
    }

    #[test]
    fn test_parse_delimited_empty_input() {
        let batch = parse_delimited("", ',');
        assert_eq!(batch.column_count(), 0);
        assert_eq!(batch.row_count(), 0);
    }
}
