//! Dataset ingestion: raw rows → normalized applicant records.
//!
//! Ingestion has partial-failure semantics: one malformed row never
//! invalidates the batch. Rows missing a required field are dropped
//! and reported; optional fields fall back to documented defaults.

use crate::config::FairlensConfig;
use crate::data::batch::RawBatch;
use crate::data::record::{ApplicantRecord, risk_score};
use serde::{Deserialize, Serialize};

/// Fields a row must supply to produce a record.
const REQUIRED_FIELDS: &[&str] = &[
    "age",
    "gender",
    "race",
    "income",
    "credit_score",
    "loan_amount",
];

/// String tokens accepted as a positive `approved` outcome.
///
/// Anything else — including an absent column — is `false`. The
/// mapping is deliberately explicit: silently flipping an ambiguous
/// outcome changes every downstream disparity number.
const TRUTHY_TOKENS: &[&str] = &["true", "1", "yes"];

/// A recoverable, per-record ingestion problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowError {
    /// Zero-based index of the row in the input batch.
    pub row: usize,
    /// Offending field, when the problem is field-specific.
    pub field: Option<String>,
    pub reason: String,
}

/// The outcome of ingesting one batch: parsed records alongside the
/// row-level errors encountered. An empty input yields an empty
/// report; the caller decides whether that is itself an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub records: Vec<ApplicantRecord>,
    pub errors: Vec<RowError>,
}

impl IngestReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.errors.is_empty()
    }
}

/// Ingest a raw batch into normalized records.
///
/// Required fields: `age`, `gender`, `race`, `income`, `credit_score`,
/// `loan_amount`. Optional with defaults: `debt_to_income` (config,
/// 0.0), `loan_term` (config, 30), `id` (sequential `LOAN-#####`),
/// `approved` (false unless a truthy token). Unrecognized extra
/// columns are ignored. Performs no I/O.
pub fn ingest(batch: &RawBatch, config: &FairlensConfig) -> IngestReport {
    let mut report = IngestReport::default();

    let missing_columns: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| batch.column_index(f).is_none())
        .collect();
    if !missing_columns.is_empty() && !batch.rows.is_empty() {
        tracing::warn!(?missing_columns, "required columns absent from header");
    }

    for (index, row) in batch.rows.iter().enumerate() {
        match parse_row(batch, row, index, config, &mut report.errors) {
            Some(record) => report.records.push(record),
            None => {
                tracing::warn!(row = index, "dropped malformed row");
            }
        }
    }

    tracing::debug!(
        records = report.records.len(),
        errors = report.errors.len(),
        "ingest complete"
    );
    report
}

/// Parse one row. Returns `None` (after recording a `RowError`) when
/// a required field is missing or unparsable; problems in optional
/// fields are recorded but the row is kept with the default value.
fn parse_row(
    batch: &RawBatch,
    row: &[serde_json::Value],
    index: usize,
    config: &FairlensConfig,
    errors: &mut Vec<RowError>,
) -> Option<ApplicantRecord> {
    let cell = |name: &str| -> Option<&serde_json::Value> {
        batch.column_index(name).and_then(|i| row.get(i))
    };

    let mut required_err = |field: &str, reason: String| {
        errors.push(RowError {
            row: index,
            field: Some(field.to_string()),
            reason,
        });
    };

    macro_rules! require {
        ($field:expr, $parsed:expr) => {
            match $parsed {
                Some(v) => v,
                None => {
                    required_err($field, format!("missing or unparsable `{}`", $field));
                    return None;
                }
            }
        };
    }

    let age = require!("age", cell("age").and_then(as_u32));
    let gender = require!("gender", cell("gender").and_then(as_category));
    let race = require!("race", cell("race").and_then(as_category));
    let income = require!("income", cell("income").and_then(as_non_negative_f64));
    let credit_score = require!("credit_score", cell("credit_score").and_then(as_u32));
    let loan_amount = require!(
        "loan_amount",
        cell("loan_amount").and_then(as_non_negative_f64)
    );

    // Optional fields: record the problem but keep the row.
    let debt_to_income = match cell("debt_to_income") {
        None => config.ingest.debt_to_income,
        Some(v) if is_blank(v) => config.ingest.debt_to_income,
        Some(v) => match as_non_negative_f64(v) {
            Some(dti) => dti,
            None => {
                errors.push(RowError {
                    row: index,
                    field: Some("debt_to_income".to_string()),
                    reason: "unparsable `debt_to_income`, default applied".to_string(),
                });
                config.ingest.debt_to_income
            }
        },
    };

    let loan_term = match cell("loan_term") {
        None => config.ingest.loan_term,
        Some(v) if is_blank(v) => config.ingest.loan_term,
        Some(v) => match as_u32(v).filter(|t| *t > 0) {
            Some(term) => term,
            None => {
                errors.push(RowError {
                    row: index,
                    field: Some("loan_term".to_string()),
                    reason: "unparsable `loan_term`, default applied".to_string(),
                });
                config.ingest.loan_term
            }
        },
    };

    let id = match cell("id").and_then(as_text) {
        Some(id) => id,
        None => format!("LOAN-{index:05}"),
    };

    let approved = cell("approved").map(is_truthy).unwrap_or(false);

    let risk_score = risk_score(
        &config.risk,
        Some(credit_score),
        Some(debt_to_income),
        Some(loan_amount),
        Some(income),
    );

    Some(ApplicantRecord {
        id,
        age,
        gender,
        race,
        income,
        credit_score,
        debt_to_income,
        loan_amount,
        loan_term,
        approved,
        risk_score,
    })
}

fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Non-empty string cell, trimmed and lowercased.
fn as_category(value: &serde_json::Value) -> Option<String> {
    as_text(value).map(|s| s.to_lowercase())
}

/// Non-empty string cell, trimmed, case preserved.
fn as_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => None,
    }
}

fn as_u32(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn as_non_negative_f64(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_i64() == Some(1),
        serde_json::Value::String(s) => {
            let s = s.trim().to_lowercase();
            TRUTHY_TOKENS.contains(&s.as_str())
        }
        _ => false,
    }
}
