//! Configuration types for the fairlens-core crate.
//!
//! All analysis parameters are explicit configuration passed into
//! calls; the ingestor and engine hold no ambient session state.

use crate::error::FairnessError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level analysis configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FairlensConfig {
    /// Risk-score formula weights.
    #[serde(default)]
    pub risk: RiskWeights,
    /// Fairness classification thresholds.
    #[serde(default)]
    pub fairness: FairnessThresholds,
    /// Defaults applied to optional fields during ingestion.
    #[serde(default)]
    pub ingest: IngestDefaults,
}

impl FairlensConfig {
    /// Load a configuration overlay from a JSON file. Missing keys
    /// fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self, FairnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FairnessError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            FairnessError::config(format!("invalid config {}: {e}", path.display()))
        })
    }
}

/// Named weights of the risk-score formula.
///
/// The exact values are a policy choice, not a derived quantity:
/// swapping them changes scoring without touching ingestion logic.
/// Lower scores are better; output is clamped to `[0, 100]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWeights {
    /// Starting score before any term is applied.
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    /// Share of the 100-point scale driven by credit standing.
    #[serde(default = "default_credit_weight")]
    pub credit_weight: f64,
    /// Share driven by the debt-to-income ratio.
    #[serde(default = "default_dti_weight")]
    pub dti_weight: f64,
    /// Share driven by the loan-to-income ratio.
    #[serde(default = "default_lti_weight")]
    pub lti_weight: f64,
    /// Credit score treated as the top of the scale.
    #[serde(default = "default_reference_credit")]
    pub reference_credit_score: u32,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            credit_weight: default_credit_weight(),
            dti_weight: default_dti_weight(),
            lti_weight: default_lti_weight(),
            reference_credit_score: default_reference_credit(),
        }
    }
}

fn default_base_score() -> f64 {
    50.0
}

fn default_credit_weight() -> f64 {
    0.4
}

fn default_dti_weight() -> f64 {
    0.25
}

fn default_lti_weight() -> f64 {
    0.25
}

fn default_reference_credit() -> u32 {
    850
}

/// Thresholds used when classifying bias metrics and disparities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessThresholds {
    /// Fraction of a metric's threshold below which the status is
    /// `Fail` rather than `Warn`.
    #[serde(default = "default_warn_margin")]
    pub warn_margin: f64,
    /// Disparity above which an attribute is considered concerning.
    #[serde(default = "default_disparity_threshold")]
    pub disparity_threshold: f64,
}

impl Default for FairnessThresholds {
    fn default() -> Self {
        Self {
            warn_margin: default_warn_margin(),
            disparity_threshold: default_disparity_threshold(),
        }
    }
}

fn default_warn_margin() -> f64 {
    0.8
}

fn default_disparity_threshold() -> f64 {
    0.1
}

/// Defaults applied to optional fields during ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestDefaults {
    /// Loan term assumed when the column is absent or empty.
    #[serde(default = "default_loan_term")]
    pub loan_term: u32,
    /// Debt-to-income ratio assumed when the column is absent or empty.
    #[serde(default)]
    pub debt_to_income: f64,
}

impl Default for IngestDefaults {
    fn default() -> Self {
        Self {
            loan_term: default_loan_term(),
            debt_to_income: 0.0,
        }
    }
}

fn default_loan_term() -> u32 {
    30
}
