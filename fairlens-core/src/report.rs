//! Aggregate fairness report consumed by the presentation layer.

use crate::config::FairlensConfig;
use crate::data::record::{ApplicantRecord, ProtectedAttribute};
use crate::metrics::bias::{BiasMetric, MetricStatus, rate_threshold_status};
use crate::metrics::disparity::{DisparityMetric, compute_distribution, overall_approval_rate};
use crate::metrics::importance::{FeatureImportance, ranked};
use serde::{Deserialize, Serialize};

/// Standard performance figures for one model. Supplied externally;
/// passed through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub auc: f64,
}

/// Original vs debiased model performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub original: ModelPerformance,
    pub debiased: ModelPerformance,
}

impl ModelComparison {
    /// Per-metric change from original to debiased.
    pub fn delta(&self) -> ModelPerformance {
        ModelPerformance {
            accuracy: self.debiased.accuracy - self.original.accuracy,
            precision: self.debiased.precision - self.original.precision,
            recall: self.debiased.recall - self.original.recall,
            f1_score: self.debiased.f1_score - self.original.f1_score,
            auc: self.debiased.auc - self.original.auc,
        }
    }
}

/// A bias metric together with its classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedMetric {
    #[serde(flatten)]
    pub metric: BiasMetric,
    pub status: MetricStatus,
}

/// Everything the dashboard needs for one record set, in a single
/// serializable structure. Recomputed on demand; holds no state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessReport {
    pub total_records: usize,
    pub overall_approval_rate: f64,
    pub disparities: Vec<DisparityMetric>,
    pub bias_metrics: Vec<ClassifiedMetric>,
    pub feature_importance: Vec<FeatureImportance>,
}

impl FairnessReport {
    pub fn build(
        records: &[ApplicantRecord],
        attributes: &[ProtectedAttribute],
        bias_metrics: &[BiasMetric],
        features: &[FeatureImportance],
        config: &FairlensConfig,
    ) -> Self {
        let disparities = attributes
            .iter()
            .map(|&attr| compute_distribution(records, attr))
            .collect();

        let bias_metrics = bias_metrics
            .iter()
            .map(|metric| ClassifiedMetric {
                metric: metric.clone(),
                status: rate_threshold_status(metric, config.fairness.warn_margin),
            })
            .collect();

        Self {
            total_records: records.len(),
            overall_approval_rate: overall_approval_rate(records),
            disparities,
            bias_metrics,
            feature_importance: ranked(features),
        }
    }

    /// Attributes whose measured disparity exceeds the configured
    /// threshold.
    pub fn concerning_attributes(&self, config: &FairlensConfig) -> Vec<ProtectedAttribute> {
        self.disparities
            .iter()
            .filter(|d| !d.insufficient_data && d.disparity > config.fairness.disparity_threshold)
            .map(|d| d.attribute)
            .collect()
    }
}
