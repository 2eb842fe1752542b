//! Named bias metrics and their threshold-based classification.

use serde::{Deserialize, Serialize};

/// A named fairness statistic supplied as configuration data.
///
/// Values are consumed as-is; this crate classifies them against
/// their thresholds but does not compute them from records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasMetric {
    pub name: String,
    pub value: f64,
    pub threshold: f64,
    pub description: String,
}

/// Three-tier classification of a bias metric against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    Pass,
    Warn,
    Fail,
}

/// Classify a metric: `Pass` when `value ≥ threshold`, `Warn` when
/// `value ≥ warn_margin × threshold`, `Fail` otherwise.
///
/// This is the single implementation used everywhere a metric status
/// is displayed; views must not re-derive it.
pub fn rate_threshold_status(metric: &BiasMetric, warn_margin: f64) -> MetricStatus {
    if metric.value >= metric.threshold {
        MetricStatus::Pass
    } else if metric.value >= warn_margin * metric.threshold {
        MetricStatus::Warn
    } else {
        MetricStatus::Fail
    }
}

/// Reference catalog of bias metrics for the loan-approval dashboard.
pub fn reference_metrics() -> Vec<BiasMetric> {
    vec![
        BiasMetric {
            name: "Disparate Impact (Race)".to_string(),
            value: 0.76,
            threshold: 0.8,
            description: "Ratio of approval rates between minority and majority groups. \
                          Values below 0.8 may indicate disparate impact."
                .to_string(),
        },
        BiasMetric {
            name: "Statistical Parity (Gender)".to_string(),
            value: 0.82,
            threshold: 0.8,
            description: "Difference in approval rates across gender groups. \
                          Values closer to 1 indicate better parity."
                .to_string(),
        },
        BiasMetric {
            name: "Equal Opportunity".to_string(),
            value: 0.72,
            threshold: 0.8,
            description: "Equality of true positive rates across protected groups.".to_string(),
        },
        BiasMetric {
            name: "Predictive Parity".to_string(),
            value: 0.85,
            threshold: 0.8,
            description: "Equality of positive predictive values across protected groups."
                .to_string(),
        },
        BiasMetric {
            name: "Conditional Demographic Disparity".to_string(),
            value: 0.65,
            threshold: 0.7,
            description: "Measures demographic disparity conditioned on legitimate risk factors."
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(value: f64, threshold: f64) -> BiasMetric {
        BiasMetric {
            name: "test".to_string(),
            value,
            threshold,
            description: String::new(),
        }
    }

    #[test]
    fn test_threshold_status_tiers() {
        assert_eq!(
            rate_threshold_status(&metric(0.82, 0.8), 0.8),
            MetricStatus::Pass
        );
        // 0.65 >= 0.8 * 0.8 = 0.64
        assert_eq!(
            rate_threshold_status(&metric(0.65, 0.8), 0.8),
            MetricStatus::Warn
        );
        assert_eq!(
            rate_threshold_status(&metric(0.5, 0.8), 0.8),
            MetricStatus::Fail
        );
    }

    #[test]
    fn test_threshold_status_boundaries() {
        // Exactly at threshold passes; exactly at the warn margin warns.
        assert_eq!(
            rate_threshold_status(&metric(0.8, 0.8), 0.8),
            MetricStatus::Pass
        );
        assert_eq!(
            rate_threshold_status(&metric(0.64, 0.8), 0.8),
            MetricStatus::Warn
        );
    }

    #[test]
    fn test_reference_metrics_catalog() {
        let metrics = reference_metrics();
        assert_eq!(metrics.len(), 5);
        let statuses: Vec<MetricStatus> = metrics
            .iter()
            .map(|m| rate_threshold_status(m, 0.8))
            .collect();
        assert!(statuses.contains(&MetricStatus::Pass));
        assert!(statuses.contains(&MetricStatus::Warn));
    }
}
