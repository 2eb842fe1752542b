//! Feature-importance summaries with bias-potential labels.

use serde::{Deserialize, Serialize};

/// How strongly a feature could proxy for a protected attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasPotential {
    None,
    Low,
    Medium,
    High,
}

/// Externally supplied importance of one model feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    /// 0..1 share of model influence.
    pub importance: f64,
    pub potential_bias: BiasPotential,
}

/// Features sorted by descending importance. Ties keep input order.
pub fn ranked(features: &[FeatureImportance]) -> Vec<FeatureImportance> {
    let mut sorted = features.to_vec();
    sorted.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}

/// Features whose bias potential is medium or higher.
pub fn flagged(features: &[FeatureImportance]) -> Vec<&FeatureImportance> {
    features
        .iter()
        .filter(|f| f.potential_bias >= BiasPotential::Medium)
        .collect()
}

/// Reference catalog for the loan-approval model.
pub fn reference_features() -> Vec<FeatureImportance> {
    vec![
        FeatureImportance {
            feature: "Credit Score".to_string(),
            importance: 0.35,
            potential_bias: BiasPotential::Medium,
        },
        FeatureImportance {
            feature: "Income".to_string(),
            importance: 0.20,
            potential_bias: BiasPotential::Medium,
        },
        FeatureImportance {
            feature: "Debt-to-Income Ratio".to_string(),
            importance: 0.18,
            potential_bias: BiasPotential::Low,
        },
        FeatureImportance {
            feature: "Loan Amount".to_string(),
            importance: 0.12,
            potential_bias: BiasPotential::Low,
        },
        FeatureImportance {
            feature: "Age".to_string(),
            importance: 0.08,
            potential_bias: BiasPotential::High,
        },
        FeatureImportance {
            feature: "Zip Code".to_string(),
            importance: 0.07,
            potential_bias: BiasPotential::High,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_descending() {
        let features = reference_features();
        let ranked = ranked(&features);
        assert_eq!(ranked[0].feature, "Credit Score");
        for pair in ranked.windows(2) {
            assert!(pair[0].importance >= pair[1].importance);
        }
    }

    #[test]
    fn test_flagged_features() {
        let features = reference_features();
        let flagged = flagged(&features);
        // Credit Score, Income, Age, Zip Code.
        assert_eq!(flagged.len(), 4);
        assert!(flagged.iter().all(|f| f.potential_bias >= BiasPotential::Medium));
    }

    #[test]
    fn test_bias_potential_ordering() {
        assert!(BiasPotential::High > BiasPotential::Medium);
        assert!(BiasPotential::Low > BiasPotential::None);
    }

    #[test]
    fn test_bias_potential_serde() {
        let json = serde_json::to_string(&BiasPotential::High).unwrap();
        assert_eq!(json, r#""high""#);
    }
}
