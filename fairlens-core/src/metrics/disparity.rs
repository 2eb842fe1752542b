//! Group-wise approval-rate distributions and disparity scores.

use crate::data::record::{ApplicantRecord, ProtectedAttribute};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts and approval rate for one category of a protected attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub category: String,
    pub total: usize,
    pub approved: usize,
    /// `approved / total`; defined as 0 when the bucket is empty.
    pub approval_rate: f64,
}

/// Approval-rate disparity for one protected attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisparityMetric {
    pub attribute: ProtectedAttribute,
    /// `max(rate) − min(rate)` over non-empty buckets; 0 when fewer
    /// than two non-empty buckets exist.
    pub disparity: f64,
    /// Set when fewer than two non-empty buckets were available, so
    /// a disparity of 0 is not mistaken for measured parity.
    pub insufficient_data: bool,
    pub categories: Vec<CategoryBucket>,
}

/// Group records by the chosen protected attribute and compute the
/// approval-rate disparity.
///
/// Grouping is stable: categories are sorted, unseen values form
/// their own bucket, and repeated calls on the same records yield
/// identical output. Empty buckets never enter the min/max, so they
/// cannot fabricate a disparity against real buckets.
pub fn compute_distribution(
    records: &[ApplicantRecord],
    attribute: ProtectedAttribute,
) -> DisparityMetric {
    let mut groups: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for record in records {
        // Case-insensitive even for records built outside the ingestor.
        let key = attribute.value_of(record).to_lowercase();
        let entry = groups.entry(key).or_insert((0, 0));
        entry.0 += 1;
        if record.approved {
            entry.1 += 1;
        }
    }

    let categories: Vec<CategoryBucket> = groups
        .into_iter()
        .map(|(category, (total, approved))| CategoryBucket {
            category,
            total,
            approved,
            approval_rate: if total > 0 {
                approved as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    let rates: Vec<f64> = categories
        .iter()
        .filter(|b| b.total > 0)
        .map(|b| b.approval_rate)
        .collect();

    let (disparity, insufficient_data) = if rates.len() < 2 {
        (0.0, true)
    } else {
        let max = rates.iter().copied().fold(f64::MIN, f64::max);
        let min = rates.iter().copied().fold(f64::MAX, f64::min);
        (max - min, false)
    };

    tracing::debug!(
        attribute = attribute.as_str(),
        disparity,
        buckets = categories.len(),
        "computed distribution"
    );

    DisparityMetric {
        attribute,
        disparity,
        insufficient_data,
        categories,
    }
}

/// Fraction of all records with a positive outcome; 0 for an empty set.
pub fn overall_approval_rate(records: &[ApplicantRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let approved = records.iter().filter(|r| r.approved).count();
    approved as f64 / records.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn record(id: &str, gender: &str, race: &str, age: u32, approved: bool) -> ApplicantRecord {
        ApplicantRecord {
            id: id.to_string(),
            age,
            gender: gender.to_string(),
            race: race.to_string(),
            income: 80_000.0,
            credit_score: 700,
            debt_to_income: 0.3,
            loan_amount: 200_000.0,
            loan_term: 30,
            approved,
            risk_score: 40.0,
        }
    }

    #[test]
    fn test_hand_built_fixture() {
        // 3 male records (2 approved), 2 female records (0 approved):
        // rates 0.667 and 0.0, disparity 0.667.
        let records = vec![
            record("a", "male", "white", 30, true),
            record("b", "male", "white", 30, true),
            record("c", "male", "white", 30, false),
            record("d", "female", "white", 30, false),
            record("e", "female", "white", 30, false),
        ];
        let metric = compute_distribution(&records, ProtectedAttribute::Gender);
        assert!(!metric.insufficient_data);
        assert_eq!(metric.categories.len(), 2);

        let female = &metric.categories[0];
        assert_eq!(female.category, "female");
        assert_eq!(female.total, 2);
        assert_eq!(female.approval_rate, 0.0);

        let male = &metric.categories[1];
        assert_eq!(male.category, "male");
        assert_eq!(male.approved, 2);
        assert!((male.approval_rate - 2.0 / 3.0).abs() < 1e-12);

        assert!((metric.disparity - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_category_is_insufficient() {
        let records = vec![
            record("a", "male", "white", 30, true),
            record("b", "male", "black", 40, false),
        ];
        let metric = compute_distribution(&records, ProtectedAttribute::Gender);
        assert_eq!(metric.disparity, 0.0);
        assert!(metric.insufficient_data);
        // Same records grouped by race have two buckets.
        let by_race = compute_distribution(&records, ProtectedAttribute::Race);
        assert!(!by_race.insufficient_data);
        assert_eq!(by_race.disparity, 1.0);
    }

    #[test]
    fn test_empty_records() {
        let metric = compute_distribution(&[], ProtectedAttribute::Race);
        assert_eq!(metric.disparity, 0.0);
        assert!(metric.insufficient_data);
        assert!(metric.categories.is_empty());
        assert!(!metric.disparity.is_nan());
        assert_eq!(overall_approval_rate(&[]), 0.0);
    }

    #[test]
    fn test_idempotence() {
        let records = vec![
            record("a", "male", "white", 25, true),
            record("b", "female", "black", 52, false),
            record("c", "non-binary", "asian", 38, true),
        ];
        let first = compute_distribution(&records, ProtectedAttribute::Age);
        let second = compute_distribution(&records, ProtectedAttribute::Age);
        assert_eq!(first, second);
    }

    #[test]
    fn test_age_bracket_grouping() {
        let records = vec![
            record("a", "male", "white", 25, true),
            record("b", "male", "white", 40, false),
            record("c", "male", "white", 71, false),
        ];
        let metric = compute_distribution(&records, ProtectedAttribute::Age);
        let names: Vec<&str> = metric
            .categories
            .iter()
            .map(|b| b.category.as_str())
            .collect();
        assert_eq!(names, vec!["18-30", "31-45", "60+"]);
    }

    #[test]
    fn test_grouping_is_case_insensitive() {
        // Records built outside the ingestor may carry mixed case.
        let records = vec![
            record("a", "Male", "white", 30, true),
            record("b", "male", "white", 30, false),
        ];
        let metric = compute_distribution(&records, ProtectedAttribute::Gender);
        assert_eq!(metric.categories.len(), 1);
        assert_eq!(metric.categories[0].total, 2);
    }

    #[test]
    fn test_overall_approval_rate() {
        let records = vec![
            record("a", "male", "white", 30, true),
            record("b", "male", "white", 30, false),
        ];
        assert_eq!(overall_approval_rate(&records), 0.5);
    }
}
