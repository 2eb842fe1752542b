//! Pluggable bias-mitigation strategies.
//!
//! A strategy is a pure function from a record set to a transformed
//! record set; "before/after" comparisons are genuinely derived by
//! re-running the metrics engine on the output. No strategy may use
//! randomness — two applications to the same input are identical.

use crate::data::record::{ApplicantRecord, ProtectedAttribute};
use crate::metrics::disparity::{compute_distribution, overall_approval_rate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named, deterministic record-set transformation.
pub trait MitigationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn describe(&self) -> &'static str;

    /// Transform the record set with respect to one protected
    /// attribute. Must be pure: no randomness, no I/O, no state.
    fn apply(
        &self,
        records: &[ApplicantRecord],
        attribute: ProtectedAttribute,
    ) -> Vec<ApplicantRecord>;
}

/// Before/after disparity comparison for one strategy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub strategy: String,
    pub attribute: ProtectedAttribute,
    pub original_disparity: f64,
    pub mitigated_disparity: f64,
    /// Fractional reduction; 0 when the original disparity was 0.
    pub reduction: f64,
}

/// Apply a strategy and recompute the disparity on its output.
pub fn simulate(
    strategy: &dyn MitigationStrategy,
    records: &[ApplicantRecord],
    attribute: ProtectedAttribute,
) -> SimulationResult {
    let original = compute_distribution(records, attribute).disparity;
    let mitigated_records = strategy.apply(records, attribute);
    let mitigated = compute_distribution(&mitigated_records, attribute).disparity;
    let reduction = if original > 0.0 {
        (original - mitigated) / original
    } else {
        0.0
    };

    tracing::debug!(
        strategy = strategy.name(),
        attribute = attribute.as_str(),
        original,
        mitigated,
        "simulation complete"
    );

    SimulationResult {
        strategy: strategy.name().to_string(),
        attribute,
        original_disparity: original,
        mitigated_disparity: mitigated,
        reduction,
    }
}

/// Group record indices by attribute value, in sorted category order.
fn group_indices(
    records: &[ApplicantRecord],
    attribute: ProtectedAttribute,
) -> BTreeMap<String, Vec<usize>> {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, record) in records.iter().enumerate() {
        let key = attribute.value_of(record).to_lowercase();
        groups.entry(key).or_default().push(i);
    }
    groups
}

/// Preprocessing: oversample approved records of groups whose
/// approval rate falls below the overall rate, lifting each group
/// toward parity. Duplicate counts are closed-form, so the output is
/// deterministic; duplicates get suffix-tagged ids.
pub struct Reweighing;

impl MitigationStrategy for Reweighing {
    fn name(&self) -> &'static str {
        "reweighing"
    }

    fn describe(&self) -> &'static str {
        "Rebalances representation by duplicating approved records of \
         under-approved groups until each group reaches the overall \
         approval rate."
    }

    fn apply(
        &self,
        records: &[ApplicantRecord],
        attribute: ProtectedAttribute,
    ) -> Vec<ApplicantRecord> {
        let overall = overall_approval_rate(records);
        let mut out = records.to_vec();
        if records.is_empty() || overall <= 0.0 || overall >= 1.0 {
            return out;
        }

        for indices in group_indices(records, attribute).values() {
            let total = indices.len();
            let approved: Vec<usize> = indices
                .iter()
                .copied()
                .filter(|&i| records[i].approved)
                .collect();
            if approved.is_empty() {
                // Nothing to oversample from; the group stays as-is.
                continue;
            }
            let rate = approved.len() as f64 / total as f64;
            if rate >= overall {
                continue;
            }

            // Duplicating an approved record raises both counts, so
            // rate' = (a + k) / (t + k); solve for the smallest k
            // with rate' >= overall.
            let k = ((overall * total as f64 - approved.len() as f64) / (1.0 - overall)).ceil()
                as usize;
            for n in 0..k {
                let source = &records[approved[n % approved.len()]];
                let mut duplicate = source.clone();
                duplicate.id = format!("{}-rw{}", source.id, n + 1);
                out.push(duplicate);
            }
        }

        out
    }
}

/// Postprocessing: re-decide `approved` inside each group by a
/// group-specific risk cutoff sized to match the overall approval
/// rate. Ties are broken by risk score then id, so the outcome is
/// deterministic.
pub struct ThresholdAdjustment;

impl MitigationStrategy for ThresholdAdjustment {
    fn name(&self) -> &'static str {
        "threshold-adjustment"
    }

    fn describe(&self) -> &'static str {
        "Equalizes approval rates by approving the lowest-risk share \
         of each group that matches the overall approval rate."
    }

    fn apply(
        &self,
        records: &[ApplicantRecord],
        attribute: ProtectedAttribute,
    ) -> Vec<ApplicantRecord> {
        let overall = overall_approval_rate(records);
        let mut out = records.to_vec();

        for indices in group_indices(records, attribute).values() {
            let target = (overall * indices.len() as f64).round() as usize;

            let mut by_risk = indices.clone();
            by_risk.sort_by(|&a, &b| {
                records[a]
                    .risk_score
                    .partial_cmp(&records[b].risk_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| records[a].id.cmp(&records[b].id))
            });

            for (rank, &i) in by_risk.iter().enumerate() {
                out[i].approved = rank < target;
            }
        }

        out
    }
}

/// How strongly a strategy tends to move disparity, and how hard it
/// is to adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

/// Catalog entry describing a mitigation approach. Pass-through data
/// for the presentation layer; only a subset of catalog entries have
/// an executable [`MitigationStrategy`] behind them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub impact: EffortLevel,
    pub complexity: EffortLevel,
    /// Whether `strategy_by_id` can produce a runnable strategy.
    pub executable: bool,
}

/// The known mitigation approaches.
pub fn strategy_catalog() -> Vec<StrategyDescriptor> {
    vec![
        StrategyDescriptor {
            id: "reweighing".to_string(),
            name: "Preprocessing: Reweighing".to_string(),
            description: "Assigns weights to training examples to ensure fair representation \
                          across protected groups."
                .to_string(),
            impact: EffortLevel::Medium,
            complexity: EffortLevel::Medium,
            executable: true,
        },
        StrategyDescriptor {
            id: "adversarial-debiasing".to_string(),
            name: "Inprocessing: Adversarial Debiasing".to_string(),
            description: "Uses adversarial techniques during model training to reduce correlation \
                          between predictions and protected attributes."
                .to_string(),
            impact: EffortLevel::High,
            complexity: EffortLevel::High,
            executable: false,
        },
        StrategyDescriptor {
            id: "threshold-adjustment".to_string(),
            name: "Postprocessing: Threshold Optimization".to_string(),
            description: "Adjusts decision thresholds for different groups to equalize error rates."
                .to_string(),
            impact: EffortLevel::Medium,
            complexity: EffortLevel::Low,
            executable: true,
        },
        StrategyDescriptor {
            id: "proxy-removal".to_string(),
            name: "Feature Selection: Remove Biased Proxies".to_string(),
            description: "Identifies and removes features that may serve as proxies for protected \
                          attributes."
                .to_string(),
            impact: EffortLevel::Medium,
            complexity: EffortLevel::Medium,
            executable: false,
        },
        StrategyDescriptor {
            id: "data-augmentation".to_string(),
            name: "Data Augmentation".to_string(),
            description: "Generates synthetic data to balance representation across protected \
                          groups."
                .to_string(),
            impact: EffortLevel::Low,
            complexity: EffortLevel::Medium,
            executable: false,
        },
    ]
}

/// Look up a runnable strategy by catalog id.
pub fn strategy_by_id(id: &str) -> Option<Box<dyn MitigationStrategy>> {
    match id {
        "reweighing" => Some(Box::new(Reweighing)),
        "threshold-adjustment" => Some(Box::new(ThresholdAdjustment)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Biased fixture: men approved at 0.8, women at 0.2, with risk
    /// scores spread so threshold cutoffs are unambiguous.
    fn biased_records() -> Vec<ApplicantRecord> {
        let mut records = Vec::new();
        for i in 0..10 {
            records.push(record(&format!("m{i}"), "male", i, i >= 2));
            records.push(record(&format!("f{i}"), "female", i, i >= 8));
        }
        records
    }

    fn record(id: &str, gender: &str, rank: usize, approved: bool) -> ApplicantRecord {
        ApplicantRecord {
            id: id.to_string(),
            age: 35,
            gender: gender.to_string(),
            race: "white".to_string(),
            income: 80_000.0,
            credit_score: 700,
            debt_to_income: 0.3,
            loan_amount: 200_000.0,
            loan_term: 30,
            approved,
            // Lower rank = lower risk = approved first under a cutoff.
            risk_score: 10.0 + rank as f64,
        }
    }

    #[test]
    fn test_threshold_adjustment_equalizes_rates() {
        let records = biased_records();
        let before = compute_distribution(&records, ProtectedAttribute::Gender).disparity;
        assert!((before - 0.6).abs() < 1e-12);

        let after_records = ThresholdAdjustment.apply(&records, ProtectedAttribute::Gender);
        let after = compute_distribution(&after_records, ProtectedAttribute::Gender);
        // Overall rate is 0.5; each group of 10 gets exactly 5 approvals.
        assert_eq!(after.disparity, 0.0);
        assert_eq!(after_records.len(), records.len());
    }

    #[test]
    fn test_threshold_adjustment_prefers_low_risk() {
        let records = biased_records();
        let after = ThresholdAdjustment.apply(&records, ProtectedAttribute::Gender);
        let approved_female: Vec<&str> = after
            .iter()
            .filter(|r| r.gender == "female" && r.approved)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(approved_female, vec!["f0", "f1", "f2", "f3", "f4"]);
    }

    #[test]
    fn test_reweighing_reduces_disparity() {
        let records = biased_records();
        let result = simulate(&Reweighing, &records, ProtectedAttribute::Gender);
        assert!(result.mitigated_disparity < result.original_disparity);
        assert!(result.reduction > 0.0);
        // Only the disadvantaged group gains records.
        let mitigated = Reweighing.apply(&records, ProtectedAttribute::Gender);
        assert!(mitigated.len() > records.len());
        assert!(
            mitigated[records.len()..]
                .iter()
                .all(|r| r.gender == "female" && r.approved)
        );
    }

    #[test]
    fn test_reweighing_duplicate_ids_are_tagged() {
        let records = biased_records();
        let mitigated = Reweighing.apply(&records, ProtectedAttribute::Gender);
        assert!(mitigated[records.len()..].iter().all(|r| r.id.contains("-rw")));
    }

    #[test]
    fn test_strategies_are_deterministic() {
        let records = biased_records();
        for strategy in [
            &Reweighing as &dyn MitigationStrategy,
            &ThresholdAdjustment,
        ] {
            let a = simulate(strategy, &records, ProtectedAttribute::Gender);
            let b = simulate(strategy, &records, ProtectedAttribute::Gender);
            assert_eq!(a, b, "strategy {}", strategy.name());
        }
    }

    #[test]
    fn test_simulate_zero_disparity_input() {
        // Everyone approved: disparity 0, reduction defined as 0.
        let records: Vec<ApplicantRecord> = (0..4)
            .map(|i| {
                record(
                    &format!("r{i}"),
                    if i % 2 == 0 { "male" } else { "female" },
                    i,
                    true,
                )
            })
            .collect();
        let result = simulate(&Reweighing, &records, ProtectedAttribute::Gender);
        assert_eq!(result.original_disparity, 0.0);
        assert_eq!(result.reduction, 0.0);
        assert!(!result.mitigated_disparity.is_nan());
    }

    #[test]
    fn test_apply_on_empty_records() {
        for strategy in [
            &Reweighing as &dyn MitigationStrategy,
            &ThresholdAdjustment,
        ] {
            assert!(strategy.apply(&[], ProtectedAttribute::Race).is_empty());
        }
    }

    #[test]
    fn test_catalog_and_lookup_agree() {
        for descriptor in strategy_catalog() {
            let strategy = strategy_by_id(&descriptor.id);
            assert_eq!(strategy.is_some(), descriptor.executable, "{}", descriptor.id);
            if let Some(s) = strategy {
                assert_eq!(s.name(), descriptor.id);
            }
        }
        assert!(strategy_by_id("nonsense").is_none());
    }
}
