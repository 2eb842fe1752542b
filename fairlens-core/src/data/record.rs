//! The normalized applicant record model and protected attributes.

use crate::config::RiskWeights;
use serde::{Deserialize, Serialize};

/// One loan application, normalized from a raw row.
///
/// Records are created once at ingestion time and never mutated;
/// `risk_score` is derived from the numeric fields and is never
/// supplied by input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub id: String,
    pub age: u32,
    /// Lowercased; unseen values are kept rather than dropped.
    pub gender: String,
    /// Lowercased; unseen values are kept rather than dropped.
    pub race: String,
    pub income: f64,
    pub credit_score: u32,
    pub debt_to_income: f64,
    pub loan_amount: f64,
    pub loan_term: u32,
    pub approved: bool,
    /// 0–100, lower is better. Derived, never user-edited.
    pub risk_score: f64,
}

/// A demographic field against which fairness is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectedAttribute {
    Gender,
    Race,
    Age,
}

impl ProtectedAttribute {
    /// The grouping key of a record for this attribute.
    ///
    /// Age is bracketed the way the dashboard displays it; gender and
    /// race are already lowercased at ingestion.
    pub fn value_of(&self, record: &ApplicantRecord) -> String {
        match self {
            Self::Gender => record.gender.clone(),
            Self::Race => record.race.clone(),
            Self::Age => age_bracket(record.age).to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Race => "race",
            Self::Age => "age",
        }
    }

    pub const ALL: [ProtectedAttribute; 3] = [Self::Gender, Self::Race, Self::Age];
}

impl std::str::FromStr for ProtectedAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gender" => Ok(Self::Gender),
            "race" => Ok(Self::Race),
            "age" => Ok(Self::Age),
            other => Err(format!("unknown protected attribute: {other}")),
        }
    }
}

/// Dashboard age brackets. Ages below 18 fall into the first bracket.
pub fn age_bracket(age: u32) -> &'static str {
    match age {
        0..=30 => "18-30",
        31..=45 => "31-45",
        46..=60 => "46-60",
        _ => "60+",
    }
}

/// Compute a risk score from the numeric fields, clamped to `[0, 100]`.
///
/// `base − w_credit·100·(credit/reference) + w_dti·100·dti +
/// w_lti·100·(loan/income)`. A term whose inputs are absent or
/// unusable (zero income, zero reference score) contributes nothing.
pub fn risk_score(
    weights: &RiskWeights,
    credit_score: Option<u32>,
    debt_to_income: Option<f64>,
    loan_amount: Option<f64>,
    income: Option<f64>,
) -> f64 {
    let mut score = weights.base_score;

    if let Some(credit) = credit_score {
        if weights.reference_credit_score > 0 {
            let normalized = credit as f64 / weights.reference_credit_score as f64;
            score -= weights.credit_weight * 100.0 * normalized;
        }
    }

    if let Some(dti) = debt_to_income {
        score += weights.dti_weight * 100.0 * dti;
    }

    if let (Some(amount), Some(income)) = (loan_amount, income) {
        if income > 0.0 {
            score += weights.lti_weight * 100.0 * (amount / income);
        }
    }

    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bracket() {
        assert_eq!(age_bracket(18), "18-30");
        assert_eq!(age_bracket(30), "18-30");
        assert_eq!(age_bracket(31), "31-45");
        assert_eq!(age_bracket(60), "46-60");
        assert_eq!(age_bracket(61), "60+");
    }

    #[test]
    fn test_attribute_from_str() {
        assert_eq!(
            "Race".parse::<ProtectedAttribute>().unwrap(),
            ProtectedAttribute::Race
        );
        assert!("zip".parse::<ProtectedAttribute>().is_err());
    }

    #[test]
    fn test_risk_score_strong_applicant() {
        let w = RiskWeights::default();
        // Top credit, no debt, small loan relative to income.
        let score = risk_score(&w, Some(850), Some(0.0), Some(50_000.0), Some(100_000.0));
        // 50 - 40 + 0 + 12.5
        assert!((score - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_risk_score_clamped() {
        let w = RiskWeights::default();
        // Huge loan-to-income pushes well past 100 before clamping.
        let score = risk_score(&w, Some(500), Some(0.6), Some(500_000.0), Some(20_000.0));
        assert_eq!(score, 100.0);
        let low = risk_score(&w, Some(850), None, None, None);
        assert_eq!(low, 10.0);
    }

    #[test]
    fn test_risk_score_missing_terms_contribute_nothing() {
        let w = RiskWeights::default();
        assert_eq!(risk_score(&w, None, None, None, None), w.base_score);
        // Zero income: loan-to-income term is skipped, not infinite.
        let score = risk_score(&w, None, None, Some(100_000.0), Some(0.0));
        assert_eq!(score, w.base_score);
    }

    #[test]
    fn test_risk_score_is_pure() {
        let w = RiskWeights::default();
        let a = risk_score(&w, Some(700), Some(0.3), Some(200_000.0), Some(80_000.0));
        let b = risk_score(&w, Some(700), Some(0.3), Some(200_000.0), Some(80_000.0));
        assert_eq!(a, b);
    }
}
