//! Deterministic sensitivity analysis over fairness parameters.
//!
//! Shows how the configured fairness threshold and the weight given
//! to protected attributes move the headline disparities. The curves
//! are linear interpolations from named constants; two calls with the
//! same inputs always produce the same outcome.

use serde::{Deserialize, Serialize};

/// Baseline disparity gaps the interpolation starts from.
const BASE_GENDER_GAP: f64 = 0.15;
const BASE_RACE_GAP: f64 = 0.20;
const BASE_AGE_GAP: f64 = 0.10;
const BASE_ZIP_GAP: f64 = 0.25;

/// Slope of the threshold term, per unit of threshold below 0.8.
const THRESHOLD_SLOPE: f64 = 0.5;
/// Slope of the attribute-weight term, per unit of weight above 0.5.
const WEIGHT_SLOPE: f64 = 0.4;
/// Neutral points of the two sliders.
const THRESHOLD_PIVOT: f64 = 0.8;
const WEIGHT_PIVOT: f64 = 0.5;
/// Fairness score at the neutral point.
const BASE_FAIRNESS_SCORE: f64 = 65.0;

/// Allowed slider ranges; inputs outside are clamped.
pub const THRESHOLD_RANGE: (f64, f64) = (0.6, 0.9);
pub const WEIGHT_RANGE: (f64, f64) = (0.1, 0.9);

/// Inputs to a sensitivity run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensitivityInputs {
    /// Strictness of the fairness requirement (0.6 relaxed – 0.9 strict).
    pub fairness_threshold: f64,
    /// Influence given to protected attributes (0.1 low – 0.9 high).
    pub attribute_weight: f64,
}

/// Qualitative rating of the overall fairness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessRating {
    Good,
    Fair,
    Poor,
}

impl FairnessRating {
    fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Result of a sensitivity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityOutcome {
    pub gender_disparity: f64,
    pub race_disparity: f64,
    pub age_disparity: f64,
    pub zip_disparity: f64,
    /// 0–100, higher is fairer.
    pub fairness_score: f64,
    pub rating: FairnessRating,
}

/// Run the sensitivity analysis. Pure; out-of-range inputs are
/// clamped to the slider ranges.
pub fn analyze(inputs: SensitivityInputs) -> SensitivityOutcome {
    let threshold = inputs
        .fairness_threshold
        .clamp(THRESHOLD_RANGE.0, THRESHOLD_RANGE.1);
    let weight = inputs.attribute_weight.clamp(WEIGHT_RANGE.0, WEIGHT_RANGE.1);

    let threshold_effect = (THRESHOLD_PIVOT - threshold) * THRESHOLD_SLOPE;
    let weight_effect = (weight - WEIGHT_PIVOT) * WEIGHT_SLOPE;
    let gap = |base: f64| (base + threshold_effect - weight_effect).max(0.0);

    let fairness_score = (BASE_FAIRNESS_SCORE - threshold_effect * 100.0 + weight_effect * 100.0)
        .clamp(0.0, 100.0);

    SensitivityOutcome {
        gender_disparity: gap(BASE_GENDER_GAP),
        race_disparity: gap(BASE_RACE_GAP),
        age_disparity: gap(BASE_AGE_GAP),
        zip_disparity: gap(BASE_ZIP_GAP),
        fairness_score,
        rating: FairnessRating::from_score(fairness_score),
    }
}
