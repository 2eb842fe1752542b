//! The fairness metrics engine: pure, deterministic computations over
//! an immutable record set.

pub mod bias;
pub mod disparity;
pub mod importance;
pub mod sensitivity;

pub use bias::{BiasMetric, MetricStatus, rate_threshold_status};
pub use disparity::{CategoryBucket, DisparityMetric, compute_distribution, overall_approval_rate};
pub use importance::{BiasPotential, FeatureImportance};
pub use sensitivity::{FairnessRating, SensitivityInputs, SensitivityOutcome};
