//! # fairlens-core — fairness metrics for loan-approval datasets
//!
//! Two components with a well-defined input/output contract:
//!
//! 1. **Dataset ingestion** ([`data`]) — parses untyped tabular rows
//!    into normalized [`data::ApplicantRecord`]s with partial-failure
//!    semantics: malformed rows are reported, never fatal.
//! 2. **Fairness metrics engine** ([`metrics`]) — pure, deterministic
//!    computations over the record set: per-group approval rates,
//!    disparity scores, threshold classification of bias metrics, and
//!    feature-importance summaries.
//!
//! [`mitigation`] adds pluggable, deterministic strategies so that
//! before/after disparity comparisons are genuinely recomputed rather
//! than faked, and [`report`] assembles everything the presentation
//! layer displays.
//!
//! All inputs are immutable and all outputs freshly allocated, so
//! concurrent use (e.g. computing metrics for several attributes in
//! parallel) is safe by construction.

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod mitigation;
pub mod report;

pub use config::FairlensConfig;
pub use data::{ApplicantRecord, IngestReport, ProtectedAttribute, RowError, ingest};
pub use error::FairnessError;
pub use metrics::{BiasMetric, DisparityMetric, MetricStatus, compute_distribution};
pub use mitigation::{MitigationStrategy, SimulationResult, simulate};
pub use report::FairnessReport;
