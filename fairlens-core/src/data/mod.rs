//! Dataset ingestion: raw tabular input → normalized applicant records.

pub mod batch;
pub mod ingest;
pub mod record;
pub mod source;

pub use batch::{RawBatch, parse_delimited};
pub use ingest::{IngestReport, RowError, ingest};
pub use record::{ApplicantRecord, ProtectedAttribute};
pub use source::{CsvSource, HttpCsvSource, JsonSource, RowSource, SourceInfo};
