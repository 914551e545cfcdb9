use thiserror::Error;

use super::loader::SkippedRow;

/// Why an upload attempt was rejected before anything was sent.
///
/// Each variant is terminal for the attempt: no partial record set is
/// handed on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestError {
    /// The file name does not end in `.csv`.
    #[error("Please select a CSV file")]
    InvalidFileType { file_name: String },

    /// The CSV reader itself failed (I/O, invalid UTF-8, ...).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parsing succeeded but no row survived validation; `skipped` says why
    /// each data row was dropped.
    #[error("No valid data found. Please check your CSV format.")]
    NoValidData { skipped: Vec<SkippedRow> },
}

impl From<csv::Error> for IngestError {
    fn from(e: csv::Error) -> Self {
        IngestError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for IngestError {
    fn from(e: std::io::Error) -> Self {
        IngestError::Parse(e.to_string())
    }
}
