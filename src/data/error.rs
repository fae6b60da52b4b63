use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – everything the loader and selector can report
// ---------------------------------------------------------------------------

/// How a [`DataError`] should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Error)]
pub enum DataError {
    /// Source file is absent.
    #[error("CSV not found at {}. Put the file in a 'data' folder.", path.display())]
    FileNotFound { path: PathBuf },

    /// An expected column (usually `time`) is missing.
    #[error("Column '{column}' is missing from the dataset")]
    MissingColumn { column: String },

    /// A non-empty time cell could not be parsed.
    #[error("Row {row}: '{value}' is not a valid timestamp")]
    InvalidTimestamp { row: usize, value: String },

    /// The requested column does not exist or is not numeric.
    #[error("Column '{0}' is not a numeric column of this dataset")]
    UnknownColumn(String),

    /// Nothing numeric left to plot.
    #[error("No numeric columns to plot")]
    EmptySelection,

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub fn severity(&self) -> Severity {
        match self {
            DataError::EmptySelection => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
