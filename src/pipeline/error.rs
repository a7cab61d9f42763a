//! Error types for loading and preparing the passenger dataset.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that abort loading the passenger table.
///
/// Every variant is fatal to startup: the dashboard never runs on a partially
/// loaded or degraded table.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The dataset file does not exist.
    #[error("Dataset file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file extension is not a supported tabular format.
    #[error("Unsupported file format: '{extension}'. Supported formats: csv, parquet")]
    UnsupportedFormat { extension: String },

    /// The file exists but could not be read or parsed.
    #[error("Failed to read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// A column of a loaded frame could not be converted.
    #[error("Failed to read column '{column}': {source}")]
    Column {
        column: String,
        #[source]
        source: PolarsError,
    },

    /// One or more required columns are absent from the header.
    #[error("Dataset is missing required column(s): {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A required categorical field is absent or outside its allowed values.
    #[error("Invalid value in column '{column}' at row {row}: {value}")]
    InvalidValue {
        column: &'static str,
        row: usize,
        value: String,
    },

    /// A column needs imputation but holds no observed value to impute from.
    #[error("Column '{column}' has missing values but no observed values to impute from")]
    NoObservedValues { column: &'static str },
}

/// Error returned when parsing a passenger attribute from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
