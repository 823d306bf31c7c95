//! Error types for the data-preparation pipeline.
//!
//! Every failure propagates to the caller unrecovered. The pipeline never
//! substitutes a default value for a computation that could not be done.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading, preparing or summarizing the datasets.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One of the two input files does not exist.
    #[error("Dataset file not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    /// A file exists but cannot be read as `;`-delimited tabular data.
    #[error("Failed to parse dataset {}: {message}", path.display())]
    DatasetParse { path: PathBuf, message: String },

    /// A downstream step references a column the table does not have.
    #[error("Column '{column}' not found in dataset")]
    MissingColumn { column: String },

    /// A binary-mapped column holds a code outside the fixed lookup table.
    #[error("Unmapped value '{value}' in column '{column}' at row {row}")]
    UnmappedValue {
        column: String,
        row: usize,
        value: String,
    },

    /// `study_efficiency` would divide by a zero study time.
    #[error("Study time is zero at row {row}; study_efficiency is undefined")]
    ZeroStudyTime { row: usize },

    /// Summary statistics were requested over a table with no rows.
    #[error("Dataset is empty; {0} cannot be computed")]
    EmptyDataset(&'static str),

    /// Any other failure raised by the dataframe engine.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl PipelineError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        PipelineError::DatasetParse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn missing_column(column: &str) -> Self {
        PipelineError::MissingColumn {
            column: column.to_string(),
        }
    }
}

/// Result alias used throughout the pipeline.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
