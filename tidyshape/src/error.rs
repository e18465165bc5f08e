//! Error types for the tidyshape reshaping pipeline.
//!
//! One enum per stage, wrapped by a top-level [`PipelineError`]:
//!
//! - [`IngestError`] - reading and validating the wide input
//! - [`StorageError`] - staging file write and re-read
//! - [`ReshapeError`] - writing and displaying the long output
//! - [`PipelineError`] - top-level orchestration
//!
//! Conversion is automatic via `From`, so `?` works across stage boundaries.

use thiserror::Error;

/// Fixed diagnostic printed when a detail row and the header disagree on width.
pub const COLUMN_MISMATCH_MESSAGE: &str = "The number of columns in the header is inconsistent with the number of columns in the detail, please check it.";

// =============================================================================
// Ingestion Errors
// =============================================================================

/// Errors while reading the wide table from the input stream.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A detail row has a different field count than the header.
    ///
    /// The display text is always [`COLUMN_MISMATCH_MESSAGE`]; the fields are
    /// kept for logging.
    #[error("{}", COLUMN_MISMATCH_MESSAGE)]
    ColumnMismatch {
        /// 1-based input line number of the offending row.
        line: usize,
        /// Header width.
        expected: usize,
        /// Field count of the offending row.
        found: usize,
    },

    /// Failed to read from the input stream.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors while persisting or re-reading the staging file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to open, create or flush the staging file.
    #[error("Staging file IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader or writer rejected the data.
    #[error("Staging file CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record has no value for one of the header columns.
    #[error("Record {line} has no value for column '{column}'")]
    MissingField { line: usize, column: String },
}

// =============================================================================
// Reshape Errors
// =============================================================================

/// Errors while writing or displaying the reshaped output.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// Failed to open, create or flush the result file.
    #[error("Result file IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader or writer rejected the data.
    #[error("Result file CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Ingestion or validation failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Staging round-trip failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Writing the reshaped output failed.
    #[error("Reshape error: {0}")]
    Reshape(#[from] ReshapeError),
}

impl PipelineError {
    /// True when the batch was rejected because of a header/detail width mismatch.
    pub fn is_column_mismatch(&self) -> bool {
        matches!(self, PipelineError::Ingest(IngestError::ColumnMismatch { .. }))
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Result type for staging file operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for reshape output operations.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Result type for the whole pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;
