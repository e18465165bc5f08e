//! # tidyshape - wide-to-long CSV reshaping
//!
//! Reads a wide comma-separated table (one column per year), checks that every
//! row has as many fields as the header, and reshapes it into a long
//! `country,year,cases` table sorted by year.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    stdin    │────▶│   Parser    │────▶│   Storage   │────▶│    Pivot    │
//! │ (wide rows) │     │ (width chk) │     │ (stdin.csv) │     │ (result.csv)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tidyshape::{parse_str, reshape};
//!
//! let batch = parse_str("country,1999,2000\nA,0.7K,2K\nB,37K,80K\n", ',').unwrap();
//! let lines: Vec<String> = reshape(&batch).iter().map(|t| t.to_line()).collect();
//! assert_eq!(lines, ["A,1999,0.7K", "B,1999,37K", "A,2000,2K", "B,2000,80K"]);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`models`] - Header, Record, Batch, Triple
//! - [`parser`] - Line reader for the wide input
//! - [`validation`] - Column-count check
//! - [`storage`] - Staging file round-trip
//! - [`transform`] - Pivot and pipeline
//! - [`logs`] - Logging helpers and subscriber setup

// Core modules
pub mod error;
pub mod models;

// Ingestion
pub mod parser;
pub mod validation;

// Staging
pub mod storage;

// Reshaping
pub mod transform;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    IngestError,
    StorageError,
    ReshapeError,
    PipelineError,
    COLUMN_MISMATCH_MESSAGE,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Header, Record, Batch, Triple, OUTPUT_COLUMNS};

// =============================================================================
// Re-exports - Ingestion
// =============================================================================

pub use parser::{read_batch, parse_str, split_line, DEFAULT_DELIMITER};
pub use validation::check_width;

// =============================================================================
// Re-exports - Staging
// =============================================================================

pub use storage::{write_batch, read_batch_file, round_trip, DEFAULT_STAGING_FILE};

// =============================================================================
// Re-exports - Pivot & Pipeline
// =============================================================================

pub use transform::pivot::{
    pivot,
    sort_triples,
    reshape,
    write_triples,
    render_lines,
    display_file,
    DEFAULT_RESULT_FILE,
};

pub use transform::pipeline::{run, ReshapeOptions, PipelineReport};
