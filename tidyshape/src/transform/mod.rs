//! Transformation module.
//!
//! - Pivot: wide records to sorted long triples
//! - Pipeline: end-to-end run with staging and output

pub mod pivot;
pub mod pipeline;

pub use pipeline::*;
pub use pivot::*;
