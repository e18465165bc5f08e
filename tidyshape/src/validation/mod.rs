//! Structural validation of the wide input.
//!
//! The only rule is width: every detail row must have exactly as many fields
//! as the header captured when it was built. There is no type checking; cell
//! values stay opaque text.

use crate::error::{IngestError, IngestResult};
use crate::models::Header;

/// Check a detail row's field count against the header width.
///
/// `line` is the 1-based input line number, reported in the error for logging.
pub fn check_width(header: &Header, fields: &[String], line: usize) -> IngestResult<()> {
    let found = fields.len();
    if found != header.width() || found != header.names().len() {
        return Err(IngestError::ColumnMismatch {
            line,
            expected: header.width(),
            found,
        });
    }
    Ok(())
}
