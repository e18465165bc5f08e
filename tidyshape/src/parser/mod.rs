//! Line-oriented reader for the wide input table.
//!
//! Reads delimited lines until a blank line or end of stream. The first line
//! is the header; each later line becomes a [`Record`] after its width is
//! checked. Splitting is naive: no trimming of values and no quoted fields, so
//! a delimiter inside a value always starts a new field.

use std::io::{BufRead, BufReader, Read};

use tracing::{debug, trace};

use crate::error::IngestResult;
use crate::models::{Batch, Header, Record};
use crate::validation::check_width;

/// Default field delimiter of the input stream.
pub const DEFAULT_DELIMITER: char = ',';

/// Split one input line into raw fields.
///
/// Only the line terminator is stripped; values are passed through as-is.
///
/// # Example
/// ```
/// use tidyshape::split_line;
///
/// assert_eq!(split_line("A, 0.7K,2K\r\n", ','), vec!["A", " 0.7K", "2K"]);
/// ```
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    split_fields(strip_terminator(line), delimiter)
}

/// Split a line whose terminator is already gone.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Whether a line ends the input (empty or whitespace only).
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Read a wide table from `reader`.
///
/// Stops at the first blank line or at end of stream. The first line fixes the
/// header width; a detail row of any other width aborts the whole read with
/// [`crate::IngestError::ColumnMismatch`] and nothing read so far is returned.
///
/// Empty input and header-only input are valid and give an empty record list.
pub fn read_batch<R: Read>(reader: R, delimiter: char) -> IngestResult<Batch> {
    let buf = BufReader::new(reader);
    let mut header: Option<Header> = None;
    let mut records = Vec::new();

    for (line_idx, line_result) in buf.lines().enumerate() {
        let line_num = line_idx + 1;
        let line = line_result?;

        if is_blank(&line) {
            trace!(line = line_num, "blank line, end of input");
            break;
        }

        // `lines()` has already removed exactly one terminator.
        let fields = split_fields(&line, delimiter);

        match &header {
            None => {
                let h = Header::new(fields);
                debug!(width = h.width(), "header: {}", h.names().join(","));
                header = Some(h);
            }
            Some(h) => {
                // Any mismatch drops the records gathered so far.
                check_width(h, &fields, line_num)?;
                trace!(line = line_num, fields = fields.len(), "detail row");
                records.push(Record::from_fields(h, fields));
            }
        }
    }

    let batch = Batch::new(header.unwrap_or_else(Header::empty), records);
    debug!(
        width = batch.header.width(),
        rows = batch.row_count(),
        "input read"
    );
    Ok(batch)
}

/// Read a wide table from an in-memory string.
///
/// # Example
/// ```
/// use tidyshape::parse_str;
///
/// let batch = parse_str("country,1999\nA,0.7K\n", ',').unwrap();
/// assert_eq!(batch.header.width(), 2);
/// assert_eq!(batch.records[0].get("1999"), Some("0.7K"));
/// ```
pub fn parse_str(content: &str, delimiter: char) -> IngestResult<Batch> {
    read_batch(content.as_bytes(), delimiter)
}
