//! Staging file round-trip.
//!
//! The validated batch is written to a delimited file and read back before the
//! reshape stage, which normalizes its representation. Each file handle lives
//! for exactly one pass and is closed before the function returns.
//!
//! Writing goes through the `csv` crate with minimal quoting, so any value the
//! naive input splitter produced (quotes included) survives the re-read
//! field-for-field.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::models::{Batch, Header, Record};

/// Default staging file name.
pub const DEFAULT_STAGING_FILE: &str = "stdin.csv";

const BOM: char = '\u{feff}';

/// Write `batch` to `path`: one header line, then one line per record in
/// header order.
///
/// An empty header produces an empty file. A record with no value for a
/// header column is reported as [`StorageError::MissingField`].
pub fn write_batch(batch: &Batch, path: &Path) -> StorageResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    if !batch.header.is_empty() {
        writer.write_record(batch.header.names())?;

        for (idx, record) in batch.records.iter().enumerate() {
            let fields = ordered_fields(&batch.header, record, idx + 1)?;
            writer.write_record(&fields)?;
        }
    }

    writer.flush()?;
    debug!(
        path = %path.display(),
        rows = batch.row_count(),
        "staging file written"
    );
    Ok(())
}

/// Record values in header order.
fn ordered_fields<'a>(
    header: &Header,
    record: &'a Record,
    line: usize,
) -> StorageResult<Vec<&'a str>> {
    (0..header.width())
        .map(|i| {
            record
                .field_for(header, i)
                .ok_or_else(|| StorageError::MissingField {
                    line,
                    column: header.name(i).unwrap_or_default().to_string(),
                })
        })
        .collect()
}

/// Read a staging file written by [`write_batch`].
///
/// The first line gives the column names; every later line becomes a record
/// keyed by position. An empty file gives an empty batch.
///
/// The `csv` reader drops a leading byte order mark; it is put back on the
/// first column name so a BOM-prefixed header reads back unchanged.
pub fn read_batch_file(path: &Path) -> StorageResult<Batch> {
    let bom = starts_with_bom(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let mut names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if bom {
        if let Some(first) = names.first_mut().filter(|n| !n.starts_with(BOM)) {
            first.insert(0, BOM);
        }
    }
    let header = Header::new(names);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let fields = row.iter().map(str::to_string).collect();
        records.push(Record::from_fields(&header, fields));
    }

    debug!(
        path = %path.display(),
        width = header.width(),
        rows = records.len(),
        "staging file read"
    );
    Ok(Batch::new(header, records))
}

fn starts_with_bom(path: &Path) -> StorageResult<bool> {
    let mut prefix = Vec::with_capacity(BOM.len_utf8());
    File::open(path)?
        .take(BOM.len_utf8() as u64)
        .read_to_end(&mut prefix)?;
    Ok(prefix == "\u{feff}".as_bytes())
}

/// Write `batch` to `path` and read it straight back.
pub fn round_trip(batch: &Batch, path: &Path) -> StorageResult<Batch> {
    write_batch(batch, path)?;
    read_batch_file(path)
}
