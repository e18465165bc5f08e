//! Wide-to-long pivot.
//!
//! ```text
//! Wide input                         Long output (sorted by year)
//! ┌─────────┬──────┬──────┐          ┌─────────┬──────┬───────┐
//! │ country │ 1999 │ 2000 │          │ country │ year │ cases │
//! ├─────────┼──────┼──────┤    →     ├─────────┼──────┼───────┤
//! │ A       │ 0.7K │ 2K   │          │ A       │ 1999 │ 0.7K  │
//! │ B       │ 37K  │ 80K  │          │ B       │ 1999 │ 37K   │
//! └─────────┴──────┴──────┘          │ A       │ 2000 │ 2K    │
//!                                    │ B       │ 2000 │ 80K   │
//!                                    └─────────┴──────┴───────┘
//! ```
//!
//! Categories are ordered as plain strings, so `"10"` sorts before `"2"`.
//! Rows with the same category keep their input order.

use std::path::Path;

use tracing::{debug, trace};

use crate::error::ReshapeResult;
use crate::models::{Batch, Triple, OUTPUT_COLUMNS};

/// Default result file name.
pub const DEFAULT_RESULT_FILE: &str = "result.csv";

/// Emit one triple per non-identifier column of every record, in input order.
///
/// A record of `N` columns gives `N - 1` triples.
pub fn pivot(batch: &Batch) -> Vec<Triple> {
    let header = &batch.header;
    let per_row = header.width().saturating_sub(1);
    let mut triples = Vec::with_capacity(batch.row_count() * per_row);

    for record in &batch.records {
        let identifier = record.field_for(header, 0).unwrap_or_default();
        for (i, category) in header.categories() {
            let value = record.field_for(header, i).unwrap_or_default();
            trace!(identifier, category, "pivot cell");
            triples.push(Triple::new(identifier, category, value));
        }
    }

    triples
}

/// Stable sort by category, byte-wise lexicographic.
pub fn sort_triples(triples: &mut [Triple]) {
    triples.sort_by(|a, b| a.category.cmp(&b.category));
}

/// Pivot `batch` and sort the result by category.
pub fn reshape(batch: &Batch) -> Vec<Triple> {
    let mut triples = pivot(batch);
    sort_triples(&mut triples);
    debug!(
        rows = batch.row_count(),
        triples = triples.len(),
        "reshaped"
    );
    triples
}

/// Write the `country,year,cases` header and then every triple, in order.
///
/// The header line is written even when there are no triples.
pub fn write_triples(triples: &[Triple], path: &Path) -> ReshapeResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(OUTPUT_COLUMNS)?;
    for triple in triples {
        writer.serialize(triple)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = triples.len(), "result file written");
    Ok(())
}

/// Display lines: the fixed header, then one comma-joined line per triple.
pub fn render_lines(triples: &[Triple]) -> Vec<String> {
    std::iter::once(OUTPUT_COLUMNS.join(","))
        .chain(triples.iter().map(Triple::to_line))
        .collect()
}

/// Re-read a written result file and join each row's fields with commas.
pub fn display_file(path: &Path) -> ReshapeResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut lines = Vec::new();
    for result in reader.records() {
        let row = result?;
        lines.push(row.iter().collect::<Vec<_>>().join(","));
    }
    Ok(lines)
}
