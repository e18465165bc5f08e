//! High-level pipeline: read, validate, stage, reshape, write.
//!
//! # Example
//!
//! ```rust,no_run
//! use tidyshape::{run, ReshapeOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stdin = std::io::stdin();
//!     let report = run(stdin.lock(), &ReshapeOptions::default())?;
//!     for line in &report.lines {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;

use super::pivot::{display_file, reshape, write_triples, DEFAULT_RESULT_FILE};
use crate::error::{IngestError, PipelineResult};
use crate::logs::{log_error, log_info, log_success, log_warning};
use crate::parser::{read_batch, DEFAULT_DELIMITER};
use crate::storage::{round_trip, DEFAULT_STAGING_FILE};

/// Options for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReshapeOptions {
    /// Where the validated wide table is staged before reshaping
    pub staging_path: PathBuf,

    /// Where the long `country,year,cases` table is written
    pub result_path: PathBuf,

    /// Input field delimiter
    pub delimiter: char,

    /// Stage through `staging_path` and re-read it. When false, the validated
    /// batch goes straight to the reshape stage and no staging file is written.
    pub round_trip: bool,
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self {
            staging_path: PathBuf::from(DEFAULT_STAGING_FILE),
            result_path: PathBuf::from(DEFAULT_RESULT_FILE),
            delimiter: DEFAULT_DELIMITER,
            round_trip: true,
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Input header, identifier column first
    pub header: Vec<String>,

    /// Number of data rows read
    pub row_count: usize,

    /// Number of long rows written (excluding the header line)
    pub triple_count: usize,

    /// Staging file, if the round-trip was used
    pub staging_path: Option<PathBuf>,

    /// Result file
    pub result_path: PathBuf,

    /// Display lines, header first, in sorted order
    pub lines: Vec<String>,
}

/// Run the whole pipeline on `input`.
///
/// 1. Read and validate the wide table
/// 2. Stage it to `staging_path` and read it back (unless disabled)
/// 3. Pivot and sort by category
/// 4. Write `result_path` and read it back for display
///
/// A width mismatch stops the run before any file is touched.
pub fn run<R: Read>(input: R, options: &ReshapeOptions) -> PipelineResult<PipelineReport> {
    // Step 1: Ingest
    log_info("Reading wide table...");
    let batch = match read_batch(input, options.delimiter) {
        Ok(batch) => batch,
        Err(e) => {
            if let IngestError::ColumnMismatch { line, expected, found } = &e {
                log_error(format!(
                    "line {}: expected {} columns, found {}",
                    line, expected, found
                ));
            }
            return Err(e.into());
        }
    };
    log_success(format!(
        "Read {} rows, {} columns",
        batch.row_count(),
        batch.header.width()
    ));
    match batch.header.identifier() {
        Some(id) if batch.header.width() == 1 => {
            log_warning(format!("Only the identifier column '{}', nothing to pivot", id));
        }
        Some(id) => log_info(format!("Identifier column: {}", id)),
        None => log_warning("Empty input, writing header only"),
    }

    let header = batch.header.names().to_vec();
    let row_count = batch.row_count();

    // Step 2: Stage
    let (batch, staging_path) = if options.round_trip {
        log_info(format!("Staging to {}", options.staging_path.display()));
        let staged = round_trip(&batch, &options.staging_path)?;
        (staged, Some(options.staging_path.clone()))
    } else {
        log_info("Staging skipped (in-memory hand-off)");
        (batch, None)
    };

    // Step 3: Reshape
    log_info("Reshaping...");
    let triples = reshape(&batch);
    log_success(format!("{} long rows", triples.len()));

    // Step 4: Output
    write_triples(&triples, &options.result_path)?;
    let lines = display_file(&options.result_path)?;
    log_success(format!("Wrote {}", options.result_path.display()));

    Ok(PipelineReport {
        header,
        row_count,
        triple_count: triples.len(),
        staging_path,
        result_path: options.result_path.clone(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, COLUMN_MISMATCH_MESSAGE};
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn options_in(dir: &Path) -> ReshapeOptions {
        ReshapeOptions {
            staging_path: dir.join("stdin.csv"),
            result_path: dir.join("result.csv"),
            ..ReshapeOptions::default()
        }
    }

    #[test]
    fn test_default_options() {
        let opts = ReshapeOptions::default();
        assert_eq!(opts.staging_path, PathBuf::from("stdin.csv"));
        assert_eq!(opts.result_path, PathBuf::from("result.csv"));
        assert_eq!(opts.delimiter, ',');
        assert!(opts.round_trip);
    }

    #[test]
    fn test_three_countries() {
        let dir = tempdir().unwrap();
        let opts = options_in(dir.path());
        let input = "country,1999,2000\nA,0.7K,2K\nB,37K,80K\nC,212K,213K\n";

        let report = run(Cursor::new(input), &opts).unwrap();
        assert_eq!(
            report.lines,
            vec![
                "country,year,cases",
                "A,1999,0.7K",
                "B,1999,37K",
                "C,1999,212K",
                "A,2000,2K",
                "B,2000,80K",
                "C,2000,213K",
            ]
        );
        assert_eq!(report.row_count, 3);
        assert_eq!(report.triple_count, 6);
        assert_eq!(
            std::fs::read_to_string(&opts.staging_path).unwrap(),
            "country,1999,2000\nA,0.7K,2K\nB,37K,80K\nC,212K,213K\n"
        );
        let written = std::fs::read_to_string(&opts.result_path).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), report.lines);
    }

    #[test]
    fn test_empty_input() {
        let dir = tempdir().unwrap();
        let report = run(Cursor::new(""), &options_in(dir.path())).unwrap();
        assert_eq!(report.lines, vec!["country,year,cases"]);
        assert_eq!(report.triple_count, 0);
        assert!(report.header.is_empty());
    }

    #[test]
    fn test_header_only_input() {
        let dir = tempdir().unwrap();
        let report = run(Cursor::new("country,1999,2000\n"), &options_in(dir.path())).unwrap();
        assert_eq!(report.lines, vec!["country,year,cases"]);
        assert_eq!(report.row_count, 0);
    }

    #[test]
    fn test_noise_input_passes_through() {
        let dir = tempdir().unwrap();
        let input = "fdg测jk,uプio,ip试of,xcキk,fdg\n\
                     moにkf,gjあi,miすo,a🐰sp,Привет.[\n\
                     skdl,asdif,l;'k,&l%$,{*(&$23\n";
        let report = run(Cursor::new(input), &options_in(dir.path())).unwrap();
        assert_eq!(report.triple_count, 8);
        assert_eq!(
            report.lines,
            vec![
                "country,year,cases",
                "moにkf,fdg,Привет.[",
                "skdl,fdg,{*(&$23",
                "moにkf,ip试of,miすo",
                "skdl,ip试of,l;'k",
                "moにkf,uプio,gjあi",
                "skdl,uプio,asdif",
                "moにkf,xcキk,a🐰sp",
                "skdl,xcキk,&l%$",
            ]
        );
    }

    #[test]
    fn test_mismatch_writes_nothing() {
        let dir = tempdir().unwrap();
        let opts = options_in(dir.path());
        let input = "country,1999\nA,0.7K,2K\nB,37K,80K\n";

        let err = run(Cursor::new(input), &opts).unwrap_err();
        assert!(err.is_column_mismatch());
        assert_eq!(err.to_string(), COLUMN_MISMATCH_MESSAGE);
        assert!(!opts.staging_path.exists());
        assert!(!opts.result_path.exists());
    }

    #[test]
    fn test_short_row_mismatch() {
        let dir = tempdir().unwrap();
        let input = "country,1999,2000\nA,0.7K\nB,37K,80K\n";
        let err = run(Cursor::new(input), &options_in(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Ingest(IngestError::ColumnMismatch { line: 2, expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_in_memory_matches_round_trip() {
        let input = "country,2,10\nA,x,y\nB,z,\"w\n";

        let staged_dir = tempdir().unwrap();
        let staged = run(Cursor::new(input), &options_in(staged_dir.path())).unwrap();

        let memory_dir = tempdir().unwrap();
        let opts = ReshapeOptions {
            round_trip: false,
            ..options_in(memory_dir.path())
        };
        let direct = run(Cursor::new(input), &opts).unwrap();

        assert_eq!(staged.lines, direct.lines);
        assert_eq!(direct.staging_path, None);
        assert!(!opts.staging_path.exists());
        assert_eq!(
            direct.lines,
            vec!["country,year,cases", "A,10,y", "B,10,\"w", "A,2,x", "B,2,z"]
        );
    }

    #[test]
    fn test_report_serializes() {
        let dir = tempdir().unwrap();
        let report = run(Cursor::new("country,1999\nA,1\n"), &options_in(dir.path())).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["row_count"], 1);
        assert_eq!(json["triple_count"], 1);
        assert_eq!(json["header"][1], "1999");
    }
}
