//! tidyshape CLI - reshape a wide table from stdin into `country,year,cases`
//!
//! ```bash
//! printf 'country,1999,2000\nA,0.7K,2K\nB,37K,80K\n\n' | tidyshape
//! tidyshape --output long.csv --staging wide.csv < table.csv
//! tidyshape --in-memory --report run.json -v < table.csv
//! ```
//!
//! The long table is written to the result file and printed to stdout. On a
//! header/detail width mismatch the fixed diagnostic is printed instead, no
//! file is written, and the exit status is 1.

use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tidyshape::error::PipelineResult;
use tidyshape::logs::{init_logging, LogConfig};
use tidyshape::{
    run, PipelineReport, ReshapeOptions, DEFAULT_DELIMITER, DEFAULT_RESULT_FILE,
    DEFAULT_STAGING_FILE,
};

#[derive(Parser)]
#[command(name = "tidyshape")]
#[command(about = "Reshape a wide CSV table from stdin into long country,year,cases form", long_about = None)]
struct Cli {
    /// Staging file the validated input is written to and re-read from
    #[arg(long, env = "TIDYSHAPE_STAGING", default_value = DEFAULT_STAGING_FILE)]
    staging: PathBuf,

    /// Result file for the long table
    #[arg(short, long, env = "TIDYSHAPE_OUTPUT", default_value = DEFAULT_RESULT_FILE)]
    output: PathBuf,

    /// Input field delimiter
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    /// Hand the validated table straight to the reshape step (no staging file)
    #[arg(long)]
    in_memory: bool,

    /// Write a JSON run summary to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> ReshapeOptions {
        ReshapeOptions {
            staging_path: self.staging.clone(),
            result_path: self.output.clone(),
            delimiter: self.delimiter,
            round_trip: !self.in_memory,
        }
    }

    fn log_config(&self) -> LogConfig {
        let config = if self.quiet {
            LogConfig::quiet()
        } else {
            LogConfig::from_verbosity(self.verbose)
        };
        config.with_ansi(io::stderr().is_terminal())
    }
}

fn main() -> ExitCode {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_config());

    let result = run(io::stdin().lock(), &cli.options());
    let succeeded = match print_outcome(&result, &mut io::stdout().lock(), &mut io::stderr().lock()) {
        Ok(succeeded) => succeeded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let (Ok(report), Some(path)) = (&result, cli.report.as_deref()) {
        if let Err(e) = write_report(report, path) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print a run's outcome and return whether it succeeded.
///
/// Success prints the display lines to `out`. A width mismatch prints the
/// fixed diagnostic to `out`; any other failure goes to `err`.
fn print_outcome<O: Write, E: Write>(
    result: &PipelineResult<PipelineReport>,
    out: &mut O,
    err: &mut E,
) -> io::Result<bool> {
    match result {
        Ok(report) => {
            for line in &report.lines {
                writeln!(out, "{}", line)?;
            }
            Ok(true)
        }
        Err(e) if e.is_column_mismatch() => {
            writeln!(out, "{}", e)?;
            Ok(false)
        }
        Err(e) => {
            writeln!(err, "Error: {}", e)?;
            Ok(false)
        }
    }
}

fn write_report(report: &PipelineReport, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    tracing::info!("report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;
    use tidyshape::COLUMN_MISMATCH_MESSAGE;

    fn run_in(dir: &Path, input: &str) -> (PipelineResult<PipelineReport>, ReshapeOptions) {
        let options = ReshapeOptions {
            staging_path: dir.join("stdin.csv"),
            result_path: dir.join("result.csv"),
            ..ReshapeOptions::default()
        };
        (run(Cursor::new(input.to_string()), &options), options)
    }

    fn outcome(result: &PipelineResult<PipelineReport>) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = print_outcome(result, &mut out, &mut err).unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_success_prints_long_table() {
        let dir = tempdir().unwrap();
        let (result, _) = run_in(dir.path(), "country,1999,2000\nA,0.7K,2K\nB,37K,80K\n\n");

        let (ok, out, err) = outcome(&result);
        assert!(ok);
        assert_eq!(
            out,
            "country,year,cases\nA,1999,0.7K\nB,1999,37K\nA,2000,2K\nB,2000,80K\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_empty_input_prints_header() {
        let dir = tempdir().unwrap();
        let (result, _) = run_in(dir.path(), "");

        let (ok, out, _) = outcome(&result);
        assert!(ok);
        assert_eq!(out, "country,year,cases\n");
    }

    #[test]
    fn test_mismatch_prints_diagnostic_and_fails() {
        let dir = tempdir().unwrap();
        let (result, options) = run_in(dir.path(), "country,1999\nA,0.7K,2K\n");

        let (ok, out, err) = outcome(&result);
        assert!(!ok);
        assert_eq!(out, format!("{}\n", COLUMN_MISMATCH_MESSAGE));
        assert!(err.is_empty());
        assert!(!options.result_path.exists());
    }

    #[test]
    fn test_io_failure_goes_to_stderr() {
        let dir = tempdir().unwrap();
        let options = ReshapeOptions {
            staging_path: dir.path().join("missing").join("stdin.csv"),
            result_path: dir.path().join("result.csv"),
            ..ReshapeOptions::default()
        };
        let result = run(Cursor::new("country,1999\nA,1\n"), &options);

        let (ok, out, err) = outcome(&result);
        assert!(!ok);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: "));
    }

    #[test]
    fn test_cli_maps_flags_to_options() {
        let cli = Cli::parse_from([
            "tidyshape",
            "--staging",
            "wide.csv",
            "-o",
            "long.csv",
            "-d",
            ";",
            "--in-memory",
        ]);
        let options = cli.options();
        assert_eq!(options.staging_path, PathBuf::from("wide.csv"));
        assert_eq!(options.result_path, PathBuf::from("long.csv"));
        assert_eq!(options.delimiter, ';');
        assert!(!options.round_trip);
    }
}
