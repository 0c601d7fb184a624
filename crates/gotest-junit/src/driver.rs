// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Read, parse and write: the gotest-junit pipeline
//!
//! # Example
//!
//! ```no_run
//! use gotest_junit::config::Config;
//! use gotest_junit::driver::run;
//!
//! let config = Config::default();
//! let summary = run(&config, std::io::stdin().lock(), std::io::stdout().lock())
//!     .expect("run");
//! println!("wrote {} files", summary.files.len());
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use gotest_junit_parser::{Package, ParseError, Report, parse};
use gotest_junit_xml::{RenderError, RenderOptions, short_name, write_package};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError};
use crate::tee::TeeReader;

/// File stem used for a package whose name was never reported
pub const UNNAMED_PACKAGE_STEM: &str = "report";

// ============================================================================
// Error Types
// ============================================================================

/// Errors that end a run
#[derive(Debug, Error)]
pub enum DriverError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or recognizing the input failed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An output file could not be created
    #[error("creating {}: {source}", .path.display())]
    Create {
        /// The file that could not be created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// An output file could not be written
    #[error("writing {}: {source}", .path.display())]
    Write {
        /// The file being written
        path: PathBuf,
        /// Underlying error
        source: RenderError,
    },

    /// An output file could not be flushed to disk
    #[error("closing {}: {source}", .path.display())]
    Close {
        /// The file being closed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

/// What a successful run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of packages in the report
    pub packages: usize,
    /// Number of tests across all packages
    pub tests: usize,
    /// Number of failed tests across all packages
    pub failures: usize,
    /// Files written, in report order
    pub files: Vec<PathBuf>,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Echo `input` to `echo` while parsing it, then write one XML file per
/// package into the configured directory
///
/// # Errors
///
/// Returns `DriverError::Parse` if the input cannot be read or contains no
/// test output, `DriverError::Config` if the destination is unusable, and a
/// file error if an XML file cannot be written. The input is echoed in full
/// before the destination is checked.
pub fn run<R: Read, W: Write>(
    config: &Config,
    input: R,
    echo: W,
) -> Result<RunSummary, DriverError> {
    let report = parse(BufReader::new(TeeReader::new(input, echo)))?;
    config.validate()?;
    debug!(
        packages = report.packages.len(),
        tests = report.test_count(),
        "parsed report"
    );
    write_reports(&report, config)
}

/// Write one XML file per package of `report`
///
/// Stops at the first failure unless `config.keep_going` is set, in which
/// case every package is attempted and the first failure is returned.
///
/// # Errors
///
/// Returns the first `Create`, `Write` or `Close` error encountered.
pub fn write_reports(report: &Report, config: &Config) -> Result<RunSummary, DriverError> {
    let options = config.render_options();
    let mut summary = RunSummary {
        packages: report.packages.len(),
        tests: report.test_count(),
        failures: report.packages.iter().map(Package::failures).sum(),
        files: Vec::new(),
    };
    let mut first_error = None;

    for pkg in &report.packages {
        match write_package_file(pkg, &config.dir, &options) {
            Ok(path) => {
                info!(package = %pkg.name, path = %path.display(), "wrote report");
                summary.files.push(path);
            }
            Err(e) if config.keep_going => {
                warn!(package = %pkg.name, error = %e, "skipping package");
                first_error.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(summary),
    }
}

/// The output path for a package inside `dir`
#[must_use]
pub fn report_path(dir: &Path, package: &str) -> PathBuf {
    let stem = match short_name(package) {
        "" => UNNAMED_PACKAGE_STEM,
        stem => stem,
    };
    dir.join(format!("{stem}.xml"))
}

fn write_package_file(
    pkg: &Package,
    dir: &Path,
    options: &RenderOptions,
) -> Result<PathBuf, DriverError> {
    let path = report_path(dir, &pkg.name);
    let file = File::create(&path).map_err(|source| DriverError::Create {
        path: path.clone(),
        source,
    })?;

    let mut out = BufWriter::new(file);
    if let Err(source) = write_package(pkg, options, &mut out) {
        return Err(DriverError::Write { path, source });
    }

    let closed = out
        .into_inner()
        .map_err(|e| e.into_error())
        .and_then(|file| file.sync_all());
    match closed {
        Ok(()) => Ok(path),
        Err(source) => Err(DriverError::Close { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path_uses_short_name() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            report_path(dir, "example.com/calc/parse"),
            PathBuf::from("/tmp/out/parse.xml")
        );
        assert_eq!(report_path(dir, "calc"), PathBuf::from("/tmp/out/calc.xml"));
        assert_eq!(report_path(dir, ""), PathBuf::from("/tmp/out/report.xml"));
    }

    #[test]
    fn test_run_rejects_unrecognized_input() {
        let mut echo = Vec::new();
        let err = run(&Config::default(), "just some text\n".as_bytes(), &mut echo)
            .expect_err("should fail");

        assert!(matches!(err, DriverError::Parse(ParseError::NoMatches { .. })));
        assert_eq!(echo, b"just some text\n");
    }

    #[test]
    fn test_create_error_names_the_file() {
        let config = Config {
            dir: PathBuf::from("/nonexistent/path/12345"),
            ..Default::default()
        };
        let report = gotest_junit_parser::parse_str("?   \tx/y\t[no test files]").expect("parse");

        let err = write_reports(&report, &config).expect_err("should fail");
        assert!(matches!(err, DriverError::Create { .. }));
        assert!(err.to_string().contains("y.xml"));
    }

    #[test]
    fn test_run_echoes_input_before_rejecting_destination() {
        let config = Config {
            dir: PathBuf::from("/nonexistent/path/12345"),
            ..Default::default()
        };
        let input = "=== RUN   TestA\n--- PASS: TestA (0.00s)\nok  \tx/y\t0.001s\n";
        let mut echo = Vec::new();

        let err = run(&config, input.as_bytes(), &mut echo).expect_err("should fail");

        assert!(matches!(err, DriverError::Config(ConfigError::DirectoryNotFound(_))));
        similar_asserts::assert_eq!(echo.as_slice(), input.as_bytes());
    }
}
