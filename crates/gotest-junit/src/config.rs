// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the gotest-junit command
//!
//! This module provides the command-line surface: the destination directory
//! for XML files, report properties, the write-failure policy and logging
//! options.

use std::path::PathBuf;

use clap::Parser;
use gotest_junit_xml::RenderOptions;

/// Default destination directory for XML files
pub const DEFAULT_DIR: &str = ".";

/// Convert `go test -v` output read from stdin into JUnit XML files
///
/// Input is echoed unchanged to stdout while it is read. One
/// `<package>.xml` file is written per package, named after the last
/// element of the package path.
#[derive(Parser, Debug, Clone)]
#[command(name = "gotest-junit")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Write XML files to this directory
    #[arg(short, long, env = "GOTEST_JUNIT_DIR", default_value = DEFAULT_DIR)]
    pub dir: PathBuf,

    /// Go version recorded in each report's properties
    ///
    /// Typically the output of `go env GOVERSION`.
    #[arg(long, env = "GOTEST_JUNIT_GO_VERSION")]
    pub go_version: Option<String>,

    /// Keep writing the remaining packages after a file fails to write
    ///
    /// The first failure is still reported and the exit code is non-zero.
    #[arg(short, long, default_value = "false")]
    pub keep_going: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr; stdout carries the echoed input.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only log errors
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            go_version: None,
            keep_going: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the destination directory does not exist or is
    /// not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dir.exists() {
            return Err(ConfigError::DirectoryNotFound(self.dir.clone()));
        }
        if !self.dir.is_dir() {
            return Err(ConfigError::NotADirectory(self.dir.clone()));
        }
        Ok(())
    }

    /// Options for the XML renderer
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        match &self.go_version {
            Some(version) => RenderOptions {
                go_version: version.clone(),
            },
            None => RenderOptions::default(),
        }
    }

    /// Get the log level based on verbose/quiet flags
    ///
    /// Warnings are shown by default so a clean run prints nothing on stderr.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::ERROR
        } else {
            tracing::Level::WARN
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Destination directory not found
    #[error("destination directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Destination path is not a directory
    #[error("destination is not a directory: {0}")]
    NotADirectory(PathBuf),
}
