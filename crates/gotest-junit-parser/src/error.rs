// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gotest-junit-parser

use thiserror::Error;

/// Errors that can occur while parsing test runner output
#[derive(Debug, Error)]
pub enum ParseError {
    /// Error reading the input stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream contained no recognizable test runner lines
    #[error("no test runner output recognized in {lines} input lines")]
    NoMatches {
        /// Number of lines read before giving up
        lines: usize,
    },
}
