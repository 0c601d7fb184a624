// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-junit-parser: structured results from `go test -v` output
//!
//! This library crate turns the line-oriented output of a Go test run into a
//! [`Report`] of packages and tests, ready to be rendered as JUnit XML.
//!
//! # Example
//!
//! ```no_run
//! use gotest_junit_parser::{ReportParser, parse};
//!
//! // Parse a whole stream
//! let report = parse(std::io::stdin().lock()).unwrap();
//!
//! // Or feed lines one at a time
//! let mut parser = ReportParser::new();
//! parser.process_line("=== RUN   TestA");
//! let report = parser.finish().unwrap();
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod line;
pub mod parser;
pub mod report;

pub use error::ParseError;
pub use parser::{BUILD_FAILED_TEST, PACKAGE_FAILED_TEST, ReportParser, parse, parse_str};
pub use report::{Package, Report, Test, TestResult};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ParseError;
    pub use crate::parser::{ReportParser, parse};
    pub use crate::report::{Package, Report, Test, TestResult};
}
