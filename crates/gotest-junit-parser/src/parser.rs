// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Streaming parser for `go test -v` output
//!
//! [`ReportParser`] consumes one line at a time in a single forward pass. Each
//! classified [`Line`] is routed to exactly one transition on the parser
//! state, and finished packages and tests are moved into the [`Report`] as
//! soon as their closing line is seen.
//!
//! # Example
//!
//! ```
//! use gotest_junit_parser::{TestResult, parse_str};
//!
//! let input = "=== RUN   TestA\n--- PASS: TestA (0.01s)\nok  \texample/pkg\t0.012s\n";
//! let report = parse_str(input).unwrap();
//!
//! let pkg = &report.packages[0];
//! assert_eq!(pkg.name, "example/pkg");
//! assert_eq!(pkg.time_ms, 12);
//! assert_eq!(pkg.tests[0].result, TestResult::Pass);
//! ```

use std::io::BufRead;

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::line::{Line, classify};
use crate::report::{Package, Report, Test, TestResult};

/// Name of the synthetic test standing in for a package that failed to build
pub const BUILD_FAILED_TEST: &str = "[build failed]";

/// Name of the synthetic test for a package that failed without running tests
pub const PACKAGE_FAILED_TEST: &str = "[package failed]";

// ============================================================================
// Accumulators
// ============================================================================

/// The test currently receiving output
#[derive(Debug)]
struct TestAccumulator {
    name: String,
    output: Vec<String>,
}

impl TestAccumulator {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            output: Vec::new(),
        }
    }

    fn finish(self, result: TestResult, time_ms: u64) -> Test {
        Test {
            name: self.name,
            time_ms,
            result,
            output: self.output,
        }
    }
}

/// An open package whose summary line has not been seen yet
#[derive(Debug, Default)]
struct PackageAccumulator {
    tests: Vec<Test>,
    /// Indices into `tests` of tests ended by a later RUN rather than by
    /// their own result marker. A late marker may still resolve them.
    implicit: Vec<usize>,
    current: Option<TestAccumulator>,
    /// Output seen while no test was running
    output: Vec<String>,
    coverage: Option<f64>,
}

impl PackageAccumulator {
    fn push_output(&mut self, text: &str) {
        match self.current.as_mut() {
            Some(test) => test.output.push(text.to_string()),
            None => self.output.push(text.to_string()),
        }
    }

    fn start_test(&mut self, name: &str) {
        self.end_dangling(TestResult::Pass);
        self.current = Some(TestAccumulator::new(name));
    }

    /// Finalize the running test, if any, without a result marker
    fn end_dangling(&mut self, result: TestResult) {
        if let Some(test) = self.current.take() {
            debug!(test = %test.name, %result, "test ended without a result marker");
            self.implicit.push(self.tests.len());
            self.tests.push(test.finish(result, 0));
        }
    }

    fn end_test(&mut self, result: TestResult, name: &str, time_ms: u64) {
        if self.current.as_ref().is_some_and(|t| t.name == name) {
            if let Some(test) = self.current.take() {
                self.tests.push(test.finish(result, time_ms));
            }
            return;
        }

        // Parent tests are ended implicitly when their first subtest starts,
        // and their own marker arrives after the subtests'.
        if let Some(pos) = self
            .implicit
            .iter()
            .rposition(|&i| self.tests[i].name == name)
        {
            let test = &mut self.tests[self.implicit.remove(pos)];
            test.result = result;
            test.time_ms = time_ms;
            return;
        }

        debug!(
            marker = name,
            current = self.current.as_ref().map(|t| t.name.as_str()),
            "result marker does not match the running test"
        );
        let mut test = self
            .current
            .take()
            .unwrap_or_else(|| TestAccumulator::new(name));
        test.name = name.to_string();
        self.tests.push(test.finish(result, time_ms));
    }

    /// Replace an empty test list with one failing test carrying the
    /// package-level output
    fn synthesize_failure(&mut self, build_failed: bool) {
        let name = if build_failed {
            BUILD_FAILED_TEST
        } else {
            PACKAGE_FAILED_TEST
        };
        self.tests.push(Test {
            name: name.to_string(),
            time_ms: 0,
            result: TestResult::Fail,
            output: std::mem::take(&mut self.output),
        });
    }

    fn close(self, name: &str, time_ms: u64, coverage: Option<f64>) -> Package {
        Package {
            name: name.to_string(),
            time_ms,
            tests: self.tests,
            coverage: coverage.or(self.coverage),
        }
    }
}

// ============================================================================
// Parser
// ============================================================================

/// A single-pass parser turning runner output into a [`Report`]
///
/// One parser handles exactly one stream; [`ReportParser::finish`] consumes
/// it.
#[derive(Debug, Default)]
pub struct ReportParser {
    report: Report,
    package: Option<PackageAccumulator>,
    lines: usize,
    recognized: usize,
}

impl ReportParser {
    /// Create a new parser
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines processed so far
    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Packages closed so far
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.report.packages
    }

    /// Process a single line of output, without its trailing newline
    pub fn process_line(&mut self, raw: &str) {
        self.lines += 1;
        let line = classify(raw);
        if line.is_marker() {
            self.recognized += 1;
            trace!(number = self.lines, ?line, "marker");
        }

        match line {
            Line::TestStart { name } => self.open_package().start_test(name),
            Line::TestPause { name } | Line::TestCont { name } => {
                trace!(test = name, "parallel test marker");
            }
            Line::TestEnd {
                result,
                name,
                time_ms,
            } => self.open_package().end_test(result, name, time_ms),
            Line::PackageOk {
                name,
                time_ms,
                coverage,
            } => {
                let mut pkg = self.package.take().unwrap_or_default();
                pkg.end_dangling(TestResult::Pass);
                self.push_package(pkg.close(name, time_ms, coverage));
            }
            Line::PackageFail {
                name,
                time_ms,
                build_failed,
            } => {
                let mut pkg = self.package.take().unwrap_or_default();
                pkg.end_dangling(TestResult::Fail);
                if pkg.tests.is_empty() {
                    pkg.synthesize_failure(build_failed);
                }
                self.push_package(pkg.close(name, time_ms, None));
            }
            Line::NoTestFiles { name } => {
                let mut pkg = self.package.take().unwrap_or_default();
                pkg.end_dangling(TestResult::Pass);
                self.push_package(pkg.close(name, 0, None));
            }
            Line::Coverage { percent } => self.open_package().coverage = Some(percent),
            Line::Output(text) => self.open_package().push_output(text),
        }
    }

    /// Finish parsing and return the report
    ///
    /// A package still open at end of stream is kept if it recorded any
    /// tests; a test still running is counted as failed, since the run was
    /// cut short.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::NoMatches` if no line of the stream was
    /// recognized as test runner output.
    pub fn finish(mut self) -> Result<Report, ParseError> {
        if self.recognized == 0 {
            return Err(ParseError::NoMatches { lines: self.lines });
        }

        if let Some(mut pkg) = self.package.take() {
            pkg.end_dangling(TestResult::Fail);
            if pkg.tests.is_empty() {
                debug!(
                    lines = pkg.output.len(),
                    "discarding trailing output outside any package"
                );
            } else {
                debug!(tests = pkg.tests.len(), "closing unterminated package");
                self.push_package(pkg.close("", 0, None));
            }
        }

        Ok(self.report)
    }

    fn open_package(&mut self) -> &mut PackageAccumulator {
        self.package.get_or_insert_with(PackageAccumulator::default)
    }

    fn push_package(&mut self, pkg: Package) {
        debug!(
            package = %pkg.name,
            tests = pkg.tests.len(),
            time_ms = pkg.time_ms,
            "package closed"
        );
        self.report.packages.push(pkg);
    }
}

// ============================================================================
// Parsing Functions
// ============================================================================

/// Parse a complete stream of runner output
///
/// Lines are decoded lossily, so stray non-UTF-8 bytes in program output do
/// not abort the parse.
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails, or `ParseError::NoMatches` if
/// nothing in the stream was recognized.
pub fn parse<R: BufRead>(mut reader: R) -> Result<Report, ParseError> {
    let mut parser = ReportParser::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf);
        parser.process_line(&String::from_utf8_lossy(bytes));
    }

    parser.finish()
}

/// Parse runner output held in memory
///
/// # Errors
///
/// Returns `ParseError::NoMatches` if nothing in the input was recognized.
pub fn parse_str(input: &str) -> Result<Report, ParseError> {
    let mut parser = ReportParser::new();
    for line in input.lines() {
        parser.process_line(line);
    }
    parser.finish()
}
