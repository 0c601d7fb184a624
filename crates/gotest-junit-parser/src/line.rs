// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line classification for `go test -v` output
//!
//! Every input line is matched against a prioritized table of patterns. The
//! first pattern that matches decides the [`Line`] kind; anything that matches
//! nothing is plain [`Line::Output`].
//!
//! # Example
//!
//! ```
//! use gotest_junit_parser::line::{Line, classify};
//! use gotest_junit_parser::TestResult;
//!
//! assert_eq!(classify("=== RUN   TestA"), Line::TestStart { name: "TestA" });
//! assert_eq!(
//!     classify("--- FAIL: TestA (0.25s)"),
//!     Line::TestEnd { result: TestResult::Fail, name: "TestA", time_ms: 250 },
//! );
//! assert_eq!(classify("hello"), Line::Output("hello"));
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::report::TestResult;

/// A classified input line, borrowing from the raw text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line<'a> {
    /// `=== RUN   <name>`
    TestStart {
        /// Test name
        name: &'a str,
    },
    /// `=== PAUSE <name>` (parallel test suspended)
    TestPause {
        /// Test name
        name: &'a str,
    },
    /// `=== CONT  <name>` or `=== NAME  <name>` (output resumes for a test)
    TestCont {
        /// Test name
        name: &'a str,
    },
    /// `--- PASS: <name> (0.01s)` and the FAIL/SKIP variants
    TestEnd {
        /// Outcome named by the marker
        result: TestResult,
        /// Test name
        name: &'a str,
        /// Elapsed time, 0 when missing or malformed
        time_ms: u64,
    },
    /// `ok  \t<pkg>\t0.012s`
    PackageOk {
        /// Full package name
        name: &'a str,
        /// Elapsed time, 0 for cached results
        time_ms: u64,
        /// Statement coverage, if appended to the summary
        coverage: Option<f64>,
    },
    /// `FAIL\t<pkg>\t0.012s` or `FAIL\t<pkg> [build failed]`
    PackageFail {
        /// Full package name
        name: &'a str,
        /// Elapsed time, 0 when the package never ran
        time_ms: u64,
        /// Whether the package failed to build rather than failing a test
        build_failed: bool,
    },
    /// `?   \t<pkg>\t[no test files]`
    NoTestFiles {
        /// Full package name
        name: &'a str,
    },
    /// `coverage: 75.0% of statements`
    Coverage {
        /// Statement coverage percentage
        percent: f64,
    },
    /// Anything else
    Output(&'a str),
}

impl Line<'_> {
    /// Whether this line drives a state transition
    #[must_use]
    pub fn is_marker(&self) -> bool {
        !matches!(self, Line::Output(_))
    }
}

struct Matcher {
    regex: Regex,
    build: for<'h> fn(&Captures<'h>) -> Line<'h>,
}

impl Matcher {
    fn new(pattern: &str, build: for<'h> fn(&Captures<'h>) -> Line<'h>) -> Self {
        Self {
            regex: Regex::new(pattern).expect("line pattern must compile"),
            build,
        }
    }
}

/// Patterns in priority order; the first match wins.
static MATCHERS: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    vec![
        Matcher::new(r"^=== RUN\s+(.+?)\s*$", |c| Line::TestStart {
            name: group(c, 1),
        }),
        Matcher::new(r"^=== (PAUSE|CONT|NAME)\s+(.+?)\s*$", |c| match group(c, 1) {
            "PAUSE" => Line::TestPause { name: group(c, 2) },
            _ => Line::TestCont { name: group(c, 2) },
        }),
        Matcher::new(
            r"^\s*--- (PASS|FAIL|SKIP): (.+?)(?: \(([^()]*)\))?\s*$",
            |c| Line::TestEnd {
                result: TestResult::from_marker(group(c, 1)).unwrap_or(TestResult::Fail),
                name: group(c, 2),
                time_ms: parse_duration(group(c, 3)),
            },
        ),
        Matcher::new(
            r"^ok\s+(\S+)\s+(?:(\d+(?:\.\d+)?)s|\(cached\))(?:\s+coverage:\s+(\d+(?:\.\d+)?)% of statements)?",
            |c| Line::PackageOk {
                name: group(c, 1),
                time_ms: parse_seconds(group(c, 2)),
                coverage: group(c, 3).parse().ok(),
            },
        ),
        Matcher::new(
            r"^FAIL\s+(\S+)\s+(?:(\d+(?:\.\d+)?)s|\[(?:build|setup) failed\])",
            |c| Line::PackageFail {
                name: group(c, 1),
                time_ms: parse_seconds(group(c, 2)),
                build_failed: c.get(2).is_none(),
            },
        ),
        Matcher::new(r"^\?\s+(\S+)\s+\[no test files\]", |c| Line::NoTestFiles {
            name: group(c, 1),
        }),
        Matcher::new(r"^coverage:\s+(\d+(?:\.\d+)?)% of statements", |c| {
            Line::Coverage {
                percent: group(c, 1).parse().unwrap_or(0.0),
            }
        }),
    ]
});

/// Classify a single line of runner output
///
/// A trailing carriage return is ignored so CRLF input classifies the same
/// as LF input.
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    MATCHERS
        .iter()
        .find_map(|m| m.regex.captures(line).map(|c| (m.build)(&c)))
        .unwrap_or(Line::Output(line))
}

fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Parse the parenthesized duration of a `--- VERB:` marker
///
/// Accepts `0.01s` and the legacy `0.01 seconds`. Anything else yields 0.
fn parse_duration(text: &str) -> u64 {
    let text = text.trim();
    let secs = text
        .strip_suffix(" seconds")
        .or_else(|| text.strip_suffix('s'))
        .unwrap_or("");
    parse_seconds(secs)
}

/// Convert decimal seconds to whole milliseconds, rounding to nearest
fn parse_seconds(secs: &str) -> u64 {
    match secs.parse::<f64>() {
        Ok(s) if s.is_finite() && s >= 0.0 => (s * 1000.0).round() as u64,
        _ => 0,
    }
}
