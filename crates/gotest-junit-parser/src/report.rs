// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report data model

use serde::{Deserialize, Serialize};

/// The structured result of parsing one input stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Packages in the order they were closed in the stream
    pub packages: Vec<Package>,
}

impl Report {
    /// Check if the report holds no packages at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Total number of tests across all packages
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.packages.iter().map(|p| p.tests.len()).sum()
    }

    /// Look up a package by its full name
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }
}

/// One test binary's results for a single named package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Full import path, as printed on the summary line
    pub name: String,
    /// Elapsed time in milliseconds
    pub time_ms: u64,
    /// Tests in the order they finished
    pub tests: Vec<Test>,
    /// Statement coverage percentage, when the runner reported one
    pub coverage: Option<f64>,
}

impl Package {
    /// Number of failed tests
    #[must_use]
    pub fn failures(&self) -> usize {
        self.count(TestResult::Fail)
    }

    /// Number of skipped tests
    #[must_use]
    pub fn skips(&self) -> usize {
        self.count(TestResult::Skip)
    }

    /// Check if no test in the package failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures() == 0
    }

    fn count(&self, result: TestResult) -> usize {
        self.tests.iter().filter(|t| t.result == result).count()
    }
}

/// One test case's outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    /// Test name, including any `/subtest` suffix
    pub name: String,
    /// Elapsed time in milliseconds
    pub time_ms: u64,
    /// Final outcome
    pub result: TestResult,
    /// Lines printed while this test was running
    pub output: Vec<String>,
}

/// Possible test outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestResult {
    /// Test passed
    Pass,
    /// Test failed
    Fail,
    /// Test was skipped
    Skip,
}

impl TestResult {
    /// Map the verb of a `--- VERB:` marker to an outcome
    #[must_use]
    pub fn from_marker(verb: &str) -> Option<Self> {
        match verb {
            "PASS" => Some(Self::Pass),
            "FAIL" => Some(Self::Fail),
            "SKIP" => Some(Self::Skip),
            _ => None,
        }
    }

    /// The marker verb for this outcome
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        }
    }
}

impl std::fmt::Display for TestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
