// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the report parser
//!
//! Feeds arbitrary bytes through the line classifier and state machine.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_junit_parser::parse;

fuzz_target!(|data: &[u8]| {
    // Parsing should never panic, whatever the input
    if let Ok(report) = parse(data) {
        for pkg in &report.packages {
            assert!(pkg.failures() + pkg.skips() <= pkg.tests.len());
        }
    }
});
