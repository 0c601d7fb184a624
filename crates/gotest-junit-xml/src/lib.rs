// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-junit-xml: JUnit XML output for gotest-junit
//!
//! Renders one [`Package`](gotest_junit_parser::Package) at a time as a
//! `testsuite` document that CI dashboards understand.
//!
//! # Example
//!
//! ```
//! use gotest_junit_parser::parse_str;
//! use gotest_junit_xml::{RenderOptions, render_to_string};
//!
//! let report = parse_str("=== RUN   TestA\n--- PASS: TestA (0.01s)\nok  \tx/y\t0.02s\n").unwrap();
//! let xml = render_to_string(&report.packages[0], &RenderOptions::default()).unwrap();
//! assert!(xml.contains(r#"<testsuite tests="1" failures="0" skips="0" time="0.020" name="x/y">"#));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod junit;

pub use error::RenderError;
pub use junit::{
    RenderOptions, format_seconds, render_to_string, short_name, write_package, xml_safe,
};
