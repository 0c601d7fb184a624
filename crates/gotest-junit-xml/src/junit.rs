// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! JUnit `testsuite` documents
//!
//! Each package is first mapped to a `Suite` view holding every attribute
//! already formatted, then written out with `quick-xml` using tab
//! indentation. The layout follows the schema published at
//! <http://windyroad.org/dl/Open%20Source/JUnit.xsd>, with skipped tests
//! counted in a `skips` attribute.

use std::borrow::Cow;
use std::io::{self, Write};

use gotest_junit_parser::{Package, TestResult};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::RenderError;

/// Message attribute of a `failure` element
pub const FAILURE_MESSAGE: &str = "Failed";

/// Message attribute of a `skipped` element
pub const SKIPPED_MESSAGE: &str = "Skipped";

/// Settings shared by every rendered package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Value of the `go.version` property
    pub go_version: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            go_version: "unknown".to_string(),
        }
    }
}

// ============================================================================
// Document model
// ============================================================================

struct Suite<'a> {
    name: Cow<'a, str>,
    time: String,
    failures: usize,
    skips: usize,
    properties: Vec<(&'static str, String)>,
    cases: Vec<Case<'a>>,
}

struct Case<'a> {
    classname: Cow<'a, str>,
    name: Cow<'a, str>,
    time: String,
    detail: Option<Detail>,
}

/// The `failure` or `skipped` child of a test case
struct Detail {
    element: &'static str,
    message: &'static str,
    contents: String,
}

impl<'a> Suite<'a> {
    fn new(pkg: &'a Package, options: &RenderOptions) -> Self {
        let mut properties = vec![
            ("go.version", xml_safe(&options.go_version).into_owned()),
            ("gotest-junit.version", env!("CARGO_PKG_VERSION").to_string()),
        ];
        if let Some(pct) = pkg.coverage {
            properties.push(("coverage.statements.pct", format!("{pct:.2}")));
        }

        let classname = xml_safe(short_name(&pkg.name));
        let mut failures = 0;
        let mut skips = 0;
        let cases = pkg
            .tests
            .iter()
            .map(|test| {
                let detail = match test.result {
                    TestResult::Pass => None,
                    TestResult::Fail => {
                        failures += 1;
                        Some(("failure", FAILURE_MESSAGE))
                    }
                    TestResult::Skip => {
                        skips += 1;
                        Some(("skipped", SKIPPED_MESSAGE))
                    }
                };
                Case {
                    classname: classname.clone(),
                    name: xml_safe(&test.name),
                    time: format_seconds(test.time_ms),
                    detail: detail.map(|(element, message)| Detail {
                        element,
                        message,
                        contents: xml_safe(&test.output.join("\n")).into_owned(),
                    }),
                }
            })
            .collect();

        Self {
            name: xml_safe(&pkg.name),
            time: format_seconds(pkg.time_ms),
            failures,
            skips,
            properties,
            cases,
        }
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let tests = self.cases.len().to_string();
        let failures = self.failures.to_string();
        let skips = self.skips.to_string();

        writer.write_event(Event::Start(BytesStart::new("testsuite").with_attributes([
            ("tests", tests.as_str()),
            ("failures", failures.as_str()),
            ("skips", skips.as_str()),
            ("time", self.time.as_str()),
            ("name", &*self.name),
        ])))?;

        writer.write_event(Event::Start(BytesStart::new("properties")))?;
        for (name, value) in &self.properties {
            let property = BytesStart::new("property")
                .with_attributes([("name", *name), ("value", value.as_str())]);
            write_element(writer, property, "")?;
        }
        writer.write_event(Event::End(BytesEnd::new("properties")))?;

        for case in &self.cases {
            case.write(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("testsuite")))
    }
}

impl Case<'_> {
    fn write<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let start = BytesStart::new("testcase").with_attributes([
            ("classname", &*self.classname),
            ("name", &*self.name),
            ("time", self.time.as_str()),
        ]);

        let Some(detail) = &self.detail else {
            return write_element(writer, start, "");
        };

        writer.write_event(Event::Start(start.borrow()))?;
        let child = BytesStart::new(detail.element)
            .with_attributes([("message", detail.message), ("type", "")]);
        write_element(writer, child, &detail.contents)?;
        writer.write_event(Event::End(start.to_end()))
    }
}

/// Write `start`, its text and the matching end tag on one line
fn write_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    text: &str,
) -> io::Result<()> {
    writer.write_event(Event::Start(start.borrow()))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(start.to_end()))
}

/// Replace every character XML 1.0 cannot carry with U+FFFD
///
/// Tabs, newlines and carriage returns are kept; other C0 controls (ANSI
/// color escapes, NUL) and the non-characters U+FFFE/U+FFFF are replaced.
#[must_use]
pub fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

// ============================================================================
// Rendering Functions
// ============================================================================

/// Write one package as a JUnit XML document, including the XML declaration
///
/// # Errors
///
/// Returns `RenderError::Io` if the output rejects a write.
pub fn write_package<W: Write>(
    pkg: &Package,
    options: &RenderOptions,
    out: W,
) -> Result<(), RenderError> {
    let suite = Suite::new(pkg, options);

    let mut writer = Writer::new_with_indent(out, b'\t', 1);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    suite.write(&mut writer)?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Render one package to an in-memory string
///
/// # Errors
///
/// Never fails in practice; the signature mirrors [`write_package`].
pub fn render_to_string(pkg: &Package, options: &RenderOptions) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    write_package(pkg, options, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Format milliseconds as seconds with exactly three decimals
#[must_use]
pub fn format_seconds(ms: u64) -> String {
    format!("{}.{:03}", ms / 1000, ms % 1000)
}

/// The last `/`-separated element of a package name
#[must_use]
pub fn short_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotest_junit_parser::Test;
    use similar_asserts::assert_eq;

    fn test(name: &str, result: TestResult, time_ms: u64, output: &[&str]) -> Test {
        Test {
            name: name.to_string(),
            time_ms,
            result,
            output: output.iter().map(ToString::to_string).collect(),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions {
            go_version: "go1.22.4".to_string(),
        }
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0.000");
        assert_eq!(format_seconds(12), "0.012");
        assert_eq!(format_seconds(1500), "1.500");
        assert_eq!(format_seconds(123_456), "123.456");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("a/b/c"), "c");
        assert_eq!(short_name("plain"), "plain");
        assert_eq!(short_name("example.com/mod/"), "");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn test_render_passing_package() {
        let pkg = Package {
            name: "example/pkg".to_string(),
            time_ms: 12,
            tests: vec![test("TestA", TestResult::Pass, 10, &["ignored output"])],
            coverage: None,
        };

        let xml = render_to_string(&pkg, &options()).expect("render");
        let expected = format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<testsuite tests=\"1\" failures=\"0\" skips=\"0\" time=\"0.012\" name=\"example/pkg\">\n",
                "\t<properties>\n",
                "\t\t<property name=\"go.version\" value=\"go1.22.4\"></property>\n",
                "\t\t<property name=\"gotest-junit.version\" value=\"{}\"></property>\n",
                "\t</properties>\n",
                "\t<testcase classname=\"pkg\" name=\"TestA\" time=\"0.010\"></testcase>\n",
                "</testsuite>\n",
            ),
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_render_failure_and_skip() {
        let pkg = Package {
            name: "example.com/calc/parse".to_string(),
            time_ms: 41,
            tests: vec![
                test("TestA", TestResult::Fail, 20, &["line one", "line <two>"]),
                test("TestB", TestResult::Skip, 0, &["not today"]),
                test("TestC", TestResult::Pass, 1, &[]),
            ],
            coverage: Some(61.2),
        };

        let xml = render_to_string(&pkg, &options()).expect("render");
        assert!(xml.contains(
            r#"<testsuite tests="3" failures="1" skips="1" time="0.041" name="example.com/calc/parse">"#
        ));
        assert!(xml.contains(r#"<property name="coverage.statements.pct" value="61.20"></property>"#));
        assert!(xml.contains(
            "<failure message=\"Failed\" type=\"\">line one\nline &lt;two&gt;</failure>"
        ));
        assert!(xml.contains(r#"<skipped message="Skipped" type="">not today</skipped>"#));
        assert!(xml.contains(r#"<testcase classname="parse" name="TestC" time="0.001"></testcase>"#));
    }

    #[test]
    fn test_render_failure_without_output() {
        let pkg = Package {
            name: "x".to_string(),
            tests: vec![test("TestQuiet", TestResult::Fail, 0, &[])],
            ..Default::default()
        };

        let xml = render_to_string(&pkg, &options()).expect("render");
        assert!(xml.contains(r#"<failure message="Failed" type=""></failure>"#));
    }

    #[test]
    fn test_xml_safe_replaces_control_characters() {
        assert!(matches!(xml_safe("plain\ttext\r\n"), Cow::Borrowed(_)));
        assert_eq!(xml_safe("\u{1b}[31mred\u{0}").into_owned(), "\u{FFFD}[31mred\u{FFFD}");
        assert_eq!(xml_safe("\u{FFFE}ok").into_owned(), "\u{FFFD}ok");
    }

    #[test]
    fn test_render_colored_output() {
        let pkg = Package {
            name: "example/\u{7}pkg".to_string(),
            tests: vec![test(
                "TestColor\u{1b}",
                TestResult::Fail,
                0,
                &["\u{1b}[31mred\u{1b}[0m \u{0}nul"],
            )],
            ..Default::default()
        };

        let xml = render_to_string(&pkg, &options()).expect("render");
        assert!(!xml.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n')));
        assert!(xml.contains(
            "<failure message=\"Failed\" type=\"\">\u{FFFD}[31mred\u{FFFD}[0m \u{FFFD}nul</failure>"
        ));
        assert!(xml.contains("name=\"TestColor\u{FFFD}\""));
        assert!(xml.contains("name=\"example/\u{FFFD}pkg\""));
    }

    #[test]
    fn test_render_is_idempotent() {
        let pkg = Package {
            name: "a/b".to_string(),
            time_ms: 3,
            tests: vec![test("TestA", TestResult::Fail, 3, &["boom"])],
            coverage: None,
        };

        let first = render_to_string(&pkg, &options()).expect("render");
        let second = render_to_string(&pkg, &options()).expect("render");
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_errors_propagate() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = write_package(&Package::default(), &options(), Full).expect_err("should fail");
        assert!(matches!(err, RenderError::Io(e) if e.kind() == std::io::ErrorKind::StorageFull));
    }
}
