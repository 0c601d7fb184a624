// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tests for the read-parse-write pipeline


use gotest_junit::config::Config;
use gotest_junit::driver::{DriverError, run, write_reports};
use gotest_junit_parser::parse_str;
use similar_asserts::assert_eq;
use test_utils::{TempTestDir, sample_go_test_output};

fn config_for(temp: &TempTestDir) -> Config {
    Config {
        dir: temp.path().to_path_buf(),
        go_version: Some("go1.22.4".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_run_writes_one_file_per_package() {
    let temp = TempTestDir::new("run_files");
    let mut echo = Vec::new();

    let summary = run(&config_for(&temp), sample_go_test_output().as_bytes(), &mut echo)
        .expect("run should succeed");

    assert_eq!(summary.packages, 3);
    assert_eq!(summary.tests, 3);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.files.len(), 3);
    assert_eq!(echo.as_slice(), sample_go_test_output().as_bytes());

    let parse_xml = temp.read_file("parse.xml");
    assert!(parse_xml.contains(
        r#"<testsuite tests="2" failures="1" skips="1" time="0.041" name="example.com/calc/parse">"#
    ));
    assert!(parse_xml.contains(r#"<property name="go.version" value="go1.22.4"></property>"#));
    assert!(parse_xml.contains("parse_test.go:31: got 41, want 42</failure>"));

    let cmd_xml = temp.read_file("calc.xml");
    assert!(cmd_xml.contains(r#"tests="0""#));
}

#[test]
fn test_run_echoes_everything_when_destination_is_missing() {
    let temp = TempTestDir::new("missing_dest");
    let config = Config {
        dir: temp.path().join("absent"),
        ..Default::default()
    };
    let mut echo = Vec::new();

    let err = run(&config, sample_go_test_output().as_bytes(), &mut echo)
        .expect_err("missing destination should fail");

    assert!(matches!(err, DriverError::Config(_)));
    assert_eq!(
        String::from_utf8_lossy(&echo).into_owned(),
        sample_go_test_output().to_string()
    );
}

#[test]
fn test_write_failure_aborts_by_default() {
    let temp = TempTestDir::new("abort");
    temp.create_subdir("blocked.xml");
    let report = parse_str(concat!(
        "?   \tx/blocked\t[no test files]\n",
        "?   \tx/fine\t[no test files]\n",
    ))
    .expect("parse");

    let err = write_reports(&report, &config_for(&temp)).expect_err("should fail");

    assert!(matches!(err, DriverError::Create { .. }));
    assert!(!temp.file_exists("fine.xml"));
}

#[test]
fn test_keep_going_writes_remaining_packages() {
    let temp = TempTestDir::new("keep_going");
    temp.create_subdir("blocked.xml");
    let report = parse_str(concat!(
        "?   \tx/blocked\t[no test files]\n",
        "?   \tx/fine\t[no test files]\n",
    ))
    .expect("parse");
    let config = Config {
        keep_going: true,
        ..config_for(&temp)
    };

    let err = write_reports(&report, &config).expect_err("should still report the failure");

    assert!(matches!(err, DriverError::Create { .. }));
    assert!(temp.file_exists("fine.xml"));
}
