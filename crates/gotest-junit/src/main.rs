// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-junit: JUnit XML reports from `go test -v` output
//!
//! Reads test output on stdin, echoes it to stdout and writes one XML file
//! per package.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use gotest_junit::config::Config;
use gotest_junit::driver::run;

fn main() -> ExitCode {
    let config = Config::parse();

    // stdout carries the echoed input, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match try_main(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(config: &Config) -> anyhow::Result<()> {
    let summary = run(config, io::stdin().lock(), io::stdout().lock())?;
    info!(
        packages = summary.packages,
        tests = summary.tests,
        failures = summary.failures,
        "done"
    );
    Ok(())
}
