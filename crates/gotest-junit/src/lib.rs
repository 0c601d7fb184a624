// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-junit library
//!
//! This module exports the command-line driver of gotest-junit for use in
//! integration tests and as a library.

pub mod config;
pub mod driver;
pub mod tee;
