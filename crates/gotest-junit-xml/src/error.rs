// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gotest-junit-xml

use thiserror::Error;

/// Errors that can occur while rendering a report
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output sink rejected a write
    #[error("writing xml: {0}")]
    Io(#[from] std::io::Error),
}
