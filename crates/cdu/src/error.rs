//! Error types for CDU conversions.
//!
//! This module provides the main error type [`CduError`] which wraps the
//! conditions that stop a conversion from producing any result.

use std::io;

use thiserror::Error;

use cdu_parser::error::ParseError;

/// The main error type for CDU operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics, so their spans can be rendered as snippets.
#[derive(Debug, Error)]
pub enum CduError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CduError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
