//! Error and diagnostic system for the CDU parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//! - [`Diagnosed`] results carrying a value alongside its diagnostics
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text.
//!
//! Most problems in a CDU file are recoverable: the offending line is skipped
//! and parsing continues. Those problems are returned as diagnostics inside a
//! [`Diagnosed`] value. Only a file without any diagram is a hard failure,
//! reported as a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use cdu_parser::error::{Diagnostic, ErrorCode};
//! # use cdu_parser::Span;
//!
//! let span = Span::new(120..124);
//! let first_span = Span::new(40..44);
//!
//! let diag = Diagnostic::error("block number 12 is used more than once")
//!     .with_code(ErrorCode::E201)
//!     .with_label(span, "duplicate block")
//!     .with_secondary_label(first_span, "first used here")
//!     .with_help("renumber one of the blocks");
//! ```

mod collector;
mod diagnosed;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnosed::Diagnosed;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
