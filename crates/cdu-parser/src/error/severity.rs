//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Neither level stops a parse on its own:
/// - [`Severity::Error`] marks source content that was malformed and dropped
///   (an undecodable line, a non-numeric field, a duplicate block number)
/// - [`Severity::Warning`] marks content that was accepted or ignored but is
///   suspicious (a dangling variable, a truncated block)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Malformed content that was dropped from the result.
    Error,

    /// Suspicious content that did not change the result's shape.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
