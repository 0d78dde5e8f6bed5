//! Error codes for the CDU diagnostic system.
//!
//! Codes are organized by stage:
//! - `E0xx`, `W001` - Section extraction
//! - `E1xx` - Record decoding
//! - `E2xx`, `W002`-`W003` - Block assembly
//! - `W1xx` - Graph projection
//! - `W2xx` - Text generation

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Extraction (E0xx, W001)
    // =========================================================================
    /// No diagram section.
    ///
    /// The input holds no `DCDU` section terminated by `FIMCDU`.
    E001,

    /// Discarded section.
    ///
    /// A diagram was still open when the input ended, when a `999999` line
    /// closed its section, or when another section marker appeared.
    W001,

    // =========================================================================
    // Decoding (E1xx)
    // =========================================================================
    /// Undecodable line.
    ///
    /// A block line could not be decoded, usually because its number
    /// column is not numeric. The line is skipped.
    E101,

    /// Malformed numeric field.
    ///
    /// A diagram id or parameter value is not a number.
    E102,

    // =========================================================================
    // Assembly (E2xx, W002-W003)
    // =========================================================================
    /// Duplicate block number.
    ///
    /// Two blocks share a number; the later one is dropped.
    E201,

    /// Orphan continuation line.
    ///
    /// A line with a blank type column does not follow a block that accepts
    /// continuation lines.
    W002,

    /// Truncated block.
    ///
    /// A fixed-count block ended before all its continuation lines were read.
    W003,

    // =========================================================================
    // Projection (W1xx)
    // =========================================================================
    /// Variable produced more than once.
    ///
    /// Several blocks write the same output variable; edges use the last one.
    W101,

    /// Unresolved variable.
    ///
    /// A block reads a variable that no block produces; no edge is drawn.
    W102,

    // =========================================================================
    // Generation (W2xx)
    // =========================================================================
    /// Unrecognized block type.
    ///
    /// The generator has no line format for this type; a comment is written
    /// in its place.
    W201,

    /// Output without input.
    ///
    /// An `OUTPUT` block has no input variable to write.
    W202,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::W001 => "W001",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E201 => "E201",
            ErrorCode::W002 => "W002",
            ErrorCode::W003 => "W003",
            ErrorCode::W101 => "W101",
            ErrorCode::W102 => "W102",
            ErrorCode::W201 => "W201",
            ErrorCode::W202 => "W202",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "no diagram section",
            ErrorCode::W001 => "discarded section",
            ErrorCode::E101 => "undecodable line",
            ErrorCode::E102 => "malformed numeric field",
            ErrorCode::E201 => "duplicate block number",
            ErrorCode::W002 => "orphan continuation line",
            ErrorCode::W003 => "truncated block",
            ErrorCode::W101 => "variable produced more than once",
            ErrorCode::W102 => "unresolved variable",
            ErrorCode::W201 => "unrecognized block type",
            ErrorCode::W202 => "output without input",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::W102.to_string(), "W102");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "no diagram section");
        assert_eq!(ErrorCode::E201.description(), "duplicate block number");
        assert_eq!(ErrorCode::W201.description(), "unrecognized block type");
    }
}
