//! Parser configuration.

use cdu_core::block_type::ContinuationMode;

/// Marker word opening a diagram section.
pub const DEFAULT_SECTION_MARKER: &str = "DCDU";

/// Configuration for [`parse`](crate::parse) and [`parse_all`](crate::parse_all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Which block types accept variable-length continuation lines
    continuation_mode: ContinuationMode,
    /// First token of the line opening a section, matched case-insensitively
    section_marker: String,
}

impl ParseConfig {
    /// Create a new ParseConfig with the given continuation mode and section marker.
    pub fn new(continuation_mode: ContinuationMode, section_marker: impl Into<String>) -> Self {
        Self {
            continuation_mode,
            section_marker: section_marker.into(),
        }
    }

    pub fn continuation_mode(&self) -> ContinuationMode {
        self.continuation_mode
    }

    pub fn section_marker(&self) -> &str {
        &self.section_marker
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new(ContinuationMode::default(), DEFAULT_SECTION_MARKER)
    }
}
