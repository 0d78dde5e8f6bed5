//! Configuration types for CDU conversions.
//!
//! This module provides configuration structures that control how CDU text
//! is parsed and how the resulting graph is laid out. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and layout settings.
//! - [`ParserConfig`] - Controls continuation rules and the section marker.
//! - [`LayoutConfig`] - Controls the optional layered node placement.
//!
//! # Example
//!
//! ```
//! # use cdu::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.parser().section_marker(), "DCDU");
//! assert!(!config.layout().enabled());
//! ```

use serde::Deserialize;

use cdu_core::block_type::ContinuationMode;
use cdu_parser::{DEFAULT_SECTION_MARKER, ParseConfig};

/// Default distance between two layers.
pub const DEFAULT_HORIZONTAL_SPACING: f64 = 250.0;

/// Default distance between two nodes of the same layer.
pub const DEFAULT_VERTICAL_SPACING: f64 = 120.0;

/// Top-level application configuration combining parser and layout settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified parser and layout configurations.
    pub fn new(parser: ParserConfig, layout: LayoutConfig) -> Self {
        Self { parser, layout }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Parser settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Which block types accept variable-length continuation lines.
    #[serde(default)]
    continuation_mode: ContinuationMode,

    /// First token of the line that opens a diagram section.
    #[serde(default = "default_section_marker")]
    section_marker: String,
}

impl ParserConfig {
    /// Creates a new [`ParserConfig`].
    ///
    /// # Arguments
    ///
    /// * `continuation_mode` - Continuation rule set for multi-line blocks.
    /// * `section_marker` - Marker word opening a section, matched case-insensitively.
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

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new(ContinuationMode::default(), DEFAULT_SECTION_MARKER)
    }
}

impl From<&ParserConfig> for ParseConfig {
    fn from(config: &ParserConfig) -> Self {
        ParseConfig::new(config.continuation_mode, config.section_marker.as_str())
    }
}

fn default_section_marker() -> String {
    DEFAULT_SECTION_MARKER.to_string()
}

/// Layered layout settings.
///
/// When disabled, every node is placed at the origin and arranging the
/// graph is left to the editor.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Whether node positions are computed.
    #[serde(default)]
    enabled: bool,

    /// Distance between two consecutive layers along x.
    #[serde(default = "default_horizontal_spacing")]
    horizontal_spacing: f64,

    /// Distance between two consecutive nodes of a layer along y.
    #[serde(default = "default_vertical_spacing")]
    vertical_spacing: f64,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(enabled: bool, horizontal_spacing: f64, vertical_spacing: f64) -> Self {
        Self {
            enabled,
            horizontal_spacing,
            vertical_spacing,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn horizontal_spacing(&self) -> f64 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f64 {
        self.vertical_spacing
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(false, DEFAULT_HORIZONTAL_SPACING, DEFAULT_VERTICAL_SPACING)
    }
}

fn default_horizontal_spacing() -> f64 {
    DEFAULT_HORIZONTAL_SPACING
}

fn default_vertical_spacing() -> f64 {
    DEFAULT_VERTICAL_SPACING
}
