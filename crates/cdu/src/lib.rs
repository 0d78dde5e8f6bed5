//! CDU - Bidirectional converter for CDU control diagrams.
//!
//! Parses fixed-column CDU text into node/edge graphs for a graph editor,
//! and writes editor block lists back as CDU text. The two directions are
//! independent: the text generator understands a narrower vocabulary than
//! the parser.

pub mod config;

mod error;
mod generator;
mod layout;
mod projection;

pub use cdu_core::{block_type, descriptor, graph, semantic};
pub use cdu_parser::error::{Diagnosed, Diagnostic, ErrorCode, Severity};

pub use error::CduError;

use log::{debug, info, trace};

use cdu_core::{
    descriptor::{BlockDescriptor, ExportRequest},
    graph::Graph,
    semantic::Dcdu,
};
use cdu_parser::ParseConfig;

use config::AppConfig;

/// A parsed diagram together with its graph projection.
#[derive(Debug, Clone)]
pub struct Imported {
    diagram: Dcdu,
    graph: Graph,
}

impl Imported {
    /// Returns the parsed diagram.
    pub fn diagram(&self) -> &Dcdu {
        &self.diagram
    }

    /// Returns the projected graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Serializes the graph document.
    ///
    /// # Errors
    ///
    /// Returns `CduError::Json` if serialization fails.
    pub fn graph_json(&self, pretty: bool) -> Result<String, CduError> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.graph)?
        } else {
            serde_json::to_string(&self.graph)?
        };
        Ok(json)
    }
}

/// Converter between CDU text and editor graphs.
///
/// Holds only immutable configuration, so one converter can serve any
/// number of conversions, from any thread.
///
/// # Examples
///
/// ```rust
/// use cdu::{Converter, config::AppConfig};
///
/// let source = "DCDU\n000001 EXAMPLE\n0001 ENTRAD               U\nFIMCDU\n999999\n";
///
/// let converter = Converter::new(AppConfig::default());
/// let imported = converter.import(source).expect("Failed to import");
///
/// assert_eq!(imported.value().graph().nodes[0].id, "0001");
/// assert!(imported.diagnostics().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    config: AppConfig,
}

impl Converter {
    /// Create a new converter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Parser and layout settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse the first diagram of `source` and project it onto a graph.
    ///
    /// Recoverable problems, both in the text and in the dataflow, are
    /// returned as diagnostics alongside the result.
    ///
    /// # Errors
    ///
    /// Returns `CduError::Parse` if `source` holds no complete diagram.
    pub fn import(&self, source: &str) -> Result<Diagnosed<Imported>, CduError> {
        info!("Importing diagram");

        let parsed = cdu_parser::parse(source, &self.parse_config())
            .map_err(|err| CduError::new_parse_error(err, source))?;

        Ok(parsed.and_then(|diagram| self.project(diagram)))
    }

    /// Decode raw bytes and import the first diagram.
    ///
    /// Bytes that are not valid UTF-8 are read as Latin-1.
    ///
    /// # Errors
    ///
    /// Returns `CduError::Parse` if the text holds no complete diagram.
    pub fn import_bytes(&self, bytes: &[u8]) -> Result<Diagnosed<Imported>, CduError> {
        let source = cdu_parser::decode_source(bytes);
        self.import(&source)
    }

    /// Parse and project every diagram of `source`, in source order.
    ///
    /// # Errors
    ///
    /// Returns `CduError::Parse` if `source` holds no complete diagram.
    pub fn import_all(&self, source: &str) -> Result<Diagnosed<Vec<Imported>>, CduError> {
        info!("Importing all diagrams");

        let parsed = cdu_parser::parse_all(source, &self.parse_config())
            .map_err(|err| CduError::new_parse_error(err, source))?;

        Ok(parsed.and_then(|diagrams| {
            let (imported, diagnostics): (Vec<_>, Vec<_>) = diagrams
                .into_iter()
                .map(|diagram| self.project(diagram).into_parts())
                .unzip();
            Diagnosed::new(imported, diagnostics.into_iter().flatten().collect())
        }))
    }

    /// Write `blocks` as CDU text, one line per block.
    ///
    /// Never fails; blocks that cannot be written produce a `*` comment
    /// line and a warning.
    pub fn export(&self, blocks: &[BlockDescriptor]) -> Diagnosed<String> {
        info!(blocks = blocks.len(); "Exporting blocks");
        generator::generate(blocks)
    }

    /// Parse an export request and write its blocks as CDU text.
    ///
    /// The request is either a bare JSON array of blocks or an object with
    /// the array under `blocks`.
    ///
    /// # Errors
    ///
    /// Returns `CduError::Json` if `json` is not a valid request.
    pub fn export_json(&self, json: &str) -> Result<Diagnosed<String>, CduError> {
        let request: ExportRequest = serde_json::from_str(json)?;
        Ok(self.export(&request.into_blocks()))
    }

    fn parse_config(&self) -> ParseConfig {
        ParseConfig::from(self.config.parser())
    }

    fn project(&self, diagram: Dcdu) -> Diagnosed<Imported> {
        let mut projected = projection::project(&diagram);

        let layout_config = self.config.layout();
        if layout_config.enabled() {
            let (mut graph, diagnostics) = projected.into_parts();
            layout::apply(&mut graph, layout_config);
            projected = Diagnosed::new(graph, diagnostics);
        }

        debug!(id = diagram.id(), name = diagram.name(); "Diagram imported");
        trace!(graph:? = projected.value(); "Projected graph");

        projected.map(|graph| Imported { diagram, graph })
    }
}
