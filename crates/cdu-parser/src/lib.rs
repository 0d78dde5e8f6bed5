//! # CDU Parser
//!
//! Parser for the fixed-column CDU control-diagram format. This crate turns
//! source text into [`Dcdu`] diagrams.
//!
//! The pipeline has three stages:
//!
//! 1. **Extract** - Isolate each diagram, from its header to its `FIMCDU` line
//! 2. **Decode** - Slice every line into fixed-column fields ([`record`])
//! 3. **Assemble** - Merge continuation lines into blocks and file them in the diagram
//!
//! Malformed lines never abort a parse. They are skipped and reported as
//! diagnostics attached to the result. Only a source without any diagram
//! fails, with a [`ParseError`] carrying code `E001`.
//!
//! ## Usage
//!
//! ```
//! # use cdu_parser::{parse, ParseConfig, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "DCDU\n000001 EXAMPLE\nFIMCDU\n999999\n";
//!
//!     let diagnosed = parse(source, &ParseConfig::default())?;
//!     assert_eq!(diagnosed.value().name(), "EXAMPLE");
//!     Ok(())
//! }
//! ```

mod assemble;
mod config;
pub mod error;
mod extract;
pub mod record;
mod source;
mod span;

use std::borrow::Cow;

use log::{debug, info};

use cdu_core::semantic::Dcdu;

pub use config::{DEFAULT_SECTION_MARKER, ParseConfig};
pub use span::Span;

use error::{Diagnosed, Diagnostic, DiagnosticCollector, ErrorCode, ParseError};

/// Parse the first diagram of `source`.
///
/// Later diagrams are still extracted, so problems in their section
/// structure are reported, but they are not assembled.
///
/// # Errors
///
/// Returns [`ParseError`] if `source` holds no complete diagram.
pub fn parse(source: &str, config: &ParseConfig) -> Result<Diagnosed<Dcdu>, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let sections = extract::extract(source, config.section_marker(), &mut collector);

    let Some(first) = sections.first() else {
        return Err(collector.fail(no_section(config)));
    };

    info!(diagrams = sections.len(); "Parsing first diagram");
    let diagram = assemble::assemble(first, config.continuation_mode(), &mut collector);

    Ok(collector.finish(diagram))
}

/// Parse every diagram of `source`, in source order.
///
/// # Errors
///
/// Returns [`ParseError`] if `source` holds no complete diagram.
pub fn parse_all(source: &str, config: &ParseConfig) -> Result<Diagnosed<Vec<Dcdu>>, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let sections = extract::extract(source, config.section_marker(), &mut collector);

    if sections.is_empty() {
        return Err(collector.fail(no_section(config)));
    }

    info!(diagrams = sections.len(); "Parsing all diagrams");
    let diagrams = sections
        .iter()
        .map(|lines| assemble::assemble(lines, config.continuation_mode(), &mut collector))
        .collect();

    Ok(collector.finish(diagrams))
}

/// Decode raw file bytes into text.
///
/// Valid UTF-8 is borrowed as is. Anything else is read as Latin-1, one
/// character per byte, so column positions are preserved.
///
/// # Examples
///
/// ```
/// use cdu_parser::decode_source;
///
/// assert_eq!(decode_source(b"GANHO"), "GANHO");
/// assert_eq!(decode_source(b"CONVERS\xc3O"), "CONVERSÃO");
/// ```
pub fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(err) => {
            debug!(valid_up_to = err.valid_up_to(); "Source is not UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&byte| char::from(byte)).collect())
        }
    }
}

fn no_section(config: &ParseConfig) -> Diagnostic {
    Diagnostic::error("no diagram section found")
        .with_code(ErrorCode::E001)
        .with_help(format!(
            "a diagram starts after a `{}` line and ends with `FIMCDU`",
            config.section_marker()
        ))
}
