//! Section extraction.
//!
//! Isolates the diagrams of a source file. A diagram is the run of lines from
//! its header up to and including its `FIMCDU` line. Everything else is
//! dropped: comment and blank lines, text outside any section, and diagrams
//! that are never closed.

use log::{debug, trace};

use cdu_core::block_type::{SECTION_SENTINEL, first_token_is, is_end_marker};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    source::{self, SourceLine},
};

/// Where the extractor stands between two kept lines.
#[derive(Debug)]
enum State<'src> {
    /// Outside any section; lines are ignored.
    Outside,
    /// Inside a section, waiting for the next diagram header.
    AwaitingHeader,
    /// Accumulating the lines of one diagram.
    InDiagram {
        lines: Vec<SourceLine<'src>>,
        in_section: bool,
    },
}

/// Splits `source` into diagrams, each a list of its kept lines.
///
/// The first line of every returned diagram is its header and the last one
/// is its `FIMCDU` line. Discarded diagrams are reported as `W001` warnings.
pub(crate) fn extract<'src>(
    source: &'src str,
    marker: &str,
    collector: &mut DiagnosticCollector,
) -> Vec<Vec<SourceLine<'src>>> {
    let mut diagrams = Vec::new();
    let mut state = State::Outside;

    for line in source::lines(source).filter(|line| !line.is_comment_or_blank()) {
        let text = line.text();

        if text.trim() == SECTION_SENTINEL {
            discard(state, "section closed", collector);
            state = State::Outside;
            continue;
        }

        if first_token_is(text, marker) {
            discard(state, "a new section starts", collector);
            state = State::AwaitingHeader;
            continue;
        }

        if !matches!(state, State::InDiagram { .. }) && is_compat_header(text, marker) {
            let in_section = state.in_section();
            discard(state, "a new diagram starts", collector);
            trace!(line = line.number(); "Diagram header with inline marker");
            state = State::InDiagram {
                lines: vec![line],
                in_section,
            };
            continue;
        }

        state = match state {
            State::Outside => State::Outside,
            State::AwaitingHeader => State::InDiagram {
                lines: vec![line],
                in_section: true,
            },
            State::InDiagram {
                mut lines,
                in_section,
            } => {
                lines.push(line);
                if is_end_marker(text) {
                    debug!(
                        header_line = lines[0].number(),
                        lines = lines.len();
                        "Diagram extracted"
                    );
                    diagrams.push(lines);
                    if in_section {
                        State::AwaitingHeader
                    } else {
                        State::Outside
                    }
                } else {
                    State::InDiagram { lines, in_section }
                }
            }
        };
    }

    discard(state, "the input ends", collector);

    diagrams
}

impl State<'_> {
    fn in_section(&self) -> bool {
        match self {
            Self::Outside => false,
            Self::AwaitingHeader => true,
            Self::InDiagram { in_section, .. } => *in_section,
        }
    }
}

/// Reports the lines of an unfinished diagram, if `state` holds one.
fn discard(state: State<'_>, reason: &str, collector: &mut DiagnosticCollector) {
    let State::InDiagram { lines, .. } = state else {
        return;
    };
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return;
    };

    debug!(header_line = first.number(), lines = lines.len(); "Diagram discarded");

    collector.emit(
        Diagnostic::warning(format!(
            "diagram starting on line {} is discarded because {reason} before `FIMCDU`",
            first.number()
        ))
        .with_code(ErrorCode::W001)
        .with_label(first.span(), "diagram starts here")
        .with_secondary_label(last.span(), "last line of the diagram")
        .with_help("close every diagram with a `FIMCDU` line"),
    );
}

/// Returns `true` for a header line carrying the section marker itself,
/// such as `      1 PSSBR   DCDU`.
fn is_compat_header(text: &str, marker: &str) -> bool {
    let mut tokens = text.split_whitespace();
    let starts_with_number = tokens
        .next()
        .is_some_and(|token| token.chars().all(|c| c.is_ascii_digit()));

    starts_with_number && tokens.any(|token| token.eq_ignore_ascii_case(marker))
}
