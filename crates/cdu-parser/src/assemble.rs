//! Block assembly.
//!
//! Turns the lines of one extracted diagram into a [`Dcdu`]. Line 0 is the
//! header; every later line is a declaration, a block header, or a
//! continuation of the block before it. How many continuation lines a block
//! takes depends on its type (see [`Continuation`]).

use std::collections::{HashMap, hash_map::Entry};

use log::{debug, info, trace};

use cdu_core::{
    block_type::{Continuation, ContinuationMode, DEFPAR, DEFVAL, is_end_marker},
    semantic::{Block, Dcdu},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    record::{self, FormatError},
    source::SourceLine,
    span::Span,
};

/// Builds the diagram described by `lines`.
///
/// Malformed lines are skipped and reported to `collector`; assembly itself
/// never fails.
pub(crate) fn assemble(
    lines: &[SourceLine<'_>],
    mode: ContinuationMode,
    collector: &mut DiagnosticCollector,
) -> Dcdu {
    let Some((header, body)) = lines.split_first() else {
        return Dcdu::new(0, "");
    };

    let mut assembler = Assembler {
        diagram: decode_header(header, collector),
        mode,
        collector,
        first_seen: HashMap::new(),
    };

    info!(id = assembler.diagram.id(), name = assembler.diagram.name(); "Assembling diagram");

    let mut index = 0;
    while index < body.len() {
        index += assembler.consume(&body[index..]);
    }

    let diagram = assembler.diagram;
    debug!(
        params = diagram.params().len(),
        defaults = diagram.defaults().len(),
        blocks = diagram.all_blocks().count();
        "Diagram assembled"
    );
    trace!(diagram:?; "Assembled diagram");

    diagram
}

fn decode_header(header: &SourceLine<'_>, collector: &mut DiagnosticCollector) -> Dcdu {
    let text = header.text();
    let id = match record::decode_header_id(text) {
        Ok(id) => id,
        Err(err) => {
            collector.emit(field_error(header, &err));
            0
        }
    };

    Dcdu::new(id, record::decode_header_name(text))
}

struct Assembler<'c> {
    diagram: Dcdu,
    mode: ContinuationMode,
    collector: &'c mut DiagnosticCollector,
    /// Span of the number column of each accepted block.
    first_seen: HashMap<u32, Span>,
}

impl Assembler<'_> {
    /// Consumes the record starting at `lines[0]` and returns how many
    /// lines it took.
    fn consume(&mut self, lines: &[SourceLine<'_>]) -> usize {
        let line = &lines[0];
        let text = line.text();

        if line.is_comment_or_blank() || is_end_marker(text) {
            return 1;
        }

        if has_prefix(text, DEFPAR) {
            match record::decode_param(text) {
                Ok(param) => {
                    trace!(name = param.name(), value = param.value(); "Parameter declared");
                    self.diagram.add_param(param);
                }
                Err(err) => self.collector.emit(field_error(line, &err)),
            }
            return 1;
        }

        if has_prefix(text, DEFVAL) {
            self.diagram.add_default(record::decode_default(text));
            return 1;
        }

        let fields = record::decode_block_line(text);
        if fields.block_type.is_empty() {
            self.collector.emit(
                Diagnostic::warning(format!(
                    "line {} continues no block and is skipped",
                    line.number()
                ))
                .with_code(ErrorCode::W002)
                .with_label(line.span(), "orphan continuation line")
                .with_help("a continuation line must follow a block that accepts continuations"),
            );
            return 1;
        }

        let number = match record::decode_block_number(text) {
            Ok(number) => number,
            Err(err) => {
                self.collector.emit(
                    Diagnostic::error(format!("line {} cannot be decoded: {err}", line.number()))
                        .with_code(ErrorCode::E101)
                        .with_label(line.column_span(err.columns()), "expected a block number")
                        .with_help("block numbers occupy columns 1-4"),
                );
                return 1;
            }
        };

        let continuation = Continuation::for_type(&fields.block_type, self.mode);
        let mut block = Block::new(number, line.number(), fields);
        let taken = match continuation {
            Continuation::None => 0,
            Continuation::Fixed(count) => self.take_fixed(&mut block, count, lines),
            Continuation::Variable => take_variable(&mut block, lines),
        };

        trace!(
            number = block.number(),
            block_type = block.block_type(),
            continuations = taken;
            "Block decoded"
        );

        self.accept(block, line.column_span(record::block::NUMBER));

        1 + taken
    }

    /// Extends `block` with the `count` lines after `lines[0]`, stopping
    /// early at `FIMCDU` or the end of the diagram.
    fn take_fixed(&mut self, block: &mut Block, count: usize, lines: &[SourceLine<'_>]) -> usize {
        let available = lines[1..]
            .iter()
            .take(count)
            .take_while(|line| !is_end_marker(line.text()))
            .count();

        for line in &lines[1..=available] {
            block.extend(&record::decode_block_line(line.text()));
        }

        if available < count {
            self.collector.emit(
                Diagnostic::warning(format!(
                    "block {} of type `{}` expects {count} continuation lines but has {available}",
                    block.number(),
                    block.block_type()
                ))
                .with_code(ErrorCode::W003)
                .with_label(lines[0].span(), "truncated block"),
            );
        }

        available
    }

    /// Files `block` in the diagram unless its number is already taken.
    fn accept(&mut self, block: Block, number_span: Span) {
        match self.first_seen.entry(block.number()) {
            Entry::Occupied(first) => {
                self.collector.emit(
                    Diagnostic::error(format!(
                        "block number {} is already used; block on line {} is dropped",
                        block.number(),
                        block.line()
                    ))
                    .with_code(ErrorCode::E201)
                    .with_label(number_span, "duplicate block number")
                    .with_secondary_label(*first.get(), "first used here")
                    .with_help("block numbers must be unique within a diagram"),
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(number_span);
                self.diagram.add_block(block);
            }
        }
    }
}

/// Extends `block` with every following line whose type column is blank.
fn take_variable(block: &mut Block, lines: &[SourceLine<'_>]) -> usize {
    let mut taken = 0;

    for line in &lines[1..] {
        if is_end_marker(line.text()) {
            break;
        }
        let fields = record::decode_block_line(line.text());
        if !fields.block_type.is_empty() {
            break;
        }
        block.extend(&fields);
        taken += 1;
    }

    taken
}

/// Returns `true` if `text` starts with `keyword`, ignoring case.
fn has_prefix(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
}

fn field_error(line: &SourceLine<'_>, err: &FormatError) -> Diagnostic {
    Diagnostic::error(format!("{err} on line {}", line.number()))
        .with_code(ErrorCode::E102)
        .with_label(line.column_span(err.columns()), format!("malformed {}", err.field()))
}
