//! Physical lines of the decoded source text.

use std::ops::Range;

use crate::span::Span;

/// One physical line of the source, without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceLine<'src> {
    number: usize,
    offset: usize,
    text: &'src str,
}

impl<'src> SourceLine<'src> {
    pub(crate) fn new(number: usize, offset: usize, text: &'src str) -> Self {
        Self {
            number,
            offset,
            text,
        }
    }

    /// Returns the 1-based line number.
    pub(crate) fn number(&self) -> usize {
        self.number
    }

    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    /// Returns the span of the whole line.
    pub(crate) fn span(&self) -> Span {
        Span::new(self.offset..self.offset + self.text.len())
    }

    /// Returns the span covering character columns `columns` of this line.
    ///
    /// Columns past the end of the line collapse onto the line end, so
    /// fields of short (implicitly padded) lines still get a valid span.
    pub(crate) fn column_span(&self, columns: Range<usize>) -> Span {
        let byte_at = |column: usize| {
            self.text
                .char_indices()
                .nth(column)
                .map_or(self.text.len(), |(index, _)| index)
        };

        Span::new(self.offset + byte_at(columns.start)..self.offset + byte_at(columns.end))
    }

    /// Returns `true` for blank lines and `(` comment lines.
    pub(crate) fn is_comment_or_blank(&self) -> bool {
        let trimmed = self.text.trim();
        trimmed.is_empty() || trimmed.starts_with('(')
    }
}

/// Splits `source` into lines, tracking each line's number and byte offset.
pub(crate) fn lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    source
        .split_inclusive('\n')
        .scan(0, |offset, raw| {
            let start = *offset;
            *offset += raw.len();
            Some((start, raw.trim_end_matches(['\n', '\r'])))
        })
        .enumerate()
        .map(|(index, (offset, text))| SourceLine::new(index + 1, offset, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_track_offsets() {
        let source = "first\r\nsecond\n\nlast";
        let lines: Vec<_> = lines(source).collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text(), "first");
        assert_eq!(lines[1].number(), 2);
        assert_eq!(lines[1].span(), Span::new(7..13));
        assert_eq!(&source[lines[1].span().start()..lines[1].span().end()], "second");
        assert_eq!(lines[2].text(), "");
        assert_eq!(lines[3].span(), Span::new(15..19));
    }

    #[test]
    fn test_column_span() {
        let line = SourceLine::new(1, 100, "0001 SOMA");

        assert_eq!(line.column_span(0..4), Span::new(100..104));
        assert_eq!(line.column_span(5..11), Span::new(105..109));
        assert_eq!(line.column_span(19..25), Span::new(109..109));
    }

    #[test]
    fn test_column_span_counts_characters() {
        let line = SourceLine::new(1, 0, "ÇÃO GANHO");

        assert_eq!(line.column_span(4..9), Span::new(6..11));
    }

    #[test]
    fn test_comment_or_blank() {
        assert!(SourceLine::new(1, 0, "").is_comment_or_blank());
        assert!(SourceLine::new(1, 0, "   ").is_comment_or_blank());
        assert!(SourceLine::new(1, 0, "( comment").is_comment_or_blank());
        assert!(!SourceLine::new(1, 0, "0001 SOMA").is_comment_or_blank());
    }
}
