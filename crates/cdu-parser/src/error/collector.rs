//! Collector for accumulating diagnostics during a parse.
//!
//! The [`DiagnosticCollector`] lets each stage report problems and carry on
//! instead of failing on the first malformed line.

use crate::error::{Diagnosed, Diagnostic, ParseError};

/// A collector for accumulating diagnostics in source order.
///
/// # Example
///
/// ```text
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::error("block number `00A1` is not a number")
///         .with_code(ErrorCode::E101)
///         .with_label(span, "expected digits")
/// );
///
/// // Attach the diagnostics to the (possibly partial) result
/// let diagnosed = collector.finish(diagram);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection, attaching every diagnostic to `value`.
    pub fn finish<T>(self, value: T) -> Diagnosed<T> {
        Diagnosed::new(value, self.diagnostics)
    }

    /// Finish collection with a fatal diagnostic.
    ///
    /// The returned error holds every collected diagnostic followed by `fatal`.
    pub fn fail(mut self, fatal: Diagnostic) -> ParseError {
        self.diagnostics.push(fatal);
        ParseError::new(self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_finish_empty() {
        let collector = DiagnosticCollector::new();
        let diagnosed = collector.finish(42);

        assert_eq!(*diagnosed.value(), 42);
        assert!(diagnosed.diagnostics().is_empty());
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(
            Diagnostic::error("error 1")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("warning 2"));

        let diagnosed = collector.finish(());
        let messages: Vec<_> = diagnosed.diagnostics().iter().map(|d| d.message()).collect();
        assert_eq!(messages, ["warning 1", "error 1", "warning 2"]);
    }

    #[test]
    fn test_collector_fail_appends_fatal() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("diagram discarded"));

        let err = collector.fail(Diagnostic::error("no section").with_code(ErrorCode::E001));

        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[1].code(), Some(ErrorCode::E001));
    }
}
