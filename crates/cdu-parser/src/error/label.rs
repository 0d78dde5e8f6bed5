//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in the decoded source text.
///
/// - **Primary labels** mark the field or line at fault.
/// - **Secondary labels** point at related content, such as the first block
///   using a duplicated number.
///
/// ```text
/// error[E201]: block number 12 is used more than once
///    |
///  4 | 0012 GANHO        X1     X2     K
///    | ---- first used here
///  9 | 0012 SOMA         X2     X3
///    | ^^^^ duplicate block
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(10..14), "duplicate block");

        assert_eq!(label.span().start(), 10);
        assert_eq!(label.span().end(), 14);
        assert_eq!(label.message(), "duplicate block");
        assert!(label.is_primary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(0..4), "first used here");

        assert!(label.is_secondary());
        assert!(!label.is_primary());
    }
}
