//! Values paired with the diagnostics raised while producing them.

use crate::error::{Diagnostic, Severity};

/// A (possibly partial) result together with its non-fatal diagnostics.
///
/// Every stage of the converter returns one of these: malformed input
/// degrades the value and adds a diagnostic instead of aborting.
#[derive(Debug, Clone)]
pub struct Diagnosed<T> {
    value: T,
    diagnostics: Vec<Diagnostic>,
}

impl<T> Diagnosed<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the diagnostics in the order they were raised.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic has [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Returns the number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }

    /// Transform the value, keeping the diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Diagnosed<U> {
        Diagnosed {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Transform the value with a step that raises its own diagnostics,
    /// appending them after the existing ones.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Diagnosed<U>) -> Diagnosed<U> {
        let mut diagnostics = self.diagnostics;
        let next = f(self.value);
        diagnostics.extend(next.diagnostics);
        Diagnosed {
            value: next.value,
            diagnostics,
        }
    }
}
