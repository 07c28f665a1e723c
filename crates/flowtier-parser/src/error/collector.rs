//! Collector for accumulating diagnostics across a processing stage.

use crate::error::{Diagnostic, DiagnosticError};

/// Accumulates diagnostics so a stage can report every problem it sees
/// instead of stopping at the first one.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Record every diagnostic from `diagnostics`, in order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    /// Returns true if an error-severity diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns everything recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector, returning the diagnostics in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Finish collection.
    ///
    /// - With errors, returns `Err` carrying every diagnostic, warnings included.
    /// - Otherwise returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, DiagnosticError> {
        if self.has_errors {
            Err(DiagnosticError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_empty_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().unwrap().is_empty());
    }

    #[test]
    fn test_collector_warnings_only_finish_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::warning("warning 2"));

        assert!(!collector.has_errors());
        assert_eq!(collector.finish().unwrap().len(), 2);
    }

    #[test]
    fn test_collector_error_keeps_everything() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("skipped line"));
        collector.emit(
            Diagnostic::error("no nodes found")
                .with_code(ErrorCode::E102)
                .with_label(Span::new(0..0), "here"),
        );

        assert!(collector.has_errors());
        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[1].code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_collector_extend_preserves_order() {
        let mut collector = DiagnosticCollector::new();
        collector.extend([Diagnostic::warning("a"), Diagnostic::warning("b")]);
        collector.emit(Diagnostic::warning("c"));

        let messages: Vec<_> = collector
            .diagnostics()
            .iter()
            .map(|d| d.message().to_string())
            .collect();
        assert_eq!(messages, ["a", "b", "c"]);
    }
}
