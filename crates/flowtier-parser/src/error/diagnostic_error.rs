//! Error wrapper for a failed render.

use thiserror::Error;

use crate::error::Diagnostic;

/// One or more diagnostics, at least one of them an error, returned when a
/// render cannot produce a diagram.
#[derive(Debug, Error)]
#[error("{}", summarize(.diagnostics))]
pub struct DiagnosticError {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticError {
    /// Create a new error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error, warnings included.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Leads with the first error-severity diagnostic, counting the rest.
fn summarize(diagnostics: &[Diagnostic]) -> String {
    let Some(first) = diagnostics
        .iter()
        .find(|d| d.severity().is_error())
        .or_else(|| diagnostics.first())
    else {
        return String::new();
    };

    match diagnostics.len() {
        1 => first.to_string(),
        n => format!("{first} (+{} more)", n - 1),
    }
}

impl From<Diagnostic> for DiagnosticError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for DiagnosticError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
