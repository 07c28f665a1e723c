//! Error types for Flowtier operations.
//!
//! Almost everything that can go wrong with a flow source is a non-fatal
//! [`Diagnostic`](flowtier_parser::Diagnostic) carried next to the layout.
//! [`FlowtierError`] covers the rest: I/O, bad configuration, export
//! failures, and a source without nodes when the caller needs a diagram.

use std::io;

use thiserror::Error;

use flowtier_parser::DiagnosticError;

/// The main error type for Flowtier operations.
///
/// # Diagnostic Variants
///
/// `NoNodes` carries every diagnostic of the failed run together with the
/// source text, so callers can render spans as rich reports.
#[derive(Debug, Error)]
pub enum FlowtierError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{err}")]
    NoNodes { err: DiagnosticError, src: String },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for FlowtierError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl FlowtierError {
    /// Create a new `NoNodes` error with the associated source code.
    pub fn new_no_nodes_error(err: DiagnosticError, src: impl Into<String>) -> Self {
        Self::NoNodes {
            err,
            src: src.into(),
        }
    }
}
