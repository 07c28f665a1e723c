//! Diagnostic system for the Flowtier pipeline.
//!
//! The flow language is typed by people in an editor, so almost nothing is
//! fatal: a malformed line, a dangling edge or a missing start event is
//! reported as a [`Diagnostic`] and processing continues. The only condition
//! that stops a render is an input without any node, which is carried as an
//! error-severity diagnostic inside a [`DiagnosticError`].
//!
//! # Example
//!
//! ```
//! # use flowtier_parser::error::{Diagnostic, ErrorCode};
//! # use flowtier_parser::Span;
//! let diag = Diagnostic::warning("node `t1` is declared more than once")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(40..60), "this declaration wins")
//!     .with_secondary_label(Span::new(10..30), "first declared here");
//!
//! assert_eq!(diag.to_string(), "warning[E200]: node `t1` is declared more than once");
//! ```

mod collector;
mod diagnostic;
mod diagnostic_error;
mod error_code;
mod label;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use diagnostic_error::DiagnosticError;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
