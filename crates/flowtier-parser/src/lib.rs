//! # Flowtier Parser
//!
//! Parser for the Flowtier flow language. Each line of the source declares a
//! node or an edge; the parser turns them into the semantic model of
//! [`flowtier_core::semantic`] and reports everything it had to skip.
//!
//! ## Usage
//!
//! ```
//! # use flowtier_parser::parse;
//! let flow = parse(
//!     r#"
//!     startEvent s "Start"
//!     gateway g "Approved?"
//!     endEvent e "End"
//!     s --> g
//!     g -->|yes| e
//!     "#,
//! );
//!
//! assert_eq!(flow.nodes().len(), 3);
//! assert_eq!(flow.edges()[1].label(), "yes");
//! ```
//!
//! Parsing never fails outright. Malformed lines become warnings and an
//! input with no nodes carries an error-severity diagnostic; see
//! [`error`] for the codes.

pub mod error;
mod grammar;
mod parser;
mod span;

pub use error::{Diagnostic, DiagnosticError};
pub use parser::{ParsedFlow, parse};
pub use span::{Span, Spanned};
