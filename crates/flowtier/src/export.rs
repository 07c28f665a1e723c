//! Export of finished layouts.
//!
//! The layout engine never calls into this module; exporters are adapters
//! that read a [`Diagram`] and produce an output format.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Semantic Model
//!     ↓ structure + layout
//! Diagram
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]

/// SVG export backend.
pub mod svg;

use thiserror::Error;

use flowtier_core::diagram::Diagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Converts a laid-out diagram into the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted.
    fn export_diagram(&self, diagram: &Diagram) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
///
/// Converted into [`FlowtierError::Export`](crate::FlowtierError::Export)
/// at the crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    #[error("Render error: {0}")]
    Render(String),
}
