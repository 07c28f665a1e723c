//! Flowtier - deterministic layout for small BPMN-style flow diagrams.
//!
//! A flow source declares typed nodes (start event, task, gateway, end event)
//! and labeled edges, one per line. Flowtier parses it, assigns every node a
//! level by breadth-first traversal from the start event, places the levels
//! top to bottom without horizontal overlap, routes the edges, and sizes the
//! canvas. The result is an immutable [`Diagram`](diagram::Diagram) that any
//! renderer can draw; an SVG exporter is included.
//!
//! ```
//! let rendered = flowtier::render(
//!     r#"
//!     startEvent s "Start"
//!     task t "Do" [actor: Alice]
//!     endEvent e "End"
//!     s --> t
//!     t --> e
//!     "#,
//! );
//!
//! let diagram = rendered.diagram().expect("source declares nodes");
//! assert_eq!(diagram.nodes().len(), 3);
//! assert_eq!(diagram.node("e").unwrap().level(), 2);
//! assert!(rendered.diagnostics().is_empty());
//! ```

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use flowtier_core::{color, diagram, geometry, identifier, semantic};
pub use flowtier_parser::{Diagnostic, DiagnosticError, Span, error as diagnostics};

pub use error::FlowtierError;

use log::{debug, info, trace};

use flowtier_core::diagram::Diagram;
use flowtier_parser::error::DiagnosticCollector;

use config::AppConfig;
use export::Exporter;
use structure::FlowGraph;

/// Lay out `source` with the default configuration.
pub fn render(source: &str) -> Rendered {
    DiagramBuilder::default().layout(source)
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The laid-out flow.
    Diagram(Diagram),
    /// The source declares no node; there is nothing to lay out.
    NoNodes,
}

/// The outcome of one render together with every diagnostic it raised.
///
/// Diagnostics are ordered by stage: parsing, graph building, level
/// assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    outcome: Outcome,
    diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The diagram, unless the source had no nodes.
    pub fn diagram(&self) -> Option<&Diagram> {
        match &self.outcome {
            Outcome::Diagram(diagram) => Some(diagram),
            Outcome::NoNodes => None,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if the source had no nodes.
    pub fn is_empty(&self) -> bool {
        matches!(self.outcome, Outcome::NoNodes)
    }

    /// Splits the render into the diagram and its warnings.
    ///
    /// # Errors
    ///
    /// Returns [`FlowtierError::NoNodes`] carrying every diagnostic and `src`
    /// when the source had no nodes.
    pub fn into_result(self, src: &str) -> Result<(Diagram, Vec<Diagnostic>), FlowtierError> {
        match self.outcome {
            Outcome::Diagram(diagram) => Ok((diagram, self.diagnostics)),
            Outcome::NoNodes => Err(FlowtierError::new_no_nodes_error(
                DiagnosticError::new(self.diagnostics),
                src,
            )),
        }
    }
}

/// Builder for laying out and rendering Flowtier diagrams.
///
/// # Examples
///
/// ```
/// use flowtier::{DiagramBuilder, config::AppConfig};
///
/// let source = "startEvent s \"Start\"\ntask t \"Work\"\ns --> t\n";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let (diagram, warnings) = builder
///     .layout(source)
///     .into_result(source)
///     .expect("source declares nodes");
/// assert!(warnings.is_empty());
///
/// let svg = builder.render_svg(&diagram).expect("default style is valid");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// The configuration is used as given; call [`AppConfig::validate`] first
    /// if it comes from an untrusted place.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and lay out `source`.
    ///
    /// Never fails: problems in the source are reported as diagnostics and
    /// a source without nodes yields [`Outcome::NoNodes`].
    pub fn layout(&self, source: &str) -> Rendered {
        info!("Parsing flow");
        let flow = flowtier_parser::parse(source);
        let (nodes, edges, parse_diagnostics) = flow.into_parts();

        let mut diagnostics = DiagnosticCollector::new();
        diagnostics.extend(parse_diagnostics);

        if nodes.is_empty() {
            info!("Source declares no nodes");
            return Rendered {
                outcome: Outcome::NoNodes,
                diagnostics: diagnostics.into_diagnostics(),
            };
        }

        info!(nodes = nodes.len(), edges = edges.len(); "Building flow graph");
        let graph = FlowGraph::build(&nodes, &edges, &mut diagnostics);
        debug!("Graph built successfully");

        let diagram = layout::compute(&graph, self.config.layout(), &mut diagnostics);
        trace!(diagram:?; "Laid out diagram");

        Rendered {
            outcome: Outcome::Diagram(diagram),
            diagnostics: diagnostics.into_diagnostics(),
        }
    }

    /// Render a laid-out diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`FlowtierError::Export`] if the configured style holds an
    /// invalid color.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, FlowtierError> {
        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;

        let svg = exporter.export_diagram(diagram)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }
}
