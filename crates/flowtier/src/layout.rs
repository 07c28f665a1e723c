//! Layout stages from graph to finished [`Diagram`].
//!
//! ```text
//! FlowGraph
//!     ↓ assign_levels   BFS depth per node
//!     ↓ place_nodes     center point per node
//!     ↓ route_edges     path and label box per edge
//!     ↓ measure_canvas  bounding size
//! Diagram
//! ```
//!
//! Every stage is a pure function of its inputs, so each can be run and
//! tested on its own.

mod canvas;
mod levels;
mod positions;
mod router;

pub use canvas::measure_canvas;
pub use levels::{Levels, assign_levels};
pub use positions::{Positions, place_nodes};
pub use router::{label_size, route_edges};

use log::info;

use flowtier_core::diagram::{Diagram, LayoutNode};
use flowtier_parser::error::DiagnosticCollector;

use crate::{config::LayoutConfig, structure::FlowGraph};

/// Runs every layout stage over `graph`.
///
/// Nodes and edges of the result keep declaration order.
pub fn compute(
    graph: &FlowGraph<'_>,
    config: &LayoutConfig,
    diagnostics: &mut DiagnosticCollector,
) -> Diagram {
    let levels = assign_levels(graph, diagnostics);
    let positions = place_nodes(graph, &levels, config);

    let nodes: Vec<LayoutNode> = graph
        .node_indices()
        .map(|idx| {
            let node = graph.node(idx);
            LayoutNode::new(
                node.clone(),
                positions.center(idx),
                node.kind().default_size(),
                levels.level(idx),
            )
        })
        .collect();
    let edges = route_edges(graph, &positions, config);
    let canvas = measure_canvas(&nodes, &edges, config.margin());

    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        levels = levels.len();
        "Layout computed"
    );
    Diagram::new(nodes, edges, canvas)
}
