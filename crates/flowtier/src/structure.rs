//! Graph Builder: adjacency over the declared nodes.
//!
//! A [`FlowGraph`] indexes the parsed nodes in declaration order and adds one
//! graph edge per source edge whose endpoints are both declared. Edges with an
//! unknown endpoint stay in [`FlowGraph::edges`] for rendering but never take
//! part in traversal.

use std::collections::HashMap;

use log::{trace, warn};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use flowtier_core::{
    identifier::Id,
    semantic::{Edge, Node, NodeKind},
};
use flowtier_parser::{
    Spanned,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
};

/// Adjacency and parent lookup over one parsed flow.
///
/// Node indices follow declaration order, so `NodeIndex::new(0)` is the first
/// declared node. Graph edges carry the position of their source edge in
/// [`FlowGraph::edges`].
#[derive(Debug)]
pub struct FlowGraph<'a> {
    graph: DiGraph<&'a Node, usize>,
    node_ids: HashMap<Id, NodeIndex>,
    nodes: &'a [Spanned<Node>],
    edges: &'a [Spanned<Edge>],
}

impl<'a> FlowGraph<'a> {
    /// Builds the graph, reporting an `E201` warning for every edge whose
    /// endpoint was never declared.
    pub fn build(
        nodes: &'a [Spanned<Node>],
        edges: &'a [Spanned<Edge>],
        diagnostics: &mut DiagnosticCollector,
    ) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_ids = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let idx = graph.add_node(node.inner());
            node_ids.insert(node.id().clone(), idx);
        }

        for (position, edge) in edges.iter().enumerate() {
            let source = node_ids.get(edge.from()).copied();
            let target = node_ids.get(edge.to()).copied();

            if let (Some(source), Some(target)) = (source, target) {
                trace!(from:% = edge.from(), to:% = edge.to(); "Adding edge to graph");
                graph.add_edge(source, target, position);
                continue;
            }

            let unknown: Vec<String> = [(edge.from(), source), (edge.to(), target)]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(id, _)| format!("`{id}`"))
                .collect();
            warn!(from:% = edge.from(), to:% = edge.to(); "Edge references an undeclared node");
            diagnostics.emit(
                Diagnostic::warning(format!(
                    "edge `{} --> {}` references undeclared node {}",
                    edge.from(),
                    edge.to(),
                    unknown.join(" and ")
                ))
                .with_code(ErrorCode::E201)
                .with_label(edge.span(), "excluded from layout")
                .with_help("declare the node or fix the id"),
            );
        }

        Self {
            graph,
            node_ids,
            nodes,
            edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node indices in declaration order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Returns the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this graph.
    pub fn node(&self, idx: NodeIndex) -> &'a Node {
        self.graph[idx]
    }

    /// The declared node with its source span.
    pub fn spanned_node(&self, idx: NodeIndex) -> &'a Spanned<Node> {
        &self.nodes[idx.index()]
    }

    pub fn index_of(&self, id: &Id) -> Option<NodeIndex> {
        self.node_ids.get(id).copied()
    }

    /// Every source edge, including the ones left out of the graph.
    pub fn edges(&self) -> &'a [Spanned<Edge>] {
        self.edges
    }

    /// Direct successors of `idx`, in the order their edges were written.
    ///
    /// A target reached by several edges is listed once per edge.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_edge_order(idx, Direction::Outgoing)
    }

    /// Direct predecessors of `idx`, in the order their edges were written.
    pub fn parents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_edge_order(idx, Direction::Incoming)
    }

    /// The first declared start event.
    pub fn first_start_event(&self) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&idx| self.graph[idx].kind() == NodeKind::StartEvent)
    }

    fn neighbors_in_edge_order(&self, idx: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        // petgraph walks adjacency lists newest-first.
        let mut neighbors: Vec<(usize, NodeIndex)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (*edge.weight(), other)
            })
            .collect();
        neighbors.sort_unstable_by_key(|&(position, _)| position);
        neighbors.into_iter().map(|(_, other)| other).collect()
    }
}
