//! Level Assignment: BFS depth from the start node.

use std::collections::VecDeque;

use log::{debug, warn};
use petgraph::graph::NodeIndex;

use flowtier_parser::error::{Diagnostic, DiagnosticCollector, ErrorCode};

use crate::structure::FlowGraph;

/// The level of every node, plus the nodes of each level in placement order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Levels {
    level_of: Vec<usize>,
    tiers: Vec<Vec<NodeIndex>>,
}

impl Levels {
    /// Level of the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to the graph these levels were built for.
    pub fn level(&self, idx: NodeIndex) -> usize {
        self.level_of[idx.index()]
    }

    /// Nodes grouped by level; within a level in BFS discovery order, with
    /// unreachable nodes sorted by id.
    pub fn tiers(&self) -> &[Vec<NodeIndex>] {
        &self.tiers
    }

    /// Number of levels, the trailing level included.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Assigns every node of `graph` a level.
///
/// The traversal starts at the first declared start event, or at the first
/// declared node (with an `E300` warning) when there is none. Children are
/// visited in edge order and the first discovery fixes a node's level, which
/// also breaks cycles. Nodes the traversal never reaches share one trailing
/// level, ordered by id, and are reported with `E301` in declaration order.
pub fn assign_levels(graph: &FlowGraph<'_>, diagnostics: &mut DiagnosticCollector) -> Levels {
    let Some(start) = pick_start(graph, diagnostics) else {
        return Levels::default();
    };

    let mut level_of: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut tiers: Vec<Vec<NodeIndex>> = Vec::new();
    let mut queue = VecDeque::from([start]);
    level_of[start.index()] = Some(0);

    while let Some(idx) = queue.pop_front() {
        let Some(level) = level_of[idx.index()] else {
            continue;
        };
        if tiers.len() <= level {
            tiers.resize_with(level + 1, Vec::new);
        }
        tiers[level].push(idx);

        for child in graph.children(idx) {
            if level_of[child.index()].is_none() {
                level_of[child.index()] = Some(level + 1);
                queue.push_back(child);
            }
        }
    }

    let mut unreached: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|idx| level_of[idx.index()].is_none())
        .collect();
    if !unreached.is_empty() {
        let trailing = tiers.len();
        for &idx in &unreached {
            let node = graph.spanned_node(idx);
            warn!(id:% = node.id(), level = trailing; "Node is unreachable from the start node");
            diagnostics.emit(
                Diagnostic::warning(format!(
                    "node `{}` cannot be reached from the start node",
                    node.id()
                ))
                .with_code(ErrorCode::E301)
                .with_label(node.span(), "placed on the last level")
                .with_help("connect it with an edge such as `<id> --> <id>`"),
            );
            level_of[idx.index()] = Some(trailing);
        }
        // Sorted by id so that reordering declarations cannot move them.
        unreached.sort_by(|&a, &b| graph.node(a).id().cmp(graph.node(b).id()));
        tiers.push(unreached);
    }

    debug!(levels = tiers.len(), nodes = graph.node_count(); "Levels assigned");

    Levels {
        level_of: level_of.into_iter().map(Option::unwrap_or_default).collect(),
        tiers,
    }
}

fn pick_start(graph: &FlowGraph<'_>, diagnostics: &mut DiagnosticCollector) -> Option<NodeIndex> {
    if let Some(start) = graph.first_start_event() {
        return Some(start);
    }

    let fallback = graph.node_indices().next()?;
    let node = graph.spanned_node(fallback);
    warn!(id:% = node.id(); "No start event, starting from the first node");
    diagnostics.emit(
        Diagnostic::warning("no start event declared")
            .with_code(ErrorCode::E300)
            .with_label(node.span(), "layout starts here instead")
            .with_help("add a node such as `startEvent start \"Start\"`"),
    );
    Some(fallback)
}
