//! Semantic flow model produced by the parser.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parser
//! Semantic Model (these types) - typed nodes and labeled edges
//!     ↓ graph builder + level assignment + placement + routing
//! Diagram (see [`crate::diagram`])
//!     ↓ external renderer
//! SVG / pixels
//! ```

use std::fmt;

use serde::Serialize;

use crate::{geometry::Size, identifier::Id};

/// The four node kinds of the flow grammar.
///
/// The kind fixes the node's box geometry and where edges attach to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Entry point of the flow, drawn as a circle.
    StartEvent,
    /// A unit of work, drawn as a rounded rectangle. Only tasks carry actors.
    Task,
    /// A decision point, drawn as a diamond.
    Gateway,
    /// Terminal point of the flow, drawn as a circle with a heavy stroke.
    EndEvent,
}

impl NodeKind {
    /// All kinds, in grammar order.
    pub const ALL: [NodeKind; 4] = [
        NodeKind::StartEvent,
        NodeKind::Task,
        NodeKind::Gateway,
        NodeKind::EndEvent,
    ];

    /// The keyword that introduces this kind in source text.
    pub fn keyword(self) -> &'static str {
        match self {
            NodeKind::StartEvent => "startEvent",
            NodeKind::Task => "task",
            NodeKind::Gateway => "gateway",
            NodeKind::EndEvent => "endEvent",
        }
    }

    /// Looks a kind up by its keyword. Matching is case-sensitive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Fixed box size for this kind.
    ///
    /// Events are circles of radius 30, tasks are 100x50 rectangles and
    /// gateways are diamonds with an 80x80 bounding box.
    pub fn default_size(self) -> Size {
        match self {
            NodeKind::StartEvent | NodeKind::EndEvent => Size::new(60.0, 60.0),
            NodeKind::Task => Size::new(100.0, 50.0),
            NodeKind::Gateway => Size::new(80.0, 80.0),
        }
    }

    /// The union of every kind's default size.
    pub fn max_default_size() -> Size {
        Self::ALL
            .into_iter()
            .map(Self::default_size)
            .fold(Size::default(), Size::max)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A declared flow node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    label: String,
    actor: Option<String>,
}

impl Node {
    /// Creates a node. The actor is dropped unless `kind` is [`NodeKind::Task`].
    pub fn new(id: Id, kind: NodeKind, label: impl Into<String>, actor: Option<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            actor: actor.filter(|_| kind == NodeKind::Task),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The performer of a task, if one was annotated.
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

/// A directed edge between two node ids.
///
/// The endpoints are not required to name declared nodes; see the layout
/// engine for how such dangling edges are treated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    from: Id,
    to: Id,
    label: String,
}

impl Edge {
    pub fn new(from: Id, to: Id, label: impl Into<String>) -> Self {
        Self {
            from,
            to,
            label: label.into(),
        }
    }

    pub fn from(&self) -> &Id {
        &self.from
    }

    pub fn to(&self) -> &Id {
        &self.to
    }

    /// The edge label; empty when none was written.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true if the edge carries a non-empty label.
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}
