//! The finished, immutable layout handed to renderers.
//!
//! A [`Diagram`] is recomputed from scratch for every render call. Renderers
//! read it and never feed it back into the layout engine.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    semantic::{Edge, Node, NodeKind},
};

/// How edge paths are shaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// Down from the source, across at the midline, down into the target.
    ///
    /// The path holds every corner point.
    #[default]
    Orthogonal,
    /// A quadratic curve. The path holds `[start, control, end]`.
    Curved,
}

/// A node together with its computed geometry.
///
/// `position` is the center of the node's box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    #[serde(flatten)]
    node: Node,
    position: Point,
    size: Size,
    level: usize,
}

impl LayoutNode {
    pub fn new(node: Node, position: Point, size: Size, level: usize) -> Self {
        Self {
            node,
            position,
            size,
            level,
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn id(&self) -> &Id {
        self.node.id()
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    /// BFS depth from the start node; unreachable nodes share the trailing level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The node's full bounding box.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.size)
    }
}

/// An edge together with its routed path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    #[serde(flatten)]
    edge: Edge,
    style: EdgeStyle,
    path: Vec<Point>,
    label_position: Option<Point>,
    label_size: Size,
}

impl LayoutEdge {
    /// Creates an unlabeled routed edge.
    pub fn new(edge: Edge, style: EdgeStyle, path: Vec<Point>) -> Self {
        Self {
            edge,
            style,
            path,
            label_position: None,
            label_size: Size::default(),
        }
    }

    /// Attaches the label box, centered on `position`.
    pub fn with_label_box(mut self, position: Point, size: Size) -> Self {
        self.label_position = Some(position);
        self.label_size = size;
        self
    }

    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }

    /// Ordered waypoints. Empty when neither endpoint could be placed.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Center of the label text, if the edge is labeled and drawable.
    pub fn label_position(&self) -> Option<Point> {
        self.label_position
    }

    /// Box occupied by the label, if any.
    pub fn label_bounds(&self) -> Option<Bounds> {
        self.label_position
            .map(|position| position.to_bounds(self.label_size))
    }
}

/// The complete laid-out flow.
///
/// Nodes and edges keep source order so rendering is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    canvas: Size,
}

impl Diagram {
    pub fn new(nodes: Vec<LayoutNode>, edges: Vec<LayoutEdge>, canvas: Size) -> Self {
        Self {
            nodes,
            edges,
            canvas,
        }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Finds a laid-out node by id.
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn canvas_width(&self) -> f32 {
        self.canvas.width()
    }

    pub fn canvas_height(&self) -> f32 {
        self.canvas.height()
    }

    /// The canvas as bounds anchored at the origin.
    pub fn canvas_bounds(&self) -> Bounds {
        Bounds::new_from_center(
            Point::new(self.canvas.half_width(), self.canvas.half_height()),
            self.canvas,
        )
    }
}
