//! Edge Router: paths and label boxes for every source edge.

use log::{debug, trace};
use petgraph::graph::NodeIndex;

use flowtier_core::{
    diagram::{EdgeStyle, LayoutEdge},
    geometry::{Point, Size},
    semantic::Edge,
};

use super::positions::{Positions, node_size};
use crate::{config::LayoutConfig, structure::FlowGraph};

/// Approximate advance of one label character.
const LABEL_CHAR_WIDTH: f32 = 7.0;
/// Space between label text and its background box, per side.
const LABEL_PADDING: f32 = 4.0;
const LABEL_HEIGHT: f32 = 16.0;

/// Estimated box of a label's rendered text.
pub fn label_size(label: &str) -> Size {
    Size::new(
        label.chars().count() as f32 * LABEL_CHAR_WIDTH + 2.0 * LABEL_PADDING,
        LABEL_HEIGHT,
    )
}

/// Routes every edge of `graph.edges()`, keeping their order.
///
/// Paths leave the source's bottom anchor and enter the target's top anchor.
/// Edges pointing up run along a lane right of both nodes; edges within a
/// level join the facing sides. An edge with a single declared endpoint becomes a stub of half a level
/// spacing attached to that node; an edge with none gets an empty path.
pub fn route_edges(
    graph: &FlowGraph<'_>,
    positions: &Positions,
    config: &LayoutConfig,
) -> Vec<LayoutEdge> {
    let router = Router {
        graph,
        positions,
        config,
    };

    let edges: Vec<LayoutEdge> = graph
        .edges()
        .iter()
        .map(|edge| router.route(edge))
        .collect();

    debug!(edges = edges.len(), style:? = config.edge_style(); "Edges routed");
    edges
}

struct Router<'r, 'a> {
    graph: &'r FlowGraph<'a>,
    positions: &'r Positions,
    config: &'r LayoutConfig,
}

/// Where the label goes relative to its reference point.
#[derive(Clone, Copy)]
enum LabelSide {
    Above,
    Right,
}

/// A path plus the reference point for its label, if it can carry one.
type Route = (Vec<Point>, Option<(Point, LabelSide)>);

impl Router<'_, '_> {
    fn route(&self, edge: &Edge) -> LayoutEdge {
        let source = self.graph.index_of(edge.from());
        let target = self.graph.index_of(edge.to());
        let style = self.config.edge_style();

        let (path, label_anchor) = match (source, target) {
            (Some(source), Some(target)) if source == target => self.self_loop(source),
            (Some(source), Some(target)) => self.between(source, target, style),
            (Some(source), None) => self.outgoing_stub(source),
            (None, Some(target)) => self.incoming_stub(target),
            (None, None) => (Vec::new(), None),
        };
        trace!(from:% = edge.from(), to:% = edge.to(), points = path.len(); "Edge routed");

        let layout_edge = LayoutEdge::new(edge.clone(), style, path);
        match label_anchor.filter(|_| edge.has_label()) {
            Some((anchor, side)) => {
                let size = label_size(edge.label());
                layout_edge.with_label_box(self.place_label(anchor, side, size), size)
            }
            None => layout_edge,
        }
    }

    fn bottom_anchor(&self, idx: NodeIndex) -> Point {
        let center = self.positions.center(idx);
        center.with_y(center.y() + node_size(self.graph, idx).half_height())
    }

    fn top_anchor(&self, idx: NodeIndex) -> Point {
        let center = self.positions.center(idx);
        center.with_y(center.y() - node_size(self.graph, idx).half_height())
    }

    fn right_anchor(&self, idx: NodeIndex) -> Point {
        let center = self.positions.center(idx);
        center.with_x(center.x() + node_size(self.graph, idx).half_width())
    }

    fn left_anchor(&self, idx: NodeIndex) -> Point {
        let center = self.positions.center(idx);
        center.with_x(center.x() - node_size(self.graph, idx).half_width())
    }

    /// Picks the route shape from where the target sits relative to the source.
    fn between(&self, source: NodeIndex, target: NodeIndex, style: EdgeStyle) -> Route {
        let source_y = self.positions.center(source).y();
        let target_y = self.positions.center(target).y();

        if target_y < source_y {
            self.back_edge(source, target, style)
        } else if target_y == source_y {
            self.sideways(source, target, style)
        } else {
            match style {
                EdgeStyle::Orthogonal => self.orthogonal(source, target),
                EdgeStyle::Curved => self.curved(source, target),
            }
        }
    }

    /// Out of the source's right side, up a lane right of both nodes, into
    /// the target's right side.
    fn back_edge(&self, source: NodeIndex, target: NodeIndex, style: EdgeStyle) -> Route {
        let start = self.right_anchor(source);
        let end = self.right_anchor(target);
        let reach = self.config.label_offset() * 2.0;
        let lane_x = start.x().max(end.x()) + reach;
        let mid_y = (start.y() + end.y()) / 2.0;

        match style {
            EdgeStyle::Orthogonal => {
                let path = vec![start, start.with_x(lane_x), end.with_x(lane_x), end];
                (path, Some((Point::new(lane_x, mid_y), LabelSide::Right)))
            }
            EdgeStyle::Curved => {
                let control = Point::new(lane_x + reach, mid_y);
                let apex = curve_midpoint(start, control, end);
                (vec![start, control, end], Some((apex, LabelSide::Right)))
            }
        }
    }

    /// Between the facing sides of two nodes on the same level.
    fn sideways(&self, source: NodeIndex, target: NodeIndex, style: EdgeStyle) -> Route {
        let leftward = self.positions.center(target).x() < self.positions.center(source).x();
        let (start, end) = if leftward {
            (self.left_anchor(source), self.right_anchor(target))
        } else {
            (self.right_anchor(source), self.left_anchor(target))
        };
        let mid = start.midpoint(end);

        match style {
            EdgeStyle::Orthogonal => (vec![start, end], Some((mid, LabelSide::Above))),
            EdgeStyle::Curved => {
                let control = mid.with_y(mid.y() - self.config.curve_lift());
                let apex = curve_midpoint(start, control, end);
                (vec![start, control, end], Some((apex, LabelSide::Above)))
            }
        }
    }

    /// Down to the midline, across, down into the target.
    fn orthogonal(&self, source: NodeIndex, target: NodeIndex) -> Route {
        let start = self.bottom_anchor(source);
        let end = self.top_anchor(target);
        let mid_y = (start.y() + end.y()) / 2.0;

        let mut path = vec![start, start.with_y(mid_y), end.with_y(mid_y), end];
        path.dedup();

        let label = if start.x() == end.x() {
            (Point::new(start.x(), mid_y), LabelSide::Right)
        } else {
            (Point::new((start.x() + end.x()) / 2.0, mid_y), LabelSide::Above)
        };
        (path, Some(label))
    }

    /// Quadratic curve through a control point lifted above the midline.
    fn curved(&self, source: NodeIndex, target: NodeIndex) -> Route {
        let start = self.bottom_anchor(source);
        let end = self.top_anchor(target);
        let mid = start.midpoint(end);
        let control = mid.with_y(mid.y() - self.config.curve_lift());
        let apex = curve_midpoint(start, control, end);
        (vec![start, control, end], Some((apex, LabelSide::Above)))
    }

    /// Out of the right side, over the top, back into the top anchor.
    fn self_loop(&self, idx: NodeIndex) -> Route {
        let center = self.positions.center(idx);
        let size = node_size(self.graph, idx);
        let reach = self.config.label_offset() * 2.0;

        let right = center.with_x(center.x() + size.half_width());
        let top = self.top_anchor(idx);
        let outer_x = right.x() + reach;
        let upper_y = top.y() - reach;

        let path = vec![
            right,
            right.with_x(outer_x),
            Point::new(outer_x, upper_y),
            top.with_y(upper_y),
            top,
        ];
        (path, Some((Point::new(outer_x, center.y()), LabelSide::Right)))
    }

    fn outgoing_stub(&self, source: NodeIndex) -> Route {
        let start = self.bottom_anchor(source);
        let end = start.with_y(start.y() + self.stub_length());
        (vec![start, end], Some((start.midpoint(end), LabelSide::Right)))
    }

    fn incoming_stub(&self, target: NodeIndex) -> Route {
        let end = self.top_anchor(target);
        let start = end.with_y((end.y() - self.stub_length()).max(0.0));
        (vec![start, end], Some((start.midpoint(end), LabelSide::Right)))
    }

    fn stub_length(&self) -> f32 {
        self.config.level_spacing() / 2.0
    }

    /// Center of a label box of `size` placed `label_offset` away from
    /// `anchor`, kept inside the positive quadrant.
    fn place_label(&self, anchor: Point, side: LabelSide, size: Size) -> Point {
        let offset = self.config.label_offset();
        let center = match side {
            LabelSide::Above => anchor.with_y(anchor.y() - offset - size.half_height()),
            LabelSide::Right => anchor.with_x(anchor.x() + offset + size.half_width()),
        };
        Point::new(
            center.x().max(size.half_width()),
            center.y().max(size.half_height()),
        )
    }
}

/// Point of a quadratic curve at t = 0.5.
fn curve_midpoint(start: Point, control: Point, end: Point) -> Point {
    Point::new(
        0.25 * start.x() + 0.5 * control.x() + 0.25 * end.x(),
        0.25 * start.y() + 0.5 * control.y() + 0.25 * end.y(),
    )
}
