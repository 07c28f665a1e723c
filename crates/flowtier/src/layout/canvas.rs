//! Canvas Sizing.

use log::debug;

use flowtier_core::{
    diagram::{LayoutEdge, LayoutNode},
    geometry::Size,
};

/// Smallest canvas, anchored at the origin, that holds every node box, edge
/// label box and path point with `margin` to spare on the right and bottom.
pub fn measure_canvas(nodes: &[LayoutNode], edges: &[LayoutEdge], margin: f32) -> Size {
    let node_extents = nodes.iter().map(|node| {
        let bounds = node.bounds();
        (bounds.max_x(), bounds.max_y())
    });
    let label_extents = edges
        .iter()
        .filter_map(LayoutEdge::label_bounds)
        .map(|bounds| (bounds.max_x(), bounds.max_y()));
    let path_extents = edges
        .iter()
        .flat_map(LayoutEdge::path)
        .map(|point| (point.x(), point.y()));

    let (width, height) = node_extents
        .chain(label_extents)
        .chain(path_extents)
        .fold((0.0_f32, 0.0_f32), |(width, height), (x, y)| {
            (width.max(x), height.max(y))
        });

    let canvas = Size::new(width + margin, height + margin);
    debug!(width = canvas.width(), height = canvas.height(); "Canvas measured");
    canvas
}
