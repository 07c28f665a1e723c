//! SVG backend.
//!
//! [`SvgBuilder`] resolves the configured colors once; the resulting [`Svg`]
//! turns any number of diagrams into standalone SVG documents in memory.

use log::{debug, info};
use svg::{
    Document,
    node::element::{Circle, Definitions, Group, Marker, Path, Polygon, Rectangle, Text},
};

use flowtier_core::{
    color::Color,
    diagram::{Diagram, EdgeStyle, LayoutEdge, LayoutNode},
    geometry::Point,
    semantic::NodeKind,
};

use crate::{config::StyleConfig, export};

const ARROW_MARKER_ID: &str = "flowtier-arrow";
const FONT_FAMILY: &str = "Arial, sans-serif";
const LABEL_FONT_SIZE: f32 = 14.0;
const EDGE_FONT_SIZE: f32 = 12.0;
const ACTOR_FONT_SIZE: f32 = 10.0;
/// Inset of the actor name from the task's bottom-right corner.
const ACTOR_INSET: f32 = 5.0;

/// Configures an [`Svg`] exporter.
#[derive(Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Resolves every color of the style.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color does not parse.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        let palette = |kind: NodeKind| -> Result<NodePalette, String> {
            Ok(NodePalette {
                fill: style.fill_color(kind)?,
                stroke: style.node_stroke(kind)?,
            })
        };

        let resolve = || -> Result<Svg, String> {
            Ok(Svg {
                background: style.background_color()?,
                edge_stroke: style.edge_stroke()?,
                text: style.text_color()?,
                start_event: palette(NodeKind::StartEvent)?,
                task: palette(NodeKind::Task)?,
                gateway: palette(NodeKind::Gateway)?,
                end_event: palette(NodeKind::EndEvent)?,
            })
        };

        resolve().map_err(export::Error::Render)
    }
}

#[derive(Debug, Clone, Copy)]
struct NodePalette {
    fill: Color,
    stroke: Color,
}

/// In-memory SVG exporter with resolved colors.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    edge_stroke: Color,
    text: Color,
    start_event: NodePalette,
    task: NodePalette,
    gateway: NodePalette,
    end_event: NodePalette,
}

impl Svg {
    /// Renders `diagram` to an SVG document sized to its canvas.
    pub fn render_diagram(&self, diagram: &Diagram) -> Document {
        let width = diagram.canvas_width();
        let height = diagram.canvas_height();

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background),
            );
        }

        doc = doc.add(self.marker_definitions());

        // Edges first so nodes cover the path ends.
        let edges = diagram
            .edges()
            .iter()
            .fold(Group::new().set("class", "edges"), |group, edge| {
                group.add(self.render_edge(edge))
            });
        let nodes = diagram
            .nodes()
            .iter()
            .fold(Group::new().set("class", "nodes"), |group, node| {
                group.add(self.render_node(node))
            });

        debug!(nodes = diagram.nodes().len(), edges = diagram.edges().len(); "SVG document rendered");
        doc.add(edges).add(nodes)
    }

    fn marker_definitions(&self) -> Definitions {
        Definitions::new().add(
            Marker::new()
                .set("id", ARROW_MARKER_ID)
                .set("viewBox", "0 0 10 10")
                .set("refX", 9)
                .set("refY", 5)
                .set("markerWidth", 6)
                .set("markerHeight", 6)
                .set("orient", "auto")
                .add(
                    Path::new()
                        .set("d", "M 0 0 L 10 5 L 0 10 z")
                        .set("fill", &self.edge_stroke),
                ),
        )
    }

    fn palette(&self, kind: NodeKind) -> NodePalette {
        match kind {
            NodeKind::StartEvent => self.start_event,
            NodeKind::Task => self.task,
            NodeKind::Gateway => self.gateway,
            NodeKind::EndEvent => self.end_event,
        }
    }

    fn render_node(&self, node: &LayoutNode) -> Group {
        let palette = self.palette(node.kind());
        let (x, y) = (node.x(), node.y());
        let (width, height) = (node.width(), node.height());

        let group = Group::new()
            .set("class", format!("node {}", node.kind()))
            .set("data-id", node.id().to_string());

        let group = match node.kind() {
            NodeKind::StartEvent | NodeKind::EndEvent => {
                let stroke_width = if node.kind() == NodeKind::EndEvent { 4 } else { 2 };
                group.add(
                    Circle::new()
                        .set("cx", x)
                        .set("cy", y)
                        .set("r", width.min(height) / 2.0)
                        .set("fill", &palette.fill)
                        .set("stroke", &palette.stroke)
                        .set("stroke-width", stroke_width),
                )
            }
            NodeKind::Task => group.add(
                Rectangle::new()
                    .set("x", x - width / 2.0)
                    .set("y", y - height / 2.0)
                    .set("width", width)
                    .set("height", height)
                    .set("rx", 5)
                    .set("ry", 5)
                    .set("fill", &palette.fill)
                    .set("stroke", &palette.stroke)
                    .set("stroke-width", 2),
            ),
            NodeKind::Gateway => {
                let (hw, hh) = (width / 2.0, height / 2.0);
                group.add(
                    Polygon::new()
                        .set(
                            "points",
                            format!(
                                "{x},{} {},{y} {x},{} {},{y}",
                                y - hh,
                                x + hw,
                                y + hh,
                                x - hw
                            ),
                        )
                        .set("fill", &palette.fill)
                        .set("stroke", &palette.stroke)
                        .set("stroke-width", 2),
                )
            }
        };

        let group = group.add(
            self.text(node.node().label(), node.position(), LABEL_FONT_SIZE)
                .set("dominant-baseline", "middle"),
        );

        match node.node().actor() {
            Some(actor) => group.add(
                Text::new(actor)
                    .set("class", "actor")
                    .set("x", x + width / 2.0 - ACTOR_INSET)
                    .set("y", y + height / 2.0 - ACTOR_INSET)
                    .set("text-anchor", "end")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", ACTOR_FONT_SIZE)
                    .set("font-style", "italic")
                    .set("fill", &self.text),
            ),
            None => group,
        }
    }

    fn render_edge(&self, edge: &LayoutEdge) -> Group {
        let group = Group::new().set("class", "edge");
        let Some(data) = path_data(edge.style(), edge.path()) else {
            return group;
        };

        let group = group.add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", &self.edge_stroke)
                .set("stroke-width", 2)
                .set("marker-end", format!("url(#{ARROW_MARKER_ID})")),
        );

        match edge.label_bounds() {
            Some(bounds) => {
                let center = Point::new(
                    (bounds.min_x() + bounds.max_x()) / 2.0,
                    (bounds.min_y() + bounds.max_y()) / 2.0,
                );
                let background = Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", "white")
                    .set("fill-opacity", 0.8)
                    .set("rx", 3.0);
                group.add(background).add(
                    self.text(edge.edge().label(), center, EDGE_FONT_SIZE)
                        .set("dominant-baseline", "middle"),
                )
            }
            None => group,
        }
    }

    fn text(&self, content: &str, at: Point, font_size: f32) -> Text {
        Text::new(content)
            .set("x", at.x())
            .set("y", at.y())
            .set("text-anchor", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", font_size)
            .set("fill", &self.text)
    }
}

impl export::Exporter for Svg {
    fn export_diagram(&self, diagram: &Diagram) -> Result<String, export::Error> {
        let doc = self.render_diagram(diagram);
        info!(
            width = diagram.canvas_width(),
            height = diagram.canvas_height();
            "SVG exported"
        );
        Ok(doc.to_string())
    }
}

/// Path data for a routed edge; `None` when there is nothing to draw.
fn path_data(style: EdgeStyle, path: &[Point]) -> Option<String> {
    let (first, rest) = path.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let mut data = format!("M {} {}", first.x(), first.y());
    match (style, rest) {
        (EdgeStyle::Curved, [control, end]) => {
            data.push_str(&format!(
                " Q {} {} {} {}",
                control.x(),
                control.y(),
                end.x(),
                end.y()
            ));
        }
        _ => {
            for point in rest {
                data.push_str(&format!(" L {} {}", point.x(), point.y()));
            }
        }
    }
    Some(data)
}
