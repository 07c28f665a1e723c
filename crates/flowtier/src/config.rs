//! Configuration types for Flowtier layout and rendering.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing constants and the edge routing style.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use flowtier::config::{AppConfig, LayoutConfig};
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.layout().level_spacing(), 120.0);
//!
//! let tight = LayoutConfig::default().with_min_spacing(10.0);
//! assert!(tight.validate().is_err());
//! ```

use serde::Deserialize;

use flowtier_core::{color::Color, diagram::EdgeStyle, semantic::NodeKind};

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.validate()
    }
}

/// Spacing constants and routing style used by the layout stages.
///
/// Coordinates are in abstract drawing units; node centers are placed at
/// `(x, base_y + level * level_spacing)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal origin around which parentless nodes are spread.
    base_x: f32,
    /// Center line of level 0.
    base_y: f32,
    /// Vertical distance between the center lines of adjacent levels.
    level_spacing: f32,
    /// Minimum horizontal distance between node centers on one level.
    min_spacing: f32,
    /// Free space kept left of the leftmost node and around the canvas edge.
    margin: f32,
    /// Gap between an edge path and its label box.
    label_offset: f32,
    edge_style: EdgeStyle,
    /// Height of a curved edge's control point above the midline.
    curve_lift: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_x: 100.0,
            base_y: 50.0,
            level_spacing: 120.0,
            min_spacing: 150.0,
            margin: 20.0,
            label_offset: 10.0,
            edge_style: EdgeStyle::Orthogonal,
            curve_lift: 30.0,
        }
    }
}

impl LayoutConfig {
    pub fn base_x(&self) -> f32 {
        self.base_x
    }

    pub fn base_y(&self) -> f32 {
        self.base_y
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn min_spacing(&self) -> f32 {
        self.min_spacing
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    pub fn edge_style(&self) -> EdgeStyle {
        self.edge_style
    }

    pub fn curve_lift(&self) -> f32 {
        self.curve_lift
    }

    pub fn with_base_x(mut self, base_x: f32) -> Self {
        self.base_x = base_x;
        self
    }

    pub fn with_base_y(mut self, base_y: f32) -> Self {
        self.base_y = base_y;
        self
    }

    pub fn with_level_spacing(mut self, level_spacing: f32) -> Self {
        self.level_spacing = level_spacing;
        self
    }

    pub fn with_min_spacing(mut self, min_spacing: f32) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_label_offset(mut self, label_offset: f32) -> Self {
        self.label_offset = label_offset;
        self
    }

    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = edge_style;
        self
    }

    pub fn with_curve_lift(mut self, curve_lift: f32) -> Self {
        self.curve_lift = curve_lift;
        self
    }

    /// Rejects values under which the layout could overlap or clip nodes.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending setting when a value is not a
    /// finite non-negative number, when `min_spacing` is narrower than the
    /// widest node kind, when `level_spacing` does not exceed the tallest node
    /// kind, or when `base_y` would push level 0 above the canvas.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("base_x", self.base_x),
            ("base_y", self.base_y),
            ("level_spacing", self.level_spacing),
            ("min_spacing", self.min_spacing),
            ("margin", self.margin),
            ("label_offset", self.label_offset),
            ("curve_lift", self.curve_lift),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "layout.{name} must be a finite, non-negative number (got {value})"
                ));
            }
        }

        let largest = NodeKind::max_default_size();
        if self.min_spacing < largest.width() {
            return Err(format!(
                "layout.min_spacing must be at least {} so nodes on one level cannot overlap (got {})",
                largest.width(),
                self.min_spacing
            ));
        }
        if self.level_spacing <= largest.height() {
            return Err(format!(
                "layout.level_spacing must exceed {} so adjacent levels cannot overlap (got {})",
                largest.height(),
                self.level_spacing
            ));
        }
        if self.base_y < largest.half_height() {
            return Err(format!(
                "layout.base_y must be at least {} so the first level stays on the canvas (got {})",
                largest.half_height(),
                self.base_y
            ));
        }

        Ok(())
    }
}

/// Colors used by the SVG exporter, as CSS color strings.
///
/// Unset fields fall back to the exporter's built-in palette.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Canvas background; transparent when unset.
    background_color: Option<String>,
    /// Stroke for node outlines and edges; per-kind outlines when unset.
    stroke_color: Option<String>,
    /// Color of node labels, actor names and edge labels.
    text_color: Option<String>,
    start_event_fill: Option<String>,
    task_fill: Option<String>,
    gateway_fill: Option<String>,
    end_event_fill: Option<String>,
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_fill(mut self, kind: NodeKind, color: impl Into<String>) -> Self {
        let color = Some(color.into());
        match kind {
            NodeKind::StartEvent => self.start_event_fill = color,
            NodeKind::Task => self.task_fill = color,
            NodeKind::Gateway => self.gateway_fill = color,
            NodeKind::EndEvent => self.end_event_fill = color,
        }
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background_color", self.background_color.as_deref())
    }

    /// Returns the outline color for one node kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn node_stroke(&self, kind: NodeKind) -> Result<Color, String> {
        let fallback = match kind {
            NodeKind::StartEvent | NodeKind::EndEvent => "#1976d2",
            NodeKind::Task => "#f57c00",
            NodeKind::Gateway => "#43a047",
        };
        resolve_color("stroke_color", self.stroke_color.as_deref(), fallback)
    }

    /// Returns the color of edge paths and arrowheads.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn edge_stroke(&self) -> Result<Color, String> {
        resolve_color("stroke_color", self.stroke_color.as_deref(), "black")
    }

    /// Returns the text color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn text_color(&self) -> Result<Color, String> {
        resolve_color("text_color", self.text_color.as_deref(), "black")
    }

    /// Returns the fill for one node kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn fill_color(&self, kind: NodeKind) -> Result<Color, String> {
        let (field, configured, fallback) = match kind {
            NodeKind::StartEvent => ("start_event_fill", &self.start_event_fill, "#e3f2fd"),
            NodeKind::Task => ("task_fill", &self.task_fill, "#fff3e0"),
            NodeKind::Gateway => ("gateway_fill", &self.gateway_fill, "#e8f5e9"),
            NodeKind::EndEvent => ("end_event_fill", &self.end_event_fill, "#e3f2fd"),
        };
        resolve_color(field, configured.as_deref(), fallback)
    }

    /// Checks that every configured color parses.
    ///
    /// # Errors
    ///
    /// Returns the first color error found.
    pub fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.edge_stroke()?;
        self.text_color()?;
        for kind in NodeKind::ALL {
            self.fill_color(kind)?;
            self.node_stroke(kind)?;
        }
        Ok(())
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid style.{field} in config: {err}"))
}

/// Parses the configured color, or the built-in `fallback` when unset.
fn resolve_color(field: &str, value: Option<&str>, fallback: &str) -> Result<Color, String> {
    Color::new(value.unwrap_or(fallback))
        .map_err(|err| format!("Invalid style.{field} in config: {err}"))
}
