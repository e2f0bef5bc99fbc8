//! Backend-agnostic visual tree.
//!
//! The renderer produces a [`Scene`]: ordered layers of [`Node`]s, each a
//! primitive shape or a group with its own translation, rotation and opacity.
//! A host maps the tree onto its drawing API; [`crate::hit`] walks the same
//! tree to resolve clicks. Nodes that stand for a document element carry its
//! id so a hit can be traced back to it.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::Serialize;

use crate::doc::ElementId;
use crate::geometry::Point;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub layers: Vec<Layer>,
}

impl Scene {
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: &'static str,
    /// Whether the layer takes part in hit-testing.
    pub listening: bool,
    pub nodes: Vec<Node>,
}

impl Layer {
    #[must_use]
    pub fn new(name: &'static str, listening: bool) -> Self {
        Self { name, listening, nodes: Vec::new() }
    }

    /// Depth-first search for the node tagged `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find_map(|n| n.find(id))
    }
}

/// A shape or group placed at `(x, y)` and rotated by `rotation` degrees
/// relative to its parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub listening: bool,
    pub shape: Shape,
}

impl Node {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self { id: None, x: 0.0, y: 0.0, rotation: 0.0, opacity: 1.0, listening: true, shape }
    }

    #[must_use]
    pub fn group(children: Vec<Node>) -> Self {
        Self::new(Shape::Group { children })
    }

    #[must_use]
    pub fn at(mut self, p: Point) -> Self {
        self.x = p.x;
        self.y = p.y;
        self
    }

    #[must_use]
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn listening(mut self, listening: bool) -> Self {
        self.listening = listening;
        self
    }

    /// This node or the first descendant tagged `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        match &self.shape {
            Shape::Group { children } => children.iter().find_map(|c| c.find(id)),
            _ => None,
        }
    }

    /// Map a point from the parent's space into this node's local space.
    #[must_use]
    pub fn to_local(&self, p: Point) -> Point {
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        let (sin, cos) = (-self.rotation.to_radians()).sin_cos();
        Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
    }
}

/// Outline style. `hit_width` widens the clickable band beyond the visible stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_width: Option<f64>,
}

impl Stroke {
    #[must_use]
    pub fn solid(color: &'static str, width: f64) -> Self {
        Self { color, width, dash: None, hit_width: None }
    }

    #[must_use]
    pub fn dashed(color: &'static str, width: f64, dash: [f64; 2]) -> Self {
        Self { color, width, dash: Some(dash), hit_width: None }
    }

    #[must_use]
    pub fn with_hit_width(mut self, hit_width: f64) -> Self {
        self.hit_width = Some(hit_width);
        self
    }

    /// Width of the band that counts as a hit.
    #[must_use]
    pub fn effective_hit_width(&self) -> f64 {
        self.hit_width.map_or(self.width, |h| h.max(self.width))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Primitive shapes, in node-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Shape {
    Group {
        children: Vec<Node>,
    },
    /// Polyline; a closed line with a fill is a polygon.
    Line {
        points: Vec<Point>,
        closed: bool,
        stroke: Option<Stroke>,
        fill: Option<&'static str>,
    },
    /// Centered on the node origin.
    Circle {
        radius: f64,
        stroke: Option<Stroke>,
        fill: Option<&'static str>,
    },
    /// Centered on the node origin.
    Ellipse {
        radius_x: f64,
        radius_y: f64,
        stroke: Option<Stroke>,
        fill: Option<&'static str>,
    },
    /// Anchored at its top-left corner `(x, y)`.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        stroke: Option<Stroke>,
        fill: Option<&'static str>,
    },
    /// Circular arc centered on the origin, sweeping `angle` degrees clockwise from the node's rotation.
    Arc {
        radius: f64,
        angle: f64,
        stroke: Stroke,
    },
    /// Quadratic Bézier, drawn by the host as an explicit path.
    QuadCurve {
        start: Point,
        control: Point,
        end: Point,
        stroke: Stroke,
    },
    Arrow {
        points: Vec<Point>,
        pointer_length: f64,
        stroke: Stroke,
    },
    /// Top-left anchored text. `width` sets the alignment box.
    Text {
        text: String,
        font_size: f64,
        bold: bool,
        fill: &'static str,
        width: Option<f64>,
        align: TextAlign,
    },
}

impl Shape {
    #[must_use]
    pub fn line(points: Vec<Point>, stroke: Stroke) -> Self {
        Self::Line { points, closed: false, stroke: Some(stroke), fill: None }
    }

    #[must_use]
    pub fn segment(a: Point, b: Point, stroke: Stroke) -> Self {
        Self::line(vec![a, b], stroke)
    }

    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64, stroke: Option<Stroke>, fill: Option<&'static str>) -> Self {
        Self::Rect { x, y, width, height, corner_radius: 0.0, stroke, fill }
    }

    #[must_use]
    pub fn text(text: impl Into<String>, font_size: f64, fill: &'static str) -> Self {
        Self::Text { text: text.into(), font_size, bold: false, fill, width: None, align: TextAlign::Left }
    }

    /// Text centered in a box `width` wide starting at the node origin.
    #[must_use]
    pub fn centered_text(text: impl Into<String>, font_size: f64, bold: bool, fill: &'static str, width: f64) -> Self {
        Self::Text { text: text.into(), font_size, bold, fill, width: Some(width), align: TextAlign::Center }
    }
}
