#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::ElementId;
use crate::geometry::{distance, point_in_polygon, point_to_segment_distance, quad_point, Point};
use crate::scene::{Layer, Node, Scene, Shape, Stroke};

/// Segments used to approximate a quadratic curve.
const CURVE_STEPS: u32 = 24;

/// Result of a hit test: the id of the topmost tagged node and its layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: ElementId,
    pub layer: &'static str,
}

/// Test which tagged node (if any) is under `world`.
///
/// Layers and nodes are searched front to back. Non-listening layers and
/// subtrees are skipped. A shape hit resolves to its nearest tagged ancestor,
/// so a wall's length readout never swallows a click meant for the wall.
#[must_use]
pub fn hit_test(scene: &Scene, world: Point) -> Option<Hit> {
    scene
        .layers
        .iter()
        .rev()
        .find_map(|layer| hit_layer(layer, world).map(|id| Hit { id, layer: layer.name }))
}

/// Topmost tagged element of a single layer under `world`.
#[must_use]
pub fn hit_layer(layer: &Layer, world: Point) -> Option<ElementId> {
    if !layer.listening {
        return None;
    }
    layer.nodes.iter().rev().find_map(|node| hit_node(node, world, None))
}

fn hit_node(node: &Node, p: Point, tag: Option<&str>) -> Option<ElementId> {
    if !node.listening {
        return None;
    }
    let tag = node.id.as_deref().or(tag);
    let local = node.to_local(p);
    match &node.shape {
        Shape::Group { children } => children.iter().rev().find_map(|c| hit_node(c, local, tag)),
        shape => tag.filter(|_| shape_contains(shape, local)).map(str::to_owned),
    }
}

fn half_band(stroke: Option<&Stroke>) -> f64 {
    stroke.map_or(0.0, |s| s.effective_hit_width() / 2.0)
}

fn near_polyline(points: &[Point], closed: bool, p: Point, tolerance: f64) -> bool {
    if let [only] = points {
        return distance(*only, p) <= tolerance;
    }
    let open = points.windows(2).any(|w| point_to_segment_distance(p, w[0], w[1]) <= tolerance);
    let closing = closed
        && points.len() > 2
        && matches!((points.first(), points.last()), (Some(a), Some(b)) if point_to_segment_distance(p, *b, *a) <= tolerance);
    open || closing
}

/// Whether `p` (in the shape's local space) lies on the shape.
#[must_use]
pub fn shape_contains(shape: &Shape, p: Point) -> bool {
    match shape {
        Shape::Group { .. } => false,
        Shape::Line { points, closed, stroke, fill } => {
            (*closed && fill.is_some() && point_in_polygon(p, points))
                || (stroke.is_some() && near_polyline(points, *closed, p, half_band(stroke.as_ref())))
        }
        Shape::Circle { radius, stroke, .. } => p.x.hypot(p.y) <= radius + half_band(stroke.as_ref()),
        Shape::Ellipse { radius_x, radius_y, stroke, .. } => {
            let pad = half_band(stroke.as_ref());
            let (rx, ry) = (radius_x + pad, radius_y + pad);
            rx > 0.0 && ry > 0.0 && (p.x / rx).powi(2) + (p.y / ry).powi(2) <= 1.0
        }
        Shape::Rect { x, y, width, height, stroke, .. } => {
            let pad = half_band(stroke.as_ref());
            let (x0, x1) = (x.min(x + width) - pad, x.max(x + width) + pad);
            let (y0, y1) = (y.min(y + height) - pad, y.max(y + height) + pad);
            (x0..=x1).contains(&p.x) && (y0..=y1).contains(&p.y)
        }
        Shape::Arc { radius, angle, stroke } => {
            let on_ring = (p.x.hypot(p.y) - radius).abs() <= half_band(Some(stroke));
            let bearing = p.y.atan2(p.x).to_degrees().rem_euclid(360.0);
            on_ring && bearing <= *angle
        }
        Shape::QuadCurve { start, control, end, stroke } => {
            let samples: Vec<Point> =
                (0..=CURVE_STEPS).map(|i| quad_point(*start, *control, *end, f64::from(i) / f64::from(CURVE_STEPS))).collect();
            near_polyline(&samples, false, p, half_band(Some(stroke)))
        }
        Shape::Arrow { points, stroke, .. } => near_polyline(points, false, p, half_band(Some(stroke))),
        Shape::Text { text, font_size, width, .. } => {
            #[allow(clippy::cast_precision_loss)]
            let estimated = text.chars().count() as f64 * font_size * 0.6;
            let w = width.unwrap_or(estimated);
            (0.0..=w).contains(&p.x) && (0.0..=font_size * 1.2).contains(&p.y)
        }
    }
}
