//! Geometry kernel: points, snapping, projection and measurement formatting.
//!
//! Every function here is pure. Inputs are borrowed and never mutated, and
//! degenerate input (zero-length segments, tiny polygons, a non-positive grid)
//! yields a defined fallback instead of `NaN`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ArcWall, MeasurementUnit, Wall};

/// Squared length below which a segment is treated as a point.
const DEGENERATE_LEN_SQ: f64 = 0.001;

/// A point in drawing units (inches) or screen pixels, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

// =============================================================
// Vector math
// =============================================================

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1).
#[must_use]
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

#[must_use]
pub fn wall_length(wall: &Wall) -> f64 {
    distance(wall.start, wall.end)
}

/// Direction of a wall in radians. A zero-length wall reports 0.
#[must_use]
pub fn wall_angle(wall: &Wall) -> f64 {
    let dy = wall.end.y - wall.start.y;
    let dx = wall.end.x - wall.start.x;
    if dx.hypot(dy) < f64::EPSILON {
        return 0.0;
    }
    dy.atan2(dx)
}

/// Vertex average of a polygon. `None` for an empty point list.
#[must_use]
pub fn polygon_centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

// =============================================================
// Snapping
// =============================================================

/// Round each coordinate to the nearest multiple of `grid_size`.
///
/// A non-positive grid leaves the point untouched.
#[must_use]
pub fn snap_to_grid(p: Point, grid_size: f64) -> Point {
    if grid_size <= 0.0 {
        return p;
    }
    Point::new((p.x / grid_size).round() * grid_size, (p.y / grid_size).round() * grid_size)
}

/// Nearest wall or arc-wall endpoint strictly within `radius` of `p`.
#[must_use]
pub fn snap_to_endpoint(p: Point, walls: &[Wall], arc_walls: &[ArcWall], radius: f64) -> Option<Point> {
    let endpoints = walls
        .iter()
        .flat_map(|w| [w.start, w.end])
        .chain(arc_walls.iter().flat_map(|a| [a.start, a.end]));

    let mut best_dist = radius;
    let mut best = None;
    for candidate in endpoints {
        let d = distance(p, candidate);
        if d < best_dist {
            best_dist = d;
            best = Some(candidate);
        }
    }
    best
}

/// Rotate `target` about `origin` so the direction is the nearest multiple of
/// `increment_deg`, keeping the original length.
///
/// Segments shorter than one unit are returned unchanged.
#[must_use]
pub fn snap_angle(origin: Point, target: Point, increment_deg: f64) -> Point {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let len = dx.hypot(dy);
    if len < 1.0 || increment_deg <= 0.0 {
        return target;
    }
    let step = increment_deg.to_radians();
    let snapped = (dy.atan2(dx) / step).round() * step;
    Point::new(origin.x + len * snapped.cos(), origin.y + len * snapped.sin())
}

// =============================================================
// Segments and walls
// =============================================================

/// Shortest distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < DEGENERATE_LEN_SQ {
        return distance(p, a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, Point::new(a.x + t * dx, a.y + t * dy))
}

/// Parametric position in `[0, 1]` of the point on `wall` closest to `p`.
///
/// Returns 0 for a zero-length wall.
#[must_use]
pub fn project_onto_wall(p: Point, wall: &Wall) -> f64 {
    let dx = wall.end.x - wall.start.x;
    let dy = wall.end.y - wall.start.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < DEGENERATE_LEN_SQ {
        return 0.0;
    }
    (((p.x - wall.start.x) * dx + (p.y - wall.start.y) * dy) / len_sq).clamp(0.0, 1.0)
}

/// World position at parametric `t` along a wall.
#[must_use]
pub fn position_on_wall(wall: &Wall, t: f64) -> Point {
    lerp(wall.start, wall.end, t)
}

/// The wall whose segment passes closest to `p`, if that distance is below `max_dist`.
#[must_use]
pub fn find_nearest_wall(p: Point, walls: &[Wall], max_dist: f64) -> Option<&Wall> {
    let mut best = None;
    let mut best_dist = max_dist;
    for wall in walls {
        let d = point_to_segment_distance(p, wall.start, wall.end);
        if d < best_dist {
            best_dist = d;
            best = Some(wall);
        }
    }
    best
}

/// Default control point for an arc wall: the chord midpoint pushed sideways
/// by `bow` times the chord vector, rotated a quarter turn.
#[must_use]
pub fn arc_control_point(start: Point, end: Point, bow: f64) -> Point {
    let mid = midpoint(start, end);
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    Point::new(mid.x - dy * bow, mid.y + dx * bow)
}

/// Point at `t` on the quadratic Bézier `start`–`control`–`end`.
#[must_use]
pub fn quad_point(start: Point, control: Point, end: Point, t: f64) -> Point {
    let u = 1.0 - t;
    Point::new(
        u * u * start.x + 2.0 * u * t * control.x + t * t * end.x,
        u * u * start.y + 2.0 * u * t * control.y + t * t * end.y,
    )
}

// =============================================================
// Polygons
// =============================================================

/// Crossing-number containment test. Fewer than three vertices contain nothing.
#[must_use]
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// =============================================================
// Measurement formatting
// =============================================================

/// Render a length given in inches.
///
/// Imperial rounds to the nearest whole inch first, then splits into feet and
/// inches (`5' 3"`, `8'`, `7"`). Metric switches from centimetres to metres at 1 m.
#[must_use]
pub fn format_length(inches: f64, units: MeasurementUnit) -> String {
    match units {
        MeasurementUnit::Metric => {
            let cm = inches * 2.54;
            if cm >= 100.0 {
                format!("{:.2} m", cm / 100.0)
            } else {
                format!("{cm:.1} cm")
            }
        }
        MeasurementUnit::Imperial => {
            #[allow(clippy::cast_possible_truncation)]
            let total = inches.round() as i64;
            let feet = total / 12;
            let rest = total % 12;
            if feet == 0 {
                format!("{rest}\"")
            } else if rest == 0 {
                format!("{feet}'")
            } else {
                format!("{feet}' {rest}\"")
            }
        }
    }
}

/// Render an area given in square feet.
#[must_use]
pub fn format_area(sq_ft: f64, units: MeasurementUnit) -> String {
    match units {
        MeasurementUnit::Metric => format!("{:.1} m\u{b2}", sq_ft * 0.0929),
        MeasurementUnit::Imperial => format!("{sq_ft:.0} sq ft"),
    }
}
