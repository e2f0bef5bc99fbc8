#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn wall(id: &str, a: Point, b: Point) -> Wall {
    Wall { id: id.to_owned(), start: a, end: b, thickness: 6.0, height: 96.0 }
}

fn arc(id: &str, a: Point, b: Point) -> ArcWall {
    ArcWall { id: id.to_owned(), start: a, end: b, control_point: midpoint(a, b), thickness: 6.0, height: 96.0 }
}

// =============================================================
// Vector math
// =============================================================

#[test]
fn distance_is_euclidean() {
    assert!(approx_eq(distance(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0));
}

#[test]
fn midpoint_and_lerp_agree_at_half() {
    let a = pt(-4.0, 2.0);
    let b = pt(10.0, 8.0);
    assert!(point_approx_eq(midpoint(a, b), lerp(a, b, 0.5)));
}

#[test]
fn wall_angle_of_vertical_wall() {
    let w = wall("w", pt(0.0, 0.0), pt(0.0, 10.0));
    assert!(approx_eq(wall_angle(&w), std::f64::consts::FRAC_PI_2));
}

#[test]
fn wall_angle_of_zero_length_wall_is_zero() {
    let w = wall("w", pt(5.0, 5.0), pt(5.0, 5.0));
    assert_eq!(wall_angle(&w), 0.0);
    assert_eq!(wall_length(&w), 0.0);
}

#[test]
fn polygon_centroid_of_square() {
    let square = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
    assert_eq!(polygon_centroid(&square), Some(pt(5.0, 5.0)));
    assert_eq!(polygon_centroid(&[]), None);
}

// =============================================================
// Snapping
// =============================================================

#[test]
fn snap_to_grid_rounds_to_nearest_multiple() {
    assert_eq!(snap_to_grid(pt(17.0, 5.0), 12.0), pt(12.0, 0.0));
    assert_eq!(snap_to_grid(pt(18.0, -7.0), 12.0), pt(24.0, -12.0));
}

#[test]
fn snap_to_grid_is_idempotent() {
    for &(x, y) in &[(3.3, 97.1), (-41.0, 6.0), (1000.5, -0.2)] {
        let once = snap_to_grid(pt(x, y), 12.0);
        assert_eq!(snap_to_grid(once, 12.0), once);
    }
}

#[test]
fn snap_to_grid_non_positive_grid_is_identity() {
    assert_eq!(snap_to_grid(pt(3.3, 4.4), 0.0), pt(3.3, 4.4));
    assert_eq!(snap_to_grid(pt(3.3, 4.4), -12.0), pt(3.3, 4.4));
}

#[test]
fn snap_to_endpoint_picks_nearest_within_radius() {
    let walls = [wall("a", pt(0.0, 0.0), pt(100.0, 0.0)), wall("b", pt(100.0, 0.0), pt(100.0, 100.0))];
    let arcs = [arc("c", pt(50.0, 50.0), pt(60.0, 60.0))];
    assert_eq!(snap_to_endpoint(pt(97.0, 2.0), &walls, &arcs, 12.0), Some(pt(100.0, 0.0)));
    assert_eq!(snap_to_endpoint(pt(52.0, 52.0), &walls, &arcs, 12.0), Some(pt(50.0, 50.0)));
}

#[test]
fn snap_to_endpoint_radius_is_exclusive() {
    let walls = [wall("a", pt(0.0, 0.0), pt(100.0, 0.0))];
    assert_eq!(snap_to_endpoint(pt(12.0, 0.0), &walls, &[], 12.0), None);
    assert_eq!(snap_to_endpoint(pt(11.9, 0.0), &walls, &[], 12.0), Some(pt(0.0, 0.0)));
}

#[test]
fn snap_to_endpoint_empty_plan() {
    assert_eq!(snap_to_endpoint(pt(0.0, 0.0), &[], &[], 12.0), None);
}

#[test]
fn snap_angle_flattens_shallow_drag() {
    let snapped = snap_angle(pt(0.0, 0.0), pt(103.0, 2.0), 15.0);
    assert!(approx_eq(snapped.y, 0.0));
    assert!((snapped.x - 103.0194).abs() < 1e-3);
}

#[test]
fn snap_angle_preserves_length() {
    let origin = pt(10.0, 10.0);
    let target = pt(60.0, 47.0);
    let snapped = snap_angle(origin, target, 15.0);
    assert!(approx_eq(distance(origin, snapped), distance(origin, target)));
}

#[test]
fn snap_angle_lands_on_increment() {
    let snapped = snap_angle(pt(0.0, 0.0), pt(50.0, 48.0), 15.0);
    let angle = snapped.y.atan2(snapped.x).to_degrees();
    assert!(approx_eq(angle, 45.0));
}

#[test]
fn snap_angle_short_segment_unchanged() {
    assert_eq!(snap_angle(pt(0.0, 0.0), pt(0.5, 0.3), 15.0), pt(0.5, 0.3));
}

// =============================================================
// Projection
// =============================================================

#[test]
fn project_onto_wall_midpoint() {
    let w = wall("w", pt(0.0, 0.0), pt(100.0, 0.0));
    assert!(approx_eq(project_onto_wall(pt(40.0, 25.0), &w), 0.4));
}

#[test]
fn project_onto_wall_clamps_to_unit_interval() {
    let w = wall("w", pt(0.0, 0.0), pt(100.0, 0.0));
    assert_eq!(project_onto_wall(pt(-50.0, 0.0), &w), 0.0);
    assert_eq!(project_onto_wall(pt(250.0, 3.0), &w), 1.0);
}

#[test]
fn project_onto_degenerate_wall_is_zero() {
    let w = wall("w", pt(5.0, 5.0), pt(5.0, 5.0));
    assert_eq!(project_onto_wall(pt(40.0, 40.0), &w), 0.0);
}

#[test]
fn position_on_wall_inverts_projection() {
    let w = wall("w", pt(0.0, 0.0), pt(0.0, 80.0));
    let t = project_onto_wall(pt(12.0, 20.0), &w);
    assert!(point_approx_eq(position_on_wall(&w, t), pt(0.0, 20.0)));
}

#[test]
fn point_to_segment_distance_cases() {
    let a = pt(0.0, 0.0);
    let b = pt(10.0, 0.0);
    assert!(approx_eq(point_to_segment_distance(pt(5.0, 3.0), a, b), 3.0));
    assert!(approx_eq(point_to_segment_distance(pt(13.0, 4.0), a, b), 5.0));
    assert!(approx_eq(point_to_segment_distance(pt(3.0, 4.0), a, a), 5.0));
}

#[test]
fn find_nearest_wall_respects_threshold() {
    let walls = [wall("near", pt(0.0, 0.0), pt(100.0, 0.0)), wall("far", pt(0.0, 50.0), pt(100.0, 50.0))];
    assert_eq!(find_nearest_wall(pt(50.0, 10.0), &walls, 18.0).map(|w| w.id.as_str()), Some("near"));
    assert_eq!(find_nearest_wall(pt(50.0, 42.0), &walls, 18.0).map(|w| w.id.as_str()), Some("far"));
    assert!(find_nearest_wall(pt(50.0, 25.0), &walls, 18.0).is_none());
}

#[test]
fn arc_control_point_bows_left_of_chord() {
    let c = arc_control_point(pt(0.0, 0.0), pt(100.0, 0.0), 0.4);
    assert!(point_approx_eq(c, pt(50.0, 40.0)));
}

#[test]
fn quad_point_hits_endpoints() {
    let (s, c, e) = (pt(0.0, 0.0), pt(50.0, 40.0), pt(100.0, 0.0));
    assert!(point_approx_eq(quad_point(s, c, e, 0.0), s));
    assert!(point_approx_eq(quad_point(s, c, e, 1.0), e));
    assert!(point_approx_eq(quad_point(s, c, e, 0.5), pt(50.0, 20.0)));
}

// =============================================================
// Polygons
// =============================================================

#[test]
fn point_in_convex_polygon() {
    let square = [pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0), pt(0.0, 100.0)];
    assert!(point_in_polygon(pt(50.0, 50.0), &square));
    assert!(!point_in_polygon(pt(150.0, 50.0), &square));
    assert!(!point_in_polygon(pt(50.0, -1.0), &square));
}

#[test]
fn point_in_concave_polygon() {
    // An L shape with the top-right quadrant missing.
    let l_shape = [pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 50.0), pt(50.0, 50.0), pt(50.0, 100.0), pt(0.0, 100.0)];
    assert!(point_in_polygon(pt(25.0, 75.0), &l_shape));
    assert!(!point_in_polygon(pt(75.0, 75.0), &l_shape));
}

#[test]
fn point_in_polygon_needs_three_vertices() {
    assert!(!point_in_polygon(pt(0.0, 0.0), &[]));
    assert!(!point_in_polygon(pt(0.5, 0.0), &[pt(0.0, 0.0), pt(1.0, 0.0)]));
}

// =============================================================
// Formatting
// =============================================================

#[test]
fn format_length_imperial() {
    assert_eq!(format_length(63.0, MeasurementUnit::Imperial), "5' 3\"");
    assert_eq!(format_length(96.0, MeasurementUnit::Imperial), "8'");
    assert_eq!(format_length(7.0, MeasurementUnit::Imperial), "7\"");
}

#[test]
fn format_length_imperial_rounds_before_splitting() {
    assert_eq!(format_length(143.7, MeasurementUnit::Imperial), "12'");
    assert_eq!(format_length(11.6, MeasurementUnit::Imperial), "1'");
}

#[test]
fn format_length_metric() {
    assert_eq!(format_length(10.0, MeasurementUnit::Metric), "25.4 cm");
    assert_eq!(format_length(100.0, MeasurementUnit::Metric), "2.54 m");
}

#[test]
fn format_area_both_units() {
    assert_eq!(format_area(120.0, MeasurementUnit::Imperial), "120 sq ft");
    assert_eq!(format_area(100.0, MeasurementUnit::Metric), "9.3 m\u{b2}");
}
