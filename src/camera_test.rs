#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    let p = Point::new(12.5, -3.0);
    assert!(point_approx_eq(cam.screen_to_world(p), p));
    assert!(point_approx_eq(cam.world_to_screen(p), p));
}

#[test]
fn from_editor_reads_zoom_and_pan() {
    let editor = EditorState { zoom: 2.0, pan_offset: Point::new(10.0, 20.0), ..EditorState::default() };
    let cam = Camera::from_editor(&editor);
    assert_eq!(cam, Camera { pan_x: 10.0, pan_y: 20.0, zoom: 2.0 });
}

#[test]
fn from_editor_guards_zero_zoom() {
    let editor = EditorState { zoom: 0.0, ..EditorState::default() };
    assert_eq!(Camera::from_editor(&editor).zoom, 1.0);
}

// --- Transforms ---

#[test]
fn screen_world_round_trip() {
    let cam = Camera { pan_x: 37.0, pan_y: -12.0, zoom: 1.7 };
    let p = Point::new(220.0, 95.0);
    assert!(point_approx_eq(cam.world_to_screen(cam.screen_to_world(p)), p));
}

#[test]
fn screen_to_world_applies_pan_then_zoom() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 2.0 };
    assert!(point_approx_eq(cam.screen_to_world(Point::new(300.0, 250.0)), Point::new(100.0, 100.0)));
    assert!(approx_eq(cam.screen_dist_to_world(12.0), 6.0));
}

#[test]
fn panned_shifts_offset() {
    let cam = Camera::default().panned(5.0, -7.0);
    assert_eq!(cam.pan_x, 5.0);
    assert_eq!(cam.pan_y, -7.0);
    assert_eq!(cam.zoom, 1.0);
}

// --- Zoom to cursor ---

#[test]
fn zoomed_at_keeps_pointer_fixed() {
    let cam = Camera { pan_x: 40.0, pan_y: 25.0, zoom: 1.3 };
    let pointer = Point::new(310.0, 180.0);
    let before = cam.screen_to_world(pointer);
    let after = cam.zoomed_at(pointer, 2.6);
    assert!(point_approx_eq(after.screen_to_world(pointer), before));
    assert_eq!(after.zoom, 2.6);
}

#[test]
fn wheel_zoom_direction_and_clamp() {
    assert!(approx_eq(wheel_zoom(1.0, -100.0, 1.08, 0.1, 5.0), 1.08));
    assert!(approx_eq(wheel_zoom(1.08, 100.0, 1.08, 0.1, 5.0), 1.0));
    assert_eq!(wheel_zoom(4.9, -1.0, 1.08, 0.1, 5.0), 5.0);
    assert_eq!(wheel_zoom(0.105, 1.0, 1.08, 0.1, 5.0), 0.1);
}

#[test]
fn wheel_zoom_accepts_swapped_bounds() {
    assert_eq!(wheel_zoom(4.9, -1.0, 1.08, 5.0, 0.1), 5.0);
    assert_eq!(wheel_zoom(0.105, 1.0, 1.08, 5.0, 0.1), 0.1);
    assert!(approx_eq(wheel_zoom(1.0, -1.0, 1.08, 5.0, 0.1), 1.08));
}

#[test]
fn to_patch_carries_viewport() {
    let patch = Camera { pan_x: 1.0, pan_y: 2.0, zoom: 3.0 }.to_patch();
    assert_eq!(patch.zoom, Some(3.0));
    assert_eq!(patch.pan_offset, Some(Point::new(1.0, 2.0)));
    assert!(patch.is_drawing.is_none());
}
