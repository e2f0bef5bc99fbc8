#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::editor::{EditorPatch, EditorState};
use crate::geometry::Point;

/// Viewport transform: `screen = world * zoom + pan`.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// The viewport currently recorded in the editor state.
    #[must_use]
    pub fn from_editor(editor: &EditorState) -> Self {
        let zoom = if editor.zoom > 0.0 { editor.zoom } else { 1.0 };
        Self { pan_x: editor.pan_offset.x, pan_y: editor.pan_offset.y, zoom }
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Shift the viewport by a screen-space delta.
    #[must_use]
    pub fn panned(self, dx: f64, dy: f64) -> Self {
        Self { pan_x: self.pan_x + dx, pan_y: self.pan_y + dy, ..self }
    }

    /// Rescale to `new_zoom` keeping the world point under `pointer` fixed on screen.
    #[must_use]
    pub fn zoomed_at(self, pointer: Point, new_zoom: f64) -> Self {
        let anchor = self.screen_to_world(pointer);
        Self {
            pan_x: pointer.x - anchor.x * new_zoom,
            pan_y: pointer.y - anchor.y * new_zoom,
            zoom: new_zoom,
        }
    }

    /// The editor fields describing this viewport.
    #[must_use]
    pub fn to_patch(&self) -> EditorPatch {
        EditorPatch {
            zoom: Some(self.zoom),
            pan_offset: Some(Point::new(self.pan_x, self.pan_y)),
            is_drawing: None,
        }
    }
}

/// Next zoom level for one wheel notch: scrolling up (negative `dy`) zooms in.
/// The bounds may arrive in either order.
#[must_use]
pub fn wheel_zoom(current: f64, dy: f64, factor: f64, min: f64, max: f64) -> f64 {
    let next = if dy < 0.0 { current * factor } else { current / factor };
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    next.max(lo).min(hi)
}
