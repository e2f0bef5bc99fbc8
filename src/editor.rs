//! Editor state: the active tool, draw defaults and viewport, owned by the host
//! toolbar. The engine reads it on every event and reports changes back as an
//! [`EditorPatch`].

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use serde::{Deserialize, Serialize};

use crate::doc::{DoorType, ElementId, FixtureType, MeasurementUnit, WindowType};
use crate::geometry::Point;
use crate::input::Tool;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorState {
    pub active_tool: Tool,
    pub grid_size: f64,
    pub units: MeasurementUnit,
    pub wall_thickness: f64,
    pub door_width: f64,
    pub door_type: DoorType,
    pub window_width: f64,
    pub window_type: WindowType,
    pub pending_fixture_type: Option<FixtureType>,
    pub show_grid: bool,
    /// Snap wall and arc-wall directions to the configured increment.
    pub angle_snap: bool,
    pub zoom: f64,
    pub pan_offset: Point,
    pub is_drawing: bool,
    /// Trade layer receiving new trade items; `None` means the base layer.
    pub active_layer_id: Option<ElementId>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            active_tool: Tool::Wall,
            grid_size: 12.0,
            units: MeasurementUnit::Imperial,
            wall_thickness: 6.0,
            door_width: 36.0,
            door_type: DoorType::Single,
            window_width: 36.0,
            window_type: WindowType::Standard,
            pending_fixture_type: None,
            show_grid: true,
            angle_snap: true,
            zoom: 1.0,
            pan_offset: Point::default(),
            is_drawing: false,
            active_layer_id: None,
        }
    }
}

impl EditorState {
    #[must_use]
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.active_tool = tool;
        self
    }
}

/// Partial editor update emitted by the engine. Only set fields changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_offset: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_drawing: Option<bool>,
}

impl EditorPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zoom.is_none() && self.pan_offset.is_none() && self.is_drawing.is_none()
    }

    /// A copy of `state` with this patch applied.
    #[must_use]
    pub fn apply(&self, state: &EditorState) -> EditorState {
        let mut next = state.clone();
        if let Some(zoom) = self.zoom {
            next.zoom = zoom;
        }
        if let Some(pan) = self.pan_offset {
            next.pan_offset = pan;
        }
        if let Some(drawing) = self.is_drawing {
            next.is_drawing = drawing;
        }
        next
    }
}
