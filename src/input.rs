//! Input model: tools, modifier keys, mouse buttons, and the gesture state machines.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. Two state machines live between events: [`DrawState`] remembers the
//! first click of a two-click draw, and [`InputState`] tracks the gesture in
//! progress between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    /// Click to select a single element.
    #[default]
    Select,
    /// Two clicks: straight wall.
    Wall,
    /// Two clicks: curved wall with an automatic control point.
    ArcWall,
    /// Click near a wall to hang a door.
    Door,
    /// Click near a wall to set a window.
    Window,
    /// Click to place the pending fixture type.
    Fixture,
    /// Click to drop a text label.
    Label,
    /// Two clicks: measured dimension line.
    Dimension,
    /// Click to delete an element.
    Erase,
    /// Drag a freehand polygon to multi-select.
    Lasso,
    /// Drag to move the viewport.
    Pan,
}

impl Tool {
    /// Whether this tool commits on a second click.
    #[must_use]
    pub fn is_two_click(self) -> bool {
        matches!(self, Self::Wall | Self::ArcWall | Self::Dimension)
    }

    /// Whether the second point of this tool's draw is angle-snapped.
    #[must_use]
    pub fn snaps_angle(self) -> bool {
        matches!(self, Self::Wall | Self::ArcWall)
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click). Always pans.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"Escape"`, `"z"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive match for single-letter shortcuts.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }

    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == " " || self.0 == "Space" || self.0 == "Spacebar"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Progress of a two-click draw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawState {
    /// Waiting for the first click.
    #[default]
    Idle,
    /// First point recorded; the next click commits.
    AwaitingSecondPoint {
        /// Tool that recorded the point. Any other tool ignores it.
        tool: Tool,
        /// Snapped world-space first point.
        start: Point,
    },
}

impl DrawState {
    /// The pending first point if it was recorded by `tool`.
    #[must_use]
    pub fn start_for(&self, tool: Tool) -> Option<Point> {
        match *self {
            Self::AwaitingSecondPoint { tool: t, start } if t == tool => Some(start),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::AwaitingSecondPoint { .. })
    }
}

/// Gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Primary button is down; release turns this into a click.
    Pressed {
        /// World-space position of the press.
        world: Point,
    },
    /// The viewport is being dragged.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// A lasso polygon is being captured.
    Lasso {
        /// World-space vertices captured so far.
        points: Vec<Point>,
    },
}
