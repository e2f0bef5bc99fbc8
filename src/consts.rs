//! Shared numeric constants and the drawing palette.

// ── Canvas ──────────────────────────────────────────────────────

/// Side length of the square drawing area, in drawing units (inches).
pub const CANVAS_SIZE: f64 = 4000.0;

/// Every Nth grid line is drawn bold.
pub const GRID_BOLD_EVERY: usize = 12;

// ── Snapping and drawing ────────────────────────────────────────

/// Radius within which a click snaps onto an existing wall endpoint.
pub const SNAP_THRESHOLD: f64 = 12.0;

/// Radius within which a door or window click finds its host wall.
pub const WALL_SNAP_RADIUS: f64 = 18.0;

/// Angular increment for wall direction snapping, in degrees.
pub const ANGLE_SNAP_DEG: f64 = 15.0;

/// Walls and dimensions must be strictly longer than this.
pub const MIN_WALL_LENGTH: f64 = 6.0;

/// Arc walls must have a chord strictly longer than this.
pub const MIN_ARC_LENGTH: f64 = 12.0;

/// Sideways bow of a new arc wall's control point, as a fraction of the chord.
pub const ARC_BOW: f64 = 0.4;

pub const DEFAULT_WALL_HEIGHT: f64 = 96.0;
pub const DEFAULT_LABEL_TEXT: &str = "Label";
pub const DEFAULT_LABEL_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_DIMENSION_OFFSET: f64 = 18.0;

/// Translation applied to pasted elements on both axes.
pub const PASTE_OFFSET: f64 = 48.0;

pub const HISTORY_LIMIT: usize = 100;

// ── Viewport ────────────────────────────────────────────────────

/// Scale change per wheel notch.
pub const ZOOM_FACTOR: f64 = 1.08;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Minimum width of the invisible hit region around thin strokes.
pub const MIN_HIT_WIDTH: f64 = 12.0;

/// Radius of wall endpoint and arc control handles.
pub const HANDLE_RADIUS: f64 = 5.0;

// ── Palette ─────────────────────────────────────────────────────

pub const COLOR_GRID: &str = "#E2E8F0";
pub const COLOR_GRID_BOLD: &str = "#CBD5E1";
pub const COLOR_WALL: &str = "#1E293B";
pub const COLOR_SELECTED: &str = "#3B82F6";
pub const COLOR_GHOST: &str = "#94A3B8";
pub const COLOR_DOOR: &str = "#8B5CF6";
pub const COLOR_WINDOW: &str = "#0EA5E9";
pub const COLOR_FIXTURE: &str = "#059669";
pub const COLOR_LABEL: &str = "#475569";
pub const COLOR_MEASURE: &str = "#64748B";
pub const COLOR_BACKGROUND: &str = "#FFFFFF";
pub const COLOR_HANDLE_FILL: &str = "#FFFFFF";
pub const COLOR_CONTAINMENT: &str = "#EF4444";
pub const COLOR_FALLBACK: &str = "#6B7280";
