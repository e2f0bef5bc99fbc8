//! Scene builder: turns a plan, the editor state, the selection and the
//! transient overlay into a four-layer [`Scene`].
//!
//! Layer order, back to front:
//!
//! | Layer     | Contents                                              | Hit-tested |
//! |-----------|-------------------------------------------------------|------------|
//! | `grid`    | grid lines, every 12th bold                           | no         |
//! | `base`    | walls, arcs, doors, windows, fixtures, labels, dims   | yes        |
//! | `trade`   | visible trade layers at their opacity                 | yes        |
//! | `overlay` | ghost line, snap crosshair, lasso outline             | no         |
//!
//! Room plaques sit in `base` but never listen.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::FRAC_PI_2;

use crate::consts::{
    CANVAS_SIZE, COLOR_BACKGROUND, COLOR_CONTAINMENT, COLOR_DOOR, COLOR_FALLBACK, COLOR_FIXTURE, COLOR_GHOST,
    COLOR_GRID, COLOR_GRID_BOLD, COLOR_HANDLE_FILL, COLOR_LABEL, COLOR_MEASURE, COLOR_SELECTED, COLOR_WALL,
    COLOR_WINDOW, GRID_BOLD_EVERY, HANDLE_RADIUS, MIN_HIT_WIDTH,
};
use crate::doc::{
    ArcWall, ContainmentLine, DamageZone, DimensionLine, DoorPlacement, FixturePlacement, FixtureType, FloorLabel,
    FloorPlanData, MeasurementUnit, MoistureReading, Room, TradeElement, TradeLayer, TradeLayerType, TradePath,
    TradePathType, Wall, WindowPlacement,
};
use crate::editor::EditorState;
use crate::geometry::{distance, format_area, format_length, lerp, midpoint, polygon_centroid, wall_angle, wall_length, Point};
use crate::input::Tool;
use crate::scene::{Layer, Node, Scene, Shape, Stroke};
use crate::selection::SelectionState;

pub const GRID_LAYER: &str = "grid";
pub const BASE_LAYER: &str = "base";
pub const TRADE_LAYER: &str = "trade";
pub const OVERLAY_LAYER: &str = "overlay";

/// Nominal fixture symbol size.
const FIXTURE_SIZE: f64 = 24.0;

/// Walls shorter than this get no length readout.
const MIN_LABELLED_LENGTH: f64 = 12.0;

/// Transient interaction state drawn on top of everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub ghost: Option<Ghost>,
    pub snap: Option<Point>,
    pub lasso: Vec<Point>,
}

impl Overlay {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ghost.is_none() && self.snap.is_none() && self.lasso.is_empty()
    }
}

/// Preview of an in-progress two-click draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub tool: Tool,
    pub start: Point,
    pub end: Point,
}

/// Build the full scene for one frame.
#[must_use]
pub fn build_scene(plan: &FloorPlanData, editor: &EditorState, selection: &SelectionState, overlay: &Overlay) -> Scene {
    Scene {
        layers: vec![
            grid_layer(editor),
            base_layer(plan, editor.units, selection),
            trade_layer(plan),
            overlay_layer(editor, overlay),
        ],
    }
}

fn pick(selected: bool, normal: &'static str) -> &'static str {
    if selected { COLOR_SELECTED } else { normal }
}

// =============================================================
// Grid
// =============================================================

fn grid_layer(editor: &EditorState) -> Layer {
    let mut layer = Layer::new(GRID_LAYER, false);
    if !editor.show_grid || editor.grid_size <= 0.0 {
        return layer;
    }
    let mut i = 0usize;
    loop {
        #[allow(clippy::cast_precision_loss)]
        let offset = i as f64 * editor.grid_size;
        if offset > CANVAS_SIZE {
            break;
        }
        let stroke = if i % GRID_BOLD_EVERY == 0 {
            Stroke::solid(COLOR_GRID_BOLD, 0.5)
        } else {
            Stroke::solid(COLOR_GRID, 0.25)
        };
        layer.nodes.push(Node::new(Shape::segment(Point::new(offset, 0.0), Point::new(offset, CANVAS_SIZE), stroke.clone())));
        layer.nodes.push(Node::new(Shape::segment(Point::new(0.0, offset), Point::new(CANVAS_SIZE, offset), stroke)));
        i += 1;
    }
    layer
}

// =============================================================
// Base elements
// =============================================================

/// The listening layer of base elements. Hit-testing for select and erase
/// runs against this layer alone.
#[must_use]
pub fn base_layer(plan: &FloorPlanData, units: MeasurementUnit, selection: &SelectionState) -> Layer {
    let mut layer = Layer::new(BASE_LAYER, true);
    for wall in &plan.walls {
        layer.nodes.push(wall_node(wall, selection.is_selected(&wall.id), units));
    }
    for arc in &plan.arc_walls {
        layer.nodes.push(arc_node(arc, selection.is_selected(&arc.id)));
    }
    for door in &plan.doors {
        if let Some(wall) = plan.wall(&door.wall_id) {
            layer.nodes.push(door_node(wall, door, selection.is_selected(&door.id)));
        }
    }
    for window in &plan.windows {
        if let Some(wall) = plan.wall(&window.wall_id) {
            layer.nodes.push(window_node(wall, window, selection.is_selected(&window.id)));
        }
    }
    for fixture in &plan.fixtures {
        layer.nodes.push(fixture_node(fixture, selection.is_selected(&fixture.id)));
    }
    for label in &plan.labels {
        layer.nodes.push(label_node(label, selection.is_selected(&label.id)));
    }
    for dim in &plan.dimensions {
        layer.nodes.push(dimension_node(dim, selection.is_selected(&dim.id), units));
    }
    for room in &plan.rooms {
        layer.nodes.push(room_node(room, units));
    }
    layer
}

fn handle(at: Point) -> Node {
    Node::new(Shape::Circle {
        radius: HANDLE_RADIUS,
        stroke: Some(Stroke::solid(COLOR_SELECTED, 2.0)),
        fill: Some(COLOR_HANDLE_FILL),
    })
    .at(at)
}

fn wall_node(wall: &Wall, selected: bool, units: MeasurementUnit) -> Node {
    let stroke = Stroke::solid(pick(selected, COLOR_WALL), wall.thickness).with_hit_width(wall.thickness.max(MIN_HIT_WIDTH));
    let mut children = vec![Node::new(Shape::segment(wall.start, wall.end, stroke))];

    let len = wall_length(wall);
    if len >= MIN_LABELLED_LENGTH {
        let angle = wall_angle(wall);
        let mid = midpoint(wall.start, wall.end);
        let push = wall.thickness / 2.0 + 14.0;
        let at = Point::new(mid.x - angle.sin() * push - 20.0, mid.y + angle.cos() * push - 6.0);
        children.push(
            Node::new(Shape::text(format_length(len, units), 11.0, COLOR_MEASURE))
                .at(at)
                .rotated(angle.to_degrees())
                .listening(false),
        );
    }

    if selected {
        children.push(handle(wall.start));
        children.push(handle(wall.end));
    }
    Node::group(children).with_id(wall.id.clone())
}

fn arc_node(arc: &ArcWall, selected: bool) -> Node {
    let stroke = Stroke::solid(pick(selected, COLOR_WALL), arc.thickness).with_hit_width(arc.thickness.max(MIN_HIT_WIDTH));
    let mut children = vec![Node::new(Shape::QuadCurve { start: arc.start, control: arc.control_point, end: arc.end, stroke })];
    if selected {
        children.push(handle(arc.start));
        children.push(handle(arc.end));
        children.push(
            Node::new(Shape::Circle {
                radius: HANDLE_RADIUS - 1.0,
                stroke: Some(Stroke::dashed(COLOR_SELECTED, 1.0, [2.0, 2.0])),
                fill: Some(COLOR_HANDLE_FILL),
            })
            .at(arc.control_point),
        );
    }
    Node::group(children).with_id(arc.id.clone())
}

/// Resolved world-space layout of a door hung in its wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorGeometry {
    /// Door center on the wall line.
    pub center: Point,
    /// Gap end nearer the wall start; the panel pivots here.
    pub hinge: Point,
    /// Gap end nearer the wall end.
    pub latch: Point,
    /// Free end of the open panel.
    pub panel_end: Point,
    /// Start of the swing arc, in degrees.
    pub arc_rotation: f64,
    /// Sweep of the swing arc, in degrees.
    pub swing: f64,
}

/// Where a door sits given its wall's current endpoints.
#[must_use]
pub fn door_geometry(wall: &Wall, door: &DoorPlacement) -> DoorGeometry {
    let angle = wall_angle(wall);
    let (sin, cos) = angle.sin_cos();
    let half = door.width / 2.0;
    let center = lerp(wall.start, wall.end, door.position);
    let hinge = Point::new(center.x - half * cos, center.y - half * sin);
    let latch = Point::new(center.x + half * cos, center.y + half * sin);

    let swing = door.swing_angle.unwrap_or(90.0);
    let flipped = door.flip_side.unwrap_or(false);
    let open = if flipped { angle - swing.to_radians() } else { angle + swing.to_radians() };
    let panel_end = Point::new(hinge.x + door.width * open.cos(), hinge.y + door.width * open.sin());
    let arc_rotation = if flipped { angle.to_degrees() - swing } else { angle.to_degrees() };

    DoorGeometry { center, hinge, latch, panel_end, arc_rotation, swing }
}

/// A background-colored stroke that cuts an opening into the wall.
fn wall_gap(a: Point, b: Point, wall: &Wall) -> Node {
    Node::new(Shape::segment(a, b, Stroke::solid(COLOR_BACKGROUND, wall.thickness + 2.0)))
}

fn door_node(wall: &Wall, door: &DoorPlacement, selected: bool) -> Node {
    let geo = door_geometry(wall, door);
    let color = pick(selected, COLOR_DOOR);
    Node::group(vec![
        wall_gap(geo.hinge, geo.latch, wall),
        Node::new(Shape::segment(geo.hinge, geo.panel_end, Stroke::solid(color, 2.0))),
        Node::new(Shape::Arc { radius: door.width, angle: geo.swing, stroke: Stroke::dashed(color, 1.0, [4.0, 4.0]) })
            .at(geo.hinge)
            .rotated(geo.arc_rotation),
    ])
    .with_id(door.id.clone())
}

fn window_node(wall: &Wall, window: &WindowPlacement, selected: bool) -> Node {
    let angle = wall_angle(wall);
    let (sin, cos) = angle.sin_cos();
    let (perp_x, perp_y) = ((angle + FRAC_PI_2).cos(), (angle + FRAC_PI_2).sin());
    let half = window.width / 2.0;
    let center = lerp(wall.start, wall.end, window.position);
    let a = Point::new(center.x - half * cos, center.y - half * sin);
    let b = Point::new(center.x + half * cos, center.y + half * sin);
    let color = pick(selected, COLOR_WINDOW);

    let mut children = vec![wall_gap(a, b, wall)];
    for (offset, width) in [(-3.0, 1.0), (0.0, 2.0), (3.0, 1.0)] {
        children.push(Node::new(Shape::segment(
            a.offset(perp_x * offset, perp_y * offset),
            b.offset(perp_x * offset, perp_y * offset),
            Stroke::solid(color, width),
        )));
    }
    Node::group(children).with_id(window.id.clone())
}

fn fixture_node(fixture: &FixturePlacement, selected: bool) -> Node {
    let color = pick(selected, COLOR_FIXTURE);
    let mut children = fixture_symbol(fixture, color);
    if selected {
        let s = FIXTURE_SIZE;
        children.push(Node::new(Shape::rect(
            -s * 0.6,
            -s * 0.6,
            s * 1.2,
            s * 1.2,
            Some(Stroke::dashed(COLOR_SELECTED, 1.0, [4.0, 4.0])),
            None,
        )));
    }
    Node::group(children).at(fixture.position).rotated(fixture.rotation).with_id(fixture.id.clone())
}

fn circle(at: Point, radius: f64, stroke: Option<Stroke>, fill: Option<&'static str>) -> Node {
    Node::new(Shape::Circle { radius, stroke, fill }).at(at)
}

/// Per-type symbol in fixture-local coordinates centered on the origin.
fn fixture_symbol(fixture: &FixturePlacement, color: &'static str) -> Vec<Node> {
    let s = FIXTURE_SIZE;
    let line = || Stroke::solid(color, 1.5);
    let body = Some(COLOR_BACKGROUND);
    match fixture.fixture_type {
        FixtureType::Toilet => vec![
            Node::new(Shape::rect(-s * 0.4, -s * 0.5, s * 0.8, s * 0.25, Some(line()), body)),
            Node::new(Shape::Ellipse { radius_x: s * 0.35, radius_y: s * 0.4, stroke: Some(line()), fill: body })
                .at(Point::new(0.0, s * 0.15)),
        ],
        FixtureType::Sink => vec![
            Node::new(Shape::Rect {
                x: -s * 0.4,
                y: -s * 0.3,
                width: s * 0.8,
                height: s * 0.6,
                corner_radius: 3.0,
                stroke: Some(line()),
                fill: body,
            }),
            circle(Point::new(0.0, 0.0), s * 0.15, Some(line()), None),
            circle(Point::new(0.0, -s * 0.22), 2.0, None, Some(color)),
        ],
        FixtureType::Bathtub => vec![
            Node::new(Shape::Rect {
                x: -s,
                y: -s * 0.5,
                width: s * 2.0,
                height: s,
                corner_radius: 4.0,
                stroke: Some(line()),
                fill: body,
            }),
            Node::new(Shape::Rect {
                x: -s * 0.85,
                y: -s * 0.38,
                width: s * 1.7,
                height: s * 0.76,
                corner_radius: 8.0,
                stroke: Some(Stroke::solid(color, 1.0)),
                fill: None,
            }),
            circle(Point::new(s * 0.7, 0.0), 2.0, None, Some(color)),
        ],
        FixtureType::Shower => {
            let h = s * 0.6;
            vec![
                Node::new(Shape::rect(-h, -h, h * 2.0, h * 2.0, Some(line()), body)),
                Node::new(Shape::segment(Point::new(-h, -h), Point::new(h, h), Stroke::solid(color, 0.5))),
                Node::new(Shape::segment(Point::new(h, -h), Point::new(-h, h), Stroke::solid(color, 0.5))),
                circle(Point::new(0.0, 0.0), 3.0, Some(Stroke::solid(color, 1.0)), body),
            ]
        }
        FixtureType::Stove => {
            let h = s * 0.5;
            let mut nodes = vec![Node::new(Shape::rect(-h, -h, s, s, Some(line()), body))];
            for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
                nodes.push(circle(Point::new(dx * s * 0.22, dy * s * 0.22), s * 0.15, Some(Stroke::solid(color, 1.0)), None));
            }
            nodes
        }
        FixtureType::Refrigerator => {
            let (w, h) = (s, s * 1.2);
            vec![
                Node::new(Shape::rect(-w / 2.0, -h / 2.0, w, h, Some(line()), body)),
                Node::new(Shape::segment(Point::new(-w / 2.0, -h * 0.15), Point::new(w / 2.0, -h * 0.15), Stroke::solid(color, 1.0))),
                Node::new(Shape::segment(Point::new(w * 0.35, -h * 0.4), Point::new(w * 0.35, -h * 0.25), Stroke::solid(color, 1.5))),
            ]
        }
        FixtureType::Stairs => {
            let (w, h) = (s * 1.2, s * 2.4);
            let mut nodes = vec![Node::new(Shape::rect(-w / 2.0, -h / 2.0, w, h, Some(line()), body))];
            for step in 1..=7_u8 {
                let y = -h / 2.0 + f64::from(step) * h / 8.0;
                nodes.push(Node::new(Shape::segment(Point::new(-w / 2.0, y), Point::new(w / 2.0, y), Stroke::solid(color, 0.75))));
            }
            nodes.push(Node::new(Shape::Arrow {
                points: vec![Point::new(0.0, h * 0.4), Point::new(0.0, -h * 0.4)],
                pointer_length: 6.0,
                stroke: Stroke::solid(color, 1.0),
            }));
            nodes
        }
        other => {
            let w = fixture.width.unwrap_or(s * 0.8);
            let d = fixture.depth.unwrap_or(s * 0.8);
            let glyph: String = other.as_str().chars().take(3).collect::<String>().to_uppercase();
            vec![
                Node::new(Shape::rect(-w / 2.0, -d / 2.0, w, d, Some(line()), body)),
                Node::new(Shape::centered_text(glyph, 8.0, false, color, w)).at(Point::new(-w / 2.0, -4.0)),
            ]
        }
    }
}

fn label_node(label: &FloorLabel, selected: bool) -> Node {
    Node::new(Shape::text(label.text.clone(), label.font_size, pick(selected, COLOR_LABEL)))
        .at(label.position)
        .rotated(label.rotation)
        .with_id(label.id.clone())
}

fn dimension_node(dim: &DimensionLine, selected: bool, units: MeasurementUnit) -> Node {
    let angle = (dim.end.y - dim.start.y).atan2(dim.end.x - dim.start.x);
    let off = Point::new(-angle.sin() * dim.offset, angle.cos() * dim.offset);
    let a = dim.start.offset(off.x, off.y);
    let b = dim.end.offset(off.x, off.y);
    let color = pick(selected, COLOR_MEASURE);
    let mid = midpoint(a, b);

    Node::group(vec![
        Node::new(Shape::segment(a, b, Stroke::solid(color, 1.0).with_hit_width(MIN_HIT_WIDTH))),
        Node::new(Shape::segment(dim.start, a, Stroke::solid(color, 0.5))),
        Node::new(Shape::segment(dim.end, b, Stroke::solid(color, 0.5))),
        Node::new(Shape::text(format_length(distance(dim.start, dim.end), units), 11.0, color))
            .at(mid.offset(-20.0, -14.0))
            .listening(false),
    ])
    .with_id(dim.id.clone())
}

fn room_node(room: &Room, units: MeasurementUnit) -> Node {
    Node::group(vec![
        Node::new(Shape::Rect {
            x: -45.0,
            y: -14.0,
            width: 90.0,
            height: 28.0,
            corner_radius: 4.0,
            stroke: None,
            fill: Some(COLOR_BACKGROUND),
        })
        .with_opacity(0.85),
        Node::new(Shape::centered_text(room.name.clone(), 11.0, true, COLOR_WALL, 90.0)).at(Point::new(-45.0, -11.0)),
        Node::new(Shape::centered_text(format_area(room.area, units), 9.0, false, COLOR_MEASURE, 90.0)).at(Point::new(-45.0, 2.0)),
    ])
    .at(room.center)
    .with_id(room.id.clone())
    .listening(false)
}

// =============================================================
// Trade overlay
// =============================================================

/// Accent color of a trade discipline.
#[must_use]
pub fn trade_color(layer_type: TradeLayerType) -> &'static str {
    match layer_type {
        TradeLayerType::Electrical => "#F59E0B",
        TradeLayerType::Plumbing => "#3B82F6",
        TradeLayerType::Hvac => "#10B981",
        TradeLayerType::Damage => "#EF4444",
    }
}

/// Stroke color of a trade path. Types outside the core palette are grey.
#[must_use]
pub fn path_color(path_type: TradePathType) -> &'static str {
    match path_type {
        TradePathType::Wire => "#F59E0B",
        TradePathType::PipeHot => "#EF4444",
        TradePathType::PipeCold => "#3B82F6",
        TradePathType::Drain => "#6B7280",
        TradePathType::Gas => "#EAB308",
        TradePathType::DuctSupply => "#60A5FA",
        TradePathType::DuctReturn => "#F87171",
        _ => COLOR_FALLBACK,
    }
}

/// Outline color of a damage zone, keyed by IICRC class.
#[must_use]
pub fn damage_class_color(class: &str) -> &'static str {
    match class {
        "1" => "#10B981",
        "2" => "#F59E0B",
        "3" => "#EF4444",
        "4" => "#7C3AED",
        _ => COLOR_FALLBACK,
    }
}

/// Fill color of a damage zone, keyed by IICRC category.
#[must_use]
pub fn damage_category_color(category: &str) -> &'static str {
    match category {
        "1" => "#3B82F6",
        "2" => "#F59E0B",
        "3" => "#EF4444",
        _ => COLOR_FALLBACK,
    }
}

/// Moisture readings escalate green, amber, orange, red at 15, 30 and 50 percent.
#[must_use]
pub fn moisture_color(value: f64) -> &'static str {
    if value < 15.0 {
        "#10B981"
    } else if value < 30.0 {
        "#F59E0B"
    } else if value < 50.0 {
        "#F97316"
    } else {
        "#EF4444"
    }
}

#[must_use]
pub fn moisture_radius(value: f64) -> f64 {
    8.0 + (value / 10.0).clamp(0.0, 6.0)
}

/// Two-letter uppercase caption for a trade symbol.
fn glyph(symbol: &str) -> String {
    symbol.chars().take(2).collect::<String>().to_uppercase()
}

fn trade_layer(plan: &FloorPlanData) -> Layer {
    let mut layer = Layer::new(TRADE_LAYER, true);
    for trade in plan.trade_layers.iter().filter(|l| l.visible) {
        layer.nodes.push(Node::group(trade_children(trade)).with_opacity(trade.opacity).listening(!trade.locked));
    }
    layer
}

fn trade_children(trade: &TradeLayer) -> Vec<Node> {
    let color = trade_color(trade.layer_type);
    let mut nodes = Vec::new();
    if let Some(data) = &trade.trade_data {
        nodes.extend(data.paths.iter().map(trade_path_node));
        nodes.extend(data.elements.iter().map(|e| trade_element_node(e, color)));
    }
    if let Some(data) = &trade.damage_data {
        nodes.extend(data.zones.iter().map(damage_zone_node));
        nodes.extend(data.moisture_readings.iter().map(moisture_node));
        nodes.extend(data.containment_lines.iter().map(containment_node));
        nodes.extend(data.barriers.iter().map(|b| barrier_node(b, color)));
    }
    nodes
}

fn trade_element_node(element: &TradeElement, color: &'static str) -> Node {
    let mut children = vec![
        circle(Point::new(0.0, 0.0), 8.0, Some(Stroke::solid(color, 1.5)), Some(COLOR_BACKGROUND)),
        Node::new(Shape::centered_text(glyph(&element.symbol), 7.0, true, color, 16.0)).at(Point::new(-8.0, -3.5)),
    ];
    if let Some(caption) = &element.label {
        children.push(Node::new(Shape::centered_text(caption.clone(), 8.0, false, color, 40.0)).at(Point::new(-20.0, 10.0)));
    }
    Node::group(children).at(element.position).rotated(element.rotation).with_id(element.id.clone())
}

fn trade_path_node(path: &TradePath) -> Node {
    let color = path_color(path.path_type);
    let stroke = if path.path_type == TradePathType::Gas {
        Stroke::dashed(color, path.stroke_width, [8.0, 4.0])
    } else {
        Stroke::solid(color, path.stroke_width)
    };
    Node::new(Shape::line(path.points.clone(), stroke.with_hit_width(MIN_HIT_WIDTH))).with_id(path.id.clone())
}

fn damage_zone_node(zone: &DamageZone) -> Node {
    let outline = damage_class_color(&zone.damage_class);
    let mut children = vec![
        Node::new(Shape::Line {
            points: zone.points.clone(),
            closed: true,
            stroke: None,
            fill: Some(damage_category_color(&zone.iicrc_category)),
        })
        .with_opacity(0.15),
        Node::new(Shape::Line {
            points: zone.points.clone(),
            closed: true,
            stroke: Some(Stroke::dashed(outline, 2.0, [6.0, 3.0])),
            fill: None,
        }),
    ];
    if let Some(center) = polygon_centroid(&zone.points) {
        let caption = zone
            .label
            .clone()
            .unwrap_or_else(|| format!("Class {} / Cat {}", zone.damage_class, zone.iicrc_category));
        children.push(
            Node::new(Shape::centered_text(caption, 10.0, true, outline, 80.0))
                .at(center.offset(-40.0, -5.0))
                .listening(false),
        );
    }
    Node::group(children).with_id(zone.id.clone())
}

fn moisture_node(reading: &MoistureReading) -> Node {
    let color = moisture_color(reading.value);
    let r = moisture_radius(reading.value);
    Node::group(vec![
        circle(Point::new(0.0, 0.0), r, Some(Stroke::solid(color, 1.5)), Some(color)).with_opacity(0.3),
        circle(Point::new(0.0, 0.0), 4.0, None, Some(color)),
        Node::new(Shape::centered_text(format!("{}%", reading.value), 9.0, true, color, 30.0)).at(Point::new(-15.0, -r - 12.0)),
        Node::new(Shape::centered_text(reading.material.clone(), 7.0, false, COLOR_MEASURE, 40.0)).at(Point::new(-20.0, r + 2.0)),
    ])
    .at(reading.position)
    .with_id(reading.id.clone())
}

fn containment_node(line: &ContainmentLine) -> Node {
    Node::group(vec![
        Node::new(Shape::segment(
            line.start,
            line.end,
            Stroke::dashed(COLOR_CONTAINMENT, 2.0, [10.0, 5.0]).with_hit_width(MIN_HIT_WIDTH),
        )),
        circle(midpoint(line.start, line.end), 6.0, None, Some(COLOR_CONTAINMENT)).with_opacity(0.3),
    ])
    .with_id(line.id.clone())
}

fn barrier_node(barrier: &TradeElement, color: &'static str) -> Node {
    Node::group(vec![
        Node::new(Shape::Rect {
            x: -14.0,
            y: -8.0,
            width: 28.0,
            height: 16.0,
            corner_radius: 4.0,
            stroke: Some(Stroke::solid(color, 1.5)),
            fill: Some(COLOR_BACKGROUND),
        }),
        Node::new(Shape::centered_text(glyph(&barrier.symbol), 7.0, true, color, 28.0)).at(Point::new(-14.0, -3.5)),
    ])
    .at(barrier.position)
    .rotated(barrier.rotation)
    .with_id(barrier.id.clone())
}

// =============================================================
// UI overlay
// =============================================================

fn overlay_layer(editor: &EditorState, overlay: &Overlay) -> Layer {
    let mut layer = Layer::new(OVERLAY_LAYER, false);

    if let Some(ghost) = overlay.ghost {
        let width = if ghost.tool == Tool::Dimension { 1.0 } else { editor.wall_thickness };
        layer.nodes.push(Node::new(Shape::segment(ghost.start, ghost.end, Stroke::dashed(COLOR_GHOST, width, [8.0, 4.0]))));
    }

    if let Some(p) = overlay.snap {
        let stroke = Stroke::solid(COLOR_SELECTED, 1.5);
        layer.nodes.push(Node::new(Shape::segment(p.offset(-8.0, 0.0), p.offset(8.0, 0.0), stroke.clone())));
        layer.nodes.push(Node::new(Shape::segment(p.offset(0.0, -8.0), p.offset(0.0, 8.0), stroke)));
    }

    if overlay.lasso.len() >= 2 {
        layer.nodes.push(
            Node::new(Shape::line(overlay.lasso.clone(), Stroke::dashed(COLOR_SELECTED, 1.5, [4.0, 4.0]))).with_opacity(0.7),
        );
    }
    layer
}
