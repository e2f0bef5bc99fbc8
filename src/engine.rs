//! Interaction engine: turns pointer, wheel and keyboard events into new
//! plan, selection and editor values.
//!
//! The host owns the three values and passes them in on every event through
//! [`Inputs`]. Handlers never mutate them; they return [`Action`]s describing
//! the replacement values, and an empty list for a no-op. The engine itself
//! only keeps session state: undo/redo history, the pending two-click draw,
//! the gesture in progress, the clipboard and the transient overlay.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, trace};

use crate::camera::{wheel_zoom, Camera};
use crate::clipboard::Clipboard;
use crate::command::Command;
use crate::config::{ConfigError, EngineConfig};
use crate::doc::{
    ArcWall, DimensionLine, DoorPlacement, Element, ElementId, ElementKind, FixturePlacement, FloorLabel, FloorPlanData,
    Wall, WindowPlacement,
};
use crate::editor::{EditorPatch, EditorState};
use crate::geometry::{
    arc_control_point, distance, find_nearest_wall, midpoint, point_in_polygon, project_onto_wall, snap_angle,
    snap_to_endpoint, snap_to_grid, Point,
};
use crate::hit::hit_layer;
use crate::history::UndoRedoManager;
use crate::ids::{IdSource, UuidIds};
use crate::input::{Button, DrawState, InputState, Key, Modifiers, Tool, WheelDelta};
use crate::render::{base_layer, build_scene, Ghost, Overlay};
use crate::scene::Scene;
use crate::selection::SelectionState;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the plan with this revision.
    PlanChanged(FloorPlanData),
    /// Replace the selection.
    SelectionChanged(SelectionState),
    /// Merge these fields into the editor state.
    EditorChanged(EditorPatch),
    SetCursor(String),
    /// Overlay changed; redraw.
    RenderNeeded,
}

/// The host-owned values an event is interpreted against.
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    pub plan: &'a FloorPlanData,
    pub editor: &'a EditorState,
    pub selection: &'a SelectionState,
}

impl<'a> Inputs<'a> {
    #[must_use]
    pub fn new(plan: &'a FloorPlanData, editor: &'a EditorState, selection: &'a SelectionState) -> Self {
        Self { plan, editor, selection }
    }
}

/// Session state for one canvas.
pub struct SketchEngine {
    config: EngineConfig,
    history: UndoRedoManager,
    draw: DrawState,
    input: InputState,
    overlay: Overlay,
    clipboard: Clipboard,
    ids: Box<dyn IdSource>,
    space_held: bool,
}

impl Default for SketchEngine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl SketchEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            history: UndoRedoManager::with_limit(config.history_limit),
            config,
            draw: DrawState::Idle,
            input: InputState::Idle,
            overlay: Overlay::default(),
            clipboard: Clipboard::new(),
            ids: Box::new(UuidIds),
            space_held: false,
        }
    }

    /// A validated engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a tunable is out of range.
    pub fn try_with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Replace the id generator.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn draw_state(&self) -> DrawState {
        self.draw
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[must_use]
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The scene for the current frame, overlay included.
    #[must_use]
    pub fn scene(&self, inputs: &Inputs<'_>) -> Scene {
        if self.draw.is_pending() && self.draw.start_for(inputs.editor.active_tool).is_none() {
            let overlay = Overlay { ghost: None, snap: None, ..self.overlay.clone() };
            return build_scene(inputs.plan, inputs.editor, inputs.selection, &overlay);
        }
        build_scene(inputs.plan, inputs.editor, inputs.selection, &self.overlay)
    }

    // --- Tool ---

    /// The host switched tools. A pending draw belongs to the tool that
    /// started it, so it is dropped.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let mut actions = self.sync_tool(tool);
        actions.push(Action::SetCursor(cursor_for(tool).to_owned()));
        actions
    }

    /// Drop a pending draw started by a tool other than `tool`. Hosts may
    /// switch `activeTool` without calling [`Self::set_tool`], so every event
    /// handler runs this first.
    fn sync_tool(&mut self, tool: Tool) -> Vec<Action> {
        if !self.draw.is_pending() || self.draw.start_for(tool).is_some() {
            return Vec::new();
        }
        debug!(?tool, "pending draw dropped on tool change");
        self.cancel_draw();
        vec![drawing(false), Action::RenderNeeded]
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        let mut actions = self.sync_tool(inputs.editor.active_tool);
        actions.extend(self.pointer_down(screen, button, modifiers, inputs));
        actions
    }

    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        let mut actions = self.sync_tool(inputs.editor.active_tool);
        actions.extend(self.pointer_move(screen, modifiers, inputs));
        actions
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        let mut actions = self.sync_tool(inputs.editor.active_tool);
        actions.extend(self.pointer_up(screen, button, modifiers, inputs));
        actions
    }

    fn pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        let tool = inputs.editor.active_tool;
        let pans = button == Button::Middle || (button == Button::Primary && (tool == Tool::Pan || self.space_held));
        if pans {
            self.input = InputState::Panning { last_screen: screen };
            return vec![Action::SetCursor("grabbing".into())];
        }
        if button != Button::Primary {
            return Vec::new();
        }

        let world = Camera::from_editor(inputs.editor).screen_to_world(screen);
        if tool == Tool::Lasso {
            self.input = InputState::Lasso { points: vec![world] };
            self.overlay.lasso = vec![world];
            return vec![Action::RenderNeeded];
        }
        self.input = InputState::Pressed { world };
        Vec::new()
    }

    fn pointer_move(&mut self, screen: Point, _modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        let camera = Camera::from_editor(inputs.editor);
        let world = camera.screen_to_world(screen);

        match &mut self.input {
            InputState::Panning { last_screen } => {
                let (dx, dy) = (screen.x - last_screen.x, screen.y - last_screen.y);
                *last_screen = screen;
                return vec![Action::EditorChanged(camera.panned(dx, dy).to_patch()), Action::RenderNeeded];
            }
            InputState::Lasso { points } => {
                points.push(world);
                self.overlay.lasso.clone_from(points);
                return vec![Action::RenderNeeded];
            }
            InputState::Idle | InputState::Pressed { .. } => {}
        }

        let tool = inputs.editor.active_tool;
        let Some(start) = self.draw.start_for(tool) else {
            return Vec::new();
        };
        let end = self.second_point(tool, start, world, inputs);
        trace!(?tool, x = end.x, y = end.y, "ghost");
        self.overlay.ghost = Some(Ghost { tool, start, end });
        self.overlay.snap = Some(end);
        vec![Action::RenderNeeded]
    }

    fn pointer_up(&mut self, screen: Point, button: Button, _modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Panning { .. } => {
                let cursor = if self.space_held { "grab" } else { cursor_for(inputs.editor.active_tool) };
                vec![Action::SetCursor(cursor.to_owned())]
            }
            InputState::Lasso { points } => self.finish_lasso(&points, inputs),
            InputState::Pressed { .. } if button == Button::Primary => {
                let world = Camera::from_editor(inputs.editor).screen_to_world(screen);
                self.click(world, inputs)
            }
            InputState::Pressed { .. } | InputState::Idle => Vec::new(),
        }
    }

    /// Zoom around the pointer by one notch per event.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, _modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        if delta.dy.abs() < f64::EPSILON {
            return Vec::new();
        }
        let camera = Camera::from_editor(inputs.editor);
        let zoom = wheel_zoom(camera.zoom, delta.dy, self.config.zoom_factor, self.config.min_zoom, self.config.max_zoom);
        vec![Action::EditorChanged(camera.zoomed_at(screen, zoom).to_patch()), Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        let mut actions = self.sync_tool(inputs.editor.active_tool);
        actions.extend(self.key_down(key, modifiers, inputs));
        actions
    }

    fn key_down(&mut self, key: &Key, modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        if key.is_space() {
            if self.space_held {
                return Vec::new();
            }
            self.space_held = true;
            return vec![Action::SetCursor("grab".into())];
        }

        if modifiers.command() {
            if key.is_letter('z') && !modifiers.shift {
                return self.undo(inputs);
            }
            if key.is_letter('y') || (key.is_letter('z') && modifiers.shift) {
                return self.redo(inputs);
            }
            if key.is_letter('c') {
                return self.copy(inputs);
            }
            if key.is_letter('v') {
                return self.paste(inputs);
            }
        }

        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selection(inputs),
            "Escape" => self.escape(inputs),
            _ => Vec::new(),
        }
    }

    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers, inputs: &Inputs<'_>) -> Vec<Action> {
        if !key.is_space() || !self.space_held {
            return Vec::new();
        }
        self.space_held = false;
        vec![Action::SetCursor(cursor_for(inputs.editor.active_tool).to_owned())]
    }

    // --- History ---

    pub fn undo(&mut self, inputs: &Inputs<'_>) -> Vec<Action> {
        if !self.history.can_undo() {
            return Vec::new();
        }
        let plan = self.history.undo(inputs.plan);
        with_pruned_selection(plan, inputs.selection)
    }

    pub fn redo(&mut self, inputs: &Inputs<'_>) -> Vec<Action> {
        if !self.history.can_redo() {
            return Vec::new();
        }
        let plan = self.history.redo(inputs.plan);
        with_pruned_selection(plan, inputs.selection)
    }

    /// Run a command built outside the pointer flow (inspector edits, trade items).
    pub fn execute(&mut self, cmd: Command, plan: &FloorPlanData) -> Vec<Action> {
        vec![Action::PlanChanged(self.history.execute(cmd, plan))]
    }

    // --- Clipboard ---

    pub fn copy(&mut self, inputs: &Inputs<'_>) -> Vec<Action> {
        let ids = inputs.selection.selected_ids();
        if ids.is_empty() {
            return Vec::new();
        }
        self.clipboard = Clipboard::copy_from(inputs.plan, &ids);
        Vec::new()
    }

    pub fn paste(&mut self, inputs: &Inputs<'_>) -> Vec<Action> {
        let elements = self.clipboard.paste(inputs.plan, self.ids.as_mut(), self.config.paste_offset);
        if elements.is_empty() {
            return Vec::new();
        }
        let mut actions = self.execute(Command::AddElements(elements), inputs.plan);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Clicks ---

    fn click(&mut self, world: Point, inputs: &Inputs<'_>) -> Vec<Action> {
        let tool = inputs.editor.active_tool;
        match tool {
            Tool::Wall | Tool::ArcWall | Tool::Dimension => self.two_click(tool, world, inputs),
            Tool::Door | Tool::Window => self.place_opening(tool, world, inputs),
            Tool::Fixture => self.place_fixture(world, inputs),
            Tool::Label => self.place_label(world, inputs),
            Tool::Select => select_at(world, inputs),
            Tool::Erase => self.erase_at(world, inputs),
            Tool::Lasso | Tool::Pan => Vec::new(),
        }
    }

    /// Endpoint snap when an endpoint is close, else grid snap.
    fn snap_point(&self, world: Point, inputs: &Inputs<'_>) -> Point {
        snap_to_endpoint(world, &inputs.plan.walls, &inputs.plan.arc_walls, self.config.snap_threshold)
            .unwrap_or_else(|| snap_to_grid(world, inputs.editor.grid_size))
    }

    /// Snapped second point of a two-click draw: endpoint or grid snap, then
    /// walls and arcs are angle-snapped from `start`.
    fn second_point(&self, tool: Tool, start: Point, world: Point, inputs: &Inputs<'_>) -> Point {
        let p = self.snap_point(world, inputs);
        if inputs.editor.angle_snap && tool.snaps_angle() {
            snap_angle(start, p, self.config.angle_snap_deg)
        } else {
            p
        }
    }

    fn two_click(&mut self, tool: Tool, world: Point, inputs: &Inputs<'_>) -> Vec<Action> {
        let Some(start) = self.draw.start_for(tool) else {
            let start = self.snap_point(world, inputs);
            self.draw = DrawState::AwaitingSecondPoint { tool, start };
            self.overlay.ghost = Some(Ghost { tool, start, end: start });
            self.overlay.snap = Some(start);
            return vec![drawing(true), Action::RenderNeeded];
        };

        let end = self.second_point(tool, start, world, inputs);
        self.cancel_draw();
        let mut actions = vec![drawing(false)];

        let length = distance(start, end);
        let min = if tool == Tool::ArcWall { self.config.min_arc_length } else { self.config.min_wall_length };
        if length > min {
            let element = self.segment_element(tool, start, end, inputs);
            actions.extend(self.execute(Command::add(element), inputs.plan));
        } else {
            debug!(?tool, length, "draw cancelled");
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn segment_element(&mut self, tool: Tool, start: Point, end: Point, inputs: &Inputs<'_>) -> Element {
        let editor = inputs.editor;
        match tool {
            Tool::ArcWall => Element::ArcWall(ArcWall {
                id: self.new_id(ElementKind::ArcWall, inputs.plan),
                start,
                end,
                control_point: arc_control_point(start, end, self.config.arc_bow),
                thickness: editor.wall_thickness,
                height: self.config.default_wall_height,
            }),
            Tool::Dimension => Element::Dimension(DimensionLine {
                id: self.new_id(ElementKind::Dimension, inputs.plan),
                start,
                end,
                offset: self.config.default_dimension_offset,
                is_auto: false,
            }),
            _ => Element::Wall(Wall {
                id: self.new_id(ElementKind::Wall, inputs.plan),
                start,
                end,
                thickness: editor.wall_thickness,
                height: self.config.default_wall_height,
            }),
        }
    }

    fn place_opening(&mut self, tool: Tool, world: Point, inputs: &Inputs<'_>) -> Vec<Action> {
        let Some(wall) = find_nearest_wall(world, &inputs.plan.walls, self.config.wall_snap_radius) else {
            return Vec::new();
        };
        let position = project_onto_wall(world, wall);
        let editor = inputs.editor;
        let element = if tool == Tool::Door {
            Element::Door(DoorPlacement {
                id: self.new_id(ElementKind::Door, inputs.plan),
                wall_id: wall.id.clone(),
                position,
                width: editor.door_width,
                door_type: editor.door_type,
                swing_angle: None,
                flip_side: None,
            })
        } else {
            Element::Window(WindowPlacement {
                id: self.new_id(ElementKind::Window, inputs.plan),
                wall_id: wall.id.clone(),
                position,
                width: editor.window_width,
                window_type: editor.window_type,
                sill_height: None,
            })
        };
        self.execute(Command::add(element), inputs.plan)
    }

    fn place_fixture(&mut self, world: Point, inputs: &Inputs<'_>) -> Vec<Action> {
        let Some(fixture_type) = inputs.editor.pending_fixture_type else {
            return Vec::new();
        };
        let fixture = FixturePlacement {
            id: self.new_id(ElementKind::Fixture, inputs.plan),
            position: snap_to_grid(world, inputs.editor.grid_size),
            fixture_type,
            rotation: 0.0,
            width: None,
            depth: None,
        };
        self.execute(Command::AddFixture(fixture), inputs.plan)
    }

    fn place_label(&mut self, world: Point, inputs: &Inputs<'_>) -> Vec<Action> {
        let label = FloorLabel {
            id: self.new_id(ElementKind::Label, inputs.plan),
            position: snap_to_grid(world, inputs.editor.grid_size),
            text: self.config.default_label_text.clone(),
            font_size: self.config.default_label_font_size,
            rotation: 0.0,
        };
        self.execute(Command::AddLabel(label), inputs.plan)
    }

    fn erase_at(&mut self, world: Point, inputs: &Inputs<'_>) -> Vec<Action> {
        let Some((id, _)) = element_at(world, inputs) else {
            return Vec::new();
        };
        let plan = self.history.execute(Command::remove(id), inputs.plan);
        with_pruned_selection(plan, inputs.selection)
    }

    fn finish_lasso(&mut self, points: &[Point], inputs: &Inputs<'_>) -> Vec<Action> {
        self.overlay.lasso.clear();
        if points.len() < 3 {
            return vec![Action::RenderNeeded];
        }
        let selection = SelectionState::multi(
            lasso_targets(inputs.plan)
                .into_iter()
                .filter(|(_, _, p)| point_in_polygon(*p, points))
                .map(|(id, kind, _)| (id, kind)),
        );
        debug!(count = selection.multi_selected_ids.len(), "lasso");
        vec![Action::SelectionChanged(selection), Action::RenderNeeded]
    }

    // --- Keys ---

    fn delete_selection(&mut self, inputs: &Inputs<'_>) -> Vec<Action> {
        let selection = inputs.selection;
        let cmd = if selection.has_multi() {
            Command::remove_many(selection.selected_ids())
        } else if let Some(id) = &selection.selected_id {
            Command::remove(id.clone())
        } else {
            return Vec::new();
        };
        vec![
            Action::PlanChanged(self.history.execute(cmd, inputs.plan)),
            Action::SelectionChanged(SelectionState::empty()),
            Action::RenderNeeded,
        ]
    }

    fn escape(&mut self, inputs: &Inputs<'_>) -> Vec<Action> {
        if self.draw.is_pending() {
            debug!("draw cancelled");
        }
        self.cancel_draw();
        if matches!(self.input, InputState::Lasso { .. }) {
            self.input = InputState::Idle;
        }
        self.overlay.lasso.clear();

        let mut actions = vec![drawing(false)];
        if !inputs.selection.is_empty() {
            actions.push(Action::SelectionChanged(SelectionState::empty()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Helpers ---

    fn cancel_draw(&mut self) {
        self.draw = DrawState::Idle;
        self.overlay.ghost = None;
        self.overlay.snap = None;
    }

    /// A generator id not already used in `plan`.
    fn new_id(&mut self, kind: ElementKind, plan: &FloorPlanData) -> ElementId {
        loop {
            let id = self.ids.next_id(kind);
            if !plan.contains_id(&id) {
                return id;
            }
        }
    }
}

/// The base-layer element under `world`. Trade overlay hits count as empty space.
fn element_at(world: Point, inputs: &Inputs<'_>) -> Option<(ElementId, ElementKind)> {
    let layer = base_layer(inputs.plan, inputs.editor.units, inputs.selection);
    let id = hit_layer(&layer, world)?;
    let kind = inputs.plan.kind_of(&id)?;
    Some((id, kind))
}

fn select_at(world: Point, inputs: &Inputs<'_>) -> Vec<Action> {
    let next = match element_at(world, inputs) {
        Some((id, kind)) => SelectionState::single(id, kind),
        None => SelectionState::empty(),
    };
    if next == *inputs.selection {
        return Vec::new();
    }
    vec![Action::SelectionChanged(next), Action::RenderNeeded]
}

fn drawing(is_drawing: bool) -> Action {
    Action::EditorChanged(EditorPatch { is_drawing: Some(is_drawing), ..EditorPatch::default() })
}

fn cursor_for(tool: Tool) -> &'static str {
    match tool {
        Tool::Select | Tool::Lasso => "default",
        Tool::Pan => "grab",
        Tool::Erase => "pointer",
        _ => "crosshair",
    }
}

/// The new plan plus, when it removed selected ids, the pruned selection.
fn with_pruned_selection(plan: FloorPlanData, selection: &SelectionState) -> Vec<Action> {
    let pruned = selection.pruned(&plan);
    let mut actions = vec![Action::PlanChanged(plan)];
    if pruned != *selection {
        actions.push(Action::SelectionChanged(pruned));
    }
    actions.push(Action::RenderNeeded);
    actions
}

/// Representative point of every lasso-selectable element.
fn lasso_targets(plan: &FloorPlanData) -> Vec<(ElementId, ElementKind, Point)> {
    let walls = plan.walls.iter().map(|w| (w.id.clone(), ElementKind::Wall, midpoint(w.start, w.end)));
    let arcs = plan.arc_walls.iter().map(|a| (a.id.clone(), ElementKind::ArcWall, midpoint(a.start, a.end)));
    let fixtures = plan.fixtures.iter().map(|f| (f.id.clone(), ElementKind::Fixture, f.position));
    let labels = plan.labels.iter().map(|l| (l.id.clone(), ElementKind::Label, l.position));
    walls.chain(arcs).chain(fixtures).chain(labels).collect()
}
