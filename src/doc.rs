//! Document model: the floor plan aggregate and every element it holds.
//!
//! `FloorPlanData` is a plain value. Every edit produces a new value (see
//! [`crate::command`]), which is what makes snapshot-style undo correct. The
//! base collections are ordered; commands that remove elements remember the
//! original index so undo can put them back exactly where they were.
//!
//! `Element` is the tagged union over the seven base element kinds. It is the
//! unit of clipboard contents, paste commands and kind-agnostic removal.
//! Lookup by id dispatches on [`ElementKind`]: a caller that knows the kind
//! scans one collection ([`FloorPlanData::position_in`]), bulk callers build
//! [`FloorPlanData::kind_index`] once. The plan keeps no persistent index so
//! it stays a plain serializable value.
//!
//! Field names serialize in camelCase so the host's JSON persistence format
//! round-trips unchanged.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Unique identifier of an element within a floor plan.
pub type ElementId = String;

/// Declares a fieldless enum whose variants serialize as the given names and
/// exposes the same names through `as_str`.
macro_rules! named_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $vis enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Name used on the wire and in glyph captions.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// =============================================================
// Enumerations
// =============================================================

named_enum! {
    /// Display unit system for lengths and areas.
    pub enum MeasurementUnit {
        Imperial => "imperial",
        Metric => "metric",
    }
}

impl Default for MeasurementUnit {
    fn default() -> Self {
        Self::Imperial
    }
}

named_enum! {
    /// The seven base element kinds. Used as the selection type tag and to
    /// dispatch kind-agnostic operations.
    pub enum ElementKind {
        Wall => "wall",
        ArcWall => "arcWall",
        Door => "door",
        Window => "window",
        Fixture => "fixture",
        Label => "label",
        Dimension => "dimension",
    }
}

impl ElementKind {
    /// Prefix used when generating ids for this kind.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::ArcWall => "arc",
            Self::Door => "door",
            Self::Window => "win",
            Self::Fixture => "fix",
            Self::Label => "lbl",
            Self::Dimension => "dim",
        }
    }
}

named_enum! {
    pub enum DoorType {
        Single => "single",
        Double => "double",
        Sliding => "sliding",
        Pocket => "pocket",
        Bifold => "bifold",
        Barn => "barn",
        French => "french",
        RollUp => "rollUp",
        Overhead => "overhead",
        StorefrontGlass => "storefrontGlass",
        CurtainWall => "curtainWall",
        RevolvingDoor => "revolvingDoor",
        RollDownSecurity => "rollDownSecurity",
        DriveThruWindow => "driveThruWindow",
        BulletResistantWindow => "bulletResistantWindow",
    }
}

impl Default for DoorType {
    fn default() -> Self {
        Self::Single
    }
}

named_enum! {
    pub enum WindowType {
        Standard => "standard",
        Bay => "bay",
        Skylight => "skylight",
    }
}

impl Default for WindowType {
    fn default() -> Self {
        Self::Standard
    }
}

named_enum! {
    /// Freestanding symbol types. Types without a dedicated symbol render as a
    /// labelled box.
    pub enum FixtureType {
        Toilet => "toilet",
        Sink => "sink",
        Bathtub => "bathtub",
        Shower => "shower",
        Stove => "stove",
        Refrigerator => "refrigerator",
        Dishwasher => "dishwasher",
        Washer => "washer",
        Dryer => "dryer",
        WaterHeater => "waterHeater",
        Furnace => "furnace",
        HvacUnit => "hvacUnit",
        ElectricPanel => "electricPanel",
        Sofa => "sofa",
        Table => "table",
        Bed => "bed",
        Desk => "desk",
        Fireplace => "fireplace",
        Stairs => "stairs",
        Column => "column",
        ClosetRod => "closetRod",
        ShelvingUnit => "shelvingUnit",
        Island => "island",
        BuiltInBookshelf => "builtInBookshelf",
        LaundryTub => "laundryTub",
        DemisingWall => "demisingWall",
        Mezzanine => "mezzanine",
        ElevatorShaft => "elevatorShaft",
        ElevatorMachineRoom => "elevatorMachineRoom",
        StairwellFireRated => "stairwellFireRated",
        DockLeveler => "dockLeveler",
        CanopyCommercial => "canopyCommercial",
        ColumnGrid => "columnGrid",
        Vestibule => "vestibule",
        RoofHatch => "roofHatch",
        ExpansionJoint => "expansionJoint",
        MarqueeSignMount => "marqueeSignMount",
        CommercialOven => "commercialOven",
        CommercialFryer => "commercialFryer",
        CommercialHood => "commercialHood",
        WalkInCooler => "walkInCooler",
        WalkInFreezer => "walkInFreezer",
        PrepTable => "prepTable",
        ThreeCompSink => "threeCompSink",
        HandwashStation => "handwashStation",
        ToiletAda => "toiletAda",
        Urinal => "urinal",
        SinkCommercial => "sinkCommercial",
        HandDryer => "handDryer",
        BabyChangeStation => "babyChangeStation",
        TellerWindow => "tellerWindow",
        VaultDoor => "vaultDoor",
        ServerRack => "serverRack",
        RaisedFloorTile => "raisedFloorTile",
        CubiclePartition => "cubiclePartition",
    }
}

named_enum! {
    pub enum TradeLayerType {
        Electrical => "electrical",
        Plumbing => "plumbing",
        Hvac => "hvac",
        Damage => "damage",
    }
}

named_enum! {
    pub enum TradePathType {
        Wire => "wire",
        PipeHot => "pipe_hot",
        PipeCold => "pipe_cold",
        Drain => "drain",
        Gas => "gas",
        DuctSupply => "duct_supply",
        DuctReturn => "duct_return",
        DuctExhaust => "duct_exhaust",
        ConduitRigid => "conduit_rigid",
        ConduitEmt => "conduit_emt",
        ConduitPvc => "conduit_pvc",
        GreaseWaste => "grease_waste",
        AcidWaste => "acid_waste",
        CompressedAir => "compressed_air",
        SprinklerMain => "sprinkler_main",
        SprinklerBranch => "sprinkler_branch",
        Standpipe => "standpipe",
        CableTray => "cable_tray",
        BusDuct => "bus_duct",
        RefrigerantLine => "refrigerant_line",
    }
}

named_enum! {
    pub enum BarrierType {
        Dehumidifier => "dehumidifier",
        AirMover => "airMover",
        AirScrubber => "airScrubber",
        Heater => "heater",
        ContainmentPole => "containmentPole",
        NegativePressure => "negativePressure",
        MoistureTrap => "moistureTrap",
        Thermometer => "thermometer",
    }
}

// =============================================================
// Base elements
// =============================================================

/// A straight structural wall segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: ElementId,
    pub start: Point,
    pub end: Point,
    /// Inches.
    pub thickness: f64,
    /// Inches.
    pub height: f64,
}

/// A wall curved as a quadratic Bézier through `control_point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcWall {
    pub id: ElementId,
    pub start: Point,
    pub end: Point,
    pub control_point: Point,
    pub thickness: f64,
    pub height: f64,
}

/// A door hung in a wall. `position` is parametric along the wall, so the
/// door follows the wall wherever its endpoints go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorPlacement {
    pub id: ElementId,
    pub wall_id: ElementId,
    pub position: f64,
    pub width: f64,
    #[serde(rename = "type")]
    pub door_type: DoorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swing_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_side: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPlacement {
    pub id: ElementId,
    pub wall_id: ElementId,
    pub position: f64,
    pub width: f64,
    #[serde(rename = "type")]
    pub window_type: WindowType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sill_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturePlacement {
    pub id: ElementId,
    pub position: Point,
    #[serde(rename = "type")]
    pub fixture_type: FixtureType,
    /// Degrees.
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorLabel {
    pub id: ElementId,
    pub position: Point,
    pub text: String,
    pub font_size: f64,
    pub rotation: f64,
}

/// A measured span drawn `offset` units to the side of its baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionLine {
    pub id: ElementId,
    pub start: Point,
    pub end: Point,
    pub offset: f64,
    pub is_auto: bool,
}

/// A room detected upstream. Only its label is drawn here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: ElementId,
    pub name: String,
    #[serde(default)]
    pub wall_ids: Vec<ElementId>,
    pub center: Point,
    /// Square feet.
    pub area: f64,
}

// =============================================================
// Trade layers
// =============================================================

/// A trade symbol. `symbol` is an open catalogue name (`outlet`, `valve`,
/// `dehumidifier`, ...) of which only the first two letters are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub symbol: String,
    pub position: Point,
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePath {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub path_type: TradePathType,
    pub points: Vec<Point>,
    pub stroke_width: f64,
}

/// A water-damage area classified by IICRC class (`"1"`–`"4"`) and category (`"1"`–`"3"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageZone {
    pub id: ElementId,
    pub points: Vec<Point>,
    pub damage_class: String,
    pub iicrc_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoistureReading {
    pub id: ElementId,
    pub position: Point,
    /// Moisture content, percent.
    pub value: f64,
    pub material: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainmentLine {
    pub id: ElementId,
    pub start: Point,
    pub end: Point,
    pub barrier_type: BarrierType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeLayerData {
    #[serde(default)]
    pub elements: Vec<TradeElement>,
    #[serde(default)]
    pub paths: Vec<TradePath>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageLayerData {
    #[serde(default)]
    pub zones: Vec<DamageZone>,
    #[serde(default)]
    pub moisture_readings: Vec<MoistureReading>,
    #[serde(default)]
    pub containment_lines: Vec<ContainmentLine>,
    #[serde(default)]
    pub barriers: Vec<TradeElement>,
}

/// An independently toggleable overlay for one trade discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeLayer {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub layer_type: TradeLayerType,
    #[serde(default)]
    pub name: String,
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_data: Option<TradeLayerData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_data: Option<DamageLayerData>,
}

// =============================================================
// Element union
// =============================================================

/// Any base element, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Element {
    Wall(Wall),
    ArcWall(ArcWall),
    Door(DoorPlacement),
    Window(WindowPlacement),
    Fixture(FixturePlacement),
    Label(FloorLabel),
    Dimension(DimensionLine),
}

impl Element {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Wall(w) => &w.id,
            Self::ArcWall(a) => &a.id,
            Self::Door(d) => &d.id,
            Self::Window(w) => &w.id,
            Self::Fixture(f) => &f.id,
            Self::Label(l) => &l.id,
            Self::Dimension(d) => &d.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Wall(_) => ElementKind::Wall,
            Self::ArcWall(_) => ElementKind::ArcWall,
            Self::Door(_) => ElementKind::Door,
            Self::Window(_) => ElementKind::Window,
            Self::Fixture(_) => ElementKind::Fixture,
            Self::Label(_) => ElementKind::Label,
            Self::Dimension(_) => ElementKind::Dimension,
        }
    }

    /// The same element under a different id.
    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        match &mut self {
            Self::Wall(w) => w.id = id,
            Self::ArcWall(a) => a.id = id,
            Self::Door(d) => d.id = id,
            Self::Window(w) => w.id = id,
            Self::Fixture(f) => f.id = id,
            Self::Label(l) => l.id = id,
            Self::Dimension(d) => d.id = id,
        }
        self
    }

    /// Shift every absolute position field by `(dx, dy)`.
    ///
    /// Doors and windows are positioned relative to their wall and are left as-is.
    #[must_use]
    pub fn translated(mut self, dx: f64, dy: f64) -> Self {
        match &mut self {
            Self::Wall(w) => {
                w.start = w.start.offset(dx, dy);
                w.end = w.end.offset(dx, dy);
            }
            Self::ArcWall(a) => {
                a.start = a.start.offset(dx, dy);
                a.end = a.end.offset(dx, dy);
                a.control_point = a.control_point.offset(dx, dy);
            }
            Self::Door(_) | Self::Window(_) => {}
            Self::Fixture(f) => f.position = f.position.offset(dx, dy),
            Self::Label(l) => l.position = l.position.offset(dx, dy),
            Self::Dimension(d) => {
                d.start = d.start.offset(dx, dy);
                d.end = d.end.offset(dx, dy);
            }
        }
        self
    }

    /// The owning wall of a door or window.
    #[must_use]
    pub fn wall_id(&self) -> Option<&str> {
        match self {
            Self::Door(d) => Some(&d.wall_id),
            Self::Window(w) => Some(&w.wall_id),
            _ => None,
        }
    }
}

// =============================================================
// Errors
// =============================================================

/// Error returned when loading or validating a floor plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("invalid floor plan JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate element id: {0}")]
    DuplicateId(ElementId),
    #[error("{kind} {id} references missing wall {wall_id}")]
    DanglingWall { kind: ElementKind, id: ElementId, wall_id: ElementId },
    #[error("{field} of {id} is out of range: {value}")]
    OutOfRange { id: ElementId, field: &'static str, value: f64 },
}

// =============================================================
// Floor plan aggregate
// =============================================================

/// The root document: every element collection plus scale and units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FloorPlanData {
    pub walls: Vec<Wall>,
    pub arc_walls: Vec<ArcWall>,
    pub doors: Vec<DoorPlacement>,
    pub windows: Vec<WindowPlacement>,
    pub fixtures: Vec<FixturePlacement>,
    pub labels: Vec<FloorLabel>,
    pub dimensions: Vec<DimensionLine>,
    pub rooms: Vec<Room>,
    pub trade_layers: Vec<TradeLayer>,
    pub scale: f64,
    pub units: MeasurementUnit,
}

impl Default for FloorPlanData {
    fn default() -> Self {
        Self {
            walls: Vec::new(),
            arc_walls: Vec::new(),
            doors: Vec::new(),
            windows: Vec::new(),
            fixtures: Vec::new(),
            labels: Vec::new(),
            dimensions: Vec::new(),
            rooms: Vec::new(),
            trade_layers: Vec::new(),
            scale: 4.0,
            units: MeasurementUnit::Imperial,
        }
    }
}

impl FloorPlanData {
    /// An empty plan at the default scale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a plan.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if the JSON is malformed or the plan breaks an invariant.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let plan: Self = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    /// # Errors
    ///
    /// Returns [`PlanError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // --- Lookup ---

    /// Kind and collection index of the element with `id`.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<(ElementKind, usize)> {
        ElementKind::ALL.iter().find_map(|&kind| self.position_in(kind, id).map(|i| (kind, i)))
    }

    /// Index of `id` within the `kind` collection only.
    #[must_use]
    pub fn position_in(&self, kind: ElementKind, id: &str) -> Option<usize> {
        match kind {
            ElementKind::Wall => self.walls.iter().position(|w| w.id == id),
            ElementKind::ArcWall => self.arc_walls.iter().position(|a| a.id == id),
            ElementKind::Door => self.doors.iter().position(|d| d.id == id),
            ElementKind::Window => self.windows.iter().position(|w| w.id == id),
            ElementKind::Fixture => self.fixtures.iter().position(|f| f.id == id),
            ElementKind::Label => self.labels.iter().position(|l| l.id == id),
            ElementKind::Dimension => self.dimensions.iter().position(|d| d.id == id),
        }
    }

    /// Id to kind map over every base element, built in one pass.
    #[must_use]
    pub fn kind_index(&self) -> HashMap<&str, ElementKind> {
        let mut index = HashMap::with_capacity(self.element_count());
        index.extend(self.walls.iter().map(|w| (w.id.as_str(), ElementKind::Wall)));
        index.extend(self.arc_walls.iter().map(|a| (a.id.as_str(), ElementKind::ArcWall)));
        index.extend(self.doors.iter().map(|d| (d.id.as_str(), ElementKind::Door)));
        index.extend(self.windows.iter().map(|w| (w.id.as_str(), ElementKind::Window)));
        index.extend(self.fixtures.iter().map(|f| (f.id.as_str(), ElementKind::Fixture)));
        index.extend(self.labels.iter().map(|l| (l.id.as_str(), ElementKind::Label)));
        index.extend(self.dimensions.iter().map(|d| (d.id.as_str(), ElementKind::Dimension)));
        index
    }

    #[must_use]
    pub fn kind_of(&self, id: &str) -> Option<ElementKind> {
        self.locate(id).map(|(kind, _)| kind)
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// A copy of the element with `id`.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<Element> {
        let (kind, index) = self.locate(id)?;
        self.element_at(kind, index)
    }

    #[must_use]
    pub fn element_at(&self, kind: ElementKind, index: usize) -> Option<Element> {
        match kind {
            ElementKind::Wall => self.walls.get(index).cloned().map(Element::Wall),
            ElementKind::ArcWall => self.arc_walls.get(index).cloned().map(Element::ArcWall),
            ElementKind::Door => self.doors.get(index).cloned().map(Element::Door),
            ElementKind::Window => self.windows.get(index).cloned().map(Element::Window),
            ElementKind::Fixture => self.fixtures.get(index).cloned().map(Element::Fixture),
            ElementKind::Label => self.labels.get(index).cloned().map(Element::Label),
            ElementKind::Dimension => self.dimensions.get(index).cloned().map(Element::Dimension),
        }
    }

    /// Every base element in collection order (walls first, dimensions last).
    #[must_use]
    pub fn elements(&self) -> Vec<Element> {
        let mut out = Vec::with_capacity(self.element_count());
        out.extend(self.walls.iter().cloned().map(Element::Wall));
        out.extend(self.arc_walls.iter().cloned().map(Element::ArcWall));
        out.extend(self.doors.iter().cloned().map(Element::Door));
        out.extend(self.windows.iter().cloned().map(Element::Window));
        out.extend(self.fixtures.iter().cloned().map(Element::Fixture));
        out.extend(self.labels.iter().cloned().map(Element::Label));
        out.extend(self.dimensions.iter().cloned().map(Element::Dimension));
        out
    }

    /// Ids of every base element.
    #[must_use]
    pub fn ids(&self) -> BTreeSet<ElementId> {
        self.elements().into_iter().map(|e| e.id().to_owned()).collect()
    }

    /// Number of base elements across all collections.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.walls.len()
            + self.arc_walls.len()
            + self.doors.len()
            + self.windows.len()
            + self.fixtures.len()
            + self.labels.len()
            + self.dimensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    #[must_use]
    pub fn wall(&self, id: &str) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    /// Ids of the doors and windows hung in `wall_id`.
    #[must_use]
    pub fn openings_on_wall(&self, wall_id: &str) -> Vec<ElementId> {
        self.doors
            .iter()
            .filter(|d| d.wall_id == wall_id)
            .map(|d| d.id.clone())
            .chain(self.windows.iter().filter(|w| w.wall_id == wall_id).map(|w| w.id.clone()))
            .collect()
    }

    // --- Mutation (used by commands on their private copy) ---

    /// Append an element to the end of its collection.
    pub(crate) fn push(&mut self, element: Element) {
        match element {
            Element::Wall(w) => self.walls.push(w),
            Element::ArcWall(a) => self.arc_walls.push(a),
            Element::Door(d) => self.doors.push(d),
            Element::Window(w) => self.windows.push(w),
            Element::Fixture(f) => self.fixtures.push(f),
            Element::Label(l) => self.labels.push(l),
            Element::Dimension(d) => self.dimensions.push(d),
        }
    }

    /// Insert an element at `index` of its collection (clamped to the end).
    pub(crate) fn insert_at(&mut self, index: usize, element: Element) {
        match element {
            Element::Wall(w) => insert_clamped(&mut self.walls, index, w),
            Element::ArcWall(a) => insert_clamped(&mut self.arc_walls, index, a),
            Element::Door(d) => insert_clamped(&mut self.doors, index, d),
            Element::Window(w) => insert_clamped(&mut self.windows, index, w),
            Element::Fixture(f) => insert_clamped(&mut self.fixtures, index, f),
            Element::Label(l) => insert_clamped(&mut self.labels, index, l),
            Element::Dimension(d) => insert_clamped(&mut self.dimensions, index, d),
        }
    }

    /// Remove and return the element at `index` of the `kind` collection.
    pub(crate) fn remove_at(&mut self, kind: ElementKind, index: usize) -> Option<Element> {
        match kind {
            ElementKind::Wall => take_at(&mut self.walls, index).map(Element::Wall),
            ElementKind::ArcWall => take_at(&mut self.arc_walls, index).map(Element::ArcWall),
            ElementKind::Door => take_at(&mut self.doors, index).map(Element::Door),
            ElementKind::Window => take_at(&mut self.windows, index).map(Element::Window),
            ElementKind::Fixture => take_at(&mut self.fixtures, index).map(Element::Fixture),
            ElementKind::Label => take_at(&mut self.labels, index).map(Element::Label),
            ElementKind::Dimension => take_at(&mut self.dimensions, index).map(Element::Dimension),
        }
    }

    /// Remove the element with `id`, wherever it lives.
    pub(crate) fn remove_by_id(&mut self, id: &str) -> Option<Element> {
        let (kind, index) = self.locate(id)?;
        self.remove_at(kind, index)
    }

    /// Overwrite the element at `index` with `element`, returning the old value.
    pub(crate) fn replace_at(&mut self, index: usize, element: Element) -> Option<Element> {
        match element {
            Element::Wall(w) => swap_at(&mut self.walls, index, w).map(Element::Wall),
            Element::ArcWall(a) => swap_at(&mut self.arc_walls, index, a).map(Element::ArcWall),
            Element::Door(d) => swap_at(&mut self.doors, index, d).map(Element::Door),
            Element::Window(w) => swap_at(&mut self.windows, index, w).map(Element::Window),
            Element::Fixture(f) => swap_at(&mut self.fixtures, index, f).map(Element::Fixture),
            Element::Label(l) => swap_at(&mut self.labels, index, l).map(Element::Label),
            Element::Dimension(d) => swap_at(&mut self.dimensions, index, d).map(Element::Dimension),
        }
    }

    // --- Validation ---

    /// Check the document invariants: unique ids, in-range parameters and no
    /// door or window pointing at a missing wall.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut seen = BTreeSet::new();
        for element in self.elements() {
            if !seen.insert(element.id().to_owned()) {
                return Err(PlanError::DuplicateId(element.id().to_owned()));
            }
        }

        for wall in &self.walls {
            require_positive(&wall.id, "thickness", wall.thickness)?;
        }
        for arc in &self.arc_walls {
            require_positive(&arc.id, "thickness", arc.thickness)?;
        }
        for door in &self.doors {
            self.check_opening(ElementKind::Door, &door.id, &door.wall_id, door.position, door.width)?;
        }
        for window in &self.windows {
            self.check_opening(ElementKind::Window, &window.id, &window.wall_id, window.position, window.width)?;
        }
        for label in &self.labels {
            require_positive(&label.id, "fontSize", label.font_size)?;
        }
        for layer in &self.trade_layers {
            if !(0.0..=1.0).contains(&layer.opacity) {
                return Err(PlanError::OutOfRange { id: layer.id.clone(), field: "opacity", value: layer.opacity });
            }
        }
        Ok(())
    }

    fn check_opening(&self, kind: ElementKind, id: &str, wall_id: &str, position: f64, width: f64) -> Result<(), PlanError> {
        if !(0.0..=1.0).contains(&position) {
            return Err(PlanError::OutOfRange { id: id.to_owned(), field: "position", value: position });
        }
        require_positive(id, "width", width)?;
        if self.wall(wall_id).is_none() {
            return Err(PlanError::DanglingWall { kind, id: id.to_owned(), wall_id: wall_id.to_owned() });
        }
        Ok(())
    }
}

fn require_positive(id: &str, field: &'static str, value: f64) -> Result<(), PlanError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(PlanError::OutOfRange { id: id.to_owned(), field, value })
    }
}

fn insert_clamped<T>(items: &mut Vec<T>, index: usize, item: T) {
    let index = index.min(items.len());
    items.insert(index, item);
}

fn take_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index < items.len() { Some(items.remove(index)) } else { None }
}

fn swap_at<T>(items: &mut [T], index: usize, item: T) -> Option<T> {
    items.get_mut(index).map(|slot| std::mem::replace(slot, item))
}
