#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn make_wall(id: &str) -> Wall {
    Wall { id: id.to_owned(), start: pt(0.0, 0.0), end: pt(100.0, 0.0), thickness: 6.0, height: 96.0 }
}

fn make_door(id: &str, wall_id: &str) -> DoorPlacement {
    DoorPlacement {
        id: id.to_owned(),
        wall_id: wall_id.to_owned(),
        position: 0.5,
        width: 36.0,
        door_type: DoorType::Single,
        swing_angle: None,
        flip_side: None,
    }
}

fn make_fixture(id: &str) -> FixturePlacement {
    FixturePlacement {
        id: id.to_owned(),
        position: pt(24.0, 36.0),
        fixture_type: FixtureType::Toilet,
        rotation: 0.0,
        width: None,
        depth: None,
    }
}

fn sample_plan() -> FloorPlanData {
    let mut plan = FloorPlanData::new();
    plan.walls.push(make_wall("w1"));
    plan.walls.push(make_wall("w2"));
    plan.doors.push(make_door("d1", "w1"));
    plan.fixtures.push(make_fixture("f1"));
    plan
}

// =============================================================
// Defaults and names
// =============================================================

#[test]
fn default_plan_is_empty_imperial() {
    let plan = FloorPlanData::default();
    assert!(plan.is_empty());
    assert_eq!(plan.scale, 4.0);
    assert_eq!(plan.units, MeasurementUnit::Imperial);
}

#[test]
fn element_kind_wire_names() {
    assert_eq!(ElementKind::ArcWall.as_str(), "arcWall");
    assert_eq!(ElementKind::Dimension.to_string(), "dimension");
    assert_eq!(ElementKind::Window.id_prefix(), "win");
}

#[test]
fn fixture_type_names_are_camel_case() {
    assert_eq!(FixtureType::WaterHeater.as_str(), "waterHeater");
    assert_eq!(serde_json::to_value(FixtureType::ToiletAda).unwrap_or_default(), json!("toiletAda"));
}

#[test]
fn trade_path_type_names_are_snake_case() {
    assert_eq!(TradePathType::PipeHot.as_str(), "pipe_hot");
    assert_eq!(serde_json::to_value(TradePathType::DuctReturn).unwrap_or_default(), json!("duct_return"));
}

// =============================================================
// Lookup
// =============================================================

#[test]
fn locate_reports_kind_and_index() {
    let plan = sample_plan();
    assert_eq!(plan.locate("w2"), Some((ElementKind::Wall, 1)));
    assert_eq!(plan.locate("d1"), Some((ElementKind::Door, 0)));
    assert_eq!(plan.kind_of("f1"), Some(ElementKind::Fixture));
    assert_eq!(plan.locate("missing"), None);
}

#[test]
fn position_in_scans_only_the_given_kind() {
    let plan = sample_plan();
    assert_eq!(plan.position_in(ElementKind::Wall, "w2"), Some(1));
    assert_eq!(plan.position_in(ElementKind::Door, "w2"), None);
    assert_eq!(plan.position_in(ElementKind::Fixture, "f1"), Some(0));
}

#[test]
fn kind_index_covers_every_element() {
    let plan = sample_plan();
    let index = plan.kind_index();
    assert_eq!(index.len(), plan.element_count());
    assert_eq!(index.get("d1"), Some(&ElementKind::Door));
    assert_eq!(index.get("w1"), Some(&ElementKind::Wall));
    assert!(!index.contains_key("missing"));
}

#[test]
fn element_kinds_are_listed_in_collection_order() {
    assert_eq!(ElementKind::ALL.len(), 7);
    assert_eq!(ElementKind::ALL.first(), Some(&ElementKind::Wall));
    assert_eq!(ElementKind::ALL.last(), Some(&ElementKind::Dimension));
}

#[test]
fn element_returns_a_copy() {
    let plan = sample_plan();
    let element = plan.element("f1");
    assert_eq!(element, Some(Element::Fixture(make_fixture("f1"))));
}

#[test]
fn ids_cover_every_collection() {
    let plan = sample_plan();
    let ids: Vec<_> = plan.ids().into_iter().collect();
    assert_eq!(ids, vec!["d1", "f1", "w1", "w2"]);
    assert_eq!(plan.element_count(), 4);
}

#[test]
fn openings_on_wall_lists_doors_and_windows() {
    let mut plan = sample_plan();
    plan.windows.push(WindowPlacement {
        id: "win1".into(),
        wall_id: "w1".into(),
        position: 0.2,
        width: 36.0,
        window_type: WindowType::Standard,
        sill_height: None,
    });
    assert_eq!(plan.openings_on_wall("w1"), vec!["d1".to_owned(), "win1".to_owned()]);
    assert!(plan.openings_on_wall("w2").is_empty());
}

// =============================================================
// Mutation helpers
// =============================================================

#[test]
fn remove_then_insert_restores_order() {
    let original = sample_plan();
    let mut plan = original.clone();
    let removed = plan.remove_at(ElementKind::Wall, 0);
    assert_eq!(plan.walls.len(), 1);
    assert_eq!(plan.walls[0].id, "w2");
    if let Some(element) = removed {
        plan.insert_at(0, element);
    }
    assert_eq!(plan, original);
}

#[test]
fn remove_at_out_of_range_is_none() {
    let mut plan = sample_plan();
    assert!(plan.remove_at(ElementKind::Label, 0).is_none());
    assert_eq!(plan, sample_plan());
}

#[test]
fn insert_at_clamps_index() {
    let mut plan = sample_plan();
    plan.insert_at(99, Element::Wall(make_wall("w3")));
    assert_eq!(plan.walls.last().map(|w| w.id.as_str()), Some("w3"));
}

#[test]
fn replace_at_returns_previous_value() {
    let mut plan = sample_plan();
    let mut moved = make_fixture("f1");
    moved.position = pt(48.0, 48.0);
    let old = plan.replace_at(0, Element::Fixture(moved));
    assert_eq!(old, Some(Element::Fixture(make_fixture("f1"))));
    assert_eq!(plan.fixtures[0].position, pt(48.0, 48.0));
}

#[test]
fn element_translated_moves_absolute_fields_only() {
    let wall = Element::Wall(make_wall("w")).translated(48.0, 48.0);
    let Element::Wall(w) = wall else { return };
    assert_eq!(w.start, pt(48.0, 48.0));
    assert_eq!(w.end, pt(148.0, 48.0));

    let door = Element::Door(make_door("d", "w")).translated(48.0, 48.0);
    assert_eq!(door, Element::Door(make_door("d", "w")));
}

#[test]
fn element_with_id_renames() {
    let element = Element::Fixture(make_fixture("f1")).with_id("f9".into());
    assert_eq!(element.id(), "f9");
    assert_eq!(element.kind(), ElementKind::Fixture);
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_accepts_sample() {
    assert!(sample_plan().validate().is_ok());
}

#[test]
fn validate_rejects_duplicate_ids_across_collections() {
    let mut plan = sample_plan();
    plan.fixtures.push(make_fixture("w1"));
    assert!(matches!(plan.validate(), Err(PlanError::DuplicateId(id)) if id == "w1"));
}

#[test]
fn validate_rejects_dangling_wall_reference() {
    let mut plan = sample_plan();
    plan.doors.push(make_door("d2", "gone"));
    assert!(matches!(plan.validate(), Err(PlanError::DanglingWall { kind: ElementKind::Door, .. })));
}

#[test]
fn validate_rejects_out_of_range_position() {
    let mut plan = sample_plan();
    plan.doors[0].position = 1.5;
    assert!(matches!(plan.validate(), Err(PlanError::OutOfRange { field: "position", .. })));
}

#[test]
fn validate_rejects_bad_opacity() {
    let mut plan = sample_plan();
    plan.trade_layers.push(TradeLayer {
        id: "layer".into(),
        layer_type: TradeLayerType::Electrical,
        name: "Electrical".into(),
        visible: true,
        locked: false,
        opacity: 1.2,
        trade_data: Some(TradeLayerData::default()),
        damage_data: None,
    });
    assert!(matches!(plan.validate(), Err(PlanError::OutOfRange { field: "opacity", .. })));
}

// =============================================================
// JSON
// =============================================================

#[test]
fn from_json_reads_camel_case() {
    let json = json!({
        "walls": [{ "id": "w1", "start": { "x": 0, "y": 0 }, "end": { "x": 120, "y": 0 }, "thickness": 6, "height": 96 }],
        "doors": [{ "id": "d1", "wallId": "w1", "position": 0.25, "width": 32, "type": "pocket" }],
        "arcWalls": [{ "id": "a1", "start": { "x": 0, "y": 0 }, "end": { "x": 10, "y": 0 },
                       "controlPoint": { "x": 5, "y": 4 }, "thickness": 6, "height": 96 }],
        "units": "metric"
    })
    .to_string();
    let Ok(plan) = FloorPlanData::from_json(&json) else {
        panic!("plan should parse");
    };
    assert_eq!(plan.walls.len(), 1);
    assert_eq!(plan.doors[0].door_type, DoorType::Pocket);
    assert_eq!(plan.arc_walls[0].control_point, pt(5.0, 4.0));
    assert_eq!(plan.units, MeasurementUnit::Metric);
    assert_eq!(plan.scale, 4.0);
}

#[test]
fn from_json_rejects_malformed_input() {
    assert!(matches!(FloorPlanData::from_json("{ not json"), Err(PlanError::Json(_))));
}

#[test]
fn from_json_rejects_invalid_plan() {
    let json = json!({
        "doors": [{ "id": "d1", "wallId": "nope", "position": 0.5, "width": 32, "type": "single" }]
    })
    .to_string();
    assert!(matches!(FloorPlanData::from_json(&json), Err(PlanError::DanglingWall { .. })));
}

#[test]
fn to_json_round_trips() {
    let plan = sample_plan();
    let text = plan.to_json().unwrap_or_default();
    assert!(text.contains("\"wallId\""));
    let back = FloorPlanData::from_json(&text);
    assert!(matches!(back, Ok(p) if p == plan));
}

#[test]
fn element_serializes_with_kind_tag() {
    let value = serde_json::to_value(Element::Fixture(make_fixture("f1"))).unwrap_or_default();
    assert_eq!(value["kind"], json!("fixture"));
    assert_eq!(value["type"], json!("toilet"));
}

#[test]
fn damage_layer_parses() {
    let json = json!({
        "id": "dmg",
        "type": "damage",
        "visible": true,
        "opacity": 0.8,
        "damageData": {
            "zones": [{ "id": "z1", "points": [{ "x": 0, "y": 0 }, { "x": 10, "y": 0 }, { "x": 10, "y": 10 }],
                        "damageClass": "2", "iicrcCategory": "3" }],
            "moistureReadings": [{ "id": "m1", "position": { "x": 1, "y": 1 }, "value": 22.5, "material": "drywall" }],
            "containmentLines": [{ "id": "c1", "start": { "x": 0, "y": 0 }, "end": { "x": 5, "y": 0 },
                                   "barrierType": "containmentPole" }]
        }
    });
    let layer: Result<TradeLayer, _> = serde_json::from_value(json);
    let Ok(layer) = layer else {
        panic!("layer should parse");
    };
    let data = layer.damage_data.unwrap_or_default();
    assert_eq!(data.zones[0].iicrc_category, "3");
    assert_eq!(data.containment_lines[0].barrier_type, BarrierType::ContainmentPole);
    assert!(data.barriers.is_empty());
    assert!(!layer.locked);
}
