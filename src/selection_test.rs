use super::*;
use crate::doc::{FixturePlacement, FixtureType};
use crate::geometry::Point;

fn plan_with_fixture(id: &str) -> FloorPlanData {
    let mut plan = FloorPlanData::new();
    plan.fixtures.push(FixturePlacement {
        id: id.to_owned(),
        position: Point::new(0.0, 0.0),
        fixture_type: FixtureType::Sink,
        rotation: 0.0,
        width: None,
        depth: None,
    });
    plan
}

#[test]
fn empty_selects_nothing() {
    let sel = SelectionState::empty();
    assert!(sel.is_empty());
    assert!(!sel.is_selected("a"));
}

#[test]
fn single_selection() {
    let sel = SelectionState::single("w1", ElementKind::Wall);
    assert!(sel.is_selected("w1"));
    assert!(!sel.has_multi());
    assert_eq!(sel.selected_type, Some(ElementKind::Wall));
}

#[test]
fn multi_selection_tracks_types() {
    let sel = SelectionState::multi([("w1".to_owned(), ElementKind::Wall), ("f1".to_owned(), ElementKind::Fixture)]);
    assert!(sel.selected_id.is_none());
    assert!(sel.is_selected("f1"));
    assert_eq!(sel.multi_selected_ids.len(), 2);
    assert_eq!(sel.multi_selected_types.get("w1"), Some(&ElementKind::Wall));
}

#[test]
fn selected_ids_is_union() {
    let mut sel = SelectionState::multi([("w1".to_owned(), ElementKind::Wall)]);
    sel.selected_id = Some("f1".into());
    let ids: Vec<_> = sel.selected_ids().into_iter().collect();
    assert_eq!(ids, vec!["f1", "w1"]);
}

#[test]
fn pruned_drops_missing_ids() {
    let plan = plan_with_fixture("f1");
    let mut sel = SelectionState::multi([("f1".to_owned(), ElementKind::Fixture), ("gone".to_owned(), ElementKind::Wall)]);
    sel.selected_id = Some("gone2".into());
    sel.selected_type = Some(ElementKind::Label);
    let pruned = sel.pruned(&plan);
    assert!(pruned.selected_id.is_none());
    assert!(pruned.selected_type.is_none());
    assert_eq!(pruned.multi_selected_ids.len(), 1);
    assert!(pruned.multi_selected_types.contains_key("f1"));
}

#[test]
fn serializes_camel_case() {
    let sel = SelectionState::single("w1", ElementKind::ArcWall);
    let value = serde_json::to_value(&sel).unwrap_or_default();
    assert_eq!(value["selectedId"], "w1");
    assert_eq!(value["selectedType"], "arcWall");
}
