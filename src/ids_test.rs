use std::collections::HashSet;

use super::*;

#[test]
fn sequential_ids_count_up() {
    let mut ids = SequentialIds::new();
    assert_eq!(ids.next_id(ElementKind::Wall), "wall_1");
    assert_eq!(ids.next_id(ElementKind::Fixture), "fix_2");
    assert_eq!(ids.next_id(ElementKind::Dimension), "dim_3");
}

#[test]
fn sequential_ids_can_resume() {
    let mut ids = SequentialIds::starting_at(41);
    assert_eq!(ids.next_id(ElementKind::Label), "lbl_42");
}

#[test]
fn uuid_ids_are_prefixed_and_unique() {
    let mut ids = UuidIds;
    let generated: HashSet<_> = (0..50).map(|_| ids.next_id(ElementKind::ArcWall)).collect();
    assert_eq!(generated.len(), 50);
    assert!(generated.iter().all(|id| id.starts_with("arc_")));
}
