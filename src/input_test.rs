use super::*;

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn two_click_tools() {
    assert!(Tool::Wall.is_two_click());
    assert!(Tool::ArcWall.is_two_click());
    assert!(Tool::Dimension.is_two_click());
    assert!(!Tool::Door.is_two_click());
    assert!(!Tool::Lasso.is_two_click());
}

#[test]
fn only_walls_snap_angle() {
    assert!(Tool::Wall.snaps_angle());
    assert!(Tool::ArcWall.snaps_angle());
    assert!(!Tool::Dimension.snaps_angle());
}

#[test]
fn tool_serializes_camel_case() {
    assert_eq!(serde_json::to_value(Tool::ArcWall).unwrap_or_default(), "arcWall");
    assert_eq!(serde_json::from_str::<Tool>("\"erase\"").unwrap_or_default(), Tool::Erase);
}

#[test]
fn modifiers_command_accepts_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { shift: true, alt: true, ..Default::default() }.command());
}

#[test]
fn key_letter_is_case_insensitive() {
    assert!(Key("z".into()).is_letter('z'));
    assert!(Key("Z".into()).is_letter('z'));
    assert!(!Key("Escape".into()).is_letter('e'));
    assert!(!Key(String::new()).is_letter('z'));
}

#[test]
fn key_space_variants() {
    assert!(Key(" ".into()).is_space());
    assert!(Key("Space".into()).is_space());
    assert!(!Key("Enter".into()).is_space());
}

#[test]
fn draw_state_is_bound_to_its_tool() {
    let state = DrawState::AwaitingSecondPoint { tool: Tool::Wall, start: Point::new(1.0, 2.0) };
    assert_eq!(state.start_for(Tool::Wall), Some(Point::new(1.0, 2.0)));
    assert_eq!(state.start_for(Tool::Dimension), None);
    assert!(state.is_pending());
    assert!(!DrawState::Idle.is_pending());
}

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
}
