use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_mark() {
    assert_eq!(Tool::default(), Tool::Mark);
}

#[test]
fn tool_debug_format() {
    assert_eq!(format!("{:?}", Tool::Select), "Select");
    assert_eq!(format!("{:?}", Tool::Stamp), "Stamp");
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
    assert!(!m.extend());
    assert!(!m.group());
    assert!(!m.command());
}

#[test]
fn shift_extends_and_groups() {
    let m = Modifiers { shift: true, ..Default::default() };
    assert!(m.extend());
    assert!(m.group());
}

#[test]
fn ctrl_or_meta_is_command() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { alt: true, ..Default::default() }.command());
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default_is_empty() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Mark);
    assert!(ui.selection.is_empty());
    assert!(ui.focused.is_none());
    assert!(ui.editing.is_none());
    assert_eq!(ui.scroll, Point::new(0.0, 0.0));
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(state.is_idle());
    assert_eq!(state.name(), "idle");
}

#[test]
fn input_state_names_match_gestures() {
    let panning = InputState::Panning { start_screen: Point::new(0.0, 0.0), start_scroll: Point::new(0.0, 0.0) };
    assert_eq!(panning.name(), "panning");
    assert!(!panning.is_idle());
    let multi = InputState::MovingMulti { start: Point::new(0.0, 0.0), initial: BTreeMap::new(), before: Vec::new() };
    assert_eq!(multi.name(), "moving-multi");
}

#[test]
fn gesture_button_follows_the_gesture() {
    assert_eq!(InputState::Idle.button(), None);
    let panning = InputState::Panning { start_screen: Point::new(0.0, 0.0), start_scroll: Point::new(0.0, 0.0) };
    assert_eq!(panning.button(), Some(Button::Middle));
    let creating = InputState::Creating {
        start: Point::new(0.1, 0.1),
        start_screen: Point::new(100.0, 100.0),
        current: Point::new(0.1, 0.1),
        extend: None,
    };
    assert_eq!(creating.button(), Some(Button::Primary));
}
