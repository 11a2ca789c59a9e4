use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_matches_browser_name() {
    let key = Key("Escape".to_owned());
    assert!(key.is("Escape"));
    assert!(!key.is("escape"));
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default_is_plain_mode() {
    let ui = UiState::default();
    assert!(!ui.connection_mode);
    assert!(ui.pending_source.is_none());
    assert!(ui.editing.is_none());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(InputState::default().is_idle());
}

#[test]
fn dragging_is_not_idle() {
    let state = InputState::Dragging {
        target: DragTarget::Item(ItemRef::photo("p")),
        start_screen: Point::new(0.0, 0.0),
        last_screen: Point::new(0.0, 0.0),
        active: false,
    };
    assert!(!state.is_idle());
}

#[test]
fn drag_targets_compare_by_identity() {
    assert_eq!(DragTarget::Item(ItemRef::note("a")), DragTarget::Item(ItemRef::note("a")));
    assert_ne!(DragTarget::Item(ItemRef::note("a")), DragTarget::Item(ItemRef::photo("a")));
    assert_ne!(DragTarget::Mascot("a".to_owned()), DragTarget::Item(ItemRef::note("a")));
}
