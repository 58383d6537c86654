use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tiller::{Action, InputMap, InputMapper, Key, Navigator, Node, NodeId, PadButton, RawEvent};

fn pad(button: PadButton, pressed: bool) -> RawEvent {
    RawEvent::Pad { button, pressed }
}

fn key(key: Key, pressed: bool) -> RawEvent {
    RawEvent::Keyboard { key, pressed }
}

/// Three cells in a skip row under the root, focus on the first.
fn strip_with(interval: Duration) -> (Navigator, Vec<NodeId>) {
    let mut nav = Navigator::new().debounce(interval);
    let row = nav.register(nav.root(), 0, Node::row().skip(true));
    let cells = (0..3).map(|i| nav.register(row, i, Node::row())).collect::<Vec<_>>();
    nav.focus(cells[0]);
    (nav, cells)
}

fn strip() -> (Navigator, Vec<NodeId>) {
    strip_with(Duration::ZERO)
}

/// A menu with an activation counter and one item, focus on the menu.
fn menu() -> (Navigator, NodeId, NodeId, Rc<Cell<u32>>) {
    let mut nav = Navigator::new().debounce(Duration::ZERO);
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    let menu = nav.register(
        nav.root(),
        0,
        Node::column().on_activate(move || counter.set(counter.get() + 1)),
    );
    let item = nav.register(menu, 0, Node::row());
    nav.focus(menu);
    (nav, menu, item, fired)
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_dpad_press_moves_focus() {
    let (mut nav, cells) = strip();
    let mut mapper = InputMapper::default();

    assert_eq!(mapper.dispatch(pad(PadButton::DPadRight, true), &mut nav), Some(Action::Right));
    assert_eq!(nav.current(), cells[1]);
}

#[test]
fn test_release_records_state_without_moving() {
    let (mut nav, cells) = strip();
    let mut mapper = InputMapper::default();

    mapper.dispatch(pad(PadButton::DPadRight, true), &mut nav);
    let action = mapper.dispatch(pad(PadButton::DPadRight, false), &mut nav);

    // the release is recognized, but only bookkeeping happens
    assert_eq!(action, Some(Action::Right));
    assert_eq!(nav.current(), cells[1]);
    assert!(!mapper.is_pressed(Action::Right));
}

#[test]
fn test_unbound_identifiers_are_ignored() {
    let (mut nav, cells) = strip();
    let mut mapper = InputMapper::default();

    // North and 'x' are not in the stock tables
    assert_eq!(mapper.dispatch(pad(PadButton::North, true), &mut nav), None);
    assert_eq!(mapper.dispatch(key(Key::Char('x'), true), &mut nav), None);
    assert_eq!(nav.current(), cells[0]);
}

#[test]
fn test_keyboard_defaults_cover_wasd_and_arrows() {
    let (mut nav, cells) = strip();
    let mut mapper = InputMapper::default();

    mapper.dispatch(key(Key::Char('d'), true), &mut nav);
    assert_eq!(nav.current(), cells[1]);
    mapper.dispatch(key(Key::Right, true), &mut nav);
    assert_eq!(nav.current(), cells[2]);
    mapper.dispatch(key(Key::Char('a'), true), &mut nav);
    assert_eq!(nav.current(), cells[1]);
    mapper.dispatch(key(Key::Left, true), &mut nav);
    assert_eq!(nav.current(), cells[0]);
}

#[test]
fn test_confirm_activates() {
    let (mut nav, _, item, fired) = menu();
    let mut mapper = InputMapper::default();

    assert_eq!(mapper.dispatch(key(Key::Enter, true), &mut nav), Some(Action::Confirm));
    assert_eq!(nav.current(), item);
    assert_eq!(fired.get(), 1);

    // the item has no callback and no children; confirming it does nothing
    mapper.dispatch(pad(PadButton::South, true), &mut nav);
    assert_eq!(nav.current(), item);
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_cancel_dismisses() {
    let (mut nav, menu, item, _) = menu();
    let mut mapper = InputMapper::default();
    nav.focus(item);

    mapper.dispatch(key(Key::Escape, true), &mut nav);
    assert_eq!(nav.current(), menu);
    mapper.dispatch(pad(PadButton::East, true), &mut nav);
    assert_eq!(nav.current(), nav.root());
}

#[test]
fn test_tab_actions_record_state_only() {
    let (mut nav, cells) = strip();
    let mut mapper = InputMapper::default();

    assert_eq!(
        mapper.dispatch(pad(PadButton::LeftTrigger, true), &mut nav),
        Some(Action::TabLeft)
    );
    assert_eq!(nav.current(), cells[0]);
    assert!(mapper.is_pressed(Action::TabLeft));

    mapper.dispatch(pad(PadButton::LeftTrigger, false), &mut nav);
    assert!(!mapper.is_pressed(Action::TabLeft));
}

#[test]
fn test_is_pressed_tracks_actions_independently() {
    let (mut nav, _) = strip();
    let mut mapper = InputMapper::default();

    // Up finds no target here; the held state is recorded anyway
    mapper.dispatch(key(Key::Char('w'), true), &mut nav);
    mapper.dispatch(key(Key::Char('d'), true), &mut nav);
    assert!(mapper.is_pressed(Action::Up));
    assert!(mapper.is_pressed(Action::Right));

    mapper.dispatch(key(Key::Char('w'), false), &mut nav);
    assert!(!mapper.is_pressed(Action::Up));
    assert!(mapper.is_pressed(Action::Right));
}

#[test]
fn test_custom_bindings() {
    let mut nav = Navigator::new().debounce(Duration::ZERO);
    let root = nav.root();
    let a = nav.register(root, 0, Node::row());
    let b = nav.register(root, 1, Node::row());
    nav.focus(a);

    let map = InputMap::empty()
        .bind_key(Key::Char('j'), Action::Down)
        .bind_key(Key::Char('k'), Action::Up);
    let mut mapper = InputMapper::new(map);

    mapper.dispatch(key(Key::Char('j'), true), &mut nav);
    assert_eq!(nav.current(), b);

    // stock bindings are gone with the empty base table
    assert_eq!(mapper.dispatch(key(Key::Char('s'), true), &mut nav), None);

    mapper.dispatch(key(Key::Char('k'), true), &mut nav);
    assert_eq!(nav.current(), a);
}

#[test]
fn test_duplicate_press_dispatches_again() {
    let (mut nav, cells) = strip();
    let mut mapper = InputMapper::default();

    // no release in between; dispatch does not transition-check
    mapper.dispatch(pad(PadButton::DPadRight, true), &mut nav);
    mapper.dispatch(pad(PadButton::DPadRight, true), &mut nav);
    assert_eq!(nav.current(), cells[2]);
}

#[test]
fn test_gate_absorbs_duplicate_presses() {
    let (mut nav, cells) = strip_with(Duration::from_secs(60));
    let mut mapper = InputMapper::default();

    // both presses are recognized; the navigator only honors the first
    assert_eq!(mapper.dispatch(pad(PadButton::DPadRight, true), &mut nav), Some(Action::Right));
    assert_eq!(mapper.dispatch(pad(PadButton::DPadRight, true), &mut nav), Some(Action::Right));
    assert_eq!(nav.current(), cells[1]);
}

// ============================================================================
// Crossterm conversion
// ============================================================================

#[test]
fn test_from_crossterm_press_and_release() {
    let press = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
    assert_eq!(
        RawEvent::from_crossterm(&press),
        Some(RawEvent::Keyboard { key: Key::Char('w'), pressed: true })
    );

    let release = KeyEvent::new_with_kind(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(
        RawEvent::from_crossterm(&release),
        Some(RawEvent::Keyboard { key: Key::Escape, pressed: false })
    );
}

#[test]
fn test_from_crossterm_drops_repeats_and_unknown_keys() {
    let repeat = KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::NONE, KeyEventKind::Repeat);
    assert_eq!(RawEvent::from_crossterm(&repeat), None);

    let unknown = KeyEvent::new(KeyCode::CapsLock, KeyModifiers::NONE);
    assert_eq!(RawEvent::from_crossterm(&unknown), None);
}

#[test]
fn test_crossterm_event_drives_the_mapper() {
    let (mut nav, cells) = strip();
    let mut mapper = InputMapper::default();

    let event = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
    let raw = RawEvent::from_crossterm(&event).unwrap();

    assert_eq!(mapper.dispatch(raw, &mut nav), Some(Action::Right));
    assert_eq!(nav.current(), cells[1]);
}
