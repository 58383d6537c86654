use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::tree::Orientation;

/// Device-independent input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    TabLeft,
    TabRight,
}

impl Action {
    /// The spatial direction of a movement action.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A spatial movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The axis this direction travels along: vertical moves walk
    /// column-oriented parents, horizontal moves walk row-oriented ones.
    pub fn axis(self) -> Orientation {
        match self {
            Direction::Up | Direction::Down => Orientation::Column,
            Direction::Left | Direction::Right => Orientation::Row,
        }
    }

    /// Slot delta: -1 toward lower slots (up/left), +1 toward higher.
    pub fn step(self) -> i32 {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }
}

/// Physical gamepad buttons, one variant per button gilrs reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    South,
    East,
    North,
    West,
    C,
    Z,
    LeftTrigger,
    LeftTrigger2,
    RightTrigger,
    RightTrigger2,
    Select,
    Start,
    Mode,
    LeftThumb,
    RightThumb,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Unknown,
}

/// Simplified key representation for the keyboard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

/// A normalized device event at the engine boundary. Everything upstream
/// (gilrs, crossterm, a GUI toolkit) converts into one of these two
/// variants before the mapper sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Pad { button: PadButton, pressed: bool },
    Keyboard { key: Key, pressed: bool },
}

impl RawEvent {
    pub fn pressed(&self) -> bool {
        match self {
            RawEvent::Pad { pressed, .. } | RawEvent::Keyboard { pressed, .. } => *pressed,
        }
    }

    /// Normalize a crossterm key event. Repeats are dropped; note that
    /// most terminals only deliver presses unless the kitty keyboard
    /// protocol is enabled.
    pub fn from_crossterm(event: &KeyEvent) -> Option<RawEvent> {
        let pressed = match event.kind {
            KeyEventKind::Press => true,
            KeyEventKind::Release => false,
            KeyEventKind::Repeat => return None,
        };
        let key = convert_key(event.code)?;
        Some(RawEvent::Keyboard { key, pressed })
    }
}

/// Convert a crossterm KeyCode to a table key.
fn convert_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::F(n) => Some(Key::F(n)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::Delete => Some(Key::Delete),
        _ => None,
    }
}
