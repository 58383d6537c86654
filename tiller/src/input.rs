//! Lookup tables from raw identifiers to actions, and the mapper that
//! drives a navigator from raw events.

use std::collections::HashMap;

use crate::event::{Action, Key, PadButton, RawEvent};
use crate::navigator::Navigator;

/// Raw-identifier to action tables for both device families. Identifiers
/// absent from a table are ignored by the mapper.
#[derive(Debug, Clone)]
pub struct InputMap {
    pad: HashMap<PadButton, Action>,
    keys: HashMap<Key, Action>,
}

impl InputMap {
    /// Empty tables; every raw identifier is ignored until bound.
    pub fn empty() -> Self {
        Self {
            pad: HashMap::new(),
            keys: HashMap::new(),
        }
    }

    pub fn bind_pad(mut self, button: PadButton, action: Action) -> Self {
        self.pad.insert(button, action);
        self
    }

    pub fn bind_key(mut self, key: Key, action: Action) -> Self {
        self.keys.insert(key, action);
        self
    }

    /// The action bound to the event's raw identifier, if any.
    pub fn lookup(&self, event: &RawEvent) -> Option<Action> {
        match event {
            RawEvent::Pad { button, .. } => self.pad.get(button).copied(),
            RawEvent::Keyboard { key, .. } => self.keys.get(key).copied(),
        }
    }
}

impl Default for InputMap {
    /// The stock couch bindings: d-pad / wasd / arrows move, South /
    /// Space / Enter confirm, East / Escape / Backspace cancel, triggers
    /// and q / e tab.
    fn default() -> Self {
        Self::empty()
            .bind_pad(PadButton::DPadUp, Action::Up)
            .bind_pad(PadButton::DPadDown, Action::Down)
            .bind_pad(PadButton::DPadLeft, Action::Left)
            .bind_pad(PadButton::DPadRight, Action::Right)
            .bind_pad(PadButton::South, Action::Confirm)
            .bind_pad(PadButton::East, Action::Cancel)
            .bind_pad(PadButton::LeftTrigger, Action::TabLeft)
            .bind_pad(PadButton::RightTrigger, Action::TabRight)
            .bind_key(Key::Char('w'), Action::Up)
            .bind_key(Key::Char('s'), Action::Down)
            .bind_key(Key::Char('a'), Action::Left)
            .bind_key(Key::Char('d'), Action::Right)
            .bind_key(Key::Up, Action::Up)
            .bind_key(Key::Down, Action::Down)
            .bind_key(Key::Left, Action::Left)
            .bind_key(Key::Right, Action::Right)
            .bind_key(Key::Char(' '), Action::Confirm)
            .bind_key(Key::Enter, Action::Confirm)
            .bind_key(Key::Escape, Action::Cancel)
            .bind_key(Key::Backspace, Action::Cancel)
            .bind_key(Key::Char('q'), Action::TabLeft)
            .bind_key(Key::Char('e'), Action::TabRight)
    }
}

/// Routes raw device events into navigation operations and tracks the
/// pressed state of every action.
#[derive(Debug)]
pub struct InputMapper {
    map: InputMap,
    pressed: HashMap<Action, bool>,
}

impl InputMapper {
    pub fn new(map: InputMap) -> Self {
        Self {
            map,
            pressed: HashMap::new(),
        }
    }

    pub fn map(&self) -> &InputMap {
        &self.map
    }

    /// Whether `action` is currently held. Held state is bookkeeping for
    /// consumers (input overlays and the like); it does not gate
    /// dispatch.
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.get(&action).copied().unwrap_or(false)
    }

    /// Feed one raw event. A press dispatches the bound operation on the
    /// navigator; a release only records state; unrecognized identifiers
    /// are ignored entirely. Returns the recognized action.
    ///
    /// Presses are not transition-checked: a duplicate press from a noisy
    /// device dispatches again and leaves the debounce gate to absorb it.
    pub fn dispatch(&mut self, event: RawEvent, nav: &mut Navigator) -> Option<Action> {
        let action = match self.map.lookup(&event) {
            Some(action) => action,
            None => {
                log::trace!("[input] ignored {:?}", event);
                return None;
            }
        };
        let pressed = event.pressed();
        self.pressed.insert(action, pressed);
        if pressed {
            log::debug!("[input] {:?} -> {:?}", event, action);
            if let Some(direction) = action.direction() {
                nav.move_focus(direction);
            } else {
                match action {
                    Action::Confirm => {
                        nav.activate();
                    }
                    Action::Cancel => {
                        nav.dismiss();
                    }
                    // tab actions have no bound operation; state only
                    _ => {}
                }
            }
        }
        Some(action)
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(InputMap::default())
    }
}
