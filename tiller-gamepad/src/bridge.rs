//! Polls gilrs and normalizes device events for the input mapper.

use std::collections::HashMap;

use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs, GilrsBuilder, PowerInfo};
use log::{debug, trace};
use tiller::{PadButton, RawEvent};

use crate::error::BridgeError;

/// Axis deflection treated as a d-pad press, for pads that report their
/// hat switch as DPadX/DPadY axes instead of buttons.
const DPAD_AXIS_THRESHOLD: f32 = 0.5;

/// Battery / connection snapshot of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerLevel {
    Unknown,
    Wired,
    Discharging(u8),
    Charging(u8),
    Charged,
}

impl From<PowerInfo> for PowerLevel {
    fn from(info: PowerInfo) -> Self {
        match info {
            PowerInfo::Unknown => PowerLevel::Unknown,
            PowerInfo::Wired => PowerLevel::Wired,
            PowerInfo::Discharging(lvl) => PowerLevel::Discharging(lvl),
            PowerInfo::Charging(lvl) => PowerLevel::Charging(lvl),
            PowerInfo::Charged => PowerLevel::Charged,
        }
    }
}

/// One event out of the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// A button press or release, ready for the input mapper.
    Input(RawEvent),
    /// A pad arrived or left (a dropped pad counts as leaving).
    Connection {
        name: String,
        connected: bool,
        power: PowerLevel,
    },
}

/// Last reported sign per d-pad axis of one pad: -1, 0 or +1.
#[derive(Debug, Clone, Copy, Default)]
struct DpadSigns {
    x: i8,
    y: i8,
}

/// Owns the gilrs context and turns its event stream into `BridgeEvent`s.
pub struct Bridge {
    gilrs: Gilrs,
    dpads: HashMap<GamepadId, DpadSigns>,
}

impl Bridge {
    /// Connect to the platform gamepad backend. Default filters stay off
    /// and analog sticks convert to buttons at the 0.75 press / 0.65
    /// release thresholds.
    pub fn new() -> Result<Self, BridgeError> {
        let gilrs = GilrsBuilder::new()
            .with_default_filters(false)
            .set_axis_to_btn(0.75, 0.65)
            .build()
            .map_err(|e| BridgeError::Init(e.to_string()))?;
        debug!("[pad] backend up, {} pad(s) attached", gilrs.gamepads().count());
        Ok(Self {
            gilrs,
            dpads: HashMap::new(),
        })
    }

    /// Names of the currently attached pads.
    pub fn connected_pads(&self) -> Vec<String> {
        self.gilrs
            .gamepads()
            .map(|(_, pad)| pad.name().to_string())
            .collect()
    }

    /// Drain pending device events without blocking.
    pub fn poll(&mut self) -> Vec<BridgeEvent> {
        let mut out = Vec::new();
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    out.push(input(convert_button(button), true));
                }
                EventType::ButtonReleased(button, _) => {
                    out.push(input(convert_button(button), false));
                }
                // analog travel and autorepeat are noise to the mapper
                EventType::ButtonChanged(..) | EventType::ButtonRepeated(..) => {}
                EventType::AxisChanged(axis, value, _) => {
                    self.synthesize_dpad(id, axis, value, &mut out);
                }
                EventType::Connected => {
                    out.push(self.connection(id, true));
                }
                EventType::Disconnected | EventType::Dropped => {
                    self.dpads.remove(&id);
                    out.push(self.connection(id, false));
                }
                _ => {}
            }
        }
        out
    }

    fn connection(&self, id: GamepadId, connected: bool) -> BridgeEvent {
        let pad = self.gilrs.gamepad(id);
        let event = BridgeEvent::Connection {
            name: pad.name().to_string(),
            connected,
            power: pad.power_info().into(),
        };
        debug!("[pad] {:?}", event);
        event
    }

    /// Hat switches that report as axes become button transitions: X
    /// positive is right, negative left; Y positive is down, negative up
    /// (the convention of the pads this was built against).
    fn synthesize_dpad(
        &mut self,
        id: GamepadId,
        axis: Axis,
        value: f32,
        out: &mut Vec<BridgeEvent>,
    ) {
        let signs = self.dpads.entry(id).or_default();
        let new = axis_sign(value);
        match axis {
            Axis::DPadX => {
                if signs.x != new {
                    trace!("[pad] dpad x sign {} -> {}", signs.x, new);
                    out.extend(dpad_transitions(
                        signs.x,
                        new,
                        PadButton::DPadRight,
                        PadButton::DPadLeft,
                    ));
                    signs.x = new;
                }
            }
            Axis::DPadY => {
                if signs.y != new {
                    trace!("[pad] dpad y sign {} -> {}", signs.y, new);
                    out.extend(dpad_transitions(
                        signs.y,
                        new,
                        PadButton::DPadDown,
                        PadButton::DPadUp,
                    ));
                    signs.y = new;
                }
            }
            _ => {}
        }
    }
}

fn input(button: PadButton, pressed: bool) -> BridgeEvent {
    BridgeEvent::Input(RawEvent::Pad { button, pressed })
}

/// Sign of an axis deflection past the threshold: -1, 0 or +1.
fn axis_sign(value: f32) -> i8 {
    if value > DPAD_AXIS_THRESHOLD {
        1
    } else if value < -DPAD_AXIS_THRESHOLD {
        -1
    } else {
        0
    }
}

/// Button transitions for a sign change on one axis: release what was
/// held, press what the pad moved onto. `positive` is the +1 button
/// (right/down), `negative` the -1 button (left/up).
fn dpad_transitions(
    old: i8,
    new: i8,
    positive: PadButton,
    negative: PadButton,
) -> Vec<BridgeEvent> {
    let mut events = Vec::new();
    match old {
        1 => events.push(input(positive, false)),
        -1 => events.push(input(negative, false)),
        _ => {}
    }
    match new {
        1 => events.push(input(positive, true)),
        -1 => events.push(input(negative, true)),
        _ => {}
    }
    events
}

/// Convert a gilrs button to a table button.
fn convert_button(button: Button) -> PadButton {
    match button {
        Button::South => PadButton::South,
        Button::East => PadButton::East,
        Button::North => PadButton::North,
        Button::West => PadButton::West,
        Button::C => PadButton::C,
        Button::Z => PadButton::Z,
        Button::LeftTrigger => PadButton::LeftTrigger,
        Button::LeftTrigger2 => PadButton::LeftTrigger2,
        Button::RightTrigger => PadButton::RightTrigger,
        Button::RightTrigger2 => PadButton::RightTrigger2,
        Button::Select => PadButton::Select,
        Button::Start => PadButton::Start,
        Button::Mode => PadButton::Mode,
        Button::LeftThumb => PadButton::LeftThumb,
        Button::RightThumb => PadButton::RightThumb,
        Button::DPadUp => PadButton::DPadUp,
        Button::DPadDown => PadButton::DPadDown,
        Button::DPadLeft => PadButton::DPadLeft,
        Button::DPadRight => PadButton::DPadRight,
        _ => PadButton::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: PadButton) -> BridgeEvent {
        input(button, true)
    }

    fn release(button: PadButton) -> BridgeEvent {
        input(button, false)
    }

    #[test]
    fn test_axis_sign_thresholds() {
        assert_eq!(axis_sign(1.0), 1);
        assert_eq!(axis_sign(0.51), 1);
        assert_eq!(axis_sign(0.5), 0);
        assert_eq!(axis_sign(0.0), 0);
        assert_eq!(axis_sign(-0.5), 0);
        assert_eq!(axis_sign(-0.51), -1);
        assert_eq!(axis_sign(-1.0), -1);
    }

    #[test]
    fn test_transition_into_zone_presses() {
        let events = dpad_transitions(0, 1, PadButton::DPadRight, PadButton::DPadLeft);
        assert_eq!(events, vec![press(PadButton::DPadRight)]);
    }

    #[test]
    fn test_transition_out_of_zone_releases() {
        let events = dpad_transitions(1, 0, PadButton::DPadRight, PadButton::DPadLeft);
        assert_eq!(events, vec![release(PadButton::DPadRight)]);
    }

    #[test]
    fn test_flip_releases_then_presses() {
        let events = dpad_transitions(-1, 1, PadButton::DPadDown, PadButton::DPadUp);
        assert_eq!(
            events,
            vec![release(PadButton::DPadUp), press(PadButton::DPadDown)]
        );
    }

    #[test]
    fn test_no_change_is_quiet() {
        assert!(dpad_transitions(1, 1, PadButton::DPadRight, PadButton::DPadLeft).is_empty());
        assert!(dpad_transitions(0, 0, PadButton::DPadRight, PadButton::DPadLeft).is_empty());
    }

    #[test]
    fn test_button_conversion_covers_dpad_and_face() {
        assert_eq!(convert_button(Button::DPadUp), PadButton::DPadUp);
        assert_eq!(convert_button(Button::South), PadButton::South);
        assert_eq!(convert_button(Button::East), PadButton::East);
        assert_eq!(convert_button(Button::RightTrigger), PadButton::RightTrigger);
        assert_eq!(convert_button(Button::Unknown), PadButton::Unknown);
    }
}
