//! Gilrs-based gamepad backend
//!
//! Tracks connected gamepads through gilrs events and reports the first one
//! in the standard browser layout expected by [`GamepadSnapshot`].

use gilrs::{Axis, Button, GamepadId, Gilrs};

use super::gamepad::{GamepadSnapshot, GamepadSource};

/// Standard layout: face buttons, shoulders, triggers, select/start, stick
/// presses, d-pad, mode. Index in this table is the snapshot button index.
const STANDARD_BUTTONS: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

/// Gamepad source backed by gilrs.
pub struct GilrsSource {
    gilrs: Gilrs,
    /// First gamepad seen connected, in connection order
    active: Option<GamepadId>,
}

impl GilrsSource {
    /// Initialize gilrs and pick up already-connected gamepads.
    pub fn new() -> Result<Self, gilrs::Error> {
        let gilrs = Gilrs::new()?;
        tracing::info!("gilrs gamepad backend initialized");
        let mut source = Self {
            gilrs,
            active: None,
        };
        source.refresh();
        Ok(source)
    }

    fn refresh(&mut self) {
        let previous = self.active;
        self.active = self
            .gilrs
            .gamepads()
            .find(|(_, gamepad)| gamepad.is_connected())
            .map(|(id, _)| id);
        if self.active != previous {
            match self.active {
                Some(id) => tracing::info!(
                    name = self.gilrs.gamepad(id).name(),
                    "gamepad connected"
                ),
                None => tracing::info!("gamepad disconnected"),
            }
        }
    }
}

impl GamepadSource for GilrsSource {
    fn poll(&mut self) -> Option<GamepadSnapshot> {
        let mut topology_changed = false;
        while let Some(event) = self.gilrs.next_event() {
            if matches!(
                event.event,
                gilrs::EventType::Connected | gilrs::EventType::Disconnected
            ) {
                topology_changed = true;
            }
        }
        if topology_changed {
            self.refresh();
        }

        let gamepad = self.gilrs.gamepad(self.active?);
        if !gamepad.is_connected() {
            return None;
        }

        // gilrs sticks are +Y up; the standard layout is +Y down.
        let axes = vec![
            gamepad.value(Axis::LeftStickX),
            -gamepad.value(Axis::LeftStickY),
            gamepad.value(Axis::RightStickX),
            -gamepad.value(Axis::RightStickY),
        ];
        let buttons = STANDARD_BUTTONS
            .iter()
            .map(|button| gamepad.is_pressed(*button))
            .collect();

        Some(GamepadSnapshot { axes, buttons })
    }
}
