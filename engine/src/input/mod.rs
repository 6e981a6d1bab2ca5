//! Input Module
//!
//! Fuses keyboard flags, the virtual joystick and a polled gamepad into one
//! [`InputSnapshot`] per simulation tick. The module is decoupled from any
//! windowing system; hosts translate their events into [`KeyCode`]s and
//! [`JoystickState`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use orbit_walker_engine::input::{InputAggregator, KeyCode};
//!
//! let mut input = InputAggregator::new();
//! input.handle_key(KeyCode::W, true);
//!
//! // Once per tick:
//! let snapshot = input.sample();
//! assert!(snapshot.controls.forward);
//! ```

pub mod gamepad;
#[cfg(feature = "gilrs")]
pub mod gilrs_backend;
pub mod joystick;
pub mod keyboard;

pub use gamepad::{GamepadSnapshot, GamepadSource, NoGamepad, create_gamepad_source};
pub use joystick::JoystickState;
pub use keyboard::{ControlState, KeyCode};

use crate::config::GamepadBindings;

/// Control flags and joystick state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub controls: ControlState,
    pub joystick: JoystickState,
}

/// Owns the shared control record written by every input source.
///
/// The host creates one aggregator and threads it through its event handlers
/// and its tick; there is no global input state.
pub struct InputAggregator {
    controls: ControlState,
    joystick: JoystickState,
    gamepad: Box<dyn GamepadSource>,
    bindings: GamepadBindings,
    gamepad_connected: bool,
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAggregator {
    /// Aggregator without gamepad support.
    pub fn new() -> Self {
        Self::with_gamepad(Box::new(NoGamepad), GamepadBindings::default())
    }

    /// Aggregator polling the given gamepad backend each tick.
    pub fn with_gamepad(gamepad: Box<dyn GamepadSource>, bindings: GamepadBindings) -> Self {
        Self {
            controls: ControlState::default(),
            joystick: JoystickState::default(),
            gamepad,
            bindings,
            gamepad_connected: false,
        }
    }

    /// Forward a key press or release. Returns `true` if the key is mapped.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        self.controls.handle_key(key, pressed)
    }

    /// Replace the joystick state reported by the touch widget.
    pub fn set_joystick(&mut self, joystick: JoystickState) {
        self.joystick = joystick;
    }

    /// Mutable access for hosts that drive flags directly (on-screen buttons).
    pub fn controls_mut(&mut self) -> &mut ControlState {
        &mut self.controls
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// Whether the last poll found a gamepad.
    pub fn gamepad_connected(&self) -> bool {
        self.gamepad_connected
    }

    /// Poll the gamepad and return this tick's snapshot.
    ///
    /// A connected gamepad overwrites the mapped control flags. Without one
    /// the keyboard flags pass through untouched.
    pub fn sample(&mut self) -> InputSnapshot {
        match self.gamepad.poll() {
            Some(pad) => {
                pad.apply_to(&mut self.controls, &self.bindings);
                self.gamepad_connected = true;
            }
            None => self.gamepad_connected = false,
        }
        InputSnapshot {
            controls: self.controls,
            joystick: self.joystick,
        }
    }

    /// Clear the jump and recenter pulses after a tick consumed them.
    pub fn clear_pulses(&mut self) {
        self.controls.clear_pulses();
    }

    /// Release every flag and the joystick (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.controls.reset();
        self.joystick.release();
    }
}
