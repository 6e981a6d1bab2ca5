//! Gamepad polling and flag mapping
//!
//! Gamepads are read through the [`GamepadSource`] trait so the controller
//! does not depend on any particular backend. Snapshots use the standard
//! browser layout: axis 0/1 are the left stick (+Y down), button 0 is the
//! bottom face button, 3 the top face button, 10 the left stick press.

use crate::config::GamepadBindings;

use super::ControlState;

/// Raw state of one gamepad at poll time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// Analog axes in [-1, 1]
    pub axes: Vec<f32>,
    /// Digital buttons, `true` while held
    pub buttons: Vec<bool>,
}

impl GamepadSnapshot {
    /// Snapshot with every axis centred and every button released.
    pub fn neutral(axis_count: usize, button_count: usize) -> Self {
        Self {
            axes: vec![0.0; axis_count],
            buttons: vec![false; button_count],
        }
    }

    /// Axis value, 0.0 when the device does not expose that index.
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Button state, released when the device does not expose that index.
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Overwrite the control flags from this snapshot.
    ///
    /// Every mapped flag is written, so a connected gamepad replaces whatever
    /// the keyboard set for those flags this tick.
    pub fn apply_to(&self, controls: &mut ControlState, bindings: &GamepadBindings) {
        let x = self.axis(bindings.move_x_axis);
        let y = self.axis(bindings.move_y_axis);
        let dz = bindings.deadzone;

        controls.forward = y < -dz;
        controls.backward = y > dz;
        controls.left = x < -dz;
        controls.right = x > dz;
        controls.jump = self.button(bindings.jump_button);
        controls.run = self.button(bindings.run_button);
        controls.reset_camera = self.button(bindings.reset_camera_button);
    }
}

/// Platform backend that can be polled for the first connected gamepad.
pub trait GamepadSource {
    /// Pump pending device events and return the current state of the first
    /// connected gamepad, or `None` when no gamepad is connected.
    fn poll(&mut self) -> Option<GamepadSnapshot>;
}

/// Backend used when no gamepad support is compiled in or available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGamepad;

impl GamepadSource for NoGamepad {
    fn poll(&mut self) -> Option<GamepadSnapshot> {
        None
    }
}

/// Create the default gamepad backend based on enabled features.
#[cfg(feature = "gilrs")]
pub fn create_gamepad_source() -> Box<dyn GamepadSource> {
    match super::gilrs_backend::GilrsSource::new() {
        Ok(source) => Box::new(source),
        Err(e) => {
            tracing::warn!(error = %e, "gilrs unavailable, gamepad input disabled");
            Box::new(NoGamepad)
        }
    }
}

/// Create the default gamepad backend (polling is a no-op without `gilrs`).
#[cfg(not(feature = "gilrs"))]
pub fn create_gamepad_source() -> Box<dyn GamepadSource> {
    Box::new(NoGamepad)
}
