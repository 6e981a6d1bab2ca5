//! Keyboard Input Module
//!
//! Contains the per-tick control flags and the fixed keyboard mapping that
//! writes them. Decoupled from winit to use generic key codes.

use serde::{Deserialize, Serialize};

/// Generic key codes for character control, independent of windowing system.
///
/// Only keys the controller reacts to are named; everything else arrives as
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    R,
    Space,
    ShiftLeft,
    ShiftRight,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Control flags sampled once per simulation tick.
///
/// `jump` and `reset_camera` are pulses: whoever sets them is responsible for
/// clearing them again (see [`ControlState::clear_pulses`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    /// W / ArrowUp
    pub forward: bool,
    /// S / ArrowDown
    pub backward: bool,
    /// A / ArrowLeft
    pub left: bool,
    /// D / ArrowRight
    pub right: bool,
    /// Space
    pub jump: bool,
    /// Shift
    pub run: bool,
    /// R - snap the camera behind the unit
    pub reset_camera: bool,
}

impl ControlState {
    /// Create a new control state with every flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update control flags from a key press or release.
    ///
    /// Returns `true` if the key is mapped, `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W | KeyCode::ArrowUp => self.forward = pressed,
            KeyCode::S | KeyCode::ArrowDown => self.backward = pressed,
            KeyCode::A | KeyCode::ArrowLeft => self.left = pressed,
            KeyCode::D | KeyCode::ArrowRight => self.right = pressed,
            KeyCode::Space => self.jump = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.run = pressed,
            KeyCode::R => self.reset_camera = pressed,
            KeyCode::Escape | KeyCode::Unknown => return false,
        }
        true
    }

    /// Check if any direction flag is set.
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Forward/backward direction (-1, 0, or 1). Forward is positive.
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Left/right direction (-1, 0, or 1). Right is positive.
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }

    /// Clear the edge-triggered flags after they have been consumed.
    pub fn clear_pulses(&mut self) {
        self.jump = false;
        self.reset_camera = false;
    }

    /// Release every flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
