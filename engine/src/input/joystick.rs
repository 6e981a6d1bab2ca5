//! Virtual Joystick
//!
//! Analog movement from an on-screen touch stick. The widget itself (pointer
//! capture, drawing) lives in the host; this is the normalized state it feeds in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Normalized virtual joystick deflection.
///
/// Screen convention: `y` is positive when the stick is pulled down (toward the
/// user). Only meaningful while `active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JoystickState {
    /// Horizontal deflection in [-1, 1]
    pub x: f32,
    /// Vertical deflection in [-1, 1], positive = down
    pub y: f32,
    /// Whether a finger currently holds the stick
    pub active: bool,
}

impl JoystickState {
    /// Released stick.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from the knob's pixel offset relative to the stick base.
    ///
    /// The offset is scaled by `max_radius` and its length clamped to 1 so a
    /// finger dragged past the rim saturates instead of overshooting.
    pub fn from_drag(offset: Vec2, max_radius: f32) -> Self {
        if !(max_radius > 0.0) || !offset.is_finite() {
            return Self::default();
        }
        let axes = (offset / max_radius).clamp_length_max(1.0);
        Self {
            x: axes.x,
            y: axes.y,
            active: true,
        }
    }

    /// Release the stick and zero its axes.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    /// Deflection as a vector, zero when inactive.
    pub fn axes(&self) -> Vec2 {
        if self.active {
            Vec2::new(self.x, self.y)
        } else {
            Vec2::ZERO
        }
    }
}
