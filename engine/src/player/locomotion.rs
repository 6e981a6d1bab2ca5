//! Locomotion Integrator
//!
//! Turns a control snapshot and the camera yaw into unit motion for one tick.
//! Movement direction is relative to the camera's facing direction.
//!
//! # Motion Model
//!
//! - Walk speed: 6.0 units/s, run speed: 12.0 units/s
//! - Horizontal velocity closes 15% of the gap to its target each tick
//! - Heading turns 15% of the shortest remaining angle each tick
//! - Jump: one-shot vertical impulse of 13.0 units/s
//! - Gravity: 32.0 units/s^2 while airborne, no terminal velocity
//!
//! The position produced here is unconstrained; the collision resolver runs
//! after it in the same tick.
//!
//! # Usage
//!
//! ```rust,ignore
//! use orbit_walker_engine::player::{LocomotionIntegrator, Unit};
//!
//! let integrator = LocomotionIntegrator::new(config.locomotion, config.smoothing);
//!
//! // Each frame:
//! let step = integrator.step(&mut unit, &input, camera.theta, delta_time);
//! resolver.resolve(&mut unit, &obstacles, &mut on_land);
//! ```

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::config::{LocomotionConfig, SmoothingMode};
use crate::input::InputSnapshot;

use super::Unit;

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Camera-relative (forward, right) basis on the XZ plane.
///
/// The camera sits at yaw `theta` around the unit looking inward, so forward
/// points away from the camera: theta = 0 gives forward = -Z, right = +X.
pub fn camera_basis(theta: f32) -> (Vec3, Vec3) {
    let (sin, cos) = theta.sin_cos();
    let forward = Vec3::new(-sin, 0.0, -cos);
    let right = Vec3::new(cos, 0.0, -sin);
    (forward, right)
}

/// Raw planar intent: x = strafe right, y = forward. Magnitude clamped to 1.
///
/// An active joystick replaces the digital direction; its vertical axis is
/// inverted because pushing the stick up reads as negative.
pub fn move_intent(input: &InputSnapshot) -> Vec2 {
    let raw = if input.joystick.active {
        Vec2::new(input.joystick.x, -input.joystick.y)
    } else {
        Vec2::new(
            input.controls.right_axis() as f32,
            input.controls.forward_axis() as f32,
        )
    };
    if raw.is_finite() {
        raw.clamp_length_max(1.0)
    } else {
        Vec2::ZERO
    }
}

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
    /// A jump impulse fired this tick
    pub jumped: bool,
    /// Clamped input magnitude used this tick
    pub intent: f32,
}

/// Integrates control input into unit velocity, heading and position.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionIntegrator {
    config: LocomotionConfig,
    smoothing: SmoothingMode,
}

impl LocomotionIntegrator {
    pub fn new(config: LocomotionConfig, smoothing: SmoothingMode) -> Self {
        Self { config, smoothing }
    }

    /// Advance the unit by one tick.
    ///
    /// # Arguments
    /// * `unit` - Unit to move; position is left unconstrained
    /// * `input` - Control flags and joystick for this tick
    /// * `camera_theta` - Current camera orbit yaw
    /// * `delta` - Elapsed seconds, clamped to `[0, max_delta]`
    pub fn step(
        &self,
        unit: &mut Unit,
        input: &InputSnapshot,
        camera_theta: f32,
        delta: f32,
    ) -> LocomotionStep {
        let cfg = &self.config;
        let delta = if delta.is_finite() {
            delta.clamp(0.0, cfg.max_delta)
        } else {
            0.0
        };

        let intent = move_intent(input);
        let magnitude = intent.length();
        let blend = self.smoothing.factor(cfg.velocity_blend, delta);

        if magnitude > cfg.input_deadzone {
            let (forward, right) = camera_basis(camera_theta);
            // Non-zero: magnitude is above the deadzone and the basis is orthonormal
            let move_dir = (forward * intent.y + right * intent.x).normalize_or_zero();
            let speed = if input.controls.run {
                cfg.run_speed
            } else {
                cfg.walk_speed
            };

            let target_yaw = move_dir.x.atan2(move_dir.z);
            let turn = wrap_angle(target_yaw - unit.heading);
            let turn_factor = self.smoothing.factor(cfg.turn_factor, delta);
            unit.heading = wrap_angle(unit.heading + turn * turn_factor);

            let target = move_dir * magnitude * speed;
            unit.velocity.x += (target.x - unit.velocity.x) * blend;
            unit.velocity.z += (target.z - unit.velocity.z) * blend;
        } else {
            unit.velocity.x -= unit.velocity.x * blend;
            unit.velocity.z -= unit.velocity.z * blend;
        }

        let mut jumped = false;
        if unit.is_grounded {
            if input.controls.jump {
                unit.velocity.y = cfg.jump_velocity;
                unit.is_grounded = false;
                jumped = true;
            } else {
                unit.velocity.y = 0.0;
            }
        } else {
            unit.velocity.y -= cfg.gravity * delta;
        }

        unit.position += unit.velocity * delta;

        LocomotionStep {
            jumped,
            intent: magnitude,
        }
    }
}
