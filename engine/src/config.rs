//! Controller Configuration
//!
//! Centralized tuning values for locomotion, collision, animation selection,
//! camera orbit and gamepad mapping. `Default` returns the stock character
//! feel; a JSON file may override any subset of fields.
//!
//! # Example
//!
//! ```rust,ignore
//! use orbit_walker_engine::config::ControllerConfig;
//!
//! let config = ControllerConfig::load("walker.json")?;
//! assert!(config.locomotion.run_speed > config.locomotion.walk_speed);
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// How per-tick blend factors are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Apply the factor once per tick regardless of frame time.
    #[default]
    PerTick,
    /// Rescale the factor so convergence speed is independent of frame time.
    /// At `reference_hz` the result equals the per-tick factor.
    TimeCorrected { reference_hz: f32 },
}

impl SmoothingMode {
    /// Effective blend factor for a tick of length `delta`.
    pub fn factor(self, per_tick: f32, delta: f32) -> f32 {
        match self {
            SmoothingMode::PerTick => per_tick,
            SmoothingMode::TimeCorrected { reference_hz } => {
                let retained = (1.0 - per_tick).clamp(0.0, 1.0);
                1.0 - retained.powf(delta.max(0.0) * reference_hz)
            }
        }
    }
}

/// Planar movement, turning, jumping and gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Target speed without the run flag (units/s)
    pub walk_speed: f32,
    /// Target speed with the run flag (units/s)
    pub run_speed: f32,
    /// Fraction of the remaining yaw error removed per tick
    pub turn_factor: f32,
    /// Fraction of the remaining velocity error removed per tick
    pub velocity_blend: f32,
    /// Intent magnitudes at or below this are treated as no input
    pub input_deadzone: f32,
    /// Vertical velocity set by a jump impulse (units/s)
    pub jump_velocity: f32,
    /// Downward acceleration while airborne (units/s^2)
    pub gravity: f32,
    /// Upper bound applied to the frame delta before integration (s)
    pub max_delta: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            run_speed: 12.0,
            turn_factor: 0.15,
            velocity_blend: 0.15,
            input_deadzone: 0.05,
            jump_velocity: 13.0,
            gravity: 32.0,
            max_delta: 0.1,
        }
    }
}

/// Capsule dimensions and static world geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Capsule radius (units)
    pub radius: f32,
    /// Capsule height, feet to crown (units)
    pub height: f32,
    /// Height of the floor plane
    pub floor_y: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.6,
            floor_y: 0.0,
        }
    }
}

/// Speed thresholds, crossfade timing and the stock clip names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Horizontal speed above which the unit counts as walking
    pub walk_threshold: f32,
    /// Horizontal speed above which the unit counts as running
    pub run_threshold: f32,
    /// Crossfade duration in seconds
    pub crossfade: f32,
    pub idle_clip: String,
    pub walk_clip: String,
    pub run_clip: String,
    pub jump_clip: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            walk_threshold: 0.5,
            run_threshold: 7.0,
            crossfade: 0.2,
            idle_clip: "Idle".to_string(),
            walk_clip: "Walking".to_string(),
            run_clip: "Running".to_string(),
            jump_clip: "Jump".to_string(),
        }
    }
}

/// Orbit camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians of orbit per pixel of drag
    pub drag_sensitivity: f32,
    /// Lowest allowed pitch (radians)
    pub min_phi: f32,
    /// Highest allowed pitch (radians)
    pub max_phi: f32,
    /// Fraction of the remaining angle error removed per tick
    pub follow_factor: f32,
    /// Orbit distance while walking or idle
    pub distance: f32,
    /// Orbit distance while the run flag is held
    pub run_distance: f32,
    /// Vertical offset of the eye and look target above the unit's feet
    pub eye_height: f32,
    /// Pitch restored by a recenter
    pub recenter_phi: f32,
    /// Initial yaw
    pub initial_theta: f32,
    /// Initial pitch
    pub initial_phi: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.008,
            min_phi: -0.2,
            max_phi: 1.3,
            follow_factor: 0.1,
            distance: 7.0,
            run_distance: 8.5,
            eye_height: 1.8,
            recenter_phi: 0.3,
            initial_theta: 0.0,
            initial_phi: 0.3,
        }
    }
}

/// Standard-layout gamepad mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadBindings {
    /// Stick deflection required before an axis counts as pressed
    pub deadzone: f32,
    /// Left stick horizontal axis index
    pub move_x_axis: usize,
    /// Left stick vertical axis index (positive = down)
    pub move_y_axis: usize,
    pub jump_button: usize,
    pub run_button: usize,
    pub reset_camera_button: usize,
}

impl Default for GamepadBindings {
    fn default() -> Self {
        Self {
            deadzone: 0.15,
            move_x_axis: 0,
            move_y_axis: 1,
            jump_button: 0,
            run_button: 10,
            reset_camera_button: 3,
        }
    }
}

/// Complete controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub locomotion: LocomotionConfig,
    pub collision: CollisionConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub gamepad: GamepadBindings,
    pub smoothing: SmoothingMode,
    /// Where the first character appears
    pub spawn_position: Vec3,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            collision: CollisionConfig::default(),
            animation: AnimationConfig::default(),
            camera: CameraConfig::default(),
            gamepad: GamepadBindings::default(),
            smoothing: SmoothingMode::default(),
            spawn_position: Vec3::ZERO,
        }
    }
}

impl ControllerConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.as_ref().display(), "loaded controller config");
        Ok(config)
    }

    /// Reject values that would break integration or collision.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.collision;
        if !(c.radius > 0.0) || !(c.height > 2.0 * c.radius) {
            return Err(ConfigError::Invalid(format!(
                "capsule needs radius > 0 and height > 2 * radius (radius {}, height {})",
                c.radius, c.height
            )));
        }
        let l = &self.locomotion;
        if !(l.max_delta > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_delta must be positive, got {}",
                l.max_delta
            )));
        }
        for (name, factor) in [
            ("turn_factor", l.turn_factor),
            ("velocity_blend", l.velocity_blend),
            ("follow_factor", self.camera.follow_factor),
        ] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must lie in [0, 1], got {factor}"
                )));
            }
        }
        let cam = &self.camera;
        if !(cam.distance > 0.0) || !(cam.run_distance > 0.0) {
            return Err(ConfigError::Invalid("camera distances must be positive".into()));
        }
        if cam.min_phi > cam.max_phi {
            return Err(ConfigError::Invalid(format!(
                "camera pitch range is inverted ({} > {})",
                cam.min_phi, cam.max_phi
            )));
        }
        if let SmoothingMode::TimeCorrected { reference_hz } = self.smoothing {
            if !(reference_hz > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "reference_hz must be positive, got {reference_hz}"
                )));
            }
        }
        Ok(())
    }
}
