//! Camera Orbit Controller
//!
//! Third-person follow camera on a sphere around the unit. Pointer drags move
//! the target angles; every tick the current angles close a fixed fraction of
//! the gap to their targets.
//!
//! # Coordinates
//!
//! - `theta`: yaw around the unit; 0 puts the camera on the unit's +Z side
//! - `phi`: pitch above the horizon, kept within `[min_phi, max_phi]`
//!
//! Eye position:
//!
//! ```text
//! eye = unit + (sin θ cos φ, sin φ, cos θ cos φ) * distance + (0, eye_height, 0)
//! ```

use glam::Vec3;

use crate::config::{CameraConfig, SmoothingMode};
use crate::player::wrap_angle;

/// Smoothed spherical camera offset around the unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraOrbit {
    /// Current yaw (radians)
    pub theta: f32,
    /// Current pitch (radians)
    pub phi: f32,
    target_theta: f32,
    target_phi: f32,
    distance: f32,
    config: CameraConfig,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraOrbit {
    pub fn new(config: CameraConfig) -> Self {
        let phi = config.initial_phi.clamp(config.min_phi, config.max_phi);
        Self {
            theta: config.initial_theta,
            phi,
            target_theta: config.initial_theta,
            target_phi: phi,
            distance: config.distance,
            config,
        }
    }

    pub fn target_theta(&self) -> f32 {
        self.target_theta
    }

    pub fn target_phi(&self) -> f32 {
        self.target_phi
    }

    /// Orbit radius chosen on the last update.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Apply a pointer drag in pixels. Dragging right orbits left; dragging
    /// down raises the camera.
    pub fn handle_drag(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let cfg = &self.config;
        self.target_theta -= dx * cfg.drag_sensitivity;
        self.target_phi =
            (self.target_phi + dy * cfg.drag_sensitivity).clamp(cfg.min_phi, cfg.max_phi);
    }

    /// Swing behind the unit and restore the default pitch.
    ///
    /// The yaw target is taken the short way round from the current yaw, so a
    /// recenter never spins through extra turns accumulated by dragging.
    pub fn recenter(&mut self, heading: f32) {
        let behind = heading + std::f32::consts::PI;
        self.target_theta = self.theta + wrap_angle(behind - self.theta);
        self.target_phi = self
            .config
            .recenter_phi
            .clamp(self.config.min_phi, self.config.max_phi);
    }

    /// Move the angles toward their targets and pick the orbit distance.
    pub fn update(&mut self, delta: f32, running: bool, smoothing: SmoothingMode) {
        let k = smoothing.factor(self.config.follow_factor, delta);
        self.theta += (self.target_theta - self.theta) * k;
        self.phi += (self.target_phi - self.phi) * k;
        self.distance = if running {
            self.config.run_distance
        } else {
            self.config.distance
        };
    }

    /// Unit offset from the look target toward the eye.
    pub fn direction(&self) -> Vec3 {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (sin_p, cos_p) = self.phi.sin_cos();
        Vec3::new(sin_t * cos_p, sin_p, cos_t * cos_p)
    }

    /// Camera position for a unit standing at `unit_position`.
    pub fn eye(&self, unit_position: Vec3) -> Vec3 {
        self.look_target(unit_position) + self.direction() * self.distance
    }

    /// Point the camera looks at.
    pub fn look_target(&self, unit_position: Vec3) -> Vec3 {
        unit_position + Vec3::new(0.0, self.config.eye_height, 0.0)
    }
}
