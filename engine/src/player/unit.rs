//! Controlled unit state
//!
//! Position, velocity, heading and grounded flag of the player character,
//! plus the capsule it occupies. The capsule is always derived from the
//! current position and never stored.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::CollisionConfig;

/// Vertical capsule occupied by the unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    /// Centre of the lower hemisphere
    pub start: Vec3,
    /// Centre of the upper hemisphere
    pub end: Vec3,
    pub radius: f32,
}

/// The player-controlled humanoid.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Feet position in world space
    pub position: Vec3,
    /// World-space velocity (units/s)
    pub velocity: Vec3,
    /// Yaw in radians; 0 faces +Z
    pub heading: f32,
    /// Whether the unit stands on the floor
    pub is_grounded: bool,
    radius: f32,
    height: f32,
}

impl Unit {
    /// Spawn a grounded, motionless unit.
    pub fn new(position: Vec3, collision: &CollisionConfig) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            heading: 0.0,
            is_grounded: true,
            radius: collision.radius,
            height: collision.height,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Capsule endpoints for the current position.
    pub fn capsule(&self) -> Capsule {
        Capsule {
            start: self.position + Vec3::new(0.0, self.radius, 0.0),
            end: self.position + Vec3::new(0.0, self.height - self.radius, 0.0),
            radius: self.radius,
        }
    }

    /// Speed in the XZ plane.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    /// Unit vector the unit is facing, in the XZ plane.
    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.heading.sin(), 0.0, self.heading.cos())
    }

    /// True when every component of the kinematic state is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.heading.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unit_is_grounded_and_still() {
        let unit = Unit::new(Vec3::new(1.0, 0.0, 2.0), &CollisionConfig::default());
        assert!(unit.is_grounded);
        assert_eq!(unit.velocity, Vec3::ZERO);
        assert_eq!(unit.radius(), 0.5);
        assert_eq!(unit.height(), 1.6);
    }

    #[test]
    fn test_capsule_follows_position() {
        let mut unit = Unit::new(Vec3::ZERO, &CollisionConfig::default());
        let capsule = unit.capsule();
        assert_eq!(capsule.start, Vec3::new(0.0, 0.5, 0.0));
        assert!((capsule.end.y - 1.1).abs() < 1e-6);

        unit.position = Vec3::new(3.0, 2.0, -1.0);
        let moved = unit.capsule();
        assert_eq!(moved.start, Vec3::new(3.0, 2.5, -1.0));
        assert!((moved.end - Vec3::new(3.0, 3.1, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_horizontal_speed_ignores_vertical() {
        let mut unit = Unit::new(Vec3::ZERO, &CollisionConfig::default());
        unit.velocity = Vec3::new(3.0, 10.0, 4.0);
        assert!((unit.horizontal_speed() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_facing_from_heading() {
        let mut unit = Unit::new(Vec3::ZERO, &CollisionConfig::default());
        assert!((unit.facing() - Vec3::Z).length() < 1e-6);
        unit.heading = std::f32::consts::FRAC_PI_2;
        assert!((unit.facing() - Vec3::X).length() < 1e-6);
    }
}
