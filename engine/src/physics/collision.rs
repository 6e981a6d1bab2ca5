//! Collision resolution module
//!
//! Corrects the integrated unit position against the floor plane and static
//! axis-aligned box obstacles.
//!
//! # Model
//!
//! The unit is approximated as a sphere of `radius` at its feet position.
//! Each obstacle is tested independently in list order:
//!
//! 1. Broad phase: skip boxes that do not touch a sphere of radius `height`
//!    around the unit.
//! 2. Narrow phase: clamp the position into the box to get the closest point;
//!    if it is nearer than `radius`, push the unit out along the separating
//!    normal and remove the velocity component along that normal.
//! 3. Floor guard: no push leaves the unit below the floor.
//!
//! There is no iteration across obstacles, so two boxes meeting at a corner
//! can leave a small residual penetration.
//!
//! # Example
//!
//! ```ignore
//! use orbit_walker_engine::physics::{CollisionResolver, Obstacle};
//! use glam::Vec3;
//!
//! let crate_box = Obstacle::new(Vec3::new(2.0, 0.0, -1.0), Vec3::new(4.0, 2.0, 1.0))?;
//! let resolver = CollisionResolver::new(0.0);
//! let report = resolver.resolve(&mut unit, &[crate_box], &mut |at| spawn_dust(at));
//! ```

use glam::Vec3;
use thiserror::Error;

use crate::player::Unit;

/// Penetrations shallower than this are treated as resting contact.
pub const CONTACT_EPSILON: f32 = 1e-5;

/// Below this separation the unit centre counts as inside the box.
const INSIDE_EPSILON: f32 = 1e-6;

/// Reasons an obstacle box is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ObstacleError {
    #[error("obstacle bounds must be finite")]
    NonFinite,

    #[error("obstacle min corner exceeds max corner")]
    Inverted,
}

/// Static axis-aligned box collider. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    min: Vec3,
    max: Vec3,
}

impl Obstacle {
    /// Build a box from its world-space corners.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, ObstacleError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ObstacleError::NonFinite);
        }
        if min.cmpgt(max).any() {
            return Err(ObstacleError::Inverted);
        }
        Ok(Self { min, max })
    }

    /// Build a box from its centre and half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Result<Self, ObstacleError> {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Closest point of the box to `point` (the point itself when inside).
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Whether the sphere touches or overlaps the box.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Outward normal of the face nearest to an interior point, and the
    /// distance to that face.
    ///
    /// The underside is only a candidate when it sits at or above
    /// `min_underside`; below that, leaving downward would sink the unit
    /// through the floor.
    pub fn exit_face(&self, point: Vec3, min_underside: f32) -> (Vec3, f32) {
        let underside = if self.min.y >= min_underside {
            point.y - self.min.y
        } else {
            f32::INFINITY
        };
        let candidates = [
            (Vec3::NEG_X, point.x - self.min.x),
            (Vec3::X, self.max.x - point.x),
            (Vec3::NEG_Y, underside),
            (Vec3::Y, self.max.y - point.y),
            (Vec3::NEG_Z, point.z - self.min.z),
            (Vec3::Z, self.max.z - point.z),
        ];
        candidates
            .into_iter()
            .fold((Vec3::Y, f32::INFINITY), |best, candidate| {
                if candidate.1 < best.1 { candidate } else { best }
            })
    }
}

/// One obstacle contact resolved this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the obstacle in the list passed to `resolve`
    pub obstacle: usize,
    /// Outward separating normal
    pub normal: Vec3,
    /// Distance the unit was pushed
    pub depth: f32,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactReport {
    /// The unit touched the floor after being airborne
    pub landed: bool,
    /// Obstacles that survived the broad phase
    pub candidates: usize,
    pub contacts: Vec<Contact>,
}

/// Resolves unit penetration against the floor and box obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    floor_y: f32,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl CollisionResolver {
    pub fn new(floor_y: f32) -> Self {
        Self { floor_y }
    }

    /// Constrain the unit for this tick.
    ///
    /// `on_land` is invoked with the landing position exactly once when the
    /// unit reaches the floor after being airborne. The floor is the only
    /// source of ground contact, and no obstacle push leaves the unit below
    /// it.
    pub fn resolve(
        &self,
        unit: &mut Unit,
        obstacles: &[Obstacle],
        on_land: &mut dyn FnMut(Vec3),
    ) -> ContactReport {
        let mut report = ContactReport {
            landed: self.resolve_floor(unit),
            ..Default::default()
        };
        if report.landed {
            on_land(unit.position);
        }

        let radius = unit.radius();
        let broad_radius = unit.height();
        for (index, obstacle) in obstacles.iter().enumerate() {
            if !obstacle.intersects_sphere(unit.position, broad_radius) {
                continue;
            }
            report.candidates += 1;

            let closest = obstacle.closest_point(unit.position);
            let offset = unit.position - closest;
            let distance = offset.length();
            if distance + CONTACT_EPSILON >= radius {
                continue;
            }

            let (normal, depth) = if distance > INSIDE_EPSILON {
                (offset / distance, radius - distance)
            } else {
                let (normal, to_face) =
                    obstacle.exit_face(unit.position, self.floor_y + radius);
                (normal, to_face + radius)
            };

            unit.position += normal * depth;
            unit.velocity -= normal * unit.velocity.dot(normal);
            report.contacts.push(Contact {
                obstacle: index,
                normal,
                depth,
            });
        }

        self.keep_above_floor(unit);
        report
    }

    /// Undo any obstacle push that ended under the floor.
    fn keep_above_floor(&self, unit: &mut Unit) {
        if unit.position.y < self.floor_y {
            unit.position.y = self.floor_y;
            unit.velocity.y = unit.velocity.y.max(0.0);
        }
    }

    /// Apply the floor rule. Returns `true` on a landing transition.
    fn resolve_floor(&self, unit: &mut Unit) -> bool {
        if unit.position.y > self.floor_y {
            unit.is_grounded = false;
            return false;
        }

        unit.position.y = self.floor_y;
        if unit.velocity.y > 0.0 {
            // Jump impulse this tick has not lifted off yet
            return false;
        }
        unit.velocity.y = 0.0;
        let landed = !unit.is_grounded;
        unit.is_grounded = true;
        landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollisionConfig;

    fn unit_at(position: Vec3) -> Unit {
        Unit::new(position, &CollisionConfig::default())
    }

    fn wall() -> Obstacle {
        Obstacle::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0)).unwrap()
    }

    #[test]
    fn test_obstacle_rejects_bad_bounds() {
        assert_eq!(
            Obstacle::new(Vec3::ONE, Vec3::ZERO),
            Err(ObstacleError::Inverted)
        );
        assert_eq!(
            Obstacle::new(Vec3::ZERO, Vec3::new(f32::NAN, 1.0, 1.0)),
            Err(ObstacleError::NonFinite)
        );
        assert!(Obstacle::new(Vec3::ZERO, Vec3::ZERO).is_ok());
    }

    #[test]
    fn test_from_center() {
        let obstacle = Obstacle::from_center(Vec3::new(2.0, 1.0, 0.0), Vec3::splat(0.5)).unwrap();
        assert_eq!(obstacle.min(), Vec3::new(1.5, 0.5, -0.5));
        assert_eq!(obstacle.max(), Vec3::new(2.5, 1.5, 0.5));
    }

    #[test]
    fn test_sphere_intersection() {
        let obstacle = wall();
        assert!(obstacle.intersects_sphere(Vec3::new(2.0, 1.0, 0.0), 1.0));
        assert!(!obstacle.intersects_sphere(Vec3::new(2.5, 1.0, 0.0), 1.0));
        assert!(obstacle.contains(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_exit_face_picks_nearest() {
        let (normal, depth) = wall().exit_face(Vec3::new(0.8, 1.0, 0.0), 0.5);
        assert_eq!(normal, Vec3::X);
        assert!((depth - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_exit_face_skips_underside_near_floor() {
        // Feet on the floor inside a floor-resting box
        let (normal, depth) = wall().exit_face(Vec3::new(0.2, 0.0, 0.3), 0.5);
        assert_eq!(normal, Vec3::Z);
        assert!((depth - 0.7).abs() < 1e-6);

        let raised = Obstacle::new(Vec3::new(-1.0, 2.0, -1.0), Vec3::new(1.0, 4.0, 1.0)).unwrap();
        let (normal, _) = raised.exit_face(Vec3::new(0.0, 2.1, 0.0), 0.5);
        assert_eq!(normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_feet_inside_floor_box_exit_sideways() {
        let resolver = CollisionResolver::default();
        let mut unit = unit_at(Vec3::new(0.2, 0.0, 0.3));
        let report = resolver.resolve(&mut unit, &[wall()], &mut |_| {});
        assert_eq!(report.contacts[0].normal, Vec3::Z);
        assert_eq!(unit.position.y, 0.0);
        assert!(unit.is_grounded);
        assert!((unit.position.z - 1.5).abs() < 1e-5);

        let again = resolver.resolve(&mut unit, &[wall()], &mut |_| {});
        assert!(again.contacts.is_empty());
    }

    #[test]
    fn test_push_never_ends_below_floor() {
        let resolver = CollisionResolver::default();
        // Box hovering just above the feet pushes down and out
        let low = Obstacle::new(Vec3::new(-1.0, 0.2, -1.0), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        let mut unit = unit_at(Vec3::new(0.0, 0.0, 0.0));
        unit.velocity.y = -3.0;
        resolver.resolve(&mut unit, &[low], &mut |_| {});
        assert!(unit.position.y >= 0.0);
        assert!(unit.velocity.y >= 0.0);
    }

    #[test]
    fn test_airborne_above_floor() {
        let resolver = CollisionResolver::default();
        let mut unit = unit_at(Vec3::new(0.0, 1.0, 0.0));
        let report = resolver.resolve(&mut unit, &[], &mut |_| {});
        assert!(!unit.is_grounded);
        assert!(!report.landed);
    }

    #[test]
    fn test_floor_clamps_and_lands() {
        let resolver = CollisionResolver::default();
        let mut unit = unit_at(Vec3::new(0.0, -0.3, 0.0));
        unit.is_grounded = false;
        unit.velocity.y = -8.0;

        let mut landings = Vec::new();
        let report = resolver.resolve(&mut unit, &[], &mut |at| landings.push(at));
        assert!(report.landed);
        assert!(unit.is_grounded);
        assert_eq!(unit.position.y, 0.0);
        assert_eq!(unit.velocity.y, 0.0);
        assert_eq!(landings, vec![Vec3::ZERO]);
    }

    #[test]
    fn test_rising_unit_at_floor_not_grounded() {
        let resolver = CollisionResolver::default();
        let mut unit = unit_at(Vec3::ZERO);
        unit.is_grounded = false;
        unit.velocity.y = 13.0;
        let report = resolver.resolve(&mut unit, &[], &mut |_| {});
        assert!(!report.landed);
        assert!(!unit.is_grounded);
        assert_eq!(unit.velocity.y, 13.0);
    }

    #[test]
    fn test_push_out_along_normal() {
        let resolver = CollisionResolver::default();
        let mut unit = unit_at(Vec3::new(1.3, 0.5, 0.0));
        unit.velocity = Vec3::new(-4.0, 0.0, 2.0);

        let report = resolver.resolve(&mut unit, &[wall()], &mut |_| {});
        assert_eq!(report.contacts.len(), 1);
        assert_eq!(report.contacts[0].normal, Vec3::X);
        assert!((unit.position.x - 1.5).abs() < 1e-5);
        assert!(unit.velocity.x.abs() < 1e-6);
        assert_eq!(unit.velocity.z, 2.0);
    }

    #[test]
    fn test_center_inside_box_exits_nearest_face() {
        let resolver = CollisionResolver::default();
        let mut unit = unit_at(Vec3::new(0.0, 0.5, 0.9));
        let report = resolver.resolve(&mut unit, &[wall()], &mut |_| {});
        assert_eq!(report.contacts[0].normal, Vec3::Z);
        assert!((unit.position.z - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_broad_phase_skips_far_boxes() {
        let resolver = CollisionResolver::default();
        let far = Obstacle::new(Vec3::splat(10.0), Vec3::splat(11.0)).unwrap();
        let mut unit = unit_at(Vec3::ZERO);
        let report = resolver.resolve(&mut unit, &[far], &mut |_| {});
        assert_eq!(report.candidates, 0);
        assert!(report.contacts.is_empty());
    }

    #[test]
    fn test_near_box_is_candidate_without_contact() {
        let resolver = CollisionResolver::default();
        let mut unit = unit_at(Vec3::new(2.0, 0.0, 0.0));
        let report = resolver.resolve(&mut unit, &[wall()], &mut |_| {});
        assert_eq!(report.candidates, 1);
        assert!(report.contacts.is_empty());
        assert_eq!(unit.position, Vec3::new(2.0, 0.0, 0.0));
    }
}
