//! Physics module
//!
//! Collision resolution for the controlled unit. Built without an external
//! physics library: the world is a floor plane plus static boxes, and only
//! the unit moves.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in m/s.
//!
//! # Submodules
//!
//! - [`collision`] - Floor rule, sphere-vs-box push-out and landing detection

pub mod collision;

pub use collision::{
    CONTACT_EPSILON, CollisionResolver, Contact, ContactReport, Obstacle, ObstacleError,
};
