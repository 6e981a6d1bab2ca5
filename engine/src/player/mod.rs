//! Player Module
//!
//! The controlled unit and the integrator that moves it.
//!
//! # Components
//!
//! - [`Unit`] - Position, velocity, heading, grounded flag and derived capsule
//! - [`LocomotionIntegrator`] - Camera-relative movement, turning, jump and gravity

pub mod locomotion;
pub mod unit;

pub use locomotion::{
    LocomotionIntegrator, LocomotionStep, camera_basis, move_intent, wrap_angle,
};
pub use unit::{Capsule, Unit};
