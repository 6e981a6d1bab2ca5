//! Camera Module
//!
//! Follow camera for the controlled unit. Window-system agnostic: it only
//! holds orbit state and produces eye and look-target positions; the host
//! feeds it pointer drag deltas.

pub mod orbit;

pub use orbit::CameraOrbit;
