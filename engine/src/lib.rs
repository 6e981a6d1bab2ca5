//! Orbit Walker Engine Library
//!
//! A third-person character controller: camera-relative locomotion, capsule
//! collision against a floor and static boxes, motion-driven animation
//! crossfades and a smoothed orbit camera. Rendering is left to the host,
//! which feeds input in and reads a [`FrameSnapshot`] out each frame.
//!
//! # Modules
//!
//! - [`input`] - Keyboard, virtual joystick and gamepad fused into one snapshot
//! - [`player`] - The controlled unit and its locomotion integrator
//! - [`physics`] - Floor and box collision resolution
//! - [`animation`] - Clip table, mixer and state selection
//! - [`camera`] - Orbit follow camera
//! - [`assets`] - Async character loading with supersession
//! - [`scene`] - Simulation facade tying one tick together
//! - [`config`] - Tuning values with JSON overrides
//!
//! # Example
//!
//! ```ignore
//! use orbit_walker_engine::assets::{AssetSource, InMemoryLoader};
//! use orbit_walker_engine::{ControllerConfig, InputAggregator, KeyCode, Simulation, TickInput};
//!
//! let mut sim = Simulation::new(ControllerConfig::default(), Box::new(|_| {}));
//! let ticket = sim.begin_load();
//! sim.publish_character(ticket, InMemoryLoader::stock().character(&AssetSource::parse("stock")))?;
//!
//! let mut input = InputAggregator::new();
//! input.handle_key(KeyCode::W, true);
//!
//! let frame = sim.tick(&TickInput::new(1.0 / 60.0, input.sample()));
//! input.clear_pulses();
//! ```

pub mod animation;
pub mod assets;
pub mod camera;
pub mod config;
pub mod input;
pub mod physics;
pub mod player;
pub mod scene;

pub use camera::CameraOrbit;
pub use config::{ConfigError, ControllerConfig, SmoothingMode};
pub use input::{ControlState, InputAggregator, InputSnapshot, JoystickState, KeyCode};
pub use physics::{CollisionResolver, Obstacle};
pub use player::{LocomotionIntegrator, Unit};
pub use scene::{FrameSnapshot, PublishOutcome, RenderToggles, Simulation, TickInput};
