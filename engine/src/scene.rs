//! Simulation host facade
//!
//! Owns the controlled character, the orbit camera, the static obstacles and
//! the landing callback, and advances them together once per rendered frame.
//!
//! # Tick Order
//!
//! 1. Camera drag and recenter requests
//! 2. Locomotion integration (rolled back and stopped if it produced
//!    non-finite state)
//! 3. Collision resolution against the floor and obstacles
//! 4. Animation selection and clip advance
//! 5. Camera follow
//!
//! # Character Swap
//!
//! Loads are tracked by generation. A completed load is published only if no
//! newer load was requested since; a failed load keeps the current character.
//!
//! ```rust,ignore
//! let mut sim = Simulation::new(config, Box::new(|at| dust.spawn(at)));
//! let ticket = sim.begin_load();
//! sim.publish_character(ticket, InMemoryLoader::stock().character(&source))?;
//!
//! if let Some(frame) = sim.tick(&TickInput::new(dt, input.sample())) {
//!     renderer.draw(&frame);
//! }
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationController, AnimationTable, MotionState};
use crate::assets::{AssetError, CharacterAsset, LoadTicket, LoadTracker};
use crate::camera::CameraOrbit;
use crate::config::ControllerConfig;
use crate::input::InputSnapshot;
use crate::physics::{CollisionResolver, Obstacle, ObstacleError};
use crate::player::{Capsule, LocomotionIntegrator, Unit};

/// Called with the landing position whenever the unit touches down.
pub type LandingCallback = Box<dyn FnMut(Vec3)>;

/// Postprocessing switches forwarded untouched to the render host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderToggles {
    pub bloom: bool,
    pub ambient_occlusion: bool,
}

impl Default for RenderToggles {
    fn default() -> Self {
        Self {
            bloom: true,
            ambient_occlusion: true,
        }
    }
}

/// Everything the host supplies for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Seconds since the previous tick
    pub delta: f32,
    pub input: InputSnapshot,
    /// Pointer drag since the previous tick, in pixels
    pub drag: Vec2,
    pub toggles: RenderToggles,
}

impl TickInput {
    pub fn new(delta: f32, input: InputSnapshot) -> Self {
        Self {
            delta,
            input,
            ..Default::default()
        }
    }

    pub fn with_drag(mut self, drag: Vec2) -> Self {
        self.drag = drag;
        self
    }
}

/// Immutable per-frame state handed to the render host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub heading: f32,
    pub capsule: Capsule,
    pub grounded: bool,
    /// Clip currently fading in or playing, if any
    pub animation: Option<String>,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
    pub toggles: RenderToggles,
}

/// Result of handing a finished load to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The character is now live
    Applied,
    /// A newer load was requested; this one was dropped
    Stale,
}

/// A live character: its unit, animation state and source asset.
#[derive(Debug, Clone)]
pub struct Character {
    pub unit: Unit,
    pub animation: AnimationController,
    pub asset: CharacterAsset,
}

/// One controlled character in a static world.
pub struct Simulation {
    config: ControllerConfig,
    integrator: LocomotionIntegrator,
    resolver: CollisionResolver,
    camera: CameraOrbit,
    obstacles: Vec<Obstacle>,
    character: Option<Character>,
    loads: LoadTracker,
    on_land: LandingCallback,
}

impl Simulation {
    pub fn new(config: ControllerConfig, on_land: LandingCallback) -> Self {
        Self {
            integrator: LocomotionIntegrator::new(config.locomotion, config.smoothing),
            resolver: CollisionResolver::new(config.collision.floor_y),
            camera: CameraOrbit::new(config.camera),
            obstacles: Vec::new(),
            character: None,
            loads: LoadTracker::new(),
            on_land,
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraOrbit {
        &self.camera
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn character_mut(&mut self) -> Option<&mut Character> {
        self.character.as_mut()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Add a box collider. Malformed bounds are logged and rejected.
    pub fn add_obstacle(&mut self, min: Vec3, max: Vec3) -> Result<(), ObstacleError> {
        match Obstacle::new(min, max) {
            Ok(obstacle) => {
                self.obstacles.push(obstacle);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(?min, ?max, "rejected obstacle: {err}");
                Err(err)
            }
        }
    }

    /// Register a new character load, superseding any still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loads.begin()
    }

    /// Apply a finished load.
    ///
    /// Stale completions are dropped. A failure is logged and returned while
    /// the current character keeps running. On success the old character's
    /// clips are released and the new character takes over its position,
    /// velocity, heading and grounded state; the first character spawns at
    /// the configured spawn point.
    pub fn publish_character(
        &mut self,
        ticket: LoadTicket,
        result: Result<CharacterAsset, AssetError>,
    ) -> Result<PublishOutcome, AssetError> {
        if !self.loads.complete(ticket) {
            tracing::debug!(generation = ticket.generation(), "discarding superseded load");
            return Ok(PublishOutcome::Stale);
        }

        let asset = match result {
            Ok(asset) => asset,
            Err(err) => {
                tracing::warn!("character load failed, keeping current character: {err}");
                return Err(err);
            }
        };

        let mut unit = Unit::new(self.config.spawn_position, &self.config.collision);
        if let Some(old) = self.character.as_mut() {
            unit.position = old.unit.position;
            unit.velocity = old.unit.velocity;
            unit.heading = old.unit.heading;
            unit.is_grounded = old.unit.is_grounded;
            let released = old.animation.release();
            tracing::debug!(released, "released previous character clips");
        }

        let table = AnimationTable::new(asset.clips.iter().cloned());
        let animation = AnimationController::new(table, self.config.animation.clone());
        tracing::info!(
            source = %asset.source,
            clips = asset.clips.len(),
            "character published"
        );
        self.character = Some(Character {
            unit,
            animation,
            asset,
        });
        Ok(PublishOutcome::Applied)
    }

    /// Names of the live character's clips, in load order.
    pub fn clip_names(&self) -> Vec<String> {
        self.character
            .as_ref()
            .map(|c| c.animation.table().names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Force a clip by name, or clear the override. Returns `false` when
    /// there is no character or the clip does not exist.
    pub fn set_animation_override(&mut self, name: Option<&str>) -> bool {
        match self.character.as_mut() {
            Some(character) => character.animation.set_override(name),
            None => false,
        }
    }

    /// Advance one frame.
    ///
    /// Without a character only the camera moves and `None` is returned.
    pub fn tick(&mut self, tick: &TickInput) -> Option<FrameSnapshot> {
        let delta = if tick.delta.is_finite() {
            tick.delta.clamp(0.0, self.config.locomotion.max_delta)
        } else {
            0.0
        };
        let controls = &tick.input.controls;
        let smoothing = self.config.smoothing;

        self.camera.handle_drag(tick.drag.x, tick.drag.y);

        let Some(character) = self.character.as_mut() else {
            self.camera.update(delta, controls.run, smoothing);
            return None;
        };

        if controls.reset_camera {
            self.camera.recenter(character.unit.heading);
        }

        let unit = &mut character.unit;
        let previous = unit.clone();
        let step = self
            .integrator
            .step(unit, &tick.input, self.camera.theta, delta);
        if !unit.is_finite() {
            tracing::warn!(
                position = ?unit.position,
                velocity = ?unit.velocity,
                "non-finite unit state, rolling back"
            );
            *unit = previous;
            unit.velocity = Vec3::ZERO;
        }

        let report = self.resolver.resolve(unit, &self.obstacles, &mut *self.on_land);
        if report.landed {
            tracing::debug!(position = ?unit.position, "landed");
        }

        character.animation.update(
            MotionState {
                grounded: character.unit.is_grounded,
                horizontal_speed: character.unit.horizontal_speed(),
                jumped: step.jumped,
            },
            delta,
        );

        self.camera.update(delta, controls.run, smoothing);

        let unit = &character.unit;
        Some(FrameSnapshot {
            position: unit.position,
            velocity: unit.velocity,
            heading: unit.heading,
            capsule: unit.capsule(),
            grounded: unit.is_grounded,
            animation: character.animation.current_name().map(str::to_string),
            camera_eye: self.camera.eye(unit.position),
            camera_target: self.camera.look_target(unit.position),
            toggles: tick.toggles,
        })
    }
}
