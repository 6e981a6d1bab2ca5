//! Animation state selection
//!
//! Picks the clip matching the unit's motion each tick and crossfades to it.
//!
//! # Priority
//!
//! 1. Manual override (only ever set to a clip the table contains)
//! 2. Jump impulse this tick: restart the jump clip, played once
//! 3. Airborne: jump clip
//! 4. Horizontal speed above the run threshold: run clip
//! 5. Above the walk threshold: walk clip
//! 6. Idle clip
//!
//! A target missing from the table leaves the current clip playing.

use crate::config::AnimationConfig;

use super::mixer::{AnimationMixer, LoopMode};
use super::table::{AnimationTable, ClipHandle};

/// Motion facts the selector needs from the resolved unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    pub grounded: bool,
    pub horizontal_speed: f32,
    /// A jump impulse fired this tick
    pub jumped: bool,
}

/// Owns a character's clip table and drives its mixer.
#[derive(Debug, Clone)]
pub struct AnimationController {
    table: AnimationTable,
    mixer: AnimationMixer,
    config: AnimationConfig,
    current: Option<ClipHandle>,
    override_clip: Option<ClipHandle>,
    last_missing: Option<String>,
}

impl AnimationController {
    /// Start on the idle clip at full weight when the table has one.
    pub fn new(table: AnimationTable, config: AnimationConfig) -> Self {
        let mut mixer = AnimationMixer::new();
        let current = table.find(&config.idle_clip);
        if let Some(idle) = current {
            mixer.play(idle, LoopMode::Repeat, 0.0);
        }
        Self {
            table,
            mixer,
            config,
            current,
            override_clip: None,
            last_missing: None,
        }
    }

    /// Clip name the motion state calls for, before table lookup.
    pub fn target_name(&self, grounded: bool, horizontal_speed: f32) -> &str {
        let cfg = &self.config;
        if !grounded {
            &cfg.jump_clip
        } else if horizontal_speed > cfg.run_threshold {
            &cfg.run_clip
        } else if horizontal_speed > cfg.walk_threshold {
            &cfg.walk_clip
        } else {
            &cfg.idle_clip
        }
    }

    /// Select, transition and advance all active clips by `delta`.
    pub fn update(&mut self, motion: MotionState, delta: f32) {
        if let Some(forced) = self.override_clip {
            if self.current != Some(forced) {
                self.transition(forced);
            }
        } else if motion.jumped {
            match self.table.find(&self.config.jump_clip) {
                Some(jump) => self.transition(jump),
                None => {
                    let name = self.config.jump_clip.clone();
                    self.note_missing(name);
                }
            }
        } else {
            let target = self.target_name(motion.grounded, motion.horizontal_speed);
            match self.table.find(target) {
                Some(handle) if self.current != Some(handle) => self.transition(handle),
                Some(_) => {}
                None => {
                    let name = target.to_string();
                    self.note_missing(name);
                }
            }
        }

        self.mixer.advance(delta, &self.table);
    }

    /// Force a clip regardless of motion, or clear the override with `None`.
    ///
    /// Returns `false` and changes nothing when the name is not in the table.
    pub fn set_override(&mut self, name: Option<&str>) -> bool {
        match name {
            None => {
                self.override_clip = None;
                true
            }
            Some(name) => match self.table.find(name) {
                Some(handle) => {
                    self.override_clip = Some(handle);
                    true
                }
                None => {
                    tracing::debug!(clip = name, "override ignored, clip not loaded");
                    false
                }
            },
        }
    }

    pub fn override_name(&self) -> Option<&str> {
        self.override_clip.and_then(|h| self.table.name(h))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.and_then(|h| self.table.name(h))
    }

    pub fn table(&self) -> &AnimationTable {
        &self.table
    }

    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    /// Stop every clip before the character is dropped. Returns how many
    /// clips were still playing.
    pub fn release(&mut self) -> usize {
        self.current = None;
        self.override_clip = None;
        self.mixer.stop_all()
    }

    fn transition(&mut self, next: ClipHandle) {
        let loop_mode = if self.table.name(next) == Some(self.config.jump_clip.as_str()) {
            LoopMode::Once
        } else {
            LoopMode::Repeat
        };
        let fade = match self.current {
            Some(prev) if prev != next => {
                self.mixer.fade_out(prev, self.config.crossfade);
                self.config.crossfade
            }
            // Restart of the same clip, or nothing playing yet
            _ => 0.0,
        };
        self.mixer.play(next, loop_mode, fade);

        tracing::debug!(
            from = self.current_name().unwrap_or("-"),
            to = self.table.name(next).unwrap_or("-"),
            "animation transition"
        );
        self.current = Some(next);
        self.last_missing = None;
    }

    fn note_missing(&mut self, name: String) {
        if self.last_missing.as_deref() != Some(name.as_str()) {
            tracing::debug!(clip = %name, "target clip not loaded, keeping current");
            self.last_missing = Some(name);
        }
    }
}
