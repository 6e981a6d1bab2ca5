//! Clip mixer
//!
//! Tracks every clip currently contributing to the pose: its local time,
//! blend weight, loop mode and an optional linear fade. Clips fading out are
//! dropped once their weight reaches zero.

use super::table::{AnimationTable, ClipHandle};

/// How a clip behaves at the end of its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Wrap back to the start
    #[default]
    Repeat,
    /// Clamp at the last frame and hold
    Once,
}

/// Linear weight ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl Fade {
    fn weight(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).min(1.0);
        self.from + (self.to - self.from) * t
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Playback state of one active clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlayback {
    pub handle: ClipHandle,
    /// Local time in seconds
    pub time: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub fade: Option<Fade>,
}

impl ClipPlayback {
    /// Whether a once-clip has reached its end.
    pub fn finished(&self, duration: f32) -> bool {
        self.loop_mode == LoopMode::Once && self.time >= duration
    }

    fn fading_out(&self) -> bool {
        self.fade.is_some_and(|fade| fade.to <= 0.0)
    }
}

/// Set of clips blended together this frame.
#[derive(Debug, Clone, Default)]
pub struct AnimationMixer {
    active: Vec<ClipPlayback>,
}

impl AnimationMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a clip from time zero. A `fade_in` of zero starts at full weight.
    ///
    /// If the clip is already active (for example still fading out) it is
    /// reset in place rather than duplicated.
    pub fn play(&mut self, handle: ClipHandle, loop_mode: LoopMode, fade_in: f32) {
        let playback = ClipPlayback {
            handle,
            time: 0.0,
            weight: if fade_in > 0.0 { 0.0 } else { 1.0 },
            loop_mode,
            fade: (fade_in > 0.0).then_some(Fade {
                from: 0.0,
                to: 1.0,
                elapsed: 0.0,
                duration: fade_in,
            }),
        };
        match self.active.iter_mut().find(|p| p.handle == handle) {
            Some(existing) => *existing = playback,
            None => self.active.push(playback),
        }
    }

    /// Ramp a clip's weight down to zero; it keeps advancing meanwhile.
    pub fn fade_out(&mut self, handle: ClipHandle, duration: f32) {
        if duration <= 0.0 {
            self.active.retain(|p| p.handle != handle);
            return;
        }
        if let Some(playback) = self.active.iter_mut().find(|p| p.handle == handle) {
            playback.fade = Some(Fade {
                from: playback.weight,
                to: 0.0,
                elapsed: 0.0,
                duration,
            });
        }
    }

    /// Advance every active clip by `delta` seconds.
    pub fn advance(&mut self, delta: f32, table: &AnimationTable) {
        let delta = delta.max(0.0);
        for playback in &mut self.active {
            let duration = table.duration(playback.handle);
            playback.time += delta;
            match playback.loop_mode {
                LoopMode::Repeat if duration > 0.0 => {
                    playback.time = playback.time.rem_euclid(duration)
                }
                LoopMode::Repeat => playback.time = 0.0,
                LoopMode::Once => playback.time = playback.time.min(duration),
            }

            if let Some(fade) = playback.fade.as_mut() {
                fade.elapsed += delta;
                playback.weight = fade.weight();
                if fade.finished() {
                    playback.fade = None;
                }
            }
        }
        self.active.retain(|p| p.fade.is_some() || p.weight > 0.0);
    }

    /// Stop everything immediately. Returns how many clips were playing.
    pub fn stop_all(&mut self) -> usize {
        let stopped = self.active.len();
        self.active.clear();
        stopped
    }

    pub fn playback(&self, handle: ClipHandle) -> Option<&ClipPlayback> {
        self.active.iter().find(|p| p.handle == handle)
    }

    pub fn is_playing(&self, handle: ClipHandle) -> bool {
        self.playback(handle).is_some()
    }

    /// Current weight of a clip, zero when inactive.
    pub fn weight(&self, handle: ClipHandle) -> f32 {
        self.playback(handle).map_or(0.0, |p| p.weight)
    }

    pub fn active(&self) -> &[ClipPlayback] {
        &self.active
    }

    /// Number of clips still fading out.
    pub fn fading_out_count(&self) -> usize {
        self.active.iter().filter(|p| p.fading_out()).count()
    }
}
