//! Animation clip table
//!
//! The named clips discovered when a character loads. The table is built once
//! and never changes; playback refers to clips through [`ClipHandle`]s that
//! are only handed out for names the table actually contains.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name and length of one animation clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Length in seconds
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Index of a clip inside its [`AnimationTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(usize);

/// Immutable name to clip mapping.
#[derive(Debug, Clone, Default)]
pub struct AnimationTable {
    clips: Vec<AnimationClip>,
    by_name: HashMap<String, ClipHandle>,
}

impl AnimationTable {
    /// Build the table. Durations that are negative or not finite become 0;
    /// when two clips share a name the first one wins.
    pub fn new(clips: impl IntoIterator<Item = AnimationClip>) -> Self {
        let mut table = Self::default();
        for mut clip in clips {
            if table.by_name.contains_key(&clip.name) {
                tracing::debug!(clip = %clip.name, "duplicate clip name ignored");
                continue;
            }
            if !clip.duration.is_finite() || clip.duration < 0.0 {
                clip.duration = 0.0;
            }
            let handle = ClipHandle(table.clips.len());
            table.by_name.insert(clip.name.clone(), handle);
            table.clips.push(clip);
        }
        table
    }

    pub fn find(&self, name: &str) -> Option<ClipHandle> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn clip(&self, handle: ClipHandle) -> Option<&AnimationClip> {
        self.clips.get(handle.0)
    }

    pub fn name(&self, handle: ClipHandle) -> Option<&str> {
        self.clip(handle).map(|clip| clip.name.as_str())
    }

    pub fn duration(&self, handle: ClipHandle) -> f32 {
        self.clip(handle).map_or(0.0, |clip| clip.duration)
    }

    /// Clip names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().map(|clip| clip.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
