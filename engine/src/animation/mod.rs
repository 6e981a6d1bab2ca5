//! Animation Module
//!
//! Clip bookkeeping for the controlled character. No skinning happens here;
//! the render host reads clip names, times and weights and poses the mesh.
//!
//! # Components
//!
//! - [`AnimationTable`] - Immutable name to clip mapping built at load time
//! - [`AnimationMixer`] - Active clips with time, weight, loop mode and fades
//! - [`AnimationController`] - Motion-driven clip selection and crossfades

pub mod controller;
pub mod mixer;
pub mod table;

pub use controller::{AnimationController, MotionState};
pub use mixer::{AnimationMixer, ClipPlayback, Fade, LoopMode};
pub use table::{AnimationClip, AnimationTable, ClipHandle};
