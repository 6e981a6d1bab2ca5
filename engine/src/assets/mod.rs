//! Assets Module
//!
//! Character loading. A load turns an [`AssetSource`] into a
//! [`CharacterAsset`] describing the named animation clips the model carries.
//! Loads run off the tick thread and are published back through a channel;
//! a generation counter drops any load superseded by a newer request.
//!
//! # Components
//!
//! - [`AssetLoader`] - Async loader seam
//! - [`GltfLoader`] - Local `.gltf` / `.glb` files
//! - [`InMemoryLoader`] - Fixed clip list (tests, demo without a model)
//! - [`LoadTracker`] - Issues [`LoadTicket`]s and rejects stale completions
//! - [`AsyncLoads`] - Worker thread driving loader futures
//!
//! # Example
//!
//! ```rust,ignore
//! use orbit_walker_engine::assets::{AssetSource, AsyncLoads, GltfLoader};
//!
//! let mut loads = AsyncLoads::spawn(Box::new(GltfLoader))?;
//! let ticket = simulation.begin_load();
//! loads.request(ticket, AssetSource::parse("models/walker.glb"))?;
//!
//! // Each frame:
//! while let Some(done) = loads.try_recv() {
//!     let _ = simulation.publish_character(done.ticket, done.result);
//! }
//! ```

pub mod gltf_loader;
pub mod tracker;
pub mod worker;

pub use gltf_loader::GltfLoader;
pub use tracker::{LoadTicket, LoadTracker};
pub use worker::{AsyncLoads, LoadCompletion};

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use thiserror::Error;

use crate::animation::AnimationClip;

/// Errors produced by a character load. None of them stop the tick loop.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse glTF: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("unsupported asset source: {0}")]
    UnsupportedSource(String),

    #[error("model has no animations: {0}")]
    NoAnimations(String),

    #[error("load superseded by a newer request")]
    Superseded,

    #[error("asset worker is no longer running")]
    WorkerGone,
}

/// Where a character model comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Path(PathBuf),
    Url(String),
}

impl AssetSource {
    /// Classify an identifier: `http://` and `https://` are URLs, anything
    /// else is a filesystem path.
    pub fn parse(identifier: &str) -> Self {
        if identifier.starts_with("http://") || identifier.starts_with("https://") {
            AssetSource::Url(identifier.to_string())
        } else {
            AssetSource::Path(PathBuf::from(identifier))
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetSource::Path(path) => write!(f, "{}", path.display()),
            AssetSource::Url(url) => f.write_str(url),
        }
    }
}

/// Description of a loaded character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterAsset {
    pub source: AssetSource,
    /// Animation clips in file order
    pub clips: Vec<AnimationClip>,
    pub mesh_count: usize,
    /// Total joints across all skins
    pub joint_count: usize,
}

/// Boxed future returned by [`AssetLoader::load`].
pub type LoadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CharacterAsset, AssetError>> + Send + 'a>>;

/// Produces character descriptions asynchronously.
pub trait AssetLoader: Send {
    fn load<'a>(&'a self, source: &'a AssetSource) -> LoadFuture<'a>;
}

/// Loader that hands back a fixed clip list for every source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    clips: Vec<AnimationClip>,
}

impl InMemoryLoader {
    pub fn new(clips: Vec<AnimationClip>) -> Self {
        Self { clips }
    }

    /// Idle, walk, run and jump clips with typical lengths.
    pub fn stock() -> Self {
        Self::new(vec![
            AnimationClip::new("Idle", 2.0),
            AnimationClip::new("Walking", 1.0),
            AnimationClip::new("Running", 0.7),
            AnimationClip::new("Jump", 0.9),
        ])
    }

    /// Build the asset synchronously.
    pub fn character(&self, source: &AssetSource) -> Result<CharacterAsset, AssetError> {
        if self.clips.is_empty() {
            return Err(AssetError::NoAnimations(source.to_string()));
        }
        Ok(CharacterAsset {
            source: source.clone(),
            clips: self.clips.clone(),
            mesh_count: 1,
            joint_count: 0,
        })
    }
}

impl AssetLoader for InMemoryLoader {
    fn load<'a>(&'a self, source: &'a AssetSource) -> LoadFuture<'a> {
        Box::pin(async move { self.character(source) })
    }
}
