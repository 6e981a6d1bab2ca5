//! glTF character loader.
//!
//! Reads `.gltf` / `.glb` files from disk and extracts the animation clips,
//! mesh count and skin joint count. Clip length is the latest keyframe time
//! across all of the clip's channels.

use std::path::Path;

use crate::animation::AnimationClip;

use super::{AssetError, AssetLoader, AssetSource, CharacterAsset, LoadFuture};

/// Loader for local glTF files. Remote URLs are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfLoader;

impl AssetLoader for GltfLoader {
    fn load<'a>(&'a self, source: &'a AssetSource) -> LoadFuture<'a> {
        Box::pin(async move {
            match source {
                AssetSource::Path(path) => load_gltf_character(path),
                AssetSource::Url(url) => Err(AssetError::UnsupportedSource(url.clone())),
            }
        })
    }
}

/// Load a glTF/GLB file and describe the character it contains.
///
/// A file without animations is an error rather than an empty character.
pub fn load_gltf_character(path: impl AsRef<Path>) -> Result<CharacterAsset, AssetError> {
    let path = path.as_ref();
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gltf") || ext.eq_ignore_ascii_case("glb"));
    if !supported {
        return Err(AssetError::UnsupportedSource(path.display().to_string()));
    }

    let (document, buffers, _images) = gltf::import(path)?;

    let clips: Vec<AnimationClip> = document
        .animations()
        .map(|animation| {
            let name = animation
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Animation{}", animation.index()));
            let duration = animation
                .channels()
                .filter_map(|channel| {
                    let reader = channel
                        .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
                    reader.read_inputs()
                })
                .flatten()
                .fold(0.0f32, f32::max);
            AnimationClip::new(name, duration)
        })
        .collect();

    if clips.is_empty() {
        return Err(AssetError::NoAnimations(path.display().to_string()));
    }

    let mesh_count = document.meshes().len();
    let joint_count = document.skins().map(|skin| skin.joints().len()).sum();

    tracing::info!(
        "Loaded glTF character {}: {} clips, {} meshes, {} joints",
        path.display(),
        clips.len(),
        mesh_count,
        joint_count
    );

    Ok(CharacterAsset {
        source: AssetSource::Path(path.to_path_buf()),
        clips,
        mesh_count,
        joint_count,
    })
}
