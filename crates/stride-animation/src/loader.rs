//! Animation clip loading from imported scenes

use crate::axis::UpAxis;
use crate::clip::{AnimationClip, BoneAnimTrack, Keyframe};
use crate::model::SkinnedModel;
use std::path::Path;
use stride_core::{Quat, Result, StrideError, Vec3};
use stride_import::{ImportedChannel, ImportedScene};

/// Tick rate assumed when a file does not declare one
pub const DEFAULT_TICKS_PER_SECOND: f64 = 30.0;

/// Load the first animation of `path`, resolving its tracks against `model`.
///
/// The clip takes the animation's embedded name, or the path when it has none.
pub fn load_clip_from_file<P: AsRef<Path>>(
    path: P,
    model: &SkinnedModel,
    source_is_y_up: bool,
) -> Result<AnimationClip> {
    let path = path.as_ref();
    let scene = stride_import::import_scene(path)?;
    let fallback = path.display().to_string();

    let clip = clip_from_scene(&scene, model, source_is_y_up, &fallback).ok_or_else(|| {
        StrideError::AnimationError(format!("{} contains no animations", path.display()))
    })?;

    log::info!(
        "Loaded clip '{}': {} tracks ({} unresolved), {:.1} ticks at {} tps",
        clip.name,
        clip.tracks().len(),
        clip.unresolved_track_count(),
        clip.duration,
        clip.ticks_per_second
    );

    Ok(clip)
}

/// Build a clip from the first animation in `source`. `None` when there is none.
pub fn clip_from_scene(
    source: &ImportedScene,
    model: &SkinnedModel,
    source_is_y_up: bool,
    fallback_name: &str,
) -> Option<AnimationClip> {
    let anim = source.animations.first()?;

    let ticks_per_second = if anim.ticks_per_second != 0.0 {
        anim.ticks_per_second
    } else {
        DEFAULT_TICKS_PER_SECOND
    };

    let mut max_key_time = 0.0f64;
    let tracks: Vec<BoneAnimTrack> = anim
        .channels
        .iter()
        .map(|channel| {
            let track = track_from_channel(channel, model);
            max_key_time = max_key_time.max(track.duration());
            track
        })
        .collect();

    let name = if anim.name.is_empty() {
        fallback_name.to_string()
    } else {
        anim.name.clone()
    };

    Some(AnimationClip::new(
        name,
        anim.duration.max(max_key_time),
        ticks_per_second,
        tracks,
        UpAxis::from_y_up(source_is_y_up),
    ))
}

/// Merge the three independent key lists into unified keyframes.
///
/// Keyframe `i` takes each list's key `min(i, len - 1)`; a list with no keys
/// contributes its default value at time zero. The keyframe time is the latest
/// of the three key times.
fn track_from_channel(channel: &ImportedChannel, model: &SkinnedModel) -> BoneAnimTrack {
    let positions = &channel.position_keys;
    let rotations = &channel.rotation_keys;
    let scales = &channel.scaling_keys;
    let count = positions.len().max(rotations.len()).max(scales.len());

    let keyframes = (0..count)
        .map(|i| {
            let (t_time, translation) = positions
                .get(i.min(positions.len().saturating_sub(1)))
                .map(|k| (k.time, k.value))
                .unwrap_or((0.0, Vec3::ZERO));
            let (r_time, rotation) = rotations
                .get(i.min(rotations.len().saturating_sub(1)))
                .map(|k| (k.time, k.value))
                .unwrap_or((0.0, Quat::IDENTITY));
            let (s_time, scale) = scales
                .get(i.min(scales.len().saturating_sub(1)))
                .map(|k| (k.time, k.value))
                .unwrap_or((0.0, Vec3::ONE));

            Keyframe {
                time: t_time.max(r_time).max(s_time),
                translation,
                rotation,
                scale,
            }
        })
        .collect();

    BoneAnimTrack {
        node_name: channel.node_name.clone(),
        node: model.find_node(&channel.node_name),
        keyframes,
    }
}
