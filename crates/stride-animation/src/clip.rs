//! Animation clip data: per-bone keyframe tracks and track resolution

use crate::axis::UpAxis;
use crate::skeleton::NodeIndex;
use std::collections::HashMap;
use stride_core::{Quat, Vec3};

/// A unified TRS sample at one instant, time in ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f64,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Keyframe {
    fn default() -> Self {
        Self {
            time: 0.0,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Keyframes for one node
#[derive(Debug, Clone, Default)]
pub struct BoneAnimTrack {
    /// Node name as written in the animation file
    pub node_name: String,
    /// Node in the reference model with that name, if any
    pub node: Option<NodeIndex>,
    /// Non-decreasing by time
    pub keyframes: Vec<Keyframe>,
}

impl BoneAnimTrack {
    /// Time of the last keyframe, or zero
    pub fn duration(&self) -> f64 {
        self.keyframes.last().map(|k| k.time).unwrap_or(0.0)
    }
}

/// The part of a node name after the last `|`, `:`, `/` or `\`
pub fn short_name(name: &str) -> &str {
    match name.rfind(['|', ':', '/', '\\']) {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// Precomputed track resolution.
///
/// Full-name and short-name maps keep the first track in clip order.
/// The node map keeps the last one.
#[derive(Debug, Clone, Default)]
struct TrackLookup {
    by_full_name: HashMap<String, usize>,
    by_short_name: HashMap<String, usize>,
    by_node: HashMap<NodeIndex, usize>,
}

impl TrackLookup {
    fn build(tracks: &[BoneAnimTrack]) -> Self {
        let mut lookup = Self::default();
        for (i, track) in tracks.iter().enumerate() {
            if track.node_name.is_empty() {
                continue;
            }
            lookup
                .by_full_name
                .entry(track.node_name.clone())
                .or_insert(i);
            lookup
                .by_short_name
                .entry(short_name(&track.node_name).to_string())
                .or_insert(i);
            if let Some(node) = track.node {
                lookup.by_node.insert(node, i);
            }
        }
        lookup
    }

    fn find(&self, node: NodeIndex, node_name: &str) -> Option<usize> {
        self.by_full_name
            .get(node_name)
            .or_else(|| self.by_short_name.get(short_name(node_name)))
            .or_else(|| self.by_node.get(&node))
            .copied()
    }
}

/// A keyframe animation ready to sample against a model
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Length in ticks
    pub duration: f64,
    /// Always positive
    pub ticks_per_second: f64,
    pub source_up: UpAxis,
    pub looping: bool,
    tracks: Vec<BoneAnimTrack>,
    lookup: TrackLookup,
}

impl AnimationClip {
    pub fn new(
        name: impl Into<String>,
        duration: f64,
        ticks_per_second: f64,
        tracks: Vec<BoneAnimTrack>,
        source_up: UpAxis,
    ) -> Self {
        let lookup = TrackLookup::build(&tracks);
        Self {
            name: name.into(),
            duration,
            ticks_per_second,
            source_up,
            looping: true,
            tracks,
            lookup,
        }
    }

    pub fn tracks(&self) -> &[BoneAnimTrack] {
        &self.tracks
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.ticks_per_second > 0.0 {
            self.duration / self.ticks_per_second
        } else {
            0.0
        }
    }

    /// Track driving `node`: exact name first, then short name, then node identity.
    pub fn find_track_for_node(&self, node: NodeIndex, node_name: &str) -> Option<&BoneAnimTrack> {
        self.lookup.find(node, node_name).map(|i| &self.tracks[i])
    }

    /// Tracks whose name did not resolve to a node in the reference model
    pub fn unresolved_track_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.node.is_none()).count()
    }
}
