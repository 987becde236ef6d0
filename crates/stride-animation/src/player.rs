//! Per-instance playback: clock, looping, and the cached pose snapshot

use crate::clip::AnimationClip;
use crate::model::SkinnedModel;
use crate::pose::{build_pose, Pose};
use crate::sampler::wrap_time;
use crate::skin::compute_skin_matrices;
use std::sync::Arc;
use stride_core::Mat4;

/// Plays one clip against one model.
///
/// Clips and models are shared; the player only owns its clock and the most
/// recent pose it produced.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clip: Option<Arc<AnimationClip>>,
    model: Option<Arc<SkinnedModel>>,
    playing: bool,
    looping: bool,
    /// Playback position in ticks
    time: f64,
    pose: Option<Arc<Pose>>,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            clip: None,
            model: None,
            playing: false,
            looping: true,
            time: 0.0,
            pose: None,
        }
    }

    /// Start playing `clip` on `model` from `start_time_sec`.
    ///
    /// With either one missing the player ends up stopped at time zero.
    pub fn play(
        &mut self,
        clip: Option<Arc<AnimationClip>>,
        model: Option<Arc<SkinnedModel>>,
        looping: bool,
        start_time_sec: f64,
    ) {
        self.looping = looping;
        self.clip = clip;
        self.model = model;

        let Some(clip) = self.clip.as_ref().filter(|_| self.model.is_some()) else {
            self.playing = false;
            self.time = 0.0;
            return;
        };

        let mut start = start_time_sec * clip.ticks_per_second;
        if clip.duration > 0.0 {
            start = wrap_time(start, clip.duration);
        }
        self.time = start;
        self.playing = true;
    }

    /// Halt playback and rewind to the start
    pub fn stop(&mut self) {
        self.playing = false;
        self.time = 0.0;
    }

    /// Advance the clock by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        let Some(clip) = self.clip.as_ref() else {
            return;
        };

        self.time += dt * clip.ticks_per_second;

        if clip.duration > 0.0 {
            if self.looping {
                self.time = wrap_time(self.time, clip.duration);
            } else if self.time > clip.duration {
                self.time = clip.duration;
                self.playing = false;
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn current_clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clip.as_ref()
    }

    pub fn model(&self) -> Option<&Arc<SkinnedModel>> {
        self.model.as_ref()
    }

    pub fn current_time_ticks(&self) -> f64 {
        self.time
    }

    /// Playback position in seconds; zero without a clip
    pub fn current_time_sec(&self) -> f64 {
        match &self.clip {
            Some(clip) if clip.ticks_per_second != 0.0 => self.time / clip.ticks_per_second,
            _ => 0.0,
        }
    }

    /// Pose at the current time without touching the cached snapshot
    pub fn evaluate_pose(&self) -> Option<Pose> {
        let (clip, model) = (self.clip.as_ref()?, self.model.as_ref()?);
        Some(build_pose(model, clip, self.time))
    }

    /// Pose the model at the current time, cache the pose, and return skin matrices.
    ///
    /// Empty when no clip or model is bound; the cached pose is then left as is.
    pub fn compute_skin_matrices(&mut self) -> Vec<Mat4> {
        let (Some(clip), Some(model)) = (self.clip.as_ref(), self.model.as_ref()) else {
            return Vec::new();
        };
        let pose = Arc::new(build_pose(model, clip, self.time));
        let matrices = compute_skin_matrices(model, &pose);
        self.pose = Some(pose);
        matrices
    }

    /// Snapshot from the last `compute_skin_matrices`
    pub fn current_pose(&self) -> Option<Arc<Pose>> {
        self.pose.clone()
    }
}
