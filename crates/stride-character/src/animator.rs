//! Animation state machine: maps movement states onto clip playback

use crate::config::ClipPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use stride_animation::{AnimationClip, AnimationPlayer, ClipRegistry, SkinnedModel};
use stride_core::Mat4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimState {
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
}

impl std::fmt::Display for AnimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnimState::Idle => "idle",
            AnimState::Walk => "walk",
            AnimState::Run => "run",
            AnimState::Jump => "jump",
            AnimState::Fall => "fall",
        };
        f.write_str(name)
    }
}

/// The clip played in each state; any may be missing
#[derive(Debug, Clone, Default)]
pub struct StateClips {
    pub idle: Option<Arc<AnimationClip>>,
    pub walk: Option<Arc<AnimationClip>>,
    pub run: Option<Arc<AnimationClip>>,
    pub jump: Option<Arc<AnimationClip>>,
    pub fall: Option<Arc<AnimationClip>>,
}

impl StateClips {
    /// Load every configured clip into `registry`. Clips that fail to load stay `None`.
    pub fn load(
        paths: &ClipPaths,
        model: &SkinnedModel,
        registry: &mut ClipRegistry,
        source_is_y_up: bool,
    ) -> Self {
        let mut load = |path: &Option<std::path::PathBuf>| {
            path.as_deref()
                .and_then(|p: &Path| registry.load(p, model, source_is_y_up))
                .and_then(|id| registry.get(id))
        };
        Self {
            idle: load(&paths.idle),
            walk: load(&paths.walk),
            run: load(&paths.run),
            jump: load(&paths.jump),
            fall: load(&paths.fall),
        }
    }

    /// Clip and loop flag for `state`. Jump plays once, falling back to a looping walk.
    pub fn for_state(&self, state: AnimState) -> Option<(Arc<AnimationClip>, bool)> {
        let looping = |clip: &Option<Arc<AnimationClip>>| clip.clone().map(|c| (c, true));
        match state {
            AnimState::Idle => looping(&self.idle),
            AnimState::Walk => looping(&self.walk),
            AnimState::Run => looping(&self.run),
            AnimState::Fall => looping(&self.fall),
            AnimState::Jump => match &self.jump {
                Some(jump) => Some((jump.clone(), false)),
                None => looping(&self.walk),
            },
        }
    }
}

/// Drives one `AnimationPlayer` from state changes
#[derive(Debug, Clone)]
pub struct CharacterAnimator {
    player: AnimationPlayer,
    model: Arc<SkinnedModel>,
    clips: StateClips,
    state: Option<AnimState>,
}

impl CharacterAnimator {
    pub fn new(model: Arc<SkinnedModel>, clips: StateClips) -> Self {
        Self {
            player: AnimationPlayer::new(),
            model,
            clips,
            state: None,
        }
    }

    /// Enter `state`, restarting its clip from zero. No-op when already in it.
    ///
    /// A state without a clip keeps whatever was playing.
    pub fn change_state(&mut self, state: AnimState) -> bool {
        if self.state == Some(state) {
            return false;
        }
        log::debug!(
            "Animation state {} -> {}",
            self.state.map(|s| s.to_string()).unwrap_or_else(|| "none".into()),
            state
        );
        self.state = Some(state);

        if let Some((clip, looping)) = self.clips.for_state(state) {
            self.player
                .play(Some(clip), Some(self.model.clone()), looping, 0.0);
        }
        true
    }

    pub fn update(&mut self, dt: f64) {
        self.player.update(dt);
    }

    pub fn state(&self) -> Option<AnimState> {
        self.state
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn model(&self) -> &Arc<SkinnedModel> {
        &self.model
    }

    pub fn clips(&self) -> &StateClips {
        &self.clips
    }

    /// Pose the model and return its skin matrices
    pub fn skin_matrices(&mut self) -> Vec<Mat4> {
        self.player.compute_skin_matrices()
    }
}
