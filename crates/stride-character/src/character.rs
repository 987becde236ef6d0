//! A controller and its optional animator, updated together each tick

use crate::animator::{AnimState, CharacterAnimator, StateClips};
use crate::config::CharacterConfig;
use crate::controller::{CharacterController, MoveInput};
use std::sync::Arc;
use stride_animation::{ClipRegistry, SkinnedModel};
use stride_core::{Result, Vec3};
use stride_physics::{CollisionWorld, Resolution};

#[derive(Debug, Clone)]
pub struct Character {
    controller: CharacterController,
    animator: Option<CharacterAnimator>,
}

impl Character {
    /// Start in the idle state with the idle clip already playing, so the first
    /// frame is animated before any movement-driven state change.
    pub fn new(controller: CharacterController, animator: Option<CharacterAnimator>) -> Self {
        let mut character = Self {
            controller,
            animator,
        };
        if let Some(animator) = character.animator.as_mut() {
            animator.change_state(AnimState::Idle);
        }
        character
    }

    /// Build from config, loading the model and state clips when a model is configured
    pub fn from_config(
        config: CharacterConfig,
        position: Vec3,
        registry: &mut ClipRegistry,
    ) -> Result<Self> {
        let animator = match &config.model {
            Some(path) => {
                let model = Arc::new(SkinnedModel::load(path, config.model_y_up)?);
                let clips = StateClips::load(&config.clips, &model, registry, config.clips_y_up);
                Some(CharacterAnimator::new(model, clips))
            }
            None => None,
        };
        let controller = CharacterController::new(config, position, Vec3::FORWARD);
        Ok(Self::new(controller, animator))
    }

    /// Movement, physics, state selection, then animation
    pub fn update(
        &mut self,
        input: &MoveInput,
        camera_front: Vec3,
        world: &CollisionWorld,
        dt: f32,
    ) -> Resolution {
        self.controller.apply_input(input, camera_front);
        let resolution = self.controller.step_physics(world, dt);
        let state = self.controller.desired_state();
        if let Some(animator) = self.animator.as_mut() {
            animator.change_state(state);
            animator.update(dt as f64);
        }
        resolution
    }

    /// Advance playback without moving
    pub fn update_animation_only(&mut self, dt: f64) {
        if let Some(animator) = self.animator.as_mut() {
            animator.update(dt);
        }
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CharacterController {
        &mut self.controller
    }

    pub fn animator(&self) -> Option<&CharacterAnimator> {
        self.animator.as_ref()
    }

    pub fn animator_mut(&mut self) -> Option<&mut CharacterAnimator> {
        self.animator.as_mut()
    }

    /// Current state: the animator's when present, otherwise what movement implies
    pub fn state(&self) -> AnimState {
        self.animator
            .as_ref()
            .and_then(|a| a.state())
            .unwrap_or_else(|| self.controller.desired_state())
    }
}
