//! Character tuning loaded from TOML
//!
//! Every field has a default, so an empty file is a valid config:
//! ```toml
//! move_speed = 8.0
//! jump_velocity = 40.0
//! model = "mannequin.glb"
//!
//! [clips]
//! idle = "anims/idle.glb"
//! walk = "anims/walk.glb"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stride_core::{Result, StrideError, Vec3};
use stride_physics::Aabb;

/// Clip files for each animation state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipPaths {
    #[serde(default)]
    pub idle: Option<PathBuf>,
    #[serde(default)]
    pub walk: Option<PathBuf>,
    #[serde(default)]
    pub run: Option<PathBuf>,
    #[serde(default)]
    pub jump: Option<PathBuf>,
    #[serde(default)]
    pub fall: Option<PathBuf>,
}

impl ClipPaths {
    fn resolve_against(&mut self, base: &Path) {
        for path in [
            &mut self.idle,
            &mut self.walk,
            &mut self.run,
            &mut self.jump,
            &mut self.fall,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    /// Horizontal speed, units per second
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Upward speed added by a jump
    #[serde(default = "default_jump_velocity")]
    pub jump_velocity: f32,
    #[serde(default = "default_half_extent")]
    pub half_width: f32,
    #[serde(default = "default_half_extent")]
    pub half_depth: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Drop height before the fall state kicks in
    #[serde(default = "default_fall_anim_threshold")]
    pub fall_anim_threshold: f32,
    /// Vertical speed at or below which the body counts as descending
    #[serde(default = "default_fall_speed_threshold")]
    pub fall_speed_threshold: f32,
    #[serde(default = "default_ground_probe")]
    pub ground_probe: f32,
    #[serde(default = "default_kill_y")]
    pub kill_y: f32,
    #[serde(default)]
    pub respawn: [f32; 3],
    #[serde(default = "default_resolve_iterations")]
    pub resolve_iterations: usize,

    /// Skinned model driven by the state machine
    #[serde(default)]
    pub model: Option<PathBuf>,
    #[serde(default)]
    pub model_y_up: bool,
    #[serde(default = "default_true")]
    pub clips_y_up: bool,
    #[serde(default)]
    pub clips: ClipPaths,
}

fn default_move_speed() -> f32 {
    8.0
}
fn default_gravity() -> f32 {
    98.0
}
fn default_jump_velocity() -> f32 {
    40.0
}
fn default_half_extent() -> f32 {
    1.0
}
fn default_height() -> f32 {
    6.0
}
fn default_fall_anim_threshold() -> f32 {
    8.0
}
fn default_fall_speed_threshold() -> f32 {
    -0.5
}
fn default_ground_probe() -> f32 {
    0.1
}
fn default_kill_y() -> f32 {
    -50.0
}
fn default_resolve_iterations() -> usize {
    stride_physics::DEFAULT_MAX_ITERATIONS
}
fn default_true() -> bool {
    true
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            gravity: default_gravity(),
            jump_velocity: default_jump_velocity(),
            half_width: default_half_extent(),
            half_depth: default_half_extent(),
            height: default_height(),
            fall_anim_threshold: default_fall_anim_threshold(),
            fall_speed_threshold: default_fall_speed_threshold(),
            ground_probe: default_ground_probe(),
            kill_y: default_kill_y(),
            respawn: [0.0; 3],
            resolve_iterations: default_resolve_iterations(),
            model: None,
            model_y_up: false,
            clips_y_up: true,
            clips: ClipPaths::default(),
        }
    }
}

impl CharacterConfig {
    /// Load from disk. Relative model and clip paths are taken relative to the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StrideError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(base) = path.parent() {
            if let Some(model) = config.model.as_mut().filter(|m| m.is_relative()) {
                *model = base.join(&*model);
            }
            config.clips.resolve_against(base);
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.half_width <= 0.0 || self.half_depth <= 0.0 || self.height <= 0.0 {
            return Err(StrideError::ConfigError(format!(
                "Character box must have positive size (half_width {}, half_depth {}, height {})",
                self.half_width, self.half_depth, self.height
            )));
        }
        if self.move_speed < 0.0 || self.gravity < 0.0 || self.ground_probe < 0.0 {
            return Err(StrideError::ConfigError(
                "move_speed, gravity and ground_probe must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Body box relative to the feet position
    pub fn local_aabb(&self) -> Aabb {
        Aabb::new(
            Vec3::new(-self.half_width, 0.0, -self.half_depth),
            Vec3::new(self.half_width, self.height, self.half_depth),
        )
    }

    pub fn respawn_position(&self) -> Vec3 {
        Vec3::from_array(self.respawn)
    }
}
