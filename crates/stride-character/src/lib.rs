//! Stride Character - the playable body
//!
//! A feet-anchored box that walks relative to the camera, jumps, falls, and is
//! pushed out of static geometry by `stride_physics`. Its movement selects an
//! animation state, and the state picks the clip an `AnimationPlayer` plays.

mod animator;
mod character;
mod config;
mod controller;

pub use animator::{AnimState, CharacterAnimator, StateClips};
pub use character::Character;
pub use config::{CharacterConfig, ClipPaths};
pub use controller::{CharacterController, MoveInput};
