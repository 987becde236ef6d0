//! Skeletal animation for Stride
//!
//! Loads keyframe clips against a reference model, samples them at a tick time,
//! walks the node hierarchy into a model-space pose, and turns that pose into a
//! bounded palette of skin matrices.
//!
//! Matrices follow the row-vector convention of `stride_core`: a node's
//! model-space transform is `local * parent`, and skin matrices are transposed
//! for column-major upload.

pub mod axis;
pub mod clip;
pub mod debug;
pub mod loader;
pub mod model;
pub mod player;
pub mod pose;
pub mod registry;
pub mod sampler;
pub mod skeleton;
pub mod skin;

pub use axis::{axis_conversion, UpAxis};
pub use clip::{short_name, AnimationClip, BoneAnimTrack, Keyframe};
pub use loader::{clip_from_scene, load_clip_from_file, DEFAULT_TICKS_PER_SECOND};
pub use model::SkinnedModel;
pub use player::AnimationPlayer;
pub use pose::{bind_pose, build_pose, build_pose_from, sample_local_transform, Pose};
pub use registry::{ClipId, ClipRegistry};
pub use sampler::{sample_track, wrap_time, JointPose};
pub use skeleton::{BoneIndexTable, NodeIndex, NodeLookup};
pub use skin::{compute_skin_matrices, SkinningBuffer, MAX_BONES};
