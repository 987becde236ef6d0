//! Stride Physics - AABB collision resolution
//!
//! - `Aabb`: axis-aligned boxes with strict overlap and least-penetration hit tests
//! - `CollisionWorld`: static collider set, iterative push-out resolver, ground probe
//! - `primitives`: sphere, circle, and 2-D rectangle overlap tests

pub mod aabb;
pub mod collision;
pub mod primitives;

pub use aabb::{Aabb, Hit, HitAxis};
pub use collision::{
    AabbProvider, CollisionWorld, Resolution, DEFAULT_MAX_ITERATIONS, RESOLVE_EPSILON,
};
pub use primitives::{Circle, Rect, Sphere};
