//! Static collider set and iterative penetration resolution

use crate::aabb::Aabb;
use serde::Deserialize;
use std::path::Path;
use stride_core::{Result, StrideError, Vec3};

/// Extra distance added to every push so resolved boxes end up just apart
pub const RESOLVE_EPSILON: f32 = 0.0005;

/// Default number of resolution passes
pub const DEFAULT_MAX_ITERATIONS: usize = 4;

/// Anything that can report its world-space box for a given position
pub trait AabbProvider {
    fn aabb_at(&self, position: Vec3) -> Aabb;
}

/// A fixed local box offset by the position
impl AabbProvider for Aabb {
    fn aabb_at(&self, position: Vec3) -> Aabb {
        self.translate(position)
    }
}

/// Outcome of one `resolve` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// At least one collider was penetrated
    pub any_hit: bool,
    /// Some push was mostly vertical and moved the body up
    pub grounded: bool,
}

#[derive(Debug, Deserialize)]
struct LevelFile {
    #[serde(default)]
    colliders: Vec<ColliderDef>,
}

#[derive(Debug, Deserialize)]
struct ColliderDef {
    min: [f32; 3],
    max: [f32; 3],
}

/// The static world the dynamic bodies collide against
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    colliders: Vec<Aabb>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_collider(&mut self, aabb: Aabb) {
        self.colliders.push(aabb);
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn colliders(&self) -> &[Aabb] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Parse a level description:
    /// ```toml
    /// [[colliders]]
    /// min = [-20.0, -1.0, -20.0]
    /// max = [20.0, 0.0, 20.0]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let level: LevelFile = toml::from_str(content)?;
        let mut world = Self::new();
        for (i, def) in level.colliders.iter().enumerate() {
            let aabb = Aabb::new(Vec3::from_array(def.min), Vec3::from_array(def.max));
            if !aabb.is_valid() {
                return Err(StrideError::PhysicsError(format!(
                    "Collider {} has min {:?} above max {:?}",
                    i, def.min, def.max
                )));
            }
            world.add_collider(aabb);
        }
        Ok(world)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let world = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded {} colliders from {}",
            world.colliders.len(),
            path.display()
        );
        Ok(world)
    }

    /// Push `position` out of every static collider.
    ///
    /// Each pass tests colliders in order and applies each push immediately,
    /// re-deriving the body's box from `provider` before the next test. Stops
    /// after a pass with no hits or after `max_iterations` passes.
    pub fn resolve<P: AabbProvider + ?Sized>(
        &self,
        provider: &P,
        position: &mut Vec3,
        max_iterations: usize,
    ) -> Resolution {
        let mut result = Resolution::default();
        let mut body = provider.aabb_at(*position);

        for _ in 0..max_iterations {
            let mut hit_this_pass = false;

            for collider in &self.colliders {
                let Some(hit) = body.hit(collider) else {
                    continue;
                };
                result.any_hit = true;
                hit_this_pass = true;

                let n = hit.normal;
                let delta = -(n * (hit.depth + RESOLVE_EPSILON));
                *position = *position + delta;
                body = provider.aabb_at(*position);

                let (nx, ny, nz) = (n.x.abs(), n.y.abs(), n.z.abs());
                if ny >= nx && ny >= nz && delta.y > 0.0 {
                    result.grounded = true;
                }
            }

            if !hit_this_pass {
                break;
            }
        }

        result
    }

    /// Whether a thin slab around the bottom face of `aabb` touches any collider.
    ///
    /// The slab spans `probe` below to `probe` above the bottom face.
    pub fn ground_probe(&self, aabb: &Aabb, probe: f32) -> bool {
        let mut slab = *aabb;
        slab.max.y = slab.min.y + probe;
        slab.min.y -= probe;
        self.colliders.iter().any(|c| slab.overlaps(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Aabb {
        Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 6.0, 1.0))
    }

    fn floor() -> Aabb {
        Aabb::new(Vec3::new(-20.0, -1.0, -20.0), Vec3::new(20.0, 0.0, 20.0))
    }

    #[test]
    fn empty_world_never_hits() {
        let world = CollisionWorld::new();
        let mut pos = Vec3::new(0.0, -3.0, 0.0);
        let r = world.resolve(&body(), &mut pos, DEFAULT_MAX_ITERATIONS);
        assert_eq!(r, Resolution::default());
        assert_eq!(pos, Vec3::new(0.0, -3.0, 0.0));
    }

    #[test]
    fn sunk_body_is_pushed_up_and_grounded() {
        let mut world = CollisionWorld::new();
        world.add_collider(floor());
        let mut pos = Vec3::new(0.0, -0.3, 0.0);
        let r = world.resolve(&body(), &mut pos, DEFAULT_MAX_ITERATIONS);
        assert!(r.any_hit);
        assert!(r.grounded);
        assert!((pos.y - RESOLVE_EPSILON).abs() < 1e-4);
        assert!(!body().aabb_at(pos).overlaps(&floor()));
    }

    #[test]
    fn side_push_is_not_ground() {
        let mut world = CollisionWorld::new();
        world.add_collider(Aabb::new(Vec3::new(0.5, 0.0, -5.0), Vec3::new(3.0, 10.0, 5.0)));
        let mut pos = Vec3::new(0.0, 1.0, 0.0);
        let r = world.resolve(&body(), &mut pos, DEFAULT_MAX_ITERATIONS);
        assert!(r.any_hit);
        assert!(!r.grounded);
        assert!(pos.x < -0.5);
    }

    #[test]
    fn ceiling_push_is_not_ground() {
        let mut world = CollisionWorld::new();
        world.add_collider(Aabb::new(Vec3::new(-20.0, 5.8, -20.0), Vec3::new(20.0, 8.0, 20.0)));
        let mut pos = Vec3::ZERO;
        let r = world.resolve(&body(), &mut pos, DEFAULT_MAX_ITERATIONS);
        assert!(r.any_hit);
        assert!(!r.grounded);
        assert!(pos.y < -0.2);
    }

    #[test]
    fn converges_between_two_walls() {
        // Floor below and a wall on +X, penetrated by 0.2 and 0.3
        let wall = Aabb::new(Vec3::new(0.7, 0.0, -5.0), Vec3::new(4.0, 10.0, 5.0));
        let mut world = CollisionWorld::new();
        world.add_collider(floor());
        world.add_collider(wall);

        let mut pos = Vec3::new(0.0, -0.2, 0.0);
        let r = world.resolve(&body(), &mut pos, DEFAULT_MAX_ITERATIONS);
        let resolved = body().aabb_at(pos);
        assert!(r.any_hit);
        assert!(r.grounded);
        assert!(!resolved.overlaps(&floor()));
        assert!(!resolved.overlaps(&wall));
    }

    #[test]
    fn zero_iterations_does_nothing() {
        let mut world = CollisionWorld::new();
        world.add_collider(floor());
        let mut pos = Vec3::new(0.0, -0.3, 0.0);
        let r = world.resolve(&body(), &mut pos, 0);
        assert!(!r.any_hit);
        assert_eq!(pos.y, -0.3);
    }

    #[test]
    fn ground_probe_sees_floor_just_below() {
        let mut world = CollisionWorld::new();
        world.add_collider(floor());
        let standing = body().aabb_at(Vec3::new(0.0, 0.05, 0.0));
        let hovering = body().aabb_at(Vec3::new(0.0, 0.5, 0.0));
        assert!(world.ground_probe(&standing, 0.1));
        assert!(!world.ground_probe(&hovering, 0.1));
    }

    #[test]
    fn level_file_parses_and_validates() {
        let world = CollisionWorld::from_toml_str(
            "[[colliders]]\nmin = [-1.0, -1.0, -1.0]\nmax = [1.0, 0.0, 1.0]\n",
        )
        .unwrap();
        assert_eq!(world.len(), 1);

        let bad = CollisionWorld::from_toml_str(
            "[[colliders]]\nmin = [1.0, 0.0, 0.0]\nmax = [0.0, 1.0, 1.0]\n",
        );
        assert!(matches!(bad, Err(StrideError::PhysicsError(_))));
        assert!(CollisionWorld::from_toml_str("").unwrap().is_empty());
    }
}
