//! Axis-aligned boxes: overlap, penetration, and transforms

use serde::{Deserialize, Serialize};
use stride_core::{Mat4, Vec3};

/// An axis-aligned bounding box. Valid boxes satisfy `min <= max` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Axis of least penetration picked by `Aabb::hit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitAxis {
    X,
    Y,
    Z,
}

/// Penetration between two boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Unit normal pointing from the first box toward the second
    pub normal: Vec3,
    pub depth: f32,
    pub axis: HitAxis,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn center(&self) -> Vec3 {
        self.min + self.half_extents()
    }

    /// Strict interval overlap on all three axes; touching faces do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Penetration of `self` into `other`, or `None` when they do not overlap.
    pub fn hit(&self, other: &Aabb) -> Option<Hit> {
        if !self.overlaps(other) {
            return None;
        }

        let xd = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let yd = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);
        let zd = self.max.z.min(other.max.z) - self.min.z.max(other.min.z);

        // Ties are broken in this exact order; the resolver depends on it.
        let axis = if xd > yd {
            if yd > zd {
                HitAxis::Z
            } else {
                HitAxis::Y
            }
        } else if zd > xd {
            HitAxis::X
        } else {
            HitAxis::Z
        };

        let to_other = other.center() - self.center();
        let (masked, depth) = match axis {
            HitAxis::X => (Vec3::new(to_other.x, 0.0, 0.0), xd),
            HitAxis::Y => (Vec3::new(0.0, to_other.y, 0.0), yd),
            HitAxis::Z => (Vec3::new(0.0, 0.0, to_other.z), zd),
        };

        let mut normal = masked.normalized();
        if normal.length_squared() < 1e-8 {
            normal = Vec3::UP;
        }

        Some(Hit {
            normal,
            depth,
            axis,
        })
    }

    pub fn translate(&self, delta: Vec3) -> Aabb {
        Aabb {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of the eight corners after transforming by `world`
    pub fn transform(&self, world: &Mat4) -> Aabb {
        let mut min = Vec3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vec3::new(-f32::MAX, -f32::MAX, -f32::MAX);
        for corner in self.corners() {
            let p = world.transform_point(corner);
            min = min.min(&p);
            max = max.max(&p);
        }
        Aabb { min, max }
    }

    /// The twelve edges as corner pairs, for wireframe drawing
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let c = self.corners();
        [
            (c[0], c[1]),
            (c[2], c[3]),
            (c[4], c[5]),
            (c[6], c[7]),
            (c[0], c[2]),
            (c[1], c[3]),
            (c[4], c[6]),
            (c[5], c[7]),
            (c[0], c[4]),
            (c[1], c[5]),
            (c[2], c[6]),
            (c[3], c[7]),
        ]
    }
}
