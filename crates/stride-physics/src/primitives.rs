//! Sphere, circle, and 2-D box overlap tests

use stride_core::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: [f32; 2],
    pub radius: f32,
}

/// Axis-aligned rectangle in 2-D, given by center and half sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: [f32; 2],
    pub half_width: f32,
    pub half_height: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn overlaps(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        reach * reach > (other.center - self.center).length_squared()
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.radius * self.radius > (point - self.center).length_squared()
    }
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: [x, y],
            radius,
        }
    }

    pub fn overlaps(&self, other: &Circle) -> bool {
        let dx = other.center[0] - self.center[0];
        let dy = other.center[1] - self.center[1];
        let reach = self.radius + other.radius;
        reach * reach > dx * dx + dy * dy
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, half_width: f32, half_height: f32) -> Self {
        Self {
            center: [x, y],
            half_width,
            half_height,
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        let (al, ar) = (self.center[0] - self.half_width, self.center[0] + self.half_width);
        let (at, ab) = (self.center[1] - self.half_height, self.center[1] + self.half_height);
        let (bl, br) = (other.center[0] - other.half_width, other.center[0] + other.half_width);
        let (bt, bb) = (other.center[1] - other.half_height, other.center[1] + other.half_height);
        al < br && ar > bl && at < bb && ab > bt
    }
}
