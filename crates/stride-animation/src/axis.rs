//! Up-axis conversion between Y-up and Z-up authoring conventions

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use stride_core::Mat4;

/// Which axis points up in the space an asset was authored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpAxis {
    #[default]
    YUp,
    ZUp,
}

impl UpAxis {
    pub fn from_y_up(source_is_y_up: bool) -> Self {
        if source_is_y_up {
            UpAxis::YUp
        } else {
            UpAxis::ZUp
        }
    }

    pub fn is_y_up(self) -> bool {
        self == UpAxis::YUp
    }
}

/// Matrix taking `source`-up data into `target`-up space.
///
/// Identity when the conventions match, otherwise a quarter turn about X.
pub fn axis_conversion(source: UpAxis, target: UpAxis) -> Mat4 {
    match (source, target) {
        (UpAxis::ZUp, UpAxis::YUp) => Mat4::rotation_x(FRAC_PI_2),
        (UpAxis::YUp, UpAxis::ZUp) => Mat4::rotation_x(-FRAC_PI_2),
        _ => Mat4::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::Vec3;

    #[test]
    fn same_axis_is_identity() {
        assert_eq!(axis_conversion(UpAxis::YUp, UpAxis::YUp), Mat4::IDENTITY);
        assert_eq!(axis_conversion(UpAxis::ZUp, UpAxis::ZUp), Mat4::IDENTITY);
    }

    #[test]
    fn conversions_are_inverse() {
        let there = axis_conversion(UpAxis::ZUp, UpAxis::YUp);
        let back = axis_conversion(UpAxis::YUp, UpAxis::ZUp);
        assert!((there * back).approx_eq(&Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn z_up_to_y_up_moves_a_unit_axis_onto_another() {
        let m = axis_conversion(UpAxis::ZUp, UpAxis::YUp);
        let p = m.transform_point(Vec3::new(0.0, 0.0, 1.0));
        // A quarter turn about X keeps x and swaps the other two axes (up to sign)
        assert!(p.x.abs() < 1e-6);
        assert!((p.y.abs() - 1.0).abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn from_bool() {
        assert_eq!(UpAxis::from_y_up(true), UpAxis::YUp);
        assert_eq!(UpAxis::from_y_up(false), UpAxis::ZUp);
    }
}
