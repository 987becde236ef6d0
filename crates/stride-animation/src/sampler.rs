//! Keyframe sampling: wrapped lookup with linear TRS and slerp rotation

use crate::clip::{BoneAnimTrack, Keyframe};
use stride_core::{Mat4, Quat, Vec3};

/// A decomposed local transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for JointPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl JointPose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// `Scale * Rotation * Translation`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl From<&Keyframe> for JointPose {
    fn from(k: &Keyframe) -> Self {
        Self {
            translation: k.translation,
            rotation: k.rotation,
            scale: k.scale,
        }
    }
}

/// Wrap `time` into `[0, duration)`. Non-positive durations leave it untouched.
pub fn wrap_time(time: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return time;
    }
    let wrapped = time % duration;
    if wrapped < 0.0 {
        // Tiny negatives round up to `duration` itself
        let folded = wrapped + duration;
        if folded >= duration {
            0.0
        } else {
            folded
        }
    } else {
        wrapped
    }
}

/// Sample a track at `time_ticks`, wrapping by the track's own length.
///
/// Past the last key the lookup falls back to the first key.
pub fn sample_track(track: &BoneAnimTrack, time_ticks: f64) -> JointPose {
    let keys = &track.keyframes;
    if keys.is_empty() {
        return JointPose::IDENTITY;
    }

    let t = wrap_time(time_ticks, track.duration());

    // First key at or after t
    let (k1, k2) = match keys.partition_point(|k| k.time < t) {
        i if i == keys.len() => (0, 0),
        i => (i.saturating_sub(1), i),
    };

    let a = &keys[k1];
    if k1 == k2 {
        return JointPose::from(a);
    }
    let b = &keys[k2];

    let span = b.time - a.time;
    let alpha = if span > 0.0 {
        ((t - a.time) / span) as f32
    } else {
        0.0
    };

    JointPose {
        translation: a.translation.lerp(&b.translation, alpha),
        rotation: a.rotation.slerp(&b.rotation, alpha),
        scale: a.scale.lerp(&b.scale, alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn key(time: f64, x: f32, angle: f32) -> Keyframe {
        Keyframe {
            time,
            translation: Vec3::new(x, 0.0, 0.0),
            rotation: Quat::from_axis_angle(Vec3::UP, angle),
            scale: Vec3::ONE,
        }
    }

    fn track(keys: Vec<Keyframe>) -> BoneAnimTrack {
        BoneAnimTrack {
            node_name: "hip".into(),
            node: Some(1),
            keyframes: keys,
        }
    }

    #[test]
    fn empty_track_is_identity() {
        assert_eq!(sample_track(&track(vec![]), 12.0), JointPose::IDENTITY);
    }

    #[test]
    fn single_key_returned_at_any_time() {
        let t = track(vec![key(0.0, 4.0, 0.3)]);
        for time in [-5.0, 0.0, 3.0, 100.0] {
            let pose = sample_track(&t, time);
            assert_eq!(pose.translation.x, 4.0);
        }
    }

    #[test]
    fn midpoint_interpolates_translation_and_rotation() {
        let t = track(vec![key(0.0, 0.0, 0.0), key(30.0, 10.0, FRAC_PI_2)]);
        let pose = sample_track(&t, 15.0);
        assert!((pose.translation.x - 5.0).abs() < 1e-5);
        let expected = Quat::from_axis_angle(Vec3::UP, FRAC_PI_2 / 2.0);
        assert!(pose.rotation.approx_eq(&expected, 1e-5));
    }

    #[test]
    fn time_past_duration_wraps() {
        // Track length 30: tick 75 wraps to 15
        let t = track(vec![key(0.0, 0.0, 0.0), key(30.0, 10.0, FRAC_PI_2)]);
        let wrapped = sample_track(&t, 75.0);
        let direct = sample_track(&t, 15.0);
        assert!((wrapped.translation.x - direct.translation.x).abs() < 1e-5);
        assert!(wrapped.rotation.approx_eq(&direct.rotation, 1e-5));
    }

    #[test]
    fn negative_time_wraps_forward() {
        let t = track(vec![key(0.0, 0.0, 0.0), key(30.0, 30.0, 0.0)]);
        let pose = sample_track(&t, -10.0);
        assert!((pose.translation.x - 20.0).abs() < 1e-4);
    }

    #[test]
    fn exact_key_time_returns_that_key() {
        let t = track(vec![key(0.0, 0.0, 0.0), key(10.0, 1.0, 0.0), key(20.0, 2.0, 0.0)]);
        let pose = sample_track(&t, 10.0);
        assert!((pose.translation.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn first_key_after_start_lerps_from_itself() {
        // t = 0 finds key 0 as the first key at or after t
        let t = track(vec![key(0.0, 7.0, 0.0), key(10.0, 1.0, 0.0)]);
        assert_eq!(sample_track(&t, 0.0).translation.x, 7.0);
    }

    #[test]
    fn coincident_keys_do_not_divide_by_zero() {
        let t = track(vec![key(0.0, 0.0, 0.0), key(5.0, 1.0, 0.0), key(5.0, 9.0, 0.0), key(10.0, 2.0, 0.0)]);
        let pose = sample_track(&t, 5.0);
        assert!(pose.translation.x.is_finite());
    }

    #[test]
    fn wrap_time_edges() {
        assert_eq!(wrap_time(5.0, 0.0), 5.0);
        assert_eq!(wrap_time(-5.0, 0.0), -5.0);
        assert!((wrap_time(-1.0, 4.0) - 3.0).abs() < 1e-12);
        assert_eq!(wrap_time(8.0, 4.0), 0.0);
    }

    #[test]
    fn to_matrix_places_translation_in_last_row() {
        let pose = JointPose {
            translation: Vec3::new(1.0, 2.0, 3.0),
            ..JointPose::IDENTITY
        };
        assert_eq!(pose.to_matrix().translation(), Vec3::new(1.0, 2.0, 3.0));
    }
}
