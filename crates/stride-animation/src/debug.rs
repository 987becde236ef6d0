//! Debug line geometry for drawing a posed skeleton

use crate::model::SkinnedModel;
use crate::pose::Pose;
use crate::skeleton::{skeleton_bone_names, skeleton_closure, NodeIndex};
use stride_core::{Color, Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonDebugSettings {
    /// Half-length of each joint cross arm
    pub joint_size: f32,
    pub joint_color: Color,
    pub bone_color: Color,
}

impl Default for SkeletonDebugSettings {
    fn default() -> Self {
        Self {
            joint_size: 0.2,
            joint_color: Color::new(1.0, 0.9, 0.2, 1.0),
            bone_color: Color::new(0.9, 0.6, 0.1, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

/// Three axis-aligned segments crossing at `center`
pub fn joint_cross(center: Vec3, size: f32, color: Color) -> [LineSegment; 3] {
    let arm = |axis: Vec3| LineSegment {
        start: center - axis * size,
        end: center + axis * size,
        color,
    };
    [
        arm(Vec3::new(1.0, 0.0, 0.0)),
        arm(Vec3::new(0.0, 1.0, 0.0)),
        arm(Vec3::new(0.0, 0.0, 1.0)),
    ]
}

/// Joint crosses and parent-to-child bone segments for every skeleton node in `pose`.
///
/// The skeleton is the skinning bones plus their ancestors, minus the scene root.
/// Each model-space transform is carried into world space by `world`.
pub fn skeleton_lines(
    model: &SkinnedModel,
    pose: &Pose,
    world: Mat4,
    settings: &SkeletonDebugSettings,
) -> Vec<LineSegment> {
    let scene = model.scene();
    let bone_names = skeleton_bone_names(scene);
    if bone_names.is_empty() {
        return Vec::new();
    }
    let closure = skeleton_closure(scene, model.node_lookup(), &bone_names);

    let mut nodes: Vec<NodeIndex> = closure.iter().copied().collect();
    nodes.sort_unstable();

    let world_position = |node: NodeIndex| pose.get(node).map(|m| (*m * world).translation());

    let mut lines = Vec::new();
    for node in nodes {
        let Some(joint) = world_position(node) else {
            continue;
        };
        lines.extend(joint_cross(joint, settings.joint_size, settings.joint_color));

        let parent_pos = scene.nodes[node]
            .parent
            .filter(|p| closure.contains(p))
            .and_then(world_position);
        if let Some(parent_pos) = parent_pos {
            lines.push(LineSegment {
                start: parent_pos,
                end: joint,
                color: settings.bone_color,
            });
        }
    }
    lines
}
