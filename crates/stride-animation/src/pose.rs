//! Pose evaluation: sample every node and accumulate model-space transforms

use crate::axis::axis_conversion;
use crate::clip::AnimationClip;
use crate::model::SkinnedModel;
use crate::sampler::sample_track;
use crate::skeleton::NodeIndex;
use std::collections::HashMap;
use stride_core::Mat4;
use stride_import::ImportedScene;

/// Model-space transform of every node reached by one hierarchy walk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pose {
    model_space: HashMap<NodeIndex, Mat4>,
}

impl Pose {
    pub fn get(&self, node: NodeIndex) -> Option<&Mat4> {
        self.model_space.get(&node)
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.model_space.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.model_space.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model_space.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Mat4)> {
        self.model_space.iter().map(|(n, m)| (*n, m))
    }
}

/// Local transform of `node` at `time_ticks`: the resolved track's sample,
/// or the bind transform when no non-empty track drives it.
pub fn sample_local_transform(
    model: &SkinnedModel,
    clip: &AnimationClip,
    node: NodeIndex,
    time_ticks: f64,
) -> Mat4 {
    let Some(data) = model.scene().node(node) else {
        return Mat4::IDENTITY;
    };
    match clip.find_track_for_node(node, &data.name) {
        Some(track) if !track.keyframes.is_empty() => {
            sample_track(track, time_ticks).to_matrix()
        }
        _ => data.transform,
    }
}

/// Pose the whole model at `time_ticks`, converting the clip's authoring axis to the model's.
pub fn build_pose(model: &SkinnedModel, clip: &AnimationClip, time_ticks: f64) -> Pose {
    let Some(root) = model.root() else {
        return Pose::default();
    };
    let fix = axis_conversion(clip.source_up, model.up_axis());
    build_pose_from(model, clip, root, fix, time_ticks)
}

/// Pose the subtree under `root`, with `root_parent` standing in for its parent's transform.
pub fn build_pose_from(
    model: &SkinnedModel,
    clip: &AnimationClip,
    root: NodeIndex,
    root_parent: Mat4,
    time_ticks: f64,
) -> Pose {
    walk(model.scene(), root, root_parent, |node, _| {
        sample_local_transform(model, clip, node, time_ticks)
    })
}

/// Bind pose: every node at its imported local transform
pub fn bind_pose(model: &SkinnedModel) -> Pose {
    let Some(root) = model.root() else {
        return Pose::default();
    };
    walk(model.scene(), root, Mat4::IDENTITY, |_, bind| bind)
}

/// Pre-order accumulation of `local * parent`. Each node is written once.
fn walk<F>(scene: &ImportedScene, root: NodeIndex, root_parent: Mat4, local_of: F) -> Pose
where
    F: Fn(NodeIndex, Mat4) -> Mat4,
{
    let mut model_space = HashMap::with_capacity(scene.nodes.len());
    let mut stack = vec![(root, root_parent)];

    while let Some((index, parent)) = stack.pop() {
        let Some(node) = scene.node(index) else {
            continue;
        };
        if model_space.contains_key(&index) {
            continue;
        }
        let world = local_of(index, node.transform) * parent;
        model_space.insert(index, world);
        for &child in node.children.iter().rev() {
            stack.push((child, world));
        }
    }

    Pose { model_space }
}
