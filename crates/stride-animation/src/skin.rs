//! Skinning matrices and the GPU-facing bone palette

use crate::model::SkinnedModel;
use crate::pose::Pose;
use bytemuck::{Pod, Zeroable};
use stride_core::Mat4;

/// Fixed size of the bone palette
pub const MAX_BONES: usize = 256;

/// Per-bone skin matrices for `pose`, transposed for column-major upload.
///
/// Entry `i` is `transpose(offset * model_space)` for the bone with index `i`.
/// Bones missing a node, a posed transform, or an offset stay identity. Empty
/// when the model declares no skinning bones.
pub fn compute_skin_matrices(model: &SkinnedModel, pose: &Pose) -> Vec<Mat4> {
    let table = model.bone_table();
    if table.is_empty() || !model.has_skin_bones() {
        return Vec::new();
    }

    let mut matrices = vec![Mat4::IDENTITY; table.len().min(MAX_BONES)];
    for (name, index) in table.iter() {
        if index >= MAX_BONES {
            continue;
        }
        let Some(node) = model.find_node(name) else {
            continue;
        };
        let Some(model_space) = pose.get(node) else {
            continue;
        };
        let Some(offset) = model.bone_offset(name) else {
            continue;
        };
        matrices[index] = (*offset * *model_space).transpose();
    }
    matrices
}

/// Bone palette in upload layout: `MAX_BONES` 4x4 float matrices.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct SkinningBuffer {
    pub bone_matrices: [[[f32; 4]; 4]; MAX_BONES],
}

impl SkinningBuffer {
    pub fn new() -> Self {
        Self {
            bone_matrices: [Mat4::IDENTITY.rows; MAX_BONES],
        }
    }

    /// Build a palette from skin matrices; slots past the input stay identity.
    pub fn from_skin_matrices(matrices: &[Mat4]) -> Self {
        let mut buffer = Self::new();
        buffer.update(matrices);
        buffer
    }

    /// Overwrite the leading slots, reset the rest to identity
    pub fn update(&mut self, matrices: &[Mat4]) {
        for (i, slot) in self.bone_matrices.iter_mut().enumerate() {
            *slot = matrices.get(i).map(|m| m.rows).unwrap_or(Mat4::IDENTITY.rows);
        }
    }

    pub fn matrix(&self, index: usize) -> Option<Mat4> {
        self.bone_matrices.get(index).map(|rows| Mat4::from_rows(*rows))
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for SkinningBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SkinningBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkinningBuffer")
            .field("bones", &MAX_BONES)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::bind_pose;
    use stride_core::Vec3;
    use stride_import::{ImportedBone, ImportedMesh, ImportedNode, ImportedScene};

    fn skinned(bone_names: &[&str], extra_nodes: usize) -> SkinnedModel {
        let mut nodes = vec![ImportedNode {
            name: "root".into(),
            children: (1..=bone_names.len() + extra_nodes).collect(),
            ..Default::default()
        }];
        for (i, name) in bone_names.iter().enumerate() {
            nodes.push(ImportedNode {
                name: name.to_string(),
                transform: Mat4::from_translation(Vec3::new(i as f32, 0.0, 0.0)),
                ..Default::default()
            });
        }
        for i in 0..extra_nodes {
            nodes.push(ImportedNode {
                name: format!("extra_{}", i),
                ..Default::default()
            });
        }
        let bones = bone_names
            .iter()
            .map(|n| ImportedBone {
                name: n.to_string(),
                offset: Mat4::IDENTITY,
            })
            .collect();
        let mut scene = ImportedScene {
            nodes,
            root: Some(0),
            meshes: vec![ImportedMesh {
                name: "body".into(),
                bones,
            }],
            ..Default::default()
        };
        scene.link_parents();
        SkinnedModel::new(scene, true)
    }

    #[test]
    fn unskinned_model_yields_nothing() {
        let model = SkinnedModel::new(ImportedScene::default(), true);
        assert!(compute_skin_matrices(&model, &Pose::default()).is_empty());
    }

    #[test]
    fn skin_matrix_is_transposed_offset_times_pose() {
        let model = skinned(&["a", "b"], 0);
        let pose = bind_pose(&model);
        let skin = compute_skin_matrices(&model, &pose);
        assert_eq!(skin.len(), 2);
        let expected = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)).transpose();
        assert!(skin[1].approx_eq(&expected, 1e-6));
    }

    #[test]
    fn unposed_bones_stay_identity() {
        let model = skinned(&["a", "b"], 0);
        let skin = compute_skin_matrices(&model, &Pose::default());
        assert!(skin.iter().all(|m| *m == Mat4::IDENTITY));
    }

    #[test]
    fn palette_is_capped() {
        let names: Vec<String> = (0..300).map(|i| format!("bone_{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let model = skinned(&refs, 0);
        let skin = compute_skin_matrices(&model, &bind_pose(&model));
        assert_eq!(skin.len(), MAX_BONES);
    }

    #[test]
    fn buffer_defaults_to_identity_and_fills_prefix() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let buffer = SkinningBuffer::from_skin_matrices(&[m]);
        assert_eq!(buffer.matrix(0), Some(m));
        assert_eq!(buffer.matrix(1), Some(Mat4::IDENTITY));
        assert_eq!(buffer.matrix(MAX_BONES), None);
        assert_eq!(buffer.as_bytes().len(), MAX_BONES * 64);
    }
}
