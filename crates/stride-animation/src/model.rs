//! Skinned model asset: an imported hierarchy with its cached skeleton index

use crate::axis::UpAxis;
use crate::skeleton::{BoneIndexTable, NodeIndex, NodeLookup};
use std::collections::HashMap;
use std::path::Path;
use stride_core::{Mat4, Result};
use stride_import::ImportedScene;

/// A loaded model the animation system poses and skins.
///
/// Immutable once built; share it between players behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SkinnedModel {
    scene: ImportedScene,
    up_axis: UpAxis,
    bone_table: BoneIndexTable,
    node_lookup: NodeLookup,
    bone_offsets: HashMap<String, Mat4>,
}

impl SkinnedModel {
    pub fn new(scene: ImportedScene, source_is_y_up: bool) -> Self {
        let bone_table = BoneIndexTable::build(&scene);
        let node_lookup = NodeLookup::build(&scene);

        // The first mesh that declares a bone supplies its offset
        let mut bone_offsets = HashMap::new();
        for mesh in &scene.meshes {
            for bone in &mesh.bones {
                bone_offsets
                    .entry(bone.name.clone())
                    .or_insert(bone.offset);
            }
        }

        Self {
            scene,
            up_axis: UpAxis::from_y_up(source_is_y_up),
            bone_table,
            node_lookup,
            bone_offsets,
        }
    }

    /// Import a model file and index its skeleton
    pub fn load<P: AsRef<Path>>(path: P, source_is_y_up: bool) -> Result<Self> {
        let scene = stride_import::import_scene(path)?;
        let model = Self::new(scene, source_is_y_up);
        log::info!(
            "Model '{}': {} bones, {} named nodes",
            model.scene.name,
            model.bone_table.len(),
            model.node_lookup.len()
        );
        Ok(model)
    }

    pub fn scene(&self) -> &ImportedScene {
        &self.scene
    }

    pub fn name(&self) -> &str {
        &self.scene.name
    }

    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.scene.root.filter(|r| *r < self.scene.nodes.len())
    }

    pub fn bone_table(&self) -> &BoneIndexTable {
        &self.bone_table
    }

    pub fn node_lookup(&self) -> &NodeLookup {
        &self.node_lookup
    }

    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_lookup.find(name)
    }

    pub fn bone_offset(&self, name: &str) -> Option<&Mat4> {
        self.bone_offsets.get(name)
    }

    /// Whether any mesh declares skinning bones
    pub fn has_skin_bones(&self) -> bool {
        !self.bone_offsets.is_empty()
    }
}
