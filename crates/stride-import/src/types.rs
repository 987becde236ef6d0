//! Import result types
//!
//! The scene graph is an arena: nodes refer to each other by index into
//! `ImportedScene::nodes`, so nothing borrows from the importer once loaded.

use serde::{Deserialize, Serialize};
use stride_core::{Mat4, Quat, Vec3};

/// Result of importing a model or animation file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportedScene {
    #[serde(default)]
    pub name: String,
    /// Node arena
    #[serde(default)]
    pub nodes: Vec<ImportedNode>,
    /// Index of the hierarchy root in `nodes`
    #[serde(default)]
    pub root: Option<usize>,
    /// Sub-meshes with their skinning bone lists
    #[serde(default)]
    pub meshes: Vec<ImportedMesh>,
    /// Animations in file order
    #[serde(default)]
    pub animations: Vec<ImportedAnimation>,
}

impl ImportedScene {
    pub fn node(&self, index: usize) -> Option<&ImportedNode> {
        self.nodes.get(index)
    }

    pub fn root_node(&self) -> Option<&ImportedNode> {
        self.root.and_then(|r| self.nodes.get(r))
    }

    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Total number of bone entries over all meshes (duplicates included)
    pub fn bone_entry_count(&self) -> usize {
        self.meshes.iter().map(|m| m.bones.len()).sum()
    }

    /// Rebuild every node's `parent` from the `children` lists
    pub fn link_parents(&mut self) {
        for node in &mut self.nodes {
            node.parent = None;
        }
        for index in 0..self.nodes.len() {
            let children = self.nodes[index].children.clone();
            for child in children {
                if let Some(c) = self.nodes.get_mut(child) {
                    c.parent = Some(index);
                }
            }
        }
    }
}

/// A node in the imported hierarchy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportedNode {
    pub name: String,
    /// Bind-pose local transform
    #[serde(default)]
    pub transform: Mat4,
    /// Rebuilt after load, never read from files
    #[serde(skip)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub children: Vec<usize>,
}

/// A sub-mesh's skinning data; vertex data is handled by the renderer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportedMesh {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bones: Vec<ImportedBone>,
}

/// A skinning bone: maps mesh space into the bone's bind space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedBone {
    pub name: String,
    #[serde(default)]
    pub offset: Mat4,
}

/// A position or scale key
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VectorKey {
    pub time: f64,
    pub value: Vec3,
}

/// A rotation key
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuatKey {
    pub time: f64,
    pub value: Quat,
}

/// Per-node keys; the three key lists are independent and may differ in length
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportedChannel {
    pub node_name: String,
    #[serde(default)]
    pub position_keys: Vec<VectorKey>,
    #[serde(default)]
    pub rotation_keys: Vec<QuatKey>,
    #[serde(default)]
    pub scaling_keys: Vec<VectorKey>,
}

/// A named animation, times in ticks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportedAnimation {
    #[serde(default)]
    pub name: String,
    /// Declared duration in ticks
    #[serde(default)]
    pub duration: f64,
    /// Declared tick rate; zero means "not specified"
    #[serde(default)]
    pub ticks_per_second: f64,
    #[serde(default)]
    pub channels: Vec<ImportedChannel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, children: Vec<usize>) -> ImportedNode {
        ImportedNode {
            name: name.into(),
            children,
            ..Default::default()
        }
    }

    #[test]
    fn link_parents_follows_children() {
        let mut scene = ImportedScene {
            nodes: vec![node("root", vec![1, 2]), node("a", vec![]), node("b", vec![])],
            root: Some(0),
            ..Default::default()
        };
        scene.link_parents();
        assert_eq!(scene.nodes[0].parent, None);
        assert_eq!(scene.nodes[1].parent, Some(0));
        assert_eq!(scene.nodes[2].parent, Some(0));
        assert_eq!(scene.root_node().map(|n| n.name.as_str()), Some("root"));
    }

    #[test]
    fn bone_entries_count_duplicates() {
        let bone = |n: &str| ImportedBone {
            name: n.into(),
            offset: Mat4::IDENTITY,
        };
        let scene = ImportedScene {
            meshes: vec![
                ImportedMesh {
                    name: "body".into(),
                    bones: vec![bone("hip"), bone("spine")],
                },
                ImportedMesh {
                    name: "head".into(),
                    bones: vec![bone("spine")],
                },
            ],
            ..Default::default()
        };
        assert_eq!(scene.bone_entry_count(), 3);
    }
}
