//! Skeleton index: bone-name tables and hierarchy lookups over an imported scene

use std::collections::{HashMap, HashSet};
use stride_import::ImportedScene;

/// Index of a node in `ImportedScene::nodes`
pub type NodeIndex = usize;

/// Dense bone-name -> index mapping, assigned in first-seen order over all meshes.
#[derive(Debug, Clone, Default)]
pub struct BoneIndexTable {
    indices: HashMap<String, usize>,
    names: Vec<String>,
}

impl BoneIndexTable {
    /// Scan every mesh's bone list in file order; shared bones keep their first index.
    pub fn build(scene: &ImportedScene) -> Self {
        let mut table = Self::default();
        for mesh in &scene.meshes {
            for bone in &mesh.bones {
                if !table.indices.contains_key(&bone.name) {
                    table.indices.insert(bone.name.clone(), table.names.len());
                    table.names.push(bone.name.clone());
                }
            }
        }
        table
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(name, index)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.names.iter().enumerate().map(|(i, n)| (n.as_str(), i))
    }
}

/// Node-name -> node lookup built by one pre-order traversal.
///
/// When names repeat, the first node in pre-order wins. Unnamed nodes are not indexed.
#[derive(Debug, Clone, Default)]
pub struct NodeLookup {
    by_name: HashMap<String, NodeIndex>,
}

impl NodeLookup {
    pub fn build(scene: &ImportedScene) -> Self {
        let mut by_name = HashMap::new();
        for index in preorder(scene) {
            let name = &scene.nodes[index].name;
            if !name.is_empty() {
                by_name.entry(name.clone()).or_insert(index);
            }
        }
        Self { by_name }
    }

    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// One-off lookup with a fresh traversal. Prefer a cached `NodeLookup` for repeated queries.
pub fn find_node_by_name(scene: &ImportedScene, name: &str) -> Option<NodeIndex> {
    NodeLookup::build(scene).find(name)
}

/// Nodes reachable from the root, parents before children, children in declared order.
///
/// Each node is yielded at most once even if the arena links are malformed.
pub fn preorder(scene: &ImportedScene) -> Vec<NodeIndex> {
    let Some(root) = scene.root.filter(|r| *r < scene.nodes.len()) else {
        return Vec::new();
    };
    preorder_from(scene, root)
}

/// Pre-order walk starting at `start`
pub fn preorder_from(scene: &ImportedScene, start: NodeIndex) -> Vec<NodeIndex> {
    let mut order = Vec::with_capacity(scene.nodes.len());
    let mut visited = vec![false; scene.nodes.len()];
    let mut stack = vec![start];

    while let Some(index) = stack.pop() {
        if index >= scene.nodes.len() || visited[index] {
            continue;
        }
        visited[index] = true;
        order.push(index);
        stack.extend(scene.nodes[index].children.iter().rev().copied());
    }

    order
}

/// Names of every skinning bone declared by any mesh
pub fn skeleton_bone_names(scene: &ImportedScene) -> HashSet<String> {
    scene
        .meshes
        .iter()
        .flat_map(|m| m.bones.iter())
        .filter(|b| !b.name.is_empty())
        .map(|b| b.name.clone())
        .collect()
}

/// Bone nodes plus all their ancestors, excluding the scene root
pub fn skeleton_closure(
    scene: &ImportedScene,
    lookup: &NodeLookup,
    bone_names: &HashSet<String>,
) -> HashSet<NodeIndex> {
    let mut closure = HashSet::new();
    for name in bone_names {
        let mut current = lookup.find(name);
        while let Some(index) = current {
            if Some(index) == scene.root {
                break;
            }
            if !closure.insert(index) {
                break;
            }
            current = scene.nodes[index].parent;
        }
    }
    closure
}

/// Closure nodes whose parent is missing, the scene root, or outside the closure. Sorted.
pub fn skeleton_roots(scene: &ImportedScene, closure: &HashSet<NodeIndex>) -> Vec<NodeIndex> {
    let mut roots: Vec<NodeIndex> = closure
        .iter()
        .copied()
        .filter(|&index| match scene.nodes[index].parent {
            None => true,
            Some(p) => Some(p) == scene.root || !closure.contains(&p),
        })
        .collect();
    roots.sort_unstable();
    roots
}

/// Whether any direct child of `node` is in `set`
pub fn any_child_in_set(scene: &ImportedScene, node: NodeIndex, set: &HashSet<NodeIndex>) -> bool {
    scene
        .node(node)
        .map(|n| n.children.iter().any(|c| set.contains(c)))
        .unwrap_or(false)
}
