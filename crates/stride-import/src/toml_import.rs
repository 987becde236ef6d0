//! TOML scene description importer
//!
//! The file format mirrors `ImportedScene`:
//! ```toml
//! name = "rig"
//! root = 0
//!
//! [[nodes]]
//! name = "root"
//! children = [1]
//!
//! [[nodes]]
//! name = "hip"
//! transform = [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0], [0.0, 2.0, 0.0, 1.0]]
//!
//! [[meshes]]
//! name = "body"
//! bones = [{ name = "hip" }]
//!
//! [[animations]]
//! name = "bob"
//! duration = 30.0
//! ticks_per_second = 30.0
//!
//! [[animations.channels]]
//! node_name = "hip"
//! position_keys = [{ time = 0.0, value = { x = 0.0, y = 0.0, z = 0.0 } }]
//! ```

use crate::types::ImportedScene;
use stride_core::{Result, StrideError};
use std::path::Path;

/// Import a `.toml` scene description from disk
pub fn import_toml<P: AsRef<Path>>(path: P) -> Result<ImportedScene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        StrideError::ImportError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let mut scene = import_toml_str(&content)?;
    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }
    Ok(scene)
}

/// Parse and validate a scene description
pub fn import_toml_str(content: &str) -> Result<ImportedScene> {
    let mut scene: ImportedScene = toml::from_str(content)?;
    validate_hierarchy(&scene)?;
    scene.link_parents();
    if scene.root.is_none() && !scene.nodes.is_empty() {
        scene.root = Some(0);
    }
    Ok(scene)
}

/// Every node may have at most one parent, and child links must stay in range.
fn validate_hierarchy(scene: &ImportedScene) -> Result<()> {
    let count = scene.nodes.len();
    if let Some(root) = scene.root {
        if root >= count {
            return Err(StrideError::ImportError(format!(
                "Root index {} out of range ({} nodes)",
                root, count
            )));
        }
    }

    let mut parent_of: Vec<Option<usize>> = vec![None; count];
    for (index, node) in scene.nodes.iter().enumerate() {
        for &child in &node.children {
            if child >= count {
                return Err(StrideError::ImportError(format!(
                    "Node '{}' references child {} out of range ({} nodes)",
                    node.name, child, count
                )));
            }
            if child == index {
                return Err(StrideError::ImportError(format!(
                    "Node '{}' lists itself as a child",
                    node.name
                )));
            }
            if let Some(existing) = parent_of[child] {
                return Err(StrideError::ImportError(format!(
                    "Node '{}' has two parents ('{}' and '{}')",
                    scene.nodes[child].name, scene.nodes[existing].name, node.name
                )));
            }
            parent_of[child] = Some(index);
        }
    }

    if let Some(root) = scene.root {
        if parent_of[root].is_some() {
            return Err(StrideError::ImportError(format!(
                "Root node '{}' has a parent",
                scene.nodes[root].name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIG: &str = r#"
name = "rig"
root = 0

[[nodes]]
name = "root"
children = [1]

[[nodes]]
name = "hip"
transform = [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0], [0.0, 2.0, 0.0, 1.0]]
children = [2]

[[nodes]]
name = "spine"

[[meshes]]
name = "body"
bones = [{ name = "hip" }, { name = "spine" }]

[[animations]]
name = "bob"
duration = 30.0
ticks_per_second = 30.0

[[animations.channels]]
node_name = "hip"
position_keys = [
    { time = 0.0, value = { x = 0.0, y = 2.0, z = 0.0 } },
    { time = 30.0, value = { x = 0.0, y = 3.0, z = 0.0 } },
]
rotation_keys = [{ time = 0.0, value = { x = 0.0, y = 0.0, z = 0.0, w = 1.0 } }]
"#;

    #[test]
    fn parse_rig() {
        let scene = import_toml_str(RIG).unwrap();
        assert_eq!(scene.name, "rig");
        assert_eq!(scene.nodes.len(), 3);
        assert_eq!(scene.nodes[2].parent, Some(1));
        assert_eq!(scene.nodes[1].transform.rows[3][1], 2.0);
        // Unspecified transforms default to identity
        assert_eq!(scene.nodes[2].transform, stride_core::Mat4::IDENTITY);
        assert_eq!(scene.meshes[0].bones.len(), 2);

        let anim = &scene.animations[0];
        assert_eq!(anim.channels[0].position_keys.len(), 2);
        assert_eq!(anim.channels[0].rotation_keys.len(), 1);
        assert!(anim.channels[0].scaling_keys.is_empty());
    }

    #[test]
    fn root_defaults_to_first_node() {
        let scene = import_toml_str("[[nodes]]\nname = \"only\"\n").unwrap();
        assert_eq!(scene.root, Some(0));
    }

    #[test]
    fn reject_out_of_range_child() {
        let result = import_toml_str("[[nodes]]\nname = \"a\"\nchildren = [4]\n");
        assert!(result.is_err());
    }

    #[test]
    fn reject_two_parents() {
        let toml_str = r#"
[[nodes]]
name = "a"
children = [2]

[[nodes]]
name = "b"
children = [2]

[[nodes]]
name = "c"
"#;
        assert!(import_toml_str(toml_str).is_err());
    }

    #[test]
    fn reject_self_parent() {
        assert!(import_toml_str("[[nodes]]\nname = \"a\"\nchildren = [0]\n").is_err());
    }
}
