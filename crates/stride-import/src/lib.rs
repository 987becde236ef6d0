//! Stride Import - Asset importers
//!
//! Loads model hierarchies, skinning bone lists, and keyframe animations into
//! an owned, index-based scene description. glTF/GLB files go through the
//! `gltf` crate; `.toml` files describe the same structure by hand.

mod gltf_import;
mod toml_import;
mod types;

pub use gltf_import::{import_gltf, GLTF_TICKS_PER_SECOND};
pub use toml_import::{import_toml, import_toml_str};
pub use types::{
    ImportedAnimation, ImportedBone, ImportedChannel, ImportedMesh, ImportedNode, ImportedScene,
    QuatKey, VectorKey,
};

use std::path::Path;
use stride_core::{Result, StrideError};

/// Import a scene, choosing the importer from the file extension
pub fn import_scene<P: AsRef<Path>>(path: P) -> Result<ImportedScene> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let scene = match ext.as_str() {
        "gltf" | "glb" => import_gltf(path)?,
        "toml" => import_toml(path)?,
        other => {
            return Err(StrideError::ImportError(format!(
                "Unsupported file extension '{}' for {}",
                other,
                path.display()
            )))
        }
    };

    log::info!(
        "Imported '{}': {} nodes, {} meshes, {} bone entries, {} animations",
        scene.name,
        scene.nodes.len(),
        scene.meshes.len(),
        scene.bone_entry_count(),
        scene.animations.len()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let result = import_scene("model.fbx");
        assert!(matches!(result, Err(StrideError::ImportError(_))));
    }

    #[test]
    fn toml_scene_from_disk() {
        let dir = std::env::temp_dir().join("stride_import_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny_rig.toml");
        std::fs::write(&path, "[[nodes]]\nname = \"root\"\n").unwrap();

        let scene = import_scene(&path).unwrap();
        assert_eq!(scene.name, "tiny_rig");
        assert_eq!(scene.nodes.len(), 1);
        assert_eq!(scene.root, Some(0));
    }
}
