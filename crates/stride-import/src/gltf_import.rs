//! glTF/GLB file importer
//!
//! glTF stores column-vector matrices in column-major order, which is exactly the
//! row-major layout of the same transform in the row-vector convention, so node and
//! inverse-bind matrices are taken over without transposition.

use crate::types::{
    ImportedAnimation, ImportedBone, ImportedChannel, ImportedMesh, ImportedNode, ImportedScene,
    QuatKey, VectorKey,
};
use gltf::animation::util::ReadOutputs;
use gltf::animation::Interpolation;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use stride_core::{Mat4, Quat, Result, StrideError, Vec3};

/// glTF key times are seconds; they are stored as millisecond ticks.
pub const GLTF_TICKS_PER_SECOND: f64 = 1000.0;

/// Import a glTF or GLB file
pub fn import_gltf<P: AsRef<Path>>(path: P) -> Result<ImportedScene> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| StrideError::ImportError(format!("Failed to import glTF: {}", e)))?;

    let file_name = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();

    // Arena slot 0 is a synthetic root; glTF node `i` lands in slot `i + 1`.
    let mut nodes = Vec::with_capacity(document.nodes().len() + 1);
    nodes.push(ImportedNode {
        name: format!("{}_root", file_name),
        transform: Mat4::IDENTITY,
        parent: None,
        children: Vec::new(),
    });
    for node in document.nodes() {
        nodes.push(ImportedNode {
            name: node_name(&node),
            transform: Mat4::from_rows(node.transform().matrix()),
            parent: None,
            children: node.children().map(|c| c.index() + 1).collect(),
        });
    }

    let scene_roots: Vec<usize> = match document
        .default_scene()
        .or_else(|| document.scenes().next())
    {
        Some(scene) => scene.nodes().map(|n| n.index() + 1).collect(),
        None => {
            let children: HashSet<usize> = nodes
                .iter()
                .flat_map(|n| n.children.iter().copied())
                .collect();
            (1..nodes.len()).filter(|i| !children.contains(i)).collect()
        }
    };
    nodes[0].children = scene_roots;

    let mut meshes = Vec::new();
    for node in document.nodes() {
        let Some(mesh) = node.mesh() else {
            continue;
        };

        let bones: Vec<ImportedBone> = match node.skin() {
            Some(skin) => {
                let reader = skin.reader(|buffer| Some(&buffers[buffer.index()]));
                let inverse_binds: Vec<[[f32; 4]; 4]> = reader
                    .read_inverse_bind_matrices()
                    .map(|iter| iter.collect())
                    .unwrap_or_default();
                skin.joints()
                    .enumerate()
                    .map(|(i, joint)| ImportedBone {
                        name: node_name(&joint),
                        offset: inverse_binds
                            .get(i)
                            .map(|m| Mat4::from_rows(*m))
                            .unwrap_or(Mat4::IDENTITY),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let mesh_name = mesh
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

        for _primitive in mesh.primitives() {
            meshes.push(ImportedMesh {
                name: mesh_name.clone(),
                bones: bones.clone(),
            });
        }
    }

    let mut animations = Vec::new();
    for anim in document.animations() {
        let mut channels: Vec<ImportedChannel> = Vec::new();
        let mut slot_by_node: HashMap<usize, usize> = HashMap::new();
        let mut max_time = 0.0f64;

        for channel in anim.channels() {
            let target = channel.target().node();
            let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
            let Some(inputs) = reader.read_inputs() else {
                continue;
            };
            let times: Vec<f64> = inputs
                .map(|t| t as f64 * GLTF_TICKS_PER_SECOND)
                .collect();
            let Some(outputs) = reader.read_outputs() else {
                continue;
            };
            let cubic = channel.sampler().interpolation() == Interpolation::CubicSpline;

            let slot = *slot_by_node.entry(target.index()).or_insert_with(|| {
                channels.push(ImportedChannel {
                    node_name: node_name(&target),
                    ..Default::default()
                });
                channels.len() - 1
            });

            match outputs {
                ReadOutputs::Translations(iter) => {
                    let values = spline_values(iter.collect(), cubic);
                    channels[slot].position_keys = vector_keys(&times, &values);
                }
                ReadOutputs::Rotations(rotations) => {
                    let values = spline_values(rotations.into_f32().collect(), cubic);
                    channels[slot].rotation_keys = times
                        .iter()
                        .zip(values.iter())
                        .map(|(&time, q)| QuatKey {
                            time,
                            value: Quat::from_array(*q),
                        })
                        .collect();
                }
                ReadOutputs::Scales(iter) => {
                    let values = spline_values(iter.collect(), cubic);
                    channels[slot].scaling_keys = vector_keys(&times, &values);
                }
                ReadOutputs::MorphTargetWeights(_) => continue,
            }

            if let Some(last) = times.last() {
                max_time = max_time.max(*last);
            }
        }

        channels.retain(|c| {
            !(c.position_keys.is_empty() && c.rotation_keys.is_empty() && c.scaling_keys.is_empty())
        });

        animations.push(ImportedAnimation {
            name: anim.name().unwrap_or("").to_string(),
            duration: max_time,
            ticks_per_second: GLTF_TICKS_PER_SECOND,
            channels,
        });
    }

    let mut scene = ImportedScene {
        name: file_name,
        nodes,
        root: Some(0),
        meshes,
        animations,
    };
    scene.link_parents();
    Ok(scene)
}

fn node_name(node: &gltf::Node<'_>) -> String {
    node.name()
        .map(String::from)
        .unwrap_or_else(|| format!("node_{}", node.index()))
}

/// Cubic-spline outputs come as (in-tangent, value, out-tangent) triplets; keep the value.
fn spline_values<T: Copy>(values: Vec<T>, cubic: bool) -> Vec<T> {
    if !cubic {
        return values;
    }
    values.chunks(3).filter_map(|c| c.get(1).copied()).collect()
}

fn vector_keys(times: &[f64], values: &[[f32; 3]]) -> Vec<VectorKey> {
    times
        .iter()
        .zip(values.iter())
        .map(|(&time, v)| VectorKey {
            time,
            value: Vec3::from_array(*v),
        })
        .collect()
}
