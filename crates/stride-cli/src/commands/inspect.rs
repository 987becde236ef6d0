//! Inspect command - describe a model's hierarchy and skeleton

use anyhow::{Context, Result};
use serde::Serialize;
use stride_animation::skeleton::{preorder, skeleton_bone_names, skeleton_closure, skeleton_roots};
use stride_animation::SkinnedModel;

#[derive(Debug, Serialize)]
struct NodeReport {
    index: usize,
    depth: usize,
    name: String,
    children: usize,
}

#[derive(Debug, Serialize)]
struct AnimationReport {
    name: String,
    duration_ticks: f64,
    ticks_per_second: f64,
    channels: usize,
}

#[derive(Debug, Serialize)]
struct ModelReport {
    name: String,
    up_axis: String,
    nodes: Vec<NodeReport>,
    meshes: Vec<(String, usize)>,
    bones: Vec<(usize, String)>,
    skeleton_roots: Vec<String>,
    animations: Vec<AnimationReport>,
}

pub fn run(path: &str, model_y_up: bool, format: &str) -> Result<()> {
    let model = SkinnedModel::load(path, model_y_up)
        .with_context(|| format!("Failed to load model '{}'", path))?;
    let report = build_report(&model);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

fn build_report(model: &SkinnedModel) -> ModelReport {
    let scene = model.scene();

    let mut nodes = Vec::with_capacity(scene.nodes.len());
    for index in preorder(scene) {
        let node = &scene.nodes[index];
        let mut depth = 0;
        let mut parent = node.parent;
        while let Some(p) = parent {
            depth += 1;
            parent = scene.nodes[p].parent;
        }
        nodes.push(NodeReport {
            index,
            depth,
            name: node.name.clone(),
            children: node.children.len(),
        });
    }

    let bone_names = skeleton_bone_names(scene);
    let closure = skeleton_closure(scene, model.node_lookup(), &bone_names);
    let skeleton_roots = skeleton_roots(scene, &closure)
        .into_iter()
        .map(|i| scene.nodes[i].name.clone())
        .collect();

    ModelReport {
        name: model.name().to_string(),
        up_axis: format!("{:?}", model.up_axis()),
        nodes,
        meshes: scene
            .meshes
            .iter()
            .map(|m| (m.name.clone(), m.bones.len()))
            .collect(),
        bones: model
            .bone_table()
            .iter()
            .map(|(name, i)| (i, name.to_string()))
            .collect(),
        skeleton_roots,
        animations: scene
            .animations
            .iter()
            .map(|a| AnimationReport {
                name: a.name.clone(),
                duration_ticks: a.duration,
                ticks_per_second: a.ticks_per_second,
                channels: a.channels.len(),
            })
            .collect(),
    }
}

fn print_text(report: &ModelReport) {
    println!("Model: {} ({})", report.name, report.up_axis);

    println!();
    println!("Nodes ({}):", report.nodes.len());
    for node in &report.nodes {
        println!(
            "  {:indent$}[{}] {}",
            "",
            node.index,
            if node.name.is_empty() { "<unnamed>" } else { &node.name },
            indent = node.depth * 2
        );
    }

    println!();
    println!("Meshes ({}):", report.meshes.len());
    for (name, bones) in &report.meshes {
        println!("  {} - {} bones", name, bones);
    }

    println!();
    println!("Skinning bones ({}):", report.bones.len());
    for (index, name) in &report.bones {
        println!("  {:>3} {}", index, name);
    }
    if !report.skeleton_roots.is_empty() {
        println!("Skeleton roots: {}", report.skeleton_roots.join(", "));
    }

    println!();
    if report.animations.is_empty() {
        println!("No animations");
    } else {
        println!("Animations ({}):", report.animations.len());
        for anim in &report.animations {
            println!(
                "  {} - {:.1} ticks @ {} tps, {} channels",
                anim.name, anim.duration_ticks, anim.ticks_per_second, anim.channels
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_import::import_toml_str;

    const RIG: &str = r#"
[[nodes]]
name = "Scene"
children = [1]

[[nodes]]
name = "Hips"
children = [2]

[[nodes]]
name = "Spine"

[[meshes]]
name = "Body"
bones = [{ name = "Spine" }, { name = "Hips" }]
"#;

    #[test]
    fn report_lists_depths_and_bones() {
        let scene = import_toml_str(RIG).unwrap();
        let model = SkinnedModel::new(scene, true);
        let report = build_report(&model);

        let depths: Vec<usize> = report.nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![0, 1, 2]);
        assert_eq!(report.bones.len(), 2);
        assert_eq!(report.bones[0].1, "Spine");
        assert_eq!(report.skeleton_roots, vec!["Hips".to_string()]);
        assert!(report.animations.is_empty());
    }
}
