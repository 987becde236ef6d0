//! Pose command - evaluate a clip at a time and dump the skinning palette

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use stride_animation::{load_clip_from_file, AnimationPlayer, SkinnedModel};
use stride_core::Mat4;

pub struct PoseArgs {
    pub model: String,
    pub anim: String,
    pub time: f64,
    pub model_y_up: bool,
    pub clip_y_up: bool,
    pub bone: Option<String>,
    pub format: String,
}

#[derive(Debug, Serialize)]
struct BoneReport {
    index: usize,
    name: String,
    /// Model-space position, absent when the bone's node is not in the hierarchy
    position: Option<[f32; 3]>,
    /// Column-major skin matrix
    skin: [[f32; 4]; 4],
}

#[derive(Debug, Serialize)]
struct PoseReport {
    clip: String,
    time_seconds: f64,
    time_ticks: f64,
    posed_nodes: usize,
    bones: Vec<BoneReport>,
}

pub fn run(args: PoseArgs) -> Result<()> {
    let model = Arc::new(
        SkinnedModel::load(&args.model, args.model_y_up)
            .with_context(|| format!("Failed to load model '{}'", args.model))?,
    );
    let clip = Arc::new(
        load_clip_from_file(&args.anim, &model, args.clip_y_up)
            .with_context(|| format!("Failed to load clip '{}'", args.anim))?,
    );

    let mut player = AnimationPlayer::new();
    player.play(Some(clip.clone()), Some(model.clone()), true, args.time);
    let skin = player.compute_skin_matrices();
    let Some(pose) = player.current_pose() else {
        bail!("Clip '{}' produced no pose", clip.name);
    };

    let mut bones = Vec::new();
    for (name, index) in model.bone_table().iter() {
        if args.bone.as_deref().is_some_and(|b| b != name) {
            continue;
        }
        let position = model
            .find_node(name)
            .and_then(|node| pose.get(node))
            .map(|m| m.translation().to_array());
        bones.push(BoneReport {
            index,
            name: name.to_string(),
            position,
            skin: skin.get(index).copied().unwrap_or(Mat4::IDENTITY).rows,
        });
    }
    if let Some(bone) = &args.bone {
        if bones.is_empty() {
            bail!("Model '{}' has no skinning bone named '{}'", model.name(), bone);
        }
    }

    let report = PoseReport {
        clip: clip.name.clone(),
        time_seconds: player.current_time_sec(),
        time_ticks: player.current_time_ticks(),
        posed_nodes: pose.len(),
        bones,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report, skin.len()),
    }
    Ok(())
}

fn print_text(report: &PoseReport, palette_len: usize) {
    println!(
        "Pose of '{}' at {:.3}s ({:.2} ticks): {} nodes, {} skin matrices",
        report.clip, report.time_seconds, report.time_ticks, report.posed_nodes, palette_len
    );
    for bone in &report.bones {
        match bone.position {
            Some([x, y, z]) => println!(
                "  {:>3} {:<32} ({:>8.3}, {:>8.3}, {:>8.3})",
                bone.index, bone.name, x, y, z
            ),
            None => println!("  {:>3} {:<32} (not posed)", bone.index, bone.name),
        }
    }
}
