//! Clip command - load an animation against a model and report track resolution

use anyhow::{Context, Result};
use serde::Serialize;
use stride_animation::{load_clip_from_file, AnimationClip, SkinnedModel};

pub struct ClipArgs {
    pub model: String,
    pub anim: String,
    pub model_y_up: bool,
    pub clip_y_up: bool,
    pub format: String,
}

#[derive(Debug, Serialize)]
struct ClipReport {
    name: String,
    duration_ticks: f64,
    ticks_per_second: f64,
    duration_seconds: f64,
    source_up: String,
    tracks: usize,
    resolved: Vec<TrackReport>,
    unresolved: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TrackReport {
    track: String,
    node: String,
    keyframes: usize,
}

pub fn run(args: ClipArgs) -> Result<()> {
    let model = SkinnedModel::load(&args.model, args.model_y_up)
        .with_context(|| format!("Failed to load model '{}'", args.model))?;
    let clip = load_clip_from_file(&args.anim, &model, args.clip_y_up)
        .with_context(|| format!("Failed to load clip '{}'", args.anim))?;

    let report = build_report(&model, &clip);
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

fn build_report(model: &SkinnedModel, clip: &AnimationClip) -> ClipReport {
    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();
    for track in clip.tracks() {
        match track.node.and_then(|n| model.scene().node(n)) {
            Some(node) => resolved.push(TrackReport {
                track: track.node_name.clone(),
                node: node.name.clone(),
                keyframes: track.keyframes.len(),
            }),
            None => unresolved.push(track.node_name.clone()),
        }
    }

    ClipReport {
        name: clip.name.clone(),
        duration_ticks: clip.duration,
        ticks_per_second: clip.ticks_per_second,
        duration_seconds: clip.duration_seconds(),
        source_up: format!("{:?}", clip.source_up),
        tracks: clip.tracks().len(),
        resolved,
        unresolved,
    }
}

fn print_text(report: &ClipReport) {
    println!("Clip: {}", report.name);
    println!(
        "  {:.1} ticks @ {} tps = {:.3}s, authored {}",
        report.duration_ticks, report.ticks_per_second, report.duration_seconds, report.source_up
    );
    println!(
        "  {} tracks, {} resolved, {} unresolved",
        report.tracks,
        report.resolved.len(),
        report.unresolved.len()
    );

    for track in &report.resolved {
        if track.track == track.node {
            println!("  {} ({} keys)", track.track, track.keyframes);
        } else {
            println!("  {} -> {} ({} keys)", track.track, track.node, track.keyframes);
        }
    }
    if !report.unresolved.is_empty() {
        println!();
        println!("Unresolved tracks:");
        for name in &report.unresolved {
            println!("  {}", name);
        }
    }
}
