//! Stride CLI - inspect skinned models and clips, evaluate poses, and simulate characters

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{clip, inspect, pose, simulate};

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Skeletal animation and character collision toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a model's hierarchy, skinning bones, and embedded animations
    Inspect {
        /// Model file (.glb, .gltf, or .toml)
        model: String,

        /// Model is authored Y-up
        #[arg(long)]
        model_y_up: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Load a clip against a model and report how its tracks resolve
    Clip {
        /// Reference model file
        model: String,

        /// Animation file
        anim: String,

        /// Model is authored Y-up
        #[arg(long)]
        model_y_up: bool,

        /// Clip is authored Z-up
        #[arg(long)]
        clip_z_up: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Evaluate a clip at a time and print bone positions and skin matrices
    Pose {
        /// Reference model file
        model: String,

        /// Animation file
        anim: String,

        /// Playback time in seconds
        #[arg(long, default_value = "0")]
        time: f64,

        /// Model is authored Y-up
        #[arg(long)]
        model_y_up: bool,

        /// Clip is authored Z-up
        #[arg(long)]
        clip_z_up: bool,

        /// Only show this bone
        #[arg(long)]
        bone: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Run the character controller on a level and trace its state
    Simulate {
        /// Level collider file (.toml)
        level: String,

        /// Character config file (.toml)
        #[arg(long)]
        config: Option<String>,

        /// Number of fixed steps
        #[arg(long, default_value = "300")]
        steps: usize,

        /// Step length in seconds
        #[arg(long, default_value = "0.0166667")]
        dt: f32,

        /// Movement input as forward,right (each -1..1)
        #[arg(long, value_parser = parse_vec2, default_value = "0,0")]
        forward: [f32; 2],

        /// Press jump on this step
        #[arg(long)]
        jump_at: Option<usize>,

        /// Starting position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        start: Option<[f32; 3]>,

        /// Print a trace line every N steps (0 prints only state changes)
        #[arg(long, default_value = "0")]
        every: usize,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(format!(
            "expected {} comma-separated values, got {}",
            N,
            parts.len()
        ));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|e| format!("invalid value '{}': {}", part.trim(), e))?;
    }
    Ok(out)
}

fn parse_vec2(s: &str) -> Result<[f32; 2], String> {
    parse_floats::<2>(s)
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    parse_floats::<3>(s)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            model,
            model_y_up,
            format,
        } => inspect::run(&model, model_y_up, &format),
        Commands::Clip {
            model,
            anim,
            model_y_up,
            clip_z_up,
            format,
        } => clip::run(clip::ClipArgs {
            model,
            anim,
            model_y_up,
            clip_y_up: !clip_z_up,
            format,
        }),
        Commands::Pose {
            model,
            anim,
            time,
            model_y_up,
            clip_z_up,
            bone,
            format,
        } => pose::run(pose::PoseArgs {
            model,
            anim,
            time,
            model_y_up,
            clip_y_up: !clip_z_up,
            bone,
            format,
        }),
        Commands::Simulate {
            level,
            config,
            steps,
            dt,
            forward,
            jump_at,
            start,
            every,
            format,
        } => simulate::run(simulate::SimulateArgs {
            level,
            config,
            steps,
            dt,
            forward,
            jump_at,
            start,
            every,
            format,
        }),
    }
}
