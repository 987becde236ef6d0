//! Simulate command - step a character through a level with scripted input

use anyhow::{Context, Result};
use serde::Serialize;
use stride_animation::ClipRegistry;
use stride_character::{AnimState, Character, CharacterConfig, MoveInput};
use stride_core::Vec3;
use stride_physics::CollisionWorld;

pub struct SimulateArgs {
    pub level: String,
    pub config: Option<String>,
    pub steps: usize,
    pub dt: f32,
    pub forward: [f32; 2],
    pub jump_at: Option<usize>,
    pub start: Option<[f32; 3]>,
    pub every: usize,
    pub format: String,
}

#[derive(Debug, Clone, Serialize)]
struct Sample {
    step: usize,
    time: f32,
    position: [f32; 3],
    velocity: [f32; 3],
    grounded: bool,
    state: AnimState,
}

#[derive(Debug, Serialize)]
struct Trace {
    colliders: usize,
    samples: Vec<Sample>,
    final_sample: Option<Sample>,
    contacts: usize,
    airborne_steps: usize,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let world = CollisionWorld::load_from_file(&args.level)
        .with_context(|| format!("Failed to load level '{}'", args.level))?;
    let config = match &args.config {
        Some(path) => CharacterConfig::load(path)
            .with_context(|| format!("Failed to load character config '{}'", path))?,
        None => CharacterConfig::default(),
    };
    let start = args
        .start
        .map(Vec3::from_array)
        .unwrap_or_else(|| config.respawn_position());

    let mut registry = ClipRegistry::new();
    let mut character = Character::from_config(config, start, &mut registry)
        .context("Failed to build character")?;
    if !registry.is_empty() {
        log::info!("Loaded {} animation clips", registry.len());
    }

    let trace = simulate(&mut character, &world, &args);
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&trace)?),
        _ => print_text(&trace),
    }
    Ok(())
}

fn simulate(character: &mut Character, world: &CollisionWorld, args: &SimulateArgs) -> Trace {
    let mut trace = Trace {
        colliders: world.len(),
        samples: Vec::new(),
        final_sample: None,
        contacts: 0,
        airborne_steps: 0,
    };
    let mut last_state = None;

    for step in 0..args.steps {
        let input = MoveInput {
            forward: args.forward[0],
            right: args.forward[1],
            jump: args.jump_at == Some(step),
        };
        let resolution = character.update(&input, Vec3::FORWARD, world, args.dt);
        if resolution.any_hit {
            trace.contacts += 1;
        }

        let controller = character.controller();
        if !controller.is_grounded() {
            trace.airborne_steps += 1;
        }
        let sample = Sample {
            step,
            time: (step + 1) as f32 * args.dt,
            position: controller.position().to_array(),
            velocity: controller.velocity().to_array(),
            grounded: controller.is_grounded(),
            state: character.state(),
        };

        let periodic = args.every > 0 && step % args.every == 0;
        let changed = last_state != Some(sample.state);
        if periodic || changed {
            trace.samples.push(sample.clone());
        }
        last_state = Some(sample.state);
        trace.final_sample = Some(sample);
    }

    trace
}

fn print_text(trace: &Trace) {
    println!("Level: {} colliders", trace.colliders);
    for s in &trace.samples {
        print_sample(s);
    }
    if let Some(last) = &trace.final_sample {
        println!();
        println!(
            "Final after {} steps: {} contact steps, {} airborne",
            last.step + 1,
            trace.contacts,
            trace.airborne_steps
        );
        print_sample(last);
    }
}

fn print_sample(s: &Sample) {
    let [x, y, z] = s.position;
    println!(
        "  {:>5} {:>7.3}s  pos ({:>8.3}, {:>8.3}, {:>8.3})  vy {:>8.3}  {}{}",
        s.step,
        s.time,
        x,
        y,
        z,
        s.velocity[1],
        s.state,
        if s.grounded { "" } else { " (air)" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_character::CharacterController;

    fn args(steps: usize, jump_at: Option<usize>) -> SimulateArgs {
        SimulateArgs {
            level: String::new(),
            config: None,
            steps,
            dt: 1.0 / 60.0,
            forward: [0.0, 0.0],
            jump_at,
            start: None,
            every: 0,
            format: "text".into(),
        }
    }

    fn world() -> CollisionWorld {
        CollisionWorld::from_toml_str(
            "[[colliders]]\nmin = [-20.0, -1.0, -20.0]\nmax = [20.0, 0.0, 20.0]\n",
        )
        .unwrap()
    }

    fn character(y: f32) -> Character {
        let controller =
            CharacterController::new(CharacterConfig::default(), Vec3::new(0.0, y, 0.0), Vec3::FORWARD);
        Character::new(controller, None)
    }

    #[test]
    fn drop_onto_floor_settles_idle() {
        let world = world();
        let mut c = character(2.0);
        let trace = simulate(&mut c, &world, &args(120, None));

        let last = trace.final_sample.unwrap();
        assert!(last.grounded);
        assert_eq!(last.state, AnimState::Idle);
        assert!(last.position[1] >= 0.0 && last.position[1] < 0.01);
        assert_eq!(trace.samples.first().map(|s| s.state), Some(AnimState::Jump));
    }

    #[test]
    fn jump_records_state_changes() {
        let world = world();
        let mut c = character(0.0);
        let trace = simulate(&mut c, &world, &args(180, Some(30)));

        let states: Vec<AnimState> = trace.samples.iter().map(|s| s.state).collect();
        assert!(states.contains(&AnimState::Jump));
        assert_eq!(states.last(), Some(&AnimState::Idle));
        assert!(trace.airborne_steps > 0);
    }
}
