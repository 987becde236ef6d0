//! Kinematic character movement against a static collision world

use crate::animator::AnimState;
use crate::config::CharacterConfig;
use stride_core::Vec3;
use stride_physics::{Aabb, AabbProvider, CollisionWorld, Resolution};

/// Vertical speed above which an airborne body counts as rising
const RISING_SPEED: f32 = 0.1;

/// One tick of movement intent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveInput {
    /// +1 forward along the camera, -1 backward
    pub forward: f32,
    /// +1 to the camera's right, -1 left
    pub right: f32,
    /// Jump pressed this tick
    pub jump: bool,
}

impl MoveInput {
    /// Build from four direction keys
    pub fn from_keys(forward: bool, back: bool, left: bool, right: bool, jump: bool) -> Self {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        Self {
            forward: axis(forward, back),
            right: axis(right, left),
            jump,
        }
    }
}

/// Feet-anchored box body with gravity, jumping, and fall tracking
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: CharacterConfig,
    local_aabb: Aabb,
    position: Vec3,
    velocity: Vec3,
    front: Vec3,
    grounded: bool,
    moving: bool,
    jumping: bool,
    falling: bool,
    fall_start_y: f32,
    fall_distance: f32,
}

impl CharacterController {
    pub fn new(config: CharacterConfig, position: Vec3, front: Vec3) -> Self {
        let front = front.normalized();
        Self {
            local_aabb: config.local_aabb(),
            config,
            position,
            velocity: Vec3::ZERO,
            front: if front == Vec3::ZERO { Vec3::FORWARD } else { front },
            grounded: false,
            moving: false,
            jumping: false,
            falling: false,
            fall_start_y: 0.0,
            fall_distance: 0.0,
        }
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Last horizontal movement direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn world_aabb(&self) -> Aabb {
        self.local_aabb.translate(self.position)
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    pub fn fall_distance(&self) -> f32 {
        self.fall_distance
    }

    /// Turn input into horizontal velocity relative to the camera, and start jumps.
    pub fn apply_input(&mut self, input: &MoveInput, camera_front: Vec3) {
        let mut front = Vec3::new(camera_front.x, 0.0, camera_front.z);
        if front == Vec3::ZERO {
            front = Vec3::FORWARD;
        }
        let front = front.normalized();
        let right = Vec3::UP.cross(&front).normalized();

        let direction = front * input.forward + right * input.right;
        if direction != Vec3::ZERO {
            let direction = direction.normalized();
            self.moving = true;
            self.front = direction;
            self.velocity.x = direction.x * self.config.move_speed;
            self.velocity.z = direction.z * self.config.move_speed;
        } else {
            self.moving = false;
            self.velocity.x = 0.0;
            self.velocity.z = 0.0;
        }

        if input.jump && self.grounded {
            self.velocity.y += self.config.jump_velocity;
            self.jumping = true;
        }
    }

    /// Integrate gravity, resolve against `world`, then update ground and fall state.
    pub fn step_physics(&mut self, world: &CollisionWorld, dt: f32) -> Resolution {
        self.velocity.y -= self.config.gravity * dt;
        self.position = self.position + self.velocity * dt;

        let resolution = world.resolve(
            &self.local_aabb,
            &mut self.position,
            self.config.resolve_iterations,
        );

        let was_grounded = self.grounded;
        self.grounded =
            resolution.grounded || world.ground_probe(&self.world_aabb(), self.config.ground_probe);
        if self.grounded {
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
            self.jumping = false;
        }

        self.track_fall(was_grounded);
        self.respawn_if_fallen();
        resolution
    }

    fn track_fall(&mut self, was_grounded: bool) {
        if self.grounded {
            self.fall_distance = 0.0;
            self.falling = false;
            return;
        }
        if was_grounded {
            self.fall_start_y = self.position.y;
            self.fall_distance = 0.0;
        }
        if self.velocity.y <= self.config.fall_speed_threshold {
            self.fall_distance = (self.fall_start_y - self.position.y).max(0.0);
            if self.fall_distance >= self.config.fall_anim_threshold {
                self.falling = true;
            }
        }
    }

    fn respawn_if_fallen(&mut self) {
        if self.position.y >= self.config.kill_y {
            return;
        }
        log::info!(
            "Character fell below {} at {:?}, respawning",
            self.config.kill_y,
            self.position
        );
        self.position = self.config.respawn_position();
        self.velocity = Vec3::ZERO;
        self.jumping = false;
        self.grounded = false;
    }

    /// Animation state implied by the current movement
    pub fn desired_state(&self) -> AnimState {
        if !self.grounded {
            if self.velocity.y > RISING_SPEED {
                return AnimState::Jump;
            }
            if self.falling {
                return AnimState::Fall;
            }
            return AnimState::Jump;
        }
        if self.moving {
            AnimState::Walk
        } else {
            AnimState::Idle
        }
    }
}

impl AabbProvider for CharacterController {
    fn aabb_at(&self, position: Vec3) -> Aabb {
        self.local_aabb.translate(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn flat_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_collider(Aabb::new(
            Vec3::new(-50.0, -1.0, -50.0),
            Vec3::new(50.0, 0.0, 50.0),
        ));
        world
    }

    fn settled(world: &CollisionWorld) -> CharacterController {
        let mut c = CharacterController::new(CharacterConfig::default(), Vec3::ZERO, Vec3::FORWARD);
        for _ in 0..5 {
            c.apply_input(&MoveInput::default(), Vec3::FORWARD);
            c.step_physics(world, DT);
        }
        c
    }

    #[test]
    fn keys_to_axes() {
        let input = MoveInput::from_keys(true, false, true, false, false);
        assert_eq!(input.forward, 1.0);
        assert_eq!(input.right, -1.0);
        assert_eq!(MoveInput::from_keys(true, true, false, false, true).forward, 0.0);
    }

    #[test]
    fn standing_on_floor_is_grounded_idle() {
        let world = flat_world();
        let c = settled(&world);
        assert!(c.is_grounded());
        assert_eq!(c.velocity().y, 0.0);
        assert_eq!(c.desired_state(), AnimState::Idle);
        assert!(c.position().y >= 0.0 && c.position().y < 0.01);
    }

    #[test]
    fn forward_input_follows_camera() {
        let world = flat_world();
        let mut c = settled(&world);
        // Camera looking down +X: forward input moves along +X
        c.apply_input(
            &MoveInput {
                forward: 1.0,
                ..Default::default()
            },
            Vec3::new(1.0, -0.5, 0.0),
        );
        c.step_physics(&world, DT);
        assert!(c.position().x > 0.1);
        assert!(c.position().z.abs() < 1e-5);
        assert!((c.front() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(c.desired_state(), AnimState::Walk);
    }

    #[test]
    fn right_is_up_cross_front() {
        let world = flat_world();
        let mut c = settled(&world);
        c.apply_input(
            &MoveInput {
                right: 1.0,
                ..Default::default()
            },
            Vec3::FORWARD,
        );
        // up x (0,0,1) = (1,0,0)
        assert!(c.velocity().x > 0.0);
        assert_eq!(c.velocity().z, 0.0);
    }

    #[test]
    fn jump_only_from_ground() {
        let world = flat_world();
        let mut c = settled(&world);
        let jump = MoveInput {
            jump: true,
            ..Default::default()
        };
        c.apply_input(&jump, Vec3::FORWARD);
        assert!(c.is_jumping());
        c.step_physics(&world, DT);
        assert!(!c.is_grounded());
        assert_eq!(c.desired_state(), AnimState::Jump);

        let vy = c.velocity().y;
        c.apply_input(&jump, Vec3::FORWARD);
        assert_eq!(c.velocity().y, vy);
    }

    #[test]
    fn jump_lands_again() {
        let world = flat_world();
        let mut c = settled(&world);
        c.apply_input(
            &MoveInput {
                jump: true,
                ..Default::default()
            },
            Vec3::FORWARD,
        );
        for _ in 0..120 {
            c.step_physics(&world, DT);
            c.apply_input(&MoveInput::default(), Vec3::FORWARD);
        }
        assert!(c.is_grounded());
        assert!(!c.is_jumping());
        assert!(!c.is_falling());
    }

    #[test]
    fn long_drop_enters_fall_state() {
        let mut world = CollisionWorld::new();
        world.add_collider(Aabb::new(
            Vec3::new(-5.0, -1.0, -5.0),
            Vec3::new(5.0, 0.0, 5.0),
        ));
        let mut c = settled(&world);
        // Walk off the platform edge and keep descending
        c.set_position(Vec3::new(20.0, 0.0, 0.0));
        let mut saw_fall = false;
        for _ in 0..60 {
            c.apply_input(&MoveInput::default(), Vec3::FORWARD);
            c.step_physics(&world, DT);
            if c.desired_state() == AnimState::Fall {
                saw_fall = true;
                break;
            }
        }
        assert!(saw_fall);
        assert!(c.fall_distance() >= 8.0);
    }

    #[test]
    fn respawns_below_kill_plane() {
        let world = CollisionWorld::new();
        let mut config = CharacterConfig::default();
        config.respawn = [0.0, 5.0, 0.0];
        let mut c = CharacterController::new(config, Vec3::new(0.0, -49.9, 0.0), Vec3::FORWARD);
        c.step_physics(&world, 0.1);
        assert_eq!(c.position(), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(c.velocity(), Vec3::ZERO);
        assert!(!c.is_grounded());
    }

    #[test]
    fn provider_box_follows_position() {
        let c = CharacterController::new(CharacterConfig::default(), Vec3::ZERO, Vec3::FORWARD);
        let b = c.aabb_at(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(b.min.y, 2.0);
        assert_eq!(b.max.y, 8.0);
    }
}
