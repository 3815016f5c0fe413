//! Kinematic character controller.
//!
//! The [`Collider`] implementation used outside of tests. It owns position,
//! velocity, height and ground state, and resolves moves against a shared
//! [`CollisionWorld`].

use std::sync::Arc;

use glam::Vec3;

use crate::collision::{CollisionWorld, ContentFlags, TraceResult, TraceShape};

use super::collider::{accelerate_velocity, friction_velocity, Collider};
use super::config::MovementConfig;
use super::slide_move::{slide_move, step_slide_move};

/// Downward probe distance used to find ground while airborne.
const GROUND_PROBE: f32 = 2.0;

/// Capsule controller moving through a [`CollisionWorld`].
///
/// # Example
///
/// ```ignore
/// let world = Arc::new(CollisionWorld::new());
/// let mut controller = CharacterController::new(world, MovementConfig::default());
/// controller.spawn_at(spawn_position);
///
/// // Each fixed step:
/// integrate_and_move(&mut controller, wish, gravity, delta_time, &config);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController {
    world: Arc<CollisionWorld>,
    config: MovementConfig,
    position: Vec3,
    velocity: Vec3,
    height: f32,
    on_ground: bool,
    ground_normal: Vec3,
}

impl CharacterController {
    /// Create a controller at the origin with the configured standing height.
    pub fn new(world: Arc<CollisionWorld>, config: MovementConfig) -> Self {
        let height = config.height;
        Self {
            world,
            config,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            height,
            on_ground: false,
            ground_normal: Vec3::Y,
        }
    }

    /// Place the controller at `spawn_position`, dropping it onto any ground
    /// within a short distance below.
    pub fn spawn_at(&mut self, spawn_position: Vec3) {
        let start = spawn_position + Vec3::Y * self.config.step_height;
        let end = spawn_position - Vec3::Y * (self.config.step_height * 2.0);
        let trace = self.world.trace(start, end, self.shape(), ContentFlags::MASK_PLAYER_SOLID);

        self.velocity = Vec3::ZERO;
        match trace.hit_normal {
            Some(normal) if !trace.started_in_solid && normal.y >= self.config.min_ground_normal() => {
                self.position = trace.end_position;
                self.on_ground = true;
                self.ground_normal = normal;
            }
            _ => {
                self.position = spawn_position;
                self.on_ground = false;
                self.ground_normal = Vec3::Y;
            }
        }
        log::debug!("controller spawned at {:?} on_ground={}", self.position, self.on_ground);
    }

    /// Teleport without touching velocity or ground state.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Normal of the surface we stand on, `Vec3::Y` while airborne.
    pub fn ground_normal(&self) -> Vec3 {
        self.ground_normal
    }

    /// The collision shape at the current height.
    pub fn shape(&self) -> TraceShape {
        TraceShape::new(self.config.radius, self.height)
    }

    fn categorize_position(&mut self) {
        // Rising fast enough means we just left the ground
        if self.velocity.y > self.config.max_ground_rise_speed {
            self.set_airborne();
            return;
        }

        let probe = if self.on_ground {
            self.config.step_height
        } else {
            GROUND_PROBE
        };
        let trace = self.world.trace(
            self.position,
            self.position - Vec3::Y * probe,
            self.shape(),
            ContentFlags::MASK_PLAYER_SOLID,
        );

        match trace.hit_normal {
            Some(normal) if normal.y >= self.config.min_ground_normal() && !trace.all_solid => {
                self.on_ground = true;
                self.ground_normal = normal;
                self.position = trace.end_position;
            }
            _ => self.set_airborne(),
        }
    }

    fn set_airborne(&mut self) {
        self.on_ground = false;
        self.ground_normal = Vec3::Y;
    }
}

impl Collider for CharacterController {
    fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    fn accelerate(&mut self, wish: Vec3, delta_time: f32) {
        self.velocity = accelerate_velocity(self.velocity, wish, self.config.acceleration, delta_time);
    }

    fn apply_friction(&mut self, control: f32, delta_time: f32) {
        self.velocity = friction_velocity(self.velocity, control, self.config.stop_speed, delta_time);
    }

    fn move_and_slide(&mut self, delta_time: f32) {
        if self.velocity.length_squared() > 0.0001 {
            let shape = self.shape();
            if self.on_ground {
                step_slide_move(
                    &self.world,
                    &mut self.position,
                    &mut self.velocity,
                    shape,
                    delta_time,
                    &self.config,
                );
            } else {
                slide_move(
                    &self.world,
                    &mut self.position,
                    &mut self.velocity,
                    shape,
                    delta_time,
                    &self.config,
                );
            }
        }

        self.categorize_position();
    }

    fn punch(&mut self, impulse: Vec3) {
        self.set_airborne();
        self.velocity += impulse;
    }

    fn trace_direction(&self, offset: Vec3) -> TraceResult {
        self.world.trace(
            self.position,
            self.position + offset,
            self.shape(),
            ContentFlags::MASK_PLAYER_SOLID,
        )
    }

    /// Bottom of the capsule.
    fn position(&self) -> Vec3 {
        self.position
    }

    fn sync_transform(&mut self, position: Vec3, velocity: Vec3) {
        self.position = position;
        self.velocity = velocity;
        self.categorize_position();
    }
}
