//! Scripted collider for unit tests.

use std::cell::RefCell;

use glam::Vec3;

use crate::collision::TraceResult;

use super::collider::{accelerate_velocity, friction_velocity, Collider};

/// A collider with no world. Moves integrate velocity directly and the
/// ground flag only changes when a test scripts it.
#[derive(Debug, Default)]
pub struct MockCollider {
    pub on_ground: bool,
    pub velocity: Vec3,
    pub height: f32,
    pub position: Vec3,
    /// Ground flag to adopt after the next move. `None` keeps it unchanged.
    pub ground_after_move: Option<bool>,
    /// Whether upward clearance probes report a hit.
    pub obstructed: bool,
    pub accelerations: Vec<Vec3>,
    pub frictions: Vec<f32>,
    pub velocity_at_move: Option<Vec3>,
    pub traces: RefCell<Vec<Vec3>>,
}

impl MockCollider {
    pub fn grounded() -> Self {
        Self {
            on_ground: true,
            height: 64.0,
            ..Default::default()
        }
    }

    pub fn airborne() -> Self {
        Self {
            on_ground: false,
            height: 64.0,
            ..Default::default()
        }
    }
}

impl Collider for MockCollider {
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
        self.accelerations.push(wish);
        self.velocity = accelerate_velocity(self.velocity, wish, 10.0, delta_time);
    }

    fn apply_friction(&mut self, control: f32, delta_time: f32) {
        self.frictions.push(control);
        self.velocity = friction_velocity(self.velocity, control, 140.0, delta_time);
    }

    fn move_and_slide(&mut self, delta_time: f32) {
        self.velocity_at_move = Some(self.velocity);
        self.position += self.velocity * delta_time;
        if let Some(on_ground) = self.ground_after_move.take() {
            self.on_ground = on_ground;
        }
    }

    fn punch(&mut self, impulse: Vec3) {
        self.on_ground = false;
        self.velocity += impulse;
    }

    fn trace_direction(&self, offset: Vec3) -> TraceResult {
        self.traces.borrow_mut().push(offset);
        if self.obstructed {
            TraceResult::hit(0.5, self.position + offset * 0.5, -Vec3::Y)
        } else {
            TraceResult::no_hit(self.position + offset)
        }
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn sync_transform(&mut self, position: Vec3, velocity: Vec3) {
        self.position = position;
        self.velocity = velocity;
    }
}
