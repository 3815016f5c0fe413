//! The collider collaborator used by the locomotion model.
//!
//! The locomotion model never stores velocity or height itself; it reads and
//! writes them through this trait each tick. [`CharacterController`] is the
//! implementation backed by a [`CollisionWorld`].
//!
//! [`CharacterController`]: super::CharacterController
//! [`CollisionWorld`]: crate::collision::CollisionWorld

use glam::Vec3;

use crate::collision::TraceResult;

/// A character collider: ground state, velocity, height and the move primitives.
pub trait Collider {
    /// Whether the collider is standing on walkable ground.
    fn is_on_ground(&self) -> bool;

    /// Current velocity.
    fn velocity(&self) -> Vec3;

    /// Overwrite the velocity.
    fn set_velocity(&mut self, velocity: Vec3);

    /// Current collider height.
    fn height(&self) -> f32;

    /// Overwrite the collider height.
    fn set_height(&mut self, height: f32);

    /// Accelerate toward `wish` (a direction scaled by the desired speed).
    fn accelerate(&mut self, wish: Vec3, delta_time: f32);

    /// Apply friction with the given control amount.
    fn apply_friction(&mut self, control: f32, delta_time: f32);

    /// Sweep along the current velocity, resolving collisions and updating
    /// the ground flag.
    fn move_and_slide(&mut self, delta_time: f32);

    /// Add an instantaneous velocity change and leave the ground.
    fn punch(&mut self, impulse: Vec3);

    /// Sweep the collider from its position by `offset` without moving it.
    fn trace_direction(&self, offset: Vec3) -> TraceResult;

    /// Current position.
    fn position(&self) -> Vec3;

    /// Adopt a transform received from the authority and refresh the ground
    /// flag. Used by proxies instead of integrating.
    fn sync_transform(&mut self, position: Vec3, velocity: Vec3);
}

/// Accelerate `velocity` toward `wish`.
///
/// Only the speed missing along the wish direction is added, and at most
/// `acceleration * delta_time * wish_speed` of it per call.
pub fn accelerate_velocity(velocity: Vec3, wish: Vec3, acceleration: f32, delta_time: f32) -> Vec3 {
    let wish_speed = wish.length();
    if wish_speed < 0.0001 {
        return velocity;
    }
    let wish_direction = wish / wish_speed;

    let current_speed = velocity.dot(wish_direction);
    let add_speed = wish_speed - current_speed;
    if add_speed <= 0.0 {
        return velocity;
    }

    let accel_speed = (acceleration * delta_time * wish_speed).min(add_speed);
    velocity + wish_direction * accel_speed
}

/// Scale `velocity` down by friction.
///
/// Below `stop_speed` the drop is computed as if moving at `stop_speed`, so
/// slow characters come to rest instead of creeping.
pub fn friction_velocity(velocity: Vec3, control: f32, stop_speed: f32, delta_time: f32) -> Vec3 {
    let speed = velocity.length();
    if speed < 0.01 {
        return velocity;
    }

    let drop = speed.max(stop_speed) * delta_time * control;
    let new_speed = (speed - drop).max(0.0);
    if new_speed == speed {
        return velocity;
    }

    velocity * (new_speed / speed)
}
