//! Character movement.
//!
//! - [`locomotion`]: wish velocity and the ground/air integrator with split gravity
//! - [`stance`]: crouch negotiation with an upward clearance probe
//! - [`orientation`]: body yaw smoothing with hysteresis
//! - [`Collider`]: the contract the integrator drives, implemented by
//!   [`CharacterController`] against a collision world
//!
//! Everything here is a pure function of its inputs, so the same inputs give
//! the same outputs on every peer.

mod angles;
mod collider;
mod config;
mod controller;
pub mod locomotion;
pub mod orientation;
mod slide_move;
pub mod stance;

#[cfg(test)]
mod test_support;

pub use angles::EyeAngles;
pub use collider::{accelerate_velocity, friction_velocity, Collider};
pub use config::{ConfigError, MovementConfig};
pub use controller::CharacterController;
pub use locomotion::{build_wish_velocity, integrate_and_move, jump, MoveIntent, SpeedTier};
pub use orientation::BodyOrientation;
pub use slide_move::{clip_velocity, slide_move, step_slide_move};
pub use stance::{CrouchTransition, Stance};
