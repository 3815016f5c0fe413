//! Sandstep movement physics.
//!
//! Per-tick movement for a first-person character: input intent becomes a
//! wish velocity, the wish velocity is integrated through a character
//! collider, and crouch height and body facing are negotiated from the result.
//!
//! # Architecture
//!
//! - **Collision**: traces capsules through static box geometry
//! - **Movement**: the locomotion model, crouch negotiation and body
//!   orientation, all written against the [`Collider`] trait so they can be
//!   driven by the bundled [`CharacterController`] or any other collider
//!
//! Y is up. Distances are game units, angles are radians unless a field says
//! degrees.

pub mod collision;
pub mod movement;

pub use collision::{CollisionWorld, ContentFlags, TraceResult, TraceShape};
pub use movement::{
    build_wish_velocity, integrate_and_move, BodyOrientation, CharacterController, Collider, ConfigError,
    CrouchTransition, EyeAngles, MoveIntent, MovementConfig, SpeedTier, Stance,
};
