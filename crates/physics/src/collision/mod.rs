//! Collision queries for character movement.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: static box geometry shared by every controller
//! - [`TraceResult`]: output of sweeping a shape through the world
//! - [`TraceShape`]: vertical capsule used for tracing
//!
//! Traces sweep a shape and report how far it traveled (fraction 0.0-1.0),
//! where it stopped and the surface normal at impact.

mod flags;
mod trace;
mod world;

pub use flags::ContentFlags;
pub use trace::{TraceResult, TraceShape};
pub use world::{CollisionBrush, CollisionWorld};
