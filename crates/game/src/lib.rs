//! Sandstep game layer.
//!
//! Drives the movement physics for networked first-person characters:
//!
//! - Input intent with press/release edge detection
//! - The owner/proxy replication boundary and snapshot codec
//! - Characters binding synced state to a collider and an animation helper
//! - The tick loop: frame updates, fixed physics steps, snapshots
//! - Cosmetic crosshair offsets with a cancellable restore timer
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         Simulation                             │
//! │  ┌─────────┐   ┌───────────────────────┐   ┌───────────────┐  │
//! │  │ Input   │──►│ Character (owner)     │──►│ Snapshots     │──┼──► proxies
//! │  │ intent  │   │ crouch, jump, body,   │   │ (bincode)     │  │
//! │  └─────────┘   │ locomotion, animation │   └───────────────┘  │
//! │                └───────────────────────┘                      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Proxies skip input and physics and only export animation from what the
//! owner sent them.

pub mod animation;
pub mod character;
pub mod crosshair;
pub mod input;
pub mod level;
pub mod replication;
pub mod simulation;

/// Unique identifier for characters.
pub type EntityId = u32;

// Re-export main types
pub use animation::{AnimationHelper, AnimationParams, AnimationRecorder, LookWeights, MoveStyle};
pub use character::{Character, CharacterBuilder, CharacterState, SpawnError, WorldContext};
pub use crosshair::{CrosshairOffsets, CrosshairSignals, RestoreTimer};
pub use input::{Button, ButtonSet, InputIntent, IntentSnapshot, PlayerInput};
pub use level::Level;
pub use replication::{Authority, CharacterSnapshot, ReplicatedState, ReplicationError, SnapshotCursor};
pub use simulation::{Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use sandstep_physics::{CharacterController, CollisionWorld, EyeAngles, MovementConfig};
