//! Animation parameter export.
//!
//! Each frame the final movement state is projected into [`AnimationParams`]
//! and pushed into an [`AnimationHelper`]. The projection reads state only;
//! nothing flows back from the animation layer.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::replication::ReplicatedState;

/// Locomotion style the rig should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveStyle {
    #[default]
    Auto,
    Walk,
    Run,
}

/// How much the eyes, head and body follow the look direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookWeights {
    pub eyes: f32,
    pub head: f32,
    pub body: f32,
}

impl LookWeights {
    pub const DEFAULT: Self = Self {
        eyes: 1.0,
        head: 0.75,
        body: 0.5,
    };
}

impl Default for LookWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Receiver for locomotion parameters. Setters are fire-and-forget.
pub trait AnimationHelper {
    fn set_wish_velocity(&mut self, wish_velocity: Vec3);
    fn set_velocity(&mut self, velocity: Vec3);
    fn set_aim_rotation(&mut self, rotation: Quat);
    fn set_grounded(&mut self, grounded: bool);
    fn set_look(&mut self, direction: Vec3, weights: LookWeights);
    fn set_move_style(&mut self, style: MoveStyle);
    fn set_duck_level(&mut self, level: f32);

    /// One-shot jump signal.
    fn trigger_jump(&mut self);
}

/// Everything exported to the animation layer in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationParams {
    pub wish_velocity: Vec3,
    pub velocity: Vec3,
    pub aim_rotation: Quat,
    pub grounded: bool,
    pub look_direction: Vec3,
    pub look_weights: LookWeights,
    pub move_style: MoveStyle,
    /// 0 standing, 1 crouching.
    pub duck_level: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            wish_velocity: Vec3::ZERO,
            velocity: Vec3::ZERO,
            aim_rotation: Quat::IDENTITY,
            grounded: false,
            look_direction: Vec3::X,
            look_weights: LookWeights::DEFAULT,
            move_style: MoveStyle::Auto,
            duck_level: 0.0,
        }
    }
}

impl AnimationParams {
    /// Project synced fields plus the collider's velocity and ground flag.
    pub fn capture(state: &ReplicatedState, velocity: Vec3, grounded: bool) -> Self {
        let eye_angles = state.eye_angles();
        let aim_rotation = eye_angles.to_rotation();

        Self {
            wish_velocity: state.wish_velocity(),
            velocity,
            aim_rotation,
            grounded,
            look_direction: eye_angles.forward(),
            look_weights: LookWeights::DEFAULT,
            move_style: MoveStyle::Run,
            duck_level: if state.is_crouching() { 1.0 } else { 0.0 },
        }
    }

    /// Push every parameter into `helper`.
    pub fn apply<A: AnimationHelper + ?Sized>(&self, helper: &mut A) {
        helper.set_wish_velocity(self.wish_velocity);
        helper.set_velocity(self.velocity);
        helper.set_aim_rotation(self.aim_rotation);
        helper.set_grounded(self.grounded);
        helper.set_look(self.look_direction, self.look_weights);
        helper.set_move_style(self.move_style);
        helper.set_duck_level(self.duck_level);
    }
}

/// Helper that keeps the latest parameters and counts jumps.
///
/// Used by the headless simulation in place of a skeletal rig.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationRecorder {
    pub params: AnimationParams,
    pub jumps: u32,
    pub updates: u64,
}

impl AnimationHelper for AnimationRecorder {
    fn set_wish_velocity(&mut self, wish_velocity: Vec3) {
        self.updates += 1;
        self.params.wish_velocity = wish_velocity;
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.params.velocity = velocity;
    }

    fn set_aim_rotation(&mut self, rotation: Quat) {
        self.params.aim_rotation = rotation;
    }

    fn set_grounded(&mut self, grounded: bool) {
        self.params.grounded = grounded;
    }

    fn set_look(&mut self, direction: Vec3, weights: LookWeights) {
        self.params.look_direction = direction;
        self.params.look_weights = weights;
    }

    fn set_move_style(&mut self, style: MoveStyle) {
        self.params.move_style = style;
    }

    fn set_duck_level(&mut self, level: f32) {
        self.params.duck_level = level;
    }

    fn trigger_jump(&mut self) {
        self.jumps += 1;
    }
}
