//! View angles.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// View angles in radians.
///
/// - Pitch: looking up/down, positive looks down
/// - Yaw: looking left/right, yaw 0 faces +X
/// - Roll: tilting head (usually 0)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EyeAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl EyeAngles {
    /// Pitch is clamped just short of vertical so the forward vector keeps a
    /// horizontal component.
    pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Apply a look delta, clamping pitch and wrapping yaw to -PI..PI.
    ///
    /// Non-finite deltas are ignored.
    pub fn look(&mut self, pitch_delta: f32, yaw_delta: f32) {
        if pitch_delta.is_finite() {
            self.pitch = (self.pitch + pitch_delta).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        }
        if yaw_delta.is_finite() {
            self.yaw = wrap_angle(self.yaw + yaw_delta);
        }
    }

    /// Full view rotation. Maps +X to forward, +Y to up and +Z to right.
    pub fn to_rotation(self) -> Quat {
        Quat::from_rotation_y(-self.yaw)
            * Quat::from_rotation_z(-self.pitch)
            * Quat::from_rotation_x(self.roll)
    }

    /// Rotation with pitch and roll discarded.
    pub fn yaw_rotation(self) -> Quat {
        Quat::from_rotation_y(-self.yaw)
    }

    /// View direction including pitch.
    pub fn forward(self) -> Vec3 {
        self.to_rotation() * Vec3::X
    }

    /// Right vector of the view.
    pub fn right(self) -> Vec3 {
        self.to_rotation() * Vec3::Z
    }
}

/// Wrap `angle` into -PI..PI.
fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}
