//! Body orientation smoothing.
//!
//! The body follows the yaw of the view, but only once the view has turned
//! past a threshold or the character is moving. Standing still and glancing
//! around leaves the body where it is.

use glam::Quat;
use serde::{Deserialize, Serialize};

use super::angles::EyeAngles;
use super::config::MovementConfig;

/// Visual body rotation, decoupled from the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyOrientation {
    pub rotation: Quat,
}

impl Default for BodyOrientation {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
        }
    }
}

impl BodyOrientation {
    /// Body facing the yaw of `eye_angles`.
    pub fn facing(eye_angles: EyeAngles) -> Self {
        Self {
            rotation: eye_angles.yaw_rotation(),
        }
    }

    /// Angle between the body and the view yaw, in degrees.
    pub fn angle_to(&self, eye_angles: EyeAngles) -> f32 {
        self.rotation.angle_between(eye_angles.yaw_rotation()).to_degrees()
    }

    /// Turn toward the view yaw if the view is far enough off or we are moving.
    ///
    /// Returns whether the body rotated this tick.
    pub fn update(&mut self, eye_angles: EyeAngles, speed: f32, delta_time: f32, config: &MovementConfig) -> bool {
        let target = eye_angles.yaw_rotation();
        let distance = self.rotation.angle_between(target).to_degrees();

        if distance <= config.body_turn_threshold && speed <= config.body_turn_speed_threshold {
            return false;
        }

        let t = (delta_time * config.body_turn_rate).min(1.0);
        self.rotation = self.rotation.slerp(target, t).normalize();
        true
    }
}
