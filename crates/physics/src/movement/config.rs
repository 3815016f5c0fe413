//! Movement configuration constants.
//!
//! All movement tunables are grouped here for easy tuning. Distances are in
//! game units (inches), speeds in units/second.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::locomotion::SpeedTier;

/// A tunable that failed validation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Configuration for character movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Locomotion
    // ========================================================================
    /// Acceleration and friction responsiveness while grounded.
    pub ground_control: f32,

    /// Acceleration and friction responsiveness while airborne.
    pub air_control: f32,

    /// Maximum length of the wish vector used for air acceleration.
    pub max_force: f32,

    /// Running speed.
    pub run_speed: f32,

    /// Walking speed.
    pub walk_speed: f32,

    /// Crouching speed.
    pub crouch_speed: f32,

    /// Upward impulse added by a jump.
    pub jump_force: f32,

    /// World gravity (units/second²). Y is up.
    pub gravity: Vec3,

    // ========================================================================
    // Controller
    // ========================================================================
    /// Collision radius.
    pub radius: f32,

    /// Standing collider height.
    pub height: f32,

    /// Maximum step height the controller climbs.
    pub step_height: f32,

    /// Steepest walkable slope (degrees).
    pub ground_angle: f32,

    /// Controller acceleration multiplier used by `accelerate`.
    pub acceleration: f32,

    /// Speed below which friction uses this value instead of the actual speed.
    pub stop_speed: f32,

    /// Upward speed above which the controller never sticks to the ground.
    pub max_ground_rise_speed: f32,

    /// Overbounce factor for velocity clipping (prevents sticking to walls).
    pub overbounce: f32,

    /// Maximum slide iterations per move.
    pub max_clip_planes: usize,

    // ========================================================================
    // Body orientation
    // ========================================================================
    /// Angle between body and view yaw that forces the body to turn (degrees).
    pub body_turn_threshold: f32,

    /// Speed above which the body always follows the view.
    pub body_turn_speed_threshold: f32,

    /// Exponential smoothing rate for body turning (per second).
    pub body_turn_rate: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            ground_control: 4.0,
            air_control: 0.1,
            max_force: 50.0,
            run_speed: 290.0,
            walk_speed: 160.0,
            crouch_speed: 90.0,
            jump_force: 350.0,
            gravity: Vec3::new(0.0, -850.0, 0.0),

            radius: 16.0,
            height: 64.0,
            step_height: 18.0,
            ground_angle: 45.0,
            acceleration: 10.0,
            stop_speed: 140.0,
            max_ground_rise_speed: 40.0,
            overbounce: 1.001,
            max_clip_planes: 5,

            body_turn_threshold: 20.0,
            body_turn_speed_threshold: 10.0,
            body_turn_rate: 2.0,
        }
    }
}

impl MovementConfig {
    /// Faster movement with more air control.
    pub fn arcade() -> Self {
        Self {
            air_control: 0.3,
            max_force: 80.0,
            run_speed: 340.0,
            walk_speed: 200.0,
            jump_force: 400.0,
            ..Default::default()
        }
    }

    /// Slower, heavier movement.
    pub fn tactical() -> Self {
        Self {
            ground_control: 6.0,
            air_control: 0.05,
            max_force: 30.0,
            run_speed: 220.0,
            walk_speed: 120.0,
            crouch_speed: 70.0,
            jump_force: 300.0,
            ..Default::default()
        }
    }

    /// Speed for a speed tier.
    pub fn speed(&self, tier: SpeedTier) -> f32 {
        match tier {
            SpeedTier::Crouch => self.crouch_speed,
            SpeedTier::Run => self.run_speed,
            SpeedTier::Walk => self.walk_speed,
        }
    }

    /// Minimum ground normal Y for a surface to count as walkable.
    pub fn min_ground_normal(&self) -> f32 {
        self.ground_angle.to_radians().cos()
    }

    /// Reject tunables that would make the integrator misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("run_speed", self.run_speed),
            ("walk_speed", self.walk_speed),
            ("crouch_speed", self.crouch_speed),
            ("radius", self.radius),
            ("height", self.height),
            ("acceleration", self.acceleration),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        let non_negative = [
            ("ground_control", self.ground_control),
            ("air_control", self.air_control),
            ("max_force", self.max_force),
            ("jump_force", self.jump_force),
            ("stop_speed", self.stop_speed),
            ("step_height", self.step_height),
            ("body_turn_rate", self.body_turn_rate),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        Ok(())
    }
}
