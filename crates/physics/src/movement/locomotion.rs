//! Ground/air locomotion model.
//!
//! Builds the wish velocity from directional intent and integrates it through
//! a [`Collider`]:
//!
//! - Grounded: vertical velocity is zeroed, then acceleration and friction
//!   both use `ground_control`.
//! - Airborne: the wish vector is clamped to `max_force` and friction uses the
//!   much weaker `air_control`.
//! - Gravity is split in two half steps around the move so the landing tick
//!   does not sink into the ground.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::angles::EyeAngles;
use super::collider::Collider;
use super::config::MovementConfig;

/// Which speed constant scales the wish velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedTier {
    Crouch,
    Run,
    Walk,
}

impl SpeedTier {
    /// Crouching wins over running, running over walking.
    pub fn select(is_crouching: bool, is_running: bool) -> Self {
        if is_crouching {
            SpeedTier::Crouch
        } else if is_running {
            SpeedTier::Run
        } else {
            SpeedTier::Walk
        }
    }
}

/// Directional keys held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Check if any directional key is held.
    pub fn any(self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Build the horizontal wish velocity.
///
/// The active direction vectors of the view are summed, flattened, normalized
/// and scaled by exactly one speed constant. A sum too short to normalize
/// yields exactly zero.
pub fn build_wish_velocity(
    eye_angles: EyeAngles,
    intent: MoveIntent,
    tier: SpeedTier,
    config: &MovementConfig,
) -> Vec3 {
    let rotation = eye_angles.to_rotation();
    let forward = rotation * Vec3::X;
    let right = rotation * Vec3::Z;

    let mut wish = Vec3::ZERO;
    if intent.forward {
        wish += forward;
    }
    if intent.backward {
        wish -= forward;
    }
    if intent.left {
        wish -= right;
    }
    if intent.right {
        wish += right;
    }

    wish.y = 0.0;
    if wish.length_squared() < 1e-6 {
        return Vec3::ZERO;
    }

    wish.normalize() * config.speed(tier)
}

/// Integrate one fixed step and move the collider.
pub fn integrate_and_move<C: Collider + ?Sized>(
    collider: &mut C,
    wish_velocity: Vec3,
    gravity: Vec3,
    delta_time: f32,
    config: &MovementConfig,
) {
    let half_gravity = gravity * delta_time * 0.5;

    if collider.is_on_ground() {
        collider.set_velocity(with_vertical(collider.velocity(), 0.0));
        collider.accelerate(wish_velocity, delta_time);
        collider.apply_friction(config.ground_control, delta_time);
    } else {
        collider.set_velocity(collider.velocity() + half_gravity);
        collider.accelerate(wish_velocity.clamp_length_max(config.max_force), delta_time);
        collider.apply_friction(config.air_control, delta_time);
    }

    collider.move_and_slide(delta_time);

    // Second half of gravity, or none if the move landed us
    if collider.is_on_ground() {
        collider.set_velocity(with_vertical(collider.velocity(), 0.0));
    } else {
        collider.set_velocity(collider.velocity() + half_gravity);
    }
}

/// Jump if grounded. Returns whether the impulse was applied.
///
/// The impulse is added to the current velocity, never assigned.
pub fn jump<C: Collider + ?Sized>(collider: &mut C, config: &MovementConfig) -> bool {
    if !collider.is_on_ground() {
        return false;
    }

    collider.punch(Vec3::Y * config.jump_force);
    log::debug!("jump: velocity={:?}", collider.velocity());
    true
}

fn with_vertical(velocity: Vec3, y: f32) -> Vec3 {
    Vec3::new(velocity.x, y, velocity.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::test_support::MockCollider;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 0.016;

    fn all_intents() -> Vec<MoveIntent> {
        (0..16u8)
            .map(|bits| MoveIntent {
                forward: bits & 1 != 0,
                backward: bits & 2 != 0,
                left: bits & 4 != 0,
                right: bits & 8 != 0,
            })
            .collect()
    }

    #[test]
    fn test_speed_tier_priority() {
        assert_eq!(SpeedTier::select(true, true), SpeedTier::Crouch);
        assert_eq!(SpeedTier::select(true, false), SpeedTier::Crouch);
        assert_eq!(SpeedTier::select(false, true), SpeedTier::Run);
        assert_eq!(SpeedTier::select(false, false), SpeedTier::Walk);
    }

    #[test]
    fn test_no_keys_gives_exact_zero() {
        let config = MovementConfig::default();
        for tier in [SpeedTier::Crouch, SpeedTier::Run, SpeedTier::Walk] {
            let wish = build_wish_velocity(EyeAngles::new(0.3, 1.1, 0.0), MoveIntent::default(), tier, &config);
            assert_eq!(wish, Vec3::ZERO);
        }
    }

    #[test]
    fn test_opposing_keys_cancel_to_exact_zero() {
        let config = MovementConfig::default();
        let intent = MoveIntent {
            forward: true,
            backward: true,
            left: true,
            right: true,
        };
        let wish = build_wish_velocity(EyeAngles::new(0.0, 0.7, 0.0), intent, SpeedTier::Run, &config);
        assert_eq!(wish, Vec3::ZERO);
    }

    #[test]
    fn test_magnitude_is_exactly_one_tier_speed() {
        let config = MovementConfig::default();
        let eye = EyeAngles::new(0.4, -2.3, 0.0);

        for intent in all_intents() {
            for (crouching, running) in [(false, false), (false, true), (true, false), (true, true)] {
                let tier = SpeedTier::select(crouching, running);
                let wish = build_wish_velocity(eye, intent, tier, &config);

                assert_eq!(wish.y, 0.0);
                if wish == Vec3::ZERO {
                    continue;
                }
                let expected = config.speed(tier);
                assert!(
                    (wish.length() - expected).abs() < 1e-3,
                    "{:?} {:?}: |wish|={} expected {}",
                    intent,
                    tier,
                    wish.length(),
                    expected
                );
            }
        }
    }

    #[test]
    fn test_direction_is_normalized_sum() {
        let config = MovementConfig::default();
        let eye = EyeAngles::new(0.0, 0.0, 0.0);
        let intent = MoveIntent {
            forward: true,
            right: true,
            ..Default::default()
        };

        let wish = build_wish_velocity(eye, intent, SpeedTier::Walk, &config);
        let expected = (Vec3::X + Vec3::Z).normalize() * config.walk_speed;
        assert!((wish - expected).length() < 1e-3);
    }

    #[test]
    fn test_pitch_does_not_change_speed() {
        let config = MovementConfig::default();
        let intent = MoveIntent {
            forward: true,
            ..Default::default()
        };
        let wish = build_wish_velocity(EyeAngles::new(1.2, FRAC_PI_2, 0.0), intent, SpeedTier::Walk, &config);
        assert_eq!(wish.y, 0.0);
        assert!((wish.length() - config.walk_speed).abs() < 1e-3);
        assert!(wish.z > 159.0);
    }

    #[test]
    fn test_grounded_run_forward_scenario() {
        let config = MovementConfig::default();
        let intent = MoveIntent {
            forward: true,
            ..Default::default()
        };
        let wish = build_wish_velocity(EyeAngles::default(), intent, SpeedTier::Run, &config);
        assert!((wish - Vec3::new(290.0, 0.0, 0.0)).length() < 1e-3);

        let mut collider = MockCollider::grounded();
        integrate_and_move(&mut collider, wish, config.gravity, DT, &config);

        let horizontal = Vec3::new(collider.velocity.x, 0.0, collider.velocity.z);
        assert!(horizontal.x > 1.0, "should move toward 290, got {:?}", horizontal);
        assert!(horizontal.x < 290.0, "exponential approach should not arrive in one tick");
        assert_eq!(collider.velocity.y, 0.0);
        assert_eq!(collider.frictions, vec![config.ground_control]);
    }

    #[test]
    fn test_grounded_zeroes_vertical_before_and_after_move() {
        let config = MovementConfig::default();
        let mut collider = MockCollider::grounded();
        collider.velocity = Vec3::new(0.0, -30.0, 0.0);

        integrate_and_move(&mut collider, Vec3::ZERO, config.gravity, DT, &config);

        assert_eq!(collider.velocity_at_move.unwrap().y, 0.0);
        assert_eq!(collider.velocity.y, 0.0);
    }

    #[test]
    fn test_airborne_gravity_split_sums_to_full_step() {
        let config = MovementConfig {
            air_control: 0.0,
            ..Default::default()
        };
        let mut collider = MockCollider::airborne();
        collider.velocity = Vec3::new(0.0, -100.0, 0.0);

        integrate_and_move(&mut collider, Vec3::ZERO, config.gravity, DT, &config);

        let half = config.gravity.y * DT * 0.5;
        assert!((collider.velocity_at_move.unwrap().y - (-100.0 + half)).abs() < 1e-4);
        assert!((collider.velocity.y - (-100.0 + config.gravity.y * DT)).abs() < 1e-4);
        assert!(!collider.on_ground);
    }

    #[test]
    fn test_landing_tick_discards_second_half() {
        let config = MovementConfig::default();
        let mut collider = MockCollider::airborne();
        collider.velocity = Vec3::new(0.0, -200.0, 0.0);
        collider.ground_after_move = Some(true);

        integrate_and_move(&mut collider, Vec3::ZERO, config.gravity, DT, &config);

        assert_eq!(collider.velocity.y, 0.0);
    }

    #[test]
    fn test_air_wish_is_clamped_to_max_force() {
        let config = MovementConfig::default();
        let mut collider = MockCollider::airborne();

        integrate_and_move(&mut collider, Vec3::new(290.0, 0.0, 0.0), config.gravity, DT, &config);

        let wish = collider.accelerations[0];
        assert!((wish.length() - config.max_force).abs() < 1e-3);
        assert_eq!(collider.frictions, vec![config.air_control]);
    }

    #[test]
    fn test_jump_adds_impulse_when_grounded() {
        let config = MovementConfig::default();
        let mut collider = MockCollider::grounded();
        collider.velocity = Vec3::new(10.0, 5.0, 0.0);

        assert!(jump(&mut collider, &config));
        assert_eq!(collider.velocity.y, 5.0 + 350.0);
        assert_eq!(collider.velocity.x, 10.0);
        assert!(!collider.on_ground);
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let config = MovementConfig::default();
        let mut collider = MockCollider::airborne();
        collider.velocity = Vec3::new(1.0, -20.0, 2.0);

        assert!(!jump(&mut collider, &config));
        assert_eq!(collider.velocity, Vec3::new(1.0, -20.0, 2.0));
    }
}
