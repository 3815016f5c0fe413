//! Slide move for collision response.
//!
//! Moves a shape along its velocity, clipping the velocity against every
//! surface it touches so the character slides along walls and around corners.

use glam::Vec3;

use crate::collision::{CollisionWorld, ContentFlags, TraceShape};

use super::config::MovementConfig;

/// Upper bound on remembered clip planes, independent of the config.
const MAX_CLIP_PLANES: usize = 5;

/// Remove the part of `velocity` that points along `normal`.
///
/// `overbounce` slightly over-corrects so the next trace does not start
/// touching the surface.
pub fn clip_velocity(velocity: Vec3, normal: Vec3, overbounce: f32) -> Vec3 {
    let backoff = velocity.dot(normal);
    let backoff = if backoff < 0.0 {
        backoff * overbounce
    } else {
        backoff / overbounce
    };
    velocity - normal * backoff
}

/// Move `position` along `velocity` for `delta_time`, sliding along anything hit.
///
/// Returns `true` only if the whole move completed without touching anything.
pub fn slide_move(
    world: &CollisionWorld,
    position: &mut Vec3,
    velocity: &mut Vec3,
    shape: TraceShape,
    delta_time: f32,
    config: &MovementConfig,
) -> bool {
    let original_velocity = *velocity;
    let mut time_left = delta_time;
    let mut planes: Vec<Vec3> = Vec::with_capacity(MAX_CLIP_PLANES);

    for _ in 0..config.max_clip_planes {
        if velocity.length_squared() < 0.0001 {
            break;
        }

        let trace = world.trace(
            *position,
            *position + *velocity * time_left,
            shape,
            ContentFlags::MASK_PLAYER_SOLID,
        );

        if !trace.hit_something() {
            *position = trace.end_position;
            return planes.is_empty();
        }

        if trace.fraction > 0.0 {
            *position = trace.end_position;
        }
        time_left *= 1.0 - trace.fraction;

        let Some(normal) = trace.hit_normal else {
            continue;
        };
        if trace.all_solid {
            *velocity = Vec3::ZERO;
            return false;
        }
        if planes.len() < MAX_CLIP_PLANES {
            planes.push(normal);
        }

        // First plane whose clipped velocity leaves every other plane alone
        let clipped = planes.iter().enumerate().find_map(|(i, plane)| {
            let candidate = clip_velocity(*velocity, *plane, config.overbounce);
            let valid = planes
                .iter()
                .enumerate()
                .all(|(j, other)| i == j || candidate.dot(*other) >= -0.01);
            valid.then_some(candidate)
        });

        match clipped {
            Some(candidate) => *velocity = candidate,
            None if planes.len() >= 2 => {
                // Slide along the crease between the first two planes
                let crease = planes[0].cross(planes[1]).normalize_or_zero();
                *velocity = crease * original_velocity.dot(crease);
                if velocity.dot(planes[0]) < -0.01 || velocity.dot(planes[1]) < -0.01 {
                    *velocity = Vec3::ZERO;
                    return false;
                }
            }
            None => {
                *velocity = Vec3::ZERO;
                return false;
            }
        }
    }

    false
}

/// Slide move that tries stepping up and over obstacles up to `step_height`.
///
/// The stepped result is kept only when it gets further horizontally than
/// the plain slide. Returns whether the move ended on walkable ground or
/// completed cleanly.
pub fn step_slide_move(
    world: &CollisionWorld,
    position: &mut Vec3,
    velocity: &mut Vec3,
    shape: TraceShape,
    delta_time: f32,
    config: &MovementConfig,
) -> bool {
    let start_position = *position;
    let start_velocity = *velocity;

    if slide_move(world, position, velocity, shape, delta_time, config) {
        return true;
    }
    let slid = horizontal_distance_squared(start_position, *position);

    let up = world.trace(
        start_position,
        start_position + Vec3::Y * config.step_height,
        shape,
        ContentFlags::MASK_PLAYER_SOLID,
    );
    if up.all_solid {
        return false;
    }

    let mut stepped_position = up.end_position;
    let mut stepped_velocity = start_velocity;
    slide_move(world, &mut stepped_position, &mut stepped_velocity, shape, delta_time, config);

    let down = world.trace(
        stepped_position,
        stepped_position - Vec3::Y * (config.step_height + 0.01),
        shape,
        ContentFlags::MASK_PLAYER_SOLID,
    );
    if !down.all_solid {
        stepped_position = down.end_position;
    }

    if horizontal_distance_squared(start_position, stepped_position) <= slid {
        return false;
    }

    *position = stepped_position;
    *velocity = stepped_velocity;
    down.hit_normal
        .is_some_and(|normal| normal.y >= config.min_ground_normal())
}

fn horizontal_distance_squared(a: Vec3, b: Vec3) -> f32 {
    let delta = b - a;
    delta.x * delta.x + delta.z * delta.z
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: TraceShape = TraceShape::new(16.0, 64.0);

    fn floor_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(0.0, -8.0, 0.0),
            Vec3::new(1000.0, 8.0, 1000.0),
            ContentFlags::SOLID,
        );
        world
    }

    #[test]
    fn test_clip_velocity_wall() {
        let velocity = Vec3::new(10.0, 0.0, 5.0);
        let wall_normal = Vec3::new(-1.0, 0.0, 0.0);

        let clipped = clip_velocity(velocity, wall_normal, 1.0);

        assert!(clipped.x.abs() < 0.01);
        assert!((clipped.z - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_clip_velocity_keeps_parallel_motion() {
        let clipped = clip_velocity(Vec3::new(7.0, -3.0, 0.0), Vec3::Y, 1.001);
        assert!((clipped.x - 7.0).abs() < 0.001);
        assert!(clipped.y >= 0.0);
    }

    #[test]
    fn test_slide_move_no_collision() {
        let world = CollisionWorld::new();
        let config = MovementConfig::default();

        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::new(100.0, 0.0, 0.0);

        let success = slide_move(&world, &mut position, &mut velocity, PLAYER, 1.0, &config);

        assert!(success);
        assert!((position.x - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_slide_move_with_wall() {
        let mut world = floor_world();
        // Wall face at x=100
        world.add_box(
            Vec3::new(116.0, 64.0, 0.0),
            Vec3::new(16.0, 64.0, 500.0),
            ContentFlags::SOLID,
        );

        let config = MovementConfig::default();
        let mut position = Vec3::new(0.0, 1.0, 0.0);
        let mut velocity = Vec3::new(200.0, 0.0, 100.0);

        slide_move(&world, &mut position, &mut velocity, PLAYER, 1.0, &config);

        assert!(position.x < 100.0 - 15.0, "x={} should stop before the wall", position.x);
        assert!(position.z > 0.0, "should slide along the wall");
    }

    #[test]
    fn test_step_slide_move_climbs_step() {
        let mut world = floor_world();
        // 16 unit step starting at x=40
        world.add_box(
            Vec3::new(240.0, 8.0, 0.0),
            Vec3::new(200.0, 8.0, 200.0),
            ContentFlags::SOLID,
        );

        let config = MovementConfig::default();
        let mut position = Vec3::new(0.0, 0.01, 0.0);
        let mut velocity = Vec3::new(200.0, 0.0, 0.0);

        step_slide_move(&world, &mut position, &mut velocity, PLAYER, 0.5, &config);

        assert!(position.x > 40.0, "should have stepped onto the ledge, x={}", position.x);
        assert!(position.y > 15.0, "should stand on the step, y={}", position.y);
    }
}
