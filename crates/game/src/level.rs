//! Level geometry and spawn points.

use std::sync::Arc;

use glam::Vec3;
use sandstep_physics::{CollisionWorld, ContentFlags};
use serde::{Deserialize, Serialize};

/// A level: static collision plus where characters appear.
#[derive(Debug, Clone)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision geometry, shared with every character controller.
    pub collision: Arc<CollisionWorld>,

    /// Character spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// A spawn point for characters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Position in world space (feet).
    pub position: Vec3,

    /// Initial yaw in radians.
    pub facing: f32,
}

impl Level {
    /// Create a level from already-built geometry.
    pub fn new(id: &str, name: &str, collision: CollisionWorld) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: Arc::new(collision),
            spawn_points: Vec::new(),
        }
    }

    /// A walled arena with a stair step and a crawlspace.
    pub fn test_arena() -> Self {
        const ARENA_SIZE: f32 = 1024.0;
        const WALL_HEIGHT: f32 = 128.0;
        const WALL_THICKNESS: f32 = 16.0;

        let mut world = CollisionWorld::new();

        // Floor, top face at y=0
        world.add_box(
            Vec3::new(0.0, -8.0, 0.0),
            Vec3::new(ARENA_SIZE, 8.0, ARENA_SIZE),
            ContentFlags::SOLID,
        );

        let half_wall = WALL_HEIGHT / 2.0;
        for (center, half_extents) in [
            (
                Vec3::new(0.0, half_wall, -ARENA_SIZE),
                Vec3::new(ARENA_SIZE, half_wall, WALL_THICKNESS),
            ),
            (
                Vec3::new(0.0, half_wall, ARENA_SIZE),
                Vec3::new(ARENA_SIZE, half_wall, WALL_THICKNESS),
            ),
            (
                Vec3::new(ARENA_SIZE, half_wall, 0.0),
                Vec3::new(WALL_THICKNESS, half_wall, ARENA_SIZE),
            ),
            (
                Vec3::new(-ARENA_SIZE, half_wall, 0.0),
                Vec3::new(WALL_THICKNESS, half_wall, ARENA_SIZE),
            ),
        ] {
            world.add_box(center, half_extents, ContentFlags::SOLID);
        }

        // Step, 16 units high, low enough to walk up
        world.add_box(
            Vec3::new(0.0, 8.0, 400.0),
            Vec3::new(128.0, 8.0, 64.0),
            ContentFlags::SOLID,
        );

        // Crawlspace roof, underside at y=48: crouch to get under
        world.add_box(
            Vec3::new(0.0, 64.0, -400.0),
            Vec3::new(128.0, 16.0, 128.0),
            ContentFlags::SOLID,
        );

        let mut level = Self::new("test_arena", "Test Arena", world);
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(-400.0, 0.0, 0.0),
            facing: 0.0,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(400.0, 0.0, 0.0),
            facing: std::f32::consts::PI,
        });
        level
    }

    /// Spawn point for the `index`th character, cycling through the list.
    pub fn spawn_point(&self, index: usize) -> Option<SpawnPoint> {
        if self.spawn_points.is_empty() {
            return None;
        }
        Some(self.spawn_points[index % self.spawn_points.len()])
    }
}
