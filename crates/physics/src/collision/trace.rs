//! Trace results and shapes for collision queries.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;

/// Result of sweeping a shape through the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    /// How far along the path the shape got before hitting something.
    ///
    /// - `1.0` = traveled the full distance (no collision)
    /// - `0.0` = blocked immediately at start
    pub fraction: f32,

    /// Final position of the shape after the trace.
    pub end_position: Vec3,

    /// Surface normal at the impact point, `None` when nothing was hit.
    pub hit_normal: Option<Vec3>,

    /// Content flags of what was hit.
    pub hit_contents: ContentFlags,

    /// Whether the trace started inside solid geometry.
    pub started_in_solid: bool,

    /// Whether the shape could not move at all.
    pub all_solid: bool,
}

impl Default for TraceResult {
    fn default() -> Self {
        Self::no_hit(Vec3::ZERO)
    }
}

impl TraceResult {
    /// Create a trace result indicating no collision occurred.
    pub fn no_hit(end_position: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            hit_normal: None,
            hit_contents: ContentFlags::EMPTY,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// Create a trace result indicating a collision occurred.
    pub fn hit(fraction: f32, end_position: Vec3, normal: Vec3) -> Self {
        Self {
            fraction,
            end_position,
            hit_normal: Some(normal),
            hit_contents: ContentFlags::SOLID,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// Check if this trace hit something.
    #[inline]
    pub fn hit_something(&self) -> bool {
        self.fraction < 1.0
    }
}

/// A vertical capsule swept through the world.
///
/// The origin is the bottom of the lower cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceShape {
    /// Radius of the cylinder and end caps.
    pub radius: f32,
    /// Total height from bottom cap to top cap.
    pub height: f32,
}

impl TraceShape {
    pub const fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    /// Same capsule with a different height.
    pub fn with_height(self, height: f32) -> Self {
        Self { height, ..self }
    }

    /// Heights of the lower and upper cap centers above `origin_y`.
    ///
    /// Capsules shorter than two radii collapse to a sphere.
    pub(crate) fn segment(&self, origin_y: f32) -> (f32, f32) {
        let bottom = origin_y + self.radius;
        let top = origin_y + (self.height - self.radius).max(self.radius);
        (bottom, top)
    }
}
