//! Collision world containing static box geometry.
//!
//! The world is immutable once built, so controllers share it through an
//! `Arc` and never need to lock it.
//!
//! Every brush is an axis-aligned cuboid and every query shape is a vertical
//! capsule, so overlap reduces to a segment-to-box distance against the
//! brush's bounding box.

use glam::Vec3;
use parry3d::bounding_volume::Aabb;
use parry3d::math::{Isometry, Real};
use parry3d::shape::SharedShape;

use super::flags::ContentFlags;
use super::trace::{TraceResult, TraceShape};

/// Binary search iterations per trace. 12 gives ~0.025% of the trace length.
const TRACE_ITERATIONS: usize = 12;

/// Overlap shallower than this is resting contact, not penetration.
const CONTACT_SKIN: f32 = 0.001;

/// Extra distance added when pushing a shape out of a brush.
const PUSH_OUT_EPSILON: f32 = 0.001;

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position in world space.
    pub transform: Isometry<Real>,
    /// World-space bounds of `shape` at `transform`.
    pub bounds: Aabb,
    /// Content flags used for mask filtering.
    pub contents: ContentFlags,
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .field("contents", &self.contents)
            .finish_non_exhaustive()
    }
}

impl CollisionBrush {
    fn mins(&self) -> Vec3 {
        Vec3::new(self.bounds.mins.x, self.bounds.mins.y, self.bounds.mins.z)
    }

    fn maxs(&self) -> Vec3 {
        Vec3::new(self.bounds.maxs.x, self.bounds.maxs.y, self.bounds.maxs.z)
    }

    /// How far `shape` at `position` sinks into this brush, if at all.
    fn penetration(&self, position: Vec3, shape: TraceShape) -> Option<Penetration> {
        let (mins, maxs) = (self.mins(), self.maxs());
        let radius = shape.radius;
        let (bottom, top) = shape.segment(position.y);

        let gap_y = if bottom > maxs.y {
            bottom - maxs.y
        } else if top < mins.y {
            top - mins.y
        } else {
            0.0
        };
        let separation = Vec3::new(
            position.x - position.x.clamp(mins.x, maxs.x),
            gap_y,
            position.z - position.z.clamp(mins.z, maxs.z),
        );

        let distance = separation.length();
        if distance > 0.0 {
            let depth = radius - distance;
            return (depth > CONTACT_SKIN).then(|| Penetration {
                normal: separation / distance,
                depth,
            });
        }

        // Axis inside the box: leave through the nearest face
        [
            (Vec3::X, maxs.x + radius - position.x),
            (Vec3::NEG_X, position.x - mins.x + radius),
            (Vec3::Z, maxs.z + radius - position.z),
            (Vec3::NEG_Z, position.z - mins.z + radius),
            (Vec3::Y, maxs.y + radius - bottom),
            (Vec3::NEG_Y, top - mins.y + radius),
        ]
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(normal, depth)| Penetration { normal, depth })
    }
}

/// Overlap between a shape and one brush.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Penetration {
    /// Points out of the brush.
    normal: Vec3,
    depth: f32,
}

/// The collision world.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `contents` - Content flags for collision filtering
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, contents: ContentFlags) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let transform = Isometry::translation(center.x, center.y, center.z);
        let bounds = shape.compute_aabb(&transform);

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            bounds,
            contents,
        });

        id
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Sweep `shape` from `start` to `end` and report the first blocking hit.
    ///
    /// Positions are the bottom of the capsule.
    pub fn trace(&self, start: Vec3, end: Vec3, shape: TraceShape, mask: ContentFlags) -> TraceResult {
        let delta = end - start;
        let distance = delta.length();

        if distance < 0.0001 {
            return if self.point_in_solid(start, shape, mask) {
                TraceResult {
                    fraction: 0.0,
                    end_position: start,
                    hit_normal: Some(Vec3::Y),
                    hit_contents: ContentFlags::SOLID,
                    started_in_solid: true,
                    all_solid: true,
                }
            } else {
                TraceResult::no_hit(start)
            };
        }

        self.trace_binary_search(start, end, shape, mask, delta / distance)
    }

    /// Check if `shape` placed at `position` penetrates any geometry in `mask`.
    ///
    /// Resting contact does not count as penetration.
    pub fn point_in_solid(&self, position: Vec3, shape: TraceShape, mask: ContentFlags) -> bool {
        self.brushes
            .iter()
            .filter(|brush| mask.intersects(brush.contents))
            .any(|brush| brush.penetration(position, shape).is_some())
    }

    /// Push `shape` out of any geometry it penetrates.
    ///
    /// Returns the corrected position.
    pub fn resolve_penetration(&self, position: Vec3, shape: TraceShape, mask: ContentFlags) -> Vec3 {
        let correction: Vec3 = self
            .brushes
            .iter()
            .filter(|brush| mask.intersects(brush.contents))
            .filter_map(|brush| brush.penetration(position, shape))
            .map(|p| p.normal * (p.depth + PUSH_OUT_EPSILON))
            .sum();

        position + correction
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn trace_binary_search(
        &self,
        start: Vec3,
        end: Vec3,
        shape: TraceShape,
        mask: ContentFlags,
        direction: Vec3,
    ) -> TraceResult {
        let start_in_solid = self.point_in_solid(start, shape, mask);

        if !self.point_in_solid(end, shape, mask) {
            let mut result = TraceResult::no_hit(end);
            result.started_in_solid = start_in_solid;
            return result;
        }

        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;

        for _ in 0..TRACE_ITERATIONS {
            let mid = (lo + hi) * 0.5;
            if self.point_in_solid(start + (end - start) * mid, shape, mask) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let end_position = start + (end - start) * lo;

        let penetrating = start + (end - start) * hi;
        let push = self.resolve_penetration(penetrating, shape, mask) - penetrating;
        let hit_normal = push.try_normalize().unwrap_or_else(|| {
            let horizontal = Vec3::new(-direction.x, 0.0, -direction.z);
            if horizontal.length_squared() > 0.1 {
                horizontal.normalize()
            } else {
                -direction
            }
        });

        TraceResult {
            fraction: lo,
            end_position,
            hit_normal: Some(hit_normal),
            hit_contents: ContentFlags::SOLID,
            started_in_solid: start_in_solid,
            all_solid: start_in_solid && lo < 0.001,
        }
    }
}
