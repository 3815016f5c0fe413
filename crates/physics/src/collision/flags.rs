//! Content flags for collision filtering.
//!
//! Traces only collide with geometry whose contents intersect the trace mask,
//! so clip brushes can block characters without blocking anything else.

use serde::{Deserialize, Serialize};

/// Content flags describe what type of volume a brush is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry: walls, floors, ceilings.
    pub const SOLID: Self = Self(1 << 0);

    /// Character clip. Blocks characters but nothing else.
    pub const PLAYER_CLIP: Self = Self(1 << 1);

    /// Other character bodies.
    pub const PLAYER_BODY: Self = Self(1 << 2);

    /// Trigger volume. Never blocks movement.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Mask used by every character movement and clearance trace.
    pub const MASK_PLAYER_SOLID: Self =
        Self(Self::SOLID.0 | Self::PLAYER_CLIP.0 | Self::PLAYER_BODY.0);

    /// Check if these flags contain every bit of `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
