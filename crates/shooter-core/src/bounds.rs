//! Axis-aligned bounding boxes.
//!
//! Screen coordinates: x grows to the right, y grows downward. Entities are
//! anchored at the mid-bottom point of their sprite, so an entity at
//! `(x, y)` with size `(w, h)` covers `[x - w/2, x + w/2] x [y - h, y]`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (left, top).
    pub min: Vec2,
    /// Maximum corner (right, bottom).
    pub max: Vec2,
}

impl Aabb {
    /// Create bounds for a sprite anchored at its mid-bottom point.
    #[must_use]
    pub fn from_anchor(anchor: Vec2, size: Vec2) -> Self {
        let half_w = size.x * 0.5;
        Self {
            min: Vec2::new(anchor.x - half_w, anchor.y - size.y),
            max: Vec2::new(anchor.x + half_w, anchor.y),
        }
    }

    /// Strict overlap test. Boxes that only share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
