//! Axis-aligned bounding box collision
//!
//! Every entity in the level collides as a rectangle: its position plus a local
//! collision box. Overlap is strict, so two boxes that only share an edge do
//! not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Extra distance added when pushing boxes apart, so float rounding never
/// leaves a resolved pair touching by a hair
pub const SEPARATION_EPSILON: f32 = 1e-3;

/// A world-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }

    /// True if `other` lies entirely inside this box (edges may touch)
    pub fn contains(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && b_max.x <= a_max.x
            && b_max.y <= a_max.y
    }

    pub fn translated(&self, delta: Vec2) -> Aabb {
        Aabb::new(self.min + delta, self.size)
    }

    /// The four axis-aligned translations that move `self` out of `other`,
    /// smallest first.
    ///
    /// Each candidate includes [`SEPARATION_EPSILON`]. Returns `None` when the
    /// boxes do not overlap.
    pub fn escape_candidates(&self, other: &Aabb) -> Option<[Vec2; 4]> {
        if !self.intersects(other) {
            return None;
        }
        let (a_max, b_max) = (self.max(), other.max());
        let mut candidates = [
            Vec2::new(other.min.x - a_max.x - SEPARATION_EPSILON, 0.0),
            Vec2::new(b_max.x - self.min.x + SEPARATION_EPSILON, 0.0),
            Vec2::new(0.0, other.min.y - a_max.y - SEPARATION_EPSILON),
            Vec2::new(0.0, b_max.y - self.min.y + SEPARATION_EPSILON),
        ];
        // Stable sort keeps x before y on ties
        candidates.sort_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));
        Some(candidates)
    }

    /// Minimum translation vector pushing `self` out of `other` along the axis
    /// of least penetration. Zero when there is no overlap.
    pub fn separation(&self, other: &Aabb) -> Vec2 {
        self.escape_candidates(other)
            .map(|c| c[0])
            .unwrap_or(Vec2::ZERO)
    }
}

/// Collision rectangle in entity-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionBox {
    pub offset: Vec2,
    pub extent: Vec2,
}

impl CollisionBox {
    pub fn new(offset: Vec2, extent: Vec2) -> Self {
        Self { offset, extent }
    }

    /// Box covering the whole sprite
    pub fn covering(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    /// World-space rectangle for an entity at `position`
    #[inline]
    pub fn at(&self, position: Vec2) -> Aabb {
        Aabb::new(position + self.offset, self.extent)
    }
}

/// Anything that occupies a world-space collision rectangle
pub trait Collider {
    fn bounds(&self) -> Aabb;
}

impl Collider for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

/// AABB overlap test between two colliders. Symmetric and side-effect free.
#[inline]
pub fn intersects<A, B>(a: &A, b: &B) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    a.bounds().intersects(&b.bounds())
}
