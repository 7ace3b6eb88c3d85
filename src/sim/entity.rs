//! Shared entity record and static obstacles
//!
//! Rabbit, sheep, walls and the goal all carry a [`Body`]; behaviour lives in
//! the owning type and the level dispatches on those types directly.

use glam::Vec2;

use super::collision::{Aabb, CollisionBox, Collider, SEPARATION_EPSILON};

/// Position, sprite size and collision box of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Top-left corner of the sprite (world units)
    pub position: Vec2,
    pub size: Vec2,
    pub collision_box: CollisionBox,
}

impl Body {
    /// Body whose collision box covers the whole sprite
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            collision_box: CollisionBox::covering(size),
        }
    }

    pub fn with_collision_box(mut self, collision_box: CollisionBox) -> Self {
        self.collision_box = collision_box;
        self
    }

    /// Sprite rectangle (what gets drawn)
    #[inline]
    pub fn rect(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Keep the whole sprite inside `[0, world.x] × [0, world.y]`.
    ///
    /// A sprite larger than the world is pinned to the origin on that axis.
    pub fn clamp_to_world(&mut self, world: Vec2) {
        self.position = self.position.min(world - self.size).max(Vec2::ZERO);
    }

    /// True if the sprite moved by `delta` stays inside the world
    fn fits_after(&self, delta: Vec2, world: Vec2) -> bool {
        Aabb::new(Vec2::ZERO, world).contains(&self.rect().translated(delta))
    }

    /// Smallest push that separates this body from `other` without carrying
    /// the sprite outside the world. Falls back to the absolute smallest push
    /// when every exit is blocked. Zero when not overlapping.
    pub fn escape_from(&self, other: &Aabb, world: Vec2) -> Vec2 {
        match self.bounds().escape_candidates(other) {
            None => Vec2::ZERO,
            Some(candidates) => candidates
                .iter()
                .copied()
                .find(|&delta| self.fits_after(delta, world))
                .unwrap_or(candidates[0]),
        }
    }

    /// How much of an axis-aligned move `delta` can be made before the sprite
    /// leaves the world or the collision box runs into one of `obstacles`.
    ///
    /// Obstacles already overlapping the body are ignored; resolving those is
    /// the job of [`Body::escape_from`].
    pub fn sweep(&self, delta: Vec2, world: Vec2, obstacles: &[Obstacle]) -> Vec2 {
        let (rect, bounds) = (self.rect(), self.bounds());
        let mut allowed = delta;
        for axis in 0..2 {
            let d = delta[axis];
            if d == 0.0 {
                continue;
            }
            let cross = 1 - axis;
            let mut room = if d > 0.0 {
                world[axis] - rect.max()[axis]
            } else {
                rect.min[axis]
            };
            for obstacle in obstacles {
                let o = obstacle.bounds();
                let abreast =
                    bounds.min[cross] < o.max()[cross] && bounds.max()[cross] > o.min[cross];
                if !abreast {
                    continue;
                }
                let gap = if d > 0.0 {
                    o.min[axis] - bounds.max()[axis]
                } else {
                    bounds.min[axis] - o.max()[axis]
                };
                if gap >= 0.0 {
                    room = room.min(gap - SEPARATION_EPSILON);
                }
            }
            let room = room.max(0.0);
            allowed[axis] = d.clamp(-room, room);
        }
        allowed
    }
}

impl Collider for Body {
    #[inline]
    fn bounds(&self) -> Aabb {
        self.collision_box.at(self.position)
    }
}

/// Zero the velocity components that point against a push
pub(crate) fn cancel_into(velocity: &mut Vec2, push: Vec2) {
    if push.x * velocity.x < 0.0 {
        velocity.x = 0.0;
    }
    if push.y * velocity.y < 0.0 {
        velocity.y = 0.0;
    }
}

/// Immovable rectangle (wall or goal pen)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    body: Body,
}

impl Obstacle {
    pub fn new(rect: Aabb) -> Self {
        Self {
            body: Body::new(rect.min, rect.size),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn rect(&self) -> Aabb {
        self.body.rect()
    }
}

impl Collider for Obstacle {
    fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}
