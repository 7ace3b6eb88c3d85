//! The rabbit: keyboard-driven, confined to the level

use glam::Vec2;

use super::collision::{Aabb, Collider};
use super::entity::{Body, Obstacle, cancel_into};
use crate::platform::{Key, KeyState};

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub velocity: Vec2,
    /// Movement speed per held axis (units/s)
    pub speed: f32,
    world: Vec2,
}

impl Player {
    pub fn new(body: Body, speed: f32, world: Vec2) -> Self {
        Self {
            body,
            velocity: Vec2::ZERO,
            speed,
            world,
        }
    }

    pub fn world_size(&self) -> Vec2 {
        self.world
    }

    /// Translate held keys into velocity. Opposing keys cancel.
    pub fn handle_input(&mut self, keys: &dyn KeyState) {
        let axis = |neg: Key, pos: Key| match (keys.is_held(neg), keys.is_held(pos)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        self.velocity =
            Vec2::new(axis(Key::Left, Key::Right), axis(Key::Up, Key::Down)) * self.speed;
    }

    /// Integrate velocity and keep the whole sprite inside the world
    pub fn update(&mut self, dt: f32) {
        self.body.position += self.velocity * dt.max(0.0);
        self.body.clamp_to_world(self.world);
    }

    /// Push out of a wall along the shallowest exit that stays in the world
    pub fn collision_response(&mut self, obstacle: &Obstacle) {
        let push = self.body.escape_from(&obstacle.bounds(), self.world);
        if push == Vec2::ZERO {
            return;
        }
        self.body.position += push;
        cancel_into(&mut self.velocity, push);
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }
}

impl Collider for Player {
    fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}
