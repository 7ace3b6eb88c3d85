//! Sheep: flee the rabbit, bump into things, get penned

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider, intersects};
use super::entity::{Body, Obstacle, cancel_into};
use crate::consts::{FLEE_RADIUS, FLEE_SPEED, IDLE_DRAG};

/// Speeds below this snap to rest
const REST_SPEED: f32 = 0.5;

/// Sheep lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HerdState {
    /// Loose in the field
    Active,
    /// In the pen; out of play for the rest of the level
    Scored,
}

/// Flee tuning shared by the whole flock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleeParams {
    /// Center-to-center distance at which the rabbit is noticed
    pub radius: f32,
    pub speed: f32,
    /// Exponential decay rate of velocity once the rabbit is out of range (1/s)
    pub idle_drag: f32,
}

impl Default for FleeParams {
    fn default() -> Self {
        Self {
            radius: FLEE_RADIUS,
            speed: FLEE_SPEED,
            idle_drag: IDLE_DRAG,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sheep {
    pub body: Body,
    pub velocity: Vec2,
    state: HerdState,
    flee: FleeParams,
    world: Vec2,
}

impl Sheep {
    pub fn new(body: Body, flee: FleeParams, world: Vec2) -> Self {
        Self {
            body,
            velocity: Vec2::ZERO,
            state: HerdState::Active,
            flee,
            world,
        }
    }

    pub fn state(&self) -> HerdState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == HerdState::Active
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Advance one frame, running from the rabbit at `threat` (its center)
    pub fn update(&mut self, dt: f32, threat: Vec2) {
        if !self.is_active() {
            return;
        }
        let dt = dt.max(0.0);

        let away = self.center() - threat;
        if away.length() < self.flee.radius {
            // Rabbit exactly on top of us gives no direction: stand still
            self.velocity = away.normalize_or_zero() * self.flee.speed;
        } else {
            self.velocity *= (-self.flee.idle_drag * dt).exp();
            if self.velocity.length() < REST_SPEED {
                self.velocity = Vec2::ZERO;
            }
        }

        self.body.position += self.velocity * dt;
        self.body.clamp_to_world(self.world);
    }

    /// Bounce off a static wall. The wall does not move, so the sheep takes the
    /// whole separation.
    pub fn collision_response(&mut self, obstacle: &Obstacle) {
        if !self.is_active() {
            return;
        }
        let push = self.body.escape_from(&obstacle.bounds(), self.world);
        if push == Vec2::ZERO {
            return;
        }
        self.body.position += push;
        cancel_into(&mut self.velocity, push);
    }

    /// Push two overlapping sheep apart, half each, along the shallowest axis.
    ///
    /// Neither sheep is pushed out of the world or into one of `walls`. When
    /// one of them is pinned, the other takes the part of the push it could
    /// not absorb.
    pub fn separate(a: &mut Sheep, b: &mut Sheep, walls: &[Obstacle]) {
        if !(a.is_active() && b.is_active()) {
            return;
        }
        let push = a.bounds().separation(&b.bounds());
        if push == Vec2::ZERO {
            return;
        }

        let moved_a = a.nudge(push * 0.5, walls);
        let moved_b = b.nudge(moved_a - push, walls);
        let shortfall = push - moved_a + moved_b;
        if shortfall != Vec2::ZERO {
            let extra = a.nudge(shortfall, walls);
            if extra != shortfall {
                log::trace!("Sheep pair wedged, {} left unresolved", shortfall - extra);
            }
        }

        cancel_into(&mut a.velocity, push);
        cancel_into(&mut b.velocity, -push);
    }

    /// Move as far along `delta` as the world and `walls` allow
    fn nudge(&mut self, delta: Vec2, walls: &[Obstacle]) -> Vec2 {
        let moved = self.body.sweep(delta, self.world, walls);
        self.body.position += moved;
        moved
    }

    /// Enter the pen if overlapping it. Returns true on the transition.
    pub fn collide_with_goal(&mut self, goal: &Obstacle) -> bool {
        if !self.is_active() || !intersects(self, goal) {
            return false;
        }
        self.state = HerdState::Scored;
        self.velocity = Vec2::ZERO;
        true
    }
}

impl Collider for Sheep {
    fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(800.0, 500.0);

    fn sheep_at(x: f32, y: f32) -> Sheep {
        Sheep::new(
            Body::new(Vec2::new(x, y), Vec2::splat(32.0)),
            FleeParams::default(),
            WORLD,
        )
    }

    #[test]
    fn test_flees_within_radius() {
        let mut s = sheep_at(200.0, 200.0);
        // Rabbit 50 units to the left of the sheep's center
        let threat = s.center() - Vec2::new(50.0, 0.0);
        s.update(0.1, threat);
        assert!((s.velocity.x - FLEE_SPEED).abs() < 1e-3);
        assert!(s.velocity.y.abs() < 1e-3);
        assert!(s.body.position.x > 200.0);
    }

    #[test]
    fn test_ignores_distant_rabbit_and_decays() {
        let mut s = sheep_at(200.0, 200.0);
        s.velocity = Vec2::new(100.0, 0.0);
        let far = Vec2::new(700.0, 450.0);
        s.update(0.1, far);
        assert!(s.velocity.x < 100.0 && s.velocity.x > 0.0);

        for _ in 0..200 {
            s.update(0.1, far);
        }
        assert_eq!(s.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_threat_on_center_is_deterministic() {
        let mut a = sheep_at(200.0, 200.0);
        let mut b = sheep_at(200.0, 200.0);
        let threat = a.center();
        a.update(0.1, threat);
        b.update(0.1, threat);
        assert_eq!(a.velocity, Vec2::ZERO);
        assert_eq!(a.body.position, b.body.position);
    }

    #[test]
    fn test_update_clamps_to_world() {
        let mut s = sheep_at(2.0, 2.0);
        let threat = s.center() + Vec2::new(10.0, 10.0);
        s.update(1.0, threat);
        assert_eq!(s.body.position, Vec2::ZERO);
    }

    #[test]
    fn test_wall_pushes_sheep_out() {
        let wall = Obstacle::new(Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 300.0)));
        let mut s = sheep_at(145.0, 200.0);
        s.velocity = Vec2::new(-50.0, 10.0);
        s.collision_response(&wall);
        assert!(!intersects(&s, &wall));
        assert!(s.body.position.x >= 150.0);
        assert_eq!(s.velocity, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_separate_pushes_both_apart() {
        let mut a = sheep_at(200.0, 200.0);
        let mut b = sheep_at(220.0, 205.0);
        a.velocity = Vec2::new(30.0, 0.0);
        b.velocity = Vec2::new(-30.0, 0.0);

        Sheep::separate(&mut a, &mut b, &[]);
        assert!(!intersects(&a, &b));
        assert!(a.body.position.x < 200.0);
        assert!(b.body.position.x > 220.0);
        // Equal and opposite
        assert!(((200.0 - a.body.position.x) - (b.body.position.x - 220.0)).abs() < 1e-3);
        assert_eq!(a.velocity.x, 0.0);
        assert_eq!(b.velocity.x, 0.0);
        assert!(a.is_active() && b.is_active());
    }

    #[test]
    fn test_separate_from_sheep_against_wall() {
        let wall = Obstacle::new(Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 300.0)));
        // Touching the wall's right face, with a neighbour overlapping from the right
        let mut a = sheep_at(150.5, 200.0);
        let mut b = sheep_at(172.0, 200.0);

        Sheep::separate(&mut a, &mut b, &[wall]);
        assert!(!intersects(&a, &b));
        assert!(!intersects(&a, &wall));
        assert!(a.body.position.x >= 150.0);
        assert!(b.body.position.x > 182.0);
    }

    #[test]
    fn test_separate_from_sheep_at_world_edge() {
        let mut a = sheep_at(0.0, 450.0);
        let mut b = sheep_at(20.0, 450.0);

        Sheep::separate(&mut a, &mut b, &[]);
        assert!(!intersects(&a, &b));
        assert_eq!(a.body.position, Vec2::new(0.0, 450.0));

        // Same pair with the pinned sheep second
        let mut a = sheep_at(20.0, 450.0);
        let mut b = sheep_at(0.0, 450.0);
        Sheep::separate(&mut a, &mut b, &[]);
        assert!(!intersects(&a, &b));
        assert_eq!(b.body.position, Vec2::new(0.0, 450.0));
    }

    #[test]
    fn test_goal_scores_once() {
        let goal = Obstacle::new(Aabb::new(Vec2::new(250.0, 250.0), Vec2::splat(50.0)));
        let mut s = sheep_at(260.0, 260.0);
        assert!(s.collide_with_goal(&goal));
        assert_eq!(s.state(), HerdState::Scored);
        // Irreversible and reported once
        assert!(!s.collide_with_goal(&goal));
        assert_eq!(s.state(), HerdState::Scored);
    }

    #[test]
    fn test_scored_sheep_is_frozen() {
        let goal = Obstacle::new(Aabb::new(Vec2::new(250.0, 250.0), Vec2::splat(50.0)));
        let mut s = sheep_at(260.0, 260.0);
        s.collide_with_goal(&goal);
        let before = s.body.position;

        s.update(1.0, s.center() - Vec2::new(10.0, 0.0));
        assert_eq!(s.body.position, before);

        let mut other = sheep_at(270.0, 270.0);
        Sheep::separate(&mut s, &mut other, &[]);
        assert_eq!(s.body.position, before);
        assert_eq!(other.body.position, Vec2::new(270.0, 270.0));
    }

    #[test]
    fn test_goal_miss() {
        let goal = Obstacle::new(Aabb::new(Vec2::new(250.0, 250.0), Vec2::splat(50.0)));
        let mut s = sheep_at(100.0, 100.0);
        assert!(!s.collide_with_goal(&goal));
        assert!(s.is_active());
    }
}
