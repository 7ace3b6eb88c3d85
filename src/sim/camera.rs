//! Camera that follows the rabbit without showing anything outside the level

use glam::Vec2;

use super::collision::Aabb;

/// The visible rectangle of the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub center: Vec2,
    pub size: Vec2,
}

impl View {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.center - self.half_size()
    }

    #[inline]
    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.center.x - self.size.x * 0.5, self.center.y + self.size.y * 0.5)
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.top_left(), self.size)
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    view: View,
    bounds: Aabb,
}

impl Camera {
    /// Camera of `view_size` clamped to `bounds`, starting at the bounds'
    /// top-left corner
    pub fn new(view_size: Vec2, bounds: Aabb) -> Self {
        let center = clamp_center(bounds.min, view_size, &bounds);
        Self {
            view: View::new(center, view_size),
            bounds,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Recenter on `target`, clamped so the view stays inside the bounds
    pub fn follow(&mut self, target: Vec2) {
        self.view.center = clamp_center(target, self.view.size, &self.bounds);
    }
}

/// Clamp a view center so a view of `view_size` stays within `bounds`.
///
/// On an axis where the view is larger than the bounds there is no valid
/// center, so the view is centered on the bounds instead.
pub fn clamp_center(target: Vec2, view_size: Vec2, bounds: &Aabb) -> Vec2 {
    let half = view_size * 0.5;
    let axis = |t: f32, half: f32, min: f32, max: f32| {
        let lo = min + half;
        let hi = max - half;
        if lo > hi { (min + max) * 0.5 } else { t.clamp(lo, hi) }
    };
    let max = bounds.max();
    Vec2::new(
        axis(target.x, half.x, bounds.min.x, max.x),
        axis(target.y, half.y, bounds.min.y, max.y),
    )
}
