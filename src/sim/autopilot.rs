//! Demo mode: the rabbit herds on its own
//!
//! Picks the loose sheep nearest the rabbit and heads for the spot just behind
//! it, on the far side from the pen, so the sheep bolts toward the goal.

use glam::Vec2;

use super::level::Level;
use crate::platform::{HeldKeys, Key};

/// How far behind the sheep (center to center) the rabbit tries to stand
const STANDOFF: f32 = 40.0;
/// Per-axis distance considered "arrived"
const DEADZONE: f32 = 4.0;

/// Point the rabbit should walk toward, or `None` when no sheep is loose
pub fn target(level: &Level) -> Option<Vec2> {
    let rabbit = level.player().center();
    let goal = level.goal().rect().center();

    let sheep = level
        .sheep()
        .iter()
        .filter(|s| s.is_active())
        .min_by(|a, b| {
            a.center()
                .distance_squared(rabbit)
                .total_cmp(&b.center().distance_squared(rabbit))
        })?;

    let behind = (sheep.center() - goal).normalize_or_zero();
    Some(sheep.center() + behind * STANDOFF)
}

/// Keys to hold this frame
pub fn steer(level: &Level) -> HeldKeys {
    let mut keys = HeldKeys::new();
    let Some(aim) = target(level) else {
        return keys;
    };

    let delta = aim - level.player().center();
    if delta.x > DEADZONE {
        keys.press(Key::Right);
    } else if delta.x < -DEADZONE {
        keys.press(Key::Left);
    }
    if delta.y > DEADZONE {
        keys.press(Key::Down);
    } else if delta.y < -DEADZONE {
        keys.press(Key::Up);
    }
    keys
}
