//! Level simulation
//!
//! All gameplay lives here and stays free of rendering backends:
//! - Frame delta passed in, no hidden time sources
//! - Seeded RNG only
//! - Stable iteration order (sheep by spawn index)

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod entity;
pub mod level;
pub mod player;
pub mod sheep;

pub use camera::{Camera, View, clamp_center};
pub use collision::{Aabb, CollisionBox, Collider, intersects};
pub use entity::{Body, Obstacle};
pub use level::{Hud, Level, LevelPhase, TextItem, WIN_MESSAGE};
pub use player::Player;
pub use sheep::{FleeParams, HerdState, Sheep};
