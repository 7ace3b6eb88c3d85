//! Level layout and tuning
//!
//! Loaded from a JSON file next to the binary. Every field has a default, so a
//! partial file only overrides what it names and a missing file gives the
//! reference level.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::AssetPaths;
use crate::sim::collision::Aabb;
use crate::sim::sheep::FleeParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Placement and sizes of the on-screen text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudLayout {
    /// Timer distance from the view's bottom-left corner
    pub margin: f32,
    pub timer_size: u32,
    pub win_size: u32,
    pub scoreboard_size: u32,
    /// Win text offset from the view's top-left once the round is complete
    pub win_offset: Vec2,
    /// Where the win text waits, out of sight, until then
    pub win_parked: Vec2,
    /// Scoreboard offset from the view's top-left
    pub scoreboard_offset: Vec2,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            margin: HUD_MARGIN,
            timer_size: 24,
            win_size: 50,
            scoreboard_size: 24,
            win_offset: Vec2::new(100.0, 100.0),
            win_parked: Vec2::new(-1000.0, 100.0),
            scoreboard_offset: Vec2::new(400.0, 175.0),
        }
    }
}

/// Everything needed to build a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub world_size: Vec2,
    pub view_size: Vec2,

    // === Rabbit ===
    pub player_spawn: Vec2,
    pub player_size: Vec2,
    pub player_speed: f32,

    // === Flock ===
    /// One entry per sheep; the count is fixed for the level
    pub sheep_spawns: Vec<Vec2>,
    pub sheep_size: Vec2,
    pub flee: FleeParams,
    /// Random offset applied to each sheep spawn (0 = fixed layout)
    pub spawn_jitter: f32,
    /// Seed for the spawn offsets
    pub seed: u64,

    // === Scenery ===
    pub walls: Vec<Aabb>,
    pub goal: Aabb,

    pub hud: HudLayout,
    pub assets: AssetPaths,
    /// Append-only best-times log
    pub score_log: PathBuf,
}

impl Default for LevelConfig {
    fn default() -> Self {
        let sheep_spawns = (0..SHEEP_COUNT)
            .map(|i| Vec2::new(200.0 + 100.0 * i as f32, 400.0 - 100.0 * i as f32))
            .collect();
        let walls = (0..2)
            .map(|i| {
                Aabb::new(
                    Vec2::new(100.0 + 600.0 * i as f32, 100.0),
                    Vec2::new(WALL_WIDTH, WALL_HEIGHT),
                )
            })
            .collect();

        Self {
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            view_size: Vec2::new(VIEW_WIDTH, VIEW_HEIGHT),

            player_spawn: Vec2::new(40.0, 40.0),
            player_size: Vec2::splat(PLAYER_SIZE),
            player_speed: PLAYER_SPEED,

            sheep_spawns,
            sheep_size: Vec2::splat(SHEEP_SIZE),
            flee: FleeParams::default(),
            spawn_jitter: 0.0,
            seed: 0,

            walls,
            goal: Aabb::new(Vec2::new(250.0, 250.0), Vec2::splat(GOAL_SIZE)),

            hud: HudLayout::default(),
            assets: AssetPaths::default(),
            score_log: PathBuf::from(SCORE_LOG_PATH),
        }
    }
}

impl LevelConfig {
    /// Read and validate a config file
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to the reference level on any problem
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                log::info!("Loaded level config from {}", path.display());
                config
            }
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No level config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring level config: {}", e);
                Self::default()
            }
        }
    }

    /// Write as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject layouts the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, v: Vec2| {
            if v.is_finite() && v.x > 0.0 && v.y > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {v}")))
            }
        };
        positive("world_size", self.world_size)?;
        positive("view_size", self.view_size)?;
        positive("player_size", self.player_size)?;
        positive("sheep_size", self.sheep_size)?;
        positive("goal size", self.goal.size)?;
        for wall in &self.walls {
            positive("wall size", wall.size)?;
        }

        let non_negative = |name: &str, v: f32| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be finite and not negative, got {v}"
                )))
            }
        };
        non_negative("player_speed", self.player_speed)?;
        non_negative("flee.radius", self.flee.radius)?;
        non_negative("flee.speed", self.flee.speed)?;
        non_negative("flee.idle_drag", self.flee.idle_drag)?;
        non_negative("spawn_jitter", self.spawn_jitter)?;
        non_negative("hud.margin", self.hud.margin)?;

        let spawns = std::iter::once(self.player_spawn)
            .chain(self.sheep_spawns.iter().copied())
            .chain(self.walls.iter().map(|wall| wall.min))
            .chain(std::iter::once(self.goal.min));
        for position in spawns {
            if !position.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "positions must be finite, got {position}"
                )));
            }
        }
        Ok(())
    }
}
