//! Rabbit Herd - a single-level sheep herding game
//!
//! Core modules:
//! - `sim`: Level simulation (entities, collisions, camera, win condition)
//! - `platform`: Traits for the rendering/input/timing backend plus headless impls
//! - `highscores`: Append-only score log and sorted scoreboard
//! - `settings`: Data-driven level layout and tuning

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::{ScoreError, ScoreStore, Scoreboard};
pub use settings::{ConfigError, LevelConfig};
pub use sim::{Level, LevelPhase};

/// Game configuration constants (reference layout)
pub mod consts {
    /// Headless runner timestep (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Level dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 500.0;

    /// Visible window into the level
    pub const VIEW_WIDTH: f32 = 640.0;
    pub const VIEW_HEIGHT: f32 = 400.0;

    /// Rabbit defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 200.0;

    /// Sheep defaults
    pub const SHEEP_SIZE: f32 = 32.0;
    pub const SHEEP_COUNT: usize = 3;
    /// Distance (center to center) at which sheep start to flee
    pub const FLEE_RADIUS: f32 = 120.0;
    pub const FLEE_SPEED: f32 = 140.0;
    /// Exponential velocity decay rate when the rabbit is out of range (1/s)
    pub const IDLE_DRAG: f32 = 3.0;

    /// Goal pen
    pub const GOAL_SIZE: f32 = 50.0;

    /// Wall blocks
    pub const WALL_WIDTH: f32 = 50.0;
    pub const WALL_HEIGHT: f32 = 300.0;

    /// Distance of the timer readout from the view's bottom-left corner
    pub const HUD_MARGIN: f32 = 30.0;

    /// Default location of the persisted score log
    pub const SCORE_LOG_PATH: &str = "data/highscores.csv";
}
