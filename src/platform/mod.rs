//! Platform abstraction layer
//!
//! The level never talks to a window, GPU or keyboard directly. It consumes:
//! - `KeyState`: held-key queries
//! - `Clock`: monotonic elapsed time
//! - `Canvas`: rectangle/sprite/text submission under a camera view
//! - `AssetLoader`: texture and font handles
//!
//! Headless implementations live alongside the traits so the simulation can be
//! driven from tests and from the native runner.

pub mod assets;
pub mod canvas;
pub mod clock;
pub mod input;

pub use assets::{
    AssetError, AssetLoader, AssetPaths, FontId, LevelAssets, PathAssetLoader, TextureId,
};
pub use canvas::{Canvas, Color, DrawCommand, RecordingCanvas};
pub use clock::{Clock, FrameClock, SystemClock};
pub use input::{HeldKeys, Key, KeyState};
