//! Rabbit Herd headless runner
//!
//! Plays the level with the demo autopilot at a fixed 60 Hz, without a window,
//! and logs the result. A windowed front-end plugs its own `Canvas`,
//! `KeyState` and `AssetLoader` into the same `Level`.

use std::path::Path;

use rabbit_herd::consts::FRAME_DT;
use rabbit_herd::platform::{FrameClock, LevelAssets, PathAssetLoader, RecordingCanvas};
use rabbit_herd::sim::autopilot;
use rabbit_herd::{Level, LevelConfig, ScoreStore};

const CONFIG_PATH: &str = "data/level.json";
/// Give up after two simulated minutes
const MAX_FRAMES: u32 = 120 * 60;

fn main() {
    env_logger::init();
    log::info!("Rabbit Herd (headless) starting...");

    let config = LevelConfig::load(Path::new(CONFIG_PATH));
    let mut loader = PathAssetLoader::new(".");
    let assets = LevelAssets::load(&mut loader, &config.assets);
    let scores = ScoreStore::new(config.score_log.clone());

    let mut level = Level::new(&config, assets, Box::new(FrameClock::new()), scores);
    let mut canvas = RecordingCanvas::new();

    let mut frame = 0;
    while frame < MAX_FRAMES && !level.is_complete() {
        let keys = autopilot::steer(&level);
        level.update(&keys, FRAME_DT);
        level.render(&mut canvas);
        frame += 1;
    }

    match level.final_time() {
        Some(time) => {
            log::info!("Flock penned in {:.2}s after {} frames", time, frame);
            if let Some(board) = level.scoreboard() {
                if let Some(rank) = board.rank_of(time) {
                    log::info!("Rank {} of {}", rank, board.times.len());
                }
                print!("{}", board);
            }
        }
        None => log::info!(
            "Gave up after {} frames with {} sheep still loose",
            frame,
            level.active_sheep()
        ),
    }
    log::debug!(
        "Last frame: {} draw calls over {} frames",
        canvas.commands.len(),
        canvas.frames
    );
}
