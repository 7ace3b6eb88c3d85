use std::fs;

use rabbit_herd::platform::{
    Clock, FontId, FrameClock, HeldKeys, LevelAssets, RecordingCanvas, TextureId,
};
use rabbit_herd::sim::{HerdState, WIN_MESSAGE, autopilot, intersects};
use rabbit_herd::{Level, LevelConfig, LevelPhase, ScoreStore};

fn assets() -> LevelAssets {
    LevelAssets {
        rabbit: Some(TextureId(0)),
        sheep: Some(TextureId(1)),
        font: Some(FontId(0)),
    }
}

/// Clock pinned to a fixed reading, for checking exactly what gets logged
struct PinnedClock(f32);

impl Clock for PinnedClock {
    fn restart(&mut self) {}

    fn elapsed_secs(&self) -> f32 {
        self.0
    }
}

#[test]
fn sheep_on_goal_completes_on_first_frame() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("data").join("highscores.csv");

    let mut config = LevelConfig::default();
    config.sheep_spawns = vec![config.goal.min];
    config.score_log = log_path.clone();

    let mut level = Level::new(
        &config,
        assets(),
        Box::new(PinnedClock(12.345_6)),
        ScoreStore::new(&log_path),
    );
    assert_eq!(level.phase(), LevelPhase::Running);

    level.update(&HeldKeys::new(), 1.0 / 60.0);

    assert_eq!(level.phase(), LevelPhase::Complete);
    assert_eq!(level.sheep()[0].state(), HerdState::Scored);
    assert_eq!(fs::read_to_string(&log_path).unwrap(), "12.35\n");
    assert_eq!(level.hud().scoreboard.text, "Highscores: \n12.35\n");

    // Further frames must not log again
    level.update(&HeldKeys::new(), 1.0 / 60.0);
    assert_eq!(fs::read_to_string(&log_path).unwrap(), "12.35\n");
}

#[test]
fn scoreboard_lists_previous_rounds_best_first() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("highscores.csv");
    fs::write(&log_path, "30.00\n8.75\nnot-a-time\n").unwrap();

    let mut config = LevelConfig::default();
    config.sheep_spawns = vec![config.goal.min];

    let mut level = Level::new(
        &config,
        assets(),
        Box::new(FrameClock::new()),
        ScoreStore::new(&log_path),
    );
    level.update(&HeldKeys::new(), 10.0);

    let board = level.scoreboard().unwrap();
    assert_eq!(board.times, vec![8.75, 10.0, 30.0]);
    assert_eq!(board.skipped, 1);
    assert_eq!(board.rank_of(10.0), Some(2));
    assert_eq!(
        level.hud().scoreboard.text,
        "Highscores: \n8.75\n10.00\n30.00\n"
    );
}

#[test]
fn unwritable_score_log_does_not_stop_the_round() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = LevelConfig::default();
    config.sheep_spawns = vec![config.goal.min];

    // The log path is a directory, so both append and load fail
    let mut level = Level::new(
        &config,
        assets(),
        Box::new(FrameClock::new()),
        ScoreStore::new(dir.path()),
    );
    level.update(&HeldKeys::new(), 1.0);

    assert!(level.is_complete());
    assert_eq!(level.final_time(), Some(1.0));
    assert_eq!(level.hud().scoreboard.text, "Highscores: \n");
}

#[test]
fn rendering_shows_win_text_after_completion() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = LevelConfig::default();
    config.sheep_spawns = vec![config.goal.min];
    let mut level = Level::new(
        &config,
        assets(),
        Box::new(FrameClock::new()),
        ScoreStore::new(dir.path().join("scores.csv")),
    );
    let mut canvas = RecordingCanvas::new();

    level.render(&mut canvas);
    assert_eq!(canvas.texts()[2], "");

    level.update(&HeldKeys::new(), 0.5);
    level.render(&mut canvas);
    let texts = canvas.texts();
    assert_eq!(texts[1], WIN_MESSAGE);
    assert!(texts[2].starts_with("Highscores: "));
    assert_eq!(canvas.view.unwrap(), *level.view());
}

#[test]
fn autopilot_round_keeps_everything_in_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let config = LevelConfig::default();
    let mut level = Level::new(
        &config,
        assets(),
        Box::new(FrameClock::new()),
        ScoreStore::new(dir.path().join("scores.csv")),
    );
    let world = *level.bounds();

    for _ in 0..600 {
        let keys = autopilot::steer(&level);
        level.update(&keys, 1.0 / 60.0);

        assert!(world.contains(&level.player().body.rect()));
        for wall in level.walls() {
            assert!(!intersects(level.player(), wall));
        }
        for sheep in level.sheep().iter().filter(|s| s.is_active()) {
            assert!(world.contains(&sheep.body.rect()));
        }
        let view = level.view().rect();
        assert!(world.contains(&view));
        if level.is_complete() {
            break;
        }
    }
}
