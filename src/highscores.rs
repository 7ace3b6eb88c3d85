//! Best-times leaderboard
//!
//! Persisted as a plain text log: one completion time per line, two decimal
//! places, appended after every finished round. Loading sorts ascending so the
//! fastest round comes first.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// First line of the rendered scoreboard
pub const SCOREBOARD_HEADER: &str = "Highscores: ";

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("could not open score log {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write score log {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read score log {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Format a time the way it is stored and shown
pub fn format_time(secs: f32) -> String {
    format!("{:.2}", secs)
}

/// Sorted completion times
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    /// Ascending; best first
    pub times: Vec<f32>,
    /// Lines that could not be parsed and were left out
    pub skipped: usize,
}

impl Scoreboard {
    /// Build from unsorted times
    pub fn from_times(mut times: Vec<f32>) -> Self {
        times.sort_by(f32::total_cmp);
        Self { times, skipped: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Fastest time (if any)
    pub fn best(&self) -> Option<f32> {
        self.times.first().copied()
    }

    /// 1-indexed rank of `time` on the board (first matching entry)
    pub fn rank_of(&self, time: f32) -> Option<usize> {
        let shown = format_time(time);
        self.times
            .iter()
            .position(|&t| format_time(t) == shown)
            .map(|i| i + 1)
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SCOREBOARD_HEADER)?;
        for t in &self.times {
            writeln!(f, "{:.2}", t)?;
        }
        Ok(())
    }
}

/// File-backed score log
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one completion time, creating the log (and its directory) if
    /// needed
    pub fn append(&self, secs: f32) -> Result<(), ScoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ScoreError::Open {
                path: self.path.clone(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| ScoreError::Open {
                path: self.path.clone(),
                source,
            })?;

        writeln!(file, "{}", format_time(secs)).map_err(|source| ScoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Read every recorded time, best first.
    ///
    /// A missing log is an empty board. Blank lines are ignored; lines that are
    /// not a finite number are skipped and counted rather than discarding the
    /// whole board.
    pub fn load_sorted(&self) -> Result<Scoreboard, ScoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Scoreboard::default()),
            Err(source) => {
                return Err(ScoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut times = Vec::new();
        let mut skipped = 0;
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<f32>() {
                Ok(t) if t.is_finite() => times.push(t),
                _ => {
                    log::warn!(
                        "Skipping malformed score on line {} of {}: {:?}",
                        lineno + 1,
                        self.path.display(),
                        line
                    );
                    skipped += 1;
                }
            }
        }

        let mut board = Scoreboard::from_times(times);
        board.skipped = skipped;
        log::info!("Loaded {} high scores", board.times.len());
        Ok(board)
    }
}
