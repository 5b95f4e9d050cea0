//! Durable high-score store
//!
//! The contract is deliberately small: an append-only list of session scores,
//! with the high score defined as the maximum over all rows (0 when empty).
//! Rows are serialized as a JSON array in a single file that survives process
//! restarts.
//!
//! The store is read once at session start and written at most once at
//! session end. A write failure must never take down the render loop, so
//! persistence errors are logged and swallowed; the in-memory rows stay
//! consistent either way.

use std::io;
use std::path::PathBuf;

pub struct ScoreStore {
    path: PathBuf,
    rows: Vec<u32>,
}

impl ScoreStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt file is logged and treated as empty rather than
    /// blocking the session.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let rows = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Vec<u32>>(&text) {
                Ok(rows) => rows,
                Err(e) => {
                    log::warn!("score store {} is corrupt ({e}), starting empty", path.display());
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                log::warn!("cannot read score store {} ({e}), starting empty", path.display());
                Vec::new()
            }
        };
        Self { path, rows }
    }

    /// Best score over all recorded sessions, 0 if none.
    pub fn highscore(&self) -> u32 {
        self.rows.iter().copied().max().unwrap_or(0)
    }

    /// Append one session's score and persist. Best effort: I/O failures are
    /// logged and swallowed.
    pub fn save_score(&mut self, score: u32) {
        self.rows.push(score);
        if let Err(e) = self.persist() {
            log::warn!("failed to persist score {score} to {}: {e}", self.path.display());
        } else {
            log::info!("saved score {score} (highscore now {})", self.highscore());
        }
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.rows)?;
        std::fs::write(&self.path, json)
    }
}
