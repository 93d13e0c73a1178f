//! Durable high score storage
//!
//! Features:
//! - [`ScoreStore`] seam so the session never knows where scores live
//! - In-memory store ([`HighScores`]) for tests and throwaway runs
//! - JSON file store with write-to-temp-then-rename
//!
//! A failed write leaves the in-memory board as it was before the call.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::Result;
use crate::highscores::{HighScoreEntry, HighScores};

/// Where named scores are kept
pub trait ScoreStore {
    /// Append a record, returning its rank (1-indexed)
    fn add_high_score(&mut self, name: &str, score: u64) -> Result<usize>;
    /// All records, highest score first
    fn high_scores(&self) -> Result<Vec<HighScoreEntry>>;
}

impl ScoreStore for HighScores {
    fn add_high_score(&mut self, name: &str, score: u64) -> Result<usize> {
        self.add_score(name, score)
    }

    fn high_scores(&self) -> Result<Vec<HighScoreEntry>> {
        Ok(self.entries.clone())
    }
}

/// Leaderboard persisted as a JSON file
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    board: HighScores,
}

impl JsonScoreStore {
    /// Open a score file. A missing file starts an empty board.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let board = match fs::read_to_string(&path) {
            Ok(json) => {
                let board: HighScores = serde_json::from_str(&json)?;
                log::info!("Loaded {} high scores", board.len());
                board
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                HighScores::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, board })
    }

    fn write(&self, board: &HighScores) -> Result<()> {
        let json = serde_json::to_string_pretty(board)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn add_high_score(&mut self, name: &str, score: u64) -> Result<usize> {
        let mut board = self.board.clone();
        let rank = board.add_score(name, score)?;
        self.write(&board)?;
        self.board = board;
        log::info!("High scores saved ({} entries)", self.board.len());
        Ok(rank)
    }

    fn high_scores(&self) -> Result<Vec<HighScoreEntry>> {
        Ok(self.board.entries.clone())
    }
}
