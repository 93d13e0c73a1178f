//! High score leaderboard
//!
//! Every stored record is kept; the board is always sorted by score,
//! highest first. Ties keep insertion order.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name the player typed in
    pub name: String,
    pub score: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the rank a score would achieve (1-indexed)
    pub fn potential_rank(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1
    }

    /// Add a new score to the leaderboard, returning the rank achieved
    pub fn add_score(&mut self, name: &str, score: u64) -> Result<usize> {
        let name = validate_name(name)?;
        let rank = self.potential_rank(score);
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                name: name.to_string(),
                score,
            },
        );
        Ok(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Trimmed player name, rejecting blank input
pub fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        Err(Error::InvalidName)
    } else {
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score("ann", 120).unwrap(), 1);
        assert_eq!(board.add_score("bob", 300).unwrap(), 1);
        assert_eq!(board.add_score("cat", 120).unwrap(), 3);
        assert_eq!(board.add_score("dan", 5).unwrap(), 4);

        let names: Vec<_> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["bob", "ann", "cat", "dan"]);
        assert_eq!(board.top_score(), Some(300));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut board = HighScores::new();
        assert!(matches!(board.add_score("   ", 10), Err(Error::InvalidName)));
        assert!(board.is_empty());
        board.add_score("  eve ", 10).unwrap();
        assert_eq!(board.entries[0].name, "eve");
    }
}
