//! Player, ScoreEntry and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player within a match.
pub type PlayerId = Uuid;

/// Unique identifier for a score entry within one player's score list.
pub type ScoreId = Uuid;

/// Longest accepted player name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 10;

/// Largest value accepted for a single score entry.
pub const MAX_SCORE_ENTRY: u32 = 9_999;

/// One recorded point entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: ScoreId,
    pub value: u32,
}

impl ScoreEntry {
    pub fn new(value: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
        }
    }
}

/// Statistics view of a player (for API / display).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub total: u32,
    pub entries: usize,
    pub is_playing: bool,
}

impl PlayerStats {
    pub fn from_player(p: &Player) -> Self {
        Self {
            wins: p.wins,
            losses: p.losses,
            total: p.total(),
            entries: p.score.len(),
            is_playing: p.is_playing,
        }
    }
}

/// A player in the current match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    /// Participates in the current round. Always true outside tournament mode.
    pub is_playing: bool,
    /// Entries for the current round, in insertion order.
    pub score: Vec<ScoreEntry>,
}

impl Player {
    /// Create a new player with the given name. Counters start at zero, score empty.
    pub fn new(name: impl Into<String>, is_playing: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wins: 0,
            losses: 0,
            is_playing,
            score: Vec::new(),
        }
    }

    /// Sum of the current score entries.
    pub fn total(&self) -> u32 {
        self.score
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.value))
    }

    /// True when the player has not recorded a single entry this round.
    pub fn is_skunked(&self) -> bool {
        self.score.is_empty()
    }

    /// Current stats as a separate struct (for API responses).
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_player(self)
    }

    /// Append a new entry and return its id.
    pub fn push_score(&mut self, value: u32) -> ScoreId {
        let entry = ScoreEntry::new(value);
        self.score.push(entry);
        entry.id
    }

    /// Remove the entry with the given id. Returns false when no such entry exists.
    pub fn remove_score(&mut self, score_id: ScoreId) -> bool {
        let before = self.score.len();
        self.score.retain(|s| s.id != score_id);
        self.score.len() != before
    }

    /// Score values in entry order (for persistence).
    pub fn score_values(&self) -> Vec<u32> {
        self.score.iter().map(|s| s.value).collect()
    }

    pub fn clear_score(&mut self) {
        self.score.clear();
    }

    /// Record a win for this player.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Record `amount` losses for this player.
    pub fn add_losses(&mut self, amount: u32) {
        self.losses += amount;
    }
}
