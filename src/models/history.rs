//! Stored games, players and rounds as returned by the history store.

use crate::models::config::{GameType, WinningLimit};
use crate::models::round::{GameHandle, RoundHandle, StoredPlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoredPlayer {
    pub id: StoredPlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
}

/// One player's entries in a stored round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoredRoundScores {
    pub player_id: StoredPlayerId,
    pub scores: Vec<u32>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoredRound {
    pub id: RoundHandle,
    pub winner_id: Option<StoredPlayerId>,
    pub scores: Vec<StoredRoundScores>,
}

impl StoredRound {
    /// Entries of `player_id` in this round, if they played it.
    pub fn scores_for(&self, player_id: StoredPlayerId) -> Option<&[u32]> {
        self.scores
            .iter()
            .find(|s| s.player_id == player_id)
            .map(|s| s.scores.as_slice())
    }

    pub fn total_for(&self, player_id: StoredPlayerId) -> u32 {
        self.scores_for(player_id)
            .map(|s| s.iter().fold(0u32, |acc, v| acc.saturating_add(*v)))
            .unwrap_or(0)
    }
}

/// A game with its roster and rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoredGame {
    pub id: GameHandle,
    pub game_size: usize,
    pub winning_limit: WinningLimit,
    pub game_type: GameType,
    pub created_at: DateTime<Utc>,
    pub players: Vec<StoredPlayer>,
    pub rounds: Vec<StoredRound>,
}

impl StoredGame {
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            id: self.id,
            game_size: self.game_size,
            winning_limit: self.winning_limit,
            game_type: self.game_type,
            created_at: self.created_at,
            round_count: self.rounds.len(),
        }
    }

    pub fn player(&self, id: StoredPlayerId) -> Option<&StoredPlayer> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// History list entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameHandle,
    pub game_size: usize,
    pub winning_limit: WinningLimit,
    pub game_type: GameType,
    pub created_at: DateTime<Utc>,
    pub round_count: usize,
}
