//! Round outcome, settlement and game registration records.

use crate::models::config::{GameType, WinningLimit};
use crate::models::engine::MatchEngine;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Storage id of a game.
pub type GameHandle = i64;
/// Storage id of a player (assigned by the store).
pub type StoredPlayerId = i64;
/// Storage id of a round.
pub type RoundHandle = i64;

/// Losses charged to one player for a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LossDelta {
    pub player_id: PlayerId,
    pub amount: u32,
}

/// Who won a round and who pays for it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub winner_id: Option<PlayerId>,
    pub losers: Vec<LossDelta>,
}

impl RoundOutcome {
    /// Losses charged to `player_id` (zero when not a loser).
    pub fn losses_for(&self, player_id: PlayerId) -> u32 {
        self.losers
            .iter()
            .filter(|l| l.player_id == player_id)
            .map(|l| l.amount)
            .sum()
    }
}

/// One player's entries for a settled round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRoundScores {
    pub player_id: PlayerId,
    pub values: Vec<u32>,
}

/// A round that was applied in memory and still has to be written to storage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSettlement {
    pub outcome: RoundOutcome,
    /// Active players' entries, captured before the scores were reset.
    pub scores: Vec<PlayerRoundScores>,
    /// False for normal-game restarts, which are logged without win/loss counters.
    pub counts_results: bool,
}

/// A stored player mapped back to the in-memory player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RegisteredPlayer {
    pub player_id: PlayerId,
    pub stored_id: StoredPlayerId,
}

/// Storage handles of the current game and its roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRegistration {
    pub game_id: GameHandle,
    pub players: Vec<RegisteredPlayer>,
}

impl GameRegistration {
    pub fn stored_id(&self, player_id: PlayerId) -> Option<StoredPlayerId> {
        self.players
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| p.stored_id)
    }
}

/// A freshly configured game, ready to be created in storage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewGame {
    pub game_size: usize,
    pub winning_limit: WinningLimit,
    pub game_type: GameType,
    /// Roster in configuration order.
    pub players: Vec<(PlayerId, String)>,
}

impl NewGame {
    pub fn from_engine(engine: &MatchEngine) -> Self {
        Self {
            game_size: engine.config.game_size,
            winning_limit: engine.config.winning_limit,
            game_type: engine.config.game_type(),
            players: engine
                .players
                .iter()
                .map(|p| (p.id, p.name.clone()))
                .collect(),
        }
    }
}
