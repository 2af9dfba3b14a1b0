//! Persistence collaborator: game history and settings stores.
//!
//! The match engine never waits on storage. Callers apply a change in memory
//! first and then hand the resulting record to the functions in [`persist`];
//! a failed write is reported and logged, never rolled back.

mod memory;
mod persist;

pub use memory::MemoryStore;
pub use persist::{persist_new_game, persist_round};

use crate::models::{
    GameHandle, GameSummary, GameType, PlayerId, RoundHandle, Settings, StoredGame, StoredPlayer,
    StoredPlayerId, WinningLimit, LONG_PRESS_KEY, MULTI_LOSE_KEY, TRIO_MODE_KEY,
};
use async_trait::async_trait;

/// Errors from the storage collaborator.
#[derive(Debug)]
pub enum PersistenceError {
    GameNotFound(GameHandle),
    PlayerNotFound(StoredPlayerId),
    RoundNotFound(RoundHandle),
    /// The in-memory player has no stored counterpart (game was never registered).
    UnregisteredPlayer(PlayerId),
    /// Snapshot file could not be read or written.
    Io(std::io::Error),
    /// Snapshot file is not valid JSON for the store.
    Serialization(serde_json::Error),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::GameNotFound(id) => write!(f, "Game {} not found", id),
            PersistenceError::PlayerNotFound(id) => write!(f, "Stored player {} not found", id),
            PersistenceError::RoundNotFound(id) => write!(f, "Round {} not found", id),
            PersistenceError::UnregisteredPlayer(id) => {
                write!(f, "Player {} was never saved to history", id)
            }
            PersistenceError::Io(e) => write!(f, "Storage I/O error: {}", e),
            PersistenceError::Serialization(e) => write!(f, "Storage data error: {}", e),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(e) => Some(e),
            PersistenceError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Serialization(e)
    }
}

/// Game history storage.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn create_game(
        &self,
        game_size: usize,
        winning_limit: WinningLimit,
        game_type: GameType,
    ) -> Result<GameHandle, PersistenceError>;

    /// Store the roster, returning one record per name in the same order.
    /// A name already present in the game (trimmed, case-insensitive) reuses that player.
    async fn create_players(
        &self,
        game: GameHandle,
        names: &[String],
    ) -> Result<Vec<StoredPlayer>, PersistenceError>;

    async fn record_round(
        &self,
        game: GameHandle,
        winner: Option<StoredPlayerId>,
    ) -> Result<RoundHandle, PersistenceError>;

    async fn record_round_scores(
        &self,
        round: RoundHandle,
        player: StoredPlayerId,
        scores: &[u32],
    ) -> Result<(), PersistenceError>;

    async fn increment_wins(&self, player: StoredPlayerId) -> Result<(), PersistenceError>;

    async fn increment_losses(
        &self,
        player: StoredPlayerId,
        amount: u32,
    ) -> Result<(), PersistenceError>;

    /// All games, newest first.
    async fn list_games(&self) -> Result<Vec<GameSummary>, PersistenceError>;

    async fn get_game(&self, id: GameHandle) -> Result<Option<StoredGame>, PersistenceError>;

    async fn delete_game(&self, id: GameHandle) -> Result<(), PersistenceError>;

    async fn delete_all_games(&self) -> Result<(), PersistenceError>;
}

/// Key/value settings storage with typed accessors.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Current settings; unreadable or missing values fall back to the defaults.
    async fn load_settings(&self) -> Settings {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        for key in [LONG_PRESS_KEY, TRIO_MODE_KEY, MULTI_LOSE_KEY] {
            match self.get_setting(key).await {
                Ok(Some(value)) => pairs.push((key, value)),
                Ok(None) => {}
                Err(e) => log::error!("Failed to read setting {}: {}", key, e),
            }
        }
        Settings::from_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
    }

    /// Write every known setting.
    async fn save_settings(&self, settings: &Settings) -> Result<(), PersistenceError> {
        for (key, value) in settings.to_pairs() {
            self.set_setting(key, &value).await?;
        }
        Ok(())
    }

    async fn long_press_increment(&self) -> u32 {
        self.load_settings().await.long_press_increment
    }

    async fn trio_mode_enabled(&self) -> bool {
        self.load_settings().await.trio_mode
    }

    async fn multi_lose_enabled(&self) -> bool {
        self.load_settings().await.multi_lose
    }
}
