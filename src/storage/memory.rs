//! In-memory store, optionally mirrored to a JSON snapshot file after every write.

use super::{GameStore, PersistenceError, SettingsStore};
use crate::models::{
    GameHandle, GameSummary, GameType, RoundHandle, Settings, StoredGame, StoredPlayer,
    StoredPlayerId, StoredRound, StoredRoundScores, WinningLimit,
};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Data {
    /// Last id handed out; games, players and rounds share one sequence.
    last_id: i64,
    games: Vec<StoredGame>,
    settings: BTreeMap<String, String>,
}

impl Data {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Insert default settings for keys that have never been written.
    fn seed_default_settings(&mut self) {
        for (key, value) in Settings::default().to_pairs() {
            if !self.settings.contains_key(key) {
                log::info!("Inserted default setting for {}", key);
                self.settings.insert(key.to_string(), value);
            }
        }
    }

    fn game_mut(&mut self, id: GameHandle) -> Result<&mut StoredGame, PersistenceError> {
        self.games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(PersistenceError::GameNotFound(id))
    }

    fn player_mut(&mut self, id: StoredPlayerId) -> Result<&mut StoredPlayer, PersistenceError> {
        self.games
            .iter_mut()
            .flat_map(|g| g.players.iter_mut())
            .find(|p| p.id == id)
            .ok_or(PersistenceError::PlayerNotFound(id))
    }

    fn round_mut(&mut self, id: RoundHandle) -> Result<&mut StoredRound, PersistenceError> {
        self.games
            .iter_mut()
            .flat_map(|g| g.rounds.iter_mut())
            .find(|r| r.id == id)
            .ok_or(PersistenceError::RoundNotFound(id))
    }
}

/// Game history and settings held in memory.
///
/// With a snapshot path the whole store is rewritten to that file after each
/// successful mutation and reloaded by [`MemoryStore::open`].
pub struct MemoryStore {
    data: Mutex<Data>,
    snapshot: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store with default settings and no snapshot file.
    pub fn new() -> Self {
        let mut data = Data::default();
        data.seed_default_settings();
        Self {
            data: Mutex::new(data),
            snapshot: None,
        }
    }

    /// Open a store backed by `path`, loading it when the file exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let mut data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Data>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting empty", path.display());
                Data::default()
            }
            Err(e) => return Err(e.into()),
        };
        data.seed_default_settings();
        log::info!(
            "Loaded {} game(s) from {}",
            data.games.len(),
            path.display()
        );
        Ok(Self {
            data: Mutex::new(data),
            snapshot: Some(path),
        })
    }

    async fn commit(&self, data: &Data) -> Result<(), PersistenceError> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(data)?;
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn create_game(
        &self,
        game_size: usize,
        winning_limit: WinningLimit,
        game_type: GameType,
    ) -> Result<GameHandle, PersistenceError> {
        let mut data = self.data.lock().await;
        let id = data.next_id();
        data.games.push(StoredGame {
            id,
            game_size,
            winning_limit,
            game_type,
            created_at: Utc::now(),
            players: Vec::new(),
            rounds: Vec::new(),
        });
        self.commit(&data).await?;
        Ok(id)
    }

    async fn create_players(
        &self,
        game: GameHandle,
        names: &[String],
    ) -> Result<Vec<StoredPlayer>, PersistenceError> {
        let mut data = self.data.lock().await;
        data.game_mut(game)?;
        let mut stored = Vec::with_capacity(names.len());
        for name in names {
            let key = name.trim().to_lowercase();
            let existing = data
                .game_mut(game)?
                .players
                .iter()
                .find(|p| p.name.trim().to_lowercase() == key)
                .cloned();
            let player = match existing {
                Some(p) => p,
                None => {
                    let player = StoredPlayer {
                        id: data.next_id(),
                        name: name.clone(),
                        wins: 0,
                        losses: 0,
                    };
                    data.game_mut(game)?.players.push(player.clone());
                    player
                }
            };
            stored.push(player);
        }
        self.commit(&data).await?;
        Ok(stored)
    }

    async fn record_round(
        &self,
        game: GameHandle,
        winner: Option<StoredPlayerId>,
    ) -> Result<RoundHandle, PersistenceError> {
        let mut data = self.data.lock().await;
        data.game_mut(game)?;
        let id = data.next_id();
        data.game_mut(game)?.rounds.push(StoredRound {
            id,
            winner_id: winner,
            scores: Vec::new(),
        });
        self.commit(&data).await?;
        Ok(id)
    }

    async fn record_round_scores(
        &self,
        round: RoundHandle,
        player: StoredPlayerId,
        scores: &[u32],
    ) -> Result<(), PersistenceError> {
        let mut data = self.data.lock().await;
        let round = data.round_mut(round)?;
        match round.scores.iter_mut().find(|s| s.player_id == player) {
            Some(line) => line.scores = scores.to_vec(),
            None => round.scores.push(StoredRoundScores {
                player_id: player,
                scores: scores.to_vec(),
            }),
        }
        self.commit(&data).await
    }

    async fn increment_wins(&self, player: StoredPlayerId) -> Result<(), PersistenceError> {
        let mut data = self.data.lock().await;
        data.player_mut(player)?.wins += 1;
        self.commit(&data).await
    }

    async fn increment_losses(
        &self,
        player: StoredPlayerId,
        amount: u32,
    ) -> Result<(), PersistenceError> {
        let mut data = self.data.lock().await;
        data.player_mut(player)?.losses += amount;
        self.commit(&data).await
    }

    async fn list_games(&self) -> Result<Vec<GameSummary>, PersistenceError> {
        let data = self.data.lock().await;
        let mut games: Vec<GameSummary> = data.games.iter().map(|g| g.summary()).collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(games)
    }

    async fn get_game(&self, id: GameHandle) -> Result<Option<StoredGame>, PersistenceError> {
        let data = self.data.lock().await;
        Ok(data.games.iter().find(|g| g.id == id).cloned())
    }

    async fn delete_game(&self, id: GameHandle) -> Result<(), PersistenceError> {
        let mut data = self.data.lock().await;
        data.games.retain(|g| g.id != id);
        self.commit(&data).await
    }

    async fn delete_all_games(&self) -> Result<(), PersistenceError> {
        let mut data = self.data.lock().await;
        data.games.clear();
        self.commit(&data).await
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let data = self.data.lock().await;
        Ok(data.settings.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut data = self.data.lock().await;
        data.settings.insert(key.to_string(), value.to_string());
        self.commit(&data).await
    }
}
