//! MatchEngine and GameStatus.

use crate::models::config::MatchConfig;
use crate::models::player::{Player, PlayerId};
use crate::models::round::GameRegistration;
use crate::models::settings::Settings;
use serde::{Deserialize, Serialize};

/// Validation errors raised by match operations. Nothing is applied when one is returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// Player name is empty after trimming (slot index is zero-based).
    EmptyName { slot: usize },
    /// Player name is longer than the allowed maximum.
    NameTooLong { slot: usize, name: String },
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName(String),
    /// Number of submitted names does not match the configured game size.
    WrongNumberOfPlayers { expected: usize, got: usize },
    /// Game size outside the band of the current mode.
    InvalidGameSize { size: usize, tournament: bool },
    /// Winning limit is not one of 100, 150 or 200.
    InvalidWinningLimit(u32),
    /// Score input is not an integer in 1..=MAX_SCORE_ENTRY.
    InvalidScore(String),
    /// Long-press increment is not an integer in 1..=999.
    InvalidLongPressIncrement(String),
    UnknownSetting(String),
    InvalidSettingValue { key: String, value: String },
    /// Active player count outside the band required to start a round.
    ActivePlayersOutOfRange { active: usize, min: usize, max: usize },
    PlayerNotFound(PlayerId),
    /// Match is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::EmptyName { slot } => write!(f, "Player {} needs a name", slot + 1),
            MatchError::NameTooLong { slot, name } => write!(
                f,
                "Name of player {} is too long ({:?}, max {} characters)",
                slot + 1,
                name,
                crate::models::player::MAX_NAME_LEN
            ),
            MatchError::DuplicatePlayerName(name) => {
                write!(f, "A player named {:?} already exists", name)
            }
            MatchError::WrongNumberOfPlayers { expected, got } => {
                write!(f, "Expected {} player names, got {}", expected, got)
            }
            MatchError::InvalidGameSize { size, tournament } => {
                let band = if *tournament { "3 to 10" } else { "2 to 4" };
                write!(f, "Game size {} is not allowed (choose {})", size, band)
            }
            MatchError::InvalidWinningLimit(points) => {
                write!(f, "Winning limit {} is not allowed (choose 100, 150 or 200)", points)
            }
            MatchError::InvalidScore(input) => {
                write!(
                    f,
                    "Score must be a whole number from 1 to {} (got {:?})",
                    crate::models::player::MAX_SCORE_ENTRY,
                    input
                )
            }
            MatchError::InvalidLongPressIncrement(input) => {
                write!(f, "Long press score must be between 1 and 999 (got {:?})", input)
            }
            MatchError::UnknownSetting(key) => write!(f, "Unknown setting {:?}", key),
            MatchError::InvalidSettingValue { key, value } => {
                write!(f, "Invalid value {:?} for setting {:?}", value, key)
            }
            MatchError::ActivePlayersOutOfRange { active, min, max } if min == max => {
                write!(f, "Exactly {} players must play this round ({} selected)", min, active)
            }
            MatchError::ActivePlayersOutOfRange { active, min, max } => write!(
                f,
                "Between {} and {} players must play this round ({} selected)",
                min, max, active
            ),
            MatchError::PlayerNotFound(_) => write!(f, "Player not found"),
            MatchError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Lifecycle of the live match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Configuring size, limit and names.
    #[default]
    NotStarted,
    /// Players configured, no score recorded this round.
    Ready,
    /// At least one score recorded, nobody reached the limit.
    InProgress,
    /// A player reached the limit; score input is closed.
    Finished,
}

/// Winner/loser of the live round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub winner_id: Option<PlayerId>,
    /// Only ever set under trio rules.
    pub loser_id: Option<PlayerId>,
}

/// The single live match owned by the application shell.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchEngine {
    pub config: MatchConfig,
    /// Full roster in configuration order.
    pub players: Vec<Player>,
    pub status: GameStatus,
    pub winner_id: Option<PlayerId>,
    pub loser_id: Option<PlayerId>,
    /// Storage handle of the current game, once it has been persisted.
    pub registration: Option<GameRegistration>,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Players taking part in the current round, in roster order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_playing)
    }

    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// Check the active player count against the band for the current rules
    /// (exactly 3 under trio rules, otherwise 2 to 4).
    pub fn check_active_band(&self) -> Result<(), MatchError> {
        let band = self.config.active_band();
        let active = self.active_count();
        if !band.contains(&active) {
            return Err(MatchError::ActivePlayersOutOfRange {
                active,
                min: *band.start(),
                max: *band.end(),
            });
        }
        Ok(())
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            winner_id: self.winner_id,
            loser_id: self.loser_id,
        }
    }

    /// Set the number of player slots (only before the match starts).
    pub fn set_game_size(&mut self, size: usize) -> Result<(), MatchError> {
        if self.status != GameStatus::NotStarted {
            return Err(MatchError::InvalidState);
        }
        self.config.set_game_size(size)
    }

    /// Set the winning limit (only before the match starts).
    pub fn set_winning_limit(&mut self, points: u32) -> Result<(), MatchError> {
        if self.status != GameStatus::NotStarted {
            return Err(MatchError::InvalidState);
        }
        self.config.set_winning_limit(points)
    }

    /// Toggle tournament mode (only before the match starts). Clamps the game size.
    pub fn toggle_tournament_mode(&mut self) -> Result<(), MatchError> {
        if self.status != GameStatus::NotStarted {
            return Err(MatchError::InvalidState);
        }
        self.config.toggle_tournament_mode();
        log::debug!(
            "Tournament mode {}, game size {}",
            self.config.tournament_mode,
            self.config.game_size
        );
        Ok(())
    }

    /// Copy the rule flags from the operator settings. A live round is re-evaluated
    /// under the new rules.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.config.trio_mode = settings.trio_mode;
        self.config.multi_lose_enabled = settings.multi_lose;
        self.refresh_result();
    }

    /// Bench or activate a player (tournament mode only).
    ///
    /// The active-player band is not checked here; it is enforced when a round
    /// is started, scored or settled. A live round is re-evaluated.
    pub fn set_player_playing(&mut self, player_id: PlayerId, is_playing: bool) -> Result<(), MatchError> {
        if !self.config.tournament_mode {
            return Err(MatchError::InvalidState);
        }
        let p = self
            .get_player_mut(player_id)
            .ok_or(MatchError::PlayerNotFound(player_id))?;
        p.is_playing = is_playing;
        self.refresh_result();
        Ok(())
    }

    /// Recompute winner/loser after a rule or roster change while a round is live.
    fn refresh_result(&mut self) {
        if matches!(self.status, GameStatus::InProgress | GameStatus::Finished) {
            crate::logic::evaluate_win_condition(self);
        }
    }

    /// Empty every player's score list and clear the round result.
    pub fn reset_round(&mut self) {
        for p in &mut self.players {
            p.clear_score();
        }
        self.winner_id = None;
        self.loser_id = None;
        self.status = GameStatus::Ready;
    }

    pub fn attach_registration(&mut self, registration: GameRegistration) {
        self.registration = Some(registration);
    }

    /// End the whole game: drop roster, result and storage handle. Configuration is kept.
    pub fn end_game(&mut self) {
        self.players.clear();
        self.winner_id = None;
        self.loser_id = None;
        self.registration = None;
        self.status = GameStatus::NotStarted;
        log::debug!("Game ended");
    }
}
