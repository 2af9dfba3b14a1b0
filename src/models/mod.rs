//! Data structures for the score keeper: players, configuration, the live match and history.

mod config;
mod engine;
mod history;
mod player;
mod round;
pub(crate) mod settings;

pub use config::{GameType, MatchConfig, WinningLimit, NORMAL_GAME_SIZES, TOURNAMENT_GAME_SIZES};
pub use engine::{GameStatus, MatchEngine, MatchError, Resolution};
pub use history::{GameSummary, StoredGame, StoredPlayer, StoredRound, StoredRoundScores};
pub use player::{
    Player, PlayerId, PlayerStats, ScoreEntry, ScoreId, MAX_NAME_LEN, MAX_SCORE_ENTRY,
};
pub use round::{
    GameHandle, GameRegistration, LossDelta, NewGame, PlayerRoundScores, RegisteredPlayer,
    RoundHandle, RoundOutcome, RoundSettlement, StoredPlayerId,
};
pub use settings::{
    validate_long_press_increment, Settings, DEFAULT_LONG_PRESS_SCORE, DEFAULT_MULTI_LOSE,
    DEFAULT_TRIO_MODE, LONG_PRESS_KEY, MAX_LONG_PRESS_SCORE, MULTI_LOSE_KEY, TRIO_MODE_KEY,
};
