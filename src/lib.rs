//! Dominos score keeper: library with the match engine, round settlement, standings and history storage.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    add_long_press_score, add_score, competition_rank, configure_players, end_round,
    evaluate_win_condition, export_game_csv, game_standings, match_title, parse_score_input,
    player_slots, rank_by_score, rank_by_wins, remove_score, resolve_standard_round,
    resolve_trio_round, restart_round, start_new_round, tournament_leaders,
    validate_player_names, PlayerSlot, Ranked, Standing,
};
pub use models::{
    GameHandle, GameRegistration, GameStatus, GameSummary, GameType, LossDelta, MatchConfig,
    MatchEngine, MatchError, NewGame, Player, PlayerId, PlayerRoundScores, PlayerStats,
    Resolution, RoundOutcome, RoundSettlement, ScoreEntry, ScoreId, Settings, StoredGame,
    StoredPlayer, StoredPlayerId, StoredRound, WinningLimit,
};
pub use storage::{
    persist_new_game, persist_round, GameStore, MemoryStore, PersistenceError, SettingsStore,
};
