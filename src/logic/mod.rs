//! Match logic: setup, scoring, round settlement, ranking and history views.

mod history;
mod ranking;
mod resolver;
mod round;
mod scoring;
mod setup;

pub use history::{export_game_csv, game_standings, Standing};
pub use ranking::{
    competition_rank, match_title, rank_by_score, rank_by_wins, tournament_leaders, Ranked,
};
pub use resolver::{resolve_standard_round, resolve_trio_round};
pub use round::{end_round, restart_round};
pub use scoring::{
    add_long_press_score, add_score, evaluate_win_condition, parse_score_input, remove_score,
};
pub use setup::{
    configure_players, player_slots, start_new_round, validate_player_names, PlayerSlot,
};
