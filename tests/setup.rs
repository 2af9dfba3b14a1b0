//! Integration tests for match configuration, player setup and round start.

use dominos_scorekeeper::{
    configure_players, player_slots, start_new_round, validate_player_names, GameStatus,
    MatchEngine, MatchError, PlayerId, WinningLimit,
};

fn ids(e: &MatchEngine) -> Vec<PlayerId> {
    e.players.iter().map(|p| p.id).collect()
}

#[test]
fn names_are_trimmed_and_checked() {
    assert_eq!(
        validate_player_names(&["  Ana ", "Bo"]).unwrap(),
        vec!["Ana".to_string(), "Bo".to_string()]
    );
    assert_eq!(
        validate_player_names(&["Ana", "   "]),
        Err(MatchError::EmptyName { slot: 1 })
    );
    assert!(validate_player_names(&["Abcdefghij", "B"]).is_ok());
    assert_eq!(
        validate_player_names(&["Abcdefghijk", "B"]),
        Err(MatchError::NameTooLong {
            slot: 0,
            name: "Abcdefghijk".to_string()
        })
    );
}

#[test]
fn duplicate_names_ignore_case() {
    assert_eq!(
        validate_player_names(&["ana", "ANA "]),
        Err(MatchError::DuplicatePlayerName("ANA".to_string()))
    );
}

#[test]
fn configure_requires_one_name_per_slot() {
    let mut e = MatchEngine::default();
    e.set_game_size(3).unwrap();
    assert_eq!(
        configure_players(&mut e, &["A", "B"]),
        Err(MatchError::WrongNumberOfPlayers { expected: 3, got: 2 })
    );
    assert_eq!(e.status, GameStatus::NotStarted);
    assert!(e.players.is_empty());
}

#[test]
fn normal_game_players_start_active() {
    let mut e = MatchEngine::default();
    configure_players(&mut e, &["A", "B"]).unwrap();
    assert_eq!(e.status, GameStatus::Ready);
    assert!(e.players.iter().all(|p| p.is_playing && p.score.is_empty()));
    assert!(e.players.iter().all(|p| p.wins == 0 && p.losses == 0));
}

#[test]
fn tournament_players_start_benched() {
    let mut e = MatchEngine::default();
    e.toggle_tournament_mode().unwrap();
    e.set_game_size(6).unwrap();
    configure_players(&mut e, &["A", "B", "C", "D", "E", "F"]).unwrap();
    assert_eq!(e.players.len(), 6);
    assert_eq!(e.active_count(), 0);
}

#[test]
fn configuration_is_locked_after_setup() {
    let mut e = MatchEngine::default();
    configure_players(&mut e, &["A", "B"]).unwrap();
    assert_eq!(configure_players(&mut e, &["C", "D"]), Err(MatchError::InvalidState));
    assert_eq!(e.set_game_size(3), Err(MatchError::InvalidState));
    assert_eq!(e.set_winning_limit(200), Err(MatchError::InvalidState));
    assert_eq!(e.toggle_tournament_mode(), Err(MatchError::InvalidState));
}

#[test]
fn toggling_tournament_mode_clamps_game_size() {
    let mut e = MatchEngine::default();
    assert_eq!(e.config.game_size, 2);
    e.toggle_tournament_mode().unwrap();
    assert!(e.config.tournament_mode);
    assert_eq!(e.config.game_size, 3);

    e.set_game_size(8).unwrap();
    e.toggle_tournament_mode().unwrap();
    assert!(!e.config.tournament_mode);
    assert_eq!(e.config.game_size, 4);
}

#[test]
fn game_size_and_limit_are_validated() {
    let mut e = MatchEngine::default();
    assert_eq!(
        e.set_game_size(5),
        Err(MatchError::InvalidGameSize {
            size: 5,
            tournament: false
        })
    );
    assert_eq!(e.set_winning_limit(120), Err(MatchError::InvalidWinningLimit(120)));
    e.set_winning_limit(200).unwrap();
    assert_eq!(e.config.winning_limit, WinningLimit::Points200);

    e.toggle_tournament_mode().unwrap();
    assert!(e.set_game_size(10).is_ok());
    assert!(e.set_game_size(11).is_err());
    assert!(e.set_game_size(2).is_err());
}

#[test]
fn winning_limit_serializes_as_points() {
    assert_eq!(serde_json::to_string(&WinningLimit::Points200).unwrap(), "200");
    let parsed: WinningLimit = serde_json::from_str("100").unwrap();
    assert_eq!(parsed, WinningLimit::Points100);
    assert!(serde_json::from_str::<WinningLimit>("175").is_err());
}

#[test]
fn slots_follow_game_size_and_keep_names() {
    let slots = player_slots(3, &["Ana", "Bo", "Cy", "Dee"]);
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[2].label, "Player 3");
    assert_eq!(slots[2].name, "Cy");

    let grown = player_slots(4, &["Ana"]);
    assert_eq!(grown[0].name, "Ana");
    assert_eq!(grown[3].name, "");
    assert_eq!(grown[3].index, 3);
}

#[test]
fn round_start_enforces_active_band() {
    let mut e = MatchEngine::default();
    e.toggle_tournament_mode().unwrap();
    e.set_game_size(5).unwrap();
    e.config.trio_mode = false;
    configure_players(&mut e, &["A", "B", "C", "D", "E"]).unwrap();
    let roster = ids(&e);

    e.set_player_playing(roster[0], true).unwrap();
    assert_eq!(
        start_new_round(&mut e),
        Err(MatchError::ActivePlayersOutOfRange { active: 1, min: 2, max: 4 })
    );
    for &id in &roster {
        e.set_player_playing(id, true).unwrap();
    }
    assert_eq!(
        start_new_round(&mut e),
        Err(MatchError::ActivePlayersOutOfRange { active: 5, min: 2, max: 4 })
    );
    e.set_player_playing(roster[4], false).unwrap();
    assert!(start_new_round(&mut e).is_ok());
    assert_eq!(e.status, GameStatus::Ready);
}

#[test]
fn trio_rounds_need_exactly_three() {
    let mut e = MatchEngine::default();
    e.toggle_tournament_mode().unwrap();
    e.set_game_size(4).unwrap();
    e.config.trio_mode = true;
    configure_players(&mut e, &["A", "B", "C", "D"]).unwrap();
    for id in ids(&e) {
        e.set_player_playing(id, true).unwrap();
    }
    assert_eq!(
        start_new_round(&mut e),
        Err(MatchError::ActivePlayersOutOfRange { active: 4, min: 3, max: 3 })
    );
    let last = ids(&e)[3];
    e.set_player_playing(last, false).unwrap();
    assert!(start_new_round(&mut e).is_ok());
}

#[test]
fn round_start_needs_a_configured_match() {
    let mut e = MatchEngine::default();
    assert_eq!(start_new_round(&mut e), Err(MatchError::InvalidState));
}

#[test]
fn benching_is_for_tournaments_only() {
    let mut e = MatchEngine::default();
    configure_players(&mut e, &["A", "B"]).unwrap();
    let a = ids(&e)[0];
    assert_eq!(e.set_player_playing(a, false), Err(MatchError::InvalidState));

    let mut t = MatchEngine::default();
    t.toggle_tournament_mode().unwrap();
    configure_players(&mut t, &["A", "B", "C"]).unwrap();
    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        t.set_player_playing(missing, true),
        Err(MatchError::PlayerNotFound(missing))
    );
}

#[test]
fn end_game_keeps_configuration() {
    let mut e = MatchEngine::default();
    e.set_game_size(3).unwrap();
    e.set_winning_limit(100).unwrap();
    configure_players(&mut e, &["A", "B", "C"]).unwrap();
    e.end_game();

    assert_eq!(e.status, GameStatus::NotStarted);
    assert!(e.players.is_empty());
    assert_eq!(e.config.game_size, 3);
    assert_eq!(e.config.winning_limit, WinningLimit::Points100);
    assert!(configure_players(&mut e, &["D", "E", "F"]).is_ok());
}
