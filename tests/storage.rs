//! Integration tests for the history store, settings and persistence of match records.

use dominos_scorekeeper::{
    add_score, configure_players, end_round, export_game_csv, game_standings, persist_new_game,
    persist_round, restart_round, start_new_round, GameStore, GameType, MatchEngine, MemoryStore,
    NewGame, PersistenceError, Settings, SettingsStore, WinningLimit,
};

fn normal_engine() -> MatchEngine {
    let mut e = MatchEngine::default();
    configure_players(&mut e, &["Ana", "Bo"]).unwrap();
    e
}

fn tournament_engine() -> MatchEngine {
    let mut e = MatchEngine::default();
    e.toggle_tournament_mode().unwrap();
    e.set_winning_limit(100).unwrap();
    e.config.trio_mode = true;
    e.config.multi_lose_enabled = true;
    configure_players(&mut e, &["Ana", "Bo", "Cy"]).unwrap();
    let ids: Vec<_> = e.players.iter().map(|p| p.id).collect();
    for id in ids {
        e.set_player_playing(id, true).unwrap();
    }
    start_new_round(&mut e).unwrap();
    e
}

#[tokio::test]
async fn new_game_maps_every_player() {
    let store = MemoryStore::new();
    let e = normal_engine();
    let registration = persist_new_game(&store, &NewGame::from_engine(&e)).await.unwrap();

    assert_eq!(registration.players.len(), 2);
    for p in &e.players {
        assert!(registration.stored_id(p.id).is_some());
    }
    let game = store.get_game(registration.game_id).await.unwrap().unwrap();
    assert_eq!(game.game_type, GameType::Normal);
    assert_eq!(game.winning_limit, WinningLimit::Points150);
    let names: Vec<&str> = game.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bo"]);
}

#[tokio::test]
async fn restart_round_is_logged_without_counters() {
    let store = MemoryStore::new();
    let mut e = normal_engine();
    let registration = persist_new_game(&store, &NewGame::from_engine(&e)).await.unwrap();
    let ana = e.players[0].id;
    add_score(&mut e, ana, 90).unwrap();
    add_score(&mut e, ana, 70).unwrap();
    let settlement = restart_round(&mut e).unwrap().unwrap();

    persist_round(&store, &registration, &settlement).await.unwrap();

    let game = store.get_game(registration.game_id).await.unwrap().unwrap();
    assert_eq!(game.rounds.len(), 1);
    let round = &game.rounds[0];
    let ana_stored = registration.stored_id(ana).unwrap();
    assert_eq!(round.winner_id, Some(ana_stored));
    assert_eq!(round.scores_for(ana_stored), Some(&[90, 70][..]));
    assert!(game.players.iter().all(|p| p.wins == 0 && p.losses == 0));
}

#[tokio::test]
async fn tournament_round_updates_stored_counters() {
    let store = MemoryStore::new();
    let mut e = tournament_engine();
    let registration = persist_new_game(&store, &NewGame::from_engine(&e)).await.unwrap();
    let ids: Vec<_> = e.players.iter().map(|p| p.id).collect();
    add_score(&mut e, ids[1], 20).unwrap();
    add_score(&mut e, ids[0], 110).unwrap();
    let settlement = end_round(&mut e).unwrap().unwrap();

    persist_round(&store, &registration, &settlement).await.unwrap();

    let game = store.get_game(registration.game_id).await.unwrap().unwrap();
    assert_eq!(game.game_type, GameType::Tournament);
    let record = |i: usize| {
        let sid = registration.stored_id(ids[i]).unwrap();
        let p = game.player(sid).unwrap();
        (p.wins, p.losses)
    };
    assert_eq!(record(0), (1, 0));
    assert_eq!(record(1), (0, 0));
    assert_eq!(record(2), (0, 2));

    for p in &e.players {
        let stored = game.player(registration.stored_id(p.id).unwrap()).unwrap();
        assert_eq!((p.wins, p.losses), (stored.wins, stored.losses));
    }
}

#[tokio::test]
async fn persistence_works_through_a_trait_object() {
    let store = MemoryStore::new();
    let dyn_store: &dyn GameStore = &store;
    let e = normal_engine();
    let registration = persist_new_game(dyn_store, &NewGame::from_engine(&e)).await.unwrap();
    assert_eq!(dyn_store.list_games().await.unwrap()[0].id, registration.game_id);
}

#[tokio::test]
async fn unregistered_players_are_reported() {
    let store = MemoryStore::new();
    let mut e = normal_engine();
    let mut registration = persist_new_game(&store, &NewGame::from_engine(&e)).await.unwrap();
    registration.players.truncate(1);

    let bo = e.players[1].id;
    add_score(&mut e, bo, 150).unwrap();
    let settlement = restart_round(&mut e).unwrap().unwrap();

    match persist_round(&store, &registration, &settlement).await {
        Err(PersistenceError::UnregisteredPlayer(id)) => assert_eq!(id, bo),
        other => panic!("expected UnregisteredPlayer, got {:?}", other),
    }
}

#[tokio::test]
async fn games_are_listed_newest_first_and_deletable() {
    let store = MemoryStore::new();
    let first = store
        .create_game(2, WinningLimit::Points100, GameType::Normal)
        .await
        .unwrap();
    let second = store
        .create_game(3, WinningLimit::Points150, GameType::Tournament)
        .await
        .unwrap();
    let third = store
        .create_game(4, WinningLimit::Points200, GameType::Normal)
        .await
        .unwrap();

    let listed: Vec<i64> = store.list_games().await.unwrap().iter().map(|g| g.id).collect();
    assert_eq!(listed, vec![third, second, first]);

    store.delete_game(second).await.unwrap();
    assert!(store.get_game(second).await.unwrap().is_none());
    assert_eq!(store.list_games().await.unwrap().len(), 2);

    store.delete_all_games().await.unwrap();
    assert!(store.list_games().await.unwrap().is_empty());
}

#[tokio::test]
async fn same_name_reuses_the_stored_player() {
    let store = MemoryStore::new();
    let game = store
        .create_game(2, WinningLimit::Points150, GameType::Normal)
        .await
        .unwrap();
    let first = store
        .create_players(game, &["Ana".to_string(), "Bo".to_string()])
        .await
        .unwrap();
    let again = store.create_players(game, &["ana ".to_string()]).await.unwrap();

    assert_eq!(again[0].id, first[0].id);
    let stored = store.get_game(game).await.unwrap().unwrap();
    assert_eq!(stored.players.len(), 2);
}

#[tokio::test]
async fn missing_records_are_errors() {
    let store = MemoryStore::new();
    assert!(matches!(
        store.record_round(42, None).await,
        Err(PersistenceError::GameNotFound(42))
    ));
    assert!(matches!(
        store.increment_wins(7).await,
        Err(PersistenceError::PlayerNotFound(7))
    ));
    assert!(matches!(
        store.record_round_scores(9, 1, &[10]).await,
        Err(PersistenceError::RoundNotFound(9))
    ));
}

#[tokio::test]
async fn settings_have_defaults_and_persist_changes() {
    let store = MemoryStore::new();
    assert_eq!(store.load_settings().await, Settings::default());
    assert_eq!(store.long_press_increment().await, 30);
    assert!(store.trio_mode_enabled().await);
    assert!(!store.multi_lose_enabled().await);

    let changed = Settings {
        long_press_increment: 45,
        trio_mode: false,
        multi_lose: true,
    };
    store.save_settings(&changed).await.unwrap();
    assert_eq!(store.load_settings().await, changed);
}

#[tokio::test]
async fn unreadable_setting_falls_back_to_default() {
    let store = MemoryStore::new();
    store.set_setting("longPressScore", "lots").await.unwrap();
    store.set_setting("multiLose", "true").await.unwrap();

    let settings = store.load_settings().await;
    assert_eq!(settings.long_press_increment, 30);
    assert!(settings.multi_lose);
}

#[tokio::test]
async fn snapshot_survives_reopen() {
    let path = std::env::temp_dir().join(format!("dominos-{}.json", uuid::Uuid::new_v4()));

    let game_id = {
        let store = MemoryStore::open(&path).await.unwrap();
        let e = normal_engine();
        let registration = persist_new_game(&store, &NewGame::from_engine(&e)).await.unwrap();
        store.set_setting("trioMode", "false").await.unwrap();
        registration.game_id
    };

    let reopened = MemoryStore::open(&path).await.unwrap();
    let game = reopened.get_game(game_id).await.unwrap().unwrap();
    assert_eq!(game.players.len(), 2);
    assert!(!reopened.trio_mode_enabled().await);

    let next = reopened
        .create_game(2, WinningLimit::Points100, GameType::Normal)
        .await
        .unwrap();
    assert!(next > game_id);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn standings_and_csv_export_of_a_stored_tournament() {
    let store = MemoryStore::new();
    let mut e = tournament_engine();
    let registration = persist_new_game(&store, &NewGame::from_engine(&e)).await.unwrap();
    let ids: Vec<_> = e.players.iter().map(|p| p.id).collect();

    // Bo wins twice, Ana once
    for (winner, other) in [(1, 0), (1, 2), (0, 2)] {
        add_score(&mut e, ids[other], 10).unwrap();
        add_score(&mut e, ids[winner], 100).unwrap();
        let settlement = end_round(&mut e).unwrap().unwrap();
        persist_round(&store, &registration, &settlement).await.unwrap();
    }

    let game = store.get_game(registration.game_id).await.unwrap().unwrap();
    let standings = game_standings(&game);
    let view: Vec<(usize, &str, u32)> = standings
        .iter()
        .map(|r| (r.rank, r.entry.name.as_str(), r.entry.wins))
        .collect();
    assert_eq!(view, vec![(1, "Bo", 2), (2, "Ana", 1), (3, "Cy", 0)]);

    let mut out = Vec::new();
    export_game_csv(&game, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "round,player,scores,total,winner");
    assert_eq!(lines[1], "1,Ana,10,10,false");
    assert_eq!(lines[2], "1,Bo,100,100,true");
    assert_eq!(lines[3], "1,Cy,,0,false");
    assert_eq!(lines.len(), 1 + 3 * 3);
}

#[tokio::test]
async fn single_round_game_ranks_by_points() {
    let store = MemoryStore::new();
    let mut e = normal_engine();
    let registration = persist_new_game(&store, &NewGame::from_engine(&e)).await.unwrap();
    let (ana, bo) = (e.players[0].id, e.players[1].id);
    add_score(&mut e, ana, 60).unwrap();
    add_score(&mut e, bo, 150).unwrap();
    let settlement = restart_round(&mut e).unwrap().unwrap();
    persist_round(&store, &registration, &settlement).await.unwrap();

    let game = store.get_game(registration.game_id).await.unwrap().unwrap();
    let standings = game_standings(&game);
    assert_eq!(standings[0].entry.name, "Bo");
    assert_eq!(standings[0].entry.total, 150);
    assert_eq!(standings[1].rank, 2);
}
