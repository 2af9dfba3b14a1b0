//! Integration tests for competition ranking, leaders and the match title.

use dominos_scorekeeper::{
    competition_rank, configure_players, match_title, rank_by_score, rank_by_wins,
    tournament_leaders, MatchEngine, Player,
};

fn with_total(name: &str, total: u32) -> Player {
    let mut p = Player::new(name, true);
    if total > 0 {
        p.push_score(total);
    }
    p
}

fn with_wins(name: &str, wins: u32) -> Player {
    let mut p = Player::new(name, true);
    for _ in 0..wins {
        p.add_win();
    }
    p
}

#[test]
fn ties_share_rank_and_skip_the_next() {
    let players = vec![with_total("A", 100), with_total("B", 100), with_total("C", 80)];
    let ranked = rank_by_score(&players);
    let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 1, 3]);
    assert_eq!(ranked[0].entry.name, "A");
    assert_eq!(ranked[1].entry.name, "B");
}

#[test]
fn wins_ranking_sorts_and_keeps_input_order_on_ties() {
    let players = vec![
        with_wins("A", 3),
        with_wins("B", 1),
        with_wins("C", 3),
        with_wins("D", 0),
    ];
    let ranked = rank_by_wins(&players);
    let view: Vec<(usize, &str)> = ranked.iter().map(|r| (r.rank, r.entry.name.as_str())).collect();
    assert_eq!(view, vec![(1, "A"), (1, "C"), (3, "B"), (4, "D")]);
}

#[test]
fn everyone_tied_is_rank_one() {
    let ranked = competition_rank(vec![5, 5, 5, 5], |v| *v);
    assert!(ranked.iter().all(|r| r.rank == 1));
}

#[test]
fn ranks_are_one_based_and_non_decreasing() {
    let ranked = competition_rank(vec![3, 9, 1, 9, 4, 1], |v| *v);
    assert_eq!(ranked[0].rank, 1);
    assert!(ranked.windows(2).all(|w| w[0].rank <= w[1].rank));
    let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 1, 3, 4, 5, 5]);
}

#[test]
fn ranking_twice_gives_the_same_result() {
    let first = competition_rank(vec![("a", 2), ("b", 7), ("c", 2)], |e| e.1);
    let entries: Vec<(&str, u32)> = first.iter().map(|r| r.entry).collect();
    let second = competition_rank(entries, |e| e.1);
    assert_eq!(first, second);
}

#[test]
fn empty_input_ranks_to_nothing() {
    assert!(competition_rank(Vec::<u32>::new(), |v| *v).is_empty());
}

#[test]
fn leaders_are_empty_until_a_win() {
    let players = vec![with_wins("A", 0), with_wins("B", 0)];
    assert!(tournament_leaders(&players).is_empty());

    let players = vec![with_wins("A", 2), with_wins("B", 1), with_wins("C", 2)];
    let names: Vec<&str> = tournament_leaders(&players)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn title_reflects_mode_and_leaders() {
    let mut e = MatchEngine::default();
    e.set_winning_limit(200).unwrap();
    assert_eq!(match_title(&e), "Game - First to 200");

    let mut t = MatchEngine::default();
    t.toggle_tournament_mode().unwrap();
    configure_players(&mut t, &["Ana", "Bo", "Cy"]).unwrap();
    assert_eq!(match_title(&t), "Tournament");

    t.players[1].add_win();
    assert_eq!(match_title(&t), "Tournament - Bo (1 wins)");

    t.players[2].add_win();
    assert_eq!(match_title(&t), "Tournament - Tied: Bo, Cy (1 wins)");
}
