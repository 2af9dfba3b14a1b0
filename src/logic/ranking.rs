//! Standings with competition ranking ("1, 2, 2, 4").

use crate::models::{MatchEngine, Player};
use serde::Serialize;

/// An entry with its display rank. Tied entries share the rank of the first of the group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: T,
}

/// Sort descending by `key` (stable, so ties keep input order) and assign ranks.
///
/// A tie takes the rank of the entry above it; the next distinct key gets its
/// 1-based position, skipping the numbers the tie consumed.
pub fn competition_rank<T, K, F>(mut entries: Vec<T>, key: F) -> Vec<Ranked<T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    entries.sort_by(|a, b| key(b).cmp(&key(a)));
    let mut ranked: Vec<Ranked<T>> = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if key(&prev.entry) == key(&entry) => prev.rank,
            _ => position + 1,
        };
        ranked.push(Ranked { rank, entry });
    }
    ranked
}

/// Rank players by their current round total.
pub fn rank_by_score(players: &[Player]) -> Vec<Ranked<&Player>> {
    competition_rank(players.iter().collect(), |p| p.total())
}

/// Rank players by cumulative wins (tournament standings).
pub fn rank_by_wins(players: &[Player]) -> Vec<Ranked<&Player>> {
    competition_rank(players.iter().collect(), |p| p.wins)
}

/// Players sharing the highest win count, in roster order. Empty until someone wins.
pub fn tournament_leaders(players: &[Player]) -> Vec<&Player> {
    let max_wins = players.iter().map(|p| p.wins).max().unwrap_or(0);
    if max_wins == 0 {
        return Vec::new();
    }
    players.iter().filter(|p| p.wins == max_wins).collect()
}

/// Header line for the live match.
pub fn match_title(engine: &MatchEngine) -> String {
    if !engine.config.tournament_mode {
        return format!("Game - First to {}", engine.config.winning_limit.points());
    }
    match tournament_leaders(&engine.players).as_slice() {
        [] => "Tournament".to_string(),
        [leader] => format!("Tournament - {} ({} wins)", leader.name, leader.wins),
        leaders => {
            let names: Vec<&str> = leaders.iter().map(|p| p.name.as_str()).collect();
            format!("Tournament - Tied: {} ({} wins)", names.join(", "), leaders[0].wins)
        }
    }
}
