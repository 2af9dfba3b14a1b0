//! Stored game views: standings and CSV export.

use crate::logic::ranking::{competition_rank, Ranked};
use crate::models::{StoredGame, StoredPlayerId};
use serde::Serialize;

/// A player's line in a stored game's standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub player_id: StoredPlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    /// Points across all recorded rounds.
    pub total: u32,
}

/// Final standings of a stored game.
///
/// A single-round game is ranked by that round's points; a game with several
/// rounds (a tournament) by wins. A game without rounds lists the roster, all tied.
pub fn game_standings(game: &StoredGame) -> Vec<Ranked<Standing>> {
    let standings: Vec<Standing> = game
        .players
        .iter()
        .map(|p| Standing {
            player_id: p.id,
            name: p.name.clone(),
            wins: p.wins,
            losses: p.losses,
            total: game
                .rounds
                .iter()
                .fold(0u32, |acc, r| acc.saturating_add(r.total_for(p.id))),
        })
        .collect();

    if game.rounds.len() == 1 {
        competition_rank(standings, |s| s.total)
    } else {
        competition_rank(standings, |s| s.wins)
    }
}

/// Write one row per round and player: round number, name, entries joined by `+`,
/// round total and whether the player won the round.
pub fn export_game_csv<W: std::io::Write>(game: &StoredGame, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["round", "player", "scores", "total", "winner"])?;
    for (index, round) in game.rounds.iter().enumerate() {
        for line in &round.scores {
            let name = game
                .player(line.player_id)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            let entries: Vec<String> = line.scores.iter().map(|v| v.to_string()).collect();
            let total = line.scores.iter().fold(0u32, |acc, v| acc.saturating_add(*v));
            let won = round.winner_id == Some(line.player_id);
            wtr.write_record([
                (index + 1).to_string(),
                name.to_string(),
                entries.join("+"),
                total.to_string(),
                won.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
