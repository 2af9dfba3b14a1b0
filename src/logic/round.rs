//! Round end: apply win/loss deltas in memory and hand back what storage still needs.

use crate::logic::resolver::{resolve_standard_round, resolve_trio_round};
use crate::models::{
    GameStatus, MatchEngine, MatchError, Player, PlayerRoundScores, RoundOutcome, RoundSettlement,
};

fn capture_scores(engine: &MatchEngine) -> Vec<PlayerRoundScores> {
    engine
        .active_players()
        .map(|p| PlayerRoundScores {
            player_id: p.id,
            values: p.score_values(),
        })
        .collect()
}

/// End a tournament round.
///
/// Without a winner this is a manual restart: scores are cleared and nothing is
/// settled. With a winner the round is settled (trio or standard rules), the
/// counters are updated, scores are cleared and the settlement is returned so
/// the caller can persist it. Leaves the match `Ready`, except when a round
/// with a winner has an active player count outside the band: then nothing is
/// applied and `ActivePlayersOutOfRange` is returned.
pub fn end_round(engine: &mut MatchEngine) -> Result<Option<RoundSettlement>, MatchError> {
    if !engine.config.tournament_mode || engine.status == GameStatus::NotStarted {
        return Err(MatchError::InvalidState);
    }

    let settlement = match engine.winner_id {
        None => None,
        Some(winner_id) => {
            engine.check_active_band()?;
            let active: Vec<&Player> = engine.active_players().collect();
            let outcome = if engine.config.trio_rules() {
                resolve_trio_round(&active, engine.config.multi_lose_enabled)
            } else {
                resolve_standard_round(&active, Some(winner_id), engine.config.multi_lose_enabled)
            };
            Some(RoundSettlement {
                scores: capture_scores(engine),
                outcome,
                counts_results: true,
            })
        }
    };

    if let Some(s) = &settlement {
        apply_outcome(engine, &s.outcome);
        log::info!(
            "Round settled: winner {:?}, {} loser(s)",
            s.outcome.winner_id,
            s.outcome.losers.len()
        );
    }

    engine.reset_round();
    Ok(settlement)
}

/// Restart a normal (non-tournament) game. Counters are not touched.
///
/// A finished round is still returned as a settlement so it can be logged to history.
pub fn restart_round(engine: &mut MatchEngine) -> Result<Option<RoundSettlement>, MatchError> {
    if engine.config.tournament_mode || engine.status == GameStatus::NotStarted {
        return Err(MatchError::InvalidState);
    }
    let settlement = engine.winner_id.map(|winner_id| RoundSettlement {
        scores: capture_scores(engine),
        outcome: RoundOutcome {
            winner_id: Some(winner_id),
            losers: Vec::new(),
        },
        counts_results: false,
    });
    engine.reset_round();
    Ok(settlement)
}

fn apply_outcome(engine: &mut MatchEngine, outcome: &RoundOutcome) {
    if let Some(winner) = outcome.winner_id.and_then(|id| engine.get_player_mut(id)) {
        winner.add_win();
    }
    for loss in &outcome.losers {
        if let Some(p) = engine.get_player_mut(loss.player_id) {
            p.add_losses(loss.amount);
        }
    }
}
