//! Score entry and retraction, followed by win-condition evaluation.

use crate::models::{
    GameStatus, MatchEngine, MatchError, Player, PlayerId, Resolution, ScoreId, Settings,
    MAX_SCORE_ENTRY,
};

/// Parse a typed score. Blank input means the prompt was cancelled (`Ok(None)`).
///
/// Accepts whole numbers from 1 to [`MAX_SCORE_ENTRY`].
pub fn parse_score_input(input: &str) -> Result<Option<u32>, MatchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(value) if (1..=MAX_SCORE_ENTRY).contains(&value) => Ok(Some(value)),
        _ => Err(MatchError::InvalidScore(trimmed.to_string())),
    }
}

/// Append `amount` points for an active player and re-evaluate the round.
///
/// Ignored (returns `None`) while the round is finished, while the active
/// player count is outside the band for the current rules, for an amount
/// outside 1..=[`MAX_SCORE_ENTRY`], or for a player who is unknown or benched.
pub fn add_score(engine: &mut MatchEngine, player_id: PlayerId, amount: u32) -> Option<ScoreId> {
    if engine.status == GameStatus::Finished {
        log::debug!("Round finished, ignoring score for {}", player_id);
        return None;
    }
    if let Err(e) = engine.check_active_band() {
        log::warn!("Ignoring score for {}: {}", player_id, e);
        return None;
    }
    if amount == 0 || amount > MAX_SCORE_ENTRY {
        log::warn!("Ignoring score {} for {}", amount, player_id);
        return None;
    }
    let player = match engine.get_player_mut(player_id) {
        Some(p) if p.is_playing => p,
        Some(_) => {
            log::warn!("Ignoring score for benched player {}", player_id);
            return None;
        }
        None => {
            log::warn!("Ignoring score for unknown player {}", player_id);
            return None;
        }
    };
    let score_id = player.push_score(amount);
    engine.status = GameStatus::InProgress;
    evaluate_win_condition(engine);
    Some(score_id)
}

/// Long-press gesture: add the configured increment.
pub fn add_long_press_score(engine: &mut MatchEngine, player_id: PlayerId, settings: &Settings) -> Option<ScoreId> {
    add_score(engine, player_id, settings.long_press_increment)
}

/// Remove one entry by id. Missing players or entries are a no-op (returns false).
///
/// A removal can drop the leader back under the limit, which reopens the round.
pub fn remove_score(engine: &mut MatchEngine, player_id: PlayerId, score_id: ScoreId) -> bool {
    let removed = engine
        .get_player_mut(player_id)
        .map(|p| p.remove_score(score_id))
        .unwrap_or(false);
    if !removed {
        log::debug!("No score {} for player {}", score_id, player_id);
        return false;
    }
    evaluate_win_condition(engine);
    true
}

/// Recompute winner/loser from the active players' totals and update the lifecycle.
///
/// Standard rules: the first active player (roster order) at or above the limit wins.
/// Trio rules: once anyone reaches the limit, the highest total wins (first in
/// roster order on ties) and the lowest total loses (last in roster order on ties).
pub fn evaluate_win_condition(engine: &mut MatchEngine) -> Resolution {
    let limit = engine.config.winning_limit.points();
    let active: Vec<&Player> = engine.active_players().collect();

    if active.iter().any(|p| p.total() >= limit) {
        let (winner_id, loser_id) = if engine.config.trio_rules() {
            let winner = active.iter().rev().max_by_key(|p| p.total()).map(|p| p.id);
            let loser = active
                .iter()
                .rev()
                .min_by_key(|p| p.total())
                .map(|p| p.id)
                .filter(|id| Some(*id) != winner);
            (winner, loser)
        } else {
            let winner = active.iter().find(|p| p.total() >= limit).map(|p| p.id);
            (winner, None)
        };
        engine.winner_id = winner_id;
        engine.loser_id = loser_id;
        if engine.status != GameStatus::Finished {
            log::debug!("Round finished, winner {:?}, loser {:?}", winner_id, loser_id);
        }
        engine.status = GameStatus::Finished;
    } else {
        let has_entries = active.iter().any(|p| !p.score.is_empty());
        engine.winner_id = None;
        engine.loser_id = None;
        engine.status = match engine.status {
            GameStatus::Finished | GameStatus::InProgress => GameStatus::InProgress,
            status if has_entries => {
                log::debug!("Round in progress (was {:?})", status);
                GameStatus::InProgress
            }
            status => status,
        };
    }
    engine.resolution()
}
