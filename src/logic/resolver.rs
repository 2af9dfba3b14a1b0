//! Round settlement: who wins and how many losses each loser takes.

use crate::models::{LossDelta, Player, PlayerId, RoundOutcome};

/// Loss charged to a loser: doubled under multi-lose when they scored nothing.
fn loss_amount(player: &Player, multi_lose: bool) -> u32 {
    if multi_lose && player.is_skunked() {
        2
    } else {
        1
    }
}

/// Standard (non-trio) settlement: the winner takes a win and every other
/// active player takes a loss.
pub fn resolve_standard_round(active: &[&Player], winner_id: Option<PlayerId>, multi_lose: bool) -> RoundOutcome {
    let Some(winner_id) = winner_id else {
        return RoundOutcome::default();
    };
    let losers = active
        .iter()
        .filter(|p| p.id != winner_id)
        .map(|p| LossDelta {
            player_id: p.id,
            amount: loss_amount(p, multi_lose),
        })
        .collect();
    RoundOutcome {
        winner_id: Some(winner_id),
        losers,
    }
}

/// Trio settlement.
///
/// The highest total wins (first in roster order on ties). When more than one
/// player finished without a single entry, all of them lose; otherwise only the
/// lowest total loses (last in roster order on ties). Everyone else is untouched.
pub fn resolve_trio_round(active: &[&Player], multi_lose: bool) -> RoundOutcome {
    let Some(winner) = active.iter().rev().max_by_key(|p| p.total()) else {
        return RoundOutcome::default();
    };

    let skunked: Vec<&&Player> = active
        .iter()
        .filter(|p| p.is_skunked() && p.id != winner.id)
        .collect();

    let losers = if skunked.len() > 1 {
        skunked
            .into_iter()
            .map(|p| LossDelta {
                player_id: p.id,
                amount: loss_amount(p, multi_lose),
            })
            .collect()
    } else {
        active
            .iter()
            .rev()
            .min_by_key(|p| p.total())
            .filter(|p| p.id != winner.id)
            .map(|p| {
                vec![LossDelta {
                    player_id: p.id,
                    amount: loss_amount(p, multi_lose),
                }]
            })
            .unwrap_or_default()
    };

    RoundOutcome {
        winner_id: Some(winner.id),
        losers,
    }
}
