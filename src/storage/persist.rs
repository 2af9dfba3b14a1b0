//! Second phase of every mutation: write what was already applied in memory.

use super::{GameStore, PersistenceError};
use crate::models::{
    GameRegistration, NewGame, PlayerId, RegisteredPlayer, RoundHandle, RoundSettlement,
    StoredPlayerId,
};

/// Create the game and its roster in storage and return the id mapping for the engine.
pub async fn persist_new_game<S>(store: &S, game: &NewGame) -> Result<GameRegistration, PersistenceError>
where
    S: GameStore + ?Sized,
{
    let game_id = store
        .create_game(game.game_size, game.winning_limit, game.game_type)
        .await?;
    let names: Vec<String> = game.players.iter().map(|(_, name)| name.clone()).collect();
    let stored = store.create_players(game_id, &names).await?;

    let players = game
        .players
        .iter()
        .zip(stored)
        .map(|((player_id, _), stored)| RegisteredPlayer {
            player_id: *player_id,
            stored_id: stored.id,
        })
        .collect();
    log::info!(
        "Saved {} game {} with {} players",
        game.game_type,
        game_id,
        names.len()
    );
    Ok(GameRegistration { game_id, players })
}

fn stored_id(registration: &GameRegistration, player_id: PlayerId) -> Result<StoredPlayerId, PersistenceError> {
    registration
        .stored_id(player_id)
        .ok_or(PersistenceError::UnregisteredPlayer(player_id))
}

/// Record a settled round: the round with its winner, every player's entries and,
/// when the round counts, the win/loss increments.
pub async fn persist_round<S>(
    store: &S,
    registration: &GameRegistration,
    settlement: &RoundSettlement,
) -> Result<RoundHandle, PersistenceError>
where
    S: GameStore + ?Sized,
{
    let winner = settlement
        .outcome
        .winner_id
        .map(|id| stored_id(registration, id))
        .transpose()?;

    let round = store.record_round(registration.game_id, winner).await?;
    for line in &settlement.scores {
        let player = stored_id(registration, line.player_id)?;
        store.record_round_scores(round, player, &line.values).await?;
    }

    if settlement.counts_results {
        if let Some(winner) = winner {
            store.increment_wins(winner).await?;
        }
        for loss in &settlement.outcome.losers {
            let player = stored_id(registration, loss.player_id)?;
            store.increment_losses(player, loss.amount).await?;
        }
    }
    log::info!("Saved round {} of game {}", round, registration.game_id);
    Ok(round)
}
