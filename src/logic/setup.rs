//! Setup phase: player name slots, roster configuration and round start.

use crate::models::{GameStatus, MatchEngine, MatchError, Player, MAX_NAME_LEN};
use serde::{Deserialize, Serialize};

/// One player-name field of the setup form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Zero-based slot index.
    pub index: usize,
    pub label: String,
    pub name: String,
}

/// Build exactly `game_size` name slots, keeping already typed names by index.
pub fn player_slots<S: AsRef<str>>(game_size: usize, names: &[S]) -> Vec<PlayerSlot> {
    (0..game_size)
        .map(|index| PlayerSlot {
            index,
            label: format!("Player {}", index + 1),
            name: names
                .get(index)
                .map(|n| n.as_ref().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

/// Trim and check names: 1..=10 characters, unique ignoring case.
pub fn validate_player_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>, MatchError> {
    let mut accepted: Vec<String> = Vec::with_capacity(names.len());
    for (slot, name) in names.iter().enumerate() {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MatchError::EmptyName { slot });
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(MatchError::NameTooLong {
                slot,
                name: trimmed.to_string(),
            });
        }
        let key = trimmed.to_lowercase();
        if accepted.iter().any(|n| n.to_lowercase() == key) {
            return Err(MatchError::DuplicatePlayerName(trimmed.to_string()));
        }
        accepted.push(trimmed.to_string());
    }
    Ok(accepted)
}

/// Submit the setup form: create one player per configured slot (NotStarted -> Ready).
///
/// Outside tournament mode every player is active; in tournament mode all start
/// benched until picked for the round.
pub fn configure_players<S: AsRef<str>>(engine: &mut MatchEngine, names: &[S]) -> Result<(), MatchError> {
    if engine.status != GameStatus::NotStarted {
        return Err(MatchError::InvalidState);
    }
    let expected = engine.config.game_size;
    if names.len() != expected {
        return Err(MatchError::WrongNumberOfPlayers {
            expected,
            got: names.len(),
        });
    }
    let names = validate_player_names(names)?;
    let is_playing = !engine.config.tournament_mode;
    engine.players = names
        .into_iter()
        .map(|name| Player::new(name, is_playing))
        .collect();
    engine.winner_id = None;
    engine.loser_id = None;
    engine.registration = None;
    engine.status = GameStatus::Ready;
    log::info!(
        "Configured {} game with {} players, first to {}",
        engine.config.game_type(),
        engine.players.len(),
        engine.config.winning_limit.points()
    );
    Ok(())
}

/// Start a fresh round with the currently active players.
///
/// Rejects the request when the active count is outside the band for the
/// current rules (exactly 3 under trio rules, otherwise 2 to 4).
pub fn start_new_round(engine: &mut MatchEngine) -> Result<(), MatchError> {
    if engine.status == GameStatus::NotStarted || engine.players.is_empty() {
        return Err(MatchError::InvalidState);
    }
    engine.check_active_band()?;
    engine.reset_round();
    log::debug!("New round with {} active players", engine.active_count());
    Ok(())
}
