//! Match configuration: game size, winning limit and mode flags.

use crate::models::engine::MatchError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Player slots allowed for a normal game.
pub const NORMAL_GAME_SIZES: RangeInclusive<usize> = 2..=4;
/// Player slots allowed for a tournament.
pub const TOURNAMENT_GAME_SIZES: RangeInclusive<usize> = 3..=10;

/// Score threshold that ends a round.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WinningLimit {
    Points100,
    #[default]
    Points150,
    Points200,
}

impl WinningLimit {
    pub const ALL: [WinningLimit; 3] = [Self::Points100, Self::Points150, Self::Points200];

    pub fn points(self) -> u32 {
        match self {
            WinningLimit::Points100 => 100,
            WinningLimit::Points150 => 150,
            WinningLimit::Points200 => 200,
        }
    }
}

impl TryFrom<u32> for WinningLimit {
    type Error = MatchError;

    fn try_from(points: u32) -> Result<Self, Self::Error> {
        WinningLimit::ALL
            .into_iter()
            .find(|l| l.points() == points)
            .ok_or(MatchError::InvalidWinningLimit(points))
    }
}

impl From<WinningLimit> for u32 {
    fn from(limit: WinningLimit) -> Self {
        limit.points()
    }
}

/// How a game is recorded in history.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    #[default]
    Normal,
    Tournament,
}

impl GameType {
    pub fn as_str(self) -> &'static str {
        match self {
            GameType::Normal => "normal",
            GameType::Tournament => "tournament",
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of the live match. Set before the match starts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of configured player slots.
    pub game_size: usize,
    pub winning_limit: WinningLimit,
    pub tournament_mode: bool,
    pub trio_mode: bool,
    pub multi_lose_enabled: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            game_size: *NORMAL_GAME_SIZES.start(),
            winning_limit: WinningLimit::default(),
            tournament_mode: false,
            trio_mode: crate::models::settings::DEFAULT_TRIO_MODE,
            multi_lose_enabled: crate::models::settings::DEFAULT_MULTI_LOSE,
        }
    }
}

impl MatchConfig {
    /// Sizes the current mode accepts.
    pub fn game_size_range(&self) -> RangeInclusive<usize> {
        if self.tournament_mode {
            TOURNAMENT_GAME_SIZES
        } else {
            NORMAL_GAME_SIZES
        }
    }

    pub fn set_game_size(&mut self, size: usize) -> Result<(), MatchError> {
        if !self.game_size_range().contains(&size) {
            return Err(MatchError::InvalidGameSize {
                size,
                tournament: self.tournament_mode,
            });
        }
        self.game_size = size;
        Ok(())
    }

    pub fn set_winning_limit(&mut self, points: u32) -> Result<(), MatchError> {
        self.winning_limit = WinningLimit::try_from(points)?;
        Ok(())
    }

    /// Flip tournament mode and clamp `game_size` into the new mode's band.
    pub fn toggle_tournament_mode(&mut self) {
        self.tournament_mode = !self.tournament_mode;
        let range = self.game_size_range();
        self.game_size = self.game_size.clamp(*range.start(), *range.end());
    }

    /// Trio rules only apply to tournament rounds.
    pub fn trio_rules(&self) -> bool {
        self.tournament_mode && self.trio_mode
    }

    /// Number of active players a round may start with.
    pub fn active_band(&self) -> RangeInclusive<usize> {
        if self.trio_rules() {
            3..=3
        } else {
            NORMAL_GAME_SIZES
        }
    }

    pub fn game_type(&self) -> GameType {
        if self.tournament_mode {
            GameType::Tournament
        } else {
            GameType::Normal
        }
    }
}
