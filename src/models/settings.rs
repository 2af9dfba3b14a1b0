//! Operator settings consumed by the match engine.
//!
//! Settings are stored as string key/value pairs; this module owns the keys,
//! defaults and parsing.

use crate::models::engine::MatchError;
use serde::{Deserialize, Serialize};

pub const LONG_PRESS_KEY: &str = "longPressScore";
pub const TRIO_MODE_KEY: &str = "trioMode";
pub const MULTI_LOSE_KEY: &str = "multiLose";

pub const DEFAULT_LONG_PRESS_SCORE: u32 = 30;
pub const MAX_LONG_PRESS_SCORE: u32 = 999;
pub const DEFAULT_TRIO_MODE: bool = true;
pub const DEFAULT_MULTI_LOSE: bool = false;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Points added by a long press on a player button.
    pub long_press_increment: u32,
    pub trio_mode: bool,
    pub multi_lose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            long_press_increment: DEFAULT_LONG_PRESS_SCORE,
            trio_mode: DEFAULT_TRIO_MODE,
            multi_lose: DEFAULT_MULTI_LOSE,
        }
    }
}

impl Settings {
    /// Build settings from stored pairs. Missing or unreadable values fall back to defaults.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut settings = Settings::default();
        for (key, value) in pairs {
            if let Err(e) = settings.apply(key, value) {
                log::warn!("Ignoring stored setting {key}={value:?}: {e}");
            }
        }
        settings
    }

    /// Stored representation, one pair per known key.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (LONG_PRESS_KEY, self.long_press_increment.to_string()),
            (TRIO_MODE_KEY, self.trio_mode.to_string()),
            (MULTI_LOSE_KEY, self.multi_lose.to_string()),
        ]
    }

    /// Validate and apply one key/value pair.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), MatchError> {
        match key {
            LONG_PRESS_KEY => {
                self.long_press_increment = parse_long_press_increment(value)?;
            }
            TRIO_MODE_KEY => self.trio_mode = parse_flag(key, value)?,
            MULTI_LOSE_KEY => self.multi_lose = parse_flag(key, value)?,
            _ => return Err(MatchError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }
}

/// Long-press increment must be a positive integer no larger than 999.
pub fn validate_long_press_increment(value: u32) -> Result<u32, MatchError> {
    if value == 0 || value > MAX_LONG_PRESS_SCORE {
        return Err(MatchError::InvalidLongPressIncrement(value.to_string()));
    }
    Ok(value)
}

fn parse_long_press_increment(value: &str) -> Result<u32, MatchError> {
    let parsed: u32 = value
        .trim()
        .parse()
        .map_err(|_| MatchError::InvalidLongPressIncrement(value.to_string()))?;
    validate_long_press_increment(parsed)
}

fn parse_flag(key: &str, value: &str) -> Result<bool, MatchError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(MatchError::InvalidSettingValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
