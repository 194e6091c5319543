//! Tunable game settings.
//!
//! Defaults come from [`crate::core::constants`]; the binary layers
//! `CRAWLER_*` environment overrides on top.

use super::constants::{
    LEVEL_GRID_CEILING, LEVEL_GRID_FLOOR, LEVEL_GRID_MAX, LEVEL_GRID_MIN, PLAYER_BASE_ATTACK,
    PLAYER_BASE_DEFENSE, PLAYER_BASE_STAT_CAP, PLAYER_START_HP, PLAYER_START_HP_CAP,
};
use anyhow::{bail, Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub start_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    /// Smallest row/column count rolled for a level
    pub grid_min: usize,
    /// Largest row/column count rolled for a level
    pub grid_max: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_hp: PLAYER_START_HP,
            base_attack: PLAYER_BASE_ATTACK,
            base_defense: PLAYER_BASE_DEFENSE,
            grid_min: LEVEL_GRID_MIN,
            grid_max: LEVEL_GRID_MAX,
        }
    }
}

impl GameConfig {
    /// Builds the config from defaults plus any `CRAWLER_*` variables in the
    /// process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            start_hp: parse_var(&lookup, "CRAWLER_START_HP", defaults.start_hp)?,
            base_attack: parse_var(&lookup, "CRAWLER_BASE_ATTACK", defaults.base_attack)?,
            base_defense: parse_var(&lookup, "CRAWLER_BASE_DEFENSE", defaults.base_defense)?,
            grid_min: parse_var(&lookup, "CRAWLER_GRID_MIN", defaults.grid_min)?,
            grid_max: parse_var(&lookup, "CRAWLER_GRID_MAX", defaults.grid_max)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_hp == 0 {
            bail!("CRAWLER_START_HP must be at least 1");
        }
        if self.start_hp > PLAYER_START_HP_CAP {
            bail!(
                "CRAWLER_START_HP must be at most {} (got {})",
                PLAYER_START_HP_CAP,
                self.start_hp
            );
        }
        for (key, value) in [
            ("CRAWLER_BASE_ATTACK", self.base_attack),
            ("CRAWLER_BASE_DEFENSE", self.base_defense),
        ] {
            if value > PLAYER_BASE_STAT_CAP {
                bail!("{key} must be at most {PLAYER_BASE_STAT_CAP} (got {value})");
            }
        }
        if self.grid_min < LEVEL_GRID_FLOOR {
            bail!(
                "CRAWLER_GRID_MIN must be at least {} (got {})",
                LEVEL_GRID_FLOOR,
                self.grid_min
            );
        }
        if self.grid_max > LEVEL_GRID_CEILING {
            bail!(
                "CRAWLER_GRID_MAX must be at most {} (got {})",
                LEVEL_GRID_CEILING,
                self.grid_max
            );
        }
        if self.grid_min > self.grid_max {
            bail!(
                "CRAWLER_GRID_MIN ({}) is larger than CRAWLER_GRID_MAX ({})",
                self.grid_min,
                self.grid_max
            );
        }
        Ok(())
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
        None => Ok(default),
    }
}
