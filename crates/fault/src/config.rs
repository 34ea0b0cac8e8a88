//! The `config` module contains the [FaultGameConfig].

use crate::{FaultError, Result, MAX_POSITION_DEPTH};
use moria_primitives::GameType;
use serde::Deserialize;

/// The [FaultGameConfig] struct holds the per-game settings the solver needs. It is supplied by
/// the embedding process, usually as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultGameConfig {
    /// The [GameType] byte of the game, selecting the trace backend.
    pub game_type: u8,
    /// The maximum depth of the game's position tree.
    pub max_depth: u8,
    /// The number of claims solved concurrently.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_max_concurrency() -> usize {
    16
}

impl FaultGameConfig {
    /// Parses and validates a [FaultGameConfig] from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FaultError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the [GameType] of the game.
    pub fn game_type(&self) -> Result<GameType> {
        GameType::try_from(self.game_type).map_err(|e| FaultError::InvalidConfig(e.to_string()))
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<()> {
        self.game_type()?;
        if self.max_depth == 0 || self.max_depth > MAX_POSITION_DEPTH {
            return Err(FaultError::InvalidConfig(format!(
                "max depth must be within 1..={MAX_POSITION_DEPTH}, got {}",
                self.max_depth
            )));
        }
        if self.max_concurrency == 0 {
            return Err(FaultError::InvalidConfig(
                "max concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
