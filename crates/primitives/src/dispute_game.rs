//! Types shared by every [crate::DisputeGame] variant.

use alloy_primitives::B256;
use anyhow::{anyhow, Error};

/// The [Claim] type is an alias to [B256], used to delineate a claim hash from a regular hash.
pub type Claim = B256;

/// The [GameType] enum selects the backend that a dispute game is played over. The backend is
/// chosen once, when the game is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    /// A fault dispute game backed by the Cannon MIPS VM.
    FaultCannon = 0,
    /// A fault dispute game backed by the Alphabet VM, a trivial trace used in tests.
    Alphabet = 255,
}

impl TryFrom<u8> for GameType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GameType::FaultCannon),
            255 => Ok(GameType::Alphabet),
            _ => Err(anyhow!("Invalid game type: {value}")),
        }
    }
}

/// The [GameStatus] enum mirrors the on-chain status of a dispute game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// The game is still being played.
    #[default]
    InProgress = 0,
    /// The challenger of the root claim won.
    ChallengerWins = 1,
    /// The defender of the root claim won.
    DefenderWins = 2,
}

impl GameStatus {
    /// Returns `true` once the game can no longer accept moves.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl TryFrom<u8> for GameStatus {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GameStatus::InProgress),
            1 => Ok(GameStatus::ChallengerWins),
            2 => Ok(GameStatus::DefenderWins),
            _ => Err(anyhow!("Invalid game status: {value}")),
        }
    }
}
