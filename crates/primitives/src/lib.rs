#![doc = include_str!("../README.md")]

mod dispute_game;
pub use dispute_game::{Claim, GameStatus, GameType};

mod traits;
pub use traits::{DisputeGame, DisputeSolver};

pub mod rule;
