//! The traits module contains traits used throughout the library.

use crate::{dispute_game::Claim, GameStatus};
use std::sync::Arc;

/// The [DisputeGame] trait is the highest level trait in the library, describing
/// the state of a simple primitive dispute. It has two key properties:
///
/// - It houses a root [Claim], a 32 byte commitment, which is the claim being
///   disputed.
/// - It exists in one of the states described by [GameStatus].
///
/// Implementations are read-only views of the game. A newer view of the same game
/// replaces an older one; it is never patched in place.
pub trait DisputeGame {
    /// Returns the root claim of the dispute game.
    fn root_claim(&self) -> Claim;

    /// Returns the current status of the dispute game.
    fn status(&self) -> &GameStatus;
}

/// The [DisputeSolver] trait describes the base functionality of a solver for
/// a [DisputeGame].
#[async_trait::async_trait]
pub trait DisputeSolver<DG, R>
where
    DG: DisputeGame + Sync,
{
    /// Returns one response per claim in the passed [DisputeGame]. The consumer of the
    /// responses is responsible for dispatching the actions associated with them.
    ///
    /// An [Err] is only returned when no response can be computed at all.
    async fn available_moves(&self, game: &DG) -> anyhow::Result<Arc<[R]>>;
}
