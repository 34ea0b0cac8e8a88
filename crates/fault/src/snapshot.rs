//! Holds the [FaultGameView], the shared handle to the latest snapshot of a game.

use crate::{ClaimRecord, FaultDisputeState, Result};
use moria_primitives::GameStatus;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The [FaultGameView] holds the most recent [FaultDisputeState] of one game.
///
/// Readers take a snapshot and work against it for as long as they like; a resync builds a
/// complete new state and swaps it in atomically. Readers never observe a mix of old and new
/// claims, and the lock is never held while a snapshot is solved against.
#[derive(Debug)]
pub struct FaultGameView {
    current: RwLock<Arc<FaultDisputeState>>,
}

impl FaultGameView {
    pub fn new(state: FaultDisputeState) -> Self {
        Self {
            current: RwLock::new(Arc::new(state)),
        }
    }

    /// Returns the current snapshot.
    pub async fn snapshot(&self) -> Arc<FaultDisputeState> {
        Arc::clone(&*self.current.read().await)
    }

    /// Rebuilds the game from a freshly read on-chain claim list and replaces the current
    /// snapshot with it. On error the current snapshot is kept.
    ///
    /// Resyncs are serialised on the view: each one holds the write lock from reading the
    /// current depth until the swap, so concurrent resyncs apply in the order they acquire it.
    /// Callers that read claim lists at different chain heights must apply them in chain
    /// order. Snapshots already handed out are unaffected.
    pub async fn apply_records(
        &self,
        records: &[ClaimRecord],
        status: GameStatus,
    ) -> Result<Arc<FaultDisputeState>> {
        let mut current = self.current.write().await;
        let next = Arc::new(FaultDisputeState::try_new(
            records,
            status,
            current.max_depth(),
        )?);

        *current = Arc::clone(&next);
        tracing::debug!(
            target: "fault-view",
            "Applied game snapshot with {} claims (status: {:?})",
            next.claims().len(),
            status
        );
        Ok(next)
    }
}
