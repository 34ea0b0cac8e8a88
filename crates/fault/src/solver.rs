//! This module contains the [FaultDisputeSolver], the [DisputeSolver] for fault dispute games.

use crate::{
    ClaimInconsistency, FaultClaimSolver, FaultDisputeState, FaultError, FaultGameConfig,
    FaultSolverResponse, Position, Result, TraceProvider,
};
use futures::StreamExt;
use moria_primitives::{Claim, DisputeGame, DisputeSolver};
use std::{marker::PhantomData, sync::Arc};

/// The default number of claims solved concurrently.
const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// A [FaultDisputeSolver] is a [DisputeSolver] that is played over a fault proof VM backend. The
/// solver is responsible for honestly responding to any given claim in a given
/// [FaultDisputeState]. It delegates each claim to its [FaultClaimSolver], which uses a
/// [TraceProvider] to fetch the local opinion of the trace.
pub struct FaultDisputeSolver<S, P>
where
    S: FaultClaimSolver<P>,
    P: TraceProvider,
{
    inner: S,
    max_concurrency: usize,
    /// The depth that solved games must have, if the solver was built from a config.
    max_depth: Option<u8>,
    _phantom: PhantomData<P>,
}

#[async_trait::async_trait]
impl<S, P> DisputeSolver<FaultDisputeState, Result<FaultSolverResponse>> for FaultDisputeSolver<S, P>
where
    S: FaultClaimSolver<P> + Sync,
    P: TraceProvider,
{
    async fn available_moves(
        &self,
        game: &FaultDisputeState,
    ) -> anyhow::Result<Arc<[Result<FaultSolverResponse>]>> {
        self.check_depth(game)?;

        if game.status().is_resolved() {
            tracing::info!(
                target: "fault-dispute-solver",
                "Game is resolved ({:?}), no moves available",
                game.status()
            );
            return Ok(Arc::new([]));
        }

        // Fetch the local opinion on the root claim.
        let attacking_root = self.attacking_root(game).await?;
        tracing::debug!(
            target: "fault-dispute-solver",
            "Solving {} claims (attacking root: {})",
            game.claims().len(),
            attacking_root
        );

        // Every claim is solved independently against the same snapshot. A failure only
        // affects the response of the claim it occurred on.
        let responses = futures::stream::iter(0..game.claims().len())
            .map(|claim_index| self.inner.solve_claim(game, claim_index, attacking_root))
            .buffered(self.max_concurrency)
            .collect::<Vec<_>>()
            .await;

        for (claim_index, response) in responses.iter().enumerate() {
            match response {
                Ok(response) => debug_assert_eq!(response.claim_index(), claim_index),
                Err(e) => tracing::warn!(
                    target: "fault-dispute-solver",
                    "Failed to solve claim {}: {}",
                    claim_index,
                    e
                ),
            }
        }

        Ok(responses.into())
    }
}

impl<S, P> FaultDisputeSolver<S, P>
where
    S: FaultClaimSolver<P>,
    P: TraceProvider,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_depth: None,
            _phantom: PhantomData,
        }
    }

    /// Creates a [FaultDisputeSolver] from a validated [FaultGameConfig]. The solver only
    /// accepts games of the configured max depth.
    pub fn with_config(inner: S, config: &FaultGameConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            target: "fault-dispute-solver",
            "Creating solver for game type {:?} with max depth {}",
            config.game_type()?,
            config.max_depth
        );
        Ok(Self {
            inner,
            max_concurrency: config.max_concurrency,
            max_depth: Some(config.max_depth),
            _phantom: PhantomData,
        })
    }

    /// Returns the [FaultClaimSolver] that claims are delegated to.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Rejects a game whose tree depth differs from the configured one.
    fn check_depth(&self, game: &FaultDisputeState) -> Result<()> {
        match self.max_depth {
            Some(expected) if expected != game.max_depth() => {
                Err(FaultError::InvalidConfig(format!(
                    "game has max depth {}, solver is configured for {expected}",
                    game.max_depth()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Returns `true` if the local trace disagrees with the game's root claim.
    pub async fn attacking_root(&self, game: &FaultDisputeState) -> Result<bool> {
        let index = Position::ROOT.trace_index(game.max_depth());
        let local_root = self
            .inner
            .provider()
            .get(index)
            .await
            .map_err(|source| FaultError::TraceUnavailable { index, source })?;
        Ok(local_root != game.root_claim())
    }

    /// Checks that the local trace starts from the same absolute prestate as the game.
    pub async fn validate_absolute_prestate(&self, onchain: Claim) -> Result<()> {
        let local = self
            .inner
            .provider()
            .absolute_prestate_commitment()
            .await
            .map_err(|source| FaultError::TraceUnavailable { index: 0, source })?;
        if local != onchain {
            return Err(ClaimInconsistency::AbsolutePrestateMismatch { local, onchain }.into());
        }
        Ok(())
    }
}
