//! Implementation of the [FaultClaimSolver] trait for an honest participant.

use crate::{
    ClaimData, ClaimInconsistency, FaultClaim, FaultClaimSolver, FaultDisputeState, FaultError,
    FaultSolverResponse, Position, ProviderStepData, Result, StepData, TraceIndex, TraceProvider,
};
use alloy_primitives::Bytes;
use moria_primitives::Claim;

/// The honest claim solver counters every claim on the opposing side of the game that
/// disagrees with its [TraceProvider], and keeps bisecting past the opposing claims that agree
/// with it.
pub struct HonestClaimSolver<P: TraceProvider> {
    provider: P,
}

#[async_trait::async_trait]
impl<P> FaultClaimSolver<P> for HonestClaimSolver<P>
where
    P: TraceProvider,
{
    /// Finds the best move against the claim at `claim_index` in a given [FaultDisputeState].
    ///
    /// ### Takes
    /// - `world`: The [FaultDisputeState] snapshot to solve against.
    /// - `claim_index`: The index of the claim within the state.
    /// - `attacking_root`: A boolean indicating whether or not the solver is attacking the root.
    ///
    /// ### Returns
    /// - [FaultSolverResponse] or [Err]: The best move against the claim.
    async fn solve_claim(
        &self,
        world: &FaultDisputeState,
        claim_index: usize,
        attacking_root: bool,
    ) -> Result<FaultSolverResponse> {
        let max_depth = world.max_depth();
        let claim = world.claim(claim_index)?;
        let position = claim.position();

        // Claims on the solver's own side of the tree are never countered.
        if position.depth() % 2 == attacking_root as u8 {
            return Ok(FaultSolverResponse::Skip(claim_index));
        }

        let trace_index = position.trace_index(max_depth);
        let local_agree = self.fetch_value(trace_index).await? == claim.value();
        tracing::debug!(
            target: "fault-solver",
            "Claim {} at {} commits to trace index {} (agree: {})",
            claim_index,
            position,
            trace_index,
            local_agree
        );

        if position.depth() == max_depth {
            return self
                .step(claim_index, claim, trace_index, local_agree, max_depth)
                .await;
        }

        // A disagreement at the claim's trace index means the first divergent trace element
        // lies at or before it, so the solver bisects left. An agreed claim is continued to the
        // right, unless it is the root or the right-most claim at its depth.
        let is_attack = !local_agree;
        if !is_attack && (claim.is_root() || !position.can_defend()) {
            return Ok(FaultSolverResponse::Skip(claim_index));
        }

        let counter = self
            .counter_claim(claim, position.make_move(is_attack)?, max_depth)
            .await?;
        Ok(FaultSolverResponse::Move(is_attack, claim_index, counter))
    }

    fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> HonestClaimSolver<P>
where
    P: TraceProvider,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Builds the step against the leaf claim at `claim_index`.
    ///
    /// The step direction follows the local opinion of the leaf, not whether the leaf defends
    /// its parent: a disagreed leaf is attacked by executing the step into its own trace index,
    /// and an agreed leaf is defended by executing the step out of it, into the next trace index.
    async fn step(
        &self,
        claim_index: usize,
        claim: &FaultClaim,
        trace_index: TraceIndex,
        local_agree: bool,
        max_depth: u8,
    ) -> Result<FaultSolverResponse> {
        if claim.countered {
            if local_agree {
                // Only a successful step counters a leaf, and a step cannot succeed against a
                // claim the local trace agrees with. The local view is stale.
                tracing::warn!(
                    target: "fault-solver",
                    "Leaf claim {} is countered on-chain but agrees with the local trace",
                    claim_index
                );
                return Err(ClaimInconsistency::CounteredAgreedLeaf { index: claim_index }.into());
            }
            return Ok(FaultSolverResponse::Skip(claim_index));
        }

        let contract_index = claim.contract_index.ok_or(ClaimInconsistency::NotOnChain {
            gindex: claim.position().to_gindex(),
        })?;

        let is_attack = !local_agree;
        let ProviderStepData {
            prestate,
            proof,
            oracle_data,
        } = if is_attack && trace_index == 0 {
            // There is no trace element before the first one; the step starts from the
            // absolute prestate.
            ProviderStepData {
                prestate: self.fetch_absolute_prestate().await?,
                proof: Bytes::new(),
                oracle_data: None,
            }
        } else if is_attack {
            self.fetch_step_data(trace_index).await?
        } else {
            let next_index = trace_index + 1;
            if next_index >> max_depth != 0 {
                tracing::debug!(
                    target: "fault-solver",
                    "Leaf claim {} commits to the last trace element; there is no step to defend it with",
                    claim_index
                );
                return Ok(FaultSolverResponse::Skip(claim_index));
            }
            self.fetch_step_data(next_index).await?
        };

        tracing::info!(
            target: "fault-solver",
            "Stepping against leaf claim {} (attack: {}, defends parent: {}, preimage: {})",
            contract_index,
            is_attack,
            claim.defends_parent(),
            oracle_data.is_some()
        );
        Ok(FaultSolverResponse::Step(StepData {
            claim_index: contract_index,
            is_attack,
            prestate,
            proof,
            oracle_data,
        }))
    }

    /// Builds the local counter claim at `position` against `parent`.
    async fn counter_claim(
        &self,
        parent: &FaultClaim,
        position: Position,
        max_depth: u8,
    ) -> Result<FaultClaim> {
        let value = self.fetch_value(position.trace_index(max_depth)).await?;
        Ok(FaultClaim::new_move(ClaimData::new(value, position), parent))
    }

    /// Fetches the commitment at `index` from the [TraceProvider].
    #[inline]
    async fn fetch_value(&self, index: TraceIndex) -> Result<Claim> {
        self.provider
            .get(index)
            .await
            .map_err(|source| FaultError::TraceUnavailable { index, source })
    }

    #[inline]
    async fn fetch_step_data(&self, index: TraceIndex) -> Result<ProviderStepData> {
        self.provider
            .step_data(index)
            .await
            .map_err(|source| FaultError::TraceUnavailable { index, source })
    }

    #[inline]
    async fn fetch_absolute_prestate(&self) -> Result<Bytes> {
        self.provider
            .absolute_prestate()
            .await
            .map_err(|source| FaultError::TraceUnavailable { index: 0, source })
    }
}
