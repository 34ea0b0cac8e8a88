//! This module holds traits related to the [FaultDisputeGame]

use crate::{
    FaultClaim, FaultDisputeState, FaultSolverResponse, PreimageOracleData, Result, TraceIndex,
};
use alloy_primitives::Bytes;
use moria_primitives::{Claim, DisputeGame};

/// A [FaultDisputeGame] is a [DisputeGame] that is played over a FaultVM backend. This
/// trait extends the [DisputeGame] trait with functionality that is specific to the
/// fault [moria_primitives::GameType] variants.
pub trait FaultDisputeGame: DisputeGame {
    /// Returns the claims of the game, ordered by their on-chain index.
    fn state(&self) -> &[FaultClaim];

    /// Returns the maximum depth of the game's position tree.
    fn max_depth(&self) -> u8;
}

/// A [FaultClaimSolver] is a solver that finds the correct response to a given [FaultClaim]
/// within a [FaultDisputeGame].
#[async_trait::async_trait]
pub trait FaultClaimSolver<P: TraceProvider> {
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
    ) -> Result<FaultSolverResponse>;

    /// Returns a shared reference to the [TraceProvider] that the solver uses to fetch the state of the VM and
    /// commitments to it.
    fn provider(&self) -> &P;
}

/// The materials a [TraceProvider] returns for executing a single step on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderStepData {
    /// The unhashed state the step starts from.
    pub prestate: Bytes,
    /// Auxiliary proof data the on-chain step verifier needs.
    pub proof: Bytes,
    /// Preimage that must be loaded into the oracle before the step, if the step reads one.
    pub oracle_data: Option<PreimageOracleData>,
}

/// A [TraceProvider] supplies commitments to, and step materials for, any element of the
/// execution trace of one VM backend.
#[async_trait::async_trait]
pub trait TraceProvider: Send + Sync {
    /// Returns the commitment to the trace element at `index`. This is the hash of the
    /// element's preimage, with the VM status in its first byte.
    async fn get(&self, index: TraceIndex) -> anyhow::Result<Claim>;

    /// Returns the materials to execute the step that transitions into trace element `index`.
    /// The prestate is the preimage of the element at `index - 1`.
    async fn step_data(&self, index: TraceIndex) -> anyhow::Result<ProviderStepData>;

    /// Returns the raw state that transitions into the trace element at index `0`.
    async fn absolute_prestate(&self) -> anyhow::Result<Bytes>;

    /// Returns the commitment to [TraceProvider::absolute_prestate].
    async fn absolute_prestate_commitment(&self) -> anyhow::Result<Claim>;
}

/// An [OracleUpdater] loads preimages into the on-chain preimage oracle.
#[async_trait::async_trait]
pub trait OracleUpdater: Send + Sync {
    /// Loads `data` into the oracle. Returns once the update has landed.
    async fn update_oracle(&self, data: &PreimageOracleData) -> anyhow::Result<()>;
}

/// The [ChessClock] trait defines the interface of a single side of a chess clock at a given state in time.
pub trait ChessClock {
    /// Returns the seconds elapsed on the chess clock in seconds when it was last stopped.
    fn duration(&self) -> u64;

    /// Returns the timestamp of when the chess clock was last stopped.
    fn timestamp(&self) -> u64;
}
