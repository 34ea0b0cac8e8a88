//! Step preparation: turning a leaf disagreement into the payload of an on-chain step.

use crate::{FaultError, OracleUpdater, PreimageOracleData, Result};
use alloy_primitives::Bytes;

/// The [StepCallData] struct is the exact payload of an on-chain single step against an
/// existing claim. It is ABI-encoded by the transaction layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCallData {
    /// The on-chain index of the claim being stepped against.
    pub claim_index: usize,
    pub is_attack: bool,
    /// The unhashed prestate of the step.
    pub state_data: Bytes,
    pub proof: Bytes,
}

/// The [StepData] struct holds everything needed to step against a leaf claim, including a
/// preimage that may have to be loaded into the oracle first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepData {
    pub claim_index: usize,
    pub is_attack: bool,
    pub prestate: Bytes,
    pub proof: Bytes,
    pub oracle_data: Option<PreimageOracleData>,
}

impl StepData {
    /// Returns `true` if a preimage must be loaded before the step can be submitted.
    pub fn requires_preload(&self) -> bool {
        self.oracle_data.is_some()
    }

    /// Loads the step's preimage (if any) through `updater`, then returns the call data for the
    /// step. No call data is produced if the preload fails: a step submitted without its
    /// preimage reverts.
    pub async fn preload<O>(self, updater: &O) -> Result<StepCallData>
    where
        O: OracleUpdater + ?Sized,
    {
        if let Some(oracle_data) = &self.oracle_data {
            tracing::debug!(
                target: "fault-step",
                "Loading preimage for step against claim {} (local: {}, offset: {})",
                self.claim_index,
                oracle_data.is_local,
                oracle_data.oracle_offset
            );
            updater
                .update_oracle(oracle_data)
                .await
                .map_err(FaultError::OraclePreloadFailed)?;
        }
        Ok(self.into_call_data())
    }

    fn into_call_data(self) -> StepCallData {
        StepCallData {
            claim_index: self.claim_index,
            is_attack: self.is_attack,
            state_data: self.prestate,
            proof: self.proof,
        }
    }
}
