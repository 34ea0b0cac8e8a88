//! This module contains the implementation of the [crate::TraceProvider] trait for the mock Alphabet VM.

use crate::{ProviderStepData, TraceIndex, TraceProvider, VMStatus};
use alloy_primitives::{keccak256, Bytes, U256};
use alloy_sol_types::{sol, SolType};
use anyhow::{anyhow, Result};
use moria_primitives::Claim;

type AlphabetClaimConstruction = sol! { tuple(uint256, uint256) };

/// The [AlphabetTraceProvider] is a [TraceProvider] that provides the correct trace for the mock
/// Alphabet VM. The state at trace index `i` is the letter `i + 1` places after the absolute
/// prestate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphabetTraceProvider {
    /// The absolute prestate of the alphabet VM is the setup state. This will be the ascii
    /// representation of letter prior to the first in the honest alphabet trace.
    pub absolute_prestate: [u8; 32],
    /// The maximum depth of the dispute game position tree.
    pub max_depth: u8,
}

impl AlphabetTraceProvider {
    pub fn new(absolute_prestate: u64, max_depth: u8) -> Self {
        Self {
            absolute_prestate: U256::from(absolute_prestate).to_be_bytes(),
            max_depth,
        }
    }

    /// Returns the VM state at trace index `index`.
    pub fn state_at(&self, index: TraceIndex) -> Result<U256> {
        if index >> self.max_depth != 0 {
            return Err(anyhow!(
                "trace index {index} is beyond the trace of depth {}",
                self.max_depth
            ));
        }
        Ok(U256::from_be_bytes(self.absolute_prestate) + U256::from(index) + U256::from(1))
    }

    /// Returns the preimage of the commitment at trace index `index`.
    fn preimage(&self, index: TraceIndex) -> Result<Bytes> {
        let state = self.state_at(index)?;
        Ok(AlphabetClaimConstruction::abi_encode(&(U256::from(index), state)).into())
    }
}

#[async_trait::async_trait]
impl TraceProvider for AlphabetTraceProvider {
    async fn get(&self, index: TraceIndex) -> Result<Claim> {
        let mut state_hash = keccak256(self.preimage(index)?);
        state_hash[0] = VMStatus::Invalid as u8;
        Ok(state_hash)
    }

    async fn step_data(&self, index: TraceIndex) -> Result<ProviderStepData> {
        let prestate = match index {
            0 => self.absolute_prestate().await?,
            _ => self.preimage(index - 1)?,
        };
        // The step into `index` is only meaningful if `index` itself is part of the trace.
        self.state_at(index)?;

        Ok(ProviderStepData {
            prestate,
            proof: Bytes::new(),
            oracle_data: None,
        })
    }

    async fn absolute_prestate(&self) -> Result<Bytes> {
        Ok(Bytes::from(self.absolute_prestate.to_vec()))
    }

    async fn absolute_prestate_commitment(&self) -> Result<Claim> {
        let prestate = U256::from_be_bytes(self.absolute_prestate);
        let mut prestate_hash = keccak256(<sol!(uint256)>::abi_encode(&prestate));
        prestate_hash[0] = VMStatus::Unfinished as u8;
        Ok(prestate_hash)
    }
}
