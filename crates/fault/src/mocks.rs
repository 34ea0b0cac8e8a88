//! Test doubles shared by the unit tests of this crate.

use crate::{
    ClaimRecord, OracleUpdater, PreimageOracleData, ProviderStepData, TraceIndex, TraceProvider,
};
use alloy_primitives::{Address, Bytes, U128};
use anyhow::{anyhow, Result};
use moria_primitives::Claim;
use std::{collections::HashSet, sync::Mutex};

/// Builds an uncountered on-chain claim record with zeroed metadata.
pub(crate) fn record(parent_index: u32, gindex: u128, value: Claim) -> ClaimRecord {
    ClaimRecord {
        parent_index,
        countered_by: Address::ZERO,
        claimant: Address::ZERO,
        bond: U128::ZERO,
        value,
        position: gindex,
        clock: 0,
    }
}

/// Installs a test writer subscriber so solver logs show up in failing test output.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// An [OracleUpdater] that records every update it receives.
#[derive(Debug, Default)]
pub(crate) struct MockOracleUpdater {
    updates: Mutex<Vec<PreimageOracleData>>,
    fail: bool,
}

impl MockOracleUpdater {
    /// An updater whose every update is rejected.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn updates(&self) -> Vec<PreimageOracleData> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl OracleUpdater for MockOracleUpdater {
    async fn update_oracle(&self, data: &PreimageOracleData) -> Result<()> {
        if self.fail {
            return Err(anyhow!("oracle rejected the update"));
        }
        self.updates.lock().unwrap().push(data.clone());
        Ok(())
    }
}

/// A [TraceProvider] that wraps another one, failing for selected trace indices and optionally
/// attaching preimage data to every step.
pub(crate) struct MockTraceProvider<P: TraceProvider> {
    inner: P,
    missing: HashSet<TraceIndex>,
    oracle_data: Option<PreimageOracleData>,
}

impl<P: TraceProvider> MockTraceProvider<P> {
    pub(crate) fn new(inner: P) -> Self {
        Self {
            inner,
            missing: HashSet::new(),
            oracle_data: None,
        }
    }

    /// Makes every request for trace index `index` fail.
    pub(crate) fn without_index(mut self, index: TraceIndex) -> Self {
        self.missing.insert(index);
        self
    }

    pub(crate) fn with_oracle_data(mut self, oracle_data: PreimageOracleData) -> Self {
        self.oracle_data = Some(oracle_data);
        self
    }

    fn check(&self, index: TraceIndex) -> Result<()> {
        if self.missing.contains(&index) {
            return Err(anyhow!("trace index {index} is unavailable"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<P: TraceProvider> TraceProvider for MockTraceProvider<P> {
    async fn get(&self, index: TraceIndex) -> Result<Claim> {
        self.check(index)?;
        self.inner.get(index).await
    }

    async fn step_data(&self, index: TraceIndex) -> Result<ProviderStepData> {
        self.check(index)?;
        let mut data = self.inner.step_data(index).await?;
        if self.oracle_data.is_some() {
            data.oracle_data = self.oracle_data.clone();
        }
        Ok(data)
    }

    async fn absolute_prestate(&self) -> Result<Bytes> {
        self.inner.absolute_prestate().await
    }

    async fn absolute_prestate_commitment(&self) -> Result<Claim> {
        self.inner.absolute_prestate_commitment().await
    }
}
