//! Error types returned by the fault dispute game core.

use crate::TraceIndex;
use moria_primitives::Claim;
use thiserror::Error;

/// The [FaultError] enum covers every failure the solver and the claim tree can surface.
#[derive(Debug, Error)]
pub enum FaultError {
    /// A position that does not exist in the game tree was constructed or requested.
    #[error("invalid position (depth {depth}, index at depth {index_at_depth}): {reason}")]
    InvalidPosition {
        depth: u8,
        index_at_depth: u128,
        reason: &'static str,
    },
    /// The trace provider could not produce data for the requested trace index.
    #[error("trace unavailable at index {index}")]
    TraceUnavailable {
        index: TraceIndex,
        #[source]
        source: anyhow::Error,
    },
    /// The observed claims contradict each other or the local view of the game.
    #[error(transparent)]
    ClaimInconsistency(#[from] ClaimInconsistency),
    /// Loading a preimage into the on-chain oracle failed. The dependent step must not be sent.
    #[error("preimage oracle preload failed")]
    OraclePreloadFailed(#[source] anyhow::Error),
    /// No claim exists at the requested index of the state.
    #[error("no claim at index {0}")]
    ClaimNotFound(usize),
    /// The game configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The [ClaimInconsistency] enum describes claim sets that must not be acted upon. None of
/// these are resolved automatically; they may indicate an adversarial or stale chain view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimInconsistency {
    /// Two claims occupy the same position with different values.
    #[error("conflicting claims at gindex {gindex}: {existing} != {conflicting}")]
    ConflictingClaims {
        gindex: u128,
        existing: Claim,
        conflicting: Claim,
    },
    /// The claim list is empty or does not start with the root claim.
    #[error("the claim list does not start with a root claim")]
    MissingRoot,
    /// A claim's parent index does not resolve to an earlier claim.
    #[error("claim {index} references unresolved parent {parent_index}")]
    UnresolvedParent { index: usize, parent_index: u32 },
    /// A claim's position is neither the attack nor the defense of its parent's position.
    #[error("claim {index} at gindex {gindex} is not a legal move against gindex {parent_gindex}")]
    IllegalMove {
        index: usize,
        gindex: u128,
        parent_gindex: u128,
    },
    /// A leaf claim was countered on-chain even though the local trace agrees with it.
    #[error("leaf claim {index} is countered on-chain but agrees with the local trace")]
    CounteredAgreedLeaf { index: usize },
    /// The local absolute prestate does not match the one the game was created with.
    #[error("absolute prestate mismatch: local {local}, on-chain {onchain}")]
    AbsolutePrestateMismatch { local: Claim, onchain: Claim },
    /// A step was requested against a claim that has not been submitted on-chain.
    #[error("claim at gindex {gindex} has no on-chain index")]
    NotOnChain { gindex: u128 },
}

/// A [Result] alias for fallible operations of this crate.
pub type Result<T> = std::result::Result<T, FaultError>;
