//! The types module holds the claim types of a [crate::FaultDisputeGame].

use crate::{Clock, Position, Result};
use alloy_primitives::{Address, U128};
use moria_primitives::Claim;

/// The [VMStatus] enum describes the status of a VM at a given trace index. It is committed to
/// in the first byte of every state commitment.
/// - [VMStatus::Valid]: The VM is exited with a valid status.
/// - [VMStatus::Invalid]: The VM is exited with an invalid status.
/// - [VMStatus::Panic]: The VM is exited with a panic status.
/// - [VMStatus::Unfinished]: The VM is not yet exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMStatus {
    Valid = 0,
    Invalid = 1,
    Panic = 2,
    Unfinished = 3,
}

/// The [ClaimData] struct is the core of a claim: a commitment to the trace at a [Position].
/// It must be unique within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClaimData {
    pub value: Claim,
    pub position: Position,
}

impl ClaimData {
    pub fn new(value: Claim, position: Position) -> Self {
        Self { value, position }
    }
}

/// The [FaultClaim] struct extends [ClaimData] with its relationship to the rest of the game.
///
/// The parent is held as a copy of its [ClaimData] rather than a reference, so the game can be
/// stored as a flat arena without cycles. For the root claim the `parent` field is a
/// placeholder and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultClaim {
    pub data: ClaimData,
    /// Whether the claim has been countered on-chain. Only ever updated by replacing the whole
    /// game snapshot.
    pub countered: bool,
    pub clock: Clock,
    pub parent: ClaimData,
    /// Index of the claim within the on-chain claim list; [None] until it is submitted.
    pub contract_index: Option<usize>,
    /// Index of the parent within the on-chain claim list; [None] for the root.
    pub parent_contract_index: Option<usize>,
}

impl FaultClaim {
    /// Creates a claim that has not yet been submitted on-chain, responding to `parent`.
    pub fn new_move(data: ClaimData, parent: &FaultClaim) -> Self {
        Self {
            data,
            countered: false,
            clock: 0,
            parent: parent.data,
            contract_index: None,
            parent_contract_index: parent.contract_index,
        }
    }

    pub fn value(&self) -> Claim {
        self.data.value
    }

    pub fn position(&self) -> Position {
        self.data.position
    }

    /// Returns `true` if this is the root claim of the game.
    pub fn is_root(&self) -> bool {
        self.data.position.is_root()
    }

    /// Returns `true` if the claim defends its parent (moves right) and `false` if it attacks
    /// it (moves left). Meaningless for the root claim.
    pub fn defends_parent(&self) -> bool {
        self.data
            .position
            .defends_parent(self.parent.position.index_at_depth())
    }
}

/// The [ClaimRecord] struct is a claim exactly as it is stored in the on-chain claim list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimRecord {
    /// Index of the parent record, or [u32::MAX] for the root claim.
    pub parent_index: u32,
    pub countered_by: Address,
    pub claimant: Address,
    pub bond: U128,
    pub value: Claim,
    /// The generalized index of the claim's position.
    pub position: u128,
    pub clock: Clock,
}

impl ClaimRecord {
    /// The `parent_index` of the root claim.
    pub const ROOT_PARENT: u32 = u32::MAX;

    pub fn is_root(&self) -> bool {
        self.parent_index == Self::ROOT_PARENT
    }

    pub fn countered(&self) -> bool {
        self.countered_by != Address::ZERO
    }

    /// Decodes the record's position.
    pub fn position(&self) -> Result<Position> {
        Position::from_gindex(self.position)
    }
}
