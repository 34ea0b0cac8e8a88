//! Holds the response type for a [crate::FaultDisputeGame]

use crate::{FaultClaim, StepData};

/// The [FaultSolverResponse] enum describes the response that a solver should
/// return when asked to make a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultSolverResponse {
    /// A response indicating that the proper move is to attack (`true`) or defend (`false`)
    /// the claim at the given index with the given counter claim.
    Move(bool, usize, FaultClaim),
    /// A response indicating that the proper move is to skip the claim at the given index.
    Skip(usize),
    /// A response indicating that the proper move is to perform a VM step against a leaf claim.
    Step(StepData),
}

impl FaultSolverResponse {
    /// Returns the index of the claim that the response acts upon.
    pub fn claim_index(&self) -> usize {
        match self {
            FaultSolverResponse::Move(_, index, _) | FaultSolverResponse::Skip(index) => *index,
            FaultSolverResponse::Step(step) => step.claim_index,
        }
    }
}
