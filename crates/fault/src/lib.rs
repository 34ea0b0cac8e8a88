//! Move selection for the OP Stack's `FaultDisputeGame`.
//!
//! A [FaultDisputeState] is built from the on-chain claim list and validated as a game tree.
//! The [FaultDisputeSolver] then asks its [FaultClaimSolver] for the response to every claim,
//! using a [TraceProvider] as the source of truth for the execution trace. Leaf responses are
//! [StepData], which is turned into call data once any required preimage has been loaded
//! through an [OracleUpdater].

mod error;
pub use error::{ClaimInconsistency, FaultError, Result};

mod position;
pub use position::{msb_index, Position, TraceIndex, MAX_POSITION_DEPTH};

mod clock;
pub use clock::{pack_clock, Clock};

mod types;
pub use types::{ClaimData, ClaimRecord, FaultClaim, VMStatus};

mod preimage;
pub use preimage::{PreimageOracleData, LOCAL_KEY_TYPE};

mod traits;
pub use traits::{
    ChessClock, FaultClaimSolver, FaultDisputeGame, OracleUpdater, ProviderStepData,
    TraceProvider,
};

mod step;
pub use step::{StepCallData, StepData};

mod response;
pub use response::FaultSolverResponse;

pub mod rules;

mod state;
pub use state::FaultDisputeState;

mod snapshot;
pub use snapshot::FaultGameView;

mod config;
pub use config::FaultGameConfig;

mod solver;
pub use solver::FaultDisputeSolver;

pub mod solvers;
pub use solvers::HonestClaimSolver;

pub mod providers;

#[cfg(test)]
mod mocks;
