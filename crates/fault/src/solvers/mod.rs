//! This module contains implementations of the [crate::FaultClaimSolver] trait for various
//! solving methods.

mod honest;
pub use self::honest::HonestClaimSolver;
