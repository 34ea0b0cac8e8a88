//! This module contains the in-memory representation of a [crate::FaultDisputeGame]'s state

use crate::{
    rules::{self, RecordSet},
    ClaimData, ClaimRecord, FaultClaim, FaultDisputeGame, FaultError, Position, Result,
    MAX_POSITION_DEPTH,
};
use moria_primitives::{chain_rules, Claim, DisputeGame, GameStatus};

/// the [FaultDisputeState] struct holds the in-memory representation of a
/// [crate::FaultDisputeGame]'s state as well as its root claim and
/// local status.
///
/// A state is an immutable snapshot of the chain. When the chain moves on, a new state is built
/// from the fresh claim list and replaces this one (see [crate::FaultGameView]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultDisputeState {
    /// The claims of the game, indexed by their on-chain index. Each claim carries a copy of its
    /// parent's data, so the tree is stored without any references between claims.
    claims: Vec<FaultClaim>,
    /// The status of the dispute game.
    status: GameStatus,
    /// The max depth of the position tree.
    max_depth: u8,
}

impl FaultDisputeState {
    /// Builds a [FaultDisputeState] from the on-chain claim list.
    ///
    /// The list is rejected if it is not a well formed game tree: it must start with the root
    /// claim, every parent must resolve to an earlier claim, every position must be a legal
    /// move against its parent within `max_depth`, and no two claims may commit to different
    /// values at the same position. `max_depth` must be within `1..=MAX_POSITION_DEPTH`.
    pub fn try_new(records: &[ClaimRecord], status: GameStatus, max_depth: u8) -> Result<Self> {
        if max_depth == 0 || max_depth > MAX_POSITION_DEPTH {
            return Err(FaultError::InvalidConfig(format!(
                "max depth must be within 1..={MAX_POSITION_DEPTH}, got {max_depth}"
            )));
        }
        let set = chain_rules!(
            RecordSet { records, max_depth },
            rules::root_first,
            rules::parents_resolve,
            rules::positions_in_tree,
            rules::legal_moves,
            rules::unique_values
        )?;
        let positions = rules::positions(set)?;

        let claims = records
            .iter()
            .zip(&positions)
            .enumerate()
            .map(|(index, (record, position))| {
                let data = ClaimData::new(record.value, *position);
                let (parent, parent_contract_index) = if record.is_root() {
                    (data, None)
                } else {
                    let parent_index = record.parent_index as usize;
                    let parent = ClaimData::new(
                        records[parent_index].value,
                        positions[parent_index],
                    );
                    (parent, Some(parent_index))
                };

                FaultClaim {
                    data,
                    countered: record.countered(),
                    clock: record.clock,
                    parent,
                    contract_index: Some(index),
                    parent_contract_index,
                }
            })
            .collect();

        Ok(Self {
            claims,
            status,
            max_depth,
        })
    }

    /// Returns the claims of the game, ordered by their on-chain index.
    pub fn claims(&self) -> &[FaultClaim] {
        &self.claims
    }

    /// Returns the claim at `index`.
    pub fn claim(&self, index: usize) -> Result<&FaultClaim> {
        self.claims.get(index).ok_or(FaultError::ClaimNotFound(index))
    }

    /// Returns the root claim.
    pub fn root(&self) -> &FaultClaim {
        // `try_new` rejects claim lists without a root.
        &self.claims[0]
    }

    /// Returns the claims that respond directly to the claim at `index`, with their indices.
    pub fn children(&self, index: usize) -> impl Iterator<Item = (usize, &FaultClaim)> {
        self.claims
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.parent_contract_index == Some(index))
    }

    /// Returns the claim at `position`, if any.
    pub fn claim_at(&self, position: Position) -> Option<(usize, &FaultClaim)> {
        self.claims
            .iter()
            .enumerate()
            .find(|(_, c)| c.position() == position)
    }

    /// Returns the `(gindex, value)` pair of every claim, in order. This is the information an
    /// external checker needs to compare the game against another source of truth.
    pub fn claim_values(&self) -> impl Iterator<Item = (u128, Claim)> + '_ {
        self.claims
            .iter()
            .map(|c| (c.position().to_gindex(), c.value()))
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }
}

impl DisputeGame for FaultDisputeState {
    fn root_claim(&self) -> Claim {
        self.root().value()
    }

    fn status(&self) -> &GameStatus {
        &self.status
    }
}

impl FaultDisputeGame for FaultDisputeState {
    fn state(&self) -> &[FaultClaim] {
        &self.claims
    }

    fn max_depth(&self) -> u8 {
        self.max_depth
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{mocks::record, ClaimInconsistency};
    use alloy_primitives::{Address, B256};

    const MAX_DEPTH: u8 = 4;

    fn value(byte: u8) -> Claim {
        B256::repeat_byte(byte)
    }

    /// Root, an attack on the root, a defense of that attack, and a second attack on the root.
    fn records() -> Vec<ClaimRecord> {
        vec![
            record(ClaimRecord::ROOT_PARENT, 1, value(1)),
            record(0, 2, value(2)),
            record(1, 6, value(3)),
            record(0, 2, value(2)),
        ]
    }

    #[test]
    fn builds_tree_from_records() {
        let mut records = records();
        records[2].countered_by = Address::repeat_byte(0x11);
        let state = FaultDisputeState::try_new(&records, GameStatus::InProgress, MAX_DEPTH).unwrap();

        assert_eq!(state.root_claim(), value(1));
        assert!(state.root().is_root());
        assert_eq!(state.root().parent_contract_index, None);

        let defense = state.claim(2).unwrap();
        assert_eq!(defense.contract_index, Some(2));
        assert_eq!(defense.parent_contract_index, Some(1));
        assert_eq!(defense.parent, ClaimData::new(value(2), Position::new(1, 0).unwrap()));
        assert!(defense.defends_parent());
        assert!(defense.countered);
        assert!(!state.claim(1).unwrap().countered);

        assert!(matches!(state.claim(4), Err(FaultError::ClaimNotFound(4))));
    }

    #[test]
    fn tree_queries() {
        let state = FaultDisputeState::try_new(&records(), GameStatus::InProgress, MAX_DEPTH).unwrap();

        let children: Vec<usize> = state.children(0).map(|(i, _)| i).collect();
        assert_eq!(children, vec![1, 3]);
        assert_eq!(state.children(2).count(), 0);

        let (index, claim) = state.claim_at(Position::new(2, 2).unwrap()).unwrap();
        assert_eq!((index, claim.value()), (2, value(3)));
        assert!(state.claim_at(Position::new(4, 0).unwrap()).is_none());

        let values: Vec<(u128, Claim)> = state.claim_values().collect();
        assert_eq!(values[..3], [(1, value(1)), (2, value(2)), (6, value(3))]);
    }

    #[test]
    fn rejects_out_of_range_depth() {
        let root = [record(ClaimRecord::ROOT_PARENT, 1, value(1))];
        for max_depth in [0, MAX_POSITION_DEPTH + 1, 200, u8::MAX] {
            assert!(
                matches!(
                    FaultDisputeState::try_new(&root, GameStatus::InProgress, max_depth),
                    Err(FaultError::InvalidConfig(_))
                ),
                "{max_depth}"
            );
        }
        let deepest =
            FaultDisputeState::try_new(&root, GameStatus::InProgress, MAX_POSITION_DEPTH).unwrap();
        assert_eq!(deepest.max_depth(), MAX_POSITION_DEPTH);
    }

    #[test]
    fn rejects_missing_root() {
        let err = FaultDisputeState::try_new(&[], GameStatus::InProgress, MAX_DEPTH).unwrap_err();
        assert!(matches!(
            err,
            FaultError::ClaimInconsistency(ClaimInconsistency::MissingRoot)
        ));

        let err = FaultDisputeState::try_new(&records()[1..], GameStatus::InProgress, MAX_DEPTH)
            .unwrap_err();
        assert!(matches!(
            err,
            FaultError::ClaimInconsistency(ClaimInconsistency::MissingRoot)
        ));
    }

    #[test]
    fn rejects_unresolved_parent() {
        let mut records = records();
        records[2].parent_index = 5;
        let err = FaultDisputeState::try_new(&records, GameStatus::InProgress, MAX_DEPTH).unwrap_err();
        assert!(matches!(
            err,
            FaultError::ClaimInconsistency(ClaimInconsistency::UnresolvedParent {
                index: 2,
                parent_index: 5
            })
        ));
    }

    #[test]
    fn rejects_positions_outside_tree() {
        let mut records = records();
        records[1].position = 0;
        let err = FaultDisputeState::try_new(&records, GameStatus::InProgress, MAX_DEPTH).unwrap_err();
        assert!(matches!(err, FaultError::InvalidPosition { .. }));

        let records = vec![
            record(ClaimRecord::ROOT_PARENT, 1, value(1)),
            record(0, 2, value(2)),
            record(1, 4, value(3)),
            record(2, 8, value(4)),
            record(3, 16, value(5)),
            record(4, 32, value(6)),
        ];
        let err = FaultDisputeState::try_new(&records, GameStatus::InProgress, MAX_DEPTH).unwrap_err();
        assert!(matches!(err, FaultError::InvalidPosition { depth: 5, .. }));

        let records = vec![record(ClaimRecord::ROOT_PARENT, 2, value(1))];
        let err = FaultDisputeState::try_new(&records, GameStatus::InProgress, MAX_DEPTH).unwrap_err();
        assert!(matches!(err, FaultError::InvalidPosition { depth: 1, .. }));
    }

    #[test]
    fn rejects_illegal_moves() {
        let mut records = records();
        // The root's right child can only be reached by defending the root, which is illegal.
        records[3].position = 3;
        let err = FaultDisputeState::try_new(&records, GameStatus::InProgress, MAX_DEPTH).unwrap_err();
        assert!(matches!(
            err,
            FaultError::ClaimInconsistency(ClaimInconsistency::IllegalMove {
                index: 3,
                gindex: 3,
                parent_gindex: 1
            })
        ));
    }

    #[test]
    fn rejects_conflicting_values() {
        let mut records = records();
        records[3].value = value(9);
        let err = FaultDisputeState::try_new(&records, GameStatus::InProgress, MAX_DEPTH).unwrap_err();
        match err {
            FaultError::ClaimInconsistency(ClaimInconsistency::ConflictingClaims {
                gindex,
                existing,
                conflicting,
            }) => {
                assert_eq!(gindex, 2);
                assert_eq!(existing, value(2));
                assert_eq!(conflicting, value(9));
            }
            e => panic!("unexpected error: {e}"),
        }
    }
}
