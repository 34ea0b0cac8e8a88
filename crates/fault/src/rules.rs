//! Validation rules applied to an on-chain claim list before it becomes a
//! [crate::FaultDisputeState].
//!
//! Every rule hands the [RecordSet] back untouched when it holds, so the rules compose with
//! [moria_primitives::chain_rules].

use crate::{ClaimInconsistency, ClaimRecord, FaultError, Position, Result};
use moria_primitives::Claim;
use std::collections::{hash_map::Entry, HashMap};

/// A borrowed on-chain claim list together with the depth of the tree it lives in.
#[derive(Debug, Clone, Copy)]
pub struct RecordSet<'a> {
    pub records: &'a [ClaimRecord],
    pub max_depth: u8,
}

/// The first record, and only the first record, is the root claim.
pub fn root_first(set: RecordSet<'_>) -> Result<RecordSet<'_>> {
    match set.records.first() {
        Some(root) if root.is_root() => Ok(set),
        _ => Err(ClaimInconsistency::MissingRoot.into()),
    }
}

/// Every non-root record points at an earlier record.
pub fn parents_resolve(set: RecordSet<'_>) -> Result<RecordSet<'_>> {
    for (index, record) in set.records.iter().enumerate().skip(1) {
        if record.parent_index as usize >= index {
            return Err(ClaimInconsistency::UnresolvedParent {
                index,
                parent_index: record.parent_index,
            }
            .into());
        }
    }
    Ok(set)
}

/// Every position is a node of the tree, and the root claim sits at the root position.
pub fn positions_in_tree(set: RecordSet<'_>) -> Result<RecordSet<'_>> {
    for record in set.records {
        let position = record.position()?;
        if position.depth() > set.max_depth {
            return Err(FaultError::InvalidPosition {
                depth: position.depth(),
                index_at_depth: position.index_at_depth(),
                reason: "position is deeper than the game tree",
            });
        }
        if record.is_root() && !position.is_root() {
            return Err(FaultError::InvalidPosition {
                depth: position.depth(),
                index_at_depth: position.index_at_depth(),
                reason: "the root claim must be at the root position",
            });
        }
    }
    Ok(set)
}

/// Every non-root position is an attack or a defense of its parent's position.
pub fn legal_moves(set: RecordSet<'_>) -> Result<RecordSet<'_>> {
    for (index, record) in set.records.iter().enumerate().skip(1) {
        let parent = set.records[record.parent_index as usize].position()?;
        let position = record.position()?;
        let is_attack = position == parent.attack();
        let is_defense = parent.defend().map_or(false, |d| d == position);
        if !is_attack && !is_defense {
            return Err(ClaimInconsistency::IllegalMove {
                index,
                gindex: record.position,
                parent_gindex: parent.to_gindex(),
            }
            .into());
        }
    }
    Ok(set)
}

/// No two records occupy the same position with different values.
pub fn unique_values(set: RecordSet<'_>) -> Result<RecordSet<'_>> {
    let mut seen: HashMap<u128, Claim> = HashMap::with_capacity(set.records.len());
    for record in set.records {
        match seen.entry(record.position) {
            Entry::Occupied(existing) if *existing.get() != record.value => {
                return Err(ClaimInconsistency::ConflictingClaims {
                    gindex: record.position,
                    existing: *existing.get(),
                    conflicting: record.value,
                }
                .into());
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(record.value);
            }
        }
    }
    Ok(set)
}

/// Returns the positions of all records, in order. Only valid on a checked [RecordSet].
pub(crate) fn positions(set: RecordSet<'_>) -> Result<Vec<Position>> {
    set.records.iter().map(ClaimRecord::position).collect()
}
