//! The position module holds the [Position] type, a node within the game's bisection tree.
//!
//! A node is addressed by its "generalized index": `2^{depth} + index_at_depth`. The root is
//! `1`, the left child of `g` is `2g` and the right child is `2g + 1`. The on-chain contract
//! uses the same encoding, so all arithmetic here must stay bit-exact with it.

use crate::{FaultError, Result};
use std::fmt;

/// The index of an element within the flat execution trace, i.e. at the maximum depth of the
/// tree.
pub type TraceIndex = u128;

/// The deepest level whose generalized indices fit in a [u128].
pub const MAX_POSITION_DEPTH: u8 = 127;

/// Returns the index of the most significant set bit of `x`. By convention, `msb_index(0) == 0`.
pub fn msb_index(x: u128) -> u8 {
    if x == 0 {
        return 0;
    }
    (127 - x.leading_zeros()) as u8
}

/// A [Position] is a node within the bisection tree.
///
/// Positions are plain values: every derivation returns a new [Position] and equality is by
/// `(depth, index_at_depth)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    depth: u8,
    index_at_depth: u128,
}

impl Position {
    /// The root of the bisection tree.
    pub const ROOT: Position = Position {
        depth: 0,
        index_at_depth: 0,
    };

    /// Creates a new [Position], rejecting an `index_at_depth` that does not exist at `depth`.
    pub fn new(depth: u8, index_at_depth: u128) -> Result<Self> {
        if depth > MAX_POSITION_DEPTH {
            return Err(FaultError::InvalidPosition {
                depth,
                index_at_depth,
                reason: "depth exceeds the maximum position depth",
            });
        }
        if index_at_depth >= 1u128 << depth {
            return Err(FaultError::InvalidPosition {
                depth,
                index_at_depth,
                reason: "index at depth must be less than 2^depth",
            });
        }
        Ok(Self {
            depth,
            index_at_depth,
        })
    }

    /// Decodes a [Position] from its generalized index. `0` is not a node of the tree.
    pub fn from_gindex(gindex: u128) -> Result<Self> {
        if gindex == 0 {
            return Err(FaultError::InvalidPosition {
                depth: 0,
                index_at_depth: 0,
                reason: "the generalized index 0 does not address a node",
            });
        }
        let depth = msb_index(gindex);
        Ok(Self {
            depth,
            index_at_depth: gindex - (1 << depth),
        })
    }

    /// Returns the generalized index of the [Position]: `2^{depth} + index_at_depth`.
    pub fn to_gindex(&self) -> u128 {
        (1u128 << self.depth) + self.index_at_depth
    }

    /// Returns the depth of the [Position] within the tree.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Returns the index of the [Position] among the nodes at its depth.
    pub fn index_at_depth(&self) -> u128 {
        self.index_at_depth
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0 && self.index_at_depth == 0
    }

    /// Returns the parent [Position], or [None] for the root.
    pub fn parent(&self) -> Option<Self> {
        (!self.is_root()).then(|| Self {
            depth: self.depth - 1,
            index_at_depth: self.index_at_depth >> 1,
        })
    }

    /// Returns the [Position] of an attack against this one. Attacking is always legal.
    pub fn attack(&self) -> Self {
        Self {
            depth: self.depth + 1,
            index_at_depth: self.index_at_depth << 1,
        }
    }

    /// Returns `true` if a defense against this [Position] lands inside the tree, i.e. this is
    /// not the right-most node at its depth.
    pub fn can_defend(&self) -> bool {
        self.index_at_depth < (1u128 << self.depth) - 1
    }

    /// Returns the [Position] of a defense of this one.
    ///
    /// The defense skips the right sibling of the attack position so that its trace index lies
    /// strictly to the right of this position's trace index.
    pub fn defend(&self) -> Result<Self> {
        if !self.can_defend() {
            return Err(FaultError::InvalidPosition {
                depth: self.depth,
                index_at_depth: self.index_at_depth,
                reason: "cannot defend the right-most position at its depth",
            });
        }
        Ok(Self {
            depth: self.depth + 1,
            index_at_depth: (self.index_at_depth << 1) + 2,
        })
    }

    /// Returns the relative [Position] for an attack or a defense against this one.
    pub fn make_move(&self, is_attack: bool) -> Result<Self> {
        if is_attack {
            Ok(self.attack())
        } else {
            self.defend()
        }
    }

    /// Returns `true` if this [Position] can only be reached from a parent at
    /// `parent_index_at_depth` through a defense.
    pub fn defends_parent(&self, parent_index_at_depth: u128) -> bool {
        self.index_at_depth == (parent_index_at_depth << 1) + 2
    }

    /// Returns the right-most leaf [Position] beneath this one in a tree of `max_depth`.
    pub fn right_index(&self, max_depth: u8) -> Self {
        Self {
            depth: max_depth,
            index_at_depth: self.trace_index(max_depth),
        }
    }

    /// Returns the trace index that this [Position] commits to in a tree of `max_depth`: the
    /// index of the right-most leaf of its subtree.
    ///
    /// The position must not be deeper than `max_depth`.
    pub fn trace_index(&self, max_depth: u8) -> TraceIndex {
        debug_assert!(self.depth <= max_depth, "position deeper than the tree");
        let remaining = max_depth.saturating_sub(self.depth);
        ((self.index_at_depth + 1) << remaining) - 1
    }
}

impl TryFrom<u128> for Position {
    type Error = FaultError;

    fn try_from(gindex: u128) -> Result<Self> {
        Self::from_gindex(gindex)
    }
}

impl From<Position> for u128 {
    fn from(position: Position) -> Self {
        position.to_gindex()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gindex {} (depth {}, index {})",
            self.to_gindex(),
            self.depth,
            self.index_at_depth
        )
    }
}
