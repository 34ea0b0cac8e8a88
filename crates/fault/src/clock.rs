//! The clock module holds the [Clock] type, one side of a game's chess clock as stored on-chain.

use crate::ChessClock;

/// A packed chess clock: the elapsed duration in the high 64 bits and the timestamp at which
/// the clock was last stopped in the low 64 bits.
pub type Clock = u128;

impl ChessClock for Clock {
    fn duration(&self) -> u64 {
        (self >> 64) as u64
    }

    fn timestamp(&self) -> u64 {
        *self as u64
    }
}

/// Packs a `duration` and `timestamp` into a [Clock].
pub fn pack_clock(duration: u64, timestamp: u64) -> Clock {
    ((duration as u128) << 64) | timestamp as u128
}
