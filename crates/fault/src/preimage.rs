//! Preimage data that must be loaded into the on-chain preimage oracle before a step that
//! reads it can be executed.

use alloy_primitives::{Bytes, U256};

/// The key type byte of a local preimage key.
pub const LOCAL_KEY_TYPE: u8 = 1;

/// The number of bytes of the length prefix on [PreimageOracleData::oracle_data].
const SIZE_PREFIX_LEN: usize = 8;

/// The [PreimageOracleData] struct holds a preimage in the exact layout the on-chain oracle
/// expects. The key and data bytes are never re-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreimageOracleData {
    /// Whether the key addresses a local (game-specific) preimage.
    pub is_local: bool,
    /// The oracle key: a type byte followed by the big-endian identifier.
    pub oracle_key: Bytes,
    /// The oracle data: an 8 byte length prefix followed by the preimage.
    pub oracle_data: Bytes,
    /// The offset into the preimage that the step reads from.
    pub oracle_offset: u32,
}

impl PreimageOracleData {
    pub fn new(oracle_key: Bytes, oracle_data: Bytes, oracle_offset: u32) -> Self {
        Self {
            is_local: oracle_key.first() == Some(&LOCAL_KEY_TYPE),
            oracle_key,
            oracle_data,
            oracle_offset,
        }
    }

    /// Returns the key type selector, the first byte of the key.
    pub fn key_type(&self) -> Option<u8> {
        self.oracle_key.first().copied()
    }

    /// Returns the key identifier: the key without its type byte, as a big-endian integer.
    /// [None] if the key is empty or the identifier is wider than 32 bytes.
    pub fn ident(&self) -> Option<U256> {
        let ident = self.oracle_key.get(1..)?;
        U256::try_from_be_slice(ident)
    }

    /// Returns the raw preimage without its length prefix.
    pub fn preimage_without_size(&self) -> &[u8] {
        self.oracle_data.get(SIZE_PREFIX_LEN..).unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::hex;

    #[test]
    fn local_key() {
        let key = Bytes::from(
            hex!("0100000000000000000000000000000000000000000000000000000000000002").to_vec(),
        );
        let data = Bytes::from(hex!("0000000000000003c0ffee").to_vec());
        let oracle = PreimageOracleData::new(key, data, 4);

        assert!(oracle.is_local);
        assert_eq!(oracle.key_type(), Some(1));
        assert_eq!(oracle.ident(), Some(U256::from(2)));
        assert_eq!(oracle.preimage_without_size(), &hex!("c0ffee"));
        assert_eq!(oracle.oracle_offset, 4);
    }

    #[test]
    fn global_key() {
        let mut key = [0xffu8; 32];
        key[0] = 2;
        let oracle = PreimageOracleData::new(Bytes::from(key.to_vec()), Bytes::new(), 0);

        assert!(!oracle.is_local);
        assert_eq!(oracle.key_type(), Some(2));
        assert_eq!(oracle.ident(), Some(U256::MAX >> 8));
        assert!(oracle.preimage_without_size().is_empty());
    }

    #[test]
    fn empty_key() {
        let oracle = PreimageOracleData::new(Bytes::new(), Bytes::new(), 0);
        assert!(!oracle.is_local);
        assert_eq!(oracle.key_type(), None);
        assert_eq!(oracle.ident(), None);
    }
}
