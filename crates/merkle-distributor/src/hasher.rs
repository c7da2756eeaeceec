//! Keccak256 hasher for distribution trees

use alloy_primitives::{Address, B256, U256};
use tiny_keccak::{Hasher, Keccak};

/// Length of a packed leaf preimage: `uint256 index ‖ address account ‖ uint256 amount`
pub const LEAF_PREIMAGE_LEN: usize = 32 + 20 + 32;

/// Keccak256 hasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl Keccak256Hasher {
    /// Hash a single value
    pub fn hash(data: &[u8]) -> B256 {
        let mut hasher = Keccak::v256();
        hasher.update(data);
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        B256::from(output)
    }

    /// Hash two nodes together, smaller node first.
    ///
    /// The parent does not depend on which child sits on the left, so proofs
    /// carry sibling hashes only.
    pub fn hash_pair(a: &B256, b: &B256) -> B256 {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let mut hasher = Keccak::v256();
        hasher.update(first.as_slice());
        hasher.update(second.as_slice());
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        B256::from(output)
    }

    /// Hash a distribution entry into a leaf node.
    ///
    /// Equivalent to Solidity `keccak256(abi.encodePacked(index, account, amount))`
    /// with `uint256`, `address`, `uint256` operands.
    pub fn hash_leaf(index: U256, account: &Address, amount: U256) -> B256 {
        Self::hash(&Self::pack_leaf(index, account, amount))
    }

    /// Packed leaf preimage. Widths are fixed: 32 bytes big-endian, 20 raw bytes,
    /// 32 bytes big-endian.
    pub fn pack_leaf(index: U256, account: &Address, amount: U256) -> [u8; LEAF_PREIMAGE_LEN] {
        let mut packed = [0u8; LEAF_PREIMAGE_LEN];
        packed[..32].copy_from_slice(&index.to_be_bytes::<32>());
        packed[32..52].copy_from_slice(account.as_slice());
        packed[52..].copy_from_slice(&amount.to_be_bytes::<32>());
        packed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    #[test]
    fn test_hash_empty() {
        assert_eq!(
            Keccak256Hasher::hash(&[]),
            b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn test_hash_pair_is_order_independent() {
        let left = B256::repeat_byte(1);
        let right = B256::repeat_byte(2);
        let hash = Keccak256Hasher::hash_pair(&left, &right);
        assert_eq!(hash, Keccak256Hasher::hash_pair(&right, &left));

        let mut concat = [0u8; 64];
        concat[..32].copy_from_slice(left.as_slice());
        concat[32..].copy_from_slice(right.as_slice());
        assert_eq!(hash, Keccak256Hasher::hash(&concat));
    }

    #[test]
    fn test_pack_leaf_layout() {
        let account = address!("00112233445566778899aabbccddeeff00112233");
        let packed = Keccak256Hasher::pack_leaf(U256::from(7u64), &account, U256::MAX);

        assert_eq!(packed.len(), 84);
        assert_eq!(packed[..31], [0u8; 31]);
        assert_eq!(packed[31], 7);
        assert_eq!(&packed[32..52], account.as_slice());
        assert_eq!(packed[52..], [0xff; 32]);
    }

    #[test]
    fn test_hash_leaf_matches_solidity_packed_encoding() {
        let leaf = Keccak256Hasher::hash_leaf(
            U256::from(0u64),
            &address!("1111111111111111111111111111111111111111"),
            U256::from(100u64),
        );
        assert_eq!(leaf, b256!("81d0c9e91aa5221ffb35dc43b148c071fd8544baf431e949e57286f2bf8af3f8"));
    }
}
