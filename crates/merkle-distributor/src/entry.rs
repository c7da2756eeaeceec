//! Distribution entries and leaf encoding

use alloy_primitives::{Address, U256};

use crate::{hasher::Keccak256Hasher, Node};

/// One distribution recipient
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entry {
    /// Claim index on the distributor contract
    pub index: U256,
    /// Recipient account
    pub account: Address,
    /// Amount owed, in the token's smallest unit
    pub amount: U256,
}

impl Entry {
    /// Create a new entry
    pub const fn new(index: U256, account: Address, amount: U256) -> Self {
        Self { index, account, amount }
    }

    /// Leaf node for this entry
    pub fn leaf(&self) -> Node {
        encode_leaf(self.index, &self.account, self.amount)
    }
}

/// Encode an `(index, account, amount)` triple into its leaf node.
pub fn encode_leaf(index: U256, account: &Address, amount: U256) -> Node {
    Keccak256Hasher::hash_leaf(index, account, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_leaf_depends_on_every_field() {
        let account = address!("2222222222222222222222222222222222222222");
        let entry = Entry::new(U256::from(1u64), account, U256::from(200u64));

        let other_index = Entry { index: U256::from(2u64), ..entry };
        let other_account = Entry { account: address!("3333333333333333333333333333333333333333"), ..entry };
        let other_amount = Entry { amount: U256::from(201u64), ..entry };

        assert_ne!(entry.leaf(), other_index.leaf());
        assert_ne!(entry.leaf(), other_account.leaf());
        assert_ne!(entry.leaf(), other_amount.leaf());
    }

    #[test]
    fn test_amount_beyond_u128() {
        let account = address!("4444444444444444444444444444444444444444");
        let big = (U256::from(1u64) << 200) + U256::from(7u64);
        let entry = Entry::new(U256::from(3u64), account, big);

        // the high limbs must reach the preimage, not be truncated
        assert_ne!(entry.leaf(), Entry { amount: U256::from(7u64), ..entry }.leaf());
        assert_eq!(entry.leaf(), encode_leaf(U256::from(3u64), &account, big));
    }
}
