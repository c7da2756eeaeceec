//! Merkle root and inclusion proof verification for token distributions
//!
//! This crate rebuilds the root of a distributor's Merkle tree from its
//! recipients and checks each recipient's published proof against it.
//! Key features:
//! - Solidity compatible leaves: `keccak256(abi.encodePacked(uint256 index, address account, uint256 amount))`
//! - Sorted pair hashing: proofs carry sibling hashes only, no left/right flags
//! - Canonical leaf order: sorted and deduplicated, so the root ignores input order

mod distribution;
mod entry;
mod error;
mod hasher;
mod loader;
mod proof;
mod tree;

pub use distribution::{Distribution, DistributionReport, ProofOutcome};
pub use entry::{encode_leaf, Entry};
pub use error::{MerkleError, Result};
pub use hasher::{Keccak256Hasher, LEAF_PREIMAGE_LEN};
pub use loader::{
    load_distributions, parse_address, parse_amount, parse_distributions, parse_node,
    DistributionFile, IndexValue, RecipientRecord,
};
pub use proof::{compute_root, verify};
pub use tree::{build_root, combine, MerkleTree};

/// A 32-byte tree node
pub type Node = alloy_primitives::B256;

/// Sibling hashes from a leaf up to the root
pub type Proof = Vec<Node>;

/// Node width in bytes
pub const NODE_LEN: usize = 32;
