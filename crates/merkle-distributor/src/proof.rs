//! Inclusion proof verification

use crate::{entry::Entry, hasher::Keccak256Hasher, Node};

/// Fold `proof` onto `leaf`, one sorted pair hash per sibling.
pub fn compute_root(leaf: Node, proof: &[Node]) -> Node {
    proof.iter().fold(leaf, |current, sibling| Keccak256Hasher::hash_pair(&current, sibling))
}

/// Check that `entry` is included under `root`.
///
/// A wrong, truncated or padded proof yields `false`; this never errors.
pub fn verify(entry: &Entry, proof: &[Node], root: &Node) -> bool {
    compute_root(entry.leaf(), proof) == *root
}
