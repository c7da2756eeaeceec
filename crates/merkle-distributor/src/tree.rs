//! Distribution tree construction
//!
//! Leaves are sorted and deduplicated before reduction, so the root depends
//! only on the set of leaves. Odd layers carry their last node up unchanged.

use tracing::debug;

use crate::{
    entry::Entry,
    error::{MerkleError, Result},
    hasher::Keccak256Hasher,
    Node, Proof,
};

/// Combine two optional nodes into their parent.
///
/// A lone node is promoted unchanged; two nodes are hashed smaller-first.
/// Returns `None` only when both operands are absent.
pub fn combine(a: Option<Node>, b: Option<Node>) -> Option<Node> {
    match (a, b) {
        (Some(a), Some(b)) => Some(Keccak256Hasher::hash_pair(&a, &b)),
        (Some(node), None) | (None, Some(node)) => Some(node),
        (None, None) => None,
    }
}

/// Rebuild the root of the tree over `entries`.
///
/// Only the current layer is kept while reducing. Fails with
/// [`MerkleError::EmptyInput`] when `entries` is empty.
pub fn build_root<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Result<Node> {
    let mut layer = leaf_layer(entries.into_iter().map(Entry::leaf))?;
    while layer.len() > 1 {
        layer = next_layer(&layer);
    }
    Ok(layer[0])
}

/// Sort, then drop adjacent duplicates.
fn leaf_layer(leaves: impl IntoIterator<Item = Node>) -> Result<Vec<Node>> {
    let mut layer: Vec<Node> = leaves.into_iter().collect();
    if layer.is_empty() {
        return Err(MerkleError::EmptyInput);
    }

    let encoded = layer.len();
    layer.sort_unstable();
    layer.dedup();

    if layer.len() < encoded {
        debug!(
            target: "merkle_distributor",
            encoded,
            distinct = layer.len(),
            "Collapsed duplicate leaves"
        );
    }

    Ok(layer)
}

/// Pair `(layer[2i], layer[2i + 1])`; an unpaired last node moves up as is.
fn next_layer(layer: &[Node]) -> Vec<Node> {
    layer
        .chunks(2)
        .filter_map(|pair| combine(pair.first().copied(), pair.get(1).copied()))
        .collect()
}

/// Fully materialized distribution tree.
///
/// Layer 0 holds the sorted, distinct leaves; the last layer holds the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<Node>>,
    root: Node,
}

impl MerkleTree {
    /// Build the tree over the leaves of `entries`
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Result<Self> {
        Self::from_leaves(entries.into_iter().map(Entry::leaf))
    }

    /// Build the tree over already encoded leaves
    pub fn from_leaves(leaves: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut current = leaf_layer(leaves)?;
        let mut layers = Vec::new();

        while current.len() > 1 {
            let next = next_layer(&current);
            layers.push(current);
            current = next;
        }

        let root = current[0];
        layers.push(current);

        debug!(
            target: "merkle_distributor",
            leaves = layers[0].len(),
            depth = layers.len() - 1,
            root = %root,
            "Built distribution tree"
        );

        Ok(Self { layers, root })
    }

    /// Root hash
    pub const fn root(&self) -> Node {
        self.root
    }

    /// All layers, leaves first
    pub fn layers(&self) -> &[Vec<Node>] {
        &self.layers
    }

    /// Sorted, distinct leaves
    pub fn leaves(&self) -> &[Node] {
        &self.layers[0]
    }

    /// Number of distinct leaves
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    /// Always false: a tree has at least one leaf
    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }

    /// Number of layers above the leaves
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Sibling path from `leaf` to the root, or `None` if `leaf` is not in the tree.
    ///
    /// Layers where the node was carried up unpaired contribute no sibling.
    pub fn proof(&self, leaf: &Node) -> Option<Proof> {
        let mut position = self.leaves().binary_search(leaf).ok()?;
        let mut proof = Vec::with_capacity(self.depth());

        for layer in &self.layers[..self.depth()] {
            if let Some(sibling) = layer.get(position ^ 1) {
                proof.push(*sibling);
            }
            position /= 2;
        }

        Some(proof)
    }

    /// Sibling path for `entry`'s leaf
    pub fn proof_for(&self, entry: &Entry) -> Option<Proof> {
        self.proof(&entry.leaf())
    }
}
