//! Distribution consistency checks

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use tracing::{info, warn};

use crate::{entry::Entry, proof::verify, tree::build_root, Node, Proof};

/// A published distribution: root, recipients and their proofs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distribution {
    /// Published root
    pub root: Node,
    /// Recipients
    pub entries: Vec<Entry>,
    /// Proof published for each account
    pub proofs: BTreeMap<Address, Proof>,
}

/// Verification result for one recipient
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofOutcome {
    /// Recipient account
    pub account: Address,
    /// Recipient claim index
    pub index: U256,
    /// Whether the account's proof verified against the published root
    pub verified: bool,
}

/// Outcome of checking a [`Distribution`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionReport {
    /// One outcome per entry, in entry order
    pub outcomes: Vec<ProofOutcome>,
    /// Root rebuilt from all entries; `None` for an empty distribution
    pub rebuilt_root: Option<Node>,
    /// Whether the rebuilt root equals the published one
    pub root_matches: bool,
}

impl DistributionReport {
    /// Number of recipients checked
    pub fn recipients(&self) -> usize {
        self.outcomes.len()
    }

    /// Recipients whose proof did not verify
    pub fn failed(&self) -> impl Iterator<Item = &ProofOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.verified)
    }

    /// Whether every individual proof verified
    pub fn proofs_valid(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.verified)
    }

    /// Whether every proof verified and the rebuilt root matched
    pub fn is_valid(&self) -> bool {
        self.proofs_valid() && self.root_matches
    }
}

impl Distribution {
    /// Create a distribution
    pub const fn new(root: Node, entries: Vec<Entry>, proofs: BTreeMap<Address, Proof>) -> Self {
        Self { root, entries, proofs }
    }

    /// Whether the distribution has no recipients
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verify every recipient's proof against the published root.
    ///
    /// All entries are checked; a recipient with no proof fails.
    pub fn verify_proofs(&self) -> Vec<ProofOutcome> {
        self.entries
            .iter()
            .map(|entry| {
                let verified = self
                    .proofs
                    .get(&entry.account)
                    .is_some_and(|proof| verify(entry, proof, &self.root));
                if !verified {
                    warn!(
                        target: "merkle_distributor",
                        account = %entry.account,
                        index = %entry.index,
                        "Proof verification failed"
                    );
                }
                ProofOutcome { account: entry.account, index: entry.index, verified }
            })
            .collect()
    }

    /// Rebuild the root from all entries, or `None` if there are none
    pub fn rebuild_root(&self) -> Option<Node> {
        build_root(&self.entries).ok()
    }

    /// Check proofs and root together.
    ///
    /// An empty distribution is vacuously valid.
    pub fn check(&self) -> DistributionReport {
        if self.is_empty() {
            info!(target: "merkle_distributor", "Empty distribution, nothing to verify");
            return DistributionReport { outcomes: Vec::new(), rebuilt_root: None, root_matches: true };
        }

        let outcomes = self.verify_proofs();
        let rebuilt_root = self.rebuild_root();
        let root_matches = rebuilt_root == Some(self.root);

        let failed = outcomes.iter().filter(|outcome| !outcome.verified).count();
        info!(
            target: "merkle_distributor",
            recipients = outcomes.len(),
            failed,
            root_matches,
            "Checked distribution"
        );

        DistributionReport { outcomes, rebuilt_root, root_matches }
    }
}
