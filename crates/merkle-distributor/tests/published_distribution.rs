//! Checks against a distribution file in the published format

use alloy_primitives::{address, b256, U256};
use merkle_distributor::{
    build_root, load_distributions, parse_distributions, verify, Entry, MerkleTree, Node,
};

const PUBLISHED: &str = include_str!("fixtures/distributions.json");

const ROOT: Node = b256!("ccbcc14d9ed17645b00b07c333302d6a2745607960238b2daca680f08b5a7fcb");

#[test]
fn published_distribution_is_consistent() {
    let files = parse_distributions(PUBLISHED).unwrap();
    assert_eq!(files.len(), 2);

    let distribution = files[0].to_distribution().unwrap();
    assert_eq!(distribution.root, ROOT);
    assert_eq!(distribution.entries.len(), 4);

    let report = distribution.check();
    assert!(report.proofs_valid());
    assert!(report.root_matches);
    assert_eq!(report.rebuilt_root, Some(ROOT));
}

#[test]
fn published_token_total_matches_amounts() {
    let files = parse_distributions(PUBLISHED).unwrap();
    let distribution = files[0].to_distribution().unwrap();

    let sum = distribution.entries.iter().fold(U256::ZERO, |acc, entry| acc + entry.amount);
    assert_eq!(files[0].token_total().unwrap(), sum);
}

#[test]
fn amount_above_u128_is_encoded_exactly() {
    let files = parse_distributions(PUBLISHED).unwrap();
    let distribution = files[0].to_distribution().unwrap();
    let account = address!("4444444444444444444444444444444444444444");

    let entry = distribution.entries.iter().find(|entry| entry.account == account).unwrap();
    assert_eq!(entry.amount, (U256::from(1u64) << 200) + U256::from(7u64));
    assert!(verify(entry, &distribution.proofs[&account], &ROOT));

    let truncated = Entry { amount: U256::from(u128::MAX) & entry.amount, ..*entry };
    assert!(!verify(&truncated, &distribution.proofs[&account], &ROOT));
}

#[test]
fn rebuilt_tree_reproduces_published_proofs() {
    let files = parse_distributions(PUBLISHED).unwrap();
    let distribution = files[0].to_distribution().unwrap();
    let tree = MerkleTree::from_entries(&distribution.entries).unwrap();

    assert_eq!(tree.root(), ROOT);
    for entry in &distribution.entries {
        assert_eq!(tree.proof_for(entry).as_ref(), distribution.proofs.get(&entry.account));
    }
}

#[test]
fn tampered_amount_is_caught_by_both_checks() {
    let files = parse_distributions(PUBLISHED).unwrap();
    let mut distribution = files[0].to_distribution().unwrap();
    distribution.entries[2].amount += U256::from(1u64);

    let report = distribution.check();
    let failed: Vec<_> = report.failed().map(|outcome| outcome.account).collect();
    assert_eq!(failed, vec![distribution.entries[2].account]);
    assert!(!report.root_matches);
    assert_ne!(build_root(&distribution.entries).unwrap(), ROOT);
}

#[test]
fn unpublished_distribution_is_empty() {
    let files = parse_distributions(PUBLISHED).unwrap();
    assert!(files[1].is_empty());
    assert_eq!(files[1].merkle_root().unwrap(), None);
}

#[test]
fn loads_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/distributions.json");
    let files = load_distributions(path).unwrap();
    assert_eq!(files, parse_distributions(PUBLISHED).unwrap());
}
