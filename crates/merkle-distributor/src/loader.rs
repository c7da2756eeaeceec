//! Published distribution files
//!
//! A file holds one JSON object per distributor contract id, in id order:
//!
//! ```json
//! [{
//!   "description": "Season 1",
//!   "merkleRoot": "0x…",
//!   "tokenTotal": "0x…",
//!   "recipients": {
//!     "0xAccount": { "index": 0, "amount": "0x…", "proof": ["0x…"] }
//!   }
//! }]
//! ```

use std::{collections::BTreeMap, fs, path::Path, str::FromStr};

use alloy_primitives::{Address, U256};
use serde::Deserialize;
use tracing::debug;

use crate::{
    distribution::Distribution,
    entry::Entry,
    error::{MerkleError, Result},
    Node, NODE_LEN,
};

/// One distribution as published
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionFile {
    /// Human readable description
    #[serde(default)]
    pub description: String,
    /// Published root as hex; empty for a distribution with no recipients yet
    #[serde(default)]
    pub merkle_root: String,
    /// Sum of all amounts, hex or decimal
    #[serde(default)]
    pub token_total: String,
    /// Recipients keyed by account
    #[serde(default)]
    pub recipients: BTreeMap<String, RecipientRecord>,
}

/// One recipient as published
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RecipientRecord {
    /// Claim index
    pub index: IndexValue,
    /// Amount, hex or decimal
    pub amount: String,
    /// Sibling hashes from leaf to root
    #[serde(default)]
    pub proof: Vec<String>,
}

/// Claim index, written either as a JSON number or a numeric string
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IndexValue {
    /// `"index": 3`
    Number(u64),
    /// `"index": "3"` or `"index": "0x3"`
    Text(String),
}

impl IndexValue {
    /// Index as an unsigned 256-bit integer
    pub fn to_u256(&self) -> Result<U256> {
        match self {
            Self::Number(index) => Ok(U256::from(*index)),
            Self::Text(index) => {
                parse_u256(index).ok_or_else(|| MerkleError::InvalidIndex(index.clone()))
            }
        }
    }
}

impl DistributionFile {
    /// Whether no root has been published yet
    pub fn is_empty(&self) -> bool {
        self.merkle_root.trim().is_empty()
    }

    /// Published root, or `None` if empty
    pub fn merkle_root(&self) -> Result<Option<Node>> {
        if self.is_empty() {
            return Ok(None);
        }
        parse_node(&self.merkle_root).map(Some)
    }

    /// Published token total
    pub fn token_total(&self) -> Result<U256> {
        parse_amount(&self.token_total)
    }

    /// Parse every recipient into a [`Distribution`].
    ///
    /// Fails on the first malformed account, amount, index or proof node, and
    /// on an account listed twice.
    pub fn to_distribution(&self) -> Result<Distribution> {
        let root = self.merkle_root()?.ok_or(MerkleError::MissingRoot)?;
        let mut entries = Vec::with_capacity(self.recipients.len());
        let mut proofs = BTreeMap::new();

        for (account, record) in &self.recipients {
            let account = parse_address(account)?;
            let proof = record.proof.iter().map(|node| parse_node(node)).collect::<Result<Vec<_>>>()?;
            entries.push(Entry::new(record.index.to_u256()?, account, parse_amount(&record.amount)?));
            // keys differing only in hex case name the same account
            if proofs.insert(account, proof).is_some() {
                return Err(MerkleError::DuplicateAccount(account));
            }
        }

        Ok(Distribution::new(root, entries, proofs))
    }
}

/// Parse a 32-byte node from hex, with or without `0x`.
pub fn parse_node(value: &str) -> Result<Node> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits)
        .map_err(|source| MerkleError::InvalidHex { value: value.to_string(), source })?;
    if bytes.len() != NODE_LEN {
        return Err(MerkleError::MalformedNode { len: bytes.len() });
    }
    Ok(Node::from_slice(&bytes))
}

/// Parse a 20-byte account, case-insensitive, with or without `0x`.
///
/// Mixed-case checksums are not enforced.
pub fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value.trim()).map_err(|_| MerkleError::InvalidAddress(value.to_string()))
}

/// Parse an unsigned 256-bit amount, `0x` hex or decimal.
pub fn parse_amount(value: &str) -> Result<U256> {
    parse_u256(value).ok_or_else(|| MerkleError::InvalidAmount(value.to_string()))
}

/// `U256::from_str` reads an empty string as zero, so blanks are rejected first.
fn parse_u256(value: &str) -> Option<U256> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    U256::from_str(trimmed).ok()
}

/// Parse a distribution file's contents
pub fn parse_distributions(contents: &str) -> Result<Vec<DistributionFile>> {
    Ok(serde_json::from_str(contents)?)
}

/// Read and parse a distribution file
pub fn load_distributions(path: impl AsRef<Path>) -> Result<Vec<DistributionFile>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|source| MerkleError::Io { path: path.to_path_buf(), source })?;
    let distributions = parse_distributions(&contents)?;

    debug!(
        target: "merkle_distributor",
        ?path,
        distributions = distributions.len(),
        "Loaded distribution file"
    );

    Ok(distributions)
}
