//! Error types

use std::path::PathBuf;

/// Errors raised while building trees or loading distribution data.
///
/// Proof and root mismatches are not errors; they surface as `false`
/// verification results.
#[derive(Debug, thiserror::Error)]
pub enum MerkleError {
    /// A root was requested for an empty entry set
    #[error("cannot build a Merkle root from an empty entry set")]
    EmptyInput,

    /// A node did not decode to exactly 32 bytes
    #[error("malformed node: expected 32 bytes, got {len}")]
    MalformedNode {
        /// Decoded length in bytes
        len: usize,
    },

    /// A node was not valid hex
    #[error("invalid hex node {value:?}: {source}")]
    InvalidHex {
        /// The offending input
        value: String,
        /// Underlying decode error
        #[source]
        source: hex::FromHexError,
    },

    /// An account was not a 20-byte hex address
    #[error("invalid account address {0:?}")]
    InvalidAddress(String),

    /// An amount was not an unsigned 256-bit integer
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    /// An index was not an unsigned 256-bit integer
    #[error("invalid index {0:?}")]
    InvalidIndex(String),

    /// The same account appears under more than one recipient key
    #[error("account {0} is listed more than once")]
    DuplicateAccount(alloy_primitives::Address),

    /// A distribution has no published root
    #[error("distribution has no published merkle root")]
    MissingRoot,

    /// The distribution file could not be read
    #[error("failed to read distribution file {path:?}: {source}")]
    Io {
        /// File that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The distribution file was not valid JSON for the expected layout
    #[error("failed to parse distribution file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for this crate
pub type Result<T, E = MerkleError> = std::result::Result<T, E>;
