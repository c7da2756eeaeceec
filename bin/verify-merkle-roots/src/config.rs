//! Configuration

use std::{env, path::PathBuf, str::FromStr};

use clap::ValueEnum;
use tracing::Level;

/// Default directory holding `<network>/<token>.json` distribution files
pub(crate) const DEFAULT_DATA_DIR: &str = "scripts/merkle-paths-output";

/// Token a distribution pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Token {
    /// KITE distributions
    Kite,
    /// OP distributions
    Op,
}

impl Token {
    /// File stem of this token's distribution file
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            Self::Kite => "kite",
            Self::Op => "op",
        }
    }
}

/// Network the distributor contract is deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Network {
    /// OP Mainnet
    Optimism,
    /// OP Sepolia testnet
    OptimismSepolia,
}

impl Network {
    /// Directory name of this network's distribution files
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            Self::Optimism => "optimism",
            Self::OptimismSepolia => "optimism-sepolia",
        }
    }
}

/// Verifier configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
    /// Root of the distribution file tree
    pub(crate) data_dir: PathBuf,
    /// Maximum log level
    pub(crate) log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(DEFAULT_DATA_DIR), log_level: Level::INFO }
    }
}

impl Config {
    /// Load from environment variables
    pub(crate) fn from_env() -> Self {
        Self {
            data_dir: env::var("MERKLE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            log_level: env::var("LOG_LEVEL")
                .ok()
                .and_then(|s| Level::from_str(&s).ok())
                .unwrap_or(Level::INFO),
        }
    }

    /// Path of the distribution file for `token` on `network`
    pub(crate) fn distribution_path(&self, network: Network, token: Token) -> PathBuf {
        self.data_dir.join(network.as_str()).join(format!("{}.json", token.as_str()))
    }
}
