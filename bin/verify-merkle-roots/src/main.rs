//! Verifies a published Merkle distribution
//!
//! Every recipient's proof is checked against the published root, then the
//! root itself is rebuilt from all recipients and compared.
//!
//! Run:
//! ```bash
//! verify-merkle-roots --token op --network optimism --id 1
//! ```

mod config;

use std::path::PathBuf;

use alloy_primitives::U256;
use anyhow::{Context, Result};
use clap::Parser;
use merkle_distributor::{load_distributions, DistributionFile};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use crate::config::{Config, Network, Token};

/// Token amounts are published in 18-decimal base units
const TOKEN_DECIMALS: usize = 18;

/// 10^18
const ONE_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Token the distribution is for
    #[arg(short, long, value_enum)]
    token: Token,

    /// Network the distribution is published on
    #[arg(short, long, value_enum)]
    network: Network,

    /// Distribution id on the contract, starting at 1
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    id: u64,

    /// Directory holding `<network>/<token>.json` distribution files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let mut config = Config::from_env();

    // Setup logging
    let subscriber = FmtSubscriber::builder().with_max_level(config.log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let path = config.distribution_path(args.network, args.token);
    let distributions = load_distributions(&path)
        .with_context(|| format!("failed to load distributions from {}", path.display()))?;

    for (i, distribution) in distributions.iter().enumerate() {
        info!(
            "[CONTRACT INDEX {}] Distro: {} | Root 0x{}",
            i + 1,
            distribution.description,
            distribution.merkle_root.trim_start_matches("0x")
        );
    }
    info!("");

    let Some(distribution) = select(&distributions, args.id) else {
        info!("Distro {} doesn't exist", args.id);
        return Ok(());
    };
    if distribution.is_empty() {
        info!("Distro {} is empty", args.id);
        return Ok(());
    }

    info!(
        "Verifying distro {} out of {} on {}",
        args.id,
        distributions.len(),
        args.network.as_str()
    );

    if !verify_distribution(distribution)? {
        std::process::exit(1);
    }
    Ok(())
}

/// Distribution for a 1-based contract id
fn select(distributions: &[DistributionFile], id: u64) -> Option<&DistributionFile> {
    let index = usize::try_from(id.checked_sub(1)?).ok()?;
    distributions.get(index)
}

/// Check one distribution, logging the outcome. Returns whether it is consistent.
fn verify_distribution(file: &DistributionFile) -> Result<bool> {
    let total = file.token_total().context("invalid token total")?;
    info!("Description: {}", file.description);
    info!("Amount: {} | {} | {:#x}", format_token_amount(total), total, total);

    let distribution = file.to_distribution().context("invalid distribution data")?;
    info!("Check distribution with {} recipients", distribution.entries.len());

    let report = distribution.check();
    for outcome in report.failed() {
        error!("Verification for {} failed", outcome.account);
    }
    if report.proofs_valid() {
        info!("  All proofs verified");
    } else {
        error!("  Failed validation for {} proof(s)", report.failed().count());
    }

    if let Some(root) = report.rebuilt_root {
        info!("Reconstructed merkle root {root}");
    }
    info!("Root matches the one read from the JSON? {}", report.root_matches);
    if !report.root_matches {
        error!("  Root mismatch: published {}", distribution.root);
    }

    Ok(report.is_valid())
}

/// Render base units as whole tokens, trimming trailing fractional zeros.
fn format_token_amount(amount: U256) -> String {
    let (whole, fraction) = amount.div_rem(ONE_TOKEN);
    // fraction < 10^18 fits in the low limb
    let fraction = fraction.as_limbs()[0];
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{fraction:0width$}", width = TOKEN_DECIMALS);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
