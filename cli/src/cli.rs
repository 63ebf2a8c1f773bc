use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name = "tickerbeat", version)]
pub struct Cli {
    /// Print the digest to stdout instead of sending it
    #[clap(long)]
    pub dry_run: bool,

    /// Clear the persisted alert ledger before running
    #[clap(long)]
    pub reset_ledger: bool,

    /// Path of the alert ledger file (overrides STATE_FILE)
    #[clap(long)]
    pub state_file: Option<PathBuf>,

    /// Pre-market percent-change threshold (overrides PREMARKET_THRESHOLD)
    #[clap(long)]
    pub premarket_threshold: Option<f64>,

    /// Regular-hours percent-change threshold (overrides MARKET_THRESHOLD)
    #[clap(long)]
    pub market_threshold: Option<f64>,

    /// Volume spike multiplier (overrides VOLUME_MULTIPLIER)
    #[clap(long)]
    pub volume_multiplier: Option<f64>,
}
