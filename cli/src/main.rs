pub mod cli;
pub mod config;
pub mod universe;

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;

use cli::Cli;
use config::AppConfig;
use engine::types::DetectorConfig;
use ledger::model::AlertedSet;
use ledger::store::LedgerStore;
use ledger::store::json_store::JsonFileStore;
use market::clock::MarketClock;
use market::yahoo::YahooClient;
use notify::{Notifier, StdoutNotifier, TelegramNotifier};
use runner::{RunConfig, Runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    common::logger::init_logger("tickerbeat");

    // The only fatal exit: missing or malformed configuration.
    let cfg = AppConfig::load(&cli)?;

    let store = JsonFileStore::new(cfg.state_file.clone());
    if cli.reset_ledger {
        store.save(&AlertedSet::new()).await?;
        tracing::info!(path = %cfg.state_file.display(), "alert ledger cleared");
    }

    let source = YahooClient::new(cfg.http_timeout)?;

    let notifier: Arc<dyn Notifier> = match cfg.telegram.as_ref() {
        Some(tg) => Arc::new(TelegramNotifier::new(
            tg.bot_token.clone(),
            tg.chat_id.clone(),
            cfg.http_timeout,
        )?),
        None => Arc::new(StdoutNotifier),
    };

    let run_cfg = RunConfig {
        detector: DetectorConfig {
            premarket_threshold_pct: cfg.premarket_threshold_pct,
            regular_threshold_pct: cfg.regular_threshold_pct,
            volume_spike_multiplier: cfg.volume_spike_multiplier,
        },
        display_count: cfg.display_count,
        universe: cfg.universe.clone(),
        sector_tickers: cfg.sector_tickers.clone(),
        fetch_concurrency: cfg.fetch_concurrency,
    };

    let runner = Runner::new(
        Arc::new(source),
        Arc::new(store),
        notifier,
        MarketClock::new(cfg.exchange_timezone),
        run_cfg,
    );

    let outcome = runner.run(Utc::now()).await;
    tracing::info!(outcome = ?outcome, "run finished");

    Ok(())
}
