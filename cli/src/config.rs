//! Process configuration.
//!
//! Built once at startup from environment variables plus CLI overrides
//! and passed by reference from there on; no other component reads the
//! environment.

use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;

use crate::cli::Cli;
use crate::universe;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Telegram destination credentials.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Digest destination. `None` only in dry-run mode, where the digest
    /// goes to stdout instead.
    pub telegram: Option<TelegramConfig>,

    /// Minimum |percent change| during pre-market.
    pub premarket_threshold_pct: f64,

    /// Minimum |percent change| during regular hours.
    pub regular_threshold_pct: f64,

    /// Last volume must reach average volume times this multiplier.
    pub volume_spike_multiplier: f64,

    /// Rows shown per gainer/loser list.
    pub display_count: usize,

    /// Persisted alert ledger path.
    pub state_file: PathBuf,

    /// Exchange whose schedule gates the run.
    pub exchange_timezone: Tz,

    /// Bound on every provider and sink HTTP call.
    pub http_timeout: Duration,

    /// Parallel in-flight quote requests.
    pub fetch_concurrency: usize,

    /// Tickers scanned for movers.
    pub universe: Vec<String>,

    /// Tickers in the always-on sector panel.
    pub sector_tickers: Vec<String>,
}

impl AppConfig {
    /// Assemble the config. Fails before any network call when a
    /// required credential is absent.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let telegram = if cli.dry_run {
            None
        } else {
            Some(TelegramConfig {
                bot_token: require("TELEGRAM_BOT_TOKEN")?,
                chat_id: require("TELEGRAM_CHAT_ID")?,
            })
        };

        let premarket_threshold_pct = match cli.premarket_threshold {
            Some(v) => v,
            None => env_f64("PREMARKET_THRESHOLD", 1.0)?,
        };

        let regular_threshold_pct = match cli.market_threshold {
            Some(v) => v,
            None => env_f64("MARKET_THRESHOLD", 2.0)?,
        };

        let volume_spike_multiplier = match cli.volume_multiplier {
            Some(v) => v,
            None => env_f64("VOLUME_MULTIPLIER", 1.5)?,
        };

        let state_file = cli
            .state_file
            .clone()
            .or_else(|| std::env::var("STATE_FILE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("alerted.json"));

        let exchange_timezone = match std::env::var("EXCHANGE_TIMEZONE") {
            Ok(raw) => match raw.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        var: "EXCHANGE_TIMEZONE",
                        value: raw,
                    });
                }
            },
            Err(_) => chrono_tz::US::Eastern,
        };

        Ok(Self {
            telegram,
            premarket_threshold_pct,
            regular_threshold_pct,
            volume_spike_multiplier,
            display_count: env_usize("DISPLAY_COUNT", 6)?,
            state_file,
            exchange_timezone,
            http_timeout: Duration::from_secs(10),
            fetch_concurrency: 8,
            universe: universe::default_universe(),
            sector_tickers: universe::sector_tickers(),
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn env_f64(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => Ok(v),
            Err(_) => Err(ConfigError::InvalidValue { var, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

fn env_usize(var: &'static str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => Ok(v),
            Err(_) => Err(ConfigError::InvalidValue { var, value: raw }),
        },
        Err(_) => Ok(default),
    }
}
