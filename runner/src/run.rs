//! One complete run: gate on the session, sample the universe, classify
//! movers, deliver the digest, persist the alerted set.
//!
//! Ordering rule: the ledger is only written after the digest containing
//! the new symbols has been delivered. A failed send must not suppress
//! those names on the next run.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::{StreamExt, stream};
use tracing::{debug, error, info, warn};

use engine::detector::{Verdict, classify};
use engine::digest::{DigestConfig, build};
use engine::types::{DetectorConfig, MoverRecord};
use ledger::store::LedgerStore;
use market::clock::{MarketClock, MarketSession};
use market::source::{QuoteSource, SourceError};
use market::types::Quote;
use notify::Notifier;

use crate::sectors::sector_snapshot;

/// Sent when the provider yields nothing usable for the whole universe.
pub const NO_DATA_MESSAGE: &str = "⚠️ No market data available.";

/// Everything a run needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub detector: DetectorConfig,

    /// Rows shown per gainer/loser list.
    pub display_count: usize,

    /// Tickers scanned for movers.
    pub universe: Vec<String>,

    /// Tickers in the always-on sector panel.
    pub sector_tickers: Vec<String>,

    /// Parallel in-flight quote requests.
    pub fetch_concurrency: usize,
}

/// How a run ended. Every variant had a message sent (or attempted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exchange closed; sector panel digest only.
    MarketClosed,

    /// Provider produced nothing usable for the whole universe.
    NoData,

    /// Digest delivered; ledger updated when new names were shown.
    Delivered { movers: usize, newly_alerted: usize },

    /// Sink rejected the digest; ledger deliberately left untouched.
    DeliveryFailed,
}

pub struct Runner {
    source: Arc<dyn QuoteSource>,
    ledger: Arc<dyn LedgerStore>,
    notifier: Arc<dyn Notifier>,
    clock: MarketClock,
    cfg: RunConfig,
}

impl Runner {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        ledger: Arc<dyn LedgerStore>,
        notifier: Arc<dyn Notifier>,
        clock: MarketClock,
        cfg: RunConfig,
    ) -> Self {
        Self {
            source,
            ledger,
            notifier,
            clock,
            cfg,
        }
    }

    /// Execute one sampling run at the given instant.
    ///
    /// `now` is injected so session gating and the trading-day reset are
    /// testable; production passes `Utc::now()`.
    pub async fn run(&self, now: DateTime<Utc>) -> RunOutcome {
        let session = self.clock.session_at(now);
        info!(session = %session, universe = self.cfg.universe.len(), "run started");

        let sectors = sector_snapshot(
            self.source.as_ref(),
            &self.cfg.sector_tickers,
            self.cfg.fetch_concurrency,
        )
        .await;

        let digest_cfg = DigestConfig {
            display_count: self.cfg.display_count,
            active_threshold_pct: match session {
                MarketSession::PreMarket => self.cfg.detector.premarket_threshold_pct,
                _ => self.cfg.detector.regular_threshold_pct,
            },
        };

        if session == MarketSession::Closed {
            let digest = build(&[], session, Some(&sectors), &digest_cfg);
            self.deliver(&digest.text).await;
            return RunOutcome::MarketClosed;
        }

        let mut alerted = self.ledger.load().await;
        if let Some(written) = self.ledger.last_written().await {
            let written_day = self.clock.trading_day(DateTime::<Utc>::from(written));
            if written_day < self.clock.trading_day(now) {
                info!(
                    stale_symbols = alerted.len(),
                    %written_day,
                    "new trading day, alert ledger re-armed"
                );
                alerted.clear();
            }
        }

        let (quotes, failures) = self.fetch_universe().await;
        if !failures.is_empty() {
            warn!(
                failed = failures.len(),
                fetched = quotes.len(),
                "some symbols had no usable quote"
            );
            for (symbol, err) in &failures {
                debug!(symbol = %symbol, error = %err, "quote unavailable");
            }
        }

        if quotes.is_empty() {
            warn!("provider returned no usable data for the whole universe");
            self.deliver(NO_DATA_MESSAGE).await;
            return RunOutcome::NoData;
        }

        let mut records: Vec<MoverRecord> = Vec::new();
        let mut rejections: BTreeMap<&'static str, usize> = BTreeMap::new();
        for quote in &quotes {
            match classify(quote, session, &alerted, &self.cfg.detector) {
                Verdict::Qualified(record) => records.push(record),
                verdict => *rejections.entry(verdict.reason()).or_insert(0) += 1,
            }
        }
        info!(movers = records.len(), rejections = ?rejections, "universe classified");

        let digest = build(&records, session, Some(&sectors), &digest_cfg);

        if let Err(e) = self.notifier.send(&digest.text).await {
            error!(error = %e, "digest delivery failed, alerted set not persisted");
            return RunOutcome::DeliveryFailed;
        }

        let newly_alerted = digest.displayed.len();
        if newly_alerted > 0 {
            alerted.mark_alerted(digest.displayed);
            if let Err(e) = self.ledger.save(&alerted).await {
                warn!(error = %e, "ledger save failed, next run may repeat these alerts");
            }
        }

        RunOutcome::Delivered {
            movers: records.len(),
            newly_alerted,
        }
    }

    /// Best-effort send used on the paths that never touch the ledger.
    async fn deliver(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            error!(error = %e, "notification delivery failed");
        }
    }

    async fn fetch_universe(&self) -> (Vec<Quote>, Vec<(String, SourceError)>) {
        let source = self.source.as_ref();

        let results: Vec<(String, Result<Quote, SourceError>)> =
            stream::iter(self.cfg.universe.iter().cloned())
                .map(|symbol| async move {
                    let result = source.quote(&symbol).await;
                    (symbol, result)
                })
                .buffer_unordered(self.cfg.fetch_concurrency.max(1))
                .collect()
                .await;

        let mut quotes = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (symbol, result) in results {
            match result {
                Ok(quote) => quotes.push(quote),
                Err(err) => failures.push((symbol, err)),
            }
        }

        (quotes, failures)
    }
}
