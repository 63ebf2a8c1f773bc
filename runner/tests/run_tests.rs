
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use chrono::{DateTime, TimeZone, Utc};

use engine::types::DetectorConfig;
use ledger::model::AlertedSet;
use market::clock::MarketClock;
use market::types::Quote;
use runner::{NO_DATA_MESSAGE, RunConfig, RunOutcome, Runner};

use mocks::{MemoryLedger, RecordingNotifier, ScriptedSource};

fn quote(symbol: &str, prev: f64, price: f64, volume: u64, avg_volume: u64) -> Quote {
    Quote {
        symbol: symbol.into(),
        last_price: Some(price),
        previous_close: Some(prev),
        last_volume: Some(volume),
        average_volume: Some(avg_volume),
        short_name: None,
    }
}

fn source_with(quotes: &[Quote]) -> ScriptedSource {
    ScriptedSource {
        quotes: quotes
            .iter()
            .map(|q| (q.symbol.clone(), q.clone()))
            .collect(),
        history: HashMap::new(),
    }
}

fn run_cfg(universe: &[&str]) -> RunConfig {
    RunConfig {
        detector: DetectorConfig::default(),
        display_count: 6,
        universe: universe.iter().map(|s| s.to_string()).collect(),
        sector_tickers: Vec::new(),
        fetch_concurrency: 4,
    }
}

fn eastern(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    chrono_tz::US::Eastern
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// Thursday mid-session.
fn regular_hours() -> DateTime<Utc> {
    eastern(2025, 6, 5, 10, 30)
}

fn runner(
    source: ScriptedSource,
    ledger: Arc<MemoryLedger>,
    notifier: Arc<RecordingNotifier>,
    cfg: RunConfig,
) -> Runner {
    Runner::new(
        Arc::new(source),
        ledger,
        notifier,
        MarketClock::us_eastern(),
        cfg,
    )
}

#[tokio::test]
async fn qualifying_mover_is_delivered_and_marked() {
    let source = source_with(&[quote("XYZ", 100.0, 103.0, 2_000_000, 1_000_000)]);
    let ledger = Arc::new(MemoryLedger::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let outcome = runner(source, ledger.clone(), notifier.clone(), run_cfg(&["XYZ"]))
        .run(regular_hours())
        .await;

    assert_eq!(
        outcome,
        RunOutcome::Delivered {
            movers: 1,
            newly_alerted: 1
        }
    );

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("*🚀 Top Gainers*"));
    assert!(sent[0].contains("🔥 `XYZ` 3.00% ($103.00)"));

    assert!(ledger.state.lock().unwrap().contains("XYZ"));
    assert_eq!(*ledger.saves.lock().unwrap(), 1);
}

#[tokio::test]
async fn empty_provider_sends_the_fixed_no_data_notice() {
    let source = ScriptedSource::default();
    let ledger = Arc::new(MemoryLedger::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let outcome = runner(
        source,
        ledger.clone(),
        notifier.clone(),
        run_cfg(&["AAPL", "MSFT"]),
    )
    .run(regular_hours())
    .await;

    assert_eq!(outcome, RunOutcome::NoData);

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], NO_DATA_MESSAGE);

    assert_eq!(*ledger.saves.lock().unwrap(), 0);
    assert!(ledger.state.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delivery_failure_leaves_the_ledger_untouched() {
    let source = source_with(&[quote("XYZ", 100.0, 103.0, 2_000_000, 1_000_000)]);
    let ledger = Arc::new(MemoryLedger::default());
    let notifier = Arc::new(RecordingNotifier {
        fail: true,
        ..Default::default()
    });

    let outcome = runner(source, ledger.clone(), notifier, run_cfg(&["XYZ"]))
        .run(regular_hours())
        .await;

    assert_eq!(outcome, RunOutcome::DeliveryFailed);
    assert_eq!(*ledger.saves.lock().unwrap(), 0);
    assert!(ledger.state.lock().unwrap().is_empty());
}

#[tokio::test]
async fn alerted_symbol_is_not_repeated_within_the_same_day() {
    let source = source_with(&[quote("XYZ", 100.0, 110.0, 5_000_000, 1_000_000)]);

    let mut already = AlertedSet::new();
    already.mark_alerted(["XYZ"]);
    let ledger = Arc::new(MemoryLedger {
        state: Mutex::new(already),
        written_at: Mutex::new(Some(SystemTime::from(regular_hours()))),
        ..Default::default()
    });
    let notifier = Arc::new(RecordingNotifier::default());

    let outcome = runner(source, ledger.clone(), notifier.clone(), run_cfg(&["XYZ"]))
        .run(regular_hours())
        .await;

    assert_eq!(
        outcome,
        RunOutcome::Delivered {
            movers: 0,
            newly_alerted: 0
        }
    );

    let sent = notifier.sent.lock().unwrap();
    assert!(sent[0].contains("No stocks moving more than"));
    assert_eq!(*ledger.saves.lock().unwrap(), 0);
}

#[tokio::test]
async fn new_trading_day_re_arms_previously_alerted_symbols() {
    let source = source_with(&[quote("XYZ", 100.0, 103.0, 2_000_000, 1_000_000)]);

    let mut yesterday_set = AlertedSet::new();
    yesterday_set.mark_alerted(["XYZ"]);
    let ledger = Arc::new(MemoryLedger {
        state: Mutex::new(yesterday_set),
        written_at: Mutex::new(Some(SystemTime::from(eastern(2025, 6, 4, 15, 0)))),
        ..Default::default()
    });
    let notifier = Arc::new(RecordingNotifier::default());

    let outcome = runner(source, ledger.clone(), notifier, run_cfg(&["XYZ"]))
        .run(regular_hours())
        .await;

    assert_eq!(
        outcome,
        RunOutcome::Delivered {
            movers: 1,
            newly_alerted: 1
        }
    );
    assert!(ledger.state.lock().unwrap().contains("XYZ"));
    assert_eq!(*ledger.saves.lock().unwrap(), 1);
}

#[tokio::test]
async fn closed_session_sends_the_sector_panel_only() {
    let mut cfg = run_cfg(&["XYZ"]);
    cfg.sector_tickers = vec!["SPY".to_string()];

    let mut spy = quote("SPY", 510.0, 512.0, 0, 0);
    spy.short_name = Some("SPDR S&P 500".to_string());
    let source = source_with(&[spy, quote("XYZ", 100.0, 103.0, 2_000_000, 1_000_000)]);

    let ledger = Arc::new(MemoryLedger::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let outcome = runner(source, ledger.clone(), notifier.clone(), cfg)
        .run(eastern(2025, 6, 5, 20, 0))
        .await;

    assert_eq!(outcome, RunOutcome::MarketClosed);

    let sent = notifier.sent.lock().unwrap();
    assert!(sent[0].contains("(CLOSED)"));
    assert!(sent[0].contains("*📈 Market Sectors*"));
    assert!(sent[0].contains("`SPY` SPDR S&P 500"));
    assert!(!sent[0].contains("Top Gainers"));
    assert_eq!(*ledger.saves.lock().unwrap(), 0);
}

#[tokio::test]
async fn truncated_movers_stay_eligible_for_the_next_run() {
    let quotes: Vec<Quote> = (0..7)
        .map(|i| {
            quote(
                &format!("TK{i}"),
                100.0,
                103.0 + i as f64,
                2_000_000,
                1_000_000,
            )
        })
        .collect();
    let universe: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();

    let source = source_with(&quotes);
    let ledger = Arc::new(MemoryLedger::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let outcome = runner(source, ledger.clone(), notifier, run_cfg(&universe))
        .run(regular_hours())
        .await;

    assert_eq!(
        outcome,
        RunOutcome::Delivered {
            movers: 7,
            newly_alerted: 6
        }
    );

    // The smallest gainer missed the display cut and was not marked.
    let state = ledger.state.lock().unwrap();
    assert_eq!(state.len(), 6);
    assert!(!state.contains("TK0"));
}

#[tokio::test]
async fn per_symbol_failures_do_not_abort_the_batch() {
    let source = source_with(&[quote("GOOD", 100.0, 103.0, 2_000_000, 1_000_000)]);
    let ledger = Arc::new(MemoryLedger::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let outcome = runner(
        source,
        ledger,
        notifier.clone(),
        run_cfg(&["GOOD", "BROKEN"]),
    )
    .run(regular_hours())
    .await;

    assert_eq!(
        outcome,
        RunOutcome::Delivered {
            movers: 1,
            newly_alerted: 1
        }
    );
    assert!(notifier.sent.lock().unwrap()[0].contains("`GOOD`"));
}

#[tokio::test]
async fn ledger_write_failure_still_counts_as_delivered() {
    let source = source_with(&[quote("XYZ", 100.0, 103.0, 2_000_000, 1_000_000)]);
    let ledger = Arc::new(MemoryLedger {
        fail_saves: true,
        ..Default::default()
    });
    let notifier = Arc::new(RecordingNotifier::default());

    let outcome = runner(source, ledger.clone(), notifier.clone(), run_cfg(&["XYZ"]))
        .run(regular_hours())
        .await;

    assert_eq!(
        outcome,
        RunOutcome::Delivered {
            movers: 1,
            newly_alerted: 1
        }
    );
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}
