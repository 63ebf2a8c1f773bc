//! Sector / ETF panel assembly.
//!
//! The panel tops every digest, market open or not. Each row is
//! best-effort: a ticker whose data cannot be fetched renders as N/A
//! instead of dropping the row or the panel.

use futures::{StreamExt, stream};
use tracing::debug;

use market::source::QuoteSource;
use market::types::SectorRow;

/// Build one panel row per ticker, preserving input order.
pub async fn sector_snapshot(
    source: &dyn QuoteSource,
    tickers: &[String],
    concurrency: usize,
) -> Vec<SectorRow> {
    stream::iter(tickers.iter().cloned())
        .map(|symbol| async move { sector_row(source, symbol).await })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn sector_row(source: &dyn QuoteSource, symbol: String) -> SectorRow {
    let quote = match source.quote(&symbol).await {
        Ok(q) => Some(q),
        Err(e) => {
            debug!(symbol = %symbol, error = %e, "sector quote unavailable");
            None
        }
    };

    let name = quote
        .as_ref()
        .and_then(|q| q.short_name.clone())
        .unwrap_or_else(|| symbol.clone());

    // Fast path: the snapshot carries both price and a usable previous
    // close.
    if let Some(q) = &quote {
        if let (Some(price), Some(prev)) = (q.last_price, q.previous_close) {
            if prev > 0.0 {
                return SectorRow {
                    symbol,
                    name,
                    price: Some(price),
                    percent: Some((price - prev) / prev * 100.0),
                };
            }
        }
    }

    // Fallback: derive the change from trailing daily closes.
    match source.history(&symbol, 2).await {
        Ok(closes) if closes.len() >= 2 => {
            let prev = closes[closes.len() - 2];
            let last = closes[closes.len() - 1];
            let percent = (prev > 0.0).then(|| (last - prev) / prev * 100.0);

            SectorRow {
                symbol,
                name,
                price: Some(last),
                percent,
            }
        }
        Ok(closes) if closes.len() == 1 => SectorRow {
            symbol,
            name,
            price: Some(closes[0]),
            percent: Some(0.0),
        },
        Ok(_) => SectorRow {
            symbol,
            name,
            price: None,
            percent: None,
        },
        Err(e) => {
            debug!(symbol = %symbol, error = %e, "sector history unavailable");
            SectorRow {
                symbol,
                name,
                price: quote.as_ref().and_then(|q| q.last_price),
                percent: None,
            }
        }
    }
}
