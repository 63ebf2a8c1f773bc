//! Ranks qualifying movers and renders the outbound digest text.
//
//  Pure formatting: no async, no IO.

use market::clock::MarketSession;
use market::types::SectorRow;

use crate::types::MoverRecord;

/// Display knobs for the rendered digest.
#[derive(Debug, Clone, Copy)]
pub struct DigestConfig {
    /// Rows shown per gainer/loser list.
    pub display_count: usize,

    /// Threshold echoed in the "no movers" line.
    pub active_threshold_pct: f64,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            display_count: 6,
            active_threshold_pct: 2.0,
        }
    }
}

/// Movers partitioned by direction and ranked for display.
#[derive(Debug, Clone, Default)]
pub struct RankedMovers {
    pub gainers: Vec<MoverRecord>,
    pub losers: Vec<MoverRecord>,
}

impl RankedMovers {
    pub fn is_empty(&self) -> bool {
        self.gainers.is_empty() && self.losers.is_empty()
    }
}

/// The rendered digest plus the symbols it actually shows.
#[derive(Debug, Clone)]
pub struct Digest {
    pub text: String,

    /// Symbols present in the rendered lists. Exactly these are marked
    /// alerted once delivery succeeds; movers cut by truncation stay
    /// eligible for the next run.
    pub displayed: Vec<String>,
}

/// Partition records by direction and rank each side.
///
/// Gainers descend by percent, losers ascend (most negative first).
/// Equal percents fall back to symbol order so output is deterministic.
pub fn rank(records: &[MoverRecord], display_count: usize) -> RankedMovers {
    let mut gainers: Vec<MoverRecord> =
        records.iter().filter(|r| r.percent > 0.0).cloned().collect();
    let mut losers: Vec<MoverRecord> =
        records.iter().filter(|r| r.percent < 0.0).cloned().collect();

    gainers.sort_by(|a, b| b.percent.total_cmp(&a.percent).then_with(|| a.symbol.cmp(&b.symbol)));
    losers.sort_by(|a, b| a.percent.total_cmp(&b.percent).then_with(|| a.symbol.cmp(&b.symbol)));

    gainers.truncate(display_count);
    losers.truncate(display_count);

    RankedMovers { gainers, losers }
}

/// Compose the full digest for one run.
///
/// The sector panel, when supplied, always renders first, mover results
/// or not. During a closed session only the header and panel are emitted.
/// With no qualifying movers at all, a single "nothing moving yet" line
/// stands in for the empty sections.
pub fn build(
    records: &[MoverRecord],
    session: MarketSession,
    sectors: Option<&[SectorRow]>,
    cfg: &DigestConfig,
) -> Digest {
    let mut text = format!("📊 *US Market Snapshot* ({session})\n");

    if let Some(rows) = sectors {
        text.push_str("\n*📈 Market Sectors*\n");
        for row in rows {
            text.push_str(&sector_line(row));
        }
    }

    if session == MarketSession::Closed {
        return Digest {
            text,
            displayed: Vec::new(),
        };
    }

    let ranked = rank(records, cfg.display_count);

    if ranked.is_empty() {
        text.push_str(&format!(
            "\nℹ️ No stocks moving more than ±{:.1}% with volume yet.\n",
            cfg.active_threshold_pct
        ));
        return Digest {
            text,
            displayed: Vec::new(),
        };
    }

    if !ranked.gainers.is_empty() {
        text.push_str("\n*🚀 Top Gainers*\n");
        for record in &ranked.gainers {
            text.push_str(&mover_line(record));
        }
    }

    if !ranked.losers.is_empty() {
        text.push_str("\n*🔻 Top Losers*\n");
        for record in &ranked.losers {
            text.push_str(&mover_line(record));
        }
    }

    let displayed = ranked
        .gainers
        .iter()
        .chain(ranked.losers.iter())
        .map(|r| r.symbol.clone())
        .collect();

    Digest { text, displayed }
}

fn mover_line(record: &MoverRecord) -> String {
    let emoji = record.strength.emoji();
    if emoji.is_empty() {
        format!(
            "`{}` {:.2}% (${:.2})\n",
            record.symbol, record.percent, record.price
        )
    } else {
        format!(
            "{} `{}` {:.2}% (${:.2})\n",
            emoji, record.symbol, record.percent, record.price
        )
    }
}

fn sector_line(row: &SectorRow) -> String {
    let price = match row.price {
        Some(p) => format!("{p:.2}"),
        None => "N/A".to_string(),
    };
    let percent = match row.percent {
        Some(p) => format!("{p:.2}%"),
        None => "N/A".to_string(),
    };

    format!(
        "`{}` {} — ${} ({}) {}\n",
        row.symbol,
        row.name,
        price,
        percent,
        direction_icon(row.percent)
    )
}

/// 🟢 up, 🔴 down, ⚪ flat or unknown.
fn direction_icon(percent: Option<f64>) -> &'static str {
    match percent {
        Some(p) if p > 0.0 => "🟢",
        Some(p) if p < 0.0 => "🔴",
        _ => "⚪",
    }
}
