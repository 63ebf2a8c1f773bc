//! Decides whether a single quote qualifies as a mover for the current
//! session, given the set of symbols already alerted.
//
//  This module is deliberately pure: no async, no IO.

use ledger::model::AlertedSet;
use market::clock::MarketSession;
use market::types::Quote;

use crate::types::{DetectorConfig, MoverRecord, Strength};

/// Outcome of classifying one quote.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Qualified(MoverRecord),
    /// A required field was absent or unusable (non-positive price or
    /// previous close, zero volume on either side of the baseline).
    MissingData,
    BelowThreshold,
    VolumeTooLight,
    AlreadyAlerted,
}

impl Verdict {
    pub fn is_qualified(&self) -> bool {
        matches!(self, Verdict::Qualified(_))
    }

    pub fn into_record(self) -> Option<MoverRecord> {
        match self {
            Verdict::Qualified(record) => Some(record),
            _ => None,
        }
    }

    /// Stable label for rejection tallies in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Verdict::Qualified(_) => "qualified",
            Verdict::MissingData => "missing_data",
            Verdict::BelowThreshold => "below_threshold",
            Verdict::VolumeTooLight => "volume_too_light",
            Verdict::AlreadyAlerted => "already_alerted",
        }
    }
}

/// Check whether one quote qualifies as a mover.
///
/// This enforces, in order:
///   - data completeness (percent change must be computable)
///   - the session's percent-change threshold, boundary inclusive
///   - the volume-spike filter vs the trailing average
///   - suppression of symbols already alerted
///
/// Deterministic: identical inputs always produce the identical verdict.
pub fn classify(
    quote: &Quote,
    session: MarketSession,
    alerted: &AlertedSet,
    cfg: &DetectorConfig,
) -> Verdict {
    let (Some(prev), Some(price), Some(volume), Some(avg_volume)) = (
        quote.previous_close,
        quote.last_price,
        quote.last_volume,
        quote.average_volume,
    ) else {
        return Verdict::MissingData;
    };

    if prev <= 0.0 || price <= 0.0 {
        return Verdict::MissingData;
    }

    // A zero volume on either side makes the spike ratio meaningless.
    if volume == 0 || avg_volume == 0 {
        return Verdict::MissingData;
    }

    let percent = (price - prev) / prev * 100.0;

    let threshold = match session {
        MarketSession::PreMarket => cfg.premarket_threshold_pct,
        _ => cfg.regular_threshold_pct,
    };

    if percent.abs() < threshold {
        return Verdict::BelowThreshold;
    }

    if (volume as f64) < avg_volume as f64 * cfg.volume_spike_multiplier {
        return Verdict::VolumeTooLight;
    }

    if alerted.contains(&quote.symbol) {
        return Verdict::AlreadyAlerted;
    }

    Verdict::Qualified(MoverRecord {
        symbol: quote.symbol.clone(),
        percent: round2(percent),
        price: round2(price),
        strength: Strength::from_percent(percent),
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
