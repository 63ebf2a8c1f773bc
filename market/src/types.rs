/// Point-in-time snapshot for a single ticker.
///
/// Fetched fresh each run and never persisted. Optional fields stay
/// `None` when the provider does not publish them; the detector decides
/// what an absent field means.
#[derive(Debug, Clone, Default)]
pub struct Quote {
    pub symbol: String,

    /// Last traded (or pre-market) price.
    pub last_price: Option<f64>,

    /// Previous regular-session close.
    pub previous_close: Option<f64>,

    /// Cumulative volume of the current session.
    pub last_volume: Option<u64>,

    /// Trailing 10-day mean daily volume.
    pub average_volume: Option<u64>,

    /// Human-readable instrument name, for the sector panel.
    pub short_name: Option<String>,
}

/// One row of the sector/ETF panel.
///
/// `None` price or percent renders as N/A; the panel never drops a row.
#[derive(Debug, Clone)]
pub struct SectorRow {
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub percent: Option<f64>,
}
