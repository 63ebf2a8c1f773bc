//! Default ticker universe and sector panel.
//!
//! The scan list is the union of a large-cap base list, a personal
//! watchlist, and a handful of crypto-adjacent names. The panel is a
//! fixed set of broad-market and sector ETFs.

use std::collections::BTreeSet;

/// Sector and broad-market ETFs, always shown at the top of the digest.
const SECTOR_TICKERS: &[&str] = &[
    "CQQQ", "VWRA", "SPY", "CSPX", "XLB", "XLC", "XLE", "XLF", "XLG", "XLI", "XLK", "XLP", "XLU",
    "XLV", "XLY",
];

/// Names tracked regardless of index membership.
const WATCHLIST: &[&str] = &["MA", "V", "WM", "PL", "UNG", "CHA", "FTNT", "UNH"];

/// Crypto-adjacent equities.
const CRYPTO_STOCKS: &[&str] = &["IBIT", "BMNR", "NU", "SUIG", "RIOT"];

/// Large-cap scan base, grouped roughly by sector.
const BASE_TICKERS: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "AMZN", "META", "GOOGL", "TSLA", "PLTR",
    "AMD", "NFLX", "AVGO", "INTC", "QCOM", "MU", "TXN", "AMAT", "LRCX", "KLAC",
    "JPM", "BAC", "WFC", "GS", "MS", "C", "SCHW", "BLK", "AXP", "USB", "PNC",
    "XOM", "CVX", "COP", "SLB", "OXY", "MPC", "VLO", "PSX",
    "JNJ", "PFE", "MRK", "LLY", "UNH", "ABBV", "TMO", "ABT", "DHR", "MDT",
    "HD", "LOW", "NKE", "MCD", "SBUX", "BKNG", "TJX",
    "WMT", "COST", "PG", "KO", "PEP", "PM", "MO", "CL",
    "BA", "CAT", "GE", "RTX", "DE", "UPS", "FDX", "MMM", "HON", "ETN",
    "DIS", "CMCSA", "VZ", "T", "TMUS", "SOFI",
    "LIN", "APD", "ECL", "SHW", "FCX", "NEM",
    "BXSL", "PBDC",
];

/// Sorted, de-duplicated union of every scan list.
pub fn default_universe() -> Vec<String> {
    BASE_TICKERS
        .iter()
        .chain(WATCHLIST)
        .chain(CRYPTO_STOCKS)
        .map(|s| s.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn sector_tickers() -> Vec<String> {
    SECTOR_TICKERS.iter().map(|s| s.to_string()).collect()
}
