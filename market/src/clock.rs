//! Trading-session clock.
//!
//! Maps an instant to the exchange's trading session using a fixed daily
//! schedule in the exchange's local wall-clock time:
//!
//!   [04:00, 09:30)  pre-market
//!   [09:30, 16:00]  regular hours (the close itself still counts)
//!   otherwise       closed
//
//  Re-evaluated on every run: a long-lived process could straddle a
//  boundary, so the session is never cached.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

/// Phase of the trading day. Governs which movement threshold applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketSession {
    PreMarket,
    Regular,
    Closed,
}

impl fmt::Display for MarketSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketSession::PreMarket => "PRE-MARKET",
            MarketSession::Regular => "MARKET",
            MarketSession::Closed => "CLOSED",
        };
        f.write_str(s)
    }
}

/// Session clock for a single exchange.
#[derive(Debug, Clone, Copy)]
pub struct MarketClock {
    tz: Tz,
}

impl MarketClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// US equities schedule in `US/Eastern`.
    pub fn us_eastern() -> Self {
        Self::new(chrono_tz::US::Eastern)
    }

    fn pre_market_open() -> NaiveTime {
        NaiveTime::from_hms_opt(4, 0, 0).unwrap()
    }

    fn market_open() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 30, 0).unwrap()
    }

    fn market_close() -> NaiveTime {
        NaiveTime::from_hms_opt(16, 0, 0).unwrap()
    }

    /// Session the given instant falls in, by exchange wall-clock.
    pub fn session_at(&self, now: DateTime<Utc>) -> MarketSession {
        let local = now.with_timezone(&self.tz).time();

        if local >= Self::pre_market_open() && local < Self::market_open() {
            MarketSession::PreMarket
        } else if local >= Self::market_open() && local <= Self::market_close() {
            MarketSession::Regular
        } else {
            MarketSession::Closed
        }
    }

    /// Exchange-local calendar date of the instant.
    ///
    /// An evening in the exchange's timezone is already the next UTC day;
    /// ledger staleness checks must compare these, not UTC dates.
    pub fn trading_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }
}
