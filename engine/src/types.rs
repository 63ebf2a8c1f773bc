/// Qualification thresholds. Values come from configuration, not code.
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Minimum |percent change| during pre-market. Stricter than the
    /// regular threshold: thin pre-market books move easily.
    pub premarket_threshold_pct: f64,

    /// Minimum |percent change| during regular hours.
    pub regular_threshold_pct: f64,

    /// Last volume must reach average volume times this multiplier.
    /// Movement on light volume is noise, not conviction.
    pub volume_spike_multiplier: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            premarket_threshold_pct: 1.0,
            regular_threshold_pct: 2.0,
            volume_spike_multiplier: 1.5,
        }
    }
}

/// Display emphasis bucket, from the magnitude of the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    None,
    Elevated,
    Extreme,
}

impl Strength {
    /// 5% and up is extreme, 3% elevated, by absolute percent change.
    pub fn from_percent(percent: f64) -> Self {
        let magnitude = percent.abs();
        if magnitude >= 5.0 {
            Strength::Extreme
        } else if magnitude >= 3.0 {
            Strength::Elevated
        } else {
            Strength::None
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Strength::Extreme => "🚨",
            Strength::Elevated => "🔥",
            Strength::None => "",
        }
    }
}

/// A ticker that qualified as a mover in this run.
#[derive(Debug, Clone, PartialEq)]
pub struct MoverRecord {
    pub symbol: String,

    /// Signed percent change vs previous close, rounded to 2 decimals.
    pub percent: f64,

    /// Last price, rounded to 2 decimals.
    pub price: f64,

    pub strength: Strength,
}
