use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Symbols already surfaced as movers. The only state that crosses runs.
///
/// A symbol in this set is suppressed by the detector until the set is
/// cleared. Persisted as a plain JSON array of strings; the `BTreeSet`
/// keeps the serialized form stable run over run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertedSet {
    symbols: BTreeSet<String>,
}

impl AlertedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Set union: add every symbol, ignoring those already present.
    pub fn mark_alerted<I, S>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}
