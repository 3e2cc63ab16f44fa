//! Ordered set of symbols a batch run covers.

use serde::Serialize;

use crate::Symbol;

const DEFAULT_ENTRIES: [(&str, &str); 5] = [
    ("NMDC.NS", "NMDC Ltd"),
    ("NHPC.NS", "NHPC Ltd"),
    ("IOB.NS", "Indian Overseas Bank"),
    ("CASTROLIND.NS", "Castrol India"),
    ("ASHOKLEY.NS", "Ashok Leyland"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchlistEntry {
    pub symbol: Symbol,
    pub name: String,
}

/// Symbols with display names, iterated in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry; a symbol already present keeps its first position
    /// and takes the new name.
    pub fn with_entry(mut self, symbol: Symbol, name: impl Into<String>) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.symbol == symbol) {
            Some(existing) => existing.name = name,
            None => self.entries.push(WatchlistEntry { symbol, name }),
        }
        self
    }

    /// Watchlist of exactly `symbols`, in the given order.
    ///
    /// Names come from `self` where known; other symbols are shown by ticker.
    pub fn select(&self, symbols: &[Symbol]) -> Self {
        symbols.iter().fold(Self::new(), |selected, symbol| {
            let name = self
                .name_of(symbol)
                .map_or_else(|| symbol.to_string(), str::to_owned);
            selected.with_entry(symbol.clone(), name)
        })
    }

    pub fn name_of(&self, symbol: &Symbol) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.symbol == symbol)
            .map(|entry| entry.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchlistEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        DEFAULT_ENTRIES
            .iter()
            .filter_map(|(ticker, name)| Symbol::parse(ticker).ok().map(|symbol| (symbol, *name)))
            .fold(Self::new(), |list, (symbol, name)| list.with_entry(symbol, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid")
    }

    #[test]
    fn default_lists_nse_names_in_order() {
        let list = Watchlist::default();
        let tickers: Vec<&str> = list.iter().map(|entry| entry.symbol.as_str()).collect();

        assert_eq!(
            tickers,
            ["NMDC.NS", "NHPC.NS", "IOB.NS", "CASTROLIND.NS", "ASHOKLEY.NS"]
        );
        assert_eq!(list.name_of(&symbol("IOB.NS")), Some("Indian Overseas Bank"));
    }

    #[test]
    fn select_keeps_known_names_and_caller_order() {
        let selected = Watchlist::default().select(&[symbol("ashokley.ns"), symbol("TCS.NS")]);
        let entries: Vec<(&str, &str)> = selected
            .iter()
            .map(|entry| (entry.symbol.as_str(), entry.name.as_str()))
            .collect();

        assert_eq!(entries, [("ASHOKLEY.NS", "Ashok Leyland"), ("TCS.NS", "TCS.NS")]);
    }

    #[test]
    fn duplicate_symbols_collapse_to_first_position() {
        let list = Watchlist::new()
            .with_entry(symbol("A"), "first")
            .with_entry(symbol("B"), "b")
            .with_entry(symbol("A"), "renamed");

        assert_eq!(list.len(), 2);
        assert_eq!(list.name_of(&symbol("A")), Some("renamed"));
    }
}
