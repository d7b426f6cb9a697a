//! Normalized tradable-symbol whitelist
//!
//! Built once at startup from the reference venue's catalog and
//! read-only afterwards: re-sync is a restart-only operation, never
//! part of the poll cycle. All entries are stored uppercased.

use std::collections::HashSet;

/// Set of normalized (uppercase) symbols tradable on the reference venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    symbols: HashSet<String>,
}

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, normalizing to uppercase. Set semantics absorb
    /// duplicates.
    pub fn insert(&mut self, symbol: impl AsRef<str>) {
        self.symbols.insert(symbol.as_ref().to_uppercase());
    }

    /// Membership test. Callers are expected to pass uppercased input;
    /// entries are stored uppercased so a lowercase query never matches.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<String> for Whitelist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut whitelist = Whitelist::new();
        for symbol in iter {
            whitelist.insert(symbol);
        }
        whitelist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_normalizes_to_uppercase() {
        let mut whitelist = Whitelist::new();
        whitelist.insert("btc");
        assert!(whitelist.contains("BTC"));
        assert!(!whitelist.contains("btc"));
    }

    #[test]
    fn test_duplicates_absorbed() {
        let mut whitelist = Whitelist::new();
        whitelist.insert("ETH");
        whitelist.insert("eth");
        whitelist.insert("Eth");
        assert_eq!(whitelist.len(), 1);
    }

    #[test]
    fn test_from_iterator() {
        let whitelist: Whitelist =
            ["btc".to_string(), "eth".to_string(), "BTC".to_string()]
                .into_iter()
                .collect();
        assert_eq!(whitelist.len(), 2);
        assert!(whitelist.contains("ETH"));
    }

    #[test]
    fn test_empty() {
        let whitelist = Whitelist::new();
        assert!(whitelist.is_empty());
        assert!(!whitelist.contains("BTC"));
    }
}
