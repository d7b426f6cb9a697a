//! Reference-venue contract catalog entries
//!
//! One `ContractSpec` per instrument in the reference venue's catalog.
//! The whitelist synchronizer consumes these once at startup.

use serde::{Deserialize, Serialize};

/// A single contract from the reference venue's instrument catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSpec {
    /// Contract style, e.g. "PERPETUAL".
    pub contract_type: String,
    /// Quote asset of the pair, e.g. "USDT".
    pub quote_asset: String,
    /// Base asset symbol, e.g. "BTC".
    pub base_asset: String,
    /// Full contract symbol, e.g. "BTCUSDT".
    pub symbol: String,
}

impl ContractSpec {
    pub fn new(
        contract_type: impl Into<String>,
        quote_asset: impl Into<String>,
        base_asset: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            contract_type: contract_type.into(),
            quote_asset: quote_asset.into(),
            base_asset: base_asset.into(),
            symbol: symbol.into(),
        }
    }
}
