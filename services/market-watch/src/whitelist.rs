//! Whitelist synchronizer
//!
//! One-shot bootstrap that builds the tradable-symbol whitelist from
//! the reference venue's contract catalog. Must complete before the
//! first fetch cycle; on failure the process stays uninitialized
//! rather than silently filtering against an empty set.

use tracing::{info, warn};

use types::whitelist::Whitelist;

use crate::error::WatchError;
use crate::sources::ContractCatalog;

/// Contract style retained from the catalog.
pub const CONTRACT_TYPE: &str = "PERPETUAL";
/// Quote asset retained from the catalog, also the suffix stripped
/// from contract symbols.
pub const QUOTE_ASSET: &str = "USDT";

/// Build the whitelist from the reference catalog.
///
/// For every perpetual contract quoted in [`QUOTE_ASSET`], two forms
/// are inserted: the base asset symbol and the contract symbol with
/// the quote suffix stripped, both uppercased. Set semantics absorb
/// the frequent case where the two coincide.
pub async fn synchronize(catalog: &dyn ContractCatalog) -> Result<Whitelist, WatchError> {
    let contracts = catalog
        .fetch_contracts()
        .await
        .map_err(WatchError::UpstreamUnavailable)?;

    let mut whitelist = Whitelist::new();
    for contract in &contracts {
        if contract.contract_type != CONTRACT_TYPE || contract.quote_asset != QUOTE_ASSET {
            continue;
        }
        whitelist.insert(&contract.base_asset);
        let stripped = contract
            .symbol
            .strip_suffix(QUOTE_ASSET)
            .unwrap_or(&contract.symbol);
        whitelist.insert(stripped);
    }

    if whitelist.is_empty() {
        warn!(
            contracts = contracts.len(),
            "catalog contained no matching perpetual contracts; every listing will be filtered out"
        );
    } else {
        info!(symbols = whitelist.len(), "tradable-symbol whitelist synchronized");
    }

    Ok(whitelist)
}
