//! Alias resolver / whitelist filter
//!
//! Retains only listings whose symbol matches the whitelist in one of
//! three candidate forms, evaluated in strict priority order:
//! 1. the raw (uppercased) symbol,
//! 2. the symbol with the thousand-multiplier prefix,
//! 3. the symbol with the million-multiplier prefix.
//!
//! Direct matches take precedence over synthetic multiplier variants
//! so a genuinely listed asset is never mislabeled as a rebased one,
//! and the thousand form beats the million form when both exist.

use tracing::debug;

use types::listing::Listing;
use types::whitelist::Whitelist;

/// Synthetic rebase prefix for thousand-multiplied contracts.
pub const THOUSAND_PREFIX: &str = "1000";
/// Synthetic rebase prefix for million-multiplied contracts.
pub const MILLION_PREFIX: &str = "1000000";

/// Resolve the whitelist form a symbol matches, if any.
fn resolve_alias(symbol_upper: &str, whitelist: &Whitelist) -> Option<String> {
    for prefix in ["", THOUSAND_PREFIX, MILLION_PREFIX] {
        let candidate = format!("{prefix}{symbol_upper}");
        if whitelist.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Filter listings against the whitelist, tagging each survivor with
/// the alias form it matched. Listings with no matching form are
/// dropped.
pub fn resolve(listings: Vec<Listing>, whitelist: &Whitelist) -> Vec<Listing> {
    let total = listings.len();
    let resolved: Vec<Listing> = listings
        .into_iter()
        .filter_map(|mut listing| {
            let alias = resolve_alias(&listing.symbol_upper(), whitelist)?;
            listing.alias = Some(alias);
            Some(listing)
        })
        .collect();
    debug!(total, retained = resolved.len(), "listings resolved against whitelist");
    resolved
}
