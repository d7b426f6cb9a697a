//! Sort engine
//!
//! Total ordering over the filtered listing set by a selectable field
//! and direction. A lookup table maps each sort field to a pure
//! comparator; direction reverses comparator polarity only, so equal
//! keys compare `Equal` either way and the stable sort preserves input
//! order for ties. That stability is what keeps rows from jittering on
//! repeated cycles with unchanged data.
//!
//! Null handling: unranked listings compare through the rank sentinel
//! (last in ascending order); missing numeric values are normalized to
//! 0 by the accessors on `Listing` before comparison, which fixes their
//! tie position deterministically.

use std::cmp::Ordering;

use types::listing::Listing;
use types::view::{SortDirection, SortField};

/// A pure comparator over two listings.
pub type Comparator = fn(&Listing, &Listing) -> Ordering;

fn cmp_rank(a: &Listing, b: &Listing) -> Ordering {
    a.rank_or_max().cmp(&b.rank_or_max())
}

fn cmp_symbol(a: &Listing, b: &Listing) -> Ordering {
    a.symbol.to_lowercase().cmp(&b.symbol.to_lowercase())
}

fn cmp_price(a: &Listing, b: &Listing) -> Ordering {
    a.price_or_zero().total_cmp(&b.price_or_zero())
}

fn cmp_change(a: &Listing, b: &Listing) -> Ordering {
    a.change_or_zero().total_cmp(&b.change_or_zero())
}

fn cmp_volume(a: &Listing, b: &Listing) -> Ordering {
    a.volume_or_zero().total_cmp(&b.volume_or_zero())
}

fn cmp_market_cap(a: &Listing, b: &Listing) -> Ordering {
    a.market_cap_or_zero().total_cmp(&b.market_cap_or_zero())
}

/// Comparator lookup table keyed by sort field.
pub fn comparator(field: SortField) -> Comparator {
    match field {
        SortField::Rank => cmp_rank,
        SortField::Symbol => cmp_symbol,
        SortField::Price => cmp_price,
        SortField::Change24h => cmp_change,
        SortField::Volume24h => cmp_volume,
        SortField::MarketCap => cmp_market_cap,
    }
}

/// Stable sort of the listing slice by `field` in `direction`.
pub fn sort_listings(listings: &mut [Listing], field: SortField, direction: SortDirection) {
    let cmp = comparator(field);
    match direction {
        SortDirection::Ascending => listings.sort_by(|a, b| cmp(a, b)),
        SortDirection::Descending => listings.sort_by(|a, b| cmp(a, b).reverse()),
    }
}
