//! Market listing records and identifiers
//!
//! A `Listing` is one snapshot-source record for a traded instrument.
//! Listings are ephemeral: every successful fetch cycle fully replaces
//! them, and only the `ListingId` carries identity across cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable unique identifier assigned by the snapshot source.
///
/// This is the reconciliation key: two listings from different cycles
/// refer to the same instrument exactly when their ids are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// Create a new ListingId from a source-provided string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One ranked market listing as delivered by the snapshot source.
///
/// Numeric fields are `None` when the source reports them as
/// unavailable; `change_24h_pct` keeps `None` distinguishable from
/// `Some(0.0)` even though both display as a flat 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Reconciliation key, immutable for the instrument's lifetime.
    pub id: ListingId,
    /// Short ticker. Matching is case-insensitive; display is uppercase.
    pub symbol: String,
    /// Human-readable instrument name.
    pub display_name: String,
    /// Opaque reference to a visual asset; not interpreted by the core.
    pub image_ref: String,
    /// Listing rank. `None` means unranked and sorts after all ranked entries.
    pub rank: Option<u32>,
    /// Last price. `None`/zero means unavailable.
    pub price: Option<f64>,
    /// Signed 24h change percentage.
    pub change_24h_pct: Option<f64>,
    /// 24h traded volume.
    pub volume_24h: Option<f64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Whitelist form the symbol resolved to, set by the resolver.
    pub alias: Option<String>,
}

/// Rank sentinel for unranked listings. Larger than any real rank so
/// ascending order lists unranked entries last.
pub const UNRANKED_SENTINEL: u32 = u32::MAX;

impl Listing {
    /// Rank with the unranked sentinel applied, for comparator use.
    pub fn rank_or_max(&self) -> u32 {
        self.rank.unwrap_or(UNRANKED_SENTINEL)
    }

    /// Price normalized to 0 when unavailable. Affects tie position
    /// when sorting by price; callers rely on this normalization.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// 24h change normalized to 0 when unavailable.
    pub fn change_or_zero(&self) -> f64 {
        self.change_24h_pct.unwrap_or(0.0)
    }

    /// 24h volume normalized to 0 when unavailable.
    pub fn volume_or_zero(&self) -> f64 {
        self.volume_24h.unwrap_or(0.0)
    }

    /// Market cap normalized to 0 when unavailable.
    pub fn market_cap_or_zero(&self) -> f64 {
        self.market_cap.unwrap_or(0.0)
    }

    /// Uppercased ticker for display and whitelist matching.
    pub fn symbol_upper(&self) -> String {
        self.symbol.to_uppercase()
    }
}
