//! View preference types: sort field, direction, and view mode
//!
//! The presentation surface feeds these back into the pipeline as
//! inbound events; they select how the filtered set is restricted and
//! ordered, never what is fetched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Field the listing view is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Rank,
    Symbol,
    Price,
    Change24h,
    Volume24h,
    MarketCap,
}

impl SortField {
    /// All fields, in display-column order.
    pub const ALL: [SortField; 6] = [
        SortField::Rank,
        SortField::Symbol,
        SortField::Price,
        SortField::Change24h,
        SortField::Volume24h,
        SortField::MarketCap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Rank => "rank",
            SortField::Symbol => "symbol",
            SortField::Price => "price",
            SortField::Change24h => "change_24h",
            SortField::Volume24h => "volume_24h",
            SortField::MarketCap => "market_cap",
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        SortField::Rank
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown sort field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort field: {0}")]
pub struct ParseSortFieldError(pub String);

impl FromStr for SortField {
    type Err = ParseSortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rank" => Ok(SortField::Rank),
            "symbol" => Ok(SortField::Symbol),
            "price" => Ok(SortField::Price),
            "change_24h" => Ok(SortField::Change24h),
            "volume_24h" => Ok(SortField::Volume24h),
            "market_cap" => Ok(SortField::MarketCap),
            other => Err(ParseSortFieldError(other.to_string())),
        }
    }
}

/// Comparator polarity. Flipping direction never alters tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

/// Which subset of the filtered listings the view presents.
///
/// `Favorites` restricts to favorited ids after filtering, before
/// sorting; it never affects what is fetched or whitelisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    All,
    Favorites,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::All
    }
}
