//! Types library for the market watch service
//!
//! This library provides the core type definitions shared across the
//! snapshot pipeline: listing records, identifiers, view preferences,
//! and the tradable-symbol whitelist.
//!
//! # Modules
//! - `listing`: Market listing records and identifiers
//! - `contract`: Reference-venue contract catalog entries
//! - `view`: Sort field/direction and view mode selection
//! - `whitelist`: Normalized tradable-symbol set

// Public modules
pub mod contract;
pub mod listing;
pub mod view;
pub mod whitelist;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::contract::*;
    pub use crate::listing::*;
    pub use crate::view::*;
    pub use crate::whitelist::*;
}
