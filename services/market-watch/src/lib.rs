//! Market Watch Service
//!
//! Periodically pulls ranked market listings from a snapshot source,
//! restricts them to instruments also tradable on a reference venue,
//! and reconciles the result into a materialized view that updates in
//! place between refreshes:
//! - One-shot whitelist synchronization from the venue's contract catalog
//! - Concurrent multi-page snapshot fetches, all-or-nothing per cycle
//! - Alias resolution against the whitelist (direct and rebase-multiplier forms)
//! - Stable, field-selectable sort with deterministic tie-breaks
//! - Identity-keyed view reconciliation (update / insert / prune)
//! - Durable favorites overlay independent of refresh cycles
//! - Fixed-interval poll scheduler with an overlap guard
//!
//! # Architecture
//!
//! ```text
//!    Poll Scheduler (fixed interval, overlap-guarded)
//!         │
//!     ┌───▼────┐
//!     │Fetcher │  ← N pages concurrently, fail on any page
//!     └───┬────┘
//!         │
//!     ┌───▼────────┐
//!     │Resolver    │  ← whitelist filter + alias tagging
//!     └───┬────────┘
//!         │  (view mode / search restriction)
//!     ┌───▼────┐
//!     │Sort    │
//!     └───┬────┘
//!         │
//!     ┌───▼──────────┐
//!     │Reconciler    │  ← identity-keyed diff into MaterializedView
//!     └──────────────┘
//! ```

pub mod config;
pub mod error;
pub mod favorites;
pub mod fetcher;
pub mod format;
pub mod pipeline;
pub mod resolver;
pub mod scheduler;
pub mod sort;
pub mod sources;
pub mod view;
pub mod whitelist;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
