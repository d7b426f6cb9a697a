//! Pipeline context — the single owner of all per-cycle mutable state
//!
//! The original system kept the current dataset, sort preferences, and
//! favorites as ambient globals; here they live in one context object
//! every stage receives explicitly. A cycle is fetch → resolve →
//! (view-mode / search restriction) → sort → reconcile; user actions
//! replay the in-memory stages against the cached resolved set without
//! refetching.
//!
//! Failure policy: a failed fetch leaves the cached set and the
//! materialized view untouched and only flips the status to stale.
//! No error discards the view.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use types::listing::{Listing, ListingId};
use types::view::{SortDirection, SortField, ViewMode};
use types::whitelist::Whitelist;

use crate::error::WatchError;
use crate::favorites::{FavoritesStore, StoreError};
use crate::fetcher::fetch_all;
use crate::resolver::resolve;
use crate::sort::sort_listings;
use crate::sources::SnapshotSource;
use crate::view::{MaterializedView, ReconcileStats};

/// Freshness of the presented view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// No successful cycle yet.
    Uninitialized,
    /// Last cycle succeeded at the given instant.
    Live { refreshed_at: DateTime<Utc> },
    /// A cycle failed; the view still shows data refreshed at `since`.
    Stale { since: DateTime<Utc> },
}

/// Outcome of one scheduled cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Fresh data was fetched and reconciled.
    Refreshed(ReconcileStats),
    /// The fetch failed; the previous view was retained unchanged.
    Retained(WatchError),
}

pub struct PipelineContext {
    whitelist: Whitelist,
    favorites: FavoritesStore,
    snapshot: Box<dyn SnapshotSource + Send + Sync>,
    pages: u32,
    per_page: u32,

    sort_field: SortField,
    direction: SortDirection,
    mode: ViewMode,
    search: Option<String>,

    /// Filtered, alias-tagged set from the last successful fetch.
    resolved: Vec<Listing>,
    view: MaterializedView,
    status: ViewStatus,
}

impl PipelineContext {
    pub fn new(
        whitelist: Whitelist,
        favorites: FavoritesStore,
        snapshot: Box<dyn SnapshotSource + Send + Sync>,
        pages: u32,
        per_page: u32,
    ) -> Self {
        Self {
            whitelist,
            favorites,
            snapshot,
            pages,
            per_page,
            sort_field: SortField::default(),
            direction: SortDirection::default(),
            mode: ViewMode::default(),
            search: None,
            resolved: Vec::new(),
            view: MaterializedView::new(),
            status: ViewStatus::Uninitialized,
        }
    }

    // ── Cycle stages ────────────────────────────────────────────────

    /// Fetch and resolve a fresh snapshot, replacing the cached set.
    /// On error the cache, view, and preferences are untouched.
    pub async fn refresh(&mut self) -> Result<usize, WatchError> {
        let raw = fetch_all(self.snapshot.as_ref(), self.pages, self.per_page).await?;
        self.resolved = resolve(raw, &self.whitelist);
        self.status = ViewStatus::Live {
            refreshed_at: Utc::now(),
        };
        Ok(self.resolved.len())
    }

    /// Restrict, sort, and reconcile the cached resolved set into the
    /// materialized view. Pure in-memory; cannot fail.
    pub fn rebuild(&mut self) -> ReconcileStats {
        let search = self.search.as_ref().map(|q| q.to_lowercase());
        let mut display: Vec<Listing> = self
            .resolved
            .iter()
            .filter(|l| match self.mode {
                ViewMode::All => true,
                ViewMode::Favorites => self.favorites.is_favorite(&l.id),
            })
            .filter(|l| match &search {
                Some(q) => {
                    l.display_name.to_lowercase().contains(q)
                        || l.symbol.to_lowercase().contains(q)
                }
                None => true,
            })
            .cloned()
            .collect();

        sort_listings(&mut display, self.sort_field, self.direction);

        let favorites = &self.favorites;
        let stats = self.view.reconcile(&display, |id| favorites.is_favorite(id));
        debug!(
            rows = self.view.len(),
            updated = stats.updated,
            inserted = stats.inserted,
            removed = stats.removed,
            "view rebuilt"
        );
        stats
    }

    /// Record a failed cycle: keep everything, mark the view stale.
    pub fn retain_previous(&mut self, err: &WatchError) {
        warn!(error = %err, rows = self.view.len(), "cycle failed, previous view retained");
        if let ViewStatus::Live { refreshed_at } = self.status {
            self.status = ViewStatus::Stale { since: refreshed_at };
        }
    }

    // ── Inbound user actions ────────────────────────────────────────

    /// Toggle favorite status for `id` and re-render. Returns the new
    /// status. Persistence failures surface here, not to the cycle.
    pub fn toggle_favorite(&mut self, id: &ListingId) -> Result<bool, StoreError> {
        let now_favorite = self.favorites.toggle(id)?;
        self.rebuild();
        Ok(now_favorite)
    }

    /// Select a sort field: re-selecting the active field flips the
    /// direction, a new field resets to ascending.
    pub fn select_sort(&mut self, field: SortField) {
        if field == self.sort_field {
            self.direction = self.direction.flip();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Ascending;
        }
        self.rebuild();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.rebuild();
    }

    /// Case-insensitive substring filter over name and symbol; `None`
    /// clears it.
    pub fn set_search(&mut self, query: Option<String>) {
        self.search = query.filter(|q| !q.is_empty());
        self.rebuild();
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn view(&self) -> &MaterializedView {
        &self.view
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_favorite(&self, id: &ListingId) -> bool {
        self.favorites.is_favorite(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    use crate::sources::SourceError;

    fn listing(id: &str, symbol: &str, rank: u32, price: f64) -> Listing {
        Listing {
            id: ListingId::new(id),
            symbol: symbol.to_string(),
            display_name: format!("{symbol} coin"),
            image_ref: String::new(),
            rank: Some(rank),
            price: Some(price),
            change_24h_pct: None,
            volume_24h: None,
            market_cap: None,
            alias: None,
        }
    }

    #[derive(Default)]
    struct FakeInner {
        pages: HashMap<u32, Vec<Listing>>,
        fail_pages: HashSet<u32>,
    }

    #[derive(Clone, Default)]
    struct FakeSource(Arc<Mutex<FakeInner>>);

    impl FakeSource {
        fn set_page(&self, page: u32, listings: Vec<Listing>) {
            self.0.lock().unwrap().pages.insert(page, listings);
        }

        fn fail_page(&self, page: u32) {
            self.0.lock().unwrap().fail_pages.insert(page);
        }

        fn clear_failures(&self) {
            self.0.lock().unwrap().fail_pages.clear();
        }
    }

    #[async_trait]
    impl SnapshotSource for FakeSource {
        async fn fetch_page(
            &self,
            page: u32,
            _per_page: u32,
        ) -> Result<Vec<Listing>, SourceError> {
            let inner = self.0.lock().unwrap();
            if inner.fail_pages.contains(&page) {
                return Err(SourceError::Status {
                    status: 500,
                    url: format!("fake://markets?page={page}"),
                });
            }
            Ok(inner.pages.get(&page).cloned().unwrap_or_default())
        }
    }

    fn whitelist(symbols: &[&str]) -> Whitelist {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    fn context(tmp: &TempDir, source: FakeSource, symbols: &[&str]) -> PipelineContext {
        let favorites = FavoritesStore::load(tmp.path().join("favorites.json"));
        PipelineContext::new(whitelist(symbols), favorites, Box::new(source), 1, 250)
    }

    fn view_ids(ctx: &PipelineContext) -> Vec<String> {
        ctx.view()
            .ordered_ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_refresh_then_rebuild_populates_view() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource::default();
        source.set_page(
            1,
            vec![listing("btc", "btc", 1, 65000.0), listing("unlisted", "xyz", 2, 1.0)],
        );
        let mut ctx = context(&tmp, source, &["BTC"]);

        let resolved = ctx.refresh().await.unwrap();
        assert_eq!(resolved, 1);
        assert!(matches!(ctx.status(), ViewStatus::Live { .. }));

        let stats = ctx.rebuild();
        assert_eq!(stats.inserted, 1);
        assert_eq!(view_ids(&ctx), vec!["btc"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_retains_view_and_goes_stale() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource::default();
        source.set_page(1, vec![listing("btc", "btc", 1, 65000.0)]);
        let mut ctx = context(&tmp, source.clone(), &["BTC"]);

        ctx.refresh().await.unwrap();
        ctx.rebuild();
        let before = view_ids(&ctx);

        source.fail_page(1);
        let err = ctx.refresh().await.unwrap_err();
        ctx.retain_previous(&err);

        assert_eq!(view_ids(&ctx), before);
        assert!(matches!(ctx.status(), ViewStatus::Stale { .. }));

        // Next cycle recovers.
        source.clear_failures();
        ctx.refresh().await.unwrap();
        assert!(matches!(ctx.status(), ViewStatus::Live { .. }));
    }

    #[tokio::test]
    async fn test_favorites_view_mode_restricts() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource::default();
        source.set_page(
            1,
            vec![listing("btc", "btc", 1, 65000.0), listing("eth", "eth", 2, 3000.0)],
        );
        let mut ctx = context(&tmp, source, &["BTC", "ETH"]);
        ctx.refresh().await.unwrap();
        ctx.rebuild();

        ctx.toggle_favorite(&ListingId::new("eth")).unwrap();
        ctx.set_view_mode(ViewMode::Favorites);
        assert_eq!(view_ids(&ctx), vec!["eth"]);

        ctx.set_view_mode(ViewMode::All);
        assert_eq!(view_ids(&ctx).len(), 2);
    }

    #[tokio::test]
    async fn test_select_sort_toggle_semantics() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource::default();
        source.set_page(
            1,
            vec![listing("btc", "btc", 1, 65000.0), listing("eth", "eth", 2, 3000.0)],
        );
        let mut ctx = context(&tmp, source, &["BTC", "ETH"]);
        ctx.refresh().await.unwrap();
        ctx.rebuild();

        assert_eq!(ctx.sort_field(), SortField::Rank);
        assert_eq!(ctx.direction(), SortDirection::Ascending);

        // Re-selecting the active field flips direction.
        ctx.select_sort(SortField::Rank);
        assert_eq!(ctx.direction(), SortDirection::Descending);
        assert_eq!(view_ids(&ctx), vec!["eth", "btc"]);

        // A new field resets to ascending.
        ctx.select_sort(SortField::Price);
        assert_eq!(ctx.sort_field(), SortField::Price);
        assert_eq!(ctx.direction(), SortDirection::Ascending);
        assert_eq!(view_ids(&ctx), vec!["eth", "btc"]);
    }

    #[tokio::test]
    async fn test_search_restricts_by_name_or_symbol() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource::default();
        source.set_page(
            1,
            vec![listing("btc", "btc", 1, 65000.0), listing("eth", "eth", 2, 3000.0)],
        );
        let mut ctx = context(&tmp, source, &["BTC", "ETH"]);
        ctx.refresh().await.unwrap();
        ctx.rebuild();

        ctx.set_search(Some("ET".to_string()));
        assert_eq!(view_ids(&ctx), vec!["eth"]);

        ctx.set_search(None);
        assert_eq!(view_ids(&ctx).len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_favorite_updates_glyph_in_place() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource::default();
        source.set_page(1, vec![listing("btc", "btc", 1, 65000.0)]);
        let mut ctx = context(&tmp, source, &["BTC"]);
        ctx.refresh().await.unwrap();
        ctx.rebuild();

        let id = ListingId::new("btc");
        let handle = ctx.view().get(&id).unwrap().handle;
        assert!(ctx.toggle_favorite(&id).unwrap());

        let row = ctx.view().get(&id).unwrap();
        assert!(row.fields.favorite);
        assert_eq!(row.handle, handle, "toggle must not recreate the row");
    }
}
