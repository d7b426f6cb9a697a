//! View reconciler — identity-keyed, minimal-mutation diff
//!
//! The `MaterializedView` is the one piece of state that survives
//! across refresh cycles on the presentation side: an identity-keyed
//! mapping from listing id to a row handle, plus the display order.
//! Reconciling a newly computed ordered listing set against it has
//! exactly three operations:
//! 1. update-in-place for ids already present (the row's handle, and
//!    with it any transient presentation state, is preserved),
//! 2. create-and-insert for new ids,
//! 3. prune ids absent from the new set.
//!
//! The final order is exactly the input order; sequential re-append of
//! existing rows is sufficient here — the entity count is bounded and
//! small, so no positional-diff/LCS machinery is warranted.
//!
//! This stage performs no I/O and cannot fail. Duplicate ids in the
//! input are a precondition violation: debug builds assert, release
//! builds log and keep the first occurrence.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use types::listing::{Listing, ListingId};

/// Opaque identity of a presentation row, assigned at creation and
/// never changed by updates. Stands in for the rendered element whose
/// transient state (focus, animation) must survive reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowHandle(u64);

impl RowHandle {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// The mutable displayed fields of one row. Rewritten wholesale on
/// every update; the row's identity lives in its handle, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFields {
    pub symbol: String,
    pub display_name: String,
    pub image_ref: String,
    pub rank: Option<u32>,
    pub price: Option<f64>,
    pub change_24h_pct: Option<f64>,
    pub volume_24h: Option<f64>,
    pub market_cap: Option<f64>,
    /// Whitelist form the listing resolved to, falling back to a
    /// generic perpetual tag when unresolved.
    pub alias_tag: String,
    pub favorite: bool,
}

impl RowFields {
    fn from_listing(listing: &Listing, favorite: bool) -> Self {
        Self {
            symbol: listing.symbol_upper(),
            display_name: listing.display_name.clone(),
            image_ref: listing.image_ref.clone(),
            rank: listing.rank,
            price: listing.price,
            change_24h_pct: listing.change_24h_pct,
            volume_24h: listing.volume_24h,
            market_cap: listing.market_cap,
            alias_tag: listing.alias.clone().unwrap_or_else(|| "PERP".to_string()),
            favorite,
        }
    }
}

/// One materialized presentation row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: ListingId,
    pub handle: RowHandle,
    pub fields: RowFields,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    /// Rows that already existed and had their fields rewritten.
    pub updated: usize,
    /// Rows created for ids not previously in the view.
    pub inserted: usize,
    /// Rows pruned because their id left the filtered set.
    pub removed: usize,
    /// Duplicate input ids dropped (precondition violation).
    pub duplicates_dropped: usize,
}

impl ReconcileStats {
    /// True when the pass changed no structure — the idempotent case.
    pub fn is_structural_noop(&self) -> bool {
        self.inserted == 0 && self.removed == 0
    }
}

/// The previous cycle's materialized, ordered row set.
///
/// Invariant: after every `reconcile`, the id set equals exactly the
/// id set of the listings passed in — no stale leftovers, no missing
/// current matches.
#[derive(Debug, Default)]
pub struct MaterializedView {
    rows: HashMap<ListingId, Row>,
    order: Vec<ListingId>,
    next_handle: u64,
}

impl MaterializedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the view against the authoritative next ordered set.
    ///
    /// `is_favorite` supplies the favorite glyph for each row; it is a
    /// display concern only and never affects membership or order.
    pub fn reconcile<F>(&mut self, next: &[Listing], is_favorite: F) -> ReconcileStats
    where
        F: Fn(&ListingId) -> bool,
    {
        let mut stats = ReconcileStats::default();
        let mut seen: HashSet<ListingId> = HashSet::with_capacity(next.len());
        let mut order: Vec<ListingId> = Vec::with_capacity(next.len());

        for listing in next {
            if !seen.insert(listing.id.clone()) {
                debug_assert!(false, "duplicate listing id in reconcile input: {}", listing.id);
                warn!(id = %listing.id, "duplicate listing id dropped, keeping first occurrence");
                stats.duplicates_dropped += 1;
                continue;
            }

            let fields = RowFields::from_listing(listing, is_favorite(&listing.id));
            match self.rows.get_mut(&listing.id) {
                Some(row) => {
                    // Update in place: handle untouched.
                    row.fields = fields;
                    stats.updated += 1;
                }
                None => {
                    let handle = RowHandle(self.next_handle);
                    self.next_handle += 1;
                    self.rows.insert(
                        listing.id.clone(),
                        Row {
                            id: listing.id.clone(),
                            handle,
                            fields,
                        },
                    );
                    stats.inserted += 1;
                }
            }
            order.push(listing.id.clone());
        }

        // Prune rows whose id left the filtered set.
        let before = self.rows.len();
        self.rows.retain(|id, _| seen.contains(id));
        stats.removed = before - self.rows.len();

        self.order = order;
        stats
    }

    /// Display order of the current rows.
    pub fn ordered_ids(&self) -> &[ListingId] {
        &self.order
    }

    /// Rows in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    pub fn get(&self, id: &ListingId) -> Option<&Row> {
        self.rows.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, symbol: &str, price: f64) -> Listing {
        Listing {
            id: ListingId::new(id),
            symbol: symbol.to_string(),
            display_name: symbol.to_uppercase(),
            image_ref: String::new(),
            rank: Some(1),
            price: Some(price),
            change_24h_pct: None,
            volume_24h: None,
            market_cap: None,
            alias: Some(symbol.to_uppercase()),
        }
    }

    fn no_favorites(_: &ListingId) -> bool {
        false
    }

    #[test]
    fn test_initial_reconcile_inserts_all() {
        let mut view = MaterializedView::new();
        let next = vec![listing("a", "aaa", 1.0), listing("b", "bbb", 2.0)];

        let stats = view.reconcile(&next, no_favorites);
        assert_eq!(stats.inserted, 2);
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.removed, 0);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_reconcile_idempotent() {
        let mut view = MaterializedView::new();
        let next = vec![listing("a", "aaa", 1.0), listing("b", "bbb", 2.0)];

        view.reconcile(&next, no_favorites);
        let handles: Vec<RowHandle> = view.iter().map(|r| r.handle).collect();

        let stats = view.reconcile(&next, no_favorites);
        assert!(stats.is_structural_noop());
        assert_eq!(stats.updated, 2);

        let handles_after: Vec<RowHandle> = view.iter().map(|r| r.handle).collect();
        assert_eq!(handles, handles_after, "handles must survive reconciliation");
    }

    #[test]
    fn test_update_in_place_preserves_handle() {
        let mut view = MaterializedView::new();
        view.reconcile(&[listing("a", "aaa", 1.0)], no_favorites);
        let handle = view.get(&ListingId::new("a")).unwrap().handle;

        view.reconcile(&[listing("a", "aaa", 99.0)], no_favorites);
        let row = view.get(&ListingId::new("a")).unwrap();
        assert_eq!(row.handle, handle);
        assert_eq!(row.fields.price, Some(99.0));
    }

    #[test]
    fn test_pruning_removes_departed_ids() {
        let mut view = MaterializedView::new();
        view.reconcile(
            &[listing("a", "aaa", 1.0), listing("b", "bbb", 2.0)],
            no_favorites,
        );

        let stats = view.reconcile(&[listing("b", "bbb", 2.5)], no_favorites);
        assert_eq!(stats.removed, 1);
        assert_eq!(view.len(), 1);
        assert!(view.get(&ListingId::new("a")).is_none());
        assert_eq!(view.ordered_ids(), &[ListingId::new("b")]);
    }

    #[test]
    fn test_view_id_set_matches_input_exactly() {
        let mut view = MaterializedView::new();
        view.reconcile(
            &[listing("a", "aaa", 1.0), listing("b", "bbb", 2.0)],
            no_favorites,
        );

        let next = vec![
            listing("b", "bbb", 2.0),
            listing("c", "ccc", 3.0),
            listing("d", "ddd", 4.0),
        ];
        view.reconcile(&next, no_favorites);

        assert_eq!(view.len(), next.len());
        for l in &next {
            assert!(view.get(&l.id).is_some());
        }
    }

    #[test]
    fn test_order_follows_input_order() {
        let mut view = MaterializedView::new();
        view.reconcile(
            &[listing("a", "aaa", 1.0), listing("b", "bbb", 2.0)],
            no_favorites,
        );

        // Same ids, reversed order.
        view.reconcile(
            &[listing("b", "bbb", 2.0), listing("a", "aaa", 1.0)],
            no_favorites,
        );
        let ids: Vec<&str> = view.ordered_ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "duplicate listing id"))]
    fn test_duplicate_ids_rejected_in_debug() {
        let mut view = MaterializedView::new();
        let next = vec![listing("a", "aaa", 1.0), listing("a", "aaa", 2.0)];
        let stats = view.reconcile(&next, no_favorites);

        // Release behavior: first occurrence wins, duplicate counted.
        assert_eq!(stats.duplicates_dropped, 1);
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(&ListingId::new("a")).unwrap().fields.price, Some(1.0));
    }

    #[test]
    fn test_favorite_glyph_updates_with_resolver() {
        let mut view = MaterializedView::new();
        view.reconcile(&[listing("a", "aaa", 1.0)], no_favorites);
        assert!(!view.get(&ListingId::new("a")).unwrap().fields.favorite);

        view.reconcile(&[listing("a", "aaa", 1.0)], |id| id.as_str() == "a");
        assert!(view.get(&ListingId::new("a")).unwrap().fields.favorite);
    }

    #[test]
    fn test_alias_tag_falls_back_to_perp() {
        let mut view = MaterializedView::new();
        let mut l = listing("a", "aaa", 1.0);
        l.alias = None;
        view.reconcile(&[l], no_favorites);
        assert_eq!(view.get(&ListingId::new("a")).unwrap().fields.alias_tag, "PERP");
    }
}
