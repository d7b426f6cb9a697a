//! Multi-page snapshot fetcher
//!
//! Issues all page requests concurrently and waits for all of them.
//! A failure on any page fails the whole fetch: a truncated ranked
//! snapshot would silently bias the filtered and sorted output, so
//! partial results are discarded and the caller keeps the previous
//! cycle's view.

use futures::future::try_join_all;
use tracing::debug;

use types::listing::Listing;

use crate::error::WatchError;
use crate::sources::SnapshotSource;

/// Fetch pages `1..=pages` concurrently and concatenate them in page
/// order. Each page's internal order is preserved; overall order is
/// irrelevant since a full sort follows.
pub async fn fetch_all<S>(
    source: &S,
    pages: u32,
    per_page: u32,
) -> Result<Vec<Listing>, WatchError>
where
    S: SnapshotSource + ?Sized,
{
    let requests = (1..=pages).map(|page| async move {
        source
            .fetch_page(page, per_page)
            .await
            .map_err(|source| WatchError::PartialFetchFailure { page, source })
    });

    let results = try_join_all(requests).await?;
    let merged: Vec<Listing> = results.into_iter().flatten().collect();
    debug!(pages, listings = merged.len(), "snapshot pages merged");
    Ok(merged)
}
