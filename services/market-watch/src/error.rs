//! Error taxonomy for the snapshot pipeline
//!
//! Two failure classes cross stage boundaries: a failed whitelist
//! bootstrap (fatal, no degraded mode) and a failed snapshot page
//! (recoverable, the previous view is retained). Neither is ever
//! allowed to discard the current materialized view.

use thiserror::Error;

use crate::sources::SourceError;

/// Pipeline-level errors.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The reference catalog could not be retrieved at startup.
    /// Fatal: the process must not proceed with an empty whitelist.
    #[error("reference catalog unavailable: {0}")]
    UpstreamUnavailable(#[source] SourceError),

    /// One or more snapshot pages failed. Partial results are
    /// discarded; the caller keeps the previous cycle's view and the
    /// next scheduled cycle retries.
    #[error("snapshot page {page} failed: {source}")]
    PartialFetchFailure {
        page: u32,
        #[source]
        source: SourceError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_fetch_display_names_page() {
        let err = WatchError::PartialFetchFailure {
            page: 2,
            source: SourceError::Status {
                status: 429,
                url: "https://snapshots.example/markets".to_string(),
            },
        };
        assert!(err.to_string().contains("page 2"));
        assert!(err.to_string().contains("429"));
    }
}
