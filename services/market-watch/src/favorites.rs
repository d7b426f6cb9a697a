//! Favorites store — durable overlay of user-marked listing ids
//!
//! Membership is a set (insertion order irrelevant, duplicates
//! impossible); the persisted form is a single JSON blob holding a
//! sorted id list for stable files. Every toggle is persisted
//! immediately with a write-to-temp-then-rename so a crash never
//! leaves a half-written file. A missing or corrupt file rehydrates as
//! the empty set — storage trouble is recovered locally and never
//! surfaces to the pipeline.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use types::listing::ListingId;

/// Errors persisting the favorites blob. Reads never error; only
/// writes surface failures, and only to the toggle caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable set of favorited listing ids.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    ids: HashSet<ListingId>,
}

impl FavoritesStore {
    /// Rehydrate from the durable backing. Missing or corrupt storage
    /// defaults to the empty set.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<ListingId>>(&raw) {
                Ok(list) => list.into_iter().collect(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt favorites blob, starting empty");
                    HashSet::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "favorites unreadable, starting empty");
                HashSet::new()
            }
        };
        debug!(path = %path.display(), favorites = ids.len(), "favorites store loaded");
        Self { path, ids }
    }

    /// O(1) membership test.
    pub fn is_favorite(&self, id: &ListingId) -> bool {
        self.ids.contains(id)
    }

    /// Flip favorite status for `id`, persisting immediately.
    /// Returns the new status.
    pub fn toggle(&mut self, id: &ListingId) -> Result<bool, StoreError> {
        let now_favorite = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        };
        self.persist()?;
        Ok(now_favorite)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let mut sorted: Vec<&ListingId> = self.ids.iter().collect();
        sorted.sort();
        let blob = serde_json::to_string(&sorted)?;

        // Atomic write: write to tmp, flush, rename.
        let tmp_path = tmp_path_for(&self.path);
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(blob.as_bytes())?;
            file.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
