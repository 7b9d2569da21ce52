//! Memoized collection construction
//!
//! A collection is built at most once; concurrent first callers wait for the
//! same construction and then share the result.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::ContentCollection;

/// Lazily built, shared collection
#[derive(Debug, Default)]
pub struct CollectionCache {
    cell: OnceCell<Arc<ContentCollection>>,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already built collection
    pub fn ready(collection: ContentCollection) -> Self {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(collection))),
        }
    }

    /// Return the cached collection, running `load` if nothing is cached yet
    ///
    /// If `load` fails the cache stays empty and the next call tries again.
    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<Arc<ContentCollection>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ContentCollection, E>>,
    {
        self.cell
            .get_or_try_init(|| async move { load().await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    /// The cached collection, if construction has already happened
    pub fn get(&self) -> Option<Arc<ContentCollection>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
