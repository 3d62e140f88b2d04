//! In-memory document store for tests.

use crate::local::ports::{DocumentStore, LocalStoreResult};
use std::sync::{Arc, PoisonError, RwLock};

/// Document store holding the document in memory.
///
/// Clones share the same document, which lets tests hand "the same disk"
/// to successive component instances when simulating reloads.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore<T> {
    cell: Arc<RwLock<Option<T>>>,
}

impl<T> InMemoryDocumentStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: Arc::new(RwLock::new(None)),
        }
    }
}

impl<T> Clone for InMemoryDocumentStore<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> DocumentStore<T> for InMemoryDocumentStore<T>
where
    T: Clone + Send + Sync,
{
    fn load(&self) -> LocalStoreResult<Option<T>> {
        Ok(self
            .cell
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, value: &T) -> LocalStoreResult<()> {
        *self.cell.write().unwrap_or_else(PoisonError::into_inner) = Some(value.clone());
        Ok(())
    }
}
