use std::sync::{Arc, PoisonError, RwLock};

use crate::events::Snapshot;

/// A snapshot together with the refresh that produced it
#[derive(Debug, Clone, Default)]
pub struct Published {
    /// Increments on every successful refresh; 0 before the first
    pub generation: u64,
    /// Immutable pipeline output
    pub snapshot: Arc<Snapshot>,
}

/// Holder of the latest published snapshot.
///
/// Publication replaces one `Arc` under a write lock held only for the swap,
/// so readers see either the old snapshot or the new one, never a mix.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    inner: RwLock<Published>,
}

impl SnapshotCell {
    /// Empty cell at generation 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the current reference
    pub fn load(&self) -> Published {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot, returning the new publication
    pub fn publish(&self, snapshot: Snapshot) -> Published {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let published = Published {
            generation: guard.generation + 1,
            snapshot,
        };
        *guard = published.clone();
        published
    }

    /// Generation currently visible to readers
    pub fn generation(&self) -> u64 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }
}
