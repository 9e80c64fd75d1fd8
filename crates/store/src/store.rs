//! Shared handle over the datastore.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::state::StoreState;

/// Cloneable handle to the marketplace's single datastore.
///
/// Each operation runs a synchronous closure under the lock. Holding
/// the write guard for the whole closure is what makes checkout's
/// multi-row mutation (order + line items + stock decrements + cart
/// clearing) a single all-or-nothing unit: concurrent checkouts
/// against the same stock serialize here, so a sufficiency check and
/// the matching decrement can never be split by another writer.
///
/// Closures must validate before mutating; a closure that returns an
/// error after partial writes would break the all-or-nothing
/// contract.
#[derive(Clone, Default)]
pub struct MarketStore {
    state: Arc<RwLock<StoreState>>,
}

impl MarketStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only closure under the read lock.
    pub async fn with_read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Runs a mutating closure under the write lock. The closure is
    /// the transaction boundary.
    pub async fn with_write<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.state.write().await;
        f(&mut state)
    }
}
