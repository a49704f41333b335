// ── Optimistic mutation transactions ──
//
// Pending (snapshot held, optimistic view visible) -> Committed | RolledBack.
// Terminal transitions consume the transaction, so each one ends exactly
// once. A pending transaction that is dropped (its future was cancelled)
// rolls back.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use super::collection::EntityCollection;
use crate::model::{EntityId, Resource};

/// Lifecycle state of an optimistic mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Pending,
    Committed,
    RolledBack,
}

/// Counters over every transaction a store has opened.
#[derive(Debug, Default)]
pub(crate) struct TxLog {
    opened: AtomicU64,
    committed: AtomicU64,
    rolled_back: AtomicU64,
}

impl TxLog {
    pub(crate) fn counts(&self) -> TxCounts {
        let opened = self.opened.load(Ordering::Acquire);
        let committed = self.committed.load(Ordering::Acquire);
        let rolled_back = self.rolled_back.load(Ordering::Acquire);
        TxCounts {
            committed,
            rolled_back,
            pending: opened.saturating_sub(committed + rolled_back),
        }
    }
}

/// Point-in-time transaction totals for a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxCounts {
    pub pending: u64,
    pub committed: u64,
    pub rolled_back: u64,
}

/// An open optimistic mutation over one collection.
pub(crate) struct Transaction<'a, T: Resource> {
    collection: &'a EntityCollection<T>,
    log: &'a TxLog,
    id: EntityId,
    /// `Some` while pending.
    snapshot: Option<Arc<Vec<T>>>,
}

impl<'a, T: Resource> Transaction<'a, T> {
    /// Capture the whole array; the caller applies the optimistic change next.
    pub(crate) fn begin(collection: &'a EntityCollection<T>, log: &'a TxLog, id: EntityId) -> Self {
        log.opened.fetch_add(1, Ordering::AcqRel);
        debug!(collection = %T::COLLECTION, %id, "transaction pending");
        Self {
            collection,
            log,
            id,
            snapshot: Some(collection.snapshot()),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> TxState {
        debug_assert!(self.snapshot.is_some());
        TxState::Pending
    }

    /// Server confirmed: drop the snapshot.
    pub(crate) fn commit(mut self) -> TxState {
        self.snapshot = None;
        self.log.committed.fetch_add(1, Ordering::AcqRel);
        debug!(collection = %T::COLLECTION, id = %self.id, "transaction committed");
        TxState::Committed
    }

    /// Server refused: put the whole pre-mutation array back.
    pub(crate) fn rollback(mut self) -> TxState {
        self.restore();
        TxState::RolledBack
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.collection.restore(snapshot);
            self.log.rolled_back.fetch_add(1, Ordering::AcqRel);
            warn!(collection = %T::COLLECTION, id = %self.id, "transaction rolled back");
        }
    }
}

impl<T: Resource> Drop for Transaction<'_, T> {
    fn drop(&mut self) {
        if self.snapshot.is_some() {
            warn!(collection = %T::COLLECTION, id = %self.id, "pending transaction dropped");
            self.restore();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Campaign;
    use serde_json::json;

    fn campaign(id: i64, active: bool) -> Campaign {
        serde_json::from_value(json!({ "id": id, "active": active })).unwrap()
    }

    fn setup() -> (EntityCollection<Campaign>, TxLog) {
        let col = EntityCollection::new();
        col.replace(vec![campaign(5, true), campaign(6, true)]);
        (col, TxLog::default())
    }

    #[test]
    fn begin_is_pending() {
        let (col, log) = setup();
        let tx = Transaction::begin(&col, &log, EntityId::Numeric(5));
        assert_eq!(tx.state(), TxState::Pending);
        assert_eq!(log.counts().pending, 1);
        assert_eq!(tx.commit(), TxState::Committed);
    }

    #[test]
    fn commit_keeps_optimistic_state() {
        let (col, log) = setup();
        let tx = Transaction::begin(&col, &log, EntityId::Numeric(5));
        col.replace_matching(&EntityId::Numeric(5), |_| campaign(5, false));

        assert_eq!(tx.commit(), TxState::Committed);
        assert!(!col.get(&EntityId::Numeric(5)).unwrap().is_active());
        assert_eq!(
            log.counts(),
            TxCounts {
                pending: 0,
                committed: 1,
                rolled_back: 0
            }
        );
    }

    #[test]
    fn rollback_restores_the_exact_snapshot() {
        let (col, log) = setup();
        let before = col.snapshot();
        let tx = Transaction::begin(&col, &log, EntityId::Numeric(5));
        col.replace_matching(&EntityId::Numeric(5), |_| campaign(5, false));

        assert_eq!(tx.rollback(), TxState::RolledBack);
        assert!(Arc::ptr_eq(&before, &col.snapshot()));
        assert_eq!(log.counts().rolled_back, 1);
    }

    #[test]
    fn dropping_a_pending_transaction_rolls_back() {
        let (col, log) = setup();
        let before = col.snapshot();
        {
            let _tx = Transaction::begin(&col, &log, EntityId::Numeric(6));
            col.replace_matching(&EntityId::Numeric(6), |_| campaign(6, false));
        }
        assert_eq!(*col.snapshot(), *before);
        assert_eq!(
            log.counts(),
            TxCounts {
                pending: 0,
                committed: 0,
                rolled_back: 1
            }
        );
    }
}
