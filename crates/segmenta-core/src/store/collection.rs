// ── Ordered reactive entity collection ──
//
// The cached list lives behind a `watch` channel as an `Arc<Vec<T>>`:
// readers take cheap snapshot clones, every mutation publishes a new
// snapshot and bumps a version counter.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{EntityId, Resource};

/// The cached array for one collection, in server / insertion order.
pub(crate) struct EntityCollection<T: Resource> {
    /// Current list, republished on every mutation.
    snapshot: watch::Sender<Arc<Vec<T>>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,
}

impl<T: Resource> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);
        Self { snapshot, version }
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<T>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Replace the whole list with an existing snapshot (no copy).
    pub(crate) fn restore(&self, items: Arc<Vec<T>>) {
        // `send_replace` updates unconditionally, even with zero receivers.
        self.snapshot.send_replace(items);
        self.bump_version();
    }

    /// Replace the whole list.
    pub(crate) fn replace(&self, items: Vec<T>) {
        self.restore(Arc::new(items));
    }

    /// Insert at the head of the list.
    pub(crate) fn prepend(&self, item: T) {
        let current = self.snapshot();
        let mut next = Vec::with_capacity(current.len() + 1);
        next.push(item);
        next.extend(current.iter().cloned());
        self.replace(next);
    }

    /// Rebuild the list, replacing every entity whose id matches.
    /// Returns how many entities were replaced.
    pub(crate) fn replace_matching(&self, id: &EntityId, f: impl Fn(&T) -> T) -> usize {
        let current = self.snapshot();
        let mut hits = 0;
        let next = current
            .iter()
            .map(|item| {
                if item.id() == id {
                    hits += 1;
                    f(item)
                } else {
                    item.clone()
                }
            })
            .collect();
        if hits > 0 {
            self.replace(next);
        }
        hits
    }

    /// Remove every entity with `id`. Returns how many were removed.
    pub(crate) fn remove(&self, id: &EntityId) -> usize {
        let current = self.snapshot();
        let next: Vec<T> = current.iter().filter(|i| i.id() != id).cloned().collect();
        let removed = current.len() - next.len();
        if removed > 0 {
            self.replace(next);
        }
        removed
    }

    /// First entity with `id`.
    pub(crate) fn get(&self, id: &EntityId) -> Option<T> {
        self.snapshot.borrow().iter().find(|i| i.id() == id).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}
