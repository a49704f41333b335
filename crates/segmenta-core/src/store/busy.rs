// ── Busy-state flags ──
//
// Transient "operation in flight" markers used by presentation surfaces to
// disable controls. They are plain booleans, not counters: the first
// completing operation clears a flag even if another of the same kind is
// still in flight.

use dashmap::DashSet;
use tokio::sync::watch;

use crate::model::EntityId;

/// What kind of operation a [`BusyGuard`] marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Busy {
    Loading,
    Creating,
    Updating,
    UpdatingId(EntityId),
    Deleting(EntityId),
}

#[derive(Debug)]
pub(crate) struct BusyFlags {
    loading: watch::Sender<bool>,
    creating: watch::Sender<bool>,
    updating: watch::Sender<bool>,
    updating_ids: DashSet<EntityId>,
    deleting_ids: DashSet<EntityId>,
}

impl Default for BusyFlags {
    fn default() -> Self {
        Self {
            loading: watch::Sender::new(false),
            creating: watch::Sender::new(false),
            updating: watch::Sender::new(false),
            updating_ids: DashSet::new(),
            deleting_ids: DashSet::new(),
        }
    }
}

impl BusyFlags {
    /// Raise the flag for `kind`; it is lowered when the guard drops.
    pub(crate) fn enter(&self, kind: Busy) -> BusyGuard<'_> {
        self.set(&kind, true);
        BusyGuard { flags: self, kind }
    }

    pub(crate) fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub(crate) fn is_creating(&self) -> bool {
        *self.creating.borrow()
    }

    /// Any update in flight, global or per-id.
    pub(crate) fn is_updating(&self) -> bool {
        *self.updating.borrow() || !self.updating_ids.is_empty()
    }

    pub(crate) fn is_updating_id(&self, id: &EntityId) -> bool {
        self.updating_ids.contains(id)
    }

    pub(crate) fn is_deleting(&self, id: &EntityId) -> bool {
        self.deleting_ids.contains(id)
    }

    pub(crate) fn watch_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    fn set(&self, kind: &Busy, on: bool) {
        match kind {
            Busy::Loading => {
                self.loading.send_replace(on);
            }
            Busy::Creating => {
                self.creating.send_replace(on);
            }
            Busy::Updating => {
                self.updating.send_replace(on);
            }
            Busy::UpdatingId(id) => toggle(&self.updating_ids, id, on),
            Busy::Deleting(id) => toggle(&self.deleting_ids, id, on),
        }
    }
}

fn toggle(set: &DashSet<EntityId>, id: &EntityId, on: bool) {
    if on {
        set.insert(id.clone());
    } else {
        set.remove(id);
    }
}

/// Lowers its flag on drop, on every exit path.
pub(crate) struct BusyGuard<'a> {
    flags: &'a BusyFlags,
    kind: Busy,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flags.set(&self.kind, false);
    }
}
