// ── Entity stores ──
//
// One `EntityStore<T>` per backend collection. The store owns the cached
// array and mediates every mutation:
//
//   fetch_all  replace the cache with the server list (empty on failure)
//   create     POST, then prepend the server entity (not optimistic)
//   update     snapshot, merge patch locally, PUT, merge response | rollback
//   delete     DELETE, then filter the entity out (not optimistic)

mod busy;
mod collection;
mod payload;
mod transaction;
mod workspace;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use segmenta_api::ResourceClient;

use self::busy::{Busy, BusyFlags};
use self::collection::EntityCollection;
use self::transaction::{Transaction, TxLog};
use crate::error::CoreError;
use crate::model::{EntityId, Resource, Router, RouterPatch, UpdateTracking};
use crate::stream::EntityStream;

pub use transaction::{TxCounts, TxState};
pub use workspace::Workspace;

/// Client-side cache and mutation mediator for one collection.
pub struct EntityStore<T: Resource> {
    client: Arc<ResourceClient>,
    items: EntityCollection<T>,
    busy: BusyFlags,
    txs: TxLog,
    last_error: watch::Sender<Option<String>>,
}

impl<T: Resource> EntityStore<T> {
    pub fn new(client: Arc<ResourceClient>) -> Self {
        Self {
            client,
            items: EntityCollection::new(),
            busy: BusyFlags::default(),
            txs: TxLog::default(),
            last_error: watch::Sender::new(None),
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Replace the cache with the server's list.
    ///
    /// On failure the cache is emptied, the error recorded, and also
    /// returned. Prior state is never merged.
    pub async fn fetch_all(&self) -> Result<Arc<Vec<T>>, CoreError> {
        let _busy = self.busy.enter(Busy::Loading);
        self.clear_error();
        debug!(collection = %T::COLLECTION, "fetching collection");

        match self.client.list::<T>(T::COLLECTION).await {
            Ok(items) => {
                info!(collection = %T::COLLECTION, count = items.len(), "collection loaded");
                self.items.replace(items);
                Ok(self.items.snapshot())
            }
            Err(e) => {
                self.items.replace(Vec::new());
                Err(self.record(e.into()))
            }
        }
    }

    /// POST a new entity. Top-level `null` / `""` fields are stripped from
    /// the body; the server's entity is prepended to the cache.
    pub async fn create<P>(&self, payload: &P) -> Result<T, CoreError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let _busy = self.busy.enter(Busy::Creating);
        self.clear_error();

        let body = match payload::to_object(payload) {
            Ok(map) => Value::Object(payload::clean(&map)),
            Err(e) => return Err(self.record(e)),
        };

        match self.client.create::<T, _>(T::COLLECTION, &body).await {
            Ok(created) => {
                info!(collection = %T::COLLECTION, id = %created.id(), "entity created");
                self.items.prepend(created.clone());
                Ok(created)
            }
            Err(e) => Err(self.record(e.into())),
        }
    }

    /// Optimistic update of every cached entity with `id`.
    ///
    /// The raw patch is merged locally before the request; the cleaned
    /// patch is sent. On success the server response is merged on top and
    /// the merged cached entity returned (`None` if `id` is not cached). On
    /// failure the whole array is restored to its pre-call snapshot.
    pub async fn update<P>(&self, id: &EntityId, patch: &P) -> Result<Option<T>, CoreError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let _busy = self.busy.enter(match T::UPDATE_TRACKING {
            UpdateTracking::Global => Busy::Updating,
            UpdateTracking::PerId => Busy::UpdatingId(id.clone()),
        });
        self.clear_error();

        let patch = match payload::to_object(patch) {
            Ok(map) => map,
            Err(e) => return Err(self.record(e)),
        };
        // A patch that cannot produce a valid entity is refused up front.
        if let Some(current) = self.items.get(id) {
            if let Err(e) = payload::merge(&current, &patch) {
                return Err(self.record(e));
            }
        }

        let tx = Transaction::begin(&self.items, &self.txs, id.clone());
        self.items
            .replace_matching(id, |item| payload::merge(item, &patch).unwrap_or_else(|_| item.clone()));

        let body = Value::Object(payload::clean(&patch));
        match self.client.update(T::COLLECTION, &id.to_string(), &body).await {
            Ok(Value::Object(response)) => {
                self.items.replace_matching(id, |item| {
                    payload::merge(item, &response).unwrap_or_else(|e| {
                        warn!(collection = %T::COLLECTION, %id, error = %e, "server response not mergeable; keeping local state");
                        item.clone()
                    })
                });
                tx.commit();
                Ok(self.items.get(id))
            }
            Ok(other) => {
                debug!(collection = %T::COLLECTION, %id, response = %other, "non-object update response");
                tx.commit();
                Ok(self.items.get(id))
            }
            Err(e) => {
                tx.rollback();
                Err(self.record(e.into()))
            }
        }
    }

    /// DELETE `id`; the cache is only touched once the server confirms.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let _busy = self.busy.enter(Busy::Deleting(id.clone()));
        self.clear_error();

        match self.client.delete(T::COLLECTION, &id.to_string()).await {
            Ok(()) => {
                let removed = self.items.remove(id);
                info!(collection = %T::COLLECTION, %id, removed, "entity deleted");
                Ok(())
            }
            Err(e) => Err(self.record(e.into())),
        }
    }

    // ── Cache access ─────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.items.snapshot()
    }

    pub fn subscribe(&self) -> EntityStream<T> {
        EntityStream::new(self.items.subscribe())
    }

    pub fn get(&self, id: &EntityId) -> Option<T> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.len() == 0
    }

    /// Replace the cache directly, without a request.
    pub fn set_all(&self, items: Vec<T>) {
        self.items.replace(items);
    }

    /// Monotonic counter bumped on every cache publication.
    pub fn version(&self) -> u64 {
        self.items.version()
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Message of the most recent failed operation, cleared when the next
    /// operation starts.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.busy.is_loading()
    }

    /// Reactive view of the loading flag.
    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.busy.watch_loading()
    }

    pub fn is_creating(&self) -> bool {
        self.busy.is_creating()
    }

    pub fn is_updating(&self) -> bool {
        self.busy.is_updating()
    }

    pub fn is_updating_id(&self, id: &EntityId) -> bool {
        self.busy.is_updating_id(id)
    }

    pub fn is_deleting(&self, id: &EntityId) -> bool {
        self.busy.is_deleting(id)
    }

    pub fn transactions(&self) -> TxCounts {
        self.txs.counts()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn clear_error(&self) {
        self.last_error.send_replace(None);
    }

    fn record(&self, err: CoreError) -> CoreError {
        warn!(collection = %T::COLLECTION, error = %err, "operation failed");
        self.last_error.send_replace(Some(err.to_string()));
        err
    }
}

impl EntityStore<Router> {
    /// Group-only patch: `update(id, {group_name})`.
    pub async fn set_group(&self, id: &EntityId, group: impl Into<String>) -> Result<Option<Router>, CoreError> {
        self.update(id, &RouterPatch::group(group)).await
    }
}
