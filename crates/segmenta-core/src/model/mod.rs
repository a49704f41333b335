// ── Domain model ──
//
// Canonical types for the three backend collections. Every non-id field
// is optional: the backend may omit any of them, and absent values are
// rendered as placeholders by the presentation layer.

mod campaign;
mod entity_id;
mod router;
mod segment;
pub(crate) mod timestamp;

use serde::Serialize;
use serde::de::DeserializeOwned;

use segmenta_api::Collection;

pub use campaign::{Campaign, CampaignPatch, NewCampaign};
pub use entity_id::EntityId;
pub use router::{NewRouter, Router, RouterPatch};
pub use segment::{Gender, NewSegment, Segment, SegmentPatch};

/// How in-flight updates are tracked for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTracking {
    /// A single flag: one edit at a time from the presentation's view.
    Global,
    /// One flag per entity id: rows are edited independently.
    PerId,
}

/// A backend collection element managed by an `EntityStore`.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
    const UPDATE_TRACKING: UpdateTracking;

    fn id(&self) -> &EntityId;
}

impl Resource for Router {
    const COLLECTION: Collection = Collection::Routers;
    const UPDATE_TRACKING: UpdateTracking = UpdateTracking::PerId;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Resource for Campaign {
    const COLLECTION: Collection = Collection::Campaigns;
    const UPDATE_TRACKING: UpdateTracking = UpdateTracking::Global;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Resource for Segment {
    const COLLECTION: Collection = Collection::Segments;
    const UPDATE_TRACKING: UpdateTracking = UpdateTracking::Global;

    fn id(&self) -> &EntityId {
        &self.id
    }
}
