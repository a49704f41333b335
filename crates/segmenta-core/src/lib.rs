//! segmenta-core: cached entity stores, optimistic sync and derived views
//! between `segmenta-api` and presentation surfaces (the CLI).
//!
//! An [`EntityStore`] owns the client-side snapshot of one backend
//! collection. Updates are applied optimistically inside a transaction and
//! rolled back to the pre-call snapshot if the server refuses them; creates
//! and deletes wait for the server. The [`view`] module derives filtered,
//! sorted and paginated projections from a snapshot, and [`form`] validates
//! user input into typed payloads.

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod store;
pub mod stream;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ClientConfig;
pub use error::{CoreError, FieldErrors};
pub use store::{EntityStore, TxCounts, TxState, Workspace};
pub use stream::{EntityStream, EntityWatchStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Campaign, CampaignPatch, EntityId, Gender, NewCampaign, NewRouter, NewSegment, Resource, Router,
    RouterPatch, Segment, SegmentPatch, UpdateTracking,
};
