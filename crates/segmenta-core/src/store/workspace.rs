use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use segmenta_api::ResourceClient;

use super::EntityStore;
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{Campaign, EntityId, Router, Segment};

/// The three collection stores over one shared client.
pub struct Workspace {
    client: Arc<ResourceClient>,
    pub routers: EntityStore<Router>,
    pub campaigns: EntityStore<Campaign>,
    pub segments: EntityStore<Segment>,
}

impl Workspace {
    pub fn new(client: Arc<ResourceClient>) -> Self {
        Self {
            routers: EntityStore::new(Arc::clone(&client)),
            campaigns: EntityStore::new(Arc::clone(&client)),
            segments: EntityStore::new(Arc::clone(&client)),
            client,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        Ok(Self::new(config.build_client()?))
    }

    pub fn client(&self) -> &Arc<ResourceClient> {
        &self.client
    }

    /// Flat list of group names from the groups endpoint.
    pub async fn fetch_groups(&self) -> Result<Vec<String>, CoreError> {
        let groups = self.client.list_groups().await?;
        debug!(count = groups.len(), "groups loaded");
        Ok(groups)
    }

    /// Fetch all three collections concurrently. Every store is refreshed
    /// even when another fails; the first error is returned.
    pub async fn refresh_all(&self) -> Result<(), CoreError> {
        let (routers, campaigns, segments) = tokio::join!(
            self.routers.fetch_all(),
            self.campaigns.fetch_all(),
            self.segments.fetch_all(),
        );
        routers?;
        campaigns?;
        segments?;
        Ok(())
    }

    /// Campaign id -> name, for resolving segment references.
    pub fn campaign_names(&self) -> HashMap<EntityId, String> {
        self.campaigns
            .snapshot()
            .iter()
            .filter_map(|c| Some((c.id.clone(), c.name.clone()?)))
            .collect()
    }
}
