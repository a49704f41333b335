// ── Runtime connection configuration ──
//
// Describes *how* to reach the backend. Never touches disk: the CLI
// builds a `ClientConfig` from its profile and hands it in.

use std::sync::Arc;
use std::time::Duration;

use segmenta_api::{ResourceClient, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// Configuration for one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root (e.g. `https://backend.example.com`); the
    /// `/api/v2/campaigns` prefix is appended by the client.
    pub base_url: Url,
    /// Request timeout. `None` means no timeout.
    pub timeout: Option<Duration>,
    /// Accept self-signed certificates.
    pub insecure: bool,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
            insecure: false,
        }
    }

    /// Build the shared resource client every store is injected with.
    pub fn build_client(&self) -> Result<Arc<ResourceClient>, CoreError> {
        let transport = TransportConfig {
            timeout: self.timeout,
            accept_invalid_certs: self.insecure,
            ..TransportConfig::default()
        };
        let client = ResourceClient::new(self.base_url.as_str(), &transport)?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_with_api_prefix() {
        let cfg = ClientConfig::new("http://localhost:8000".parse().unwrap());
        let client = cfg.build_client().unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "http://localhost:8000/api/v2/campaigns"
        );
    }
}
