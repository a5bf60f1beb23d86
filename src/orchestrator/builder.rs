//! Builder for configuring orchestrator instances

use std::sync::Arc;
use std::time::Duration;

use super::Orchestrator;
use crate::Result;
use crate::cache::SnapshotCache;
use crate::client::{ChurnService, HttpChurnClient};
use crate::config::Config;

/// Main entry point for creating orchestrator instances.
pub struct ChurnLens;

impl ChurnLens {
    /// Create a new builder for configuring the orchestrator.
    pub fn builder() -> ChurnLensBuilder {
        ChurnLensBuilder::new()
    }
}

/// Builder for configuring orchestrator instances.
///
/// Explicit settings win over values from [`config`](Self::config); an
/// injected [`service`](Self::service) replaces the HTTP client entirely.
#[derive(Default)]
pub struct ChurnLensBuilder {
    config: Config,
    base_url: Option<String>,
    timeout: Option<Duration>,
    service: Option<Arc<dyn ChurnService>>,
    cache: Option<Arc<SnapshotCache>>,
}

impl ChurnLensBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Service base URL (e.g. `http://127.0.0.1:8000`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-request timeout for the HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom service implementation instead of the HTTP client.
    pub fn service(mut self, service: Arc<dyn ChurnService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Share a session-scoped snapshot cache across orchestrators.
    pub fn snapshot_cache(mut self, cache: Arc<SnapshotCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the orchestrator.
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Orchestrator> {
        let service = match self.service {
            Some(service) => service,
            None => {
                let base_url = self
                    .base_url
                    .unwrap_or_else(|| self.config.api.base_url.clone());
                let timeout = self.timeout.unwrap_or_else(|| self.config.api.timeout());
                let client = HttpChurnClient::with_timeout(base_url, timeout)?;
                Arc::new(client) as Arc<dyn ChurnService>
            }
        };
        let cache = self.cache.unwrap_or_default();
        Ok(Orchestrator::with_cache(service, cache))
    }
}
