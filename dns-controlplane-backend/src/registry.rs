//! Started drivers indexed by pool server id.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;

use dns_controlplane_core::config::ConfigRegistry;
use dns_controlplane_core::types::{HealthStatus, RequestContext};

use crate::error::Result;
use crate::factory::create_backend;
use crate::options::build_pool_servers;
use crate::traits::Backend;

/// In-memory driver registry.
///
/// Cheap to clone; clones share the same drivers.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: Arc<RwLock<BTreeMap<String, Arc<dyn Backend>>>>,
}

impl BackendRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one driver per pool server of `backend` and register it.
    ///
    /// Returns the registered server ids. Drivers are not started.
    pub async fn load(&self, config: &ConfigRegistry, backend: &str) -> Result<Vec<String>> {
        let mut created = Vec::new();
        for server in build_pool_servers(config, backend)? {
            let id = server.id.clone();
            created.push((id, create_backend(server)?));
        }

        let mut backends = self.backends.write().await;
        let ids = created.iter().map(|(id, _)| id.clone()).collect();
        for (id, driver) in created {
            if backends.insert(id.clone(), driver).is_some() {
                log::warn!("Replaced backend registered for server {id}");
            }
        }
        log::info!("Loaded {backend} backend for servers {ids:?}");
        Ok(ids)
    }

    pub async fn register(&self, server_id: String, backend: Arc<dyn Backend>) {
        self.backends.write().await.insert(server_id, backend);
    }

    pub async fn unregister(&self, server_id: &str) {
        self.backends.write().await.remove(server_id);
    }

    pub async fn get(&self, server_id: &str) -> Option<Arc<dyn Backend>> {
        self.backends.read().await.get(server_id).cloned()
    }

    /// Registered server ids, sorted.
    pub async fn server_ids(&self) -> Vec<String> {
        self.backends.read().await.keys().cloned().collect()
    }

    async fn snapshot(&self) -> Vec<(String, Arc<dyn Backend>)> {
        self.backends
            .read()
            .await
            .iter()
            .map(|(id, backend)| (id.clone(), Arc::clone(backend)))
            .collect()
    }

    /// Start every driver, stopping at the first failure.
    pub async fn start_all(&self) -> Result<()> {
        for (id, backend) in self.snapshot().await {
            backend.start().await.inspect_err(|e| {
                log::error!("Failed to start backend for server {id}: {e}");
            })?;
        }
        Ok(())
    }

    /// Stop every driver; failures are logged and the first one is returned.
    pub async fn stop_all(&self) -> Result<()> {
        let mut first_error = None;
        for (id, backend) in self.snapshot().await {
            if let Err(e) = backend.stop().await {
                log::error!("Failed to stop backend for server {id}: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Ping every driver concurrently.
    pub async fn ping_all(&self, ctx: &RequestContext) -> BTreeMap<String, HealthStatus> {
        let backends = self.snapshot().await;
        let results = join_all(backends.iter().map(|(_, backend)| backend.ping(ctx))).await;

        backends
            .into_iter()
            .map(|(id, _)| id)
            .zip(results)
            .collect()
    }
}
