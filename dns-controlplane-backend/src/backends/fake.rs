//! In-memory driver for development and tests.

use std::collections::BTreeSet;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use dns_controlplane_core::config::OptionSpec;
use dns_controlplane_core::types::{Domain, HealthStatus, RequestContext};

use crate::error::Result;
use crate::traits::{Backend, BackendBase};
use crate::types::PoolServer;

/// Driver name in configuration.
pub const FAKE: &str = "fake";

/// Keeps the set of zone names it has been asked to serve.
pub struct FakeBackend {
    base: BackendBase,
    zones: RwLock<BTreeSet<String>>,
}

impl FakeBackend {
    #[must_use]
    pub fn new(server: PoolServer) -> Self {
        Self {
            base: BackendBase::new(server),
            zones: RwLock::new(BTreeSet::new()),
        }
    }

    pub(crate) fn option_specs() -> Vec<OptionSpec> {
        Vec::new()
    }

    pub async fn has_zone(&self, name: &str) -> bool {
        self.zones.read().await.contains(name)
    }

    /// Served zone names, sorted.
    pub async fn zone_names(&self) -> Vec<String> {
        self.zones.read().await.iter().cloned().collect()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn base(&self) -> &BackendBase {
        &self.base
    }

    async fn create_domain(&self, ctx: &RequestContext, domain: &Domain) -> Result<()> {
        let inserted = self.zones.write().await.insert(domain.name.clone());
        log::debug!(
            "[{}] fake {}: create {} (new: {inserted})",
            ctx.request_id,
            self.base.server().id,
            domain.name
        );
        Ok(())
    }

    async fn update_domain(&self, ctx: &RequestContext, domain: &Domain) -> Result<()> {
        self.create_domain(ctx, domain).await
    }

    async fn delete_domain(&self, ctx: &RequestContext, domain: &Domain) -> Result<()> {
        let removed = self.zones.write().await.remove(&domain.name);
        log::debug!(
            "[{}] fake {}: delete {} (present: {removed})",
            ctx.request_id,
            self.base.server().id,
            domain.name
        );
        Ok(())
    }

    async fn ping(&self, _ctx: &RequestContext) -> HealthStatus {
        let started = Instant::now();
        drop(self.zones.read().await);
        HealthStatus::measured(true, started.elapsed())
    }
}
