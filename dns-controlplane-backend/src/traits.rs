use async_trait::async_trait;

use dns_controlplane_core::config::ConfigValue;
use dns_controlplane_core::types::{Domain, HealthStatus, RequestContext};

use crate::error::Result;
use crate::types::{BackendOption, PoolServer};

/// State every driver is constructed with: its pool server and an admin context.
#[derive(Debug, Clone)]
pub struct BackendBase {
    server: PoolServer,
    admin_context: RequestContext,
}

impl BackendBase {
    #[must_use]
    pub fn new(server: PoolServer) -> Self {
        Self {
            server,
            admin_context: RequestContext::admin(),
        }
    }

    #[must_use]
    pub fn server(&self) -> &PoolServer {
        &self.server
    }

    /// All-tenants context for driver-initiated work.
    #[must_use]
    pub fn admin_context(&self) -> &RequestContext {
        &self.admin_context
    }
}

/// Zone propagation driver for one pool server.
///
/// Implementations are shared across tasks as `Arc<dyn Backend>`; stateful
/// drivers synchronize internally.
#[async_trait]
pub trait Backend: Send + Sync {
    fn base(&self) -> &BackendBase;

    /// Driver name, as configured.
    fn name(&self) -> &str {
        &self.base().server().backend
    }

    fn backend_options(&self) -> &[BackendOption] {
        &self.base().server().backend_options
    }

    /// Resolved value of `key`, `None` when the option is unknown.
    fn backend_option(&self, key: &str) -> Option<&ConfigValue> {
        self.base().server().option(key)
    }

    async fn start(&self) -> Result<()> {
        log::info!(
            "[{}] Starting {} backend for server {}",
            self.base().admin_context().request_id,
            self.name(),
            self.base().server().id
        );
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        log::info!(
            "[{}] Stopped {} backend for server {}",
            self.base().admin_context().request_id,
            self.name(),
            self.base().server().id
        );
        Ok(())
    }

    /// Create a zone. Creating an existing zone succeeds.
    async fn create_domain(&self, ctx: &RequestContext, domain: &Domain) -> Result<()>;

    async fn update_domain(&self, _ctx: &RequestContext, _domain: &Domain) -> Result<()> {
        Ok(())
    }

    /// Delete a zone. Deleting an absent zone succeeds.
    async fn delete_domain(&self, ctx: &RequestContext, domain: &Domain) -> Result<()>;

    /// Health of the backend; unknown unless the driver can tell.
    async fn ping(&self, _ctx: &RequestContext) -> HealthStatus {
        HealthStatus::unknown()
    }
}
