//! Request context

use serde::{Deserialize, Serialize};

/// Security and visibility context carried by every storage and backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Correlation id for logs
    pub request_id: String,
    /// Requesting tenant; `None` for service-level callers
    pub tenant_id: Option<String>,
    /// Bypass tenant scoping
    pub all_tenants: bool,
    /// Include soft-deleted rows in query results
    pub show_deleted: bool,
}

impl RequestContext {
    /// Context scoped to a single tenant.
    #[must_use]
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            request_id: new_request_id(),
            tenant_id: Some(tenant_id.into()),
            all_tenants: false,
            show_deleted: false,
        }
    }

    /// Administrative context that sees every tenant.
    #[must_use]
    pub fn admin() -> Self {
        Self {
            request_id: new_request_id(),
            tenant_id: None,
            all_tenants: true,
            show_deleted: false,
        }
    }

    #[must_use]
    pub fn with_show_deleted(mut self, show_deleted: bool) -> Self {
        self.show_deleted = show_deleted;
        self
    }

    #[must_use]
    pub fn with_all_tenants(mut self, all_tenants: bool) -> Self {
        self.all_tenants = all_tenants;
        self
    }
}

fn new_request_id() -> String {
    format!("req-{}", uuid::Uuid::new_v4())
}
