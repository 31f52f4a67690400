//! Driver factory keyed by configured backend name.

use std::sync::Arc;

use dns_controlplane_core::config::OptionSpec;

use crate::error::{BackendError, Result};
use crate::traits::Backend;
use crate::types::PoolServer;

#[cfg(feature = "fake")]
use crate::backends::{FAKE, FakeBackend};
#[cfg(feature = "webhook")]
use crate::backends::{WEBHOOK, WebhookBackend};

fn unknown(name: &str) -> BackendError {
    BackendError::UnknownBackend {
        backend: name.to_string(),
    }
}

/// Creates the driver named by `server.backend`.
///
/// The returned driver is wrapped in `Arc<dyn Backend>` for sharing across
/// async tasks. It has not been started.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_controlplane_backend::{create_backend, get_server_object};
/// use dns_controlplane_core::ConfigRegistry;
///
/// let registry = ConfigRegistry::new().with("backend:fake", "server_ids", vec!["dns1"]);
/// let server = get_server_object(&registry, "fake", "dns1").unwrap();
/// let backend = create_backend(server).unwrap();
/// assert_eq!(backend.name(), "fake");
/// ```
pub fn create_backend(server: PoolServer) -> Result<Arc<dyn Backend>> {
    match server.backend.as_str() {
        #[cfg(feature = "fake")]
        FAKE => Ok(Arc::new(FakeBackend::new(server))),
        #[cfg(feature = "webhook")]
        WEBHOOK => Ok(Arc::new(WebhookBackend::new(server)?)),
        other => Err(unknown(other)),
    }
}

/// Driver-specific option specs registered in the `backend:<name>` group.
pub fn backend_option_specs(name: &str) -> Result<Vec<OptionSpec>> {
    match name {
        #[cfg(feature = "fake")]
        FAKE => Ok(FakeBackend::option_specs()),
        #[cfg(feature = "webhook")]
        WEBHOOK => Ok(WebhookBackend::option_specs()),
        other => Err(unknown(other)),
    }
}

/// Names of all drivers enabled via feature flags.
pub fn available_backends() -> Vec<&'static str> {
    vec![
        #[cfg(feature = "fake")]
        FAKE,
        #[cfg(feature = "webhook")]
        WEBHOOK,
    ]
}
