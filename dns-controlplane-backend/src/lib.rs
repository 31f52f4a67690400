//! # dns-controlplane-backend
//!
//! Pluggable drivers that propagate zone lifecycle events to authoritative
//! name servers.
//!
//! ## Configuration
//!
//! Each driver reads two kinds of configuration groups:
//!
//! ```toml
//! ["backend:webhook"]
//! server_ids = ["dns1", "dns2"]
//! endpoint = "http://10.0.0.10:8080"
//! port = 53
//!
//! ["backend:webhook:dns2"]
//! endpoint = "http://10.0.0.20:8080"
//! port = 5353
//! ```
//!
//! The per-server group overrides the global one key by key; see
//! [`resolve`] and [`get_server_object`].
//!
//! ## Feature Flags
//!
//! - **`all-backends`** *(default)*: enable every driver below.
//! - **`fake`**: in-memory driver for development and tests.
//! - **`webhook`**: HTTP driver talking to a zone agent per server.
//! - **`native-tls`** *(default)* / **`rustls`**: TLS backend of the webhook client.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_controlplane_backend::{BackendRegistry, register_backend_options};
//! use dns_controlplane_core::{ConfigRegistry, RequestContext};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ConfigRegistry::from_toml_str(r#"
//!     ["backend:fake"]
//!     server_ids = ["dns1"]
//! "#)?;
//! register_backend_options(&mut config, "fake")?;
//!
//! let registry = BackendRegistry::new();
//! registry.load(&config, "fake").await?;
//! registry.start_all().await?;
//!
//! let health = registry.ping_all(&RequestContext::admin()).await;
//! println!("{health:?}");
//! # Ok(())
//! # }
//! ```

mod backends;
mod error;
mod factory;
#[cfg(feature = "webhook")]
mod http_client;
mod options;
mod registry;
mod traits;
mod types;

pub use error::{BackendError, Result};
pub use factory::{available_backends, backend_option_specs, create_backend};
pub use options::{
    build_pool_servers, get_server_object, global_group, register_backend_options, resolve,
    server_group,
};
pub use registry::BackendRegistry;
pub use traits::{Backend, BackendBase};
pub use types::{BackendOption, PoolServer};

#[cfg(feature = "fake")]
pub use backends::{FAKE, FakeBackend};
#[cfg(feature = "webhook")]
pub use backends::{WEBHOOK, WebhookBackend};
