//! Runtime values produced by option resolution.

use serde::{Deserialize, Serialize};

use dns_controlplane_core::config::ConfigValue;

/// One resolved driver option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendOption {
    pub key: String,
    pub value: ConfigValue,
}

impl BackendOption {
    pub fn new(key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A name server target of a backend, with its fully resolved options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolServer {
    pub id: String,
    pub host: String,
    pub port: u16,
    /// Driver name, e.g. `fake` or `webhook`
    pub backend: String,
    /// Ordered by key
    pub backend_options: Vec<BackendOption>,
    pub tsig_key: Option<String>,
}

impl PoolServer {
    /// Look up a resolved option; `None` when the key is unknown.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&ConfigValue> {
        self.backend_options
            .iter()
            .find(|option| option.key == key)
            .map(|option| &option.value)
    }
}
