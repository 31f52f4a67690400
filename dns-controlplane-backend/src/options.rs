//! Per-server option resolution.
//!
//! Driver options live in two configuration groups: `backend:<name>` holds
//! the global values (and the `server_ids` list), `backend:<name>:<server_id>`
//! holds per-server overrides. An override that is absent or null falls back
//! to the global value.

use dns_controlplane_core::config::{ConfigRegistry, ConfigValue, OptionSpec};

use crate::error::{BackendError, Result};
use crate::factory;
use crate::types::{BackendOption, PoolServer};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 53;
const DEFAULT_MASTER: &str = "127.0.0.1:5354";

/// Name of the global option group of a backend.
#[must_use]
pub fn global_group(backend: &str) -> String {
    format!("backend:{backend}")
}

/// Name of the per-server option group.
#[must_use]
pub fn server_group(backend: &str, server_id: &str) -> String {
    format!("backend:{backend}:{server_id}")
}

/// Options shared by every driver.
fn common_option_specs() -> Vec<OptionSpec> {
    vec![
        OptionSpec::new(
            "server_ids",
            ConfigValue::List(Vec::new()),
            "Ids of the servers served by this backend",
        ),
        OptionSpec::new(
            "masters",
            vec![DEFAULT_MASTER],
            "Master DNS servers in <ip-address>:<port> format",
        ),
    ]
}

/// Fill the global group of `backend` with the common and driver defaults.
///
/// Existing values win. Call once while building the registry.
///
/// # Errors
/// `BackendError::UnknownBackend` when no driver with that name is compiled in.
pub fn register_backend_options(registry: &mut ConfigRegistry, backend: &str) -> Result<()> {
    let mut specs = common_option_specs();
    specs.extend(factory::backend_option_specs(backend)?);
    registry.register_defaults(&global_group(backend), &specs);
    Ok(())
}

/// Resolve every global option of `backend` for one server, ordered by key.
#[must_use]
pub fn resolve(registry: &ConfigRegistry, backend: &str, server_id: &str) -> Vec<BackendOption> {
    let Some(global) = registry.group(&global_group(backend)) else {
        return Vec::new();
    };
    let server = registry.group(&server_group(backend, server_id));

    global
        .iter()
        .map(|(key, global_value)| {
            let value = server
                .and_then(|group| group.get(key))
                .filter(|value| !value.is_null())
                .unwrap_or(global_value);
            BackendOption {
                key: key.clone(),
                value: value.clone(),
            }
        })
        .collect()
}

/// Scalar lookup: server group, then global group; null counts as absent.
fn scalar<'a>(
    registry: &'a ConfigRegistry,
    backend: &str,
    server_id: &str,
    key: &str,
) -> Option<&'a ConfigValue> {
    registry
        .get(&server_group(backend, server_id), key)
        .filter(|value| !value.is_null())
        .or_else(|| {
            registry
                .get(&global_group(backend), key)
                .filter(|value| !value.is_null())
        })
}

fn invalid(backend: &str, key: &str, detail: impl Into<String>) -> BackendError {
    BackendError::InvalidOption {
        backend: backend.to_string(),
        key: key.to_string(),
        detail: detail.into(),
    }
}

/// Build the pool server of `server_id`, merging scalar fields with resolved options.
///
/// # Errors
/// `BackendError::InvalidOption` when `host`, `port` or `tsig_key` has the wrong shape.
pub fn get_server_object(
    registry: &ConfigRegistry,
    backend: &str,
    server_id: &str,
) -> Result<PoolServer> {
    let host = match scalar(registry, backend, server_id, "host") {
        None => DEFAULT_HOST.to_string(),
        Some(value) => value
            .as_str()
            .ok_or_else(|| invalid(backend, "host", format!("expected a string, got {value}")))?
            .to_string(),
    };

    let port = match scalar(registry, backend, server_id, "port") {
        None => DEFAULT_PORT,
        Some(value) => value
            .as_i64()
            .and_then(|port| u16::try_from(port).ok())
            .ok_or_else(|| invalid(backend, "port", format!("expected a port number, got {value}")))?,
    };

    let tsig_key = scalar(registry, backend, server_id, "tsig_key")
        .map(|value| {
            value.as_str().map(str::to_string).ok_or_else(|| {
                invalid(backend, "tsig_key", format!("expected a key name, got {value}"))
            })
        })
        .transpose()?;

    Ok(PoolServer {
        id: server_id.to_string(),
        host,
        port,
        backend: backend.to_string(),
        backend_options: resolve(registry, backend, server_id),
        tsig_key,
    })
}

/// One pool server per entry of `server_ids`.
///
/// # Errors
/// `BackendError::Config` when the global group or its `server_ids` is missing.
pub fn build_pool_servers(registry: &ConfigRegistry, backend: &str) -> Result<Vec<PoolServer>> {
    let group = global_group(backend);
    if registry.group(&group).is_none() {
        return Err(BackendError::Config {
            backend: backend.to_string(),
            detail: format!("missing configuration group [{group}]"),
        });
    }

    let server_ids = registry
        .get(&group, "server_ids")
        .ok_or_else(|| BackendError::Config {
            backend: backend.to_string(),
            detail: format!("[{group}] has no server_ids"),
        })?
        .as_string_list()
        .ok_or_else(|| invalid(backend, "server_ids", "expected a list of server ids"))?;

    server_ids
        .iter()
        .map(|server_id| get_server_object(registry, backend, server_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ConfigRegistry {
        ConfigRegistry::new()
            .with("backend:fake", "server_ids", vec!["dns1", "dns2", "dns3"])
            .with("backend:fake", "port", 53)
            .with("backend:fake", "masters", vec!["10.0.0.1:5354"])
            .with("backend:fake:dns2", "port", 5353)
            .with("backend:fake:dns2", "host", "192.0.2.2")
            .with("backend:fake:dns3", "port", ConfigValue::Null)
    }

    fn port_option(options: &[BackendOption]) -> Option<&ConfigValue> {
        options.iter().find(|o| o.key == "port").map(|o| &o.value)
    }

    #[test]
    fn server_without_group_takes_global_values() {
        let options = resolve(&registry(), "fake", "dns1");
        assert_eq!(port_option(&options), Some(&ConfigValue::Integer(53)));
    }

    #[test]
    fn server_group_overrides_global_value() {
        let options = resolve(&registry(), "fake", "dns2");
        assert_eq!(port_option(&options), Some(&ConfigValue::Integer(5353)));
    }

    #[test]
    fn null_override_falls_back_to_global() {
        let options = resolve(&registry(), "fake", "dns3");
        assert_eq!(port_option(&options), Some(&ConfigValue::Integer(53)));
    }

    #[test]
    fn resolved_options_are_ordered_by_key() {
        let keys: Vec<_> = resolve(&registry(), "fake", "dns1")
            .into_iter()
            .map(|o| o.key)
            .collect();
        assert_eq!(keys, vec!["masters", "port", "server_ids"]);
    }

    #[test]
    fn server_only_keys_are_not_options() {
        let options = resolve(&registry(), "fake", "dns2");
        assert!(options.iter().all(|o| o.key != "host"));
    }

    #[test]
    fn missing_global_group_resolves_nothing() {
        assert!(resolve(&registry(), "webhook", "dns1").is_empty());
    }

    #[test]
    fn server_object_merges_scalars() {
        let registry = registry();
        let dns1 = get_server_object(&registry, "fake", "dns1").unwrap();
        assert_eq!(dns1.host, DEFAULT_HOST);
        assert_eq!(dns1.port, 53);
        assert_eq!(dns1.tsig_key, None);

        let dns2 = get_server_object(&registry, "fake", "dns2").unwrap();
        assert_eq!(dns2.host, "192.0.2.2");
        assert_eq!(dns2.port, 5353);
        assert_eq!(dns2.option("port"), Some(&ConfigValue::Integer(5353)));
    }

    #[test]
    fn out_of_range_port_is_invalid() {
        let registry = registry().with("backend:fake:dns1", "port", 70000);
        let err = get_server_object(&registry, "fake", "dns1").unwrap_err();
        assert!(matches!(err, BackendError::InvalidOption { ref key, .. } if key == "port"));
    }

    #[test]
    fn pool_servers_follow_server_ids() {
        let servers = build_pool_servers(&registry(), "fake").unwrap();
        let ids: Vec<_> = servers.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["dns1", "dns2", "dns3"]);
        assert!(servers.iter().all(|s| s.backend == "fake"));
    }

    #[test]
    fn pool_servers_require_server_ids() {
        let registry = ConfigRegistry::new().with("backend:fake", "port", 53);
        assert!(matches!(
            build_pool_servers(&registry, "fake"),
            Err(BackendError::Config { .. })
        ));
        assert!(matches!(
            build_pool_servers(&ConfigRegistry::new(), "fake"),
            Err(BackendError::Config { .. })
        ));
    }

    #[cfg(feature = "fake")]
    #[test]
    fn registered_defaults_keep_existing_values() {
        let mut registry = ConfigRegistry::new().with("backend:fake", "server_ids", vec!["dns1"]);
        register_backend_options(&mut registry, "fake").unwrap();

        assert_eq!(
            registry.get("backend:fake", "server_ids"),
            Some(&ConfigValue::from(vec!["dns1"]))
        );
        assert_eq!(
            registry.get("backend:fake", "masters"),
            Some(&ConfigValue::from(vec![DEFAULT_MASTER]))
        );
    }

    #[test]
    fn registering_unknown_backend_fails() {
        let mut registry = ConfigRegistry::new();
        assert!(matches!(
            register_backend_options(&mut registry, "bind9"),
            Err(BackendError::UnknownBackend { .. })
        ));
    }
}
