//! Storage settings read from the `storage:sql` configuration group.

use std::path::Path;

use dns_controlplane_core::config::{ConfigRegistry, ConfigValue, OptionSpec};
use dns_controlplane_core::error::{CoreError, CoreResult};

/// Configuration group holding the storage settings.
pub const STORAGE_GROUP: &str = "storage:sql";

const DEFAULT_CONNECTION: &str = "sqlite://dns-controlplane.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Database URL, e.g. `sqlite:///var/lib/dns/control.db?mode=rwc`
    pub connection: String,
    pub max_connections: u32,
    /// Log every SQL statement through `sqlx`
    pub sqlx_logging: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            connection: DEFAULT_CONNECTION.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            sqlx_logging: false,
        }
    }
}

impl StorageConfig {
    /// Option specs registered under [`STORAGE_GROUP`].
    #[must_use]
    pub fn options() -> Vec<OptionSpec> {
        vec![
            OptionSpec::new(
                "connection",
                DEFAULT_CONNECTION,
                "Database connection URL",
            ),
            OptionSpec::new(
                "max_connections",
                i64::from(DEFAULT_MAX_CONNECTIONS),
                "Maximum size of the connection pool",
            ),
            OptionSpec::new("sqlx_logging", false, "Log SQL statements"),
        ]
    }

    /// Fill missing storage keys with their defaults.
    pub fn register_options(registry: &mut ConfigRegistry) {
        registry.register_defaults(STORAGE_GROUP, &Self::options());
    }

    /// File-backed `SQLite` database, created on first connect.
    #[must_use]
    pub fn sqlite(path: &Path) -> Self {
        Self {
            connection: format!("sqlite://{}?mode=rwc", path.display()),
            ..Self::default()
        }
    }

    /// Read the settings, falling back to defaults for missing or null keys.
    ///
    /// # Errors
    /// `CoreError::ConfigError` when a value has the wrong type.
    pub fn from_registry(registry: &ConfigRegistry) -> CoreResult<Self> {
        let mut config = Self::default();

        if let Some(value) = registry.get(STORAGE_GROUP, "connection").filter(|v| !v.is_null()) {
            config.connection = value
                .as_str()
                .ok_or_else(|| invalid("connection", value))?
                .to_string();
        }
        if let Some(value) = registry
            .get(STORAGE_GROUP, "max_connections")
            .filter(|v| !v.is_null())
        {
            config.max_connections = value
                .as_i64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("max_connections", value))?;
        }
        if let Some(value) = registry.get(STORAGE_GROUP, "sqlx_logging").filter(|v| !v.is_null()) {
            config.sqlx_logging = value.as_bool().ok_or_else(|| invalid("sqlx_logging", value))?;
        }

        Ok(config)
    }
}

fn invalid(key: &str, value: &ConfigValue) -> CoreError {
    CoreError::ConfigError(format!("Invalid value for {STORAGE_GROUP}.{key}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_group_uses_defaults() {
        let config = StorageConfig::from_registry(&ConfigRegistry::new()).unwrap();
        assert_eq!(config, StorageConfig::default());
    }

    #[test]
    fn reads_values_from_toml() {
        let registry = ConfigRegistry::from_toml_str(
            r#"
            ["storage:sql"]
            connection = "sqlite:///tmp/dns.db?mode=rwc"
            max_connections = 2
            sqlx_logging = true
            "#,
        )
        .unwrap();

        let config = StorageConfig::from_registry(&registry).unwrap();
        assert_eq!(config.connection, "sqlite:///tmp/dns.db?mode=rwc");
        assert_eq!(config.max_connections, 2);
        assert!(config.sqlx_logging);
    }

    #[test]
    fn registered_defaults_round_trip() {
        let mut registry = ConfigRegistry::new();
        StorageConfig::register_options(&mut registry);
        assert_eq!(
            StorageConfig::from_registry(&registry).unwrap(),
            StorageConfig::default()
        );
    }

    #[test]
    fn rejects_non_positive_pool_size() {
        let registry = ConfigRegistry::new().with(STORAGE_GROUP, "max_connections", 0);
        assert!(matches!(
            StorageConfig::from_registry(&registry),
            Err(CoreError::ConfigError(_))
        ));
    }
}
