//! Hierarchical configuration registry
//!
//! Configuration is organized as named groups of key/value pairs, e.g.
//!
//! ```toml
//! ["storage:sql"]
//! connection = "sqlite://dns-controlplane.db?mode=rwc"
//!
//! ["backend:fake"]
//! server_ids = ["dns1", "dns2"]
//! port = 53
//!
//! ["backend:fake:dns2"]
//! port = 5353
//! ```
//!
//! The registry is built once at start-up and shared read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    /// Explicitly unset. Never produced by TOML, only by programmatic registries.
    Null,
}

impl ConfigValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// List of strings; a single string is treated as a one-element list.
    #[must_use]
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect(),
            Self::String(s) => Some(vec![s.clone()]),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(","))
            }
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

/// Declaration of a configuration option together with its default.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub key: &'static str,
    pub default: ConfigValue,
    pub help: &'static str,
}

impl OptionSpec {
    #[must_use]
    pub fn new(key: &'static str, default: impl Into<ConfigValue>, help: &'static str) -> Self {
        Self {
            key,
            default: default.into(),
            help,
        }
    }

    /// An option without a default value.
    #[must_use]
    pub fn unset(key: &'static str, help: &'static str) -> Self {
        Self {
            key,
            default: ConfigValue::Null,
            help,
        }
    }
}

/// Key/value pairs of one configuration group.
pub type ConfigGroup = BTreeMap<String, ConfigValue>;

/// Registry of named configuration groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigRegistry {
    groups: BTreeMap<String, ConfigGroup>,
}

impl ConfigRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from TOML text. Every top-level item must be a table.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        toml::from_str(text).map_err(|e| CoreError::ConfigError(format!("Invalid TOML: {e}")))
    }

    /// Look up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&ConfigGroup> {
        self.groups.get(name)
    }

    /// Look up a single value. Absent group and absent key both yield `None`.
    #[must_use]
    pub fn get(&self, group: &str, key: &str) -> Option<&ConfigValue> {
        self.groups.get(group).and_then(|g| g.get(key))
    }

    /// Set a single value, creating the group if needed.
    pub fn set(&mut self, group: &str, key: &str, value: impl Into<ConfigValue>) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, group: &str, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.set(group, key, value);
        self
    }

    /// Fill keys missing from `group` with the defaults of `specs`.
    ///
    /// Existing values are left untouched. The group is created even when
    /// `specs` is empty so that later lookups see it as registered.
    pub fn register_defaults(&mut self, group: &str, specs: &[OptionSpec]) {
        let entries = self.groups.entry(group.to_string()).or_default();
        for spec in specs {
            entries
                .entry(spec.key.to_string())
                .or_insert_with(|| spec.default.clone());
        }
        log::debug!("Registered {} option defaults for [{group}]", specs.len());
    }

    /// Names of all groups, in order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}
