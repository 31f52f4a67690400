//! Supporting resources: quotas, servers, TLDs, TSIG keys, blacklists

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-tenant resource limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quota {
    pub id: String,
    pub tenant_id: String,
    /// Limited resource, e.g. `domains` or `domain_records`
    pub resource: String,
    pub hard_limit: i64,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuota {
    pub tenant_id: String,
    pub resource: String,
    pub hard_limit: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotaUpdate {
    pub hard_limit: Option<i64>,
}

/// A name server known to the control plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    /// Host name of the server, e.g. `ns1.example.org.`
    pub name: String,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewServer {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerUpdate {
    pub name: Option<String>,
}

/// A top-level domain zones may be created under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tld {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTld {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TldUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// Shared secret used to sign zone transfers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsigKey {
    pub id: String,
    pub name: String,
    /// e.g. `hmac-sha256`
    pub algorithm: String,
    pub secret: String,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTsigKey {
    pub name: String,
    pub algorithm: String,
    pub secret: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TsigKeyUpdate {
    pub name: Option<String>,
    pub algorithm: Option<String>,
    pub secret: Option<String>,
}

/// Zone name pattern that may not be registered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blacklist {
    pub id: String,
    /// Regular expression matched against zone names by the API layer
    pub pattern: String,
    pub description: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBlacklist {
    pub pattern: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlacklistUpdate {
    pub pattern: Option<String>,
    pub description: Option<Option<String>>,
}

/// Tenant with its zone count, as returned by tenant listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSummary {
    pub id: String,
    pub domain_count: u64,
}

/// Tenant with the names of the zones it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub domain_count: u64,
    pub domains: Vec<String>,
}
