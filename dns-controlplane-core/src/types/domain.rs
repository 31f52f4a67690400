//! Domain (zone) type definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Deletion marker value of a live row.
pub const NOT_DELETED: &str = "0";

/// Zone provisioning status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DomainStatus {
    Active,
    Pending,
    Error,
    Deleted,
}

impl DomainStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Error => "ERROR",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "PENDING" => Ok(Self::Pending),
            "ERROR" => Ok(Self::Error),
            "DELETED" => Ok(Self::Deleted),
            other => Err(CoreError::SerializationError(format!(
                "Invalid domain status: {other}"
            ))),
        }
    }
}

/// A DNS zone owned by a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub tenant_id: String,
    /// Fully qualified zone name, e.g. `example.org.`
    pub name: String,
    pub email: String,
    pub ttl: i32,
    pub serial: i64,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: i32,
    pub status: DomainStatus,
    pub description: Option<String>,
    /// `"0"` while live, the id without dashes once soft-deleted
    pub deleted: String,
    #[serde(with = "crate::utils::datetime::option")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Domain {
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted != NOT_DELETED
    }

    /// Deletion marker for a row with the given id.
    #[must_use]
    pub fn deletion_marker(id: &str) -> String {
        id.replace('-', "")
    }
}

/// Create domain request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDomain {
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub ttl: i32,
    /// Defaults to the current Unix time when `None`
    pub serial: Option<i64>,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: i32,
    pub status: DomainStatus,
    pub description: Option<String>,
}

impl NewDomain {
    /// Request with the default SOA timers.
    #[must_use]
    pub fn new(
        tenant_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            name: name.into(),
            email: email.into(),
            ttl: 3600,
            serial: None,
            refresh: 3600,
            retry: 600,
            expire: 86400,
            minimum: 3600,
            status: DomainStatus::Active,
            description: None,
        }
    }
}

/// Update domain request (partial update)
///
/// `tenant_id` transfers the zone; record sets and records created earlier
/// keep the tenant they were created with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainUpdate {
    pub tenant_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub ttl: Option<i32>,
    pub serial: Option<i64>,
    pub refresh: Option<i32>,
    pub retry: Option<i32>,
    pub expire: Option<i32>,
    pub minimum: Option<i32>,
    pub status: Option<DomainStatus>,
    pub description: Option<Option<String>>,
}
