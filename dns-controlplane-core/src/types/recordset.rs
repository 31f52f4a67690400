//! Record set and record type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, typed group of records sharing a TTL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub id: String,
    /// Copied from the owning domain at creation
    pub tenant_id: String,
    pub domain_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: Option<i32>,
    pub description: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Create record set request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecordSet {
    pub domain_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: Option<i32>,
    pub description: Option<String>,
}

/// Update record set request; ownership fields are not updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSetUpdate {
    pub name: Option<String>,
    pub ttl: Option<Option<i32>>,
    pub description: Option<Option<String>>,
}

/// A single resource record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    /// Copied from the owning domain at creation
    pub tenant_id: String,
    pub domain_id: String,
    pub recordset_id: String,
    pub data: String,
    pub priority: Option<i32>,
    /// Content hash, unique per record set content
    pub hash: String,
    pub description: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Create record request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    pub domain_id: String,
    pub recordset_id: String,
    pub data: String,
    pub priority: Option<i32>,
    pub description: Option<String>,
}

/// Update record request; ownership fields are not updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub data: Option<String>,
    pub priority: Option<Option<i32>>,
    pub description: Option<Option<String>>,
}
