//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Resource types managed by the repositories.
///
/// Used to specialize the generic `NotFound` / `Duplicate` conditions
/// raised by the finder into entity-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceKind {
    Quota,
    Server,
    Tld,
    TsigKey,
    Domain,
    RecordSet,
    Record,
    Blacklist,
}

impl ResourceKind {
    /// Entity-specific not-found error.
    #[must_use]
    pub fn not_found(self) -> CoreError {
        match self {
            Self::Quota => CoreError::QuotaNotFound,
            Self::Server => CoreError::ServerNotFound,
            Self::Tld => CoreError::TldNotFound,
            Self::TsigKey => CoreError::TsigKeyNotFound,
            Self::Domain => CoreError::DomainNotFound,
            Self::RecordSet => CoreError::RecordSetNotFound,
            Self::Record => CoreError::RecordNotFound,
            Self::Blacklist => CoreError::BlacklistNotFound,
        }
    }

    /// Entity-specific duplicate error.
    #[must_use]
    pub fn duplicate(self) -> CoreError {
        match self {
            Self::Quota => CoreError::DuplicateQuota,
            Self::Server => CoreError::DuplicateServer,
            Self::Tld => CoreError::DuplicateTld,
            Self::TsigKey => CoreError::DuplicateTsigKey,
            Self::Domain => CoreError::DuplicateDomain,
            Self::RecordSet => CoreError::DuplicateRecordSet,
            Self::Record => CoreError::DuplicateRecord,
            Self::Blacklist => CoreError::DuplicateBlacklist,
        }
    }

    /// Specialize a generic finder error; every other error passes through.
    #[must_use]
    pub fn specialize(self, err: CoreError) -> CoreError {
        match err {
            CoreError::NotFound => self.not_found(),
            CoreError::Duplicate => self.duplicate(),
            other => other,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Quota => "quota",
            Self::Server => "server",
            Self::Tld => "tld",
            Self::TsigKey => "tsigkey",
            Self::Domain => "domain",
            Self::RecordSet => "recordset",
            Self::Record => "record",
            Self::Blacklist => "blacklist",
        };
        write!(f, "{name}")
    }
}

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Zero or several rows matched a lookup that requires exactly one
    #[error("Not found")]
    NotFound,

    #[error("Quota not found")]
    QuotaNotFound,

    #[error("Server not found")]
    ServerNotFound,

    #[error("TLD not found")]
    TldNotFound,

    #[error("TSIG key not found")]
    TsigKeyNotFound,

    #[error("Domain not found")]
    DomainNotFound,

    #[error("RecordSet not found")]
    RecordSetNotFound,

    #[error("Record not found")]
    RecordNotFound,

    #[error("Blacklist not found")]
    BlacklistNotFound,

    /// Pagination marker does not resolve to a visible row
    #[error("Marker {0} could not be found")]
    MarkerNotFound(String),

    /// Pagination marker is not a parseable identifier
    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    /// Sort key does not name a column of the entity
    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    /// Criterion references a column the entity does not have
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Unique constraint violated
    #[error("Duplicate resource")]
    Duplicate,

    #[error("Duplicate quota")]
    DuplicateQuota,

    #[error("Duplicate server")]
    DuplicateServer,

    #[error("Duplicate TLD")]
    DuplicateTld,

    #[error("Duplicate TSIG key")]
    DuplicateTsigKey,

    #[error("Duplicate domain")]
    DuplicateDomain,

    #[error("Duplicate recordset")]
    DuplicateRecordSet,

    #[error("Duplicate record")]
    DuplicateRecord,

    #[error("Duplicate blacklist")]
    DuplicateBlacklist,

    /// Malformed caller input (limit, sort direction, ...)
    #[error("Invalid value: {0}")]
    ValueError(String),

    /// Configuration registry error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        !matches!(
            self,
            Self::ConfigError(_) | Self::SerializationError(_) | Self::StorageError(_)
        )
    }

    /// Whether this is the generic or an entity-specific not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::QuotaNotFound
                | Self::ServerNotFound
                | Self::TldNotFound
                | Self::TsigKeyNotFound
                | Self::DomainNotFound
                | Self::RecordSetNotFound
                | Self::RecordNotFound
                | Self::BlacklistNotFound
        )
    }

    /// Whether this is the generic or an entity-specific duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::Duplicate
                | Self::DuplicateQuota
                | Self::DuplicateServer
                | Self::DuplicateTld
                | Self::DuplicateTsigKey
                | Self::DuplicateDomain
                | Self::DuplicateRecordSet
                | Self::DuplicateRecord
                | Self::DuplicateBlacklist
        )
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialize_maps_generic_conditions() {
        assert_eq!(
            ResourceKind::Domain.specialize(CoreError::NotFound),
            CoreError::DomainNotFound
        );
        assert_eq!(
            ResourceKind::Record.specialize(CoreError::Duplicate),
            CoreError::DuplicateRecord
        );
    }

    #[test]
    fn specialize_passes_other_errors_through() {
        let err = CoreError::InvalidSortKey("nope".to_string());
        assert_eq!(ResourceKind::Quota.specialize(err.clone()), err);
    }

    #[test]
    fn every_kind_has_distinct_codes() {
        let kinds = [
            ResourceKind::Quota,
            ResourceKind::Server,
            ResourceKind::Tld,
            ResourceKind::TsigKey,
            ResourceKind::Domain,
            ResourceKind::RecordSet,
            ResourceKind::Record,
            ResourceKind::Blacklist,
        ];
        let mut seen = std::collections::HashSet::new();
        for kind in kinds {
            assert!(kind.not_found().is_not_found());
            assert!(kind.duplicate().is_duplicate());
            assert!(seen.insert(kind.not_found().to_string()));
            assert!(seen.insert(kind.duplicate().to_string()));
        }
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::MarkerNotFound("abc".to_string())).unwrap();
        assert_eq!(json["code"], "MarkerNotFound");
        assert_eq!(json["details"], "abc");

        let json = serde_json::to_value(CoreError::DuplicateDomain).unwrap();
        assert_eq!(json["code"], "DuplicateDomain");
    }

    #[test]
    fn storage_errors_are_unexpected() {
        assert!(!CoreError::StorageError("disk".to_string()).is_expected());
        assert!(CoreError::DomainNotFound.is_expected());
        assert!(CoreError::InvalidMarker("x".to_string()).is_expected());
    }
}
