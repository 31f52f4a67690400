//! Type definitions

mod context;
mod domain;
mod health;
mod recordset;
mod resource;

pub use context::RequestContext;
pub use domain::{Domain, DomainStatus, DomainUpdate, NewDomain, NOT_DELETED};
pub use health::HealthStatus;
pub use recordset::{NewRecord, NewRecordSet, Record, RecordSet, RecordSetUpdate, RecordUpdate};
pub use resource::{
    Blacklist, BlacklistUpdate, NewBlacklist, NewQuota, NewServer, NewTld, NewTsigKey, Quota,
    QuotaUpdate, Server, ServerUpdate, Tenant, TenantSummary, Tld, TldUpdate, TsigKey,
    TsigKeyUpdate,
};
