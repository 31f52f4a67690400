//! DNS Control Plane Core Library
//!
//! Shared building blocks for the storage and backend crates:
//! - Request context (tenant scoping, soft-delete visibility)
//! - Entity types (domains, record sets, records and supporting resources)
//! - Hierarchical configuration registry
//! - Error taxonomy with stable symbolic codes
//!
//! This crate performs no I/O.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

// Re-export common types
pub use config::{ConfigGroup, ConfigRegistry, ConfigValue, OptionSpec};
pub use error::{CoreError, CoreResult, ResourceKind};
pub use types::{HealthStatus, RequestContext};
