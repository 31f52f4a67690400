//! Relational storage for the DNS control plane.
//!
//! [`Storage`] owns the connection pool; [`Storage::begin`] opens a
//! [`UnitOfWork`] that hands out one repository per resource type. All
//! reads go through the generic [`finder`], which layers criterion, tenant
//! scope, deletion visibility and marker pagination.

pub mod config;
pub mod entity;
pub mod finder;
mod migration;
pub mod repository;

use std::path::Path;
use std::time::{Duration, Instant};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use sea_orm_migration::MigratorTrait;

use dns_controlplane_core::error::{CoreError, CoreResult};
use dns_controlplane_core::types::{HealthStatus, RequestContext};

use migration::Migrator;
use repository::{
    BlacklistRepository, DomainRepository, QuotaRepository, RecordRepository,
    RecordSetRepository, ServerRepository, TenantRepository, TldRepository, TsigKeyRepository,
};

pub use config::{StorageConfig, STORAGE_GROUP};
pub use finder::{Criterion, CriterionValue, PageRequest, SortDir};

/// Connection pool plus schema management.
pub struct Storage {
    db: DatabaseConnection,
}

impl Storage {
    /// Connect to the configured database.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if the connection fails.
    pub async fn connect(config: &StorageConfig) -> CoreResult<Self> {
        let mut options = ConnectOptions::new(config.connection.clone());
        options
            .max_connections(config.max_connections)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(config.sqlx_logging);

        let db = Database::connect(options)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to database: {e}")))?;

        Ok(Self { db })
    }

    /// Open (creating if needed) a `SQLite` file and bring its schema up to date.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn open(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let storage = Self::connect(&StorageConfig::sqlite(db_path)).await?;
        storage.setup_schema().await?;
        Ok(storage)
    }

    /// Run every pending migration.
    pub async fn setup_schema(&self) -> CoreResult<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;
        log::info!("Storage schema is up to date");
        Ok(())
    }

    /// Revert every applied migration, dropping all tables.
    pub async fn teardown_schema(&self) -> CoreResult<()> {
        Migrator::down(&self.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to revert migrations: {e}")))?;
        log::info!("Storage schema removed");
        Ok(())
    }

    /// Start a unit of work. Dropping it without `commit` rolls back.
    pub async fn begin(&self) -> CoreResult<UnitOfWork> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to begin transaction: {e}")))?;
        Ok(UnitOfWork { txn })
    }

    /// Round-trip the database and report the elapsed time.
    pub async fn ping(&self, ctx: &RequestContext) -> HealthStatus {
        let started = Instant::now();
        let result = self.db.ping().await;
        let elapsed = started.elapsed();

        if let Err(e) = &result {
            log::error!("[{}] Storage ping failed: {e}", ctx.request_id);
        }
        HealthStatus::measured(result.is_ok(), elapsed)
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Per-request transactional handle.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub fn quotas(&self) -> QuotaRepository<'_> {
        QuotaRepository::new(&self.txn)
    }

    pub fn servers(&self) -> ServerRepository<'_> {
        ServerRepository::new(&self.txn)
    }

    pub fn tlds(&self) -> TldRepository<'_> {
        TldRepository::new(&self.txn)
    }

    pub fn tsigkeys(&self) -> TsigKeyRepository<'_> {
        TsigKeyRepository::new(&self.txn)
    }

    pub fn domains(&self) -> DomainRepository<'_> {
        DomainRepository::new(&self.txn)
    }

    pub fn recordsets(&self) -> RecordSetRepository<'_> {
        RecordSetRepository::new(&self.txn)
    }

    pub fn records(&self) -> RecordRepository<'_> {
        RecordRepository::new(&self.txn)
    }

    pub fn blacklists(&self) -> BlacklistRepository<'_> {
        BlacklistRepository::new(&self.txn)
    }

    pub fn tenants(&self) -> TenantRepository<'_> {
        TenantRepository::new(&self.txn)
    }

    pub async fn commit(self) -> CoreResult<()> {
        self.txn
            .commit()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to commit: {e}")))
    }

    pub async fn rollback(self) -> CoreResult<()> {
        self.txn
            .rollback()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to roll back: {e}")))
    }
}
