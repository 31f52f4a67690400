//! Resource repositories.
//!
//! Every repository borrows the transaction of a [`crate::UnitOfWork`]. Reads
//! go through the generic finder; writes run in a nested savepoint so a
//! translated constraint violation leaves the outer transaction usable.

mod blacklist_repo;
mod domain_repo;
mod quota_repo;
mod record_repo;
mod recordset_repo;
mod server_repo;
mod tenant_repo;
mod tld_repo;
mod tsigkey_repo;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, QueryFilter, SqlErr,
    TransactionTrait,
};

use dns_controlplane_core::error::{CoreError, CoreResult, ResourceKind};
use dns_controlplane_core::types::RequestContext;
use dns_controlplane_core::utils::datetime;

use crate::finder::{self, Criterion, FinderEntity, PageRequest};

pub use blacklist_repo::BlacklistRepository;
pub use domain_repo::DomainRepository;
pub use quota_repo::QuotaRepository;
pub use record_repo::RecordRepository;
pub use recordset_repo::RecordSetRepository;
pub use server_repo::ServerRepository;
pub use tenant_repo::TenantRepository;
pub use tld_repo::TldRepository;
pub use tsigkey_repo::TsigKeyRepository;

/// Entity exposed through a repository.
pub(crate) trait Resource: FinderEntity {
    const KIND: ResourceKind;

    type Output;

    fn convert(model: Self::Model) -> CoreResult<Self::Output>;
}

/// Row with the given id, visible to `ctx`.
pub(crate) async fn fetch<E: Resource>(
    conn: &impl ConnectionTrait,
    ctx: &RequestContext,
    id: &str,
) -> CoreResult<E::Model> {
    finder::find_one::<E, _>(conn, ctx, &Criterion::id(id))
        .await
        .map_err(|e| E::KIND.specialize(e))
}

pub(crate) async fn get<E: Resource>(
    conn: &impl ConnectionTrait,
    ctx: &RequestContext,
    id: &str,
) -> CoreResult<E::Output> {
    E::convert(fetch::<E>(conn, ctx, id).await?)
}

pub(crate) async fn find_one<E: Resource>(
    conn: &impl ConnectionTrait,
    ctx: &RequestContext,
    criterion: &Criterion,
) -> CoreResult<E::Output> {
    let model = finder::find_one::<E, _>(conn, ctx, criterion)
        .await
        .map_err(|e| E::KIND.specialize(e))?;
    E::convert(model)
}

pub(crate) async fn find<E: Resource>(
    conn: &impl ConnectionTrait,
    ctx: &RequestContext,
    criterion: &Criterion,
    page: &PageRequest,
) -> CoreResult<Vec<E::Output>> {
    finder::find_many::<E, _>(conn, ctx, criterion, page)
        .await?
        .into_iter()
        .map(E::convert)
        .collect()
}

pub(crate) async fn count<E>(
    conn: &impl ConnectionTrait,
    ctx: &RequestContext,
    criterion: &Criterion,
) -> CoreResult<u64>
where
    E: Resource,
    E::Model: Send + Sync,
{
    finder::count::<E, _>(conn, ctx, criterion).await
}

/// Open a savepoint inside the unit of work.
pub(crate) async fn savepoint(txn: &DatabaseTransaction) -> CoreResult<DatabaseTransaction> {
    txn.begin()
        .await
        .map_err(|e| CoreError::StorageError(format!("Failed to open savepoint: {e}")))
}

/// Release the savepoint on success, roll it back and translate the error otherwise.
pub(crate) async fn finish<T>(
    savepoint: DatabaseTransaction,
    kind: ResourceKind,
    result: Result<T, DbErr>,
) -> CoreResult<T> {
    match result {
        Ok(value) => {
            savepoint.commit().await.map_err(|e| {
                CoreError::StorageError(format!("Failed to release savepoint: {e}"))
            })?;
            Ok(value)
        }
        Err(err) => {
            savepoint.rollback().await.map_err(|e| {
                CoreError::StorageError(format!("Failed to roll back savepoint: {e}"))
            })?;
            Err(write_error(kind, &err))
        }
    }
}

/// Translate a failed write: unique violations become the entity's duplicate error.
pub(crate) fn write_error(kind: ResourceKind, err: &DbErr) -> CoreError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        log::warn!("Duplicate {kind}: {detail}");
        return kind.duplicate();
    }
    log::error!("Failed to write {kind}: {err}");
    CoreError::StorageError(format!("Failed to write {kind}: {err}"))
}

/// Hard-delete a row visible to `ctx`, returning it.
pub(crate) async fn remove<E>(
    txn: &DatabaseTransaction,
    ctx: &RequestContext,
    id: &str,
) -> CoreResult<E::Output>
where
    E: Resource,
{
    let model = fetch::<E>(txn, ctx, id).await?;

    let sp = savepoint(txn).await?;
    let result = E::delete_many()
        .filter(E::id_column().eq(id))
        .exec(&sp)
        .await;
    finish(sp, E::KIND, result).await?;

    E::convert(model)
}

/// Current time in storage format.
pub(crate) fn timestamp() -> String {
    datetime::to_storage(&datetime::now())
}
