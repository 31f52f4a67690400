//! Generic finder shared by every repository.
//!
//! Queries are layered criterion, then tenant scope, then deletion
//! visibility, then pagination. Only the generic `NotFound` condition
//! originates here; repositories specialize it.

mod criterion;
mod filters;
mod pagination;

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select};

use dns_controlplane_core::error::{CoreError, CoreResult};
use dns_controlplane_core::types::RequestContext;

pub use criterion::{Criterion, CriterionValue};
pub use pagination::{PageRequest, SortDir, DEFAULT_SORT_KEY};

/// Entity metadata the finder needs beyond `EntityTrait`.
pub trait FinderEntity: EntityTrait {
    fn id_column() -> Self::Column;

    fn created_at_column() -> Self::Column;

    /// Column holding the owning tenant, for tenant-scoped entities.
    fn tenant_column() -> Option<Self::Column> {
        None
    }

    /// Column holding the deletion marker, for soft-deletable entities.
    fn deleted_column() -> Option<Self::Column> {
        None
    }
}

pub(crate) fn query_error(err: &DbErr) -> CoreError {
    CoreError::StorageError(format!("Failed to query: {err}"))
}

/// Criterion, tenant and deletion filters applied to a fresh select.
pub(crate) fn filtered<E: FinderEntity>(
    ctx: &RequestContext,
    criterion: &Criterion,
) -> CoreResult<Select<E>> {
    let query = criterion.apply(E::find())?;
    let query = filters::apply_tenant_criteria::<E>(ctx, query);
    Ok(filters::apply_deleted_criteria::<E>(ctx, query))
}

/// Exactly one visible row matching `criterion`.
///
/// # Errors
/// `CoreError::NotFound` when zero or several rows match.
pub async fn find_one<E, C>(
    conn: &C,
    ctx: &RequestContext,
    criterion: &Criterion,
) -> CoreResult<E::Model>
where
    E: FinderEntity,
    C: ConnectionTrait,
{
    let mut rows = filtered::<E>(ctx, criterion)?
        .limit(2)
        .all(conn)
        .await
        .map_err(|e| query_error(&e))?;

    if rows.len() != 1 {
        return Err(CoreError::NotFound);
    }
    rows.pop().ok_or(CoreError::NotFound)
}

/// Visible rows matching `criterion`, one page at a time.
pub async fn find_many<E, C>(
    conn: &C,
    ctx: &RequestContext,
    criterion: &Criterion,
    page: &PageRequest,
) -> CoreResult<Vec<E::Model>>
where
    E: FinderEntity,
    C: ConnectionTrait,
{
    let query = filtered::<E>(ctx, criterion)?;
    let query = pagination::paginate::<E, C>(conn, ctx, query, page).await?;

    query.all(conn).await.map_err(|e| query_error(&e))
}

/// Number of visible rows matching `criterion`.
pub async fn count<E, C>(conn: &C, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64>
where
    E: FinderEntity,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    filtered::<E>(ctx, criterion)?
        .count(conn)
        .await
        .map_err(|e| query_error(&e))
}
