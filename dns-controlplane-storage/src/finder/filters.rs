//! Tenant scoping and soft-delete visibility.

use sea_orm::{ColumnTrait, QueryFilter, Select};

use dns_controlplane_core::types::{RequestContext, NOT_DELETED};

use super::FinderEntity;

/// Restrict `query` to the context tenant unless the context spans all tenants.
pub(crate) fn apply_tenant_criteria<E: FinderEntity>(
    ctx: &RequestContext,
    query: Select<E>,
) -> Select<E> {
    let Some(column) = E::tenant_column() else {
        return query;
    };

    if ctx.all_tenants {
        log::debug!("Including all tenants items in query results");
        return query;
    }

    match ctx.tenant_id.as_deref() {
        Some(tenant_id) => query.filter(column.eq(tenant_id)),
        None => query.filter(column.is_null()),
    }
}

/// Hide soft-deleted rows unless the context asks for them.
pub(crate) fn apply_deleted_criteria<E: FinderEntity>(
    ctx: &RequestContext,
    query: Select<E>,
) -> Select<E> {
    let Some(column) = E::deleted_column() else {
        return query;
    };

    if ctx.show_deleted {
        log::debug!("Including deleted items in query results");
        return query;
    }

    query.filter(column.eq(NOT_DELETED))
}
