//! Tenant aggregation over domains.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{DatabaseTransaction, FromQueryResult, QueryOrder, QuerySelect};

use dns_controlplane_core::error::{CoreError, CoreResult};
use dns_controlplane_core::types::{RequestContext, Tenant, TenantSummary};

use crate::entity::domain;
use crate::finder::{self, Criterion, PageRequest};

#[derive(Debug, FromQueryResult)]
struct TenantRow {
    tenant_id: String,
    domain_count: i64,
}

impl From<TenantRow> for TenantSummary {
    fn from(row: TenantRow) -> Self {
        Self {
            id: row.tenant_id,
            domain_count: u64::try_from(row.domain_count).unwrap_or_default(),
        }
    }
}

/// Read-only view of tenants derived from the zones they own.
pub struct TenantRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TenantRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    async fn rows(&self, ctx: &RequestContext) -> CoreResult<Vec<TenantRow>> {
        finder::filtered::<domain::Entity>(ctx, &Criterion::new())?
            .select_only()
            .column(domain::Column::TenantId)
            .column_as(
                Expr::expr(Func::count(Expr::col(domain::Column::Id))),
                "domain_count",
            )
            .group_by(domain::Column::TenantId)
            .order_by_asc(domain::Column::TenantId)
            .into_model::<TenantRow>()
            .all(self.txn)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query tenants: {e}")))
    }

    /// Tenants owning at least one visible zone, with their zone counts.
    pub async fn find_tenants(&self, ctx: &RequestContext) -> CoreResult<Vec<TenantSummary>> {
        Ok(self.rows(ctx).await?.into_iter().map(Into::into).collect())
    }

    /// One tenant with the names of its visible zones.
    pub async fn get_tenant(&self, ctx: &RequestContext, tenant_id: &str) -> CoreResult<Tenant> {
        let criterion = Criterion::new().with("tenant_id", tenant_id);
        let page = PageRequest::new().sort_key("name");
        let domains: Vec<String> =
            finder::find_many::<domain::Entity, _>(self.txn, ctx, &criterion, &page)
                .await?
                .into_iter()
                .map(|model| model.name)
                .collect();

        Ok(Tenant {
            id: tenant_id.to_string(),
            domain_count: domains.len() as u64,
            domains,
        })
    }

    /// Number of distinct tenants owning a visible zone.
    pub async fn count_tenants(&self, ctx: &RequestContext) -> CoreResult<u64> {
        Ok(self.rows(ctx).await?.len() as u64)
    }
}
