//! Quota repository.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseTransaction};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreResult, ResourceKind};
use dns_controlplane_core::types::{NewQuota, Quota, QuotaUpdate, RequestContext};
use dns_controlplane_core::utils::datetime;

use super::{fetch, finish, remove, savepoint, timestamp, Resource};
use crate::entity::quota;
use crate::finder::{Criterion, PageRequest};

impl quota::Model {
    fn into_quota(self) -> CoreResult<Quota> {
        Ok(Quota {
            created_at: datetime::from_storage(&self.created_at, "created_at")?,
            updated_at: datetime::from_storage(&self.updated_at, "updated_at")?,
            id: self.id,
            tenant_id: self.tenant_id,
            resource: self.resource,
            hard_limit: self.hard_limit,
        })
    }
}

impl Resource for quota::Entity {
    const KIND: ResourceKind = ResourceKind::Quota;

    type Output = Quota;

    fn convert(model: quota::Model) -> CoreResult<Quota> {
        model.into_quota()
    }
}

/// Per-tenant resource limits.
pub struct QuotaRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> QuotaRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// # Errors
    /// `DuplicateQuota` when the tenant already has a quota for the resource.
    pub async fn create(&self, ctx: &RequestContext, req: NewQuota) -> CoreResult<Quota> {
        log::debug!(
            "[{}] Creating quota {} for tenant {}",
            ctx.request_id,
            req.resource,
            req.tenant_id
        );
        let now = timestamp();
        let active = quota::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            tenant_id: Set(req.tenant_id),
            resource: Set(req.resource),
            hard_limit: Set(req.hard_limit),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let sp = savepoint(self.txn).await?;
        let result = active.insert(&sp).await;
        finish(sp, ResourceKind::Quota, result).await?.into_quota()
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> CoreResult<Quota> {
        super::get::<quota::Entity>(self.txn, ctx, id).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
        page: &PageRequest,
    ) -> CoreResult<Vec<Quota>> {
        super::find::<quota::Entity>(self.txn, ctx, criterion, page).await
    }

    pub async fn find_one(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<Quota> {
        super::find_one::<quota::Entity>(self.txn, ctx, criterion).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: QuotaUpdate,
    ) -> CoreResult<Quota> {
        let mut active: quota::ActiveModel = fetch::<quota::Entity>(self.txn, ctx, id).await?.into();
        if let Some(hard_limit) = req.hard_limit {
            active.hard_limit = Set(hard_limit);
        }
        active.updated_at = Set(timestamp());

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        finish(sp, ResourceKind::Quota, result).await?.into_quota()
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> CoreResult<Quota> {
        remove::<quota::Entity>(self.txn, ctx, id).await
    }

    pub async fn count(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64> {
        super::count::<quota::Entity>(self.txn, ctx, criterion).await
    }
}
