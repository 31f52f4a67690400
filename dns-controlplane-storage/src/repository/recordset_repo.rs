//! Record set repository.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseTransaction};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreResult, ResourceKind};
use dns_controlplane_core::types::{NewRecordSet, RecordSet, RecordSetUpdate, RequestContext};
use dns_controlplane_core::utils::datetime;

use super::{fetch, finish, remove, savepoint, timestamp, Resource};
use crate::entity::{domain, recordset};
use crate::finder::{Criterion, PageRequest};

impl Resource for recordset::Entity {
    const KIND: ResourceKind = ResourceKind::RecordSet;

    type Output = RecordSet;

    fn convert(model: recordset::Model) -> CoreResult<RecordSet> {
        Ok(RecordSet {
            created_at: datetime::from_storage(&model.created_at, "created_at")?,
            updated_at: datetime::from_storage(&model.updated_at, "updated_at")?,
            id: model.id,
            tenant_id: model.tenant_id,
            domain_id: model.domain_id,
            name: model.name,
            record_type: model.record_type,
            ttl: model.ttl,
            description: model.description,
        })
    }
}

pub struct RecordSetRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> RecordSetRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Create a record set under a zone visible to `ctx`, owned by the zone's tenant.
    ///
    /// # Errors
    /// `DomainNotFound` when the zone is not visible, `DuplicateRecordSet`
    /// when the zone already has a set with this name and type.
    pub async fn create(&self, ctx: &RequestContext, req: NewRecordSet) -> CoreResult<RecordSet> {
        let zone = fetch::<domain::Entity>(self.txn, ctx, &req.domain_id).await?;

        log::debug!(
            "[{}] Creating recordset {} {} in domain {}",
            ctx.request_id,
            req.name,
            req.record_type,
            zone.name
        );
        let now = timestamp();
        let active = recordset::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            tenant_id: Set(zone.tenant_id),
            domain_id: Set(zone.id),
            name: Set(req.name),
            record_type: Set(req.record_type),
            ttl: Set(req.ttl),
            description: Set(req.description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let sp = savepoint(self.txn).await?;
        let result = active.insert(&sp).await;
        recordset::Entity::convert(finish(sp, ResourceKind::RecordSet, result).await?)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> CoreResult<RecordSet> {
        super::get::<recordset::Entity>(self.txn, ctx, id).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
        page: &PageRequest,
    ) -> CoreResult<Vec<RecordSet>> {
        super::find::<recordset::Entity>(self.txn, ctx, criterion, page).await
    }

    pub async fn find_one(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
    ) -> CoreResult<RecordSet> {
        super::find_one::<recordset::Entity>(self.txn, ctx, criterion).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: RecordSetUpdate,
    ) -> CoreResult<RecordSet> {
        let mut active: recordset::ActiveModel =
            fetch::<recordset::Entity>(self.txn, ctx, id).await?.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(ttl) = req.ttl {
            active.ttl = Set(ttl);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        active.updated_at = Set(timestamp());

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        recordset::Entity::convert(finish(sp, ResourceKind::RecordSet, result).await?)
    }

    /// Hard delete; returns the removed row.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> CoreResult<RecordSet> {
        remove::<recordset::Entity>(self.txn, ctx, id).await
    }

    pub async fn count(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64> {
        super::count::<recordset::Entity>(self.txn, ctx, criterion).await
    }
}
