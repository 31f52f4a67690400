//! Record repository.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseTransaction};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreResult, ResourceKind};
use dns_controlplane_core::types::{NewRecord, Record, RecordUpdate, RequestContext};
use dns_controlplane_core::utils::datetime;

use super::{fetch, finish, remove, savepoint, timestamp, Resource};
use crate::entity::{domain, record, recordset};
use crate::finder::{self, Criterion, PageRequest};

/// SHA-256 over `recordset_id:data:priority`; an absent priority hashes as `None`.
pub(crate) fn record_hash(recordset_id: &str, data: &str, priority: Option<i32>) -> String {
    let priority = priority.map_or_else(|| "None".to_string(), |p| p.to_string());
    let digest = Sha256::digest(format!("{recordset_id}:{data}:{priority}").as_bytes());
    hex::encode(digest)
}

impl Resource for record::Entity {
    const KIND: ResourceKind = ResourceKind::Record;

    type Output = Record;

    fn convert(model: record::Model) -> CoreResult<Record> {
        Ok(Record {
            created_at: datetime::from_storage(&model.created_at, "created_at")?,
            updated_at: datetime::from_storage(&model.updated_at, "updated_at")?,
            id: model.id,
            tenant_id: model.tenant_id,
            domain_id: model.domain_id,
            recordset_id: model.recordset_id,
            data: model.data,
            priority: model.priority,
            hash: model.hash,
            description: model.description,
        })
    }
}

pub struct RecordRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> RecordRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Create a record in a record set of a zone visible to `ctx`.
    ///
    /// # Errors
    /// `DomainNotFound` when the zone is not visible, `RecordSetNotFound`
    /// when the record set does not belong to the zone, `DuplicateRecord`
    /// when the set already holds the same data and priority.
    pub async fn create(&self, ctx: &RequestContext, req: NewRecord) -> CoreResult<Record> {
        let zone = fetch::<domain::Entity>(self.txn, ctx, &req.domain_id).await?;

        let criterion = Criterion::id(&req.recordset_id).with("domain_id", zone.id.as_str());
        let set = finder::find_one::<recordset::Entity, _>(self.txn, ctx, &criterion)
            .await
            .map_err(|e| ResourceKind::RecordSet.specialize(e))?;

        log::debug!(
            "[{}] Creating record in recordset {} {}",
            ctx.request_id,
            set.name,
            set.record_type
        );
        let now = timestamp();
        let active = record::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            tenant_id: Set(zone.tenant_id),
            domain_id: Set(zone.id),
            hash: Set(record_hash(&set.id, &req.data, req.priority)),
            recordset_id: Set(set.id),
            data: Set(req.data),
            priority: Set(req.priority),
            description: Set(req.description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let sp = savepoint(self.txn).await?;
        let result = active.insert(&sp).await;
        record::Entity::convert(finish(sp, ResourceKind::Record, result).await?)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> CoreResult<Record> {
        super::get::<record::Entity>(self.txn, ctx, id).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
        page: &PageRequest,
    ) -> CoreResult<Vec<Record>> {
        super::find::<record::Entity>(self.txn, ctx, criterion, page).await
    }

    pub async fn find_one(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<Record> {
        super::find_one::<record::Entity>(self.txn, ctx, criterion).await
    }

    /// Partial update; the hash follows `data` and `priority`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: RecordUpdate,
    ) -> CoreResult<Record> {
        let current = fetch::<record::Entity>(self.txn, ctx, id).await?;
        let data = req.data.unwrap_or_else(|| current.data.clone());
        let priority = req.priority.unwrap_or(current.priority);
        let hash = record_hash(&current.recordset_id, &data, priority);

        let mut active: record::ActiveModel = current.into();
        active.data = Set(data);
        active.priority = Set(priority);
        active.hash = Set(hash);
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        active.updated_at = Set(timestamp());

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        record::Entity::convert(finish(sp, ResourceKind::Record, result).await?)
    }

    /// Hard delete; returns the removed row.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> CoreResult<Record> {
        remove::<record::Entity>(self.txn, ctx, id).await
    }

    pub async fn count(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64> {
        super::count::<record::Entity>(self.txn, ctx, criterion).await
    }
}
