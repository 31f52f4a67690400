use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseTransaction};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreResult, ResourceKind};
use dns_controlplane_core::types::{Blacklist, BlacklistUpdate, NewBlacklist, RequestContext};
use dns_controlplane_core::utils::datetime;

use super::{fetch, finish, remove, savepoint, timestamp, Resource};
use crate::entity::blacklist;
use crate::finder::{Criterion, PageRequest};

impl Resource for blacklist::Entity {
    const KIND: ResourceKind = ResourceKind::Blacklist;

    type Output = Blacklist;

    fn convert(model: blacklist::Model) -> CoreResult<Blacklist> {
        Ok(Blacklist {
            created_at: datetime::from_storage(&model.created_at, "created_at")?,
            updated_at: datetime::from_storage(&model.updated_at, "updated_at")?,
            id: model.id,
            pattern: model.pattern,
            description: model.description,
        })
    }
}

/// Blacklisted zone name patterns.
pub struct BlacklistRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> BlacklistRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn create(&self, ctx: &RequestContext, req: NewBlacklist) -> CoreResult<Blacklist> {
        log::debug!("[{}] Creating blacklist {}", ctx.request_id, req.pattern);
        let now = timestamp();
        let active = blacklist::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            pattern: Set(req.pattern),
            description: Set(req.description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let sp = savepoint(self.txn).await?;
        let result = active.insert(&sp).await;
        blacklist::Entity::convert(finish(sp, ResourceKind::Blacklist, result).await?)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> CoreResult<Blacklist> {
        super::get::<blacklist::Entity>(self.txn, ctx, id).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
        page: &PageRequest,
    ) -> CoreResult<Vec<Blacklist>> {
        super::find::<blacklist::Entity>(self.txn, ctx, criterion, page).await
    }

    pub async fn find_one(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
    ) -> CoreResult<Blacklist> {
        super::find_one::<blacklist::Entity>(self.txn, ctx, criterion).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: BlacklistUpdate,
    ) -> CoreResult<Blacklist> {
        let mut active: blacklist::ActiveModel =
            fetch::<blacklist::Entity>(self.txn, ctx, id).await?.into();
        if let Some(pattern) = req.pattern {
            active.pattern = Set(pattern);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        active.updated_at = Set(timestamp());

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        blacklist::Entity::convert(finish(sp, ResourceKind::Blacklist, result).await?)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> CoreResult<Blacklist> {
        remove::<blacklist::Entity>(self.txn, ctx, id).await
    }

    pub async fn count(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64> {
        super::count::<blacklist::Entity>(self.txn, ctx, criterion).await
    }
}
