use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseTransaction};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreResult, ResourceKind};
use dns_controlplane_core::types::{NewTld, RequestContext, Tld, TldUpdate};
use dns_controlplane_core::utils::datetime;

use super::{fetch, finish, remove, savepoint, timestamp, Resource};
use crate::entity::tld;
use crate::finder::{Criterion, PageRequest};

impl Resource for tld::Entity {
    const KIND: ResourceKind = ResourceKind::Tld;

    type Output = Tld;

    fn convert(model: tld::Model) -> CoreResult<Tld> {
        Ok(Tld {
            created_at: datetime::from_storage(&model.created_at, "created_at")?,
            updated_at: datetime::from_storage(&model.updated_at, "updated_at")?,
            id: model.id,
            name: model.name,
            description: model.description,
        })
    }
}

pub struct TldRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TldRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn create(&self, ctx: &RequestContext, req: NewTld) -> CoreResult<Tld> {
        log::debug!("[{}] Creating tld {}", ctx.request_id, req.name);
        let now = timestamp();
        let active = tld::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let sp = savepoint(self.txn).await?;
        let result = active.insert(&sp).await;
        tld::Entity::convert(finish(sp, ResourceKind::Tld, result).await?)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> CoreResult<Tld> {
        super::get::<tld::Entity>(self.txn, ctx, id).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
        page: &PageRequest,
    ) -> CoreResult<Vec<Tld>> {
        super::find::<tld::Entity>(self.txn, ctx, criterion, page).await
    }

    pub async fn find_one(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<Tld> {
        super::find_one::<tld::Entity>(self.txn, ctx, criterion).await
    }

    pub async fn update(&self, ctx: &RequestContext, id: &str, req: TldUpdate) -> CoreResult<Tld> {
        let mut active: tld::ActiveModel = fetch::<tld::Entity>(self.txn, ctx, id).await?.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        active.updated_at = Set(timestamp());

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        tld::Entity::convert(finish(sp, ResourceKind::Tld, result).await?)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> CoreResult<Tld> {
        remove::<tld::Entity>(self.txn, ctx, id).await
    }

    pub async fn count(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64> {
        super::count::<tld::Entity>(self.txn, ctx, criterion).await
    }
}
