//! TSIG key repository.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseTransaction};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreResult, ResourceKind};
use dns_controlplane_core::types::{NewTsigKey, RequestContext, TsigKey, TsigKeyUpdate};
use dns_controlplane_core::utils::datetime;

use super::{fetch, finish, remove, savepoint, timestamp, Resource};
use crate::entity::tsigkey;
use crate::finder::{Criterion, PageRequest};

impl Resource for tsigkey::Entity {
    const KIND: ResourceKind = ResourceKind::TsigKey;

    type Output = TsigKey;

    fn convert(model: tsigkey::Model) -> CoreResult<TsigKey> {
        Ok(TsigKey {
            created_at: datetime::from_storage(&model.created_at, "created_at")?,
            updated_at: datetime::from_storage(&model.updated_at, "updated_at")?,
            id: model.id,
            name: model.name,
            algorithm: model.algorithm,
            secret: model.secret,
        })
    }
}

pub struct TsigKeyRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TsigKeyRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn create(&self, ctx: &RequestContext, req: NewTsigKey) -> CoreResult<TsigKey> {
        // never log the secret
        log::debug!(
            "[{}] Creating tsigkey {} ({})",
            ctx.request_id,
            req.name,
            req.algorithm
        );
        let now = timestamp();
        let active = tsigkey::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name),
            algorithm: Set(req.algorithm),
            secret: Set(req.secret),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let sp = savepoint(self.txn).await?;
        let result = active.insert(&sp).await;
        tsigkey::Entity::convert(finish(sp, ResourceKind::TsigKey, result).await?)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> CoreResult<TsigKey> {
        super::get::<tsigkey::Entity>(self.txn, ctx, id).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
        page: &PageRequest,
    ) -> CoreResult<Vec<TsigKey>> {
        super::find::<tsigkey::Entity>(self.txn, ctx, criterion, page).await
    }

    pub async fn find_one(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
    ) -> CoreResult<TsigKey> {
        super::find_one::<tsigkey::Entity>(self.txn, ctx, criterion).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: TsigKeyUpdate,
    ) -> CoreResult<TsigKey> {
        let mut active: tsigkey::ActiveModel =
            fetch::<tsigkey::Entity>(self.txn, ctx, id).await?.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(algorithm) = req.algorithm {
            active.algorithm = Set(algorithm);
        }
        if let Some(secret) = req.secret {
            active.secret = Set(secret);
        }
        active.updated_at = Set(timestamp());

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        tsigkey::Entity::convert(finish(sp, ResourceKind::TsigKey, result).await?)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> CoreResult<TsigKey> {
        remove::<tsigkey::Entity>(self.txn, ctx, id).await
    }

    pub async fn count(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64> {
        super::count::<tsigkey::Entity>(self.txn, ctx, criterion).await
    }
}
