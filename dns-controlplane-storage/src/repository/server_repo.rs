//! Name server repository.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseTransaction};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreResult, ResourceKind};
use dns_controlplane_core::types::{NewServer, RequestContext, Server, ServerUpdate};
use dns_controlplane_core::utils::datetime;

use super::{fetch, finish, remove, savepoint, timestamp, Resource};
use crate::entity::server;
use crate::finder::{Criterion, PageRequest};

impl Resource for server::Entity {
    const KIND: ResourceKind = ResourceKind::Server;

    type Output = Server;

    fn convert(model: server::Model) -> CoreResult<Server> {
        Ok(Server {
            created_at: datetime::from_storage(&model.created_at, "created_at")?,
            updated_at: datetime::from_storage(&model.updated_at, "updated_at")?,
            id: model.id,
            name: model.name,
        })
    }
}

pub struct ServerRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> ServerRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn create(&self, ctx: &RequestContext, req: NewServer) -> CoreResult<Server> {
        log::debug!("[{}] Creating server {}", ctx.request_id, req.name);
        let now = timestamp();
        let active = server::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let sp = savepoint(self.txn).await?;
        let result = active.insert(&sp).await;
        server::Entity::convert(finish(sp, ResourceKind::Server, result).await?)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> CoreResult<Server> {
        super::get::<server::Entity>(self.txn, ctx, id).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
        page: &PageRequest,
    ) -> CoreResult<Vec<Server>> {
        super::find::<server::Entity>(self.txn, ctx, criterion, page).await
    }

    pub async fn find_one(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<Server> {
        super::find_one::<server::Entity>(self.txn, ctx, criterion).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: ServerUpdate,
    ) -> CoreResult<Server> {
        let mut active: server::ActiveModel =
            fetch::<server::Entity>(self.txn, ctx, id).await?.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        active.updated_at = Set(timestamp());

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        server::Entity::convert(finish(sp, ResourceKind::Server, result).await?)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> CoreResult<Server> {
        remove::<server::Entity>(self.txn, ctx, id).await
    }

    pub async fn count(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64> {
        super::count::<server::Entity>(self.txn, ctx, criterion).await
    }
}
