//! Domain (zone) repository.
//!
//! Domains are soft-deleted: the row stays with `deleted` set to the
//! dash-stripped id, which frees the name for a new zone while
//! `(name, deleted)` stays unique.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseTransaction};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreResult, ResourceKind};
use dns_controlplane_core::types::{
    Domain, DomainStatus, DomainUpdate, NewDomain, RequestContext, NOT_DELETED,
};
use dns_controlplane_core::utils::datetime;

use super::{fetch, finish, savepoint, timestamp, Resource};
use crate::entity::domain;
use crate::finder::{Criterion, PageRequest};

impl domain::Model {
    /// Convert a `SeaORM` row model into a `Domain`.
    fn into_domain(self) -> CoreResult<Domain> {
        let deleted_at = self
            .deleted_at
            .as_deref()
            .map(|value| datetime::from_storage(value, "deleted_at"))
            .transpose()?;

        Ok(Domain {
            status: self.status.parse::<DomainStatus>()?,
            created_at: datetime::from_storage(&self.created_at, "created_at")?,
            updated_at: datetime::from_storage(&self.updated_at, "updated_at")?,
            deleted_at,
            id: self.id,
            tenant_id: self.tenant_id,
            name: self.name,
            email: self.email,
            ttl: self.ttl,
            serial: self.serial,
            refresh: self.refresh,
            retry: self.retry,
            expire: self.expire,
            minimum: self.minimum,
            description: self.description,
            deleted: self.deleted,
        })
    }
}

impl Resource for domain::Entity {
    const KIND: ResourceKind = ResourceKind::Domain;

    type Output = Domain;

    fn convert(model: domain::Model) -> CoreResult<Domain> {
        model.into_domain()
    }
}

/// Tenant-owned zones.
pub struct DomainRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> DomainRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Create a zone. The serial defaults to the current Unix time.
    ///
    /// # Errors
    /// `DuplicateDomain` when a live zone with the same name exists.
    pub async fn create(&self, ctx: &RequestContext, req: NewDomain) -> CoreResult<Domain> {
        log::debug!(
            "[{}] Creating domain {} for tenant {}",
            ctx.request_id,
            req.name,
            req.tenant_id
        );
        let created = datetime::now();
        let now = datetime::to_storage(&created);
        let active = domain::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            tenant_id: Set(req.tenant_id),
            name: Set(req.name),
            email: Set(req.email),
            ttl: Set(req.ttl),
            serial: Set(req.serial.unwrap_or_else(|| created.timestamp())),
            refresh: Set(req.refresh),
            retry: Set(req.retry),
            expire: Set(req.expire),
            minimum: Set(req.minimum),
            status: Set(req.status.as_str().to_string()),
            description: Set(req.description),
            deleted: Set(NOT_DELETED.to_string()),
            deleted_at: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let sp = savepoint(self.txn).await?;
        let result = active.insert(&sp).await;
        finish(sp, ResourceKind::Domain, result).await?.into_domain()
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> CoreResult<Domain> {
        super::get::<domain::Entity>(self.txn, ctx, id).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        criterion: &Criterion,
        page: &PageRequest,
    ) -> CoreResult<Vec<Domain>> {
        super::find::<domain::Entity>(self.txn, ctx, criterion, page).await
    }

    pub async fn find_one(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<Domain> {
        super::find_one::<domain::Entity>(self.txn, ctx, criterion).await
    }

    /// Partial update. A new `tenant_id` transfers the zone.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: DomainUpdate,
    ) -> CoreResult<Domain> {
        let mut active: domain::ActiveModel =
            fetch::<domain::Entity>(self.txn, ctx, id).await?.into();

        if let Some(tenant_id) = req.tenant_id {
            log::info!("[{}] Transferring domain {id} to tenant {tenant_id}", ctx.request_id);
            active.tenant_id = Set(tenant_id);
        }
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(email) = req.email {
            active.email = Set(email);
        }
        if let Some(ttl) = req.ttl {
            active.ttl = Set(ttl);
        }
        if let Some(serial) = req.serial {
            active.serial = Set(serial);
        }
        if let Some(refresh) = req.refresh {
            active.refresh = Set(refresh);
        }
        if let Some(retry) = req.retry {
            active.retry = Set(retry);
        }
        if let Some(expire) = req.expire {
            active.expire = Set(expire);
        }
        if let Some(minimum) = req.minimum {
            active.minimum = Set(minimum);
        }
        if let Some(status) = req.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        active.updated_at = Set(timestamp());

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        finish(sp, ResourceKind::Domain, result).await?.into_domain()
    }

    /// Soft delete: mark the row deleted and return it.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> CoreResult<Domain> {
        let mut active: domain::ActiveModel =
            fetch::<domain::Entity>(self.txn, ctx, id).await?.into();

        let now = timestamp();
        active.deleted = Set(Domain::deletion_marker(id));
        active.deleted_at = Set(Some(now.clone()));
        active.status = Set(DomainStatus::Deleted.as_str().to_string());
        active.updated_at = Set(now);

        let sp = savepoint(self.txn).await?;
        let result = active.update(&sp).await;
        let deleted = finish(sp, ResourceKind::Domain, result).await?.into_domain()?;
        log::info!("[{}] Soft-deleted domain {}", ctx.request_id, deleted.name);
        Ok(deleted)
    }

    pub async fn count(&self, ctx: &RequestContext, criterion: &Criterion) -> CoreResult<u64> {
        super::count::<domain::Entity>(self.txn, ctx, criterion).await
    }
}
