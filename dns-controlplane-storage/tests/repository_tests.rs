#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for the resource repositories.

use dns_controlplane_core::error::CoreError;
use dns_controlplane_core::types::{
    BlacklistUpdate, DomainStatus, DomainUpdate, NewBlacklist, NewDomain, NewQuota, NewRecord,
    NewRecordSet, NewServer, NewTld, NewTsigKey, QuotaUpdate, RecordSetUpdate, RecordUpdate,
    RequestContext, TldUpdate, TsigKeyUpdate,
};
use dns_controlplane_storage::{Criterion, PageRequest, Storage};

// ===== Helpers =====

async fn create_test_storage() -> (Storage, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let storage = Storage::open(&tmp.path().join("test.db"))
        .await
        .expect("failed to open storage");
    (storage, tmp)
}

fn new_domain(tenant: &str, name: &str) -> NewDomain {
    NewDomain::new(tenant, name, "hostmaster@example.org")
}

fn a_recordset(domain_id: &str, name: &str) -> NewRecordSet {
    NewRecordSet {
        domain_id: domain_id.to_string(),
        name: name.to_string(),
        record_type: "A".to_string(),
        ttl: None,
        description: None,
    }
}

fn record(domain_id: &str, recordset_id: &str, data: &str) -> NewRecord {
    NewRecord {
        domain_id: domain_id.to_string(),
        recordset_id: recordset_id.to_string(),
        data: data.to_string(),
        priority: None,
        description: None,
    }
}

// ===== Domains =====

#[tokio::test]
async fn domain_create_applies_defaults() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();
    let ctx = RequestContext::new("t1");

    let domain = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();
    assert_eq!(domain.tenant_id, "t1");
    assert_eq!(domain.ttl, 3600);
    assert_eq!(domain.status, DomainStatus::Active);
    assert_eq!(domain.deleted, "0");
    assert!(domain.deleted_at.is_none());
    assert!(domain.serial > 0);

    let fetched = uow.domains().get(&ctx, &domain.id).await.unwrap();
    assert_eq!(fetched, domain);
}

#[tokio::test]
async fn duplicate_domain_names_are_rejected_across_tenants() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();

    uow.domains()
        .create(&RequestContext::new("t1"), new_domain("t1", "example.org."))
        .await
        .unwrap();

    let err = uow
        .domains()
        .create(&RequestContext::new("t1"), new_domain("t1", "example.org."))
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DuplicateDomain);

    let err = uow
        .domains()
        .create(&RequestContext::new("t2"), new_domain("t2", "example.org."))
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DuplicateDomain);

    // the unit of work stays usable after a translated violation
    uow.domains()
        .create(&RequestContext::new("t2"), new_domain("t2", "example.net."))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let uow = storage.begin().await.unwrap();
    let total = uow
        .domains()
        .count(&RequestContext::admin(), &Criterion::new())
        .await
        .unwrap();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn deleted_domain_frees_its_name() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();
    let ctx = RequestContext::new("t1");

    let first = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();
    let deleted = uow.domains().delete(&ctx, &first.id).await.unwrap();
    assert_eq!(deleted.status, DomainStatus::Deleted);
    assert_eq!(deleted.deleted, first.id.replace('-', ""));
    assert!(deleted.deleted_at.is_some());

    let second = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn domain_update_and_transfer() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();
    let ctx = RequestContext::new("t1");

    let domain = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();

    let updated = uow
        .domains()
        .update(
            &ctx,
            &domain.id,
            DomainUpdate {
                ttl: Some(300),
                description: Some(Some("primary zone".to_string())),
                ..DomainUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.ttl, 300);
    assert_eq!(updated.description.as_deref(), Some("primary zone"));
    assert_eq!(updated.email, domain.email);

    let moved = uow
        .domains()
        .update(
            &RequestContext::admin(),
            &domain.id,
            DomainUpdate {
                tenant_id: Some("t2".to_string()),
                ..DomainUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.tenant_id, "t2");

    let err = uow.domains().get(&ctx, &domain.id).await.unwrap_err();
    assert_eq!(err, CoreError::DomainNotFound);
}

#[tokio::test]
async fn update_of_missing_domain_is_not_found() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();

    let err = uow
        .domains()
        .update(
            &RequestContext::admin(),
            "00000000-0000-4000-8000-000000000000",
            DomainUpdate::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DomainNotFound);
}

// ===== Record sets and records =====

#[tokio::test]
async fn recordset_inherits_domain_tenant() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();

    let domain = uow
        .domains()
        .create(&RequestContext::new("t1"), new_domain("t1", "example.org."))
        .await
        .unwrap();

    let set = uow
        .recordsets()
        .create(&RequestContext::admin(), a_recordset(&domain.id, "www.example.org."))
        .await
        .unwrap();
    assert_eq!(set.tenant_id, "t1");
    assert_eq!(set.domain_id, domain.id);

    let err = uow
        .recordsets()
        .create(&RequestContext::admin(), a_recordset(&domain.id, "www.example.org."))
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DuplicateRecordSet);

    let updated = uow
        .recordsets()
        .update(
            &RequestContext::new("t1"),
            &set.id,
            RecordSetUpdate {
                ttl: Some(Some(60)),
                ..RecordSetUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.ttl, Some(60));
    assert_eq!(updated.tenant_id, "t1");
}

#[tokio::test]
async fn cannot_create_under_another_tenants_domain() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();

    let domain = uow
        .domains()
        .create(&RequestContext::new("t1"), new_domain("t1", "example.org."))
        .await
        .unwrap();
    let set = uow
        .recordsets()
        .create(&RequestContext::new("t1"), a_recordset(&domain.id, "www.example.org."))
        .await
        .unwrap();

    let intruder = RequestContext::new("t2");
    let err = uow
        .recordsets()
        .create(&intruder, a_recordset(&domain.id, "evil.example.org."))
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DomainNotFound);

    let err = uow
        .records()
        .create(&intruder, record(&domain.id, &set.id, "10.0.0.66"))
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DomainNotFound);
}

#[tokio::test]
async fn record_requires_recordset_of_same_domain() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();
    let ctx = RequestContext::new("t1");

    let org = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();
    let net = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.net."))
        .await
        .unwrap();
    let org_set = uow
        .recordsets()
        .create(&ctx, a_recordset(&org.id, "www.example.org."))
        .await
        .unwrap();

    let err = uow
        .records()
        .create(&ctx, record(&net.id, &org_set.id, "10.0.0.1"))
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::RecordSetNotFound);
}

#[tokio::test]
async fn record_hash_detects_duplicates_and_follows_updates() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();
    let ctx = RequestContext::new("t1");

    let domain = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();
    let set = uow
        .recordsets()
        .create(&ctx, a_recordset(&domain.id, "www.example.org."))
        .await
        .unwrap();

    let first = uow
        .records()
        .create(&ctx, record(&domain.id, &set.id, "10.0.0.1"))
        .await
        .unwrap();
    assert_eq!(first.tenant_id, "t1");
    assert_eq!(first.hash.len(), 64);

    let err = uow
        .records()
        .create(&ctx, record(&domain.id, &set.id, "10.0.0.1"))
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DuplicateRecord);

    let second = uow
        .records()
        .create(&ctx, record(&domain.id, &set.id, "10.0.0.2"))
        .await
        .unwrap();

    let err = uow
        .records()
        .update(
            &ctx,
            &second.id,
            RecordUpdate {
                data: Some("10.0.0.1".to_string()),
                ..RecordUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DuplicateRecord);

    let moved = uow
        .records()
        .update(
            &ctx,
            &second.id,
            RecordUpdate {
                data: Some("10.0.0.3".to_string()),
                ..RecordUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.data, "10.0.0.3");
    assert_ne!(moved.hash, second.hash);
    assert_eq!(moved.recordset_id, set.id);
}

#[tokio::test]
async fn hard_deletes_return_removed_rows() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();
    let ctx = RequestContext::new("t1");

    let domain = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();
    let set = uow
        .recordsets()
        .create(&ctx, a_recordset(&domain.id, "www.example.org."))
        .await
        .unwrap();
    let rec = uow
        .records()
        .create(&ctx, record(&domain.id, &set.id, "10.0.0.1"))
        .await
        .unwrap();

    let removed = uow.records().delete(&ctx, &rec.id).await.unwrap();
    assert_eq!(removed.id, rec.id);
    assert_eq!(
        uow.records().get(&ctx, &rec.id).await.unwrap_err(),
        CoreError::RecordNotFound
    );

    let removed = uow.recordsets().delete(&ctx, &set.id).await.unwrap();
    assert_eq!(removed, set);
    assert_eq!(
        uow.recordsets().delete(&ctx, &set.id).await.unwrap_err(),
        CoreError::RecordSetNotFound
    );
}

// ===== Supporting resources =====

#[tokio::test]
async fn quota_is_unique_per_tenant_and_resource() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();
    let admin = RequestContext::admin();

    let quota = uow
        .quotas()
        .create(
            &admin,
            NewQuota {
                tenant_id: "t1".to_string(),
                resource: "domains".to_string(),
                hard_limit: 10,
            },
        )
        .await
        .unwrap();

    let err = uow
        .quotas()
        .create(
            &admin,
            NewQuota {
                tenant_id: "t1".to_string(),
                resource: "domains".to_string(),
                hard_limit: 20,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::DuplicateQuota);

    let updated = uow
        .quotas()
        .update(
            &RequestContext::new("t1"),
            &quota.id,
            QuotaUpdate {
                hard_limit: Some(25),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.hard_limit, 25);

    let err = uow
        .quotas()
        .get(&RequestContext::new("t2"), &quota.id)
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::QuotaNotFound);
}

#[tokio::test]
async fn global_resources_reject_duplicate_names() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();
    let ctx = RequestContext::admin();

    uow.servers()
        .create(&ctx, NewServer { name: "ns1.example.org.".to_string() })
        .await
        .unwrap();
    assert_eq!(
        uow.servers()
            .create(&ctx, NewServer { name: "ns1.example.org.".to_string() })
            .await
            .unwrap_err(),
        CoreError::DuplicateServer
    );

    let tld = uow
        .tlds()
        .create(&ctx, NewTld { name: "org".to_string(), description: None })
        .await
        .unwrap();
    uow.tlds()
        .create(&ctx, NewTld { name: "net".to_string(), description: None })
        .await
        .unwrap();
    assert_eq!(
        uow.tlds()
            .update(
                &ctx,
                &tld.id,
                TldUpdate {
                    name: Some("net".to_string()),
                    ..TldUpdate::default()
                },
            )
            .await
            .unwrap_err(),
        CoreError::DuplicateTld
    );

    let key = uow
        .tsigkeys()
        .create(
            &ctx,
            NewTsigKey {
                name: "transfer".to_string(),
                algorithm: "hmac-sha256".to_string(),
                secret: "c2VjcmV0".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        uow.tsigkeys()
            .create(
                &ctx,
                NewTsigKey {
                    name: "transfer".to_string(),
                    algorithm: "hmac-md5".to_string(),
                    secret: "b3RoZXI=".to_string(),
                },
            )
            .await
            .unwrap_err(),
        CoreError::DuplicateTsigKey
    );
    let rotated = uow
        .tsigkeys()
        .update(
            &ctx,
            &key.id,
            TsigKeyUpdate {
                secret: Some("bmV3".to_string()),
                ..TsigKeyUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(rotated.secret, "bmV3");
    assert_eq!(rotated.algorithm, "hmac-sha256");

    let pattern = uow
        .blacklists()
        .create(
            &ctx,
            NewBlacklist {
                pattern: "^example\\.com\\.$".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(
        uow.blacklists()
            .create(
                &ctx,
                NewBlacklist {
                    pattern: "^example\\.com\\.$".to_string(),
                    description: Some("again".to_string()),
                },
            )
            .await
            .unwrap_err(),
        CoreError::DuplicateBlacklist
    );
    let described = uow
        .blacklists()
        .update(
            &ctx,
            &pattern.id,
            BlacklistUpdate {
                description: Some(Some("reserved".to_string())),
                ..BlacklistUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(described.description.as_deref(), Some("reserved"));

    let removed = uow.servers().find(&ctx, &Criterion::new(), &PageRequest::new()).await.unwrap();
    assert_eq!(removed.len(), 1);
    uow.servers().delete(&ctx, &removed[0].id).await.unwrap();
    assert_eq!(uow.servers().count(&ctx, &Criterion::new()).await.unwrap(), 0);
    assert_eq!(
        uow.tlds().get(&ctx, "00000000-0000-4000-8000-000000000000").await.unwrap_err(),
        CoreError::TldNotFound
    );
}

// ===== Tenants =====

#[tokio::test]
async fn tenants_are_aggregated_from_live_domains() {
    let (storage, _tmp) = create_test_storage().await;
    let uow = storage.begin().await.unwrap();

    for (tenant, name) in [
        ("t1", "b.example."),
        ("t1", "a.example."),
        ("t2", "c.example."),
        ("t3", "d.example."),
    ] {
        uow.domains()
            .create(&RequestContext::new(tenant), new_domain(tenant, name))
            .await
            .unwrap();
    }
    let gone = uow
        .domains()
        .find_one(&RequestContext::admin(), &Criterion::new().with("name", "d.example."))
        .await
        .unwrap();
    uow.domains()
        .delete(&RequestContext::admin(), &gone.id)
        .await
        .unwrap();

    let admin = RequestContext::admin();
    let tenants = uow.tenants().find_tenants(&admin).await.unwrap();
    let summary: Vec<_> = tenants
        .iter()
        .map(|t| (t.id.as_str(), t.domain_count))
        .collect();
    assert_eq!(summary, vec![("t1", 2), ("t2", 1)]);
    assert_eq!(uow.tenants().count_tenants(&admin).await.unwrap(), 2);

    let t1 = uow.tenants().get_tenant(&admin, "t1").await.unwrap();
    assert_eq!(t1.domain_count, 2);
    assert_eq!(t1.domains, vec!["a.example.", "b.example."]);

    let scoped = uow
        .tenants()
        .find_tenants(&RequestContext::new("t2"))
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].id, "t2");
}

// ===== End to end =====

#[tokio::test]
async fn zone_lifecycle_with_soft_delete() {
    let (storage, _tmp) = create_test_storage().await;
    let ctx = RequestContext::new("t1");

    let uow = storage.begin().await.unwrap();
    let domain = uow
        .domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();
    let set = uow
        .recordsets()
        .create(&ctx, a_recordset(&domain.id, "www.example.org."))
        .await
        .unwrap();
    let rec = uow
        .records()
        .create(&ctx, record(&domain.id, &set.id, "10.0.0.1"))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let uow = storage.begin().await.unwrap();
    let sets = uow
        .recordsets()
        .find(
            &ctx,
            &Criterion::new().with("domain_id", domain.id.as_str()),
            &PageRequest::new(),
        )
        .await
        .unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].record_type, "A");
    let records = uow
        .records()
        .find(
            &ctx,
            &Criterion::new().with("recordset_id", set.id.as_str()),
            &PageRequest::new(),
        )
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, rec.id);

    let deleted = uow.domains().delete(&ctx, &domain.id).await.unwrap();
    assert_eq!(deleted.status, DomainStatus::Deleted);
    uow.commit().await.unwrap();

    let uow = storage.begin().await.unwrap();
    assert_eq!(
        uow.domains().get(&ctx, &domain.id).await.unwrap_err(),
        CoreError::DomainNotFound
    );
    let visible = uow
        .domains()
        .get(&ctx.clone().with_show_deleted(true), &domain.id)
        .await
        .unwrap();
    assert_eq!(visible.deleted, domain.id.replace('-', ""));
}

#[tokio::test]
async fn dropped_unit_of_work_rolls_back() {
    let (storage, _tmp) = create_test_storage().await;
    let ctx = RequestContext::new("t1");

    {
        let uow = storage.begin().await.unwrap();
        uow.domains()
            .create(&ctx, new_domain("t1", "example.org."))
            .await
            .unwrap();
    }

    let uow = storage.begin().await.unwrap();
    assert_eq!(uow.domains().count(&ctx, &Criterion::new()).await.unwrap(), 0);
    uow.domains()
        .create(&ctx, new_domain("t1", "example.org."))
        .await
        .unwrap();
    uow.rollback().await.unwrap();

    let uow = storage.begin().await.unwrap();
    assert_eq!(uow.domains().count(&ctx, &Criterion::new()).await.unwrap(), 0);
}
