#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `Storage`: connection, schema management and ping.

use dns_controlplane_core::config::ConfigRegistry;
use dns_controlplane_core::error::CoreError;
use dns_controlplane_core::types::{NewDomain, RequestContext};
use dns_controlplane_storage::{Criterion, Storage, StorageConfig, STORAGE_GROUP};

#[tokio::test]
async fn open_creates_missing_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("nested").join("dir").join("control.db");

    let storage = Storage::open(&db_path).await.unwrap();
    assert!(db_path.exists());

    let uow = storage.begin().await.unwrap();
    let count = uow
        .domains()
        .count(&RequestContext::admin(), &Criterion::new())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn connect_from_registry_and_setup_schema() {
    let tmp = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", tmp.path().join("cfg.db").display());
    let registry = ConfigRegistry::new()
        .with(STORAGE_GROUP, "connection", url)
        .with(STORAGE_GROUP, "max_connections", 2);

    let config = StorageConfig::from_registry(&registry).unwrap();
    let storage = Storage::connect(&config).await.unwrap();
    storage.setup_schema().await.unwrap();
    // migrations are idempotent
    storage.setup_schema().await.unwrap();

    let ctx = RequestContext::new("t1");
    let uow = storage.begin().await.unwrap();
    uow.domains()
        .create(&ctx, NewDomain::new("t1", "example.org.", "admin@example.org"))
        .await
        .unwrap();
    uow.commit().await.unwrap();
}

#[tokio::test]
async fn teardown_drops_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Storage::open(&tmp.path().join("test.db")).await.unwrap();

    storage.teardown_schema().await.unwrap();
    {
        let uow = storage.begin().await.unwrap();
        let err = uow
            .domains()
            .count(&RequestContext::admin(), &Criterion::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
    }

    storage.setup_schema().await.unwrap();
    let uow = storage.begin().await.unwrap();
    let count = uow
        .domains()
        .count(&RequestContext::admin(), &Criterion::new())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn ping_reports_round_trip_time() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Storage::open(&tmp.path().join("test.db")).await.unwrap();

    let health = storage.ping(&RequestContext::admin()).await;
    assert_eq!(health.status, Some(true));
    let rtt = health.rtt.expect("rtt is measured");
    assert_eq!(rtt.split('.').nth(1).map(str::len), Some(6));
}
