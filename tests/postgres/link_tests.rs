//! Get-or-create and uniqueness tests for the `PostgreSQL` correlation store.

use crate::postgres::helpers::{
    CleanupGuard, PostgresCluster, database_name, dist_git_request, ensure_template,
    postgres_cluster, setup_store, source_request, test_runtime,
};
use chrono::{Duration, TimeZone, Utc};
use hardly::correlation::ports::{CorrelationStore, CorrelationStoreError};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn source_record_is_created_once(postgres_cluster: PostgresCluster) {
    let cluster = postgres_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = database_name("source_once");
    let guard = CleanupGuard::new(cluster, db_name.clone());
    let store = setup_store(cluster, &db_name).expect("store setup");
    let rt = test_runtime().expect("tokio runtime");
    let first_seen = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).single().expect("timestamp");
    let source = source_request(5).expect("identity");

    let first = rt
        .block_on(store.get_or_create_source_record(&source, first_seen))
        .expect("first get-or-create");
    let second = rt
        .block_on(store.get_or_create_source_record(&source, first_seen + Duration::hours(2)))
        .expect("second get-or-create");

    assert_eq!(first, second);
    assert_eq!(second.first_seen_at(), first_seen);
    assert_eq!(second.identity(), &source);

    drop(store);
    guard.cleanup().expect("cleanup database");
}

#[rstest]
fn link_is_visible_from_both_sides(postgres_cluster: PostgresCluster) {
    let cluster = postgres_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = database_name("link_lookup");
    let guard = CleanupGuard::new(cluster, db_name.clone());
    let store = setup_store(cluster, &db_name).expect("store setup");
    let rt = test_runtime().expect("tokio runtime");
    let source = source_request(5).expect("identity");
    let downstream = dist_git_request(11).expect("identity");

    let record = rt
        .block_on(store.get_or_create_source_record(&source, Utc::now()))
        .expect("source record");
    assert_eq!(
        rt.block_on(store.lookup_downstream_by_source(&record))
            .expect("lookup before linking"),
        None
    );

    let outcome = rt
        .block_on(store.get_or_create_link(&record, &downstream, Utc::now()))
        .expect("link");
    assert!(outcome.is_created());

    assert_eq!(
        rt.block_on(store.lookup_downstream_by_source(&record))
            .expect("lookup by source"),
        Some(downstream.clone())
    );
    assert_eq!(
        rt.block_on(store.lookup_source_by_downstream(&downstream))
            .expect("lookup by downstream"),
        Some(source)
    );
    assert_eq!(
        rt.block_on(store.lookup_source_by_downstream(&dist_git_request(99).expect("identity")))
            .expect("lookup of unknown downstream"),
        None
    );

    drop(store);
    guard.cleanup().expect("cleanup database");
}

#[rstest]
fn second_link_for_source_returns_existing(postgres_cluster: PostgresCluster) {
    let cluster = postgres_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = database_name("link_existing");
    let guard = CleanupGuard::new(cluster, db_name.clone());
    let store = setup_store(cluster, &db_name).expect("store setup");
    let rt = test_runtime().expect("tokio runtime");
    let linked_at = Utc.with_ymd_and_hms(2026, 10, 2, 8, 30, 0).single().expect("timestamp");
    let record = rt
        .block_on(store.get_or_create_source_record(&source_request(5).expect("identity"), linked_at))
        .expect("source record");

    rt.block_on(store.get_or_create_link(&record, &dist_git_request(11).expect("identity"), linked_at))
        .expect("first link");
    let repeated = rt
        .block_on(store.get_or_create_link(
            &record,
            &dist_git_request(11).expect("identity"),
            linked_at + Duration::minutes(5),
        ))
        .expect("repeated link");
    let other = rt
        .block_on(store.get_or_create_link(
            &record,
            &dist_git_request(12).expect("identity"),
            linked_at + Duration::minutes(10),
        ))
        .expect("link to another downstream");

    for outcome in [&repeated, &other] {
        assert!(!outcome.is_created());
        assert_eq!(
            outcome.link().downstream(),
            &dist_git_request(11).expect("identity")
        );
        assert_eq!(outcome.link().linked_at(), linked_at);
    }

    drop(store);
    guard.cleanup().expect("cleanup database");
}

#[rstest]
fn claimed_downstream_is_rejected(postgres_cluster: PostgresCluster) {
    let cluster = postgres_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = database_name("link_claimed");
    let guard = CleanupGuard::new(cluster, db_name.clone());
    let store = setup_store(cluster, &db_name).expect("store setup");
    let rt = test_runtime().expect("tokio runtime");
    let first = rt
        .block_on(store.get_or_create_source_record(&source_request(5).expect("identity"), Utc::now()))
        .expect("first source record");
    let second = rt
        .block_on(store.get_or_create_source_record(&source_request(6).expect("identity"), Utc::now()))
        .expect("second source record");
    let downstream = dist_git_request(11).expect("identity");

    rt.block_on(store.get_or_create_link(&first, &downstream, Utc::now()))
        .expect("first link");
    let result = rt.block_on(store.get_or_create_link(&second, &downstream, Utc::now()));

    assert!(
        matches!(
            &result,
            Err(CorrelationStoreError::DownstreamClaimed { downstream: claimed, owner })
                if *claimed == downstream && *owner == source_request(5).expect("identity")
        ),
        "expected DownstreamClaimed, got: {result:?}"
    );
    assert!(
        rt.block_on(store.lookup_downstream_by_source(&second))
            .expect("lookup")
            .is_none()
    );

    drop(store);
    guard.cleanup().expect("cleanup database");
}

#[rstest]
fn concurrent_links_insert_exactly_once(postgres_cluster: PostgresCluster) {
    let cluster = postgres_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = database_name("link_race");
    let guard = CleanupGuard::new(cluster, db_name.clone());
    let store = Arc::new(setup_store(cluster, &db_name).expect("store setup"));
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("tokio runtime");
    let record = rt
        .block_on(store.get_or_create_source_record(&source_request(5).expect("identity"), Utc::now()))
        .expect("source record");

    let outcomes = rt.block_on(async {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let racing_store = Arc::clone(&store);
                let racing_record = record.clone();
                tokio::spawn(async move {
                    racing_store
                        .get_or_create_link(
                            &racing_record,
                            &dist_git_request(11).expect("identity"),
                            Utc::now(),
                        )
                        .await
                })
            })
            .collect();
        let mut outcomes = Vec::new();
        for worker in workers {
            outcomes.push(worker.await.expect("worker joins").expect("link call"));
        }
        outcomes
    });

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_created()).count(), 1);

    drop(store);
    guard.cleanup().expect("cleanup database");
}
