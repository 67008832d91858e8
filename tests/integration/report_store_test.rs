// InMemoryReportStore behaviour shared with the MySQL store: insert once,
// list newest first without payloads, fetch with payload.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use helpers::*;
use workshop_analytics::analytics::models::{NamedMetric, Period, PeriodKind};
use workshop_analytics::core::AppError;
use workshop_analytics::reports::models::{
    Report, ReportPayload, ReportStatus, ReportType, WorkerPayload,
};
use workshop_analytics::reports::repositories::{InMemoryReportStore, ReportStore};

fn january() -> Period {
    Period::new(
        PeriodKind::Custom,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

fn worker_report(created_at: DateTime<Utc>) -> Report {
    Report::begin(ReportType::Worker, None, None, january(), "Ana Admin", created_at)
        .complete(ReportPayload::Worker(WorkerPayload {
            total_workers: 3,
            services_completed: 4,
            average_rating: dec!(4.25),
            top_by_revenue: vec![NamedMetric::new("Eko", dec!(350))],
            top_by_completed: vec![NamedMetric::new("Joko", dec!(2))],
        }))
        .unwrap()
}

fn failed_report(report_type: ReportType, created_at: DateTime<Utc>) -> Report {
    Report::begin(report_type, None, None, january(), "Ana Admin", created_at)
        .fail(&AppError::repository(LEAKY_DETAIL))
        .unwrap()
}

#[tokio::test]
async fn test_insert_then_find_returns_equal_report() {
    let store = InMemoryReportStore::new();
    let report = worker_report(at(2024, 2, 1));

    store.insert(&report).await.unwrap();

    let found = store.find_by_id(&report.id).await.unwrap().unwrap();
    assert_eq!(found, report);
    assert!(store.find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_id_is_conflict() {
    let store = InMemoryReportStore::new();
    let report = worker_report(at(2024, 2, 1));

    store.insert(&report).await.unwrap();
    let err = store.insert(&report).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(store.len().unwrap(), 1);
}

#[tokio::test]
async fn test_list_is_newest_first_without_payload() {
    let store = InMemoryReportStore::new();
    let base = at(2024, 2, 1);

    let oldest = worker_report(base);
    let failed = failed_report(ReportType::Financial, base + Duration::hours(1));
    let newest = worker_report(base + Duration::hours(2));

    for report in [&failed, &newest, &oldest] {
        store.insert(report).await.unwrap();
    }

    let listed = store.list(None).await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![newest.id.as_str(), failed.id.as_str(), oldest.id.as_str()]);
    assert!(listed.iter().all(|r| r.payload.is_none()));

    let workers = store.list(Some(ReportType::Worker)).await.unwrap();
    assert_eq!(workers.len(), 2);
    assert!(store.list(Some(ReportType::Inventory)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_equal_timestamps_list_later_insert_first() {
    let store = InMemoryReportStore::new();
    let created_at = at(2024, 2, 1);

    let first = worker_report(created_at);
    let second = worker_report(created_at);
    store.insert(&first).await.unwrap();
    store.insert(&second).await.unwrap();

    let listed = store.list(None).await.unwrap();
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_failed_report_keeps_failure_not_detail() {
    let store = InMemoryReportStore::new();
    let report = failed_report(ReportType::Customer, at(2024, 2, 1));

    store.insert(&report).await.unwrap();

    let found = store.find_by_id(&report.id).await.unwrap().unwrap();
    assert_eq!(found.status, ReportStatus::Failed);
    assert!(found.payload.is_none());

    let failure = found.failure.unwrap();
    assert_eq!(failure.code, "REPOSITORY_ERROR");
    assert!(!failure.message.contains(LEAKY_DETAIL));
}

#[tokio::test]
async fn test_concurrent_inserts_are_all_kept() {
    let store = Arc::new(InMemoryReportStore::new());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let report = worker_report(at(2024, 2, 1) + Duration::minutes(i));
                let inserted = store.insert(&report).await;
                inserted.map(|()| report.id)
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
    assert_eq!(store.list(None).await.unwrap().len(), 32);
}
