// Report generation against the in-memory record repository and store
//
// Figures refer to the fixture described in tests/helpers/test_data.rs.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use helpers::*;
use workshop_analytics::analytics::models::NamedMetric;
use workshop_analytics::analytics::services::PeriodRequest;
use workshop_analytics::reports::models::{ReportPayload, ReportStatus, ReportType};
use workshop_analytics::reports::repositories::{InMemoryReportStore, ReportStore};
use workshop_analytics::reports::services::{GenerateReport, ReportService, ReportSettings};

fn service() -> (ReportService, Arc<InMemoryReportStore>) {
    let store = Arc::new(InMemoryReportStore::new());
    let service = ReportService::new(workshop_repository(), store.clone(), ReportSettings::default());
    (service, store)
}

fn january(report_type: &str) -> GenerateReport {
    GenerateReport {
        report_type: report_type.to_string(),
        period: january_2024(),
        ..GenerateReport::default()
    }
}

fn metric(name: &str, value: rust_decimal::Decimal) -> NamedMetric {
    NamedMetric::new(name, value)
}

#[tokio::test]
async fn test_financial_report_for_january() {
    let (service, _) = service();
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

    let report = service
        .generate_at(january("financial"), "Ana Admin", now)
        .await
        .unwrap();

    assert_eq!(report.status, ReportStatus::Completed);
    assert_eq!(report.report_type, ReportType::Financial);
    assert_eq!(report.title, "Financial Report - 2024-02-01");
    assert_eq!(report.generated_by, "Ana Admin");

    let Some(ReportPayload::Financial(payload)) = report.payload else {
        panic!("expected financial payload");
    };

    assert_eq!(payload.summary.total_revenue, dec!(600));
    assert_eq!(payload.summary.total_expenses, dec!(390));
    assert_eq!(payload.summary.net_profit, dec!(210));
    assert_eq!(payload.summary.profit_margin, dec!(35));
    assert_eq!(payload.summary.completed_services, 4);

    assert_eq!(payload.revenue_growth.current, dec!(600));
    assert_eq!(payload.revenue_growth.previous, dec!(200));
    assert_eq!(payload.revenue_growth.growth_rate, dec!(200));

    assert_eq!(payload.monthly_revenue.len(), 1);
    assert_eq!(payload.monthly_revenue[0].label, "Jan 2024");
    assert_eq!(payload.monthly_revenue[0].value, dec!(600));

    assert_eq!(
        payload.revenue_by_category,
        vec![
            metric("Oil Change", dec!(250)),
            metric("Brake Repair", dec!(300)),
            metric("General Service", dec!(50)),
        ]
    );
    assert_eq!(
        payload.top_categories,
        vec![
            metric("Brake Repair", dec!(300)),
            metric("Oil Change", dec!(250)),
            metric("General Service", dec!(50)),
        ]
    );
    assert_eq!(
        payload.ledger_by_category,
        vec![metric("Parts", dec!(580)), metric("Utilities", dec!(120))]
    );
}

#[tokio::test]
async fn test_service_report_for_january() {
    let (service, _) = service();

    let report = service.generate(january("service"), "Ana Admin").await.unwrap();
    let Some(ReportPayload::Service(payload)) = report.payload else {
        panic!("expected service payload");
    };

    let counts = &payload.status_counts;
    assert_eq!(
        (counts.total, counts.completed, counts.in_progress, counts.pending, counts.cancelled),
        (7, 4, 1, 1, 1)
    );
    assert_eq!(payload.completion_rate, dec!(57.14));
    assert_eq!(payload.average_service_value, dec!(150));
    assert_eq!(payload.completed_growth.current, dec!(4));
    assert_eq!(payload.completed_growth.previous, dec!(1));
    assert_eq!(payload.completed_growth.growth_rate, dec!(300));
    assert_eq!(payload.monthly_completed[0].value, dec!(4));
    assert_eq!(
        payload.top_categories,
        vec![
            metric("Oil Change", dec!(2)),
            metric("Brake Repair", dec!(1)),
            metric("General Service", dec!(1)),
        ]
    );
}

#[tokio::test]
async fn test_customer_report_for_january() {
    let (service, _) = service();

    let report = service.generate(january("customer"), "Ana Admin").await.unwrap();
    let Some(ReportPayload::Customer(payload)) = report.payload else {
        panic!("expected customer payload");
    };

    assert_eq!(payload.total_customers, 5);
    assert_eq!(payload.new_customers, 2);
    assert_eq!(payload.active_customers, 4);
    assert_eq!(payload.returning_customers, 3);
    assert_eq!(payload.new_customer_growth.previous, dec!(1));
    assert_eq!(payload.new_customer_growth.growth_rate, dec!(100));
    assert_eq!(payload.monthly_new_customers[0].value, dec!(2));
    assert_eq!(
        payload.top_customers,
        vec![
            metric("Sari", dec!(300)),
            metric("Budi", dec!(250)),
            metric("Andi", dec!(50)),
        ]
    );
}

#[tokio::test]
async fn test_inventory_report() {
    let (service, _) = service();

    let report = service.generate(january("inventory"), "Ana Admin").await.unwrap();
    let Some(ReportPayload::Inventory(payload)) = report.payload else {
        panic!("expected inventory payload");
    };

    assert_eq!(payload.total_items, 5);
    assert_eq!(payload.total_value, dec!(450));
    assert_eq!(payload.status_counts.out_of_stock, 1);
    assert_eq!(payload.status_counts.low_stock, 1);
    assert_eq!(payload.status_counts.adequate, 1);
    assert_eq!(payload.status_counts.in_stock, 2);
    assert_eq!(payload.reorder_quantity, 26);
    assert_eq!(payload.reorder_cost, dec!(425));

    let reorder_ids: Vec<i64> = payload.reorder_items.iter().map(|i| i.id).collect();
    assert_eq!(reorder_ids, vec![1, 2]);
    assert_eq!(
        payload.top_categories_by_value,
        vec![
            metric("Fluids", dec!(160)),
            metric("Engine", dec!(120)),
            metric("Brakes", dec!(100)),
            metric("Filters", dec!(70)),
        ]
    );
}

#[tokio::test]
async fn test_worker_report_for_january() {
    let (service, _) = service();

    let report = service.generate(january("worker"), "Ana Admin").await.unwrap();
    let Some(ReportPayload::Worker(payload)) = report.payload else {
        panic!("expected worker payload");
    };

    assert_eq!(payload.total_workers, 3);
    assert_eq!(payload.services_completed, 4);
    assert_eq!(payload.average_rating, dec!(4.25));
    assert_eq!(
        payload.top_by_revenue,
        vec![
            metric("Eko", dec!(350)),
            metric("Joko", dec!(250)),
            metric("Tono", dec!(0)),
        ]
    );
    // Joko and Eko tie on two; Joko comes first in the worker list
    assert_eq!(
        payload.top_by_completed,
        vec![
            metric("Joko", dec!(2)),
            metric("Eko", dec!(2)),
            metric("Tono", dec!(0)),
        ]
    );
}

#[tokio::test]
async fn test_same_inputs_give_same_payload() {
    let (service, _) = service();
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

    for report_type in ReportType::ALL {
        let first = service
            .generate_at(january(report_type.as_str()), "Ana Admin", now)
            .await
            .unwrap();
        let second = service
            .generate_at(january(report_type.as_str()), "Ana Admin", now)
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.payload, second.payload, "{} payload differs", report_type);
    }
}

#[tokio::test]
async fn test_named_period_resolves_against_now() {
    let (service, _) = service();
    let now = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

    let report = service
        .generate_at(
            GenerateReport {
                report_type: "financial".to_string(),
                period: PeriodRequest::Token("month".to_string()),
                ..GenerateReport::default()
            },
            "Ana Admin",
            now,
        )
        .await
        .unwrap();

    assert_eq!(report.period.start, Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap());
    assert_eq!(report.period.end, now);
    let Some(ReportPayload::Financial(payload)) = report.payload else {
        panic!("expected financial payload");
    };
    assert_eq!(payload.summary.total_revenue, dec!(600));
}

#[tokio::test]
async fn test_stored_report_round_trips_through_store() {
    let (service, store) = service();

    let report = service
        .generate(
            GenerateReport {
                title: Some("January close".to_string()),
                description: Some("Month-end numbers".to_string()),
                ..january("financial")
            },
            "Ana Admin",
        )
        .await
        .unwrap();

    let fetched = service.get(&report.id).await.unwrap();
    assert_eq!(fetched, report);
    assert_eq!(fetched.title, "January close");

    let listed = store.list(None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].payload.is_none());
}

#[tokio::test]
async fn test_listing_is_newest_first_and_filters_by_type() {
    let (service, _) = service();
    let base = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

    for (minutes, report_type) in [(0, "financial"), (1, "worker"), (2, "financial")] {
        service
            .generate_at(
                january(report_type),
                "Ana Admin",
                base + chrono::Duration::minutes(minutes),
            )
            .await
            .unwrap();
    }

    let all = service.list(None).await.unwrap();
    let order: Vec<(ReportType, i64)> = all
        .iter()
        .map(|r| (r.report_type, (r.created_at - base).num_minutes()))
        .collect();
    assert_eq!(
        order,
        vec![
            (ReportType::Financial, 2),
            (ReportType::Worker, 1),
            (ReportType::Financial, 0),
        ]
    );

    let financial = service.list(Some("financial")).await.unwrap();
    assert_eq!(financial.len(), 2);
    assert!(financial.iter().all(|r| r.report_type == ReportType::Financial));
}

#[tokio::test]
async fn test_concurrent_generations_are_all_stored() {
    let (service, store) = service();
    let service = Arc::new(service);

    let handles: Vec<_> = ReportType::ALL
        .into_iter()
        .cycle()
        .take(20)
        .map(|report_type| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .generate(january(report_type.as_str()), "Ana Admin")
                    .await
            })
        })
        .collect();

    for handle in handles {
        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.status, ReportStatus::Completed);
    }
    assert_eq!(store.len().unwrap(), 20);
}
