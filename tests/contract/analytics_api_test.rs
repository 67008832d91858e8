//! Contract tests for the /analytics and health endpoints

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use rust_decimal_macros::dec;
use serde_json::Value;

use helpers::*;
use workshop_analytics::analytics::RecordRepository;
use workshop_analytics::config::ReportingConfig;
use workshop_analytics::middleware::RequestContext;
use workshop_analytics::reports::repositories::InMemoryReportStore;
use workshop_analytics::AppServices;

fn services_over(records: Arc<dyn RecordRepository>) -> AppServices {
    AppServices::new(
        records,
        Arc::new(InMemoryReportStore::new()),
        &ReportingConfig::default(),
    )
}

macro_rules! app {
    ($services:expr) => {{
        let services = $services;
        test::init_service(
            App::new()
                .wrap(RequestContext)
                .configure(move |cfg| services.configure(cfg)),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_dashboard_for_custom_range() {
    let app = app!(services_over(workshop_repository()));

    let req = test::TestRequest::get()
        .uri("/analytics/dashboard?period=custom&start_date=2024-01-01&end_date=2024-01-31")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["period"]["kind"], "custom");
    assert_decimal(&body["financial"]["total_revenue"], dec!(600));
    assert_decimal(&body["financial"]["profit_margin"], dec!(35));
    assert_decimal(&body["revenue_growth"]["previous"], dec!(200));
    assert_eq!(body["services"]["total"], 7);
    assert_eq!(body["services"]["completed"], 4);
    assert_eq!(body["customers"]["returning_customers"], 3);
    assert_eq!(body["top_categories"][0]["name"], "Brake Repair");
}

#[actix_web::test]
async fn test_dashboard_accepts_named_period() {
    let app = app!(services_over(workshop_repository()));

    let req = test::TestRequest::get()
        .uri("/analytics/dashboard?period=week")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["period"]["kind"], "week");

    // Unknown tokens fall back to a month window
    let req = test::TestRequest::get()
        .uri("/analytics/dashboard?period=fortnight")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["period"]["kind"], "month");
}

#[actix_web::test]
async fn test_dashboard_rejects_bad_dates() {
    let app = app!(services_over(workshop_repository()));

    let cases = [
        ("start_date=2024-02-01&end_date=2024-01-01", "INVALID_RANGE"),
        ("start_date=2024-01-01&end_date=yesterday", "VALIDATION_ERROR"),
        ("period=custom&end_date=2024-01-31", "VALIDATION_ERROR"),
    ];

    for (query, code) in cases {
        let req = test::TestRequest::get()
            .uri(&format!("/analytics/dashboard?{}", query))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        assert_error(status, &body, StatusCode::BAD_REQUEST, code);
    }
}

#[actix_web::test]
async fn test_dashboard_read_failure_is_502() {
    let app = app!(services_over(Arc::new(FailingRecords)));

    let req = test::TestRequest::get()
        .uri("/analytics/dashboard")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;

    assert_error(status, &body, StatusCode::BAD_GATEWAY, "REPOSITORY_ERROR");
    assert!(!body.to_string().contains("10.0.0.3"));
}

#[actix_web::test]
async fn test_inventory_snapshot() {
    let app = app!(services_over(workshop_repository()));

    let req = test::TestRequest::get().uri("/analytics/inventory").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_items"], 5);
    assert_decimal(&body["total_value"], dec!(450));
    assert_eq!(body["status_counts"]["out_of_stock"], 1);
    assert_eq!(body["status_counts"]["in_stock"], 2);
    assert_eq!(body["reorder_quantity"], 26);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["status"], "out_of_stock");
    assert_eq!(items[1]["status"], "low_stock");
}

#[actix_web::test]
async fn test_health_and_readiness() {
    let app = app!(services_over(workshop_repository()));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let app = app!(services_over(Arc::new(FailingRecords)));
    let req = test::TestRequest::get().uri("/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ready"], false);
    assert_eq!(body["checks"]["records"], false);
}
