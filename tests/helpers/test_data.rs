// Record fixtures.
//
// `workshop_records()` is a small workshop with January 2024 activity and a
// little December 2023 history for growth comparisons. Expected figures for
// January (with the default 0.65 expense ratio):
//
//   revenue 600, expenses 390, net 210, margin 35.00
//   revenue growth vs December (200): 200.00
//   services created in January: 7 (4 completed, 1 in progress,
//     1 pending, 1 cancelled)
//   customers: 5 known by Feb 1, 2 new, 4 active, 3 returning
//   stock value 450, reorder 26 units costing 425

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use workshop_analytics::analytics::models::{
    BookingRecord, CustomerRecord, FinanceEntry, ServiceRecord, ServiceStatus, StockItem,
    WorkerRecord,
};
use workshop_analytics::analytics::repositories::{InMemoryRecordRepository, RecordSet};
use workshop_analytics::analytics::services::PeriodRequest;

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// January 1st through January 31st 2024, both inclusive
pub fn january_2024() -> PeriodRequest {
    PeriodRequest::from_dates(date(2024, 1, 1), date(2024, 1, 31)).unwrap()
}

pub fn completed_service(
    id: i64,
    worker_id: Option<i64>,
    category: Option<&str>,
    cost: Decimal,
    completed_at: DateTime<Utc>,
) -> ServiceRecord {
    ServiceRecord {
        id,
        booking_id: id,
        worker_id,
        status: ServiceStatus::Completed,
        category: category.map(str::to_string),
        created_at: completed_at - chrono::Duration::days(1),
        completion_date: Some(completed_at),
        cost: Some(cost),
    }
}

pub fn open_service(
    id: i64,
    worker_id: Option<i64>,
    status: ServiceStatus,
    created_at: DateTime<Utc>,
) -> ServiceRecord {
    ServiceRecord {
        id,
        booking_id: id,
        worker_id,
        status,
        category: None,
        created_at,
        completion_date: None,
        cost: None,
    }
}

pub fn booking(id: i64, customer_id: i64, created_at: DateTime<Utc>) -> BookingRecord {
    BookingRecord {
        id,
        customer_id,
        vehicle_id: customer_id * 10,
        created_at,
        booking_date: created_at,
        status: "confirmed".to_string(),
        reported_issue: "Routine check".to_string(),
        estimated_cost: None,
    }
}

pub fn customer(id: i64, name: &str, created_at: DateTime<Utc>) -> CustomerRecord {
    CustomerRecord {
        id,
        name: name.to_string(),
        created_at,
        bookings: Vec::new(),
    }
}

pub fn worker(id: i64, name: &str, rating: Option<Decimal>) -> WorkerRecord {
    WorkerRecord {
        id,
        name: name.to_string(),
        rating,
        completed_services: Vec::new(),
    }
}

pub fn stock_item(
    id: i64,
    name: &str,
    category: &str,
    quantity: u32,
    min_stock_level: u32,
    unit_price: Decimal,
) -> StockItem {
    StockItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        unit_price,
        min_stock_level,
        supplier: None,
        location: None,
    }
}

pub fn finance_entry(id: i64, category: &str, amount: Decimal, date: DateTime<Utc>) -> FinanceEntry {
    FinanceEntry {
        id,
        amount,
        category: category.to_string(),
        date,
        note: None,
        recorded_by: Some(1),
    }
}

pub fn workshop_records() -> RecordSet {
    RecordSet {
        services: vec![
            completed_service(1, Some(1), Some("Oil Change"), dec!(100), at(2024, 1, 5)),
            completed_service(2, Some(2), Some("Brake Repair"), dec!(300), at(2024, 1, 10)),
            completed_service(3, Some(1), Some("Oil Change"), dec!(150), at(2024, 1, 20)),
            completed_service(4, Some(2), None, dec!(50), at(2024, 1, 25)),
            open_service(5, Some(1), ServiceStatus::InProgress, at(2024, 1, 28)),
            open_service(6, None, ServiceStatus::Pending, at(2024, 1, 29)),
            completed_service(7, Some(2), Some("Brake Repair"), dec!(200), at(2023, 12, 15)),
            open_service(8, None, ServiceStatus::Cancelled, at(2024, 1, 12)),
        ],
        bookings: vec![
            booking(1, 1, at(2024, 1, 4)),
            booking(2, 2, at(2024, 1, 9)),
            booking(3, 1, at(2024, 1, 19)),
            booking(4, 3, at(2024, 1, 24)),
            booking(5, 2, at(2024, 1, 27)),
            booking(6, 3, at(2024, 1, 29)),
            booking(7, 1, at(2023, 12, 14)),
            booking(8, 4, at(2024, 1, 11)),
        ],
        finance_entries: vec![
            finance_entry(1, "Parts", dec!(500), at(2024, 1, 3)),
            finance_entry(2, "Utilities", dec!(120), at(2024, 1, 15)),
            finance_entry(3, "Parts", dec!(80), at(2024, 1, 20)),
            finance_entry(4, "Parts", dec!(999), at(2023, 12, 30)),
        ],
        stock_items: vec![
            stock_item(1, "Engine Oil 5W-30", "Fluids", 0, 10, dec!(10)),
            stock_item(2, "Brake Pad", "Brakes", 4, 10, dec!(25)),
            stock_item(3, "Air Filter", "Filters", 14, 10, dec!(5)),
            stock_item(4, "Spark Plug", "Engine", 40, 10, dec!(3)),
            stock_item(5, "Coolant", "Fluids", 20, 10, dec!(8)),
        ],
        customers: vec![
            customer(1, "Budi", at(2023, 6, 1)),
            customer(2, "Sari", at(2024, 1, 8)),
            customer(3, "Andi", at(2024, 1, 20)),
            customer(4, "Dewi", at(2023, 12, 10)),
            customer(5, "Rina", at(2023, 11, 5)),
            customer(6, "Late Registrant", at(2024, 2, 10)),
        ],
        workers: vec![
            worker(1, "Joko", Some(dec!(4.5))),
            worker(2, "Eko", Some(dec!(4.0))),
            worker(3, "Tono", None),
        ],
    }
}

pub fn workshop_repository() -> Arc<InMemoryRecordRepository> {
    Arc::new(InMemoryRecordRepository::new(workshop_records()))
}
