// MySQL-backed record repository.
//
// Reads the workshop tables created by migrations/0001_workshop_records.sql.
// Filters are appended with QueryBuilder so every optional predicate stays a
// bound parameter.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};

use super::record_repository::{
    BookingFilter, CustomerFilter, FinanceFilter, RecordRepository, ServiceFilter, WorkerFilter,
};
use crate::core::{AppError, Result};
use crate::modules::analytics::models::{
    BookingRecord, CustomerRecord, FinanceEntry, ServiceRecord, ServiceStatus, StockItem,
    TimeRange, WorkerRecord,
};

pub struct MySqlRecordRepository {
    pool: MySqlPool,
}

impl MySqlRecordRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn fetch_bookings(
        &self,
        filter: BookingFilter,
        customers_created_before: Option<DateTime<Utc>>,
    ) -> Result<Vec<BookingRecord>> {
        let rows = bookings_query(filter, customers_created_before)
            .build_query_as::<BookingRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_failed("bookings", e))?;

        Ok(rows.into_iter().map(BookingRecord::from).collect())
    }
}

/// Bookings matching `filter`, optionally limited to customers created
/// before the given instant
fn bookings_query<'a>(
    filter: BookingFilter,
    customers_created_before: Option<DateTime<Utc>>,
) -> QueryBuilder<'a, MySql> {
    let mut query = QueryBuilder::<MySql>::new(
        r#"
        SELECT id, customer_id, vehicle_id, created_at, booking_date,
               status, reported_issue, estimated_cost
        FROM bookings
        WHERE 1 = 1
        "#,
    );
    push_range(&mut query, "created_at", filter.created_in);
    if let Some(customer_id) = filter.customer_id {
        query.push(" AND customer_id = ").push_bind(customer_id);
    }
    if let Some(before) = customers_created_before {
        query
            .push(" AND customer_id IN (SELECT id FROM customers WHERE created_at < ")
            .push_bind(before)
            .push(")");
    }
    query.push(" ORDER BY id");
    query
}

#[derive(Debug, FromRow)]
struct ServiceRow {
    id: i64,
    booking_id: i64,
    worker_id: Option<i64>,
    status: String,
    service_type: Option<String>,
    created_at: DateTime<Utc>,
    completion_date: Option<DateTime<Utc>>,
    cost: Option<Decimal>,
}

impl TryFrom<ServiceRow> for ServiceRecord {
    type Error = AppError;

    fn try_from(row: ServiceRow) -> Result<Self> {
        let status = row.status.parse::<ServiceStatus>().map_err(|e| {
            AppError::repository(format!("service {} has {}", row.id, e))
        })?;

        Ok(ServiceRecord {
            id: row.id,
            booking_id: row.booking_id,
            worker_id: row.worker_id,
            status,
            category: row.service_type,
            created_at: row.created_at,
            completion_date: row.completion_date,
            cost: row.cost,
        })
    }
}

#[derive(Debug, FromRow)]
struct BookingRow {
    id: i64,
    customer_id: i64,
    vehicle_id: i64,
    created_at: DateTime<Utc>,
    booking_date: DateTime<Utc>,
    status: String,
    reported_issue: Option<String>,
    estimated_cost: Option<Decimal>,
}

impl From<BookingRow> for BookingRecord {
    fn from(row: BookingRow) -> Self {
        BookingRecord {
            id: row.id,
            customer_id: row.customer_id,
            vehicle_id: row.vehicle_id,
            created_at: row.created_at,
            booking_date: row.booking_date,
            status: row.status,
            reported_issue: row.reported_issue.unwrap_or_default(),
            estimated_cost: row.estimated_cost,
        }
    }
}

#[derive(Debug, FromRow)]
struct FinanceRow {
    id: i64,
    amount: Decimal,
    category: String,
    entry_date: DateTime<Utc>,
    note: Option<String>,
    recorded_by: Option<i64>,
}

#[derive(Debug, FromRow)]
struct StockRow {
    id: i64,
    name: String,
    category: String,
    quantity: u32,
    unit_price: Decimal,
    min_stock_level: u32,
    supplier: Option<String>,
    location: Option<String>,
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct WorkerRow {
    id: i64,
    name: String,
    rating: Option<Decimal>,
}

fn read_failed(table: &str, error: sqlx::Error) -> AppError {
    tracing::error!(table = table, error = %error, "Record read failed");
    AppError::repository(format!("Failed to read {}: {}", table, error))
}

fn push_range(query: &mut QueryBuilder<'_, MySql>, column: &str, range: Option<TimeRange>) {
    if let Some(range) = range {
        query
            .push(format!(" AND {} >= ", column))
            .push_bind(range.start)
            .push(format!(" AND {} < ", column))
            .push_bind(range.end);
    }
}

const SERVICE_COLUMNS: &str = r#"
    SELECT id, booking_id, worker_id, status, service_type,
           created_at, completion_date, cost
    FROM services
    WHERE 1 = 1
"#;

#[async_trait]
impl RecordRepository for MySqlRecordRepository {
    async fn read_services(&self, filter: ServiceFilter) -> Result<Vec<ServiceRecord>> {
        let mut query = QueryBuilder::<MySql>::new(SERVICE_COLUMNS);
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        push_range(&mut query, "completion_date", filter.completed_in);
        push_range(&mut query, "created_at", filter.created_in);
        query.push(" ORDER BY id");

        let rows = query
            .build_query_as::<ServiceRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_failed("services", e))?;

        rows.into_iter().map(ServiceRecord::try_from).collect()
    }

    async fn read_bookings(&self, filter: BookingFilter) -> Result<Vec<BookingRecord>> {
        self.fetch_bookings(filter, None).await
    }

    async fn read_finance_entries(&self, filter: FinanceFilter) -> Result<Vec<FinanceEntry>> {
        let mut query = QueryBuilder::<MySql>::new(
            r#"
            SELECT id, amount, category, entry_date, note, recorded_by
            FROM finance_entries
            WHERE 1 = 1
            "#,
        );
        push_range(&mut query, "entry_date", filter.dated_in);
        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        query.push(" ORDER BY id");

        let rows = query
            .build_query_as::<FinanceRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_failed("finance_entries", e))?;

        Ok(rows
            .into_iter()
            .map(|row| FinanceEntry {
                id: row.id,
                amount: row.amount,
                category: row.category,
                date: row.entry_date,
                note: row.note,
                recorded_by: row.recorded_by,
            })
            .collect())
    }

    async fn read_stock_items(&self) -> Result<Vec<StockItem>> {
        let rows = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT id, name, category, quantity, unit_price, min_stock_level,
                   supplier, location
            FROM stock_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_failed("stock_items", e))?;

        Ok(rows
            .into_iter()
            .map(|row| StockItem {
                id: row.id,
                name: row.name,
                category: row.category,
                quantity: row.quantity,
                unit_price: row.unit_price,
                min_stock_level: row.min_stock_level,
                supplier: row.supplier,
                location: row.location,
            })
            .collect())
    }

    async fn read_customers(&self, filter: CustomerFilter) -> Result<Vec<CustomerRecord>> {
        let mut query =
            QueryBuilder::<MySql>::new("SELECT id, name, created_at FROM customers WHERE 1 = 1");
        if let Some(before) = filter.created_before {
            query.push(" AND created_at < ").push_bind(before);
        }
        query.push(" ORDER BY id");

        let customers = query
            .build_query_as::<CustomerRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_failed("customers", e))?;

        let mut bookings_by_customer: HashMap<i64, Vec<BookingRecord>> = HashMap::new();
        for booking in self
            .fetch_bookings(BookingFilter::default(), filter.created_before)
            .await?
        {
            bookings_by_customer
                .entry(booking.customer_id)
                .or_default()
                .push(booking);
        }

        Ok(customers
            .into_iter()
            .map(|row| CustomerRecord {
                bookings: bookings_by_customer.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                created_at: row.created_at,
            })
            .collect())
    }

    async fn read_workers(&self, filter: WorkerFilter) -> Result<Vec<WorkerRecord>> {
        let workers = sqlx::query_as::<_, WorkerRow>(
            "SELECT id, name, rating FROM workers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_failed("workers", e))?;

        let services = self
            .read_services(ServiceFilter {
                completed_in: filter.completed_in,
                ..ServiceFilter::completed()
            })
            .await?;

        let mut services_by_worker: HashMap<i64, Vec<ServiceRecord>> = HashMap::new();
        for service in services {
            if let Some(worker_id) = service.worker_id {
                services_by_worker.entry(worker_id).or_default().push(service);
            }
        }

        Ok(workers
            .into_iter()
            .map(|row| WorkerRecord {
                completed_services: services_by_worker.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                rating: row.rating,
            })
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| read_failed("ping", e))?;
        Ok(())
    }
}
