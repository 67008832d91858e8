use async_trait::async_trait;

use crate::core::Result;
use crate::modules::analytics::models::{
    BookingRecord, CustomerRecord, FinanceEntry, ServiceRecord, ServiceStatus, StockItem,
    TimeRange, WorkerRecord,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    pub status: Option<ServiceStatus>,
    /// Only services whose completion date falls in the range
    pub completed_in: Option<TimeRange>,
    /// Only services opened in the range
    pub created_in: Option<TimeRange>,
}

impl ServiceFilter {
    /// Completed services, any completion date
    pub fn completed() -> Self {
        Self {
            status: Some(ServiceStatus::Completed),
            ..Self::default()
        }
    }

    pub fn completed_in(range: TimeRange) -> Self {
        Self {
            status: Some(ServiceStatus::Completed),
            completed_in: Some(range),
            created_in: None,
        }
    }

    pub fn created_in(range: TimeRange) -> Self {
        Self {
            created_in: Some(range),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &ServiceRecord) -> bool {
        self.status.map_or(true, |status| record.status == status)
            && self
                .completed_in
                .map_or(true, |range| range.contains_opt(record.completion_date))
            && self
                .created_in
                .map_or(true, |range| range.contains(record.created_at))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub created_in: Option<TimeRange>,
    pub customer_id: Option<i64>,
}

impl BookingFilter {
    pub fn matches(&self, record: &BookingRecord) -> bool {
        self.created_in
            .map_or(true, |range| range.contains(record.created_at))
            && self.customer_id.map_or(true, |id| record.customer_id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinanceFilter {
    pub dated_in: Option<TimeRange>,
    pub category: Option<String>,
}

impl FinanceFilter {
    pub fn matches(&self, entry: &FinanceEntry) -> bool {
        self.dated_in.map_or(true, |range| range.contains(entry.date))
            && self
                .category
                .as_deref()
                .map_or(true, |category| entry.category == category)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Only customers registered before this instant
    pub created_before: Option<chrono::DateTime<chrono::Utc>>,
}

impl CustomerFilter {
    pub fn matches(&self, record: &CustomerRecord) -> bool {
        self.created_before
            .map_or(true, |before| record.created_at < before)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerFilter {
    /// Restricts each worker's completed services to this range
    pub completed_in: Option<TimeRange>,
}

/// Read-only access to the workshop's operational records.
///
/// Every read returns records ordered by ascending id so aggregations over
/// them are reproducible. Failures surface as `AppError::Repository`.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn read_services(&self, filter: ServiceFilter) -> Result<Vec<ServiceRecord>>;

    async fn read_bookings(&self, filter: BookingFilter) -> Result<Vec<BookingRecord>>;

    async fn read_finance_entries(&self, filter: FinanceFilter) -> Result<Vec<FinanceEntry>>;

    async fn read_stock_items(&self) -> Result<Vec<StockItem>>;

    /// Customers with their lifetime bookings attached
    async fn read_customers(&self, filter: CustomerFilter) -> Result<Vec<CustomerRecord>>;

    /// Workers with their completed services attached
    async fn read_workers(&self, filter: WorkerFilter) -> Result<Vec<WorkerRecord>>;

    /// Cheap connectivity check used by the readiness probe
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
