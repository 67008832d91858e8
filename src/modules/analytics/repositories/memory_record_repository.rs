use std::sync::RwLock;

use async_trait::async_trait;

use super::record_repository::{
    BookingFilter, CustomerFilter, FinanceFilter, RecordRepository, ServiceFilter, WorkerFilter,
};
use crate::core::{AppError, Result};
use crate::modules::analytics::models::{
    BookingRecord, CustomerRecord, FinanceEntry, ServiceRecord, StockItem, WorkerRecord,
};

/// Raw tables backing [`InMemoryRecordRepository`].
///
/// `customers[*].bookings` and `workers[*].completed_services` are ignored;
/// reads attach them from `bookings` and `services` like a join would.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub services: Vec<ServiceRecord>,
    pub bookings: Vec<BookingRecord>,
    pub finance_entries: Vec<FinanceEntry>,
    pub stock_items: Vec<StockItem>,
    pub customers: Vec<CustomerRecord>,
    pub workers: Vec<WorkerRecord>,
}

/// Record repository over in-process tables, for local runs and tests
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    records: RwLock<RecordSet>,
}

impl InMemoryRecordRepository {
    pub fn new(records: RecordSet) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&RecordSet) -> T) -> Result<T> {
        let guard = self
            .records
            .read()
            .map_err(|_| AppError::repository("record set lock poisoned"))?;
        Ok(f(&guard))
    }
}

fn sorted_by_id<T, F>(mut rows: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> i64,
{
    rows.sort_by_key(|row| id(row));
    rows
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn read_services(&self, filter: ServiceFilter) -> Result<Vec<ServiceRecord>> {
        self.read(|set| {
            let rows = set
                .services
                .iter()
                .filter(|s| filter.matches(s))
                .cloned()
                .collect();
            sorted_by_id(rows, |s: &ServiceRecord| s.id)
        })
    }

    async fn read_bookings(&self, filter: BookingFilter) -> Result<Vec<BookingRecord>> {
        self.read(|set| {
            let rows = set
                .bookings
                .iter()
                .filter(|b| filter.matches(b))
                .cloned()
                .collect();
            sorted_by_id(rows, |b: &BookingRecord| b.id)
        })
    }

    async fn read_finance_entries(&self, filter: FinanceFilter) -> Result<Vec<FinanceEntry>> {
        self.read(|set| {
            let rows = set
                .finance_entries
                .iter()
                .filter(|e| filter.matches(e))
                .cloned()
                .collect();
            sorted_by_id(rows, |e: &FinanceEntry| e.id)
        })
    }

    async fn read_stock_items(&self) -> Result<Vec<StockItem>> {
        self.read(|set| sorted_by_id(set.stock_items.clone(), |i: &StockItem| i.id))
    }

    async fn read_customers(&self, filter: CustomerFilter) -> Result<Vec<CustomerRecord>> {
        self.read(|set| {
            let rows = set
                .customers
                .iter()
                .filter(|c| filter.matches(c))
                .map(|c| CustomerRecord {
                    bookings: sorted_by_id(
                        set.bookings
                            .iter()
                            .filter(|b| b.customer_id == c.id)
                            .cloned()
                            .collect(),
                        |b: &BookingRecord| b.id,
                    ),
                    ..c.clone()
                })
                .collect();
            sorted_by_id(rows, |c: &CustomerRecord| c.id)
        })
    }

    async fn read_workers(&self, filter: WorkerFilter) -> Result<Vec<WorkerRecord>> {
        let services = ServiceFilter {
            completed_in: filter.completed_in,
            ..ServiceFilter::completed()
        };

        self.read(|set| {
            let rows = set
                .workers
                .iter()
                .map(|w| WorkerRecord {
                    completed_services: sorted_by_id(
                        set.services
                            .iter()
                            .filter(|s| s.worker_id == Some(w.id) && services.matches(s))
                            .cloned()
                            .collect(),
                        |s: &ServiceRecord| s.id,
                    ),
                    ..w.clone()
                })
                .collect();
            sorted_by_id(rows, |w: &WorkerRecord| w.id)
        })
    }
}
