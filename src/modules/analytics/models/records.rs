// Operational records read by the analytics engine.
//
// These are owned and mutated by the booking, workshop and inventory parts of
// the application; the engine only ever reads them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a workshop service job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "pending",
            ServiceStatus::InProgress => "in_progress",
            ServiceStatus::Completed => "completed",
            ServiceStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(' ', "_").as_str() {
            "pending" => Ok(ServiceStatus::Pending),
            "in_progress" | "inprogress" => Ok(ServiceStatus::InProgress),
            "completed" => Ok(ServiceStatus::Completed),
            "cancelled" | "canceled" => Ok(ServiceStatus::Cancelled),
            _ => Err(format!("Invalid service status: {}", s)),
        }
    }
}

/// One service job performed against a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: i64,
    pub booking_id: i64,
    pub worker_id: Option<i64>,
    pub status: ServiceStatus,
    /// Service type label used for category breakdowns
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
    pub cost: Option<Decimal>,
}

impl ServiceRecord {
    pub fn is_completed(&self) -> bool {
        self.status == ServiceStatus::Completed
    }

    /// Cost with a missing value counted as zero
    pub fn revenue(&self) -> Decimal {
        self.cost.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub created_at: DateTime<Utc>,
    pub booking_date: DateTime<Utc>,
    pub status: String,
    pub reported_issue: String,
    pub estimated_cost: Option<Decimal>,
}

/// Manually recorded income/expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub id: i64,
    pub amount: Decimal,
    pub category: String,
    pub date: DateTime<Utc>,
    pub note: Option<String>,
    pub recorded_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub min_stock_level: u32,
    pub supplier: Option<String>,
    pub location: Option<String>,
}

impl StockItem {
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// A customer together with every booking they have ever made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub bookings: Vec<BookingRecord>,
}

impl CustomerRecord {
    pub fn lifetime_bookings(&self) -> usize {
        self.bookings.len()
    }
}

/// A worker with the completed services attributed to them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: i64,
    pub name: String,
    pub rating: Option<Decimal>,
    pub completed_services: Vec<ServiceRecord>,
}
