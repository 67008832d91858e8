use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::report::ReportType;
use crate::modules::analytics::models::{
    FinancialSummary, GrowthComparison, MonthBucket, NamedMetric, ServiceStatusCounts,
    StockItemStatus, StockStatusCounts,
};

/// Current payload schema version written by this build
pub const PAYLOAD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPayload {
    pub summary: FinancialSummary,
    pub revenue_growth: GrowthComparison,
    pub monthly_revenue: Vec<MonthBucket>,
    pub revenue_by_category: Vec<NamedMetric>,
    pub top_categories: Vec<NamedMetric>,
    /// Manually recorded finance entries per category
    pub ledger_by_category: Vec<NamedMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePayload {
    pub status_counts: ServiceStatusCounts,
    pub completion_rate: Decimal,
    pub average_service_value: Decimal,
    pub completed_growth: GrowthComparison,
    pub monthly_completed: Vec<MonthBucket>,
    pub top_categories: Vec<NamedMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub total_customers: u64,
    pub new_customers: u64,
    pub active_customers: u64,
    pub returning_customers: u64,
    pub new_customer_growth: GrowthComparison,
    pub monthly_new_customers: Vec<MonthBucket>,
    pub top_customers: Vec<NamedMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryPayload {
    pub total_items: u64,
    pub total_value: Decimal,
    pub status_counts: StockStatusCounts,
    pub reorder_quantity: u64,
    pub reorder_cost: Decimal,
    pub top_categories_by_value: Vec<NamedMetric>,
    pub reorder_items: Vec<StockItemStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPayload {
    pub total_workers: u64,
    pub services_completed: u64,
    pub average_rating: Decimal,
    pub top_by_revenue: Vec<NamedMetric>,
    pub top_by_completed: Vec<NamedMetric>,
}

/// Aggregate content of a report, one variant per report type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ReportPayload {
    Financial(FinancialPayload),
    Service(ServicePayload),
    Customer(CustomerPayload),
    Inventory(InventoryPayload),
    Worker(WorkerPayload),
}

impl ReportPayload {
    pub fn report_type(&self) -> ReportType {
        match self {
            ReportPayload::Financial(_) => ReportType::Financial,
            ReportPayload::Service(_) => ReportType::Service,
            ReportPayload::Customer(_) => ReportType::Customer,
            ReportPayload::Inventory(_) => ReportType::Inventory,
            ReportPayload::Worker(_) => ReportType::Worker,
        }
    }
}

fn unversioned() -> u32 {
    1
}

/// Persisted form of a payload: `{"version": 1, "payload": {"type": .., "data": ..}}`.
///
/// Rows written before versioning carry no `version` and read as version 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadEnvelope {
    #[serde(default = "unversioned")]
    pub version: u32,
    pub payload: ReportPayload,
}

impl PayloadEnvelope {
    pub fn encode(payload: &ReportPayload) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            version: u32,
            payload: &'a ReportPayload,
        }

        serde_json::to_string(&Borrowed {
            version: PAYLOAD_VERSION,
            payload,
        })
    }

    pub fn decode(raw: &str) -> Result<ReportPayload, serde_json::Error> {
        let envelope: PayloadEnvelope = serde_json::from_str(raw)?;
        if envelope.version > PAYLOAD_VERSION {
            return Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "unsupported payload version {} (newest known is {})",
                envelope.version, PAYLOAD_VERSION
            )));
        }
        Ok(envelope.payload)
    }
}
