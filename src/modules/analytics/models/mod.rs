pub mod metrics;
pub mod period;
pub mod records;
pub mod stock;

pub use metrics::{
    FinancialSummary, GrowthComparison, MonthBucket, NamedMetric, OrderedTotals,
    ServiceStatusCounts,
};
pub use period::{Period, PeriodKind, TimeRange};
pub use records::{
    BookingRecord, CustomerRecord, FinanceEntry, ServiceRecord, ServiceStatus, StockItem,
    WorkerRecord,
};
pub use stock::{StockItemStatus, StockSnapshot, StockStatus, StockStatusCounts};
