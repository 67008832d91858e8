pub mod aggregator;
pub mod bucketizer;
pub mod dashboard_service;
pub mod growth;
pub mod period_resolver;
pub mod ranker;
pub mod stock_classifier;

pub use aggregator::{
    Aggregator, ExpensePolicy, FixedRatioExpensePolicy, DEFAULT_EXPENSE_RATIO,
    GENERAL_SERVICE_CATEGORY,
};
pub use dashboard_service::{DashboardService, DashboardSummary};
pub use period_resolver::{resolve_period, PeriodRequest};
pub use ranker::{top_n, DEFAULT_TOP_N};
