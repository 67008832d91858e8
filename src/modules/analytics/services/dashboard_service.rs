use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::aggregator::{Aggregator, CustomerActivity};
use super::growth::compare_with_preceding;
use super::period_resolver::{resolve_period, PeriodRequest};
use super::ranker::top_n_totals;
use super::stock_classifier;
use crate::core::Result;
use crate::modules::analytics::models::{
    FinancialSummary, GrowthComparison, NamedMetric, Period, ServiceStatusCounts, StockSnapshot,
};
use crate::modules::analytics::repositories::{CustomerFilter, RecordRepository, ServiceFilter};

/// Live figures for the admin dashboard. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub period: Period,
    pub financial: FinancialSummary,
    pub revenue_growth: GrowthComparison,
    pub services: ServiceStatusCounts,
    pub customers: CustomerActivity,
    pub top_categories: Vec<NamedMetric>,
}

pub struct DashboardService {
    records: Arc<dyn RecordRepository>,
    aggregator: Aggregator,
    top_n: usize,
}

impl DashboardService {
    pub fn new(records: Arc<dyn RecordRepository>, aggregator: Aggregator, top_n: usize) -> Self {
        Self {
            records,
            aggregator,
            top_n,
        }
    }

    pub async fn summary(&self, request: &PeriodRequest) -> Result<DashboardSummary> {
        self.summary_at(request, Utc::now()).await
    }

    /// Financial, service and customer figures for one period, read in parallel
    pub async fn summary_at(
        &self,
        request: &PeriodRequest,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummary> {
        let period = resolve_period(request, now)?;
        let range = period.range();
        let window = range.preceding().span(&range);

        debug!(period = %period.descriptor(), "Computing dashboard summary");

        let (completed, created, customers) = tokio::try_join!(
            self.records.read_services(ServiceFilter::completed_in(window)),
            self.records.read_services(ServiceFilter::created_in(range)),
            self.records.read_customers(CustomerFilter {
                created_before: Some(range.end),
            }),
        )?;

        Ok(DashboardSummary {
            period,
            financial: self.aggregator.financial_summary(&completed, range),
            revenue_growth: compare_with_preceding(range, |r| {
                Aggregator::total_revenue(&completed, r)
            }),
            services: Aggregator::status_counts(&created, range),
            customers: Aggregator::customer_activity(&customers, range),
            top_categories: top_n_totals(
                &Aggregator::revenue_by_category(&completed, range),
                self.top_n,
            ),
        })
    }

    /// Current stock levels with per-item status
    pub async fn inventory(&self) -> Result<StockSnapshot> {
        let items = self.records.read_stock_items().await?;
        Ok(stock_classifier::snapshot(&items))
    }
}
