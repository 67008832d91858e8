// Report composition.
//
// A generation request is validated first (report type, period). Nothing is
// read or stored for an invalid request. Valid requests read their records
// concurrently, aggregate them, and persist exactly one report: completed
// with its payload, or failed with an error category.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::core::money::percentage;
use crate::core::{AppError, Result};
use crate::modules::analytics::models::{OrderedTotals, Period, ServiceRecord, TimeRange};
use crate::modules::analytics::repositories::{
    CustomerFilter, FinanceFilter, RecordRepository, ServiceFilter, WorkerFilter,
};
use crate::modules::analytics::services::bucketizer::{bucketize, bucketize_count};
use crate::modules::analytics::services::growth::compare_with_preceding;
use crate::modules::analytics::services::ranker::{top_n_totals, DEFAULT_TOP_N};
use crate::modules::analytics::services::{resolve_period, stock_classifier, Aggregator, PeriodRequest};
use crate::modules::reports::models::{
    CustomerPayload, FinancialPayload, InventoryPayload, Report, ReportPayload, ReportType,
    ServicePayload, WorkerPayload,
};
use crate::modules::reports::repositories::ReportStore;

/// Tunables for report generation
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Upper bound on reads plus aggregation for one report
    pub deadline: Duration,
    /// Length of ranked lists in payloads
    pub top_n: usize,
    pub aggregator: Aggregator,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(30),
            top_n: DEFAULT_TOP_N,
            aggregator: Aggregator::default(),
        }
    }
}

/// A request to generate one report
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Raw type name, validated against the known report types
    pub report_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub period: PeriodRequest,
}

/// Service for generating and retrieving reports
pub struct ReportService {
    records: Arc<dyn RecordRepository>,
    store: Arc<dyn ReportStore>,
    settings: ReportSettings,
}

/// Completed-service instant used for monthly buckets
fn completion_instant(service: &ServiceRecord) -> Option<DateTime<Utc>> {
    service.completion_date.filter(|_| service.is_completed())
}

impl ReportService {
    pub fn new(
        records: Arc<dyn RecordRepository>,
        store: Arc<dyn ReportStore>,
        settings: ReportSettings,
    ) -> Self {
        Self {
            records,
            store,
            settings,
        }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Generate a report for the current time
    pub async fn generate(&self, request: GenerateReport, generated_by: &str) -> Result<Report> {
        self.generate_at(request, generated_by, Utc::now()).await
    }

    /// Generate a report with periods resolved against `now`.
    ///
    /// Returns `Err` only for invalid requests. Runtime failures (record
    /// reads, deadline, persistence) yield `Ok` with a `failed` report, stored
    /// as a stub when the store accepts it.
    pub async fn generate_at(
        &self,
        request: GenerateReport,
        generated_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Report> {
        let report_type: ReportType = request.report_type.parse()?;
        let period = resolve_period(&request.period, now)?;

        let report = Report::begin(
            report_type,
            request.title,
            request.description,
            period,
            generated_by,
            now,
        );

        info!(
            report_id = %report.id,
            report_type = %report_type,
            period = %period.descriptor(),
            generated_by = %report.generated_by,
            "Generating report"
        );

        // One deadline covers the reads, aggregation and the final write
        let outcome = tokio::time::timeout(
            self.settings.deadline,
            self.compose_and_store(report.clone()),
        )
        .await
        .unwrap_or_else(|_| Err(self.deadline_exceeded(report_type)));

        match outcome {
            Ok(completed) => {
                info!(
                    report_id = %completed.id,
                    report_type = %report_type,
                    "Report completed"
                );
                Ok(completed)
            }
            Err(e) => self.record_failure(report, e).await,
        }
    }

    async fn compose_and_store(&self, report: Report) -> Result<Report> {
        let payload = self.compose(report.report_type, report.period).await?;
        let completed = report.complete(payload)?;
        self.store.insert(&completed).await?;
        Ok(completed)
    }

    fn deadline_exceeded(&self, report_type: ReportType) -> AppError {
        AppError::Timeout(format!(
            "{} report exceeded {}s",
            report_type,
            self.settings.deadline.as_secs_f64()
        ))
    }

    /// Stores a failed stub for `report` and returns it.
    ///
    /// The stub write gets its own deadline; the failed report is returned
    /// whether or not it could be stored.
    async fn record_failure(&self, report: Report, cause: AppError) -> Result<Report> {
        error!(
            report_id = %report.id,
            report_type = %report.report_type,
            code = cause.code(),
            error = %cause,
            "Report generation failed"
        );

        let failed = report.fail(&cause)?;
        match tokio::time::timeout(self.settings.deadline, self.store.insert(&failed)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(report_id = %failed.id, error = %e, "Failed to persist failed report stub")
            }
            Err(_) => warn!(
                report_id = %failed.id,
                "Timed out persisting failed report stub"
            ),
        }
        Ok(failed)
    }

    /// Stored reports, newest first
    pub async fn list(&self, report_type: Option<&str>) -> Result<Vec<Report>> {
        let report_type = report_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::parse::<ReportType>)
            .transpose()?;
        self.store.list(report_type).await
    }

    pub async fn get(&self, id: &str) -> Result<Report> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Report {}", id)))
    }

    async fn compose(&self, report_type: ReportType, period: Period) -> Result<ReportPayload> {
        let range = period.range();
        match report_type {
            ReportType::Financial => self.financial(range).await.map(ReportPayload::Financial),
            ReportType::Service => self.service(range).await.map(ReportPayload::Service),
            ReportType::Customer => self.customer(range).await.map(ReportPayload::Customer),
            ReportType::Inventory => self.inventory().await.map(ReportPayload::Inventory),
            ReportType::Worker => self.worker(range).await.map(ReportPayload::Worker),
        }
    }

    fn aggregator(&self) -> &Aggregator {
        &self.settings.aggregator
    }

    async fn financial(&self, range: TimeRange) -> Result<FinancialPayload> {
        let window = range.preceding().span(&range);
        let (services, ledger) = tokio::try_join!(
            self.records.read_services(ServiceFilter::completed_in(window)),
            self.records.read_finance_entries(FinanceFilter {
                dated_in: Some(range),
                ..FinanceFilter::default()
            }),
        )?;

        let by_category = Aggregator::revenue_by_category(&services, range);

        Ok(FinancialPayload {
            summary: self.aggregator().financial_summary(&services, range),
            revenue_growth: compare_with_preceding(range, |r| {
                Aggregator::total_revenue(&services, r)
            }),
            monthly_revenue: bucketize(range, &services, completion_instant, ServiceRecord::revenue),
            top_categories: top_n_totals(&by_category, self.settings.top_n),
            revenue_by_category: by_category.to_metrics(),
            ledger_by_category: Aggregator::ledger_by_category(&ledger, range).to_metrics(),
        })
    }

    async fn service(&self, range: TimeRange) -> Result<ServicePayload> {
        let window = range.preceding().span(&range);
        let (created, completed) = tokio::try_join!(
            self.records.read_services(ServiceFilter::created_in(range)),
            self.records.read_services(ServiceFilter::completed_in(window)),
        )?;

        let status_counts = Aggregator::status_counts(&created, range);
        let completion_rate = percentage(
            Decimal::from(status_counts.completed),
            Decimal::from(status_counts.total),
        );

        Ok(ServicePayload {
            completion_rate,
            status_counts,
            average_service_value: Aggregator::average_service_value(&completed, range),
            completed_growth: compare_with_preceding(range, |r| {
                Decimal::from(Aggregator::completed_count(&completed, r))
            }),
            monthly_completed: bucketize_count(range, &completed, completion_instant),
            top_categories: top_n_totals(
                &Aggregator::count_by_category(&completed, range),
                self.settings.top_n,
            ),
        })
    }

    async fn customer(&self, range: TimeRange) -> Result<CustomerPayload> {
        let (customers, services) = tokio::try_join!(
            self.records.read_customers(CustomerFilter {
                created_before: Some(range.end),
            }),
            self.records.read_services(ServiceFilter::completed_in(range)),
        )?;

        let activity = Aggregator::customer_activity(&customers, range);
        let spend = Aggregator::spend_by_customer(&services, &customers, range);

        Ok(CustomerPayload {
            total_customers: activity.total_customers,
            new_customers: activity.new_customers,
            active_customers: activity.active_customers,
            returning_customers: activity.returning_customers,
            new_customer_growth: compare_with_preceding(range, |r| {
                Decimal::from(Aggregator::new_customer_count(&customers, r))
            }),
            monthly_new_customers: bucketize_count(range, &customers, |c| Some(c.created_at)),
            top_customers: top_n_totals(&spend, self.settings.top_n),
        })
    }

    async fn inventory(&self) -> Result<InventoryPayload> {
        let items = self.records.read_stock_items().await?;
        let snapshot = stock_classifier::snapshot(&items);

        let value_by_category: OrderedTotals = items
            .iter()
            .map(|item| (item.category.as_str(), item.stock_value()))
            .collect();

        Ok(InventoryPayload {
            total_items: snapshot.total_items,
            total_value: snapshot.total_value,
            reorder_quantity: snapshot.reorder_quantity,
            reorder_cost: snapshot.reorder_cost,
            top_categories_by_value: top_n_totals(&value_by_category, self.settings.top_n),
            reorder_items: snapshot
                .items
                .into_iter()
                .filter(|item| item.status.needs_reorder())
                .collect(),
            status_counts: snapshot.status_counts,
        })
    }

    async fn worker(&self, range: TimeRange) -> Result<WorkerPayload> {
        let workers = self
            .records
            .read_workers(WorkerFilter {
                completed_in: Some(range),
            })
            .await?;

        let completions = Aggregator::completions_by_worker(&workers, range);

        Ok(WorkerPayload {
            total_workers: workers.len() as u64,
            services_completed: workers
                .iter()
                .map(|w| Aggregator::completed_count(&w.completed_services, range))
                .sum(),
            average_rating: Aggregator::average_rating(&workers),
            top_by_revenue: top_n_totals(
                &Aggregator::revenue_by_worker(&workers, range),
                self.settings.top_n,
            ),
            top_by_completed: top_n_totals(&completions, self.settings.top_n),
        })
    }
}
