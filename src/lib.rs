//! Workshop analytics and reporting service
//!
//! Turns the workshop's operational records (services, bookings, finance
//! entries, stock, customers, workers) into period-bound reports and live
//! dashboard figures.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use std::sync::Arc;

use actix_web::web;

use crate::config::ReportingConfig;
use crate::modules::analytics::services::{Aggregator, FixedRatioExpensePolicy};
use crate::modules::analytics::{DashboardService, RecordRepository};
use crate::modules::reports::services::{ReportService, ReportSettings};
use crate::modules::reports::ReportStore;

// Re-export commonly used types
pub use modules::analytics;
pub use modules::reports;

/// Shared services handed to every HTTP worker
#[derive(Clone)]
pub struct AppServices {
    pub records: web::Data<dyn RecordRepository>,
    pub reports: web::Data<ReportService>,
    pub dashboard: web::Data<DashboardService>,
}

impl AppServices {
    pub fn new(
        records: Arc<dyn RecordRepository>,
        store: Arc<dyn ReportStore>,
        reporting: &ReportingConfig,
    ) -> Self {
        let aggregator = Aggregator::new(Arc::new(FixedRatioExpensePolicy::new(
            reporting.expense_ratio,
        )));

        let reports = ReportService::new(
            records.clone(),
            store,
            ReportSettings {
                deadline: reporting.deadline,
                top_n: reporting.top_n,
                aggregator: aggregator.clone(),
            },
        );
        let dashboard = DashboardService::new(records.clone(), aggregator, reporting.top_n);

        Self {
            records: web::Data::from(records),
            reports: web::Data::new(reports),
            dashboard: web::Data::new(dashboard),
        }
    }

    /// Registers app data, extractor configs and all routes
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.records.clone())
            .app_data(self.reports.clone())
            .app_data(self.dashboard.clone())
            .app_data(middleware::json_config())
            .app_data(middleware::query_config())
            .configure(modules::health::configure)
            .configure(modules::analytics::configure)
            .configure(modules::reports::configure);
    }
}
