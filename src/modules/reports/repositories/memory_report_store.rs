use std::sync::RwLock;

use async_trait::async_trait;

use super::report_store::ReportStore;
use crate::core::{AppError, Result};
use crate::modules::reports::models::{PayloadEnvelope, Report, ReportType};

#[derive(Debug)]
struct StoredReport {
    report: Report,
    payload: Option<String>,
}

/// Process-local report store.
///
/// Payloads go through the same versioned envelope as the MySQL store so both
/// behave the same on read.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<StoredReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read_lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<StoredReport>>> {
        self.reports
            .read()
            .map_err(|_| AppError::internal("report store lock poisoned"))
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn insert(&self, report: &Report) -> Result<()> {
        let payload = report
            .payload
            .as_ref()
            .map(PayloadEnvelope::encode)
            .transpose()?;

        let mut reports = self
            .reports
            .write()
            .map_err(|_| AppError::internal("report store lock poisoned"))?;

        if reports.iter().any(|r| r.report.id == report.id) {
            return Err(AppError::Conflict(format!(
                "report {} already exists",
                report.id
            )));
        }

        reports.push(StoredReport {
            report: report.summary(),
            payload,
        });
        Ok(())
    }

    async fn list(&self, report_type: Option<ReportType>) -> Result<Vec<Report>> {
        let reports = self.read_lock()?;

        // Reverse first so equal timestamps list the later insert first
        let mut listed: Vec<Report> = reports
            .iter()
            .rev()
            .filter(|r| report_type.map_or(true, |t| r.report.report_type == t))
            .map(|r| r.report.clone())
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(listed)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Report>> {
        let reports = self.read_lock()?;

        match reports.iter().find(|r| r.report.id == id) {
            Some(stored) => {
                let payload = stored
                    .payload
                    .as_deref()
                    .map(PayloadEnvelope::decode)
                    .transpose()?;
                Ok(Some(Report {
                    payload,
                    ..stored.report.clone()
                }))
            }
            None => Ok(None),
        }
    }
}
