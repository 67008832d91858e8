// MySQL-backed report store.
//
// Reports are insert-only. Payloads are written as a versioned JSON envelope
// in a LONGTEXT column and decoded only when a single report is fetched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};

use super::report_store::ReportStore;
use crate::core::{AppError, Result};
use crate::modules::analytics::models::{Period, PeriodKind};
use crate::modules::reports::models::{
    PayloadEnvelope, Report, ReportFailure, ReportStatus, ReportType,
};

pub struct MySqlReportStore {
    pool: MySqlPool,
}

impl MySqlReportStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReportRow {
    id: String,
    report_type: String,
    title: String,
    description: Option<String>,
    period_kind: String,
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
    generated_by: String,
    created_at: DateTime<Utc>,
    status: String,
    failure_code: Option<String>,
    failure_message: Option<String>,
    payload: Option<String>,
}

impl ReportRow {
    fn into_report(self, with_payload: bool) -> Result<Report> {
        let corrupt = |what: String| {
            AppError::Serialization(<serde_json::Error as serde::de::Error>::custom(format!(
                "report {}: {}",
                self.id, what
            )))
        };

        let report_type = self
            .report_type
            .parse::<ReportType>()
            .map_err(|e| corrupt(e.to_string()))?;
        let status = self.status.parse::<ReportStatus>().map_err(corrupt)?;
        let kind = self.period_kind.parse::<PeriodKind>().map_err(corrupt)?;
        let period = Period::new(kind, self.period_start, self.period_end)
            .map_err(|e| corrupt(e.to_string()))?;

        let payload = match (with_payload, self.payload.as_deref()) {
            (true, Some(raw)) => Some(PayloadEnvelope::decode(raw)?),
            _ => None,
        };
        let failure = match (self.failure_code, self.failure_message) {
            (Some(code), Some(message)) => Some(ReportFailure { code, message }),
            _ => None,
        };

        Ok(Report {
            id: self.id,
            report_type,
            title: self.title,
            description: self.description,
            period,
            generated_by: self.generated_by,
            created_at: self.created_at,
            status,
            payload,
            failure,
        })
    }
}

const REPORT_COLUMNS: &str = r#"
    SELECT id, report_type, title, description, period_kind, period_start,
           period_end, generated_by, created_at, status, failure_code,
           failure_message, payload
    FROM reports
"#;

/// Listings never decode payloads, so the LONGTEXT column is not fetched
const SUMMARY_COLUMNS: &str = r#"
    SELECT id, report_type, title, description, period_kind, period_start,
           period_end, generated_by, created_at, status, failure_code,
           failure_message, CAST(NULL AS CHAR) AS payload
    FROM reports
"#;

fn list_query<'a>(report_type: Option<ReportType>) -> QueryBuilder<'a, MySql> {
    let mut query = QueryBuilder::<MySql>::new(SUMMARY_COLUMNS);
    if let Some(report_type) = report_type {
        query
            .push(" WHERE report_type = ")
            .push_bind(report_type.as_str());
    }
    query.push(" ORDER BY created_at DESC, seq DESC");
    query
}

#[async_trait]
impl ReportStore for MySqlReportStore {
    async fn insert(&self, report: &Report) -> Result<()> {
        let payload = report
            .payload
            .as_ref()
            .map(PayloadEnvelope::encode)
            .transpose()?;
        let (failure_code, failure_message) = match &report.failure {
            Some(f) => (Some(f.code.as_str()), Some(f.message.as_str())),
            None => (None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO reports (
                id, report_type, title, description, period_kind, period_start,
                period_end, generated_by, created_at, status, failure_code,
                failure_message, payload
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&report.id)
        .bind(report.report_type.as_str())
        .bind(&report.title)
        .bind(&report.description)
        .bind(report.period.kind.as_str())
        .bind(report.period.start)
        .bind(report.period.end)
        .bind(&report.generated_by)
        .bind(report.created_at)
        .bind(report.status.as_str())
        .bind(failure_code)
        .bind(failure_message)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("report {} already exists", report.id));
                }
            }
            tracing::error!(report_id = %report.id, error = %e, "Failed to persist report");
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn list(&self, report_type: Option<ReportType>) -> Result<Vec<Report>> {
        let rows = list_query(report_type)
            .build_query_as::<ReportRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|row| row.into_report(false)).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Report>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!("{} WHERE id = ?", REPORT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| row.into_report(true)).transpose()
    }
}
