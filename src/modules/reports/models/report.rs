// Report model and its lifecycle.
//
// A report is created in `generating`, then moves exactly once to either
// `completed` (with a payload) or `failed` (with an error code). Stored
// reports are never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payload::ReportPayload;
use crate::core::{AppError, Result};
use crate::modules::analytics::models::Period;

/// Report kinds the composer knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Financial,
    Service,
    Customer,
    Inventory,
    Worker,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Financial,
        ReportType::Service,
        ReportType::Customer,
        ReportType::Inventory,
        ReportType::Worker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Financial => "financial",
            ReportType::Service => "service",
            ReportType::Customer => "customer",
            ReportType::Inventory => "inventory",
            ReportType::Worker => "worker",
        }
    }

    /// Capitalized name used in default titles
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Financial => "Financial",
            ReportType::Service => "Service",
            ReportType::Customer => "Customer",
            ReportType::Inventory => "Inventory",
            ReportType::Worker => "Worker",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        ReportType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| AppError::UnknownReportType(s.to_string()))
    }
}

/// Report lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Generating,
    Completed,
    Failed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Generating => "generating",
            ReportStatus::Completed => "completed",
            ReportStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReportStatus::Generating)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "generating" => Ok(ReportStatus::Generating),
            "completed" => Ok(ReportStatus::Completed),
            "failed" => Ok(ReportStatus::Failed),
            _ => Err(format!("Invalid report status: {}", s)),
        }
    }
}

/// Error category recorded on a failed report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFailure {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ReportFailure {
    fn from(error: &AppError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.public_message(),
        }
    }
}

/// Generated report metadata plus its aggregate payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,

    #[serde(rename = "type")]
    pub report_type: ReportType,

    pub title: String,

    pub description: Option<String>,

    pub period: Period,

    /// Display name of the caller who requested generation
    pub generated_by: String,

    pub created_at: DateTime<Utc>,

    pub status: ReportStatus,

    /// Present only once completed; omitted from listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ReportPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ReportFailure>,
}

impl Report {
    /// Starts a new report in `generating`
    pub fn begin(
        report_type: ReportType,
        title: Option<String>,
        description: Option<String>,
        period: Period,
        generated_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| Self::default_title(report_type, now));

        Self {
            id: Uuid::new_v4().to_string(),
            report_type,
            title,
            description: description.filter(|d| !d.trim().is_empty()),
            period,
            generated_by: generated_by.into(),
            created_at: now,
            status: ReportStatus::Generating,
            payload: None,
            failure: None,
        }
    }

    /// "<Type> Report - YYYY-MM-DD"
    pub fn default_title(report_type: ReportType, now: DateTime<Utc>) -> String {
        format!("{} Report - {}", report_type.label(), now.format("%Y-%m-%d"))
    }

    /// Moves `generating -> completed`, attaching the payload
    pub fn complete(mut self, payload: ReportPayload) -> Result<Self> {
        self.ensure_generating()?;
        if payload.report_type() != self.report_type {
            return Err(AppError::internal(format!(
                "{} payload attached to {} report {}",
                payload.report_type(),
                self.report_type,
                self.id
            )));
        }
        self.status = ReportStatus::Completed;
        self.payload = Some(payload);
        Ok(self)
    }

    /// Moves `generating -> failed`, recording the error category
    pub fn fail(mut self, error: &AppError) -> Result<Self> {
        self.ensure_generating()?;
        self.status = ReportStatus::Failed;
        self.payload = None;
        self.failure = Some(ReportFailure::from(error));
        Ok(self)
    }

    /// Copy without the payload, as returned by listings
    pub fn summary(&self) -> Self {
        Self {
            payload: None,
            ..self.clone()
        }
    }

    fn ensure_generating(&self) -> Result<()> {
        if self.status.is_terminal() {
            return Err(AppError::internal(format!(
                "report {} is already {}",
                self.id, self.status
            )));
        }
        Ok(())
    }
}
