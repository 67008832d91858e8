use async_trait::async_trait;

use crate::core::Result;
use crate::modules::reports::models::{Report, ReportType};

/// Append-only store of generated reports.
///
/// Implementations are shared across concurrent generations and must accept
/// parallel inserts.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists a report. Rejects an id that is already stored with
    /// `AppError::Conflict`.
    async fn insert(&self, report: &Report) -> Result<()>;

    /// Stored reports, newest first, optionally of one type.
    ///
    /// Listings carry metadata only; payloads are left out.
    async fn list(&self, report_type: Option<ReportType>) -> Result<Vec<Report>>;

    /// Full report including its decoded payload
    async fn find_by_id(&self, id: &str) -> Result<Option<Report>>;
}
