use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::{AppError, Result};
use crate::modules::analytics::models::PeriodKind;
use crate::modules::analytics::services::PeriodRequest;

/// `period`, `start_date` and `end_date` as sent by dashboard clients.
///
/// Dates are `YYYY-MM-DD` and inclusive. They apply when `period` is
/// `custom` or omitted; with a named period they are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl PeriodQuery {
    pub fn to_request(&self) -> Result<PeriodRequest> {
        let token = self
            .period
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        let wants_custom = token.map_or(true, |t| {
            t.parse::<PeriodKind>().ok() == Some(PeriodKind::Custom)
        });

        match (wants_custom, self.start_date, self.end_date) {
            (true, Some(start), Some(end)) => PeriodRequest::from_dates(start, end),
            (true, Some(_), None) | (true, None, Some(_)) => Err(AppError::validation(
                "start_date and end_date must be supplied together",
            )),
            _ => Ok(PeriodRequest::Token(
                token.unwrap_or(PeriodKind::Month.as_str()).to_string(),
            )),
        }
    }
}
