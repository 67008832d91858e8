use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::analytics::models::{Period, PeriodKind};

/// How a caller asked for a reporting window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodRequest {
    /// week | month | quarter | year; anything else resolves to month
    Token(String),
    /// Caller-supplied instants, `[start, end)`
    Explicit {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl PeriodRequest {
    /// Builds an explicit request from inclusive calendar dates.
    ///
    /// `end` is moved to the following midnight so the whole end day is
    /// covered by the half-open range.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AppError::invalid_range(format!(
                "start_date ({}) must be before or equal to end_date ({})",
                start, end
            )));
        }
        Ok(PeriodRequest::Explicit {
            start: start.and_time(chrono::NaiveTime::MIN).and_utc(),
            end: (end + Duration::days(1)).and_time(chrono::NaiveTime::MIN).and_utc(),
        })
    }
}

impl Default for PeriodRequest {
    fn default() -> Self {
        PeriodRequest::Token(PeriodKind::Month.as_str().to_string())
    }
}

/// Resolves a period request against the reference instant `now`
pub fn resolve_period(request: &PeriodRequest, now: DateTime<Utc>) -> Result<Period> {
    match request {
        PeriodRequest::Token(token) => Ok(resolve_token(token, now)),
        PeriodRequest::Explicit { start, end } => resolve_custom(*start, *end),
    }
}

/// Resolves a named window ending at `now`.
///
/// Unknown tokens, and `custom` without an explicit range, fall back to month.
pub fn resolve_token(token: &str, now: DateTime<Utc>) -> Period {
    let kind = match token.parse::<PeriodKind>() {
        Ok(PeriodKind::Custom) | Err(_) => {
            warn!(token = %token, "Unrecognised period token, using month");
            PeriodKind::Month
        }
        Ok(kind) => kind,
    };

    let start = match kind {
        PeriodKind::Week => now - Duration::days(7),
        PeriodKind::Quarter => months_before(now, 3),
        PeriodKind::Year => months_before(now, 12),
        PeriodKind::Month | PeriodKind::Custom => months_before(now, 1),
    };

    Period { kind, start, end: now }
}

/// Validates an explicit range; `start` must precede `end`
pub fn resolve_custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Period> {
    Period::new(PeriodKind::Custom, start, end)
}

/// Shifts back by calendar months, clamping the day to the target month's
/// length (Mar 31 -> Feb 29)
fn months_before(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
