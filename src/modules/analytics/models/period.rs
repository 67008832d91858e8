use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Named reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Week,
    Month,
    Quarter,
    Year,
    Custom,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Quarter => "quarter",
            PeriodKind::Year => "year",
            PeriodKind::Custom => "custom",
        }
    }
}

impl Default for PeriodKind {
    fn default() -> Self {
        PeriodKind::Month
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PeriodKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(PeriodKind::Week),
            "month" => Ok(PeriodKind::Month),
            "quarter" => Ok(PeriodKind::Quarter),
            "year" => Ok(PeriodKind::Year),
            "custom" => Ok(PeriodKind::Custom),
            other => Err(format!("Invalid period: {}", other)),
        }
    }
}

/// Half-open instant range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Same as `contains` for an optional instant; `None` is never inside
    pub fn contains_opt(&self, instant: Option<DateTime<Utc>>) -> bool {
        instant.is_some_and(|at| self.contains(at))
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The window of identical length ending where this one starts
    pub fn preceding(&self) -> TimeRange {
        TimeRange {
            start: self.start - self.duration(),
            end: self.start,
        }
    }

    /// Smallest range covering both `self` and `other`
    pub fn span(&self, other: &TimeRange) -> TimeRange {
        TimeRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A resolved reporting period. Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub kind: PeriodKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    /// Builds a period, rejecting empty or inverted ranges
    pub fn new(kind: PeriodKind, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(AppError::invalid_range(format!(
                "period start ({}) must be before end ({})",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { kind, start, end })
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.range().contains(instant)
    }

    /// Human-readable descriptor stored alongside reports
    pub fn descriptor(&self) -> String {
        format!(
            "{} ({} to {})",
            self.kind,
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
