use std::time::Duration;

use rust_decimal::Decimal;

use super::env_or;
use crate::core::{AppError, Result};

/// Report generation tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingConfig {
    /// Overall deadline for one report generation
    pub deadline: Duration,
    /// Default length of ranked lists
    pub top_n: usize,
    /// Share of revenue booked as expenses
    pub expense_ratio: Decimal,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(30),
            top_n: 5,
            expense_ratio: Decimal::new(65, 2),
        }
    }
}

impl ReportingConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            deadline: Duration::from_secs(env_or(
                "REPORT_DEADLINE_SECONDS",
                defaults.deadline.as_secs(),
            )?),
            top_n: env_or("REPORT_TOP_N", defaults.top_n)?,
            expense_ratio: env_or("REPORT_EXPENSE_RATIO", defaults.expense_ratio)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.deadline.is_zero() {
            return Err(AppError::Configuration(
                "REPORT_DEADLINE_SECONDS must be greater than 0".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(AppError::Configuration(
                "REPORT_TOP_N must be greater than 0".to_string(),
            ));
        }
        if self.expense_ratio < Decimal::ZERO || self.expense_ratio > Decimal::ONE {
            return Err(AppError::Configuration(format!(
                "REPORT_EXPENSE_RATIO must be within [0, 1], got {}",
                self.expense_ratio
            )));
        }
        Ok(())
    }
}
