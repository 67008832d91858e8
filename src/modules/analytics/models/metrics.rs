use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A `{name, metric}` pair as emitted in rankings and breakdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedMetric {
    pub name: String,
    pub metric: Decimal,
}

impl NamedMetric {
    pub fn new(name: impl Into<String>, metric: Decimal) -> Self {
        Self {
            name: name.into(),
            metric,
        }
    }
}

/// String-keyed accumulator that iterates in first-insertion order.
///
/// Rankings break ties by this order, so two runs over the same records in
/// the same order always produce the same output.
#[derive(Debug, Clone, Default)]
pub struct OrderedTotals {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl OrderedTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `key`, appending the key if unseen
    pub fn add(&mut self, key: &str, amount: Decimal) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += amount,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(key, amount)| (key.as_str(), *amount))
    }

    /// Entries in insertion order as `{name, metric}` pairs
    pub fn to_metrics(&self) -> Vec<NamedMetric> {
        self.iter()
            .map(|(name, metric)| NamedMetric::new(name, metric))
            .collect()
    }
}

impl PartialEq for OrderedTotals {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<S: AsRef<str>> FromIterator<(S, Decimal)> for OrderedTotals {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut totals = OrderedTotals::new();
        for (key, amount) in iter {
            totals.add(key.as_ref(), amount);
        }
        totals
    }
}

/// One calendar month and its independently aggregated value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// e.g. "Jan 2024"
    pub label: String,
    pub month_start: NaiveDate,
    pub value: Decimal,
}

/// Metric over a period compared against the preceding equal-length period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthComparison {
    pub current: Decimal,
    pub previous: Decimal,
    /// Percentage change, see `growth::growth_rate`
    pub growth_rate: Decimal,
}

/// Revenue-derived financial figures for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub profit_margin: Decimal,
    pub completed_services: u64,
}

/// Service counts for jobs opened in a period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatusCounts {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub cancelled: u64,
}
