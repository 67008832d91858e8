use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{average, percentage, round_amount};
use crate::modules::analytics::models::{
    BookingRecord, CustomerRecord, FinanceEntry, FinancialSummary, OrderedTotals, ServiceRecord,
    ServiceStatus, ServiceStatusCounts, TimeRange, WorkerRecord,
};

/// Category used for services without a type label
pub const GENERAL_SERVICE_CATEGORY: &str = "General Service";

/// Expenses as a share of revenue until a real expense ledger is wired in
pub const DEFAULT_EXPENSE_RATIO: Decimal = Decimal::from_parts(65, 0, 0, false, 2);

/// Source of the expense figure in financial summaries
pub trait ExpensePolicy: Send + Sync + std::fmt::Debug {
    fn expenses_for(&self, revenue: Decimal) -> Decimal;
}

/// Expenses approximated as a fixed ratio of revenue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRatioExpensePolicy {
    ratio: Decimal,
}

impl FixedRatioExpensePolicy {
    pub fn new(ratio: Decimal) -> Self {
        Self { ratio }
    }

    pub fn ratio(&self) -> Decimal {
        self.ratio
    }
}

impl Default for FixedRatioExpensePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXPENSE_RATIO)
    }
}

impl ExpensePolicy for FixedRatioExpensePolicy {
    fn expenses_for(&self, revenue: Decimal) -> Decimal {
        round_amount(revenue * self.ratio)
    }
}

/// Customers seen in a window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerActivity {
    pub total_customers: u64,
    pub new_customers: u64,
    pub active_customers: u64,
    pub returning_customers: u64,
}

/// Sums, counts and groups operational records over a time range.
///
/// All methods are pure over the records they are given; records outside the
/// range, or in the wrong state, contribute nothing.
#[derive(Debug, Clone)]
pub struct Aggregator {
    expense_policy: Arc<dyn ExpensePolicy>,
}

impl Aggregator {
    pub fn new(expense_policy: Arc<dyn ExpensePolicy>) -> Self {
        Self { expense_policy }
    }

    /// Completed services whose completion date falls inside `range`
    pub fn completed_in<'a>(
        services: &'a [ServiceRecord],
        range: TimeRange,
    ) -> impl Iterator<Item = &'a ServiceRecord> + 'a {
        services
            .iter()
            .filter(move |s| s.is_completed() && range.contains_opt(s.completion_date))
    }

    /// Σ cost of completed services, missing costs as zero
    pub fn total_revenue(services: &[ServiceRecord], range: TimeRange) -> Decimal {
        Self::completed_in(services, range).map(ServiceRecord::revenue).sum()
    }

    pub fn completed_count(services: &[ServiceRecord], range: TimeRange) -> u64 {
        Self::completed_in(services, range).count() as u64
    }

    pub fn financial_summary(&self, services: &[ServiceRecord], range: TimeRange) -> FinancialSummary {
        let total_revenue = Self::total_revenue(services, range);
        let total_expenses = self.expense_policy.expenses_for(total_revenue);
        let net_profit = total_revenue - total_expenses;

        FinancialSummary {
            total_revenue,
            total_expenses,
            net_profit,
            profit_margin: percentage(net_profit, total_revenue),
            completed_services: Self::completed_count(services, range),
        }
    }

    /// Completed-service revenue per category label
    pub fn revenue_by_category(services: &[ServiceRecord], range: TimeRange) -> OrderedTotals {
        Self::completed_in(services, range)
            .map(|s| (category_of(s), s.revenue()))
            .collect()
    }

    /// Completed-service count per category label
    pub fn count_by_category(services: &[ServiceRecord], range: TimeRange) -> OrderedTotals {
        Self::completed_in(services, range)
            .map(|s| (category_of(s), Decimal::ONE))
            .collect()
    }

    /// Status counts for services opened inside `range`
    pub fn status_counts(services: &[ServiceRecord], range: TimeRange) -> ServiceStatusCounts {
        let mut counts = ServiceStatusCounts::default();
        for service in services.iter().filter(|s| range.contains(s.created_at)) {
            counts.total += 1;
            match service.status {
                ServiceStatus::Pending => counts.pending += 1,
                ServiceStatus::InProgress => counts.in_progress += 1,
                ServiceStatus::Completed => counts.completed += 1,
                ServiceStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }

    pub fn average_service_value(services: &[ServiceRecord], range: TimeRange) -> Decimal {
        average(
            Self::total_revenue(services, range),
            Self::completed_in(services, range).count(),
        )
    }

    /// Recorded finance entries per category
    pub fn ledger_by_category(entries: &[FinanceEntry], range: TimeRange) -> OrderedTotals {
        entries
            .iter()
            .filter(|e| range.contains(e.date))
            .map(|e| (e.category.as_str(), e.amount))
            .collect()
    }

    /// Customer counts for `range`.
    ///
    /// A returning customer has at least two lifetime bookings and at least
    /// one booking created inside the range.
    pub fn customer_activity(customers: &[CustomerRecord], range: TimeRange) -> CustomerActivity {
        let mut activity = CustomerActivity {
            total_customers: customers.len() as u64,
            ..CustomerActivity::default()
        };

        for customer in customers {
            if range.contains(customer.created_at) {
                activity.new_customers += 1;
            }
            let active = customer.bookings.iter().any(|b| range.contains(b.created_at));
            if active {
                activity.active_customers += 1;
                if customer.lifetime_bookings() >= 2 {
                    activity.returning_customers += 1;
                }
            }
        }
        activity
    }

    pub fn new_customer_count(customers: &[CustomerRecord], range: TimeRange) -> u64 {
        customers
            .iter()
            .filter(|c| range.contains(c.created_at))
            .count() as u64
    }

    /// Completed-service spend per customer name, via the service's booking
    pub fn spend_by_customer(
        services: &[ServiceRecord],
        customers: &[CustomerRecord],
        range: TimeRange,
    ) -> OrderedTotals {
        let owner_by_booking: HashMap<i64, &str> = customers
            .iter()
            .flat_map(|c| c.bookings.iter().map(move |b| (b.id, c.name.as_str())))
            .collect();

        Self::completed_in(services, range)
            .filter_map(|s| {
                owner_by_booking
                    .get(&s.booking_id)
                    .map(|name| (*name, s.revenue()))
            })
            .collect()
    }

    /// Completed-service revenue per worker name
    pub fn revenue_by_worker(workers: &[WorkerRecord], range: TimeRange) -> OrderedTotals {
        workers
            .iter()
            .map(|w| {
                (
                    w.name.as_str(),
                    Self::total_revenue(&w.completed_services, range),
                )
            })
            .collect()
    }

    /// Completed-service count per worker name
    pub fn completions_by_worker(workers: &[WorkerRecord], range: TimeRange) -> OrderedTotals {
        workers
            .iter()
            .map(|w| {
                (
                    w.name.as_str(),
                    Decimal::from(Self::completed_count(&w.completed_services, range)),
                )
            })
            .collect()
    }

    /// Mean of the ratings that are present
    pub fn average_rating(workers: &[WorkerRecord]) -> Decimal {
        let ratings: Vec<Decimal> = workers.iter().filter_map(|w| w.rating).collect();
        average(ratings.iter().copied().sum(), ratings.len())
    }

    /// Bookings created inside `range`
    pub fn bookings_in<'a>(
        bookings: &'a [BookingRecord],
        range: TimeRange,
    ) -> impl Iterator<Item = &'a BookingRecord> + 'a {
        bookings.iter().filter(move |b| range.contains(b.created_at))
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(Arc::new(FixedRatioExpensePolicy::default()))
    }
}

fn category_of(service: &ServiceRecord) -> &str {
    service
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(GENERAL_SERVICE_CATEGORY)
}
