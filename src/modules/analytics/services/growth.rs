use rust_decimal::Decimal;

use crate::core::money::round_amount;
use crate::modules::analytics::models::{GrowthComparison, TimeRange};

/// Growth reported when the preceding period's value is zero.
///
/// Any activity after an empty period reads as +100%, including none at all.
pub const GROWTH_WITHOUT_BASELINE: Decimal = Decimal::ONE_HUNDRED;

/// `(current - previous) / previous × 100`, rounded to two places.
///
/// A zero `previous` yields [`GROWTH_WITHOUT_BASELINE`].
pub fn growth_rate(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return GROWTH_WITHOUT_BASELINE;
    }
    round_amount((current - previous) / previous * Decimal::ONE_HUNDRED)
}

/// Evaluates `metric` over `range` and over the equal-length range right
/// before it.
pub fn compare_with_preceding<F>(range: TimeRange, metric: F) -> GrowthComparison
where
    F: Fn(TimeRange) -> Decimal,
{
    let current = metric(range);
    let previous = metric(range.preceding());

    GrowthComparison {
        current,
        previous,
        growth_rate: growth_rate(current, previous),
    }
}
