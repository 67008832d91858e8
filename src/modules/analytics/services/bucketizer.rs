use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::modules::analytics::models::{MonthBucket, TimeRange};

/// First day of the month containing `instant`
pub fn month_start(instant: DateTime<Utc>) -> NaiveDate {
    let date = instant.date_naive();
    date.with_day(1).unwrap_or(date)
}

/// Calendar months touched by `range`, ascending.
///
/// Runs from the month of `start` through the month of the last instant
/// inside the range, so an end exactly on a month boundary does not add an
/// empty trailing month.
pub fn months_in(range: TimeRange) -> Vec<NaiveDate> {
    if range.start >= range.end {
        return Vec::new();
    }

    let first = month_start(range.start);
    let last = month_start(range.end - Duration::nanoseconds(1));

    let mut months = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        months.push(cursor);
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    months
}

/// Display label, e.g. "Jan 2024"
pub fn month_label(month: NaiveDate) -> String {
    month.format("%b %Y").to_string()
}

/// Splits `range` into calendar-month buckets in one pass over `items`.
///
/// `instant` picks the timestamp that places an item (items without one, or
/// outside `range`, are skipped); `value` is the amount it contributes.
/// Every month of the range is present, ascending, even when empty.
pub fn bucketize<T, I, V>(range: TimeRange, items: &[T], instant: I, value: V) -> Vec<MonthBucket>
where
    I: Fn(&T) -> Option<DateTime<Utc>>,
    V: Fn(&T) -> Decimal,
{
    let mut totals: BTreeMap<NaiveDate, Decimal> = months_in(range)
        .into_iter()
        .map(|month| (month, Decimal::ZERO))
        .collect();

    for item in items {
        let Some(at) = instant(item) else {
            continue;
        };
        if !range.contains(at) {
            continue;
        }
        if let Some(total) = totals.get_mut(&month_start(at)) {
            *total += value(item);
        }
    }

    totals
        .into_iter()
        .map(|(month, value)| MonthBucket {
            label: month_label(month),
            month_start: month,
            value,
        })
        .collect()
}

/// Bucket counts instead of sums
pub fn bucketize_count<T, I>(range: TimeRange, items: &[T], instant: I) -> Vec<MonthBucket>
where
    I: Fn(&T) -> Option<DateTime<Utc>>,
{
    bucketize(range, items, instant, |_| Decimal::ONE)
}
