use rust_decimal::Decimal;

use crate::modules::analytics::models::{NamedMetric, OrderedTotals};

/// Ranking length used when none is configured
pub const DEFAULT_TOP_N: usize = 5;

/// Sorts `entries` by metric, largest first, and keeps the first `n`.
///
/// The sort is stable: equal metrics keep their input order.
pub fn top_n<I, S>(entries: I, n: usize) -> Vec<NamedMetric>
where
    I: IntoIterator<Item = (S, Decimal)>,
    S: Into<String>,
{
    let mut ranked: Vec<NamedMetric> = entries
        .into_iter()
        .map(|(name, metric)| NamedMetric::new(name, metric))
        .collect();

    ranked.sort_by(|a, b| b.metric.cmp(&a.metric));
    ranked.truncate(n);
    ranked
}

/// `top_n` over an accumulator, in its insertion order
pub fn top_n_totals(totals: &OrderedTotals, n: usize) -> Vec<NamedMetric> {
    top_n(totals.iter(), n)
}
