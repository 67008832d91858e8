use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for amounts and percentages in report payloads
pub const REPORT_SCALE: u32 = 2;

/// Rounds an amount to report precision, half away from zero
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(REPORT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole × 100`, rounded to report precision.
///
/// Returns zero when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    round_amount(part / whole * Decimal::ONE_HUNDRED)
}

/// Mean of `total` over `count` items, zero for an empty set
pub fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    round_amount(total / Decimal::from(count))
}
