use rust_decimal::Decimal;

use crate::modules::analytics::models::{
    StockItem, StockItemStatus, StockSnapshot, StockStatus, StockStatusCounts,
};

/// Classifies on-hand quantity against the minimum level.
///
/// - `OutOfStock`: quantity = 0
/// - `LowStock`: 0 < quantity ≤ min
/// - `Adequate`: min < quantity ≤ 1.5 × min
/// - `InStock`: quantity > 1.5 × min
pub fn classify(quantity: u32, min_stock_level: u32) -> StockStatus {
    let quantity = u64::from(quantity);
    let min = u64::from(min_stock_level);

    if quantity == 0 {
        StockStatus::OutOfStock
    } else if quantity <= min {
        StockStatus::LowStock
    } else if quantity * 2 <= min * 3 {
        StockStatus::Adequate
    } else {
        StockStatus::InStock
    }
}

/// Units needed to lift an item needing reorder to `floor(1.5 × min)`, and
/// never below `min + 1`. Zero for items that do not need reordering.
pub fn reorder_quantity(quantity: u32, min_stock_level: u32) -> u32 {
    if !classify(quantity, min_stock_level).needs_reorder() {
        return 0;
    }
    let min = u64::from(min_stock_level);
    let target = (min * 3 / 2).max(min + 1);
    u32::try_from(target.saturating_sub(u64::from(quantity))).unwrap_or(u32::MAX)
}

/// Builds the inventory snapshot: total value, status counts, reorder totals.
///
/// Items keep the order they were read in.
pub fn snapshot(items: &[StockItem]) -> StockSnapshot {
    let mut status_counts = StockStatusCounts::default();
    let mut total_value = Decimal::ZERO;
    let mut reorder_total: u64 = 0;
    let mut reorder_cost = Decimal::ZERO;

    let items = items
        .iter()
        .map(|item| {
            let status = classify(item.quantity, item.min_stock_level);
            let reorder = reorder_quantity(item.quantity, item.min_stock_level);
            let value = item.stock_value();

            status_counts.record(status);
            total_value += value;
            reorder_total += u64::from(reorder);
            reorder_cost += Decimal::from(reorder) * item.unit_price;

            StockItemStatus {
                id: item.id,
                name: item.name.clone(),
                category: item.category.clone(),
                quantity: item.quantity,
                min_stock_level: item.min_stock_level,
                unit_price: item.unit_price,
                value,
                status,
                reorder_quantity: reorder,
            }
        })
        .collect::<Vec<_>>();

    StockSnapshot {
        total_items: items.len() as u64,
        total_value,
        status_counts,
        reorder_quantity: reorder_total,
        reorder_cost,
        items,
    }
}
