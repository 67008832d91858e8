use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quantity on hand relative to the configured minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    Adequate,
    InStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::Adequate => "adequate",
            StockStatus::InStock => "in_stock",
        }
    }

    /// Items that should be reordered
    pub fn needs_reorder(&self) -> bool {
        matches!(self, StockStatus::OutOfStock | StockStatus::LowStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatusCounts {
    pub out_of_stock: u64,
    pub low_stock: u64,
    pub adequate: u64,
    pub in_stock: u64,
}

impl StockStatusCounts {
    pub fn record(&mut self, status: StockStatus) {
        match status {
            StockStatus::OutOfStock => self.out_of_stock += 1,
            StockStatus::LowStock => self.low_stock += 1,
            StockStatus::Adequate => self.adequate += 1,
            StockStatus::InStock => self.in_stock += 1,
        }
    }
}

/// Per-item view shared with inventory screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItemStatus {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub min_stock_level: u32,
    pub unit_price: Decimal,
    pub value: Decimal,
    pub status: StockStatus,
    pub reorder_quantity: u32,
}

/// Point-in-time summary of all stock items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub total_items: u64,
    pub total_value: Decimal,
    pub status_counts: StockStatusCounts,
    pub reorder_quantity: u64,
    pub reorder_cost: Decimal,
    pub items: Vec<StockItemStatus>,
}
