use serde::Serialize;

use crate::record::Record;

/// Stock level of a record relative to its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StockStatus {
    /// Nothing left.
    Rupture,
    /// At or below the threshold.
    Low,
    Normal,
}

impl StockStatus {
    /// Badge text, in the same French locale as prices and dates.
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::Rupture => "Rupture",
            StockStatus::Low => "Stock faible",
            StockStatus::Normal => "En stock",
        }
    }
}

/// Classifies a quantity against a threshold.
pub fn status_from_levels(quantity: u32, threshold: u32) -> StockStatus {
    if quantity == 0 {
        StockStatus::Rupture
    } else if quantity <= threshold {
        StockStatus::Low
    } else {
        StockStatus::Normal
    }
}

/// Status of a record. Always computed, never stored.
pub fn status_of(record: &Record) -> StockStatus {
    status_from_levels(record.quantity, record.min_quantity)
}

/// Per-status tally of a record list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub normal: usize,
    pub low: usize,
    pub rupture: usize,
}

pub fn counts_by_status(items: &[Record]) -> StatusCounts {
    items.iter().fold(StatusCounts::default(), |mut counts, record| {
        counts.total += 1;
        match status_of(record) {
            StockStatus::Normal => counts.normal += 1,
            StockStatus::Low => counts.low += 1,
            StockStatus::Rupture => counts.rupture += 1,
        }
        counts
    })
}

/// Value of the stock held for one record.
pub fn stock_value(record: &Record) -> f64 {
    f64::from(record.quantity) * record.price
}

pub fn inventory_value(items: &[Record]) -> f64 {
    items.iter().map(stock_value).sum()
}
